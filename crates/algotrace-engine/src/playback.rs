//! Cursor-based playback over a finished trace.
//!
//! [`Playback`] owns a validated [`Trace`] and a single index into its
//! steps. Moving the cursor never re-runs anything; every position is
//! already recorded, so stepping backwards is as cheap as stepping forwards.
//! Reaching either end is reported as a [`Navigation`] status, not an error.

use algotrace_core::{Step, Trace};

use crate::error::PlaybackError;

/// Outcome of a single forward or backward step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The cursor moved to `index`.
    Moved { index: usize },
    /// Already on the first step; nothing changed.
    AtStart,
    /// Already on the last step; nothing changed.
    AtEnd,
}

/// Playback cursor over one trace. Not internally synchronized.
#[derive(Debug, Clone)]
pub struct Playback {
    trace: Trace,
    current: usize,
}

impl Playback {
    /// Takes ownership of a trace after checking its invariants. The cursor
    /// starts on the first step.
    pub fn new(trace: Trace) -> Result<Self, PlaybackError> {
        if trace.is_empty() {
            return Err(PlaybackError::EmptyTrace);
        }
        trace.validate()?;
        Ok(Playback { trace, current: 0 })
    }

    /// Loads a trace from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, PlaybackError> {
        let trace: Trace = serde_json::from_str(json).map_err(|e| PlaybackError::Decode {
            message: e.to_string(),
        })?;
        Playback::new(trace)
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn into_trace(self) -> Trace {
        self.trace
    }

    pub fn len(&self) -> usize {
        self.trace.len()
    }

    /// Always false; an empty trace is rejected by [`Playback::new`].
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &Step {
        &self.trace.steps()[self.current]
    }

    pub fn step_forward(&mut self) -> Navigation {
        if self.current + 1 >= self.len() {
            return Navigation::AtEnd;
        }
        self.current += 1;
        Navigation::Moved {
            index: self.current,
        }
    }

    pub fn step_backward(&mut self) -> Navigation {
        if self.current == 0 {
            return Navigation::AtStart;
        }
        self.current -= 1;
        Navigation::Moved {
            index: self.current,
        }
    }

    /// Jumps to `index`. Out-of-range indices are rejected, not clamped.
    pub fn seek(&mut self, index: usize) -> Result<&Step, PlaybackError> {
        if index >= self.len() {
            return Err(PlaybackError::OutOfRange {
                index,
                len: self.len(),
            });
        }
        self.current = index;
        Ok(self.current_step())
    }

    /// Jumps to the `solutionFound` step of the `n`-th solution (0-based).
    pub fn seek_solution(&mut self, n: usize) -> Result<&Step, PlaybackError> {
        let solutions = self.trace.solutions();
        let step_index = solutions
            .get(n)
            .map(|s| s.step_index)
            .ok_or(PlaybackError::NoSuchSolution {
                index: n,
                count: solutions.len(),
            })?;
        self.seek(step_index)
    }

    pub fn rewind(&mut self) {
        self.current = 0;
    }

    /// True once the cursor sits on the final step.
    pub fn is_complete(&self) -> bool {
        self.current + 1 == self.len()
    }

    /// Number of solutions found at or before the cursor.
    pub fn solutions_seen(&self) -> usize {
        self.trace
            .solutions()
            .iter()
            .take_while(|s| s.step_index <= self.current)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{Factorial, NQueens};
    use crate::recorder::{Recorder, RecorderConfig};
    use algotrace_core::{AlgorithmKind, CoreError, InstanceId, StepKind, TraceBuilder};

    fn five_step_trace() -> Trace {
        let trace = Recorder::new(RecorderConfig::default())
            .record(&Factorial::new(2))
            .unwrap();
        assert_eq!(trace.len(), 5);
        trace
    }

    #[test]
    fn starts_at_zero() {
        let playback = Playback::new(five_step_trace()).unwrap();
        assert_eq!(playback.current_index(), 0);
        assert_eq!(playback.current_step().kind, StepKind::Call);
        assert!(!playback.is_complete());
    }

    #[test]
    fn backward_at_start_reports_at_start() {
        let mut playback = Playback::new(five_step_trace()).unwrap();
        assert_eq!(playback.step_backward(), Navigation::AtStart);
        assert_eq!(playback.current_index(), 0);
    }

    #[test]
    fn forward_ten_times_stops_at_end() {
        let mut playback = Playback::new(five_step_trace()).unwrap();
        let results: Vec<Navigation> = (0..10).map(|_| playback.step_forward()).collect();
        for (i, nav) in results.iter().enumerate().take(4) {
            assert_eq!(*nav, Navigation::Moved { index: i + 1 });
        }
        assert!(results[4..].iter().all(|nav| *nav == Navigation::AtEnd));
        assert_eq!(playback.current_index(), 4);
        assert!(playback.is_complete());
    }

    #[test]
    fn backward_after_forward() {
        let mut playback = Playback::new(five_step_trace()).unwrap();
        playback.step_forward();
        playback.step_forward();
        assert_eq!(playback.step_backward(), Navigation::Moved { index: 1 });
    }

    #[test]
    fn seek_in_and_out_of_range() {
        let mut playback = Playback::new(five_step_trace()).unwrap();
        assert_eq!(playback.seek(3).unwrap().sequence_index, 3);
        assert_eq!(playback.current_index(), 3);
        assert_eq!(
            playback.seek(5).unwrap_err(),
            PlaybackError::OutOfRange { index: 5, len: 5 }
        );
        assert_eq!(playback.current_index(), 3);
    }

    #[test]
    fn seek_solution_jumps_to_solution_step() {
        let trace = Recorder::new(RecorderConfig::default())
            .record(&NQueens::new(4).unwrap())
            .unwrap();
        let mut playback = Playback::new(trace).unwrap();
        assert_eq!(playback.solutions_seen(), 0);

        let step = playback.seek_solution(1).unwrap();
        assert_eq!(step.kind, StepKind::SolutionFound);
        assert_eq!(playback.solutions_seen(), 2);

        playback.seek_solution(0).unwrap();
        assert_eq!(playback.solutions_seen(), 1);

        assert_eq!(
            playback.seek_solution(2).unwrap_err(),
            PlaybackError::NoSuchSolution { index: 2, count: 2 }
        );
    }

    #[test]
    fn rewind_returns_to_start() {
        let mut playback = Playback::new(five_step_trace()).unwrap();
        playback.seek(4).unwrap();
        playback.rewind();
        assert_eq!(playback.current_index(), 0);
    }

    #[test]
    fn empty_trace_rejected() {
        let empty = TraceBuilder::new(InstanceId(0), AlgorithmKind::Factorial).finish();
        assert_eq!(Playback::new(empty).unwrap_err(), PlaybackError::EmptyTrace);
    }

    #[test]
    fn json_round_trip_and_tamper_detection() {
        let trace = five_step_trace();
        let json = serde_json::to_string(&trace).unwrap();
        let playback = Playback::from_json(&json).unwrap();
        assert_eq!(playback.trace(), &trace);

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["steps"][2]["sequence_index"] = serde_json::json!(9);
        let err = Playback::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, PlaybackError::InvalidTrace(_)));

        assert!(matches!(
            Playback::from_json("{not json"),
            Err(PlaybackError::Decode { .. })
        ));
    }

    #[test]
    fn reordered_solutions_rejected_on_load() {
        let trace = Recorder::new(RecorderConfig::default())
            .record(&NQueens::new(4).unwrap())
            .unwrap();
        let mut value = serde_json::to_value(&trace).unwrap();
        value["solutions"].as_array_mut().unwrap().swap(0, 1);
        let err = Playback::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(
            err,
            PlaybackError::InvalidTrace(CoreError::UnorderedSolutions { solution: 1, .. })
        ));
    }

    #[test]
    fn loaded_playback_is_never_empty() {
        let playback = Playback::new(five_step_trace()).unwrap();
        assert!(!playback.is_empty());
        assert_eq!(playback.len(), 5);
    }
}
