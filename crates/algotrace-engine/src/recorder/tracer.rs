//! The side channel algorithms write their steps into.
//!
//! A [`Tracer`] owns the step log and a shadow call stack. Algorithms call
//! [`enter`](Tracer::enter) / [`leave`](Tracer::leave) around each recursive
//! frame and [`emit`](Tracer::emit) for everything in between. The tracer
//! only appends; it never feeds anything back into the algorithm except the
//! errors that abort recording (depth or step budget exceeded).

use algotrace_core::{AlgorithmKind, Cell, InstanceId, Payload, StepKind, Trace, TraceBuilder};

use crate::error::RecordError;
use crate::recorder::RecorderConfig;

/// Step log plus shadow call stack for one recording pass.
#[derive(Debug)]
pub struct Tracer {
    log: TraceBuilder,
    stack: Vec<String>,
    max_depth: usize,
    max_steps: usize,
}

impl Tracer {
    pub fn new(instance_id: InstanceId, algorithm: AlgorithmKind, config: &RecorderConfig) -> Self {
        Tracer {
            log: TraceBuilder::new(instance_id, algorithm),
            stack: Vec::new(),
            max_depth: config.max_depth,
            max_steps: config.max_steps,
        }
    }

    /// Depth of the innermost open frame (root frame = 0).
    pub fn depth(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }

    pub fn steps_recorded(&self) -> usize {
        self.log.len()
    }

    /// Opens a frame and records a `call` step with the stack snapshot.
    pub fn enter(&mut self, frame: String, position: Option<Cell>) -> Result<(), RecordError> {
        let depth = self.stack.len();
        if depth > self.max_depth {
            return Err(RecordError::DepthExceeded {
                limit: self.max_depth,
                depth,
            });
        }
        self.stack.push(frame);
        let snapshot = Payload::Frame {
            stack: self.stack.clone(),
            value: None,
        };
        self.emit(StepKind::Call, position, snapshot)
    }

    /// Records a `return` step for the innermost frame, then closes it.
    pub fn leave(&mut self, position: Option<Cell>, value: Option<String>) -> Result<(), RecordError> {
        let snapshot = Payload::Frame {
            stack: self.stack.clone(),
            value,
        };
        self.emit(StepKind::Return, position, snapshot)?;
        self.stack.pop();
        Ok(())
    }

    /// Records one step at the current depth.
    pub fn emit(
        &mut self,
        kind: StepKind,
        position: Option<Cell>,
        payload: Payload,
    ) -> Result<(), RecordError> {
        self.check_budget()?;
        self.log.push(kind, position, self.depth(), payload);
        Ok(())
    }

    /// Records a `solutionFound` step and registers the state as a solution.
    pub fn solution(&mut self, position: Option<Cell>, state: Payload) -> Result<(), RecordError> {
        self.check_budget()?;
        self.log.push_solution(position, self.depth(), state);
        Ok(())
    }

    pub fn finish(self) -> Trace {
        self.log.finish()
    }

    fn check_budget(&self) -> Result<(), RecordError> {
        if self.log.len() >= self.max_steps {
            return Err(RecordError::StepLimitExceeded {
                limit: self.max_steps,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracer(max_depth: usize, max_steps: usize) -> Tracer {
        let config = RecorderConfig {
            max_depth,
            max_steps,
        };
        Tracer::new(InstanceId(1), AlgorithmKind::Factorial, &config)
    }

    #[test]
    fn enter_and_leave_track_depth() {
        let mut t = tracer(8, 100);
        t.enter("outer".into(), None).unwrap();
        assert_eq!(t.depth(), 0);
        t.enter("inner".into(), None).unwrap();
        assert_eq!(t.depth(), 1);
        t.leave(None, Some("1".into())).unwrap();
        t.leave(None, None).unwrap();

        let trace = t.finish();
        let depths: Vec<usize> = trace.steps().iter().map(|s| s.depth).collect();
        assert_eq!(depths, vec![0, 1, 1, 0]);
        assert_eq!(
            trace.steps()[2].payload,
            Payload::Frame {
                stack: vec!["outer".into(), "inner".into()],
                value: Some("1".into())
            }
        );
    }

    #[test]
    fn depth_limit_counts_from_zero() {
        let mut t = tracer(1, 100);
        t.enter("d0".into(), None).unwrap();
        t.enter("d1".into(), None).unwrap();
        assert_eq!(
            t.enter("d2".into(), None),
            Err(RecordError::DepthExceeded { limit: 1, depth: 2 })
        );
    }

    #[test]
    fn step_budget_enforced() {
        let mut t = tracer(8, 2);
        t.emit(StepKind::Compare, None, Payload::None).unwrap();
        t.solution(None, Payload::None).unwrap();
        assert_eq!(
            t.emit(StepKind::Compare, None, Payload::None),
            Err(RecordError::StepLimitExceeded { limit: 2 })
        );
        assert_eq!(t.steps_recorded(), 2);
    }
}
