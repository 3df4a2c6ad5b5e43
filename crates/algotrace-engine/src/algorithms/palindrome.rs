//! Recursive palindrome check, outside-in.
//!
//! `check(lo, hi)` compares the characters at `lo` and `hi - 1` and
//! recurses on the inner range. Comparison is exact: case and punctuation
//! count. A palindrome yields one solution; anything else yields none.

use algotrace_core::{AlgorithmKind, InstanceId, Payload, StepKind};

use super::{input_id, SteppableAlgorithm};
use crate::error::RecordError;
use crate::recorder::Tracer;

#[derive(Debug, Clone)]
pub struct PalindromeChecker {
    text: String,
}

impl PalindromeChecker {
    pub fn new(text: impl Into<String>) -> Self {
        PalindromeChecker { text: text.into() }
    }

    fn check(&self, tracer: &mut Tracer, chars: &[char], lo: usize, hi: usize) -> Result<bool, RecordError> {
        tracer.enter(format!("is_palindrome({lo}, {hi})"), None)?;

        if hi - lo <= 1 {
            tracer.solution(
                None,
                Payload::Text {
                    value: self.text.clone(),
                },
            )?;
            tracer.leave(None, Some("true".into()))?;
            return Ok(true);
        }

        let (left, right) = (chars[lo], chars[hi - 1]);
        tracer.emit(
            StepKind::Compare,
            None,
            Payload::Compare {
                left,
                right,
                left_index: lo,
                right_index: hi - 1,
            },
        )?;

        if left != right {
            tracer.emit(StepKind::Backtrack, None, Payload::None)?;
            tracer.leave(None, Some("false".into()))?;
            return Ok(false);
        }

        let inner = self.check(tracer, chars, lo + 1, hi - 1)?;
        tracer.leave(None, Some(inner.to_string()))?;
        Ok(inner)
    }
}

impl SteppableAlgorithm for PalindromeChecker {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::PalindromeChecker
    }

    fn instance_id(&self) -> InstanceId {
        input_id(self.kind(), &self.text)
    }

    fn run(&self, tracer: &mut Tracer) -> Result<(), RecordError> {
        let chars: Vec<char> = self.text.chars().collect();
        self.check(tracer, &chars, 0, chars.len())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::{Recorder, RecorderConfig};

    fn record(text: &str) -> algotrace_core::Trace {
        Recorder::new(RecorderConfig::default())
            .record(&PalindromeChecker::new(text))
            .unwrap()
    }

    #[test]
    fn odd_palindrome() {
        let trace = record("racecar");
        assert_eq!(trace.solutions().len(), 1);
        assert_eq!(trace.steps_of(StepKind::Compare).count(), 3);
    }

    #[test]
    fn even_palindrome() {
        let trace = record("abba");
        assert_eq!(trace.solutions().len(), 1);
        assert_eq!(trace.steps_of(StepKind::Compare).count(), 2);
    }

    #[test]
    fn mismatch_stops_early() {
        let trace = record("abcxba");
        assert!(trace.solutions().is_empty());
        let compares: Vec<(char, char)> = trace
            .steps_of(StepKind::Compare)
            .map(|s| match s.payload {
                Payload::Compare { left, right, .. } => (left, right),
                ref other => panic!("expected compare, got {other:?}"),
            })
            .collect();
        assert_eq!(compares, vec![('a', 'a'), ('b', 'b'), ('c', 'x')]);
        assert_eq!(trace.steps_of(StepKind::Backtrack).count(), 1);
    }

    #[test]
    fn case_sensitive() {
        assert!(record("Abba").solutions().is_empty());
    }

    #[test]
    fn empty_and_single_are_palindromes() {
        assert_eq!(record("").solutions().len(), 1);
        assert_eq!(record("x").solutions().len(), 1);
    }

    #[test]
    fn unicode_compared_by_char() {
        assert_eq!(record("été").solutions().len(), 1);
    }
}
