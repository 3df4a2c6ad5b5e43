//! Immutable execution traces and the builder that produces them.
//!
//! A [`Trace`] is only ever assembled through [`TraceBuilder`], which hands
//! out sequence indices itself, so a freshly built trace always satisfies
//! `steps[i].sequence_index == i`. Traces loaded from JSON are checked with
//! [`Trace::validate`] before anything plays them back.

use serde::{Deserialize, Serialize};

use crate::algorithm::AlgorithmKind;
use crate::error::CoreError;
use crate::grid::Cell;
use crate::id::InstanceId;
use crate::step::{Payload, Step, StepKind};

/// A terminal state reached during recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Index of the `solutionFound` step that reported this solution.
    pub step_index: usize,
    pub state: Payload,
}

/// The complete record of one algorithm run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    instance_id: InstanceId,
    algorithm: AlgorithmKind,
    steps: Vec<Step>,
    solutions: Vec<Solution>,
}

impl Trace {
    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    pub fn algorithm(&self) -> AlgorithmKind {
        self.algorithm
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Solutions in discovery order.
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps of one kind, in order.
    pub fn steps_of(&self, kind: StepKind) -> impl Iterator<Item = &Step> + '_ {
        self.steps.iter().filter(move |step| step.kind == kind)
    }

    /// Deepest recursion level reached.
    pub fn max_depth(&self) -> usize {
        self.steps.iter().map(|step| step.depth).max().unwrap_or(0)
    }

    /// Checks the structural invariants: gap-free sequence indices and
    /// solutions that point at `solutionFound` steps in ascending order.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (expected, step) in self.steps.iter().enumerate() {
            if step.sequence_index != expected {
                return Err(CoreError::BrokenSequence {
                    expected,
                    found: step.sequence_index,
                });
            }
        }
        let mut previous: Option<usize> = None;
        for (solution, entry) in self.solutions.iter().enumerate() {
            if previous.is_some_and(|prev| entry.step_index <= prev) {
                return Err(CoreError::UnorderedSolutions {
                    solution,
                    step: entry.step_index,
                });
            }
            previous = Some(entry.step_index);
            let ok = self
                .steps
                .get(entry.step_index)
                .is_some_and(|step| step.kind == StepKind::SolutionFound);
            if !ok {
                return Err(CoreError::DanglingSolution {
                    solution,
                    step: entry.step_index,
                });
            }
        }
        Ok(())
    }
}

/// Append-only step log for a single recording pass.
#[derive(Debug)]
pub struct TraceBuilder {
    instance_id: InstanceId,
    algorithm: AlgorithmKind,
    steps: Vec<Step>,
    solutions: Vec<Solution>,
}

impl TraceBuilder {
    pub fn new(instance_id: InstanceId, algorithm: AlgorithmKind) -> Self {
        TraceBuilder {
            instance_id,
            algorithm,
            steps: Vec::new(),
            solutions: Vec::new(),
        }
    }

    /// Appends a step and returns its sequence index.
    pub fn push(
        &mut self,
        kind: StepKind,
        position: Option<Cell>,
        depth: usize,
        payload: Payload,
    ) -> usize {
        let sequence_index = self.steps.len();
        self.steps.push(Step {
            sequence_index,
            kind,
            position,
            depth,
            payload,
        });
        sequence_index
    }

    /// Appends a `solutionFound` step and registers its state as a solution.
    pub fn push_solution(&mut self, position: Option<Cell>, depth: usize, state: Payload) -> usize {
        let step_index = self.push(StepKind::SolutionFound, position, depth, state.clone());
        self.solutions.push(Solution { step_index, state });
        step_index
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn solution_count(&self) -> usize {
        self.solutions.len()
    }

    pub fn finish(self) -> Trace {
        Trace {
            instance_id: self.instance_id,
            algorithm: self.algorithm,
            steps: self.steps,
            solutions: self.solutions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn builder() -> TraceBuilder {
        TraceBuilder::new(InstanceId(7), AlgorithmKind::Factorial)
    }

    #[test]
    fn push_assigns_sequential_indices() {
        let mut b = builder();
        assert_eq!(b.push(StepKind::Call, None, 0, Payload::None), 0);
        assert_eq!(b.push(StepKind::Return, None, 0, Payload::None), 1);
        let trace = b.finish();
        assert_eq!(trace.len(), 2);
        assert!(trace.validate().is_ok());
    }

    #[test]
    fn solutions_point_at_their_steps() {
        let mut b = builder();
        b.push(StepKind::Call, None, 0, Payload::None);
        let idx = b.push_solution(None, 0, Payload::Number { value: 6 });
        let trace = b.finish();
        assert_eq!(trace.solutions().len(), 1);
        assert_eq!(trace.solutions()[0].step_index, idx);
        assert_eq!(trace.steps()[idx].kind, StepKind::SolutionFound);
        assert_eq!(trace.steps_of(StepKind::SolutionFound).count(), 1);
    }

    #[test]
    fn validate_catches_gap() {
        let mut b = builder();
        b.push(StepKind::Call, None, 0, Payload::None);
        b.push(StepKind::Return, None, 0, Payload::None);
        let mut json = serde_json::to_value(b.finish()).unwrap();
        json["steps"][1]["sequence_index"] = serde_json::json!(5);
        let tampered: Trace = serde_json::from_value(json).unwrap();
        assert_eq!(
            tampered.validate(),
            Err(CoreError::BrokenSequence {
                expected: 1,
                found: 5
            })
        );
    }

    #[test]
    fn validate_catches_dangling_solution() {
        let mut b = builder();
        b.push(StepKind::Call, None, 0, Payload::None);
        b.push_solution(None, 0, Payload::None);
        let mut json = serde_json::to_value(b.finish()).unwrap();
        json["solutions"][0]["step_index"] = serde_json::json!(0);
        let tampered: Trace = serde_json::from_value(json).unwrap();
        assert!(matches!(
            tampered.validate(),
            Err(CoreError::DanglingSolution { solution: 0, step: 0 })
        ));
    }

    #[test]
    fn validate_catches_out_of_order_solutions() {
        let mut b = builder();
        b.push(StepKind::Call, None, 0, Payload::None);
        b.push_solution(None, 0, Payload::Number { value: 1 });
        b.push_solution(None, 0, Payload::Number { value: 2 });
        let mut json = serde_json::to_value(b.finish()).unwrap();
        let solutions = json["solutions"].as_array_mut().unwrap();
        solutions.swap(0, 1);
        let tampered: Trace = serde_json::from_value(json).unwrap();
        assert_eq!(
            tampered.validate(),
            Err(CoreError::UnorderedSolutions { solution: 1, step: 1 })
        );
    }

    #[test]
    fn max_depth_of_empty_trace_is_zero() {
        assert_eq!(builder().finish().max_depth(), 0);
    }

    fn any_kind() -> impl Strategy<Value = StepKind> {
        prop_oneof![
            Just(StepKind::Call),
            Just(StepKind::Return),
            Just(StepKind::Place),
            Just(StepKind::Remove),
            Just(StepKind::Compare),
            Just(StepKind::Backtrack),
        ]
    }

    proptest! {
        #[test]
        fn builder_output_always_validates(
            kinds in proptest::collection::vec((any_kind(), any::<bool>()), 0..64)
        ) {
            let mut b = builder();
            for (depth, (kind, solution)) in kinds.into_iter().enumerate() {
                if solution {
                    b.push_solution(None, depth, Payload::None);
                } else {
                    b.push(kind, None, depth, Payload::None);
                }
            }
            let trace = b.finish();
            prop_assert!(trace.validate().is_ok());
            for (i, step) in trace.steps().iter().enumerate() {
                prop_assert_eq!(step.sequence_index, i);
            }
        }
    }
}
