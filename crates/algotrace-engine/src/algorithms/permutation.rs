//! Permutations by choose-one-then-recurse.
//!
//! `permute(prefix, rest)` picks each remaining character in input order,
//! appends it to the prefix and recurses on the rest. A character equal to
//! one already tried at the same level is skipped, so repeated letters do
//! not produce repeated permutations. Recursion depth equals input length.

use algotrace_core::{AlgorithmKind, InstanceId, Payload, StepKind};

use super::{input_id, SteppableAlgorithm};
use crate::error::RecordError;
use crate::recorder::Tracer;

#[derive(Debug, Clone)]
pub struct Permutations {
    input: String,
}

impl Permutations {
    pub fn new(input: impl Into<String>) -> Self {
        Permutations {
            input: input.into(),
        }
    }

    fn permute(
        &self,
        tracer: &mut Tracer,
        prefix: &mut String,
        rest: &mut Vec<char>,
    ) -> Result<(), RecordError> {
        let remaining: String = rest.iter().collect();
        tracer.enter(format!("permute(\"{prefix}\", \"{remaining}\")"), None)?;

        if rest.is_empty() {
            tracer.solution(None, text(prefix))?;
            tracer.leave(None, None)?;
            return Ok(());
        }

        let mut tried = Vec::with_capacity(rest.len());
        for i in 0..rest.len() {
            let ch = rest[i];
            if tried.contains(&ch) {
                tracer.emit(StepKind::Backtrack, None, text(&ch.to_string()))?;
                continue;
            }
            tried.push(ch);

            rest.remove(i);
            prefix.push(ch);
            tracer.emit(StepKind::Place, None, text(prefix))?;

            self.permute(tracer, prefix, rest)?;

            prefix.pop();
            rest.insert(i, ch);
            tracer.emit(StepKind::Remove, None, text(prefix))?;
        }

        tracer.leave(None, None)
    }
}

fn text(value: &str) -> Payload {
    Payload::Text {
        value: value.to_string(),
    }
}

impl SteppableAlgorithm for Permutations {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::PermutationGenerator
    }

    fn instance_id(&self) -> InstanceId {
        input_id(self.kind(), &self.input)
    }

    fn run(&self, tracer: &mut Tracer) -> Result<(), RecordError> {
        let mut rest: Vec<char> = self.input.chars().collect();
        let mut prefix = String::with_capacity(self.input.len());
        self.permute(tracer, &mut prefix, &mut rest)
    }
}
