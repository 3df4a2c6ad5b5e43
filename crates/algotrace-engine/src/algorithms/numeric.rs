//! Fixed-shape recursion demos: factorial and Fibonacci.
//!
//! Both record the call tree only (calls and returns with values), then a
//! single `solutionFound` carrying the result. Fibonacci is the naive
//! two-branch recursion on purpose; the repeated subcalls are what the
//! visualization shows.

use algotrace_core::{AlgorithmKind, InstanceId, Payload};

use super::{input_id, SteppableAlgorithm};
use crate::error::RecordError;
use crate::recorder::Tracer;

#[derive(Debug, Clone)]
pub struct Factorial {
    n: u64,
}

impl Factorial {
    pub fn new(n: u64) -> Self {
        Factorial { n }
    }

    fn eval(&self, tracer: &mut Tracer, n: u64) -> Result<u64, RecordError> {
        tracer.enter(format!("factorial({n})"), None)?;
        let value = if n <= 1 {
            1
        } else {
            let sub = self.eval(tracer, n - 1)?;
            n.checked_mul(sub).ok_or_else(|| RecordError::ArithmeticOverflow {
                expression: format!("factorial({n})"),
            })?
        };
        tracer.leave(None, Some(value.to_string()))?;
        Ok(value)
    }
}

impl SteppableAlgorithm for Factorial {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Factorial
    }

    fn instance_id(&self) -> InstanceId {
        input_id(self.kind(), &self.n.to_string())
    }

    fn run(&self, tracer: &mut Tracer) -> Result<(), RecordError> {
        let value = self.eval(tracer, self.n)?;
        tracer.solution(None, Payload::Number { value })
    }
}

#[derive(Debug, Clone)]
pub struct Fibonacci {
    n: u64,
}

impl Fibonacci {
    pub fn new(n: u64) -> Self {
        Fibonacci { n }
    }

    fn eval(&self, tracer: &mut Tracer, n: u64) -> Result<u64, RecordError> {
        tracer.enter(format!("fib({n})"), None)?;
        let value = if n < 2 {
            n
        } else {
            let a = self.eval(tracer, n - 1)?;
            let b = self.eval(tracer, n - 2)?;
            a.checked_add(b).ok_or_else(|| RecordError::ArithmeticOverflow {
                expression: format!("fib({n})"),
            })?
        };
        tracer.leave(None, Some(value.to_string()))?;
        Ok(value)
    }
}

impl SteppableAlgorithm for Fibonacci {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Fibonacci
    }

    fn instance_id(&self) -> InstanceId {
        input_id(self.kind(), &self.n.to_string())
    }

    fn run(&self, tracer: &mut Tracer) -> Result<(), RecordError> {
        let value = self.eval(tracer, self.n)?;
        tracer.solution(None, Payload::Number { value })
    }
}
