//! Instrumented recursive algorithms.
//!
//! Every algorithm here is an ordinary recursive function with [`Tracer`]
//! calls threaded through it. The tracer calls never influence which branch
//! is taken, so the recorded steps are exactly the sequential execution
//! order: calls pre-order, returns and backtracks post-order.

mod maze;
mod nqueens;
mod numeric;
mod palindrome;
mod permutation;

pub use maze::MazeSolver;
pub use nqueens::NQueens;
pub use numeric::{Factorial, Fibonacci};
pub use palindrome::PalindromeChecker;
pub use permutation::Permutations;

use algotrace_core::{AlgorithmKind, InstanceId};

use crate::error::RecordError;
use crate::recorder::{AlgorithmInput, Tracer};

/// A recursive algorithm that can run under a [`Tracer`].
pub trait SteppableAlgorithm {
    fn kind(&self) -> AlgorithmKind;

    /// Identity of the input this algorithm runs on.
    fn instance_id(&self) -> InstanceId;

    /// Runs the algorithm to completion, writing every step to `tracer`.
    fn run(&self, tracer: &mut Tracer) -> Result<(), RecordError>;
}

/// Pairs a kind with its input, rejecting mismatched shapes.
pub fn build(
    kind: AlgorithmKind,
    input: AlgorithmInput,
) -> Result<Box<dyn SteppableAlgorithm>, RecordError> {
    let mismatch = |expected| RecordError::InputMismatch {
        algorithm: kind,
        expected,
    };

    let algorithm: Box<dyn SteppableAlgorithm> = match (kind, input) {
        (AlgorithmKind::MazeBacktrackingSolver, AlgorithmInput::Grid(grid)) => {
            Box::new(MazeSolver::new(grid))
        }
        (AlgorithmKind::MazeBacktrackingSolver, _) => return Err(mismatch("a grid")),
        (AlgorithmKind::NqueensPlacer, AlgorithmInput::BoardSize(size)) => {
            Box::new(NQueens::new(size)?)
        }
        (AlgorithmKind::NqueensPlacer, _) => return Err(mismatch("a board size")),
        (AlgorithmKind::PermutationGenerator, AlgorithmInput::Text(text)) => {
            Box::new(Permutations::new(text))
        }
        (AlgorithmKind::PermutationGenerator, _) => return Err(mismatch("text")),
        (AlgorithmKind::PalindromeChecker, AlgorithmInput::Text(text)) => {
            Box::new(PalindromeChecker::new(text))
        }
        (AlgorithmKind::PalindromeChecker, _) => return Err(mismatch("text")),
        (AlgorithmKind::Factorial, AlgorithmInput::Number(n)) => Box::new(Factorial::new(n)),
        (AlgorithmKind::Factorial, _) => return Err(mismatch("a number")),
        (AlgorithmKind::Fibonacci, AlgorithmInput::Number(n)) => Box::new(Fibonacci::new(n)),
        (AlgorithmKind::Fibonacci, _) => return Err(mismatch("a number")),
    };
    Ok(algorithm)
}

/// Content id for a non-grid input: hash of `kind:input`.
fn input_id(kind: AlgorithmKind, input: &str) -> InstanceId {
    InstanceId::from_bytes(format!("{kind}:{input}").as_bytes())
}
