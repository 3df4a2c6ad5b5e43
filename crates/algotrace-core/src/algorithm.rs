//! Names of the algorithms a trace can be recorded for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Every algorithm the recorder knows how to instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    MazeBacktrackingSolver,
    NqueensPlacer,
    PermutationGenerator,
    PalindromeChecker,
    Factorial,
    Fibonacci,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 6] = [
        AlgorithmKind::MazeBacktrackingSolver,
        AlgorithmKind::NqueensPlacer,
        AlgorithmKind::PermutationGenerator,
        AlgorithmKind::PalindromeChecker,
        AlgorithmKind::Factorial,
        AlgorithmKind::Fibonacci,
    ];

    /// Canonical kebab-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::MazeBacktrackingSolver => "maze-backtracking-solver",
            AlgorithmKind::NqueensPlacer => "nqueens-placer",
            AlgorithmKind::PermutationGenerator => "permutation-generator",
            AlgorithmKind::PalindromeChecker => "palindrome-checker",
            AlgorithmKind::Factorial => "factorial",
            AlgorithmKind::Fibonacci => "fibonacci",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = CoreError;

    /// Accepts the canonical names plus `n-queens-placer`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        if lowered == "n-queens-placer" {
            return Ok(AlgorithmKind::NqueensPlacer);
        }
        AlgorithmKind::ALL
            .into_iter()
            .find(|kind| kind.name() == lowered)
            .ok_or_else(|| CoreError::UnknownAlgorithm { name: s.to_string() })
    }
}
