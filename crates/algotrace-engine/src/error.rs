//! Error types for generation, recording and playback.
//!
//! Each stage has its own enum so callers can tell "relax your parameters"
//! ([`GenerateError::GenerationExhausted`], [`RecordError::DepthExceeded`])
//! apart from misuse ([`RecordError::UnknownAlgorithm`],
//! [`PlaybackError::OutOfRange`]). Navigation boundaries are not errors; see
//! [`Navigation`](crate::playback::Navigation).

use algotrace_core::{AlgorithmKind, CoreError};

/// Errors produced by the instance generator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerateError {
    #[error("invalid generator parameters: {reason}")]
    InvalidParameters { reason: String },

    /// Every attempt produced an unsolvable or overfull grid. Lower
    /// `wall_density` or `target_count` and try again.
    #[error("no solvable instance after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Errors produced while recording a trace.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("unknown algorithm: '{name}'")]
    UnknownAlgorithm { name: String },

    #[error("recursion depth limit ({limit}) exceeded: reached depth {depth}")]
    DepthExceeded { limit: usize, depth: usize },

    #[error("step limit ({limit}) exceeded")]
    StepLimitExceeded { limit: usize },

    #[error("{algorithm} expects {expected} input")]
    InputMismatch {
        algorithm: AlgorithmKind,
        expected: &'static str,
    },

    #[error("invalid input for {algorithm}: {reason}")]
    InvalidInput {
        algorithm: AlgorithmKind,
        reason: String,
    },

    #[error("arithmetic overflow computing {expression}")]
    ArithmeticOverflow { expression: String },

    /// The recorder already finished a session; traces are single-shot.
    #[error("recording session already finished")]
    SessionFinished,
}

/// Errors produced by the playback controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    #[error("cannot play back an empty trace")]
    EmptyTrace,

    #[error("invalid trace: {0}")]
    InvalidTrace(#[from] CoreError),

    #[error("could not decode trace: {message}")]
    Decode { message: String },

    #[error("step index {index} out of range for trace of length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("solution {index} does not exist; trace has {count}")]
    NoSuchSolution { index: usize, count: usize },
}
