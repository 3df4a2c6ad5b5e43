pub mod algorithm;
pub mod error;
pub mod grid;
pub mod id;
pub mod step;
pub mod trace;

// Re-export commonly used types
pub use algorithm::AlgorithmKind;
pub use error::CoreError;
pub use grid::{Cell, CellTag, GridInstance};
pub use id::InstanceId;
pub use step::{Payload, Step, StepKind};
pub use trace::{Solution, Trace, TraceBuilder};
