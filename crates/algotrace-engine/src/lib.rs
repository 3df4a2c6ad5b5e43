//! Generation, recording and playback of algorithm traces.
//!
//! # Architecture
//!
//! The pipeline runs leaves first:
//!
//! - [`generator`] stamps random mazes from a seed and keeps only those the
//!   [`oracle`] accepts, retrying a bounded number of times.
//! - [`oracle`] answers reachability questions with breadth-first search.
//! - [`recorder`] runs one [`algorithms::SteppableAlgorithm`] with a
//!   [`recorder::Tracer`] attached and returns the immutable
//!   [`Trace`](algotrace_core::Trace).
//! - [`playback`] moves a cursor over a finished trace.
//!
//! Generation and recording are synchronous and CPU-bound. Their outputs
//! (`GridInstance`, `Trace`) are plain owned values, so callers can produce
//! them on a worker thread and hand them to the thread that drives playback.
//!
//! # Usage
//!
//! ```
//! use algotrace_engine::generator::generate_grid;
//! use algotrace_engine::playback::Playback;
//! use algotrace_engine::recorder::{record, AlgorithmInput, RecorderConfig};
//! use algotrace_core::AlgorithmKind;
//!
//! let grid = generate_grid(8, 6, 2, 0.25, 7).unwrap();
//! let trace = record(
//!     AlgorithmKind::MazeBacktrackingSolver,
//!     AlgorithmInput::Grid(grid),
//!     &RecorderConfig::default(),
//! )
//! .unwrap();
//!
//! let mut playback = Playback::new(trace).unwrap();
//! while !playback.is_complete() {
//!     playback.step_forward();
//! }
//! ```

pub mod algorithms;
pub mod error;
pub mod generator;
pub mod oracle;
pub mod playback;
pub mod recorder;

pub use error::{GenerateError, PlaybackError, RecordError};
pub use generator::{generate, generate_grid, GeneratorConfig};
pub use oracle::{is_solvable, reachable_set};
pub use playback::{Navigation, Playback};
pub use recorder::{record, record_named, AlgorithmInput, Recorder, RecorderConfig};
