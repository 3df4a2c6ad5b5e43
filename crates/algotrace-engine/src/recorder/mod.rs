//! Trace recording for steppable algorithms.
//!
//! A [`Recorder`] runs one [`SteppableAlgorithm`] to completion with a
//! [`Tracer`] attached and returns the finished [`Trace`]. Each recorder is
//! single-shot. Its lifecycle is
//! `Idle -> Recording -> (Completed | Failed)`, and a second call to
//! [`Recorder::record`] fails with [`RecordError::SessionFinished`].
//!
//! # Usage
//!
//! ```
//! use algotrace_engine::recorder::{record_named, AlgorithmInput, RecorderConfig};
//!
//! let trace = record_named(
//!     "permutation-generator",
//!     AlgorithmInput::Text("AB".into()),
//!     &RecorderConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(trace.solutions().len(), 2);
//! ```

pub mod tracer;

pub use tracer::Tracer;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use algotrace_core::{AlgorithmKind, GridInstance, Trace};

use crate::algorithms::{self, SteppableAlgorithm};
use crate::error::RecordError;

/// Limits that keep a recording pass bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Deepest recursion level allowed; the root frame is depth 0.
    pub max_depth: usize,
    /// Largest number of steps a trace may hold.
    pub max_steps: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        RecorderConfig {
            max_depth: 1024,
            max_steps: 1_000_000,
        }
    }
}

/// Lifecycle of a recording session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordingState {
    Idle,
    Recording,
    Completed { steps: usize, solutions: usize },
    Failed { error: RecordError },
}

/// Input handed to an algorithm; each kind accepts exactly one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AlgorithmInput {
    Grid(GridInstance),
    BoardSize(usize),
    Text(String),
    Number(u64),
}

/// Single-shot recorder.
#[derive(Debug)]
pub struct Recorder {
    config: RecorderConfig,
    state: RecordingState,
}

impl Recorder {
    pub fn new(config: RecorderConfig) -> Self {
        Recorder {
            config,
            state: RecordingState::Idle,
        }
    }

    pub fn state(&self) -> &RecordingState {
        &self.state
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Runs `algorithm` under a fresh tracer and returns its trace.
    pub fn record(&mut self, algorithm: &dyn SteppableAlgorithm) -> Result<Trace, RecordError> {
        if !matches!(self.state, RecordingState::Idle) {
            return Err(RecordError::SessionFinished);
        }
        self.state = RecordingState::Recording;

        let kind = algorithm.kind();
        let mut tracer = Tracer::new(algorithm.instance_id(), kind, &self.config);
        match algorithm.run(&mut tracer) {
            Ok(()) => {
                let trace = tracer.finish();
                info!(
                    algorithm = %kind,
                    instance = %trace.instance_id(),
                    steps = trace.len(),
                    solutions = trace.solutions().len(),
                    "trace recorded"
                );
                self.state = RecordingState::Completed {
                    steps: trace.len(),
                    solutions: trace.solutions().len(),
                };
                Ok(trace)
            }
            Err(error) => {
                warn!(
                    algorithm = %kind,
                    steps = tracer.steps_recorded(),
                    %error,
                    "recording failed"
                );
                self.state = RecordingState::Failed {
                    error: error.clone(),
                };
                Err(error)
            }
        }
    }
}

/// Builds the algorithm for `kind` from `input` and records it.
pub fn record(
    kind: AlgorithmKind,
    input: AlgorithmInput,
    config: &RecorderConfig,
) -> Result<Trace, RecordError> {
    let algorithm = algorithms::build(kind, input)?;
    Recorder::new(config.clone()).record(algorithm.as_ref())
}

/// Like [`record`], resolving the algorithm by name first.
pub fn record_named(
    name: &str,
    input: AlgorithmInput,
    config: &RecorderConfig,
) -> Result<Trace, RecordError> {
    let kind = name
        .parse::<AlgorithmKind>()
        .map_err(|_| RecordError::UnknownAlgorithm {
            name: name.to_string(),
        })?;
    record(kind, input, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::Factorial;

    #[test]
    fn config_default_values() {
        let config = RecorderConfig::default();
        assert_eq!(config.max_depth, 1024);
        assert_eq!(config.max_steps, 1_000_000);
    }

    #[test]
    fn new_recorder_is_idle() {
        let recorder = Recorder::new(RecorderConfig::default());
        assert_eq!(recorder.state(), &RecordingState::Idle);
    }

    #[test]
    fn successful_run_completes() {
        let mut recorder = Recorder::new(RecorderConfig::default());
        let trace = recorder.record(&Factorial::new(3)).unwrap();
        assert_eq!(
            recorder.state(),
            &RecordingState::Completed {
                steps: trace.len(),
                solutions: 1
            }
        );
    }

    #[test]
    fn recorder_is_single_shot() {
        let mut recorder = Recorder::new(RecorderConfig::default());
        recorder.record(&Factorial::new(2)).unwrap();
        assert_eq!(
            recorder.record(&Factorial::new(2)),
            Err(RecordError::SessionFinished)
        );
    }

    #[test]
    fn failed_run_keeps_error() {
        let config = RecorderConfig {
            max_depth: 2,
            ..RecorderConfig::default()
        };
        let mut recorder = Recorder::new(config);
        let err = recorder.record(&Factorial::new(10)).unwrap_err();
        assert_eq!(err, RecordError::DepthExceeded { limit: 2, depth: 3 });
        assert_eq!(recorder.state(), &RecordingState::Failed { error: err });
        assert_eq!(
            recorder.record(&Factorial::new(1)),
            Err(RecordError::SessionFinished)
        );
    }

    #[test]
    fn unknown_name_fails() {
        let err = record_named(
            "bogo-sort",
            AlgorithmInput::Text("abc".into()),
            &RecorderConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            RecordError::UnknownAlgorithm {
                name: "bogo-sort".into()
            }
        );
    }

    #[test]
    fn input_shape_must_match_kind() {
        let err = record(
            AlgorithmKind::NqueensPlacer,
            AlgorithmInput::Text("4".into()),
            &RecorderConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RecordError::InputMismatch { .. }));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: RecorderConfig = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.max_steps, 1_000_000);
    }
}
