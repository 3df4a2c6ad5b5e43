//! Seeded maze generation with guaranteed solvability.
//!
//! Each attempt stamps walls at random, forces the start `(0, 0)` and exit
//! `(height-1, width-1)` open, scatters treasures over the remaining open
//! cells and asks the [oracle](crate::oracle) whether the result is
//! solvable. Unsolvable attempts are discarded. The loop is capped at
//! [`GeneratorConfig::max_attempts`]; past that the caller gets
//! [`GenerateError::GenerationExhausted`] and should relax its parameters.
//!
//! Reproducibility: a single ChaCha8 stream seeded from
//! [`GeneratorConfig::seed`] drives every attempt, so the same configuration
//! always yields the same instance, on every platform.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use algotrace_core::{Cell, GridInstance};

use crate::error::GenerateError;
use crate::oracle;

/// Default cap on reject-and-retry attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Parameters for one generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub width: usize,
    pub height: usize,
    /// Number of treasures to place.
    pub target_count: usize,
    /// Probability that a non-start, non-exit cell becomes a wall, in `[0, 1)`.
    pub wall_density: f64,
    pub seed: u64,
    pub max_attempts: u32,
}

impl GeneratorConfig {
    /// An open grid (no walls, no treasures) with seed 0.
    pub fn new(width: usize, height: usize) -> Self {
        GeneratorConfig {
            width,
            height,
            target_count: 0,
            wall_density: 0.0,
            seed: 0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_targets(mut self, target_count: usize) -> Self {
        self.target_count = target_count;
        self
    }

    pub fn with_wall_density(mut self, wall_density: f64) -> Self {
        self.wall_density = wall_density;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Checks the parameter ranges.
    pub fn validate(&self) -> Result<(), GenerateError> {
        let invalid = |reason: String| Err(GenerateError::InvalidParameters { reason });

        if self.width == 0 || self.height == 0 {
            return invalid(format!(
                "width and height must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        let Some(area) = self.width.checked_mul(self.height) else {
            return invalid(format!("grid {}x{} is too large", self.width, self.height));
        };
        if !(0.0..1.0).contains(&self.wall_density) {
            return invalid(format!(
                "wall_density must be in [0, 1), got {}",
                self.wall_density
            ));
        }
        let capacity = area.saturating_sub(2);
        if self.target_count > capacity {
            return invalid(format!(
                "target_count {} exceeds the {capacity} free cells of a {}x{} grid",
                self.target_count, self.width, self.height
            ));
        }
        if self.max_attempts == 0 {
            return invalid("max_attempts must be at least 1".into());
        }
        Ok(())
    }
}

/// Generates a solvable instance, retrying up to `config.max_attempts` times.
pub fn generate(config: &GeneratorConfig) -> Result<GridInstance, GenerateError> {
    config.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    for attempt in 1..=config.max_attempts {
        match attempt_once(config, &mut rng)? {
            Some(grid) if oracle::is_solvable(&grid) => {
                info!(
                    attempt,
                    width = config.width,
                    height = config.height,
                    walls = grid.wall_count(),
                    id = %grid.id(),
                    "generated solvable instance"
                );
                return Ok(grid);
            }
            Some(_) => debug!(attempt, "rejected unsolvable instance"),
            None => debug!(attempt, "rejected instance with too few open cells"),
        }
    }

    warn!(
        attempts = config.max_attempts,
        wall_density = config.wall_density,
        target_count = config.target_count,
        "generation exhausted"
    );
    Err(GenerateError::GenerationExhausted {
        attempts: config.max_attempts,
    })
}

/// Convenience wrapper taking the parameters positionally.
pub fn generate_grid(
    width: usize,
    height: usize,
    target_count: usize,
    wall_density: f64,
    seed: u64,
) -> Result<GridInstance, GenerateError> {
    generate(
        &GeneratorConfig::new(width, height)
            .with_targets(target_count)
            .with_wall_density(wall_density)
            .with_seed(seed),
    )
}

/// One stamp-and-scatter pass. `None` when there are not enough open cells
/// for the requested treasures.
fn attempt_once(
    config: &GeneratorConfig,
    rng: &mut ChaCha8Rng,
) -> Result<Option<GridInstance>, GenerateError> {
    let start = Cell::new(0, 0);
    let exit = Cell::new(config.height - 1, config.width - 1);

    let mut walls = Vec::with_capacity(config.width * config.height);
    let mut open = Vec::new();
    for row in 0..config.height {
        for col in 0..config.width {
            let cell = Cell::new(row, col);
            if cell == start || cell == exit {
                walls.push(false);
                continue;
            }
            let wall = rng.gen_bool(config.wall_density);
            if !wall {
                open.push(cell);
            }
            walls.push(wall);
        }
    }

    if open.len() < config.target_count {
        return Ok(None);
    }
    let (targets, _) = open.partial_shuffle(rng, config.target_count);
    let targets = targets.to_vec();

    let grid = GridInstance::new(config.width, config.height, walls, start, exit, targets)?;
    Ok(Some(grid))
}
