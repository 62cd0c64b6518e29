//! Explorer configuration.

use gprime_core::ConfigError;

/// Slack added to every jump size so that lattice distances equal to the
/// jump (e.g. `√8` for jump `2.83`) compare consistently.
pub const JUMP_TOLERANCE: f64 = 1e-3;

/// Norm bound of the sieved disk for a jump size, large enough to contain
/// the origin's component for every jump in the table. `None` past the
/// last entry.
pub fn default_norm_bound(jump: f64) -> Option<u64> {
    const TABLE: [(f64, u64); 6] = [
        (2.1, 3_000),
        (3.0, 10_000),
        (4.0, 1_100_000),
        (4.2, 20_000_000),
        (4.4, 116_000_000),
        (5.0, 17_900_000_000),
    ];
    TABLE
        .iter()
        .find(|&&(limit, _)| jump < limit)
        .map(|&(_, bound)| bound)
}

/// Largest jump [`default_norm_bound`] covers (exclusive).
pub const MAX_DEFAULT_JUMP: f64 = 5.0;

/// Cells per block for the streaming explorer.
pub fn default_block_cells(jump: f64) -> u64 {
    if jump < 4.0 {
        1_000_000
    } else if jump < 4.1 {
        10_000_000
    } else if jump < 4.45 {
        100_000_000
    } else {
        1_000_000_000
    }
}

fn check_jump(jump: f64) -> Result<(), ConfigError> {
    if jump.is_finite() && jump > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidJump { jump })
    }
}

/// Configuration for [`MoatExplorer`](crate::MoatExplorer).
#[derive(Clone, Debug, PartialEq)]
pub struct MoatConfig {
    /// Largest step between two primes of a component.
    pub jump: f64,
    /// Norm bound of the sieved disk. `None` picks
    /// [`default_norm_bound`].
    pub norm_bound: Option<u64>,
}

impl MoatConfig {
    /// Configuration with the default bound for `jump`.
    pub fn new(jump: f64) -> Self {
        Self {
            jump,
            norm_bound: None,
        }
    }

    /// Override the norm bound.
    pub fn with_norm_bound(mut self, bound: u64) -> Self {
        self.norm_bound = Some(bound);
        self
    }

    /// The norm bound to sieve, after validation.
    pub fn resolved_bound(&self) -> Result<u64, ConfigError> {
        check_jump(self.jump)?;
        match self.norm_bound {
            Some(bound) => Ok(bound),
            None => default_norm_bound(self.jump).ok_or(ConfigError::JumpTooLarge {
                jump: self.jump,
                max: MAX_DEFAULT_JUMP,
            }),
        }
    }

    /// Check the configuration without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolved_bound().map(|_| ())
    }
}

/// Configuration for [`SegmentedMoatExplorer`](crate::SegmentedMoatExplorer).
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentedConfig {
    /// Largest step between two primes of a component.
    pub jump: f64,
    /// Target cells per block (`dx · dy`). `None` picks
    /// [`default_block_cells`]. Doubled automatically when blocks become
    /// too narrow for the boundary strip.
    pub block_cells: Option<u64>,
    /// Starting norm bound of the shared seed table.
    pub initial_seed_bound: u64,
    /// Give up with [`MoatError::SearchLimit`](gprime_core::MoatError)
    /// once a block would start past this real part.
    pub max_real_part: Option<u64>,
}

impl SegmentedConfig {
    /// Default starting bound of the seed table.
    pub const DEFAULT_SEED_BOUND: u64 = 10_000;

    /// Configuration with default block budget and no search limit.
    pub fn new(jump: f64) -> Self {
        Self {
            jump,
            block_cells: None,
            initial_seed_bound: Self::DEFAULT_SEED_BOUND,
            max_real_part: None,
        }
    }

    /// Override the block budget.
    pub fn with_block_cells(mut self, cells: u64) -> Self {
        self.block_cells = Some(cells);
        self
    }

    /// Stop once a block would start past `limit`.
    pub fn with_max_real_part(mut self, limit: u64) -> Self {
        self.max_real_part = Some(limit);
        self
    }

    /// Block budget after applying the default.
    pub fn resolved_block_cells(&self) -> u64 {
        self.block_cells.unwrap_or_else(|| default_block_cells(self.jump))
    }

    /// Check the configuration without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_jump(self.jump)?;
        if self.block_cells == Some(0) {
            return Err(ConfigError::ZeroBlockBudget);
        }
        Ok(())
    }
}

/// Configuration for [`VerticalMoatSearch`](crate::VerticalMoatSearch).
#[derive(Clone, Debug, PartialEq)]
pub struct VerticalMoatConfig {
    /// Largest step between two primes of a component.
    pub jump: f64,
    /// Real part of the first block's left wall.
    pub real_part: u64,
    /// Cells per block (`dx · dy`).
    pub block_cells: u64,
    /// Widest block; also the starting width.
    pub max_width: u64,
    /// Consecutive moves to the right tolerated before giving up.
    pub max_steps_right: u32,
    /// Starting norm bound of the seed table.
    pub initial_seed_bound: u64,
}

impl VerticalMoatConfig {
    /// Default cells per block.
    pub const DEFAULT_BLOCK_CELLS: u64 = 10_000_000;
    /// Default widest block.
    pub const DEFAULT_MAX_WIDTH: u64 = 1_000;
    /// Default tolerance for consecutive moves to the right.
    pub const DEFAULT_MAX_STEPS_RIGHT: u32 = 10;

    /// Search for `jump` starting at `real_part`, with default block shape.
    pub fn new(jump: f64, real_part: u64) -> Self {
        Self {
            jump,
            real_part,
            block_cells: Self::DEFAULT_BLOCK_CELLS,
            max_width: Self::DEFAULT_MAX_WIDTH,
            max_steps_right: Self::DEFAULT_MAX_STEPS_RIGHT,
            initial_seed_bound: SegmentedConfig::DEFAULT_SEED_BOUND,
        }
    }

    /// Override the block shape.
    pub fn with_blocks(mut self, block_cells: u64, max_width: u64) -> Self {
        self.block_cells = block_cells;
        self.max_width = max_width;
        self
    }

    /// Check the configuration without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_jump(self.jump)?;
        if self.block_cells == 0 {
            return Err(ConfigError::ZeroBlockBudget);
        }
        if self.max_width == 0 || self.block_cells < self.max_width {
            return Err(ConfigError::EmptyWindow {
                dx: self.max_width,
                dy: self.block_cells / self.max_width.max(1),
            });
        }
        Ok(())
    }
}
