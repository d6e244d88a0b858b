use std::fs;
use std::path::{Path, PathBuf};

use failure::Fail;
use serde::Deserialize;

use crate::relax::DiffusionScaling;

#[derive(Debug, Fail)]
pub enum ConfigError {
    #[fail(display = "grid dimensions must be positive, got {}x{}", width, height)]
    EmptyGrid { width: usize, height: usize },
    #[fail(display = "cell length must be positive")]
    ZeroCellLength,
    #[fail(display = "ticks per second must be positive, got {}", _0)]
    TickRate(f64),
    #[fail(display = "frames per second must be positive, got {}", _0)]
    FrameRate(f64),
    #[fail(display = "output interval must be at least one frame")]
    ZeroOutputInterval,
    #[fail(display = "failed to read {}: {}", path, source)]
    Read {
        path: String,
        #[cause]
        source: std::io::Error,
    },
    #[fail(display = "failed to parse {}: {}", path, source)]
    Parse {
        path: String,
        #[cause]
        source: serde_yaml::Error,
    },
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub solver: SolverConfig,
    pub timing: TimingConfig,
    pub output: OutputConfig,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    /// Grid-to-display scale: the projection's cell length and the number
    /// of pixels per cell side in rendered frames.
    pub cell_length: u32,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub diffusion_rate: f64,
    pub viscosity: f64,
    pub diffusion_scaling: DiffusionScaling,
    pub overrelaxation: f64,
    pub iterations: usize,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub ticks_per_second: f64,
    pub frames_per_second: f64,
    pub max_steps_per_frame: u32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub frames: usize,
    /// Write every n-th frame.
    pub every: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 120,
            height: 100,
            cell_length: 5,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            diffusion_rate: 2.0,
            viscosity: 2.0,
            diffusion_scaling: DiffusionScaling::Unscaled,
            overrelaxation: 1.0,
            iterations: 20,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 60.0,
            frames_per_second: 60.0,
            max_steps_per_frame: 8,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("frames"),
            frames: 300,
            every: 10,
        }
    }
}

impl TimingConfig {
    pub fn dt(&self) -> f64 {
        1.0 / self.ticks_per_second
    }
}

impl Config {
    /// Reads and validates a YAML file. Missing keys take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = &self.grid;
        if grid.width == 0 || grid.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: grid.width,
                height: grid.height,
            });
        }
        if grid.cell_length == 0 {
            return Err(ConfigError::ZeroCellLength);
        }
        // Negated comparisons also reject NaN.
        if !(self.timing.ticks_per_second > 0.0) {
            return Err(ConfigError::TickRate(self.timing.ticks_per_second));
        }
        if !(self.timing.frames_per_second > 0.0) {
            return Err(ConfigError::FrameRate(self.timing.frames_per_second));
        }
        if self.output.every == 0 {
            return Err(ConfigError::ZeroOutputInterval);
        }
        Ok(())
    }
}
