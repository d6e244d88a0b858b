//! Two-dimensional "stable fluids" solver: implicit diffusion, pressure
//! projection and semi-Lagrangian advection on a dense grid with a one-cell
//! ghost border.

mod advect;
mod boundary;
pub mod config;
mod grid;
pub mod input;
pub mod pacing;
mod pointer;
mod project;
mod relax;
pub mod render;
mod simulation;

pub use config::{Config, ConfigError, GridConfig, OutputConfig, SolverConfig, TimingConfig};
pub use grid::{Dims, FieldKind, Grid};
pub use input::{impulse_channel, Impulse, ImpulseQueue, ImpulseSender, QueueClosed};
pub use pacing::{FixedStep, FramePacer};
pub use pointer::DragTracker;
pub use project::{divergence, project, Projection};
pub use relax::DiffusionScaling;
pub use simulation::{Simulation, Snapshot};
