use log::debug;

use crate::config::{Config, ConfigError};
use crate::grid::{Dims, FieldKind, Grid};
use crate::input::Impulse;
use crate::project::{project, Projection};
use crate::relax::DiffusionScaling;

/// Owns every buffer of the solver. The `*_prev` grids take impulses before a
/// step and serve as scratch space during it; the rest is the simulated state.
///
/// Parameters that make the scheme blow up (large rates, overrelaxation far
/// above 1, long timesteps) are not detected here.
pub struct Simulation {
    dims: Dims,
    dt: f64,
    diff: f64,
    visc: f64,
    scaling: DiffusionScaling,
    projection: Projection,

    density: Grid<f64>,
    density_prev: Grid<f64>,

    u: Grid<f64>,
    u_prev: Grid<f64>,
    v: Grid<f64>,
    v_prev: Grid<f64>,
}

impl Simulation {
    pub fn new(config: &Config) -> Result<Simulation, ConfigError> {
        config.validate()?;

        let dims = Dims::new(config.grid.width, config.grid.height);
        let solver = &config.solver;
        debug!(
            "allocating {}x{} grid, dt={:.5}, iterations={}",
            dims.width(),
            dims.height(),
            config.timing.dt(),
            solver.iterations
        );

        Ok(Simulation {
            dims,
            dt: config.timing.dt(),
            diff: solver.diffusion_rate,
            visc: solver.viscosity,
            scaling: solver.diffusion_scaling,
            projection: Projection {
                cell_length: f64::from(config.grid.cell_length),
                overrelaxation: solver.overrelaxation,
                iterations: solver.iterations,
            },
            density: Grid::new(dims),
            density_prev: Grid::new(dims),
            u: Grid::new(dims),
            u_prev: Grid::new(dims),
            v: Grid::new(dims),
            v_prev: Grid::new(dims),
        })
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn density(&self) -> &Grid<f64> {
        &self.density
    }

    pub fn velocity(&self) -> (&Grid<f64>, &Grid<f64>) {
        (&self.u, &self.v)
    }

    /// Advances exactly one timestep with the given impulses applied first.
    pub fn step(&mut self, impulses: &[Impulse]) {
        self.density_prev.fill(0.0);
        self.u_prev.fill(0.0);
        self.v_prev.fill(0.0);
        for impulse in impulses {
            self.apply(impulse);
        }

        self.vel_step();
        self.dens_step();
    }

    /// Force goes to the cell and its four orthogonal neighbours, density to
    /// the cell only.
    fn apply(&mut self, impulse: &Impulse) {
        let (x, y) = (impulse.x, impulse.y);
        for &(dx, dy) in &[(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)] {
            self.u_prev.add_at(x + dx, y + dy, impulse.force_x);
            self.v_prev.add_at(x + dx, y + dy, impulse.force_y);
        }
        self.density_prev.add_at(x, y, impulse.density);
    }

    fn vel_step(&mut self) {
        let dt = self.dt;
        self.u.add_source(&self.u_prev, dt);
        self.v.add_source(&self.v_prev, dt);

        self.u_prev.diffuse(FieldKind::Horizontal, &self.u, self.visc, dt, self.projection.iterations, self.scaling);
        self.v_prev.diffuse(FieldKind::Vertical, &self.v, self.visc, dt, self.projection.iterations, self.scaling);
        project(&mut self.u_prev, &mut self.v_prev, &mut self.u, &mut self.v, &self.projection);

        self.u.advect(FieldKind::Horizontal, &self.u_prev, &self.u_prev, &self.v_prev, dt);
        self.v.advect(FieldKind::Vertical, &self.v_prev, &self.u_prev, &self.v_prev, dt);
        project(&mut self.u, &mut self.v, &mut self.u_prev, &mut self.v_prev, &self.projection);
    }

    fn dens_step(&mut self) {
        let dt = self.dt;
        self.density.add_source(&self.density_prev, dt);
        self.density_prev.diffuse(FieldKind::Scalar, &self.density, self.diff, dt, self.projection.iterations, self.scaling);
        self.density.advect(FieldKind::Scalar, &self.density_prev, &self.u, &self.v, dt);
    }

    /// Copy of the current state for a renderer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            density: self.density.clone(),
            u: self.u.clone(),
            v: self.v.clone(),
        }
    }
}

/// A complete, self-consistent copy of one timestep. Density is unbounded
/// above zero; consumers clamp for display.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    density: Grid<f64>,
    u: Grid<f64>,
    v: Grid<f64>,
}

impl Snapshot {
    pub fn dims(&self) -> Dims {
        self.density.dims()
    }

    pub fn density(&self, i: usize, j: usize) -> f64 {
        self.density[[i, j]]
    }

    pub fn speed(&self, i: usize, j: usize) -> f64 {
        self.u[[i, j]].hypot(self.v[[i, j]])
    }

    pub fn total_density(&self) -> f64 {
        self.density.interior_sum()
    }

    pub fn max_speed(&self) -> f64 {
        self.dims()
            .interior()
            .map(|(i, j)| self.speed(i, j))
            .fold(0.0, f64::max)
    }
}
