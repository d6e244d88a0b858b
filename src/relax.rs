use serde::Deserialize;

use crate::grid::{FieldKind, Grid};

/// How the diffusion coefficient relates to grid resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffusionScaling {
    /// `a = dt * rate`
    Unscaled,
    /// `a = dt * rate * width * height`
    GridArea,
}

impl Default for DiffusionScaling {
    fn default() -> Self {
        DiffusionScaling::Unscaled
    }
}

/// The four neighbours of a cell in the field being solved, plus the cell's
/// value in the right-hand side.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Stencil {
    pub left: f64,
    pub right: f64,
    pub up: f64,
    pub down: f64,
    pub source: f64,
}

impl Stencil {
    pub(crate) fn neighbours(&self) -> f64 {
        self.left + self.right + self.up + self.down
    }
}

impl Grid<f64> {
    /// One in-place pass over the interior. Cells already visited in this
    /// pass are seen with their new values.
    fn sweep<F>(&mut self, source: &Grid<f64>, mut rule: F)
    where
        F: FnMut(Stencil) -> f64,
    {
        let dims = self.dims();
        let stride = dims.stride();

        for (i, j) in dims.interior() {
            let k = i + j * stride;
            let stencil = Stencil {
                left: self.data[k - 1],
                right: self.data[k + 1],
                up: self.data[k - stride],
                down: self.data[k + stride],
                source: source.data[k],
            };
            self.data[k] = rule(stencil);
        }
    }

    /// Gauss-Seidel for `x = (b + a * sum(neighbours of x)) / divisor`,
    /// `iterations` full sweeps with the boundary refreshed after each one.
    /// Convergence is not checked.
    pub fn relax(&mut self, kind: FieldKind, source: &Grid<f64>, a: f64, divisor: f64, iterations: usize) {
        for _ in 0..iterations {
            self.sweep(source, |s| (s.source + a * s.neighbours()) / divisor);
            self.set_boundary(kind);
        }
    }

    /// Implicit diffusion of `source` into `self`. The current contents of
    /// `self` are the initial guess.
    pub fn diffuse(
        &mut self,
        kind: FieldKind,
        source: &Grid<f64>,
        rate: f64,
        dt: f64,
        iterations: usize,
        scaling: DiffusionScaling,
    ) {
        let dims = self.dims();
        let a = match scaling {
            DiffusionScaling::Unscaled => dt * rate,
            DiffusionScaling::GridArea => dt * rate * (dims.width() * dims.height()) as f64,
        };
        self.relax(kind, source, a, 1.0 + 4.0 * a, iterations);
    }
}
