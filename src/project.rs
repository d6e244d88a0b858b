use crate::grid::{FieldKind, Grid};

/// Tunables of the pressure projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Cell length `h`.
    pub cell_length: f64,
    /// Multiplier on the pressure-gradient correction; 1.0 is the plain step.
    pub overrelaxation: f64,
    pub iterations: usize,
}

/// Writes `-0.5 * h * (du/dx + dv/dy)` (central differences) into the
/// interior of `out`.
pub fn divergence(u: &Grid<f64>, v: &Grid<f64>, out: &mut Grid<f64>, h: f64) {
    for (i, j) in out.dims().interior() {
        out[[i, j]] = -0.5 * h * (u[[i + 1, j]] - u[[i - 1, j]] + v[[i, j + 1]] - v[[i, j - 1]]);
    }
}

/// Removes the divergent part of `(u, v)`. `pressure` and `div` are scratch
/// buffers and are overwritten.
pub fn project(u: &mut Grid<f64>, v: &mut Grid<f64>, pressure: &mut Grid<f64>, div: &mut Grid<f64>, params: &Projection) {
    let h = params.cell_length;
    let dims = u.dims();

    divergence(u, v, div, h);
    for (i, j) in dims.interior() {
        pressure[[i, j]] = 0.0;
    }
    div.set_boundary(FieldKind::Scalar);
    pressure.set_boundary(FieldKind::Scalar);

    pressure.relax(FieldKind::Scalar, div, 1.0, 4.0, params.iterations);

    let k = params.overrelaxation * 0.5 / h;
    for (i, j) in dims.interior() {
        u[[i, j]] -= k * (pressure[[i + 1, j]] - pressure[[i - 1, j]]);
        v[[i, j]] -= k * (pressure[[i, j + 1]] - pressure[[i, j - 1]]);
    }
    u.set_boundary(FieldKind::Horizontal);
    v.set_boundary(FieldKind::Vertical);
}
