use crate::grid::{FieldKind, Grid};

/// Backtraced coordinate along one axis, clamped so the bilinear stencil
/// stays inside the padded grid.
fn trace(origin: usize, velocity: f64, scale: f64, extent: usize) -> f64 {
    let x = origin as f64 - scale * velocity;
    x.max(0.5).min(extent as f64 + 0.5)
}

impl Grid<f64> {
    /// Bilinear sample at a fractional position inside `[0.5, extent + 0.5]`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let i0 = x.floor() as usize;
        let j0 = y.floor() as usize;
        let (i1, j1) = (i0 + 1, j0 + 1);

        let s1 = x - i0 as f64;
        let s0 = 1.0 - s1;
        let t1 = y - j0 as f64;
        let t0 = 1.0 - t1;

        s0 * (t0 * self[[i0, j0]] + t1 * self[[i0, j1]]) + s1 * (t0 * self[[i1, j0]] + t1 * self[[i1, j1]])
    }

    /// Semi-Lagrangian transport of `source` along `(u, v)` into `self`.
    ///
    /// The backtrace distance is `dt * width * u` horizontally and
    /// `dt * height * v` vertically, so the step length in cells grows with
    /// grid resolution.
    pub fn advect(&mut self, kind: FieldKind, source: &Grid<f64>, u: &Grid<f64>, v: &Grid<f64>, dt: f64) {
        let dims = self.dims();
        let (w, h) = (dims.width(), dims.height());
        let dt_x = dt * w as f64;
        let dt_y = dt * h as f64;

        for (i, j) in dims.interior() {
            let x = trace(i, u[[i, j]], dt_x, w);
            let y = trace(j, v[[i, j]], dt_y, h);
            self[[i, j]] = source.sample(x, y);
        }
        self.set_boundary(kind);
    }
}
