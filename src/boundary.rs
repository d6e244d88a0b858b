use crate::grid::{FieldKind, Grid};

impl Grid<f64> {
    /// Fills the ghost ring from the adjacent interior cells. The velocity
    /// component normal to a wall is mirrored with opposite sign so nothing
    /// flows through it; corners take the mean of their two edge neighbours.
    pub fn set_boundary(&mut self, kind: FieldKind) {
        let dims = self.dims();
        let (w, h) = (dims.width(), dims.height());

        let x_dir = if kind == FieldKind::Horizontal { -1.0 } else { 1.0 };
        for j in 1..h + 1 {
            self[[0, j]] = self[[1, j]] * x_dir;
            self[[w + 1, j]] = self[[w, j]] * x_dir;
        }

        let y_dir = if kind == FieldKind::Vertical { -1.0 } else { 1.0 };
        for i in 1..w + 1 {
            self[[i, 0]] = self[[i, 1]] * y_dir;
            self[[i, h + 1]] = self[[i, h]] * y_dir;
        }

        self[[0, 0]] = 0.5 * (self[[1, 0]] + self[[0, 1]]);
        self[[w + 1, 0]] = 0.5 * (self[[w, 0]] + self[[w + 1, 1]]);
        self[[0, h + 1]] = 0.5 * (self[[1, h + 1]] + self[[0, h]]);
        self[[w + 1, h + 1]] = 0.5 * (self[[w, h + 1]] + self[[w + 1, h]]);
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::{Dims, FieldKind, Grid};

    fn ramp(w: usize, h: usize) -> Grid<f64> {
        let mut grid = Grid::<f64>::new(Dims::new(w, h));
        for j in 1..h + 1 {
            for i in 1..w + 1 {
                grid[[i, j]] = (i * 10 + j) as f64;
            }
        }
        grid
    }

    #[test]
    fn test_horizontal_negated_on_side_walls() {
        let (w, h) = (5, 4);
        let mut grid = ramp(w, h);
        grid.set_boundary(FieldKind::Horizontal);
        for j in 1..h + 1 {
            assert_eq!(grid[[0, j]], -grid[[1, j]]);
            assert_eq!(grid[[w + 1, j]], -grid[[w, j]]);
        }
        for i in 1..w + 1 {
            assert_eq!(grid[[i, 0]], grid[[i, 1]]);
            assert_eq!(grid[[i, h + 1]], grid[[i, h]]);
        }
    }

    #[test]
    fn test_vertical_negated_on_floor_and_ceiling() {
        let (w, h) = (3, 6);
        let mut grid = ramp(w, h);
        grid.set_boundary(FieldKind::Vertical);
        for i in 1..w + 1 {
            assert_eq!(grid[[i, 0]], -grid[[i, 1]]);
            assert_eq!(grid[[i, h + 1]], -grid[[i, h]]);
        }
        for j in 1..h + 1 {
            assert_eq!(grid[[0, j]], grid[[1, j]]);
            assert_eq!(grid[[w + 1, j]], grid[[w, j]]);
        }
    }

    #[test]
    fn test_scalar_copies_and_corners_average() {
        let (w, h) = (4, 4);
        let mut grid = ramp(w, h);
        grid.set_boundary(FieldKind::Scalar);
        for j in 1..h + 1 {
            assert_eq!(grid[[0, j]], grid[[1, j]]);
            assert_eq!(grid[[w + 1, j]], grid[[w, j]]);
        }
        assert_eq!(grid[[0, 0]], 0.5 * (grid[[1, 0]] + grid[[0, 1]]));
        assert_eq!(grid[[w + 1, h + 1]], 0.5 * (grid[[w, h + 1]] + grid[[w + 1, h]]));
        // (1,1) = 11 on both edges next to the corner.
        assert_eq!(grid[[0, 0]], 11.0);
    }
}
