use std::ops::{Index, IndexMut};

/// Interior size of the simulated domain. Every field carries one extra
/// ring of ghost cells, so storage is `(width + 2) * (height + 2)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dims {
    width: usize,
    height: usize,
}

impl Dims {
    /// An empty grid is only caught by a debug assertion here. Release builds
    /// accept it and every index clamps into the ghost ring;
    /// `Config::validate` is where a zero size is rejected.
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0, "grid must not be empty");
        Self { width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.width + 2
    }

    pub fn len(&self) -> usize {
        (self.width + 2) * (self.height + 2)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat offset of cell `(i, j)`. Coordinates outside the padded grid are
    /// clamped onto its border, never wrapped.
    pub fn idx(&self, i: i64, j: i64) -> usize {
        let i = i.max(0).min(self.width as i64 + 1) as usize;
        let j = j.max(0).min(self.height as i64 + 1) as usize;
        i + j * self.stride()
    }

    /// Same as [`Dims::idx`] for unsigned coordinates.
    pub fn offset(&self, i: usize, j: usize) -> usize {
        i.min(self.width + 1) + j.min(self.height + 1) * self.stride()
    }

    /// Interior cells in sweep order (`j` outer, `i` inner).
    pub fn interior(&self) -> impl Iterator<Item = (usize, usize)> {
        let (w, h) = (self.width, self.height);
        (1..h + 1).flat_map(move |j| (1..w + 1).map(move |i| (i, j)))
    }
}

/// Which boundary sign convention a field follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,
    /// Horizontal velocity, negated on the left and right walls.
    Horizontal,
    /// Vertical velocity, negated on the top and bottom walls.
    Vertical,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    dims: Dims,
    pub(crate) data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(dims: Dims) -> Self {
        Grid {
            dims,
            data: vec![T::default(); dims.len()],
        }
    }

    pub fn fill(&mut self, value: T) {
        for x in self.data.iter_mut() {
            *x = value;
        }
    }
}

impl<T> Grid<T> {
    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<[usize; 2]> for Grid<T> {
    type Output = T;

    fn index(&self, i: [usize; 2]) -> &T {
        &self.data[self.dims.offset(i[0], i[1])]
    }
}

impl<T> IndexMut<[usize; 2]> for Grid<T> {
    fn index_mut(&mut self, i: [usize; 2]) -> &mut T {
        let k = self.dims.offset(i[0], i[1]);
        &mut self.data[k]
    }
}

impl Grid<f64> {
    /// `self += dt * source`, ghost cells included.
    pub fn add_source(&mut self, source: &Grid<f64>, dt: f64) {
        for (d, s) in self.data.iter_mut().zip(source.data.iter()) {
            *d += s * dt;
        }
    }

    /// Adds `amount` at a possibly out-of-range cell, clamped onto the grid.
    pub fn add_at(&mut self, i: i64, j: i64, amount: f64) {
        let k = self.dims.idx(i, j);
        self.data[k] += amount;
    }

    pub fn interior_sum(&self) -> f64 {
        self.dims.interior().map(|(i, j)| self[[i, j]]).sum()
    }
}
