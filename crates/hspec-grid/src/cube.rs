use crate::{Error, Result};

/// A 3D sample cube in raster order, indexed `[band][row][col]`.
///
/// Values are stored as `i64`, wide
/// enough to hold both non-negative pixel values and the signed residuals
/// derived from them (see the `column_oriented` ×4 factor and the
/// `narrow_neighbor` ×2 factor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cube {
    bands: usize,
    rows: usize,
    cols: usize,
    buf: Vec<i64>,
}

/// Residuals share the same shape and storage as a [`Cube`]; for `inter_band`
/// the leading (band) dimension is `B-1` rather than `B`.
pub type ResidualCube = Cube;

impl Cube {
    /// Construct a cube backed by `buf`, which must have exactly
    /// `bands * rows * cols` elements.
    ///
    /// `rows` and `cols` must be nonzero. `bands == 0` is permitted: it is
    /// the shape of an `inter_band` residual cube derived from a single-band
    /// input.
    pub fn from_vec(bands: usize, rows: usize, cols: usize, buf: Vec<i64>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::ZeroExtent { bands, rows, cols });
        }
        if buf.len() != bands * rows * cols {
            return Err(Error::BufferLenMismatch {
                bands,
                rows,
                cols,
                len: buf.len(),
            });
        }
        Ok(Self {
            bands,
            rows,
            cols,
            buf,
        })
    }

    /// Construct a cube of the given shape, filled with zeros.
    pub fn zeros(bands: usize, rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::ZeroExtent { bands, rows, cols });
        }
        Ok(Self {
            bands,
            rows,
            cols,
            buf: vec![0; bands * rows * cols],
        })
    }

    #[inline]
    pub fn bands(&self) -> usize {
        self.bands
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.bands, self.rows, self.cols)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    fn index(&self, b: usize, r: usize, c: usize) -> usize {
        (b * self.rows + r) * self.cols + c
    }

    #[inline]
    pub fn get(&self, b: usize, r: usize, c: usize) -> i64 {
        self.buf[self.index(b, r, c)]
    }

    #[inline]
    pub fn set(&mut self, b: usize, r: usize, c: usize, value: i64) {
        let idx = self.index(b, r, c);
        self.buf[idx] = value;
    }

    /// Band `b` as a row-major `rows * cols` slice.
    pub fn band(&self, b: usize) -> &[i64] {
        let start = b * self.rows * self.cols;
        &self.buf[start..start + self.rows * self.cols]
    }

    /// Row `r` of band `b`.
    pub fn row(&self, b: usize, r: usize) -> &[i64] {
        let start = self.index(b, r, 0);
        &self.buf[start..start + self.cols]
    }

    #[inline]
    pub fn as_slice(&self) -> &[i64] {
        &self.buf
    }

    #[inline]
    pub fn into_vec(self) -> Vec<i64> {
        self.buf
    }

    pub fn iter_flat(&self) -> impl Iterator<Item = i64> + '_ {
        self.buf.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_extent_rejected() {
        assert!(matches!(
            Cube::zeros(3, 0, 2),
            Err(Error::ZeroExtent { .. })
        ));
        assert!(matches!(
            Cube::zeros(3, 2, 0),
            Err(Error::ZeroExtent { .. })
        ));
    }

    #[test]
    fn zero_bands_allowed() {
        let cube = Cube::zeros(0, 2, 2).unwrap();
        assert_eq!(cube.shape(), (0, 2, 2));
        assert!(cube.is_empty());
    }

    #[test]
    fn index_is_row_major_band_major() {
        let mut cube = Cube::zeros(2, 2, 2).unwrap();
        cube.set(1, 0, 1, 42);
        assert_eq!(cube.get(1, 0, 1), 42);
        assert_eq!(cube.as_slice()[1 * 4 + 0 * 2 + 1], 42);
    }

    #[test]
    fn buffer_len_mismatch_rejected() {
        assert!(matches!(
            Cube::from_vec(2, 2, 2, vec![0; 7]),
            Err(Error::BufferLenMismatch { .. })
        ));
    }
}
