use crate::{Error, Result};

/// A flat 2D buffer in row-major order, used to back the rectangular
/// variants of [`crate::SideData`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid2D {
    rows: usize,
    cols: usize,
    buf: Vec<i64>,
}

impl Grid2D {
    pub fn from_vec(rows: usize, cols: usize, buf: Vec<i64>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::ZeroExtent {
                bands: 0,
                rows,
                cols,
            });
        }
        if buf.len() != rows * cols {
            return Err(Error::BufferLenMismatch {
                bands: 0,
                rows,
                cols,
                len: buf.len(),
            });
        }
        Ok(Self { rows, cols, buf })
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::ZeroExtent {
                bands: 0,
                rows,
                cols,
            });
        }
        Ok(Self {
            rows,
            cols,
            buf: vec![0; rows * cols],
        })
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
    pub fn get(&self, r: usize, c: usize) -> i64 {
        self.buf[r * self.cols + c]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, value: i64) {
        let idx = r * self.cols + c;
        self.buf[idx] = value;
    }

    pub fn row(&self, r: usize) -> &[i64] {
        &self.buf[r * self.cols..(r + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_indexing() {
        let mut grid = Grid2D::zeros(2, 3).unwrap();
        grid.set(1, 2, 9);
        assert_eq!(grid.get(1, 2), 9);
        assert_eq!(grid.row(1), &[0, 0, 9]);
    }
}
