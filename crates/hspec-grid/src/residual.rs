use crate::{Cube, Error, ResidualCube, Result};

/// `residual = original - predicted`, in `i64` arithmetic.
///
/// When `drop_first_band` is set (the `inter_band` predictor), band 0 is
/// excluded from both operands before subtracting, and the returned cube's
/// leading dimension is `B - 1`.
pub fn residual(original: &Cube, predicted: &Cube, drop_first_band: bool) -> Result<ResidualCube> {
    if original.shape() != predicted.shape() {
        return Err(Error::BufferLenMismatch {
            bands: predicted.bands(),
            rows: predicted.rows(),
            cols: predicted.cols(),
            len: original.len(),
        });
    }

    let (bands, rows, cols) = original.shape();
    if !drop_first_band {
        let buf: Vec<i64> = original
            .iter_flat()
            .zip(predicted.iter_flat())
            .map(|(o, p)| o - p)
            .collect();
        return Cube::from_vec(bands, rows, cols, buf);
    }

    let plane = rows * cols;
    let buf: Vec<i64> = original.as_slice()[plane..]
        .iter()
        .zip(predicted.as_slice()[plane..].iter())
        .map(|(o, p)| o - p)
        .collect();
    Cube::from_vec(bands.saturating_sub(1), rows, cols, buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_residual_subtracts_elementwise() {
        let original = Cube::from_vec(1, 1, 2, vec![10, 4]).unwrap();
        let predicted = Cube::from_vec(1, 1, 2, vec![3, 4]).unwrap();
        let res = residual(&original, &predicted, false).unwrap();
        assert_eq!(res.as_slice(), &[7, 0]);
    }

    #[test]
    fn inter_band_drops_band_zero_and_shrinks_leading_dim() {
        let original = Cube::from_vec(2, 1, 2, vec![1, 2, 3, 4]).unwrap();
        let predicted = Cube::from_vec(2, 1, 2, vec![9, 9, 1, 2]).unwrap();
        let res = residual(&original, &predicted, true).unwrap();
        assert_eq!(res.shape(), (1, 1, 2));
        assert_eq!(res.as_slice(), &[2, 2]);
    }

    #[test]
    fn single_band_inter_band_yields_empty_residual() {
        let original = Cube::from_vec(1, 2, 2, vec![1, 2, 3, 4]).unwrap();
        let predicted = original.clone();
        let res = residual(&original, &predicted, true).unwrap();
        assert_eq!(res.shape(), (0, 2, 2));
        assert!(res.is_empty());
    }
}
