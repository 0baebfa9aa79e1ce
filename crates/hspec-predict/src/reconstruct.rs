use hspec_grid::{Cube, ResidualCube, SideData};

use crate::predictor::Predictor;
use crate::{Error, Result};

fn median(values: &[i64]) -> i64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2
    }
}

fn floor_mean(values: &[i64]) -> i64 {
    let sum: i64 = values.iter().sum();
    sum / values.len() as i64
}

/// Check a `(B, R)`-shaped side grid (`previous_pixel`) against the
/// residual's declared `bands`/`rows`. The third component of `expected`/
/// `got` is unused for 2D side data and always reported as `0`.
fn check_per_band_row(side: &hspec_grid::Grid2D, bands: usize, rows: usize) -> Result<()> {
    if side.rows() != bands || side.cols() != rows {
        return Err(Error::ShapeMismatch {
            expected: (bands, rows, 0),
            got: (side.rows(), side.cols(), 0),
        });
    }
    Ok(())
}

/// Check a `(B,)`-shaped side vector (`first_pixel`, `fixed_value`,
/// `median_edge_detector`, `wide_neighbor`) against `bands`.
fn check_per_band(side: &[i64], bands: usize) -> Result<()> {
    if side.len() != bands {
        return Err(Error::ShapeMismatch {
            expected: (bands, 0, 0),
            got: (side.len(), 0, 0),
        });
    }
    Ok(())
}

/// Check a `(B, C)`-shaped side grid (`narrow_neighbor`, `column_oriented`)
/// against the residual's declared `bands`/`cols`.
fn check_per_band_col(side: &hspec_grid::Grid2D, bands: usize, cols: usize) -> Result<()> {
    if side.rows() != bands || side.cols() != cols {
        return Err(Error::ShapeMismatch {
            expected: (bands, cols, 0),
            got: (side.rows(), side.cols(), 0),
        });
    }
    Ok(())
}

/// Check an `(R, C)`-shaped side plane (`inter_band`) against the
/// reconstructed cube's `rows`/`cols`.
fn check_plane(side: &hspec_grid::Grid2D, rows: usize, cols: usize) -> Result<()> {
    if side.rows() != rows || side.cols() != cols {
        return Err(Error::ShapeMismatch {
            expected: (rows, cols, 0),
            got: (side.rows(), side.cols(), 0),
        });
    }
    Ok(())
}

/// Invert `predictor` over `residual` and `side_data`, rebuilding the
/// original cube. Visits cells in the same order the matching predictor
/// used, so every predictor input is already reconstructed by the time it's
/// read.
pub fn reconstruct(predictor: Predictor, residual: &ResidualCube, side_data: &SideData) -> Result<Cube> {
    match predictor {
        Predictor::PreviousPixel => reconstruct_previous_pixel(residual, side_data),
        Predictor::FirstPixel => reconstruct_first_pixel(residual, side_data),
        Predictor::FixedValue => reconstruct_fixed_value(residual, side_data),
        Predictor::MedianEdgeDetector => reconstruct_median_edge_detector(residual, side_data),
        Predictor::WideNeighbor => reconstruct_wide_neighbor(residual, side_data),
        Predictor::NarrowNeighbor => reconstruct_narrow_neighbor(residual, side_data),
        Predictor::ColumnOriented => reconstruct_column_oriented(residual, side_data),
        Predictor::InterBand => reconstruct_inter_band(residual, side_data),
    }
}

pub fn reconstruct_previous_pixel(residual: &ResidualCube, side_data: &SideData) -> Result<Cube> {
    let (bands, rows, cols) = residual.shape();
    let side = side_data.as_per_band_row().ok_or(Error::SideDataMismatch)?;
    check_per_band_row(side, bands, rows)?;
    let mut original = Cube::zeros(bands, rows, cols)?;

    for b in 0..bands {
        for r in 0..rows {
            original.set(b, r, 0, side.get(b, r));
            for c in 1..cols {
                let prev = original.get(b, r, c - 1);
                original.set(b, r, c, residual.get(b, r, c) + prev);
            }
        }
    }
    Ok(original)
}

pub fn reconstruct_first_pixel(residual: &ResidualCube, side_data: &SideData) -> Result<Cube> {
    let (bands, rows, cols) = residual.shape();
    let side = side_data.as_per_band().ok_or(Error::SideDataMismatch)?;
    check_per_band(side, bands)?;
    let mut original = Cube::zeros(bands, rows, cols)?;

    for b in 0..bands {
        for r in 0..rows {
            for c in 0..cols {
                original.set(b, r, c, residual.get(b, r, c) + side[b]);
            }
        }
    }
    Ok(original)
}

pub fn reconstruct_fixed_value(residual: &ResidualCube, side_data: &SideData) -> Result<Cube> {
    // Identical shape of computation to first_pixel: add the per-band
    // scalar back to every residual.
    reconstruct_first_pixel(residual, side_data)
}

pub fn reconstruct_median_edge_detector(residual: &ResidualCube, side_data: &SideData) -> Result<Cube> {
    let (bands, rows, cols) = residual.shape();
    let side = side_data.as_per_band().ok_or(Error::SideDataMismatch)?;
    check_per_band(side, bands)?;
    let mut original = Cube::zeros(bands, rows, cols)?;

    for b in 0..bands {
        original.set(b, 0, 0, side[b]);
        for r in 0..rows {
            for c in 0..cols {
                if r == 0 && c == 0 {
                    continue;
                }
                let mut neighbors = Vec::with_capacity(3);
                if r > 0 {
                    neighbors.push(original.get(b, r - 1, c));
                }
                if c > 0 {
                    neighbors.push(original.get(b, r, c - 1));
                }
                if r > 0 && c > 0 {
                    neighbors.push(original.get(b, r - 1, c - 1));
                }
                let predicted = if neighbors.is_empty() {
                    0
                } else {
                    median(&neighbors)
                };
                original.set(b, r, c, residual.get(b, r, c) + predicted);
            }
        }
    }
    Ok(original)
}

pub fn reconstruct_wide_neighbor(residual: &ResidualCube, side_data: &SideData) -> Result<Cube> {
    let (bands, rows, cols) = residual.shape();
    let side = side_data.as_per_band().ok_or(Error::SideDataMismatch)?;
    check_per_band(side, bands)?;
    let mut original = Cube::zeros(bands, rows, cols)?;

    for b in 0..bands {
        original.set(b, 0, 0, side[b]);
        for r in 0..rows {
            for c in 0..cols {
                if r == 0 && c == 0 {
                    continue;
                }
                let mut neighbors = Vec::with_capacity(4);
                if r > 0 {
                    neighbors.push(original.get(b, r - 1, c));
                }
                if c > 0 {
                    neighbors.push(original.get(b, r, c - 1));
                }
                if r > 0 && c > 0 {
                    neighbors.push(original.get(b, r - 1, c - 1));
                }
                if r > 0 && c < cols - 1 {
                    neighbors.push(original.get(b, r - 1, c + 1));
                }
                let predicted = if neighbors.is_empty() {
                    0
                } else {
                    floor_mean(&neighbors)
                };
                original.set(b, r, c, residual.get(b, r, c) + predicted);
            }
        }
    }
    Ok(original)
}

pub fn reconstruct_narrow_neighbor(residual: &ResidualCube, side_data: &SideData) -> Result<Cube> {
    let (bands, rows, cols) = residual.shape();
    let side = side_data.as_per_band_col().ok_or(Error::SideDataMismatch)?;
    check_per_band_col(side, bands, cols)?;
    let mut original = Cube::zeros(bands, rows, cols)?;

    for b in 0..bands {
        for c in 0..cols {
            original.set(b, 0, c, side.get(b, c));
        }
        for r in 1..rows {
            for c in 0..cols {
                let mut neighbors = Vec::with_capacity(3);
                neighbors.push(2 * original.get(b, r - 1, c));
                if c > 0 {
                    neighbors.push(original.get(b, r - 1, c - 1));
                }
                if c < cols - 1 {
                    neighbors.push(original.get(b, r - 1, c + 1));
                }
                let predicted = floor_mean(&neighbors);
                original.set(b, r, c, residual.get(b, r, c) + predicted);
            }
        }
    }
    Ok(original)
}

pub fn reconstruct_column_oriented(residual: &ResidualCube, side_data: &SideData) -> Result<Cube> {
    let (bands, rows, cols) = residual.shape();
    let side = side_data.as_per_band_col().ok_or(Error::SideDataMismatch)?;
    check_per_band_col(side, bands, cols)?;
    let mut original = Cube::zeros(bands, rows, cols)?;

    for b in 0..bands {
        for c in 0..cols {
            original.set(b, 0, c, side.get(b, c));
        }
        for r in 1..rows {
            for c in 0..cols {
                let predicted = 4 * original.get(b, r - 1, c);
                original.set(b, r, c, residual.get(b, r, c) + predicted);
            }
        }
    }
    Ok(original)
}

pub fn reconstruct_inter_band(residual: &ResidualCube, side_data: &SideData) -> Result<Cube> {
    let (residual_bands, rows, cols) = residual.shape();
    let bands = residual_bands + 1;
    let side = side_data.as_plane().ok_or(Error::SideDataMismatch)?;
    check_plane(side, rows, cols)?;
    let mut original = Cube::zeros(bands, rows, cols)?;

    for r in 0..rows {
        for c in 0..cols {
            original.set(0, r, c, side.get(r, c));
        }
    }
    for b in 1..bands {
        for r in 0..rows {
            for c in 0..cols {
                let prev = original.get(b - 1, r, c);
                original.set(b, r, c, residual.get(b - 1, r, c) + prev);
            }
        }
    }
    Ok(original)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::{predict_column_oriented, predict_inter_band};
    use hspec_grid::Cube;

    #[test]
    fn previous_pixel_roundtrips_the_worked_scenario() {
        let cube = Cube::from_vec(
            3,
            2,
            2,
            vec![10, 12, 14, 11, 20, 21, 22, 23, 30, 29, 28, 27],
        )
        .unwrap();
        let result = crate::predictor::predict_previous_pixel(&cube).unwrap();
        let residual = hspec_grid::residual(&cube, &result.predicted, false).unwrap();
        let recon = reconstruct_previous_pixel(&residual, &result.side_data).unwrap();
        assert_eq!(recon, cube);
    }

    #[test]
    fn column_oriented_roundtrips() {
        let cube = Cube::from_vec(1, 2, 2, vec![1, 2, 40, 80]).unwrap();
        let result = predict_column_oriented(&cube).unwrap();
        let residual = hspec_grid::residual(&cube, &result.predicted, false).unwrap();
        let recon = reconstruct_column_oriented(&residual, &result.side_data).unwrap();
        assert_eq!(recon, cube);
    }

    #[test]
    fn inter_band_roundtrips() {
        let cube = Cube::from_vec(
            3,
            2,
            2,
            vec![10, 12, 14, 11, 20, 21, 22, 23, 30, 29, 28, 27],
        )
        .unwrap();
        let result = predict_inter_band(&cube).unwrap();
        let residual = hspec_grid::residual(&cube, &result.predicted, true).unwrap();
        let recon = reconstruct_inter_band(&residual, &result.side_data).unwrap();
        assert_eq!(recon, cube);
    }

    #[test]
    fn single_band_inter_band_recovers_from_side_data_alone() {
        let cube = Cube::from_vec(1, 2, 2, vec![5, 6, 7, 8]).unwrap();
        let result = predict_inter_band(&cube).unwrap();
        let residual = hspec_grid::residual(&cube, &result.predicted, true).unwrap();
        assert!(residual.is_empty());
        let recon = reconstruct_inter_band(&residual, &result.side_data).unwrap();
        assert_eq!(recon, cube);
    }

    #[test]
    fn previous_pixel_rejects_undersized_side_data() {
        let residual = ResidualCube::zeros(2, 3, 4).unwrap();
        let side = SideData::PerBandRow(hspec_grid::Grid2D::zeros(2, 2).unwrap());
        assert!(matches!(
            reconstruct_previous_pixel(&residual, &side),
            Err(Error::ShapeMismatch {
                expected: (2, 3, 0),
                got: (2, 2, 0),
            })
        ));
    }

    #[test]
    fn inter_band_rejects_side_data_with_wrong_plane_shape() {
        let residual = ResidualCube::zeros(1, 2, 2).unwrap();
        let side = SideData::Plane(hspec_grid::Grid2D::zeros(3, 3).unwrap());
        assert!(matches!(
            reconstruct_inter_band(&residual, &side),
            Err(Error::ShapeMismatch {
                expected: (2, 2, 0),
                got: (3, 3, 0),
            })
        ));
    }
}
