use hspec_grid::{Cube, Grid2D, SideData};

use crate::{Error, Result};

/// Identifies one of the eight spatial/spectral predictors. Carried
/// alongside a residual so the decoder knows which reconstructor to run.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predictor {
    PreviousPixel = 0,
    FirstPixel = 1,
    FixedValue = 2,
    MedianEdgeDetector = 3,
    WideNeighbor = 4,
    NarrowNeighbor = 5,
    ColumnOriented = 6,
    InterBand = 7,
}

impl Predictor {
    pub fn name(self) -> &'static str {
        match self {
            Self::PreviousPixel => "previous_pixel",
            Self::FirstPixel => "first_pixel",
            Self::FixedValue => "fixed_value",
            Self::MedianEdgeDetector => "median_edge_detector",
            Self::WideNeighbor => "wide_neighbor",
            Self::NarrowNeighbor => "narrow_neighbor",
            Self::ColumnOriented => "column_oriented",
            Self::InterBand => "inter_band",
        }
    }

    /// `inter_band` drops band 0 from its residual; every other predictor
    /// keeps the full band count.
    pub fn drops_first_band(self) -> bool {
        matches!(self, Self::InterBand)
    }
}

/// The output of a predictor: the predicted cube, the side data needed to
/// seed reconstruction, and a descriptor of which predictor produced it.
pub struct PredictionResult {
    pub predicted: Cube,
    pub side_data: SideData,
    pub predictor: Predictor,
    pub key_description: &'static str,
}

fn check_nonzero_extent(cube: &Cube) -> Result<()> {
    let (bands, rows, cols) = cube.shape();
    if bands == 0 || rows == 0 || cols == 0 {
        return Err(Error::ZeroExtent { bands, rows, cols });
    }
    Ok(())
}

/// Called whenever a stencil's neighbor set is empty and the edge policy
/// falls back to the identity rule (`P = I`).
fn log_identity_fallback(predictor: Predictor, b: usize, r: usize, c: usize) {
    tracing::debug!(predictor = predictor.name(), b, r, c, "empty neighbor set, falling back to identity");
}

/// Floor-mean (integer truncation toward zero) of a nonempty neighbor set.
fn floor_mean(values: &[i64]) -> i64 {
    let sum: i64 = values.iter().sum();
    sum / values.len() as i64
}

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

/// Dispatch to the predictor named by `predictor`. `fixed_value_override`
/// is only consulted by [`Predictor::FixedValue`].
pub fn predict(
    cube: &Cube,
    predictor: Predictor,
    fixed_value_override: Option<&[i64]>,
) -> Result<PredictionResult> {
    check_nonzero_extent(cube)?;
    match predictor {
        Predictor::PreviousPixel => predict_previous_pixel(cube),
        Predictor::FirstPixel => predict_first_pixel(cube),
        Predictor::FixedValue => predict_fixed_value(cube, fixed_value_override),
        Predictor::MedianEdgeDetector => predict_median_edge_detector(cube),
        Predictor::WideNeighbor => predict_wide_neighbor(cube),
        Predictor::NarrowNeighbor => predict_narrow_neighbor(cube),
        Predictor::ColumnOriented => predict_column_oriented(cube),
        Predictor::InterBand => predict_inter_band(cube),
    }
}

pub fn predict_previous_pixel(cube: &Cube) -> Result<PredictionResult> {
    let (bands, rows, cols) = cube.shape();
    let mut predicted = Cube::zeros(bands, rows, cols)?;
    let mut side_data = Grid2D::zeros(bands, rows)?;

    for b in 0..bands {
        for r in 0..rows {
            side_data.set(b, r, cube.get(b, r, 0));
            for c in 1..cols {
                predicted.set(b, r, c, cube.get(b, r, c - 1));
            }
        }
    }

    Ok(PredictionResult {
        predicted,
        side_data: SideData::PerBandRow(side_data),
        predictor: Predictor::PreviousPixel,
        key_description: "First column of each band",
    })
}

pub fn predict_first_pixel(cube: &Cube) -> Result<PredictionResult> {
    let (bands, rows, cols) = cube.shape();
    let mut predicted = Cube::zeros(bands, rows, cols)?;
    let mut side_data = vec![0i64; bands];

    for b in 0..bands {
        let seed = cube.get(b, 0, 0);
        side_data[b] = seed;
        for r in 0..rows {
            for c in 0..cols {
                predicted.set(b, r, c, seed);
            }
        }
    }

    Ok(PredictionResult {
        predicted,
        side_data: SideData::PerBand(side_data),
        predictor: Predictor::FirstPixel,
        key_description: "First pixel of each band",
    })
}

pub fn predict_fixed_value(cube: &Cube, override_values: Option<&[i64]>) -> Result<PredictionResult> {
    let (bands, rows, cols) = cube.shape();
    if let Some(values) = override_values {
        if values.len() != bands {
            return Err(Error::SideDataMismatch);
        }
    }

    let mut predicted = Cube::zeros(bands, rows, cols)?;
    let mut side_data = vec![0i64; bands];

    for b in 0..bands {
        let k = match override_values {
            Some(values) => values[b],
            None => floor_mean(cube.band(b)),
        };
        side_data[b] = k;
        for r in 0..rows {
            for c in 0..cols {
                predicted.set(b, r, c, k);
            }
        }
    }

    Ok(PredictionResult {
        predicted,
        side_data: SideData::PerBand(side_data),
        predictor: Predictor::FixedValue,
        key_description: "Fixed value for each band",
    })
}

pub fn predict_median_edge_detector(cube: &Cube) -> Result<PredictionResult> {
    let (bands, rows, cols) = cube.shape();
    let mut predicted = Cube::zeros(bands, rows, cols)?;
    let mut side_data = vec![0i64; bands];

    for b in 0..bands {
        let seed = cube.get(b, 0, 0);
        side_data[b] = seed;
        predicted.set(b, 0, 0, seed);

        for r in 0..rows {
            for c in 0..cols {
                if r == 0 && c == 0 {
                    continue;
                }
                let mut neighbors = Vec::with_capacity(3);
                if r > 0 {
                    neighbors.push(cube.get(b, r - 1, c));
                }
                if c > 0 {
                    neighbors.push(cube.get(b, r, c - 1));
                }
                if r > 0 && c > 0 {
                    neighbors.push(cube.get(b, r - 1, c - 1));
                }
                let value = if neighbors.is_empty() {
                    log_identity_fallback(Predictor::MedianEdgeDetector, b, r, c);
                    cube.get(b, r, c)
                } else {
                    median(&neighbors)
                };
                predicted.set(b, r, c, value);
            }
        }
    }

    Ok(PredictionResult {
        predicted,
        side_data: SideData::PerBand(side_data),
        predictor: Predictor::MedianEdgeDetector,
        key_description: "First pixel of each band",
    })
}

pub fn predict_wide_neighbor(cube: &Cube) -> Result<PredictionResult> {
    let (bands, rows, cols) = cube.shape();
    let mut predicted = Cube::zeros(bands, rows, cols)?;
    let mut side_data = vec![0i64; bands];

    for b in 0..bands {
        let seed = cube.get(b, 0, 0);
        side_data[b] = seed;
        predicted.set(b, 0, 0, seed);

        for r in 0..rows {
            for c in 0..cols {
                let mut neighbors = Vec::with_capacity(4);
                if r > 0 {
                    neighbors.push(cube.get(b, r - 1, c));
                }
                if c > 0 {
                    neighbors.push(cube.get(b, r, c - 1));
                }
                if r > 0 && c > 0 {
                    neighbors.push(cube.get(b, r - 1, c - 1));
                }
                if r > 0 && c < cols - 1 {
                    neighbors.push(cube.get(b, r - 1, c + 1));
                }
                let value = if neighbors.is_empty() {
                    log_identity_fallback(Predictor::WideNeighbor, b, r, c);
                    cube.get(b, r, c)
                } else {
                    floor_mean(&neighbors)
                };
                predicted.set(b, r, c, value);
            }
        }
    }

    Ok(PredictionResult {
        predicted,
        side_data: SideData::PerBand(side_data),
        predictor: Predictor::WideNeighbor,
        key_description: "First pixel of each band",
    })
}

pub fn predict_narrow_neighbor(cube: &Cube) -> Result<PredictionResult> {
    let (bands, rows, cols) = cube.shape();
    let mut predicted = Cube::zeros(bands, rows, cols)?;
    let mut side_data = Grid2D::zeros(bands, cols)?;

    for b in 0..bands {
        tracing::trace!(b, "narrow_neighbor: starting band");
        for c in 0..cols {
            side_data.set(b, c, cube.get(b, 0, c));
        }
        for r in 0..rows {
            for c in 0..cols {
                let mut neighbors = Vec::with_capacity(3);
                if r > 0 {
                    neighbors.push(2 * cube.get(b, r - 1, c));
                    if c > 0 {
                        neighbors.push(cube.get(b, r - 1, c - 1));
                    }
                }
                if r > 0 && c < cols - 1 {
                    neighbors.push(cube.get(b, r - 1, c + 1));
                }
                let value = if neighbors.is_empty() {
                    log_identity_fallback(Predictor::NarrowNeighbor, b, r, c);
                    cube.get(b, r, c)
                } else {
                    floor_mean(&neighbors)
                };
                predicted.set(b, r, c, value);
            }
        }
    }

    Ok(PredictionResult {
        predicted,
        side_data: SideData::PerBandCol(side_data),
        predictor: Predictor::NarrowNeighbor,
        key_description: "Top row of each band",
    })
}

/// `P[b,r,c] = 4 * I[b,r-1,c]` for `r >= 1`; row 0 is seeded from SideData,
/// mirroring `previous_pixel`'s column-0 treatment (predicted stays 0,
/// residual carries the original value).
pub fn predict_column_oriented(cube: &Cube) -> Result<PredictionResult> {
    let (bands, rows, cols) = cube.shape();
    let mut predicted = Cube::zeros(bands, rows, cols)?;
    let mut side_data = Grid2D::zeros(bands, cols)?;

    for b in 0..bands {
        for c in 0..cols {
            side_data.set(b, c, cube.get(b, 0, c));
        }
        for r in 1..rows {
            for c in 0..cols {
                predicted.set(b, r, c, 4 * cube.get(b, r - 1, c));
            }
        }
    }

    Ok(PredictionResult {
        predicted,
        side_data: SideData::PerBandCol(side_data),
        predictor: Predictor::ColumnOriented,
        key_description: "Top row of each band",
    })
}

pub fn predict_inter_band(cube: &Cube) -> Result<PredictionResult> {
    let (bands, rows, cols) = cube.shape();
    let mut predicted = Cube::zeros(bands, rows, cols)?;
    let mut side_data = Grid2D::zeros(rows, cols)?;

    for r in 0..rows {
        for c in 0..cols {
            let v = cube.get(0, r, c);
            side_data.set(r, c, v);
            predicted.set(0, r, c, v);
        }
    }
    for b in 1..bands {
        for r in 0..rows {
            for c in 0..cols {
                predicted.set(b, r, c, cube.get(b - 1, r, c));
            }
        }
    }

    Ok(PredictionResult {
        predicted,
        side_data: SideData::Plane(side_data),
        predictor: Predictor::InterBand,
        key_description: "First band",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_cube() -> Cube {
        Cube::from_vec(
            3,
            2,
            2,
            vec![10, 12, 14, 11, 20, 21, 22, 23, 30, 29, 28, 27],
        )
        .unwrap()
    }

    #[test]
    fn previous_pixel_matches_worked_scenario() {
        let cube = scenario_cube();
        let result = predict_previous_pixel(&cube).unwrap();
        let residual = hspec_grid::residual(&cube, &result.predicted, false).unwrap();
        assert_eq!(
            residual.as_slice(),
            &[10, 2, 14, -3, 20, 1, 22, 1, 30, -1, 28, -1]
        );
    }

    #[test]
    fn first_pixel_matches_worked_scenario() {
        let cube = scenario_cube();
        let result = predict_first_pixel(&cube).unwrap();
        assert_eq!(result.side_data.as_per_band().unwrap(), &[10, 20, 30]);
        let residual = hspec_grid::residual(&cube, &result.predicted, false).unwrap();
        assert_eq!(
            residual.as_slice(),
            &[0, 2, 4, 1, 0, 1, 2, 3, 0, -1, -2, -3]
        );
    }

    #[test]
    fn inter_band_matches_worked_scenario() {
        let cube = scenario_cube();
        let result = predict_inter_band(&cube).unwrap();
        assert_eq!(result.side_data.as_plane().unwrap().as_slice(), &[10, 12, 14, 11]);
        let residual = hspec_grid::residual(&cube, &result.predicted, true).unwrap();
        assert_eq!(residual.shape(), (2, 2, 2));
        assert_eq!(residual.as_slice(), &[10, 9, 8, 12, 10, 8, 6, 4]);
    }

    #[test]
    fn column_oriented_matches_worked_scenario() {
        let cube = Cube::from_vec(1, 2, 2, vec![1, 2, 40, 80]).unwrap();
        let result = predict_column_oriented(&cube).unwrap();
        assert_eq!(result.predicted.get(0, 1, 0), 4);
        assert_eq!(result.predicted.get(0, 1, 1), 8);
        let residual = hspec_grid::residual(&cube, &result.predicted, false).unwrap();
        assert_eq!(residual.get(0, 1, 0), 36);
        assert_eq!(residual.get(0, 1, 1), 72);
    }

    #[test]
    fn zero_bands_is_rejected() {
        let cube = Cube::zeros(0, 2, 2).unwrap();
        assert!(matches!(
            predict(&cube, Predictor::PreviousPixel, None),
            Err(Error::ZeroExtent { bands: 0, .. })
        ));
    }
}
