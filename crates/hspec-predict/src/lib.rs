//! Eight spatial/spectral predictors over a [`hspec_grid::Cube`], and their
//! matched reconstructors.

mod error;
mod predictor;
mod reconstruct;

pub use error::{Error, Result};
pub use predictor::{
    predict, predict_column_oriented, predict_first_pixel, predict_fixed_value,
    predict_inter_band, predict_median_edge_detector, predict_narrow_neighbor,
    predict_previous_pixel, predict_wide_neighbor, PredictionResult, Predictor,
};
pub use reconstruct::{
    reconstruct, reconstruct_column_oriented, reconstruct_first_pixel, reconstruct_fixed_value,
    reconstruct_inter_band, reconstruct_median_edge_detector, reconstruct_narrow_neighbor,
    reconstruct_previous_pixel, reconstruct_wide_neighbor,
};
