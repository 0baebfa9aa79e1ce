//! This crate provides [`Cube`] and [`Grid2D`], the raster-order storage
//! used throughout the pipeline, along with [`SideData`] and the
//! [`residual`] computation.

mod cube;
mod error;
mod grid2d;
mod residual;
mod side_data;

pub use cube::{Cube, ResidualCube};
pub use error::{Error, Result};
pub use grid2d::Grid2D;
pub use residual::residual;
pub use side_data::SideData;
