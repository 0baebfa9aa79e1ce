use crate::Grid2D;

/// The per-predictor seed data a reconstructor needs that cannot be derived
/// from the residual stream alone. Shape varies by predictor; see each
/// `predict_*`/`reconstruct_*` pair in `hspec-predict`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideData {
    /// `(B, R)`: first column of every band. Used by `previous_pixel`.
    PerBandRow(Grid2D),
    /// `(B,)`: one scalar per band. Used by `first_pixel`, `fixed_value`,
    /// `median_edge_detector`, and `wide_neighbor`.
    PerBand(Vec<i64>),
    /// `(B, C)`: first row of every band. Used by `narrow_neighbor` and
    /// `column_oriented`.
    PerBandCol(Grid2D),
    /// `(R, C)`: the whole of band 0. Used by `inter_band`.
    Plane(Grid2D),
}

impl SideData {
    pub fn as_per_band_row(&self) -> Option<&Grid2D> {
        match self {
            Self::PerBandRow(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_per_band(&self) -> Option<&[i64]> {
        match self {
            Self::PerBand(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_per_band_col(&self) -> Option<&Grid2D> {
        match self {
            Self::PerBandCol(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_plane(&self) -> Option<&Grid2D> {
        match self {
            Self::Plane(g) => Some(g),
            _ => None,
        }
    }
}
