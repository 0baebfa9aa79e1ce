/// Errors raised by the predictors and reconstructors.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The cube has a zero band, row, or column extent.
    ZeroExtent { bands: usize, rows: usize, cols: usize },
    /// `SideData`'s dimensions disagree with what the residual's shape
    /// implies for the named predictor. The third tuple component is unused
    /// and reported as `0` for predictors whose side data is 2D.
    ShapeMismatch {
        expected: (usize, usize, usize),
        got: (usize, usize, usize),
    },
    /// `SideData` carries the wrong shape variant for the named predictor.
    SideDataMismatch,
    Grid(hspec_grid::Error),
}

impl From<hspec_grid::Error> for Error {
    fn from(err: hspec_grid::Error) -> Self {
        Self::Grid(err)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroExtent { bands, rows, cols } => write!(
                f,
                "predictor rejected cube with zero extent: bands={bands}, rows={rows}, cols={cols}"
            ),
            Self::ShapeMismatch { expected, got } => write!(
                f,
                "side data shape {got:?} does not match the shape {expected:?} implied by the residual"
            ),
            Self::SideDataMismatch => write!(f, "side data does not match the predictor's shape"),
            Self::Grid(err) => write!(f, "{err}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
