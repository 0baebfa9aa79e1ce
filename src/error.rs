/// The four error kinds a pipeline run can fail with. Every leaf crate's
/// own error type is folded into one of these via `From`.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A cube or residual has a zero extent, or a decoded/residual shape
    /// disagrees with what the predictor or cube declares.
    Shape(String),
    /// A pipeline stage ran before its prerequisite (e.g. a codec
    /// invocation over data that was never produced).
    State(String),
    /// A bitstring did not terminate cleanly at a dictionary code boundary.
    Codec(hspec_coding::Error),
    /// Reconstruction was requested for a predictor tag with no registered
    /// reconstructor.
    UnknownPredictor(u8),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Codec(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shape(msg) => write!(f, "shape error: {msg}"),
            Self::State(msg) => write!(f, "state error: {msg}"),
            Self::Codec(err) => write!(f, "codec error: {err}"),
            Self::UnknownPredictor(tag) => write!(f, "no reconstructor registered for predictor tag {tag}"),
        }
    }
}

impl From<hspec_grid::Error> for Error {
    fn from(err: hspec_grid::Error) -> Self {
        Self::Shape(err.to_string())
    }
}

impl From<hspec_predict::Error> for Error {
    fn from(err: hspec_predict::Error) -> Self {
        Self::Shape(err.to_string())
    }
}

impl From<hspec_coding::Error> for Error {
    fn from(err: hspec_coding::Error) -> Self {
        match err {
            hspec_coding::Error::EmptyInput => {
                Self::State("Huffman dictionary requested over an empty symbol stream".into())
            }
            hspec_coding::Error::LengthMismatch { expected, got } => Self::Shape(format!(
                "decoded length {got} does not match expected length {expected}"
            )),
            other => Self::Codec(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
