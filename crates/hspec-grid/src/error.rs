/// Errors raised while constructing or indexing a [`crate::Cube`] or
/// [`crate::Grid2D`].
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A cube or grid was constructed with a zero row or column extent.
    ZeroExtent { bands: usize, rows: usize, cols: usize },
    /// A flat buffer did not match the declared `(bands, rows, cols)` shape.
    BufferLenMismatch {
        bands: usize,
        rows: usize,
        cols: usize,
        len: usize,
    },
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroExtent { bands, rows, cols } => write!(
                f,
                "cube has a zero extent: bands={bands}, rows={rows}, cols={cols}"
            ),
            Self::BufferLenMismatch {
                bands,
                rows,
                cols,
                len,
            } => write!(
                f,
                "buffer of length {len} does not match shape ({bands}, {rows}, {cols})"
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
