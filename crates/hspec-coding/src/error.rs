/// Errors raised by the Huffman codec and run-length coder.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// `build_dict` was called on an empty symbol stream.
    EmptyInput,
    /// The bitstring was exhausted with an accumulated code that matches no
    /// entry in the dictionary.
    UnterminatedCode { bit_offset: usize },
    /// RLE-mode decoding ran out of bits before producing `num_values`
    /// value/count pairs.
    TruncatedRle { decoded: usize, expected: usize },
    /// A decoded symbol stream's length did not match the expected cube
    /// shape.
    LengthMismatch { expected: usize, got: usize },
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "cannot build a Huffman dictionary over zero symbols"),
            Self::UnterminatedCode { bit_offset } => write!(
                f,
                "bitstring ended at bit {bit_offset} without matching a dictionary code"
            ),
            Self::TruncatedRle { decoded, expected } => write!(
                f,
                "RLE stream exhausted after {decoded} of {expected} expected symbols"
            ),
            Self::LengthMismatch { expected, got } => write!(
                f,
                "decoded length {got} does not match expected length {expected}"
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
