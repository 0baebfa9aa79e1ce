use hspec_coding::{BitString, HuffmanDict};
use hspec_grid::{Cube, ResidualCube, SideData};
use hspec_predict::Predictor;

/// Every intermediate buffer a pipeline run produces, immutable once built.
pub struct Artifacts {
    pub predictor: Predictor,
    pub original: Cube,
    pub predicted: Cube,
    pub side_data: SideData,
    pub residual: ResidualCube,
    pub bits_direct: BitString,
    pub dict_direct: HuffmanDict,
    pub bits_rle: BitString,
    pub dict_rle_values: HuffmanDict,
    pub dict_rle_counts: HuffmanDict,
    pub num_values: u32,
    pub reconstructed: Cube,
}

/// Pixel values are documented as non-negative integers up to 32 bits wide;
/// that's the width the "uncompressed" baseline in a compression ratio is
/// measured against.
const ORIGINAL_BITS_PER_PIXEL: u64 = 32;

impl Artifacts {
    /// `original_bits / compressed_bits` for the direct-mode stream.
    pub fn compression_ratio(&self) -> f64 {
        self.compression_ratio_for(self.bits_direct.len())
    }

    /// Same, but against the RLE-mode stream.
    pub fn compression_ratio_rle(&self) -> f64 {
        self.compression_ratio_for(self.bits_rle.len())
    }

    fn compression_ratio_for(&self, compressed_bits: usize) -> f64 {
        let original_bits = self.original.len() as u64 * ORIGINAL_BITS_PER_PIXEL;
        if compressed_bits == 0 {
            return f64::INFINITY;
        }
        original_bits as f64 / compressed_bits as f64
    }

    /// Peak signal-to-noise ratio between the original and reconstructed
    /// cube. Since the pipeline is lossless, this is always infinite for a
    /// successful run.
    pub fn psnr(&self) -> f64 {
        let max_value = self.original.iter_flat().map(i64::abs).max().unwrap_or(0) as f64;
        if max_value == 0.0 {
            return f64::INFINITY;
        }

        let n = self.original.len() as f64;
        let mse: f64 = self
            .original
            .iter_flat()
            .zip(self.reconstructed.iter_flat())
            .map(|(o, r)| {
                let d = (o - r) as f64;
                d * d
            })
            .sum::<f64>()
            / n;

        if mse == 0.0 {
            return f64::INFINITY;
        }
        10.0 * (max_value * max_value / mse).log10()
    }
}
