use hspec_coding::{
    build_dict, decode, decode_run, encode, rle_decode, rle_encode, BitString, HuffmanDict, Stop,
};
use hspec_grid::{residual, Cube};
use hspec_predict::{predict, reconstruct};

use crate::{Artifacts, Error, PipelineConfig, Result};

/// Orchestrates predictor → residual → encode → decode → reconstruct, and
/// hands back every intermediate buffer for inspection.
pub struct Pipeline;

impl Pipeline {
    pub fn run(cube: Cube, config: PipelineConfig) -> Result<Artifacts> {
        let shape = cube.shape();
        tracing::info!(predictor = config.predictor.name(), bands = shape.0, rows = shape.1, cols = shape.2, "pipeline run starting");

        let prediction = predict(&cube, config.predictor, config.fixed_value_override.as_deref())?;
        let residual_cube = residual(&cube, &prediction.predicted, config.predictor.drops_first_band())?;
        let flat: Vec<i64> = residual_cube.iter_flat().collect();

        // A single-band `inter_band` cube produces a residual with zero
        // elements; there is nothing to feed the codec, so skip it rather
        // than erroring on an empty symbol stream.
        let (dict_direct, bits_direct, decoded_direct, dict_rle_values, dict_rle_counts, bits_rle, num_values) =
            if flat.is_empty() {
                (
                    HuffmanDict::empty(),
                    BitString::new(),
                    Vec::new(),
                    HuffmanDict::empty(),
                    HuffmanDict::empty(),
                    BitString::new(),
                    0u32,
                )
            } else {
                let dict_direct = build_dict(&flat)?;
                let bits_direct = encode(&flat, &dict_direct)?;
                let decoded_direct = decode(&bits_direct, &dict_direct, flat.len())?;

                let runs = rle_encode(&flat);
                let values: Vec<i64> = runs.iter().map(|(v, _)| *v).collect();
                let counts: Vec<i64> = runs.iter().map(|(_, n)| *n).collect();
                let num_values = runs.len() as u32;

                let dict_rle_values = build_dict(&values)?;
                let dict_rle_counts = build_dict(&counts)?;
                let bits_values = encode(&values, &dict_rle_values)?;
                let bits_counts = encode(&counts, &dict_rle_counts)?;
                let mut bits_rle = BitString::new();
                bits_rle.push(&bits_values);
                bits_rle.push(&bits_counts);

                let (decoded_values, split_at) =
                    decode_run(&bits_rle, 0, &dict_rle_values, Stop::Count(num_values as usize))?;
                let (decoded_counts, consumed) =
                    decode_run(&bits_rle, split_at, &dict_rle_counts, Stop::Exhausted)?;
                if consumed != bits_rle.len() {
                    return Err(Error::Codec(hspec_coding::Error::UnterminatedCode {
                        bit_offset: consumed,
                    }));
                }
                let rle_runs: Vec<(i64, i64)> = decoded_values.into_iter().zip(decoded_counts).collect();
                let decoded_rle = rle_decode(&rle_runs);
                if decoded_rle.len() != flat.len() {
                    return Err(Error::Shape(format!(
                        "RLE-decoded length {} does not match residual length {}",
                        decoded_rle.len(),
                        flat.len()
                    )));
                }

                (
                    dict_direct,
                    bits_direct,
                    decoded_direct,
                    dict_rle_values,
                    dict_rle_counts,
                    bits_rle,
                    num_values,
                )
            };

        let (rbands, rrows, rcols) = residual_cube.shape();
        let residual_from_direct = Cube::from_vec(rbands, rrows, rcols, decoded_direct)?;

        let reconstructed = reconstruct(config.predictor, &residual_from_direct, &prediction.side_data)?;

        tracing::info!(
            predictor = config.predictor.name(),
            compressed_bits = bits_direct.len(),
            "pipeline run completed"
        );

        Ok(Artifacts {
            predictor: config.predictor,
            original: cube,
            predicted: prediction.predicted,
            side_data: prediction.side_data,
            residual: residual_cube,
            bits_direct,
            dict_direct,
            bits_rle,
            dict_rle_values,
            dict_rle_counts,
            num_values,
            reconstructed,
        })
    }
}
