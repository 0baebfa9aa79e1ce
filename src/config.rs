use hspec_predict::Predictor;

/// Driver knobs for [`crate::Pipeline::run`]. Passed by value; there is no
/// file-based or environment-variable configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub predictor: Predictor,
    /// Per-band fixed value for [`Predictor::FixedValue`]; must have length
    /// `B` when set. `None` falls back to the per-band floor-mean.
    pub fixed_value_override: Option<Vec<i64>>,
}

impl PipelineConfig {
    pub fn new(predictor: Predictor) -> Self {
        Self {
            predictor,
            fixed_value_override: None,
        }
    }

    pub fn with_fixed_value_override(mut self, values: Vec<i64>) -> Self {
        self.fixed_value_override = Some(values);
        self
    }
}
