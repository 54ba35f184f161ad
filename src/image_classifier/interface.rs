use crate::error::DetectionError;
use crate::preprocess::InputTensor;

/// A pretrained model that scores one tensor against every currency class.
///
/// Implementations return the raw output vector; checking its length is the
/// caller's job. Errors must be `ModelInit` or `Inference`.
pub trait ImageClassifier {
    fn classify(&self, tensor: &InputTensor) -> Result<Vec<f32>, DetectionError>;
}
