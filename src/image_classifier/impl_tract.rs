use crate::error::DetectionError;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use crate::preprocess::{InputTensor, TENSOR_SHAPE};
use std::path::PathBuf;
use std::sync::Arc;
use tract_onnx::prelude::*;

type RunnableModel = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

/// Runs the bundled ONNX currency model with tract.
///
/// The graph is loaded for each call and dropped when the call returns, so
/// no native inference state outlives a request.
pub struct ImageClassifierTract {
    model_path: PathBuf,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTract {
    pub fn new(model_path: PathBuf, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            model_path,
            logger: logger.with_namespace("image_classifier").with_namespace("tract"),
        }
    }

    fn load(&self) -> TractResult<RunnableModel> {
        tract_onnx::onnx()
            .model_for_path(&self.model_path)?
            .with_input_fact(0, f32::fact(TENSOR_SHAPE).into())?
            .into_optimized()?
            .into_runnable()
    }
}

impl ImageClassifier for ImageClassifierTract {
    fn classify(&self, tensor: &InputTensor) -> Result<Vec<f32>, DetectionError> {
        if !self.model_path.exists() {
            return Err(DetectionError::ModelInit(format!(
                "model file not found: {}",
                self.model_path.display()
            )));
        }

        let model = self.load().map_err(|e| {
            DetectionError::ModelInit(format!("{}: {}", self.model_path.display(), e))
        })?;
        let _ = self
            .logger
            .info(&format!("Loaded {}", self.model_path.display()));

        let input = Tensor::from_shape::<f32>(&tensor.shape(), tensor.as_slice())
            .map_err(|e| DetectionError::Inference(e.to_string()))?;

        let outputs = model
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| DetectionError::Inference(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| DetectionError::Inference("model produced no outputs".to_string()))?
            .to_array_view::<f32>()
            .map_err(|e| DetectionError::Inference(e.to_string()))?;

        let scores: Vec<f32> = output.iter().copied().collect();
        let _ = self.logger.info(&format!("Scores: {:?}", scores));

        Ok(scores)
    }
}
