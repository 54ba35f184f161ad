use crate::denomination::Denomination;
use crate::error::DetectionError;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use crate::preprocess::InputTensor;
use rand::distr::{Distribution, Uniform};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum FakeResponse {
    Random,
    Scores(Vec<f32>),
    Fail(DetectionError),
}

pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    response: Mutex<FakeResponse>,
    calls: AtomicUsize,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_response(logger, FakeResponse::Random)
    }

    pub fn with_response(logger: Arc<dyn Logger + Send + Sync>, response: FakeResponse) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            response: Mutex::new(response),
            calls: AtomicUsize::new(0),
        }
    }

    #[cfg(test)]
    pub fn set_response(&self, response: FakeResponse) {
        if let Ok(mut current) = self.response.lock() {
            *current = response;
        }
    }

    #[cfg(test)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn random_scores() -> Result<Vec<f32>, DetectionError> {
        let mut rng = rand::rng();
        let dist = Uniform::new(0.0f32, 1.0)
            .map_err(|e| DetectionError::Inference(e.to_string()))?;
        let raw: Vec<f32> = (0..Denomination::COUNT)
            .map(|_| dist.sample(&mut rng))
            .collect();
        let total: f32 = raw.iter().sum();
        Ok(raw.iter().map(|v| v / total.max(f32::EPSILON)).collect())
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, tensor: &InputTensor) -> Result<Vec<f32>, DetectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.logger.info(&format!(
            "Classifying tensor of {} values",
            tensor.as_slice().len()
        ));

        let response = self
            .response
            .lock()
            .map_err(|e| DetectionError::Inference(e.to_string()))?
            .clone();

        match response {
            FakeResponse::Random => Self::random_scores(),
            FakeResponse::Scores(scores) => Ok(scores),
            FakeResponse::Fail(error) => Err(error),
        }
    }
}
