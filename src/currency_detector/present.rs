use crate::denomination::Denomination;
use crate::error::DetectionError;
use std::fmt::Write;

/// Raw model scores, one per [`Denomination`] in model order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreVector([f32; Denomination::COUNT]);

impl ScoreVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Index of the highest score. Scans left to right with a strict `>`, so
    /// the earliest of several equal maxima wins and NaN never does.
    pub fn argmax(&self) -> usize {
        let mut max_index = 0;
        let mut max_score = self.0[0];
        for (index, &score) in self.0.iter().enumerate().skip(1) {
            if score > max_score || (max_score.is_nan() && !score.is_nan()) {
                max_index = index;
                max_score = score;
            }
        }
        max_index
    }
}

impl TryFrom<Vec<f32>> for ScoreVector {
    type Error = DetectionError;

    fn try_from(scores: Vec<f32>) -> Result<Self, Self::Error> {
        let len = scores.len();
        let scores: [f32; Denomination::COUNT] = scores.try_into().map_err(|_| {
            DetectionError::MalformedResult(format!(
                "expected {} scores, got {}",
                Denomination::COUNT,
                len
            ))
        })?;
        Ok(Self(scores))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub denomination: Denomination,
    pub scores: ScoreVector,
}

impl ClassificationResult {
    pub fn from_scores(scores: Vec<f32>) -> Result<Self, DetectionError> {
        let scores = ScoreVector::try_from(scores)?;
        let index = scores.argmax();
        let denomination = Denomination::from_index(index).ok_or_else(|| {
            DetectionError::MalformedResult(format!("no label for class {}", index))
        })?;

        Ok(Self {
            denomination,
            scores,
        })
    }

    pub fn label(&self) -> String {
        self.denomination.label()
    }

    /// One `"<label>: <percent>%"` line per class, always in model order.
    pub fn confidence_report(&self) -> String {
        let mut report = String::new();
        for (denomination, score) in Denomination::ALL.iter().zip(self.scores.as_slice()) {
            let _ = writeln!(report, "{}: {:.1}%", denomination.label(), score * 100.0);
        }
        report
    }
}
