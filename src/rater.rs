//! Linear heuristic scoring: combines a fingering's eight category scores
//! into a single total score via a learned (or default) coefficient
//! vector.

use crate::fingering::NUM_SCORES;
use crate::trainer::{self, Sample};
use crate::error::Result;

/// Coefficient vector and intercept of the linear heuristic.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeuristicModel {
	pub coefficients: [f64; NUM_SCORES],
	pub intercept: f64,
}

impl Default for HeuristicModel {
	fn default() -> Self {
		HeuristicModel {
			coefficients: [0.09, 0.28, 0.28, 0.18, 0.03, 0.03, 0.04, 0.07],
			intercept: 0.0,
		}
	}
}

impl HeuristicModel {
	pub fn score(&self, scores: &[f64; NUM_SCORES]) -> f64 {
		self.coefficients
			.iter()
			.zip(scores.iter())
			.map(|(w, s)| w * s)
			.sum::<f64>()
			+ self.intercept
	}
}

/// Thin wrapper around a [`HeuristicModel`], named to match the external
/// interface (`Rater.default()`, `Rater.fromCoefficients`, `Rater.fit`).
#[derive(Debug, Clone, PartialEq)]
pub struct Rater {
	model: HeuristicModel,
}

impl Default for Rater {
	fn default() -> Self {
		Rater { model: HeuristicModel::default() }
	}
}

impl Rater {
	pub fn from_coefficients(coefficients: [f64; NUM_SCORES], intercept: f64) -> Self {
		Rater { model: HeuristicModel { coefficients, intercept } }
	}

	pub fn from_model(model: HeuristicModel) -> Self {
		Rater { model }
	}

	/// Fits a new rater from rated (category-scores, rating) samples via
	/// ridge regression.
	pub fn fit(samples: &[Sample], alpha: f64) -> Result<Self> {
		let model = trainer::fit(samples, alpha)?;
		Ok(Rater { model })
	}

	pub fn score(&self, scores: &[f64; NUM_SCORES]) -> f64 {
		self.model.score(scores)
	}

	pub fn model(&self) -> &HeuristicModel {
		&self.model
	}
}
