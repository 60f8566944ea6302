//! SVD-based ridge-regression trainer: fits the rater's linear weights
//! from a dataset of rated fingerings.

use crate::error::{EngineError, Result};
use crate::fingering::NUM_SCORES;
use crate::rater::HeuristicModel;
use nalgebra::{DMatrix, DVector};

/// One rated fingering: its eight category scores and the user's rating.
pub type Sample = ([f64; NUM_SCORES], f64);

/// Fits coefficients from `(A, y)` where `A` has one row per sample's
/// category scores and `y` is the corresponding rating:
///
/// 1. Center the columns of `A` and `y` by subtracting column means.
/// 2. Compute the thin SVD `A = U . Sigma . V^T`.
/// 3. Replace each singular value `sigma` with `sigma / (sigma^2 + alpha^2)`.
/// 4. `w = V . Sigma' . U^T . y`; `intercept = y_mean - col_means . w`.
///
/// Zero samples, or a singular design matrix at `alpha = 0`, is an error;
/// with `alpha > 0` the system is always well-conditioned.
pub fn fit(samples: &[Sample], alpha: f64) -> Result<HeuristicModel> {
	let n = samples.len();
	if n == 0 {
		return Err(EngineError::InsufficientTrainingData);
	}

	let mut a = DMatrix::<f64>::zeros(n, NUM_SCORES);
	let mut y = DVector::<f64>::zeros(n);
	for (i, (scores, rating)) in samples.iter().enumerate() {
		for (j, &s) in scores.iter().enumerate() {
			a[(i, j)] = s;
		}
		y[i] = *rating;
	}

	let col_means: Vec<f64> = (0..NUM_SCORES).map(|j| a.column(j).sum() / n as f64).collect();
	let y_mean = y.sum() / n as f64;

	for i in 0..n {
		for j in 0..NUM_SCORES {
			a[(i, j)] -= col_means[j];
		}
		y[i] -= y_mean;
	}

	let svd = a.svd(true, true);
	let u = svd.u.ok_or(EngineError::SingularDesignMatrix)?;
	let v_t = svd.v_t.ok_or(EngineError::SingularDesignMatrix)?;
	let singular_values = svd.singular_values;

	if alpha == 0.0 && singular_values.iter().any(|&s| s.abs() < 1e-12) {
		return Err(EngineError::SingularDesignMatrix);
	}

	let damped: Vec<f64> = singular_values.iter().map(|&s| s / (s * s + alpha * alpha)).collect();

	let u_t_y = u.transpose() * &y;
	let scaled = DVector::from_iterator(damped.len(), damped.iter().zip(u_t_y.iter()).map(|(d, p)| d * p));
	let v = v_t.transpose();
	let w_full = &v * scaled;

	let mut coefficients = [0.0; NUM_SCORES];
	coefficients.copy_from_slice(w_full.as_slice());

	let intercept = y_mean - col_means.iter().zip(coefficients.iter()).map(|(m, w)| m * w).sum::<f64>();

	Ok(HeuristicModel { coefficients, intercept })
}

/// `||y - y_hat||_2`, the score metric named alongside the fit procedure.
pub fn residual_norm(samples: &[Sample], model: &HeuristicModel) -> f64 {
	samples
		.iter()
		.map(|(scores, rating)| (model.score(scores) - rating).powi(2))
		.sum::<f64>()
		.sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;

	/// 20 rows, 8 columns, deterministic pseudo-random-looking values with
	/// no exact linear dependency between columns.
	fn toy_design_matrix() -> Vec<[f64; NUM_SCORES]> {
		(0..20)
			.map(|i| {
				let mut row = [0.0; NUM_SCORES];
				for (j, cell) in row.iter_mut().enumerate() {
					*cell = (((i * 31 + j * 17) % 13) as f64 / 6.0) - 1.0;
				}
				row
			})
			.collect()
	}

	fn toy_samples_with_w(w: &[f64; NUM_SCORES]) -> Vec<Sample> {
		toy_design_matrix()
			.into_iter()
			.map(|row| {
				let y: f64 = row.iter().zip(w.iter()).map(|(a, b)| a * b).sum();
				(row, y)
			})
			.collect()
	}

	#[test]
	fn empty_dataset_is_an_error() {
		assert_eq!(fit(&[], 1.0), Err(EngineError::InsufficientTrainingData));
	}

	#[test]
	fn ridge_sanity_alpha_near_zero_recovers_exact_weights() {
		let mut w = [0.0; NUM_SCORES];
		w[0] = 1.0;
		let samples = toy_samples_with_w(&w);

		let model = fit(&samples, 1e-6).unwrap();
		for (i, &coef) in model.coefficients.iter().enumerate() {
			let expected = if i == 0 { 1.0 } else { 0.0 };
			assert!((coef - expected).abs() < 1e-6, "coef[{i}] = {coef}");
		}
	}

	#[test]
	fn ridge_alpha_one_is_biased_but_sign_consistent() {
		let mut w = [0.0; NUM_SCORES];
		w[0] = 1.0;
		let samples = toy_samples_with_w(&w);

		let model = fit(&samples, 1.0).unwrap();
		assert!(model.coefficients[0] > 0.0);
		assert!(model.coefficients[0] < 1.0);
	}

	#[test]
	fn fitting_twice_is_idempotent() {
		let mut w = [0.0; NUM_SCORES];
		w[2] = 0.5;
		w[5] = -0.25;
		let samples = toy_samples_with_w(&w);

		let first = fit(&samples, 1.0).unwrap();
		let second = fit(&samples, 1.0).unwrap();
		for (a, b) in first.coefficients.iter().zip(second.coefficients.iter()) {
			assert!((a - b).abs() < 1e-9);
		}
		assert!((first.intercept - second.intercept).abs() < 1e-9);
	}
}
