//! Error types for the fretspan-core engine.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
	#[error("chord mask {0:#06x} has bits set outside the low 12 bits")]
	InvalidChordMask(u16),

	#[error("key {0} is outside the valid range 0..12")]
	InvalidKey(u8),

	#[error("guitar must have at least one string")]
	EmptyTuning,

	#[error("hand model must enable at least one finger")]
	NoFingersEnabled,

	#[error("hand model pair ({0}, {1}): min distance {2} exceeds max distance {3}")]
	InvalidHandModel(u8, u8, f64, f64),

	#[error("trainer requires at least one sample")]
	InsufficientTrainingData,

	#[error("trainer design matrix is singular at alpha = 0")]
	SingularDesignMatrix,
}

pub type Result<T> = std::result::Result<T, EngineError>;
