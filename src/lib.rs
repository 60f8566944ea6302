//! fretspan-core - fretboard-physical-model chord fingering search and
//! scoring engine.
//!
//! Given a chord (as a 12-bit pitch-class mask) and a tonic, this crate
//! enumerates physically playable fingerings on a guitar-shaped fretboard,
//! rejects hand-anatomically unreachable combinations, and scores the
//! survivors with a learnable linear heuristic.
//!
//! - [`guitar`] builds the fretboard and enumerates candidate placements.
//! - [`hand`] models finger reach and scores comfort.
//! - [`filters`] prunes candidate lists before and during enumeration.
//! - [`fingering`] materializes a selection of placements into a concrete,
//!   per-string fretting with its category scores.
//! - [`rater`] combines category scores into a single total score.
//! - [`trainer`] fits the rater's coefficients from rated examples.
//! - [`searcher`] ties it all together: one task per tonic, dispatched
//!   across a bounded thread pool.
//! - [`catalog`] ships 39 built-in chord masks and 5 common tunings.
//!
//! # Examples
//!
//! ```
//! use fretspan_core::catalog::{ChordName, Tuning};
//! use fretspan_core::guitar::Guitar;
//! use fretspan_core::hand::HandModel;
//! use fretspan_core::rater::Rater;
//! use fretspan_core::searcher::{SearchConfig, Searcher};
//!
//! let guitar = Guitar::new(Tuning::Standard6.open_pitches(), 12, 44.45, 58.7375, 38.0, 620.0)?;
//! let hand = HandModel::new(0b1111, [25.0; 6], [70.0; 6])?;
//! let config = SearchConfig { max_mutes: 6, min_score: f64::NEG_INFINITY, barre_enabled: true, max_barre: 1 };
//! let searcher = Searcher::new(guitar, hand, Rater::default(), config);
//!
//! let fingerings = searcher.generate(ChordName::Maj.mask(), 4, 1)?;
//! assert!(!fingerings.is_empty());
//! # Ok::<(), fretspan_core::error::EngineError>(())
//! ```

pub mod catalog;
pub mod error;
pub mod filters;
pub mod fingering;
pub mod guitar;
pub mod hand;
pub mod pitch;
pub mod rater;
pub mod searcher;
pub mod trainer;

pub use catalog::{ChordName, Tuning};
pub use error::{EngineError, Result};
pub use fingering::Fingering;
pub use guitar::{Finger, FingerPlacement, FingerSlot, FretPosition, Guitar};
pub use hand::{FingerAssignment, HandModel};
pub use pitch::{ChordMask, Pitch, PitchClass};
pub use rater::{HeuristicModel, Rater};
pub use searcher::{SearchConfig, Searcher};
pub use trainer::Sample;
