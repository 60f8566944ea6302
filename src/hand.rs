//! Hand anatomy model: pairwise reach tables, comfort scoring, and
//! finger-number assignment.

use crate::error::{EngineError, Result};
use crate::guitar::{distance, Finger, FingerPlacement};
use strum::IntoEnumIterator;

/// The 6 canonical finger pairs in the order `HandModel::new` expects its
/// `min_pairs`/`max_pairs` arguments, per the external interface.
pub const PAIR_ORDER: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

/// 4x4 symmetric pairwise-distance tables plus the enabled-finger bitmap.
#[derive(Debug, Clone)]
pub struct HandModel {
	enabled: [bool; 4],
	min_dist: [[f64; 4]; 4],
	max_dist: [[f64; 4]; 4],
	num_fingers: u8,
	max_search_dist: f64,
}

impl HandModel {
	/// `enabled_mask` bit `i` enables finger `i`. `min_pairs`/`max_pairs`
	/// follow `PAIR_ORDER`.
	pub fn new(enabled_mask: u8, min_pairs: [f64; 6], max_pairs: [f64; 6]) -> Result<Self> {
		let enabled = [
			enabled_mask & 1 != 0,
			enabled_mask & 2 != 0,
			enabled_mask & 4 != 0,
			enabled_mask & 8 != 0,
		];
		let num_fingers = enabled.iter().filter(|&&e| e).count() as u8;
		if num_fingers == 0 {
			return Err(EngineError::NoFingersEnabled);
		}

		let mut min_dist = [[0.0; 4]; 4];
		let mut max_dist = [[0.0; 4]; 4];
		for (idx, &(i, j)) in PAIR_ORDER.iter().enumerate() {
			let min_d = min_pairs[idx];
			let max_d = max_pairs[idx];
			if min_d > max_d {
				return Err(EngineError::InvalidHandModel(i as u8, j as u8, min_d, max_d));
			}
			min_dist[i][j] = min_d;
			min_dist[j][i] = min_d;
			max_dist[i][j] = max_d;
			max_dist[j][i] = max_d;
		}

		let max_search_dist = max_dist
			.iter()
			.flatten()
			.copied()
			.fold(0.0_f64, f64::max);

		Ok(HandModel {
			enabled,
			min_dist,
			max_dist,
			num_fingers,
			max_search_dist,
		})
	}

	pub fn is_enabled(&self, finger: Finger) -> bool {
		self.enabled[finger.index()]
	}

	pub fn num_fingers(&self) -> u8 {
		self.num_fingers
	}

	pub fn max_search_dist(&self) -> f64 {
		self.max_search_dist
	}

	pub fn min_dist(&self, a: Finger, b: Finger) -> f64 {
		self.min_dist[a.index()][b.index()]
	}

	pub fn max_dist(&self, a: Finger, b: Finger) -> f64 {
		self.max_dist[a.index()][b.index()]
	}

	/// `SF(d)` from the spec: 1 below the minimum shoulder grows cubically
	/// away from 1 as `d` undershoots `a = 0.99*minD`; flat at 1 through the
	/// comfortable band; falls off quadratically past the (asymmetric)
	/// upper shoulder `l = 7b/12`. Kept asymmetric intentionally: tolerant
	/// of slightly cramped spacing, unforgiving of over-stretching.
	pub fn comfort_score(d: f64, min_d: f64, max_d: f64) -> f64 {
		let a = 0.99 * min_d;
		let b = 1.01 * max_d;
		let l = 7.0 * b / 12.0;
		if d < a {
			1.0 + (d - a).powi(3)
		} else if d <= l {
			1.0
		} else {
			1.0 - ((d - l) / l).powi(2)
		}
	}

	/// Mean pairwise comfort across all selected placements under a given
	/// finger assignment (a slice of one `Finger` per placement, in the
	/// same order as `placements`, sorted by string).
	pub fn fingering_comfort(&self, placements: &[FingerPlacement], fingers: &[Finger]) -> f64 {
		let k = placements.len();
		if k < 2 {
			return 1.0;
		}
		let mut penalty_sum = 0.0;
		let mut pairs = 0usize;
		for i in 0..k {
			for j in (i + 1)..k {
				let d = distance(&placements[i].position, &placements[j].position);
				let min_d = self.min_dist(fingers[i], fingers[j]);
				let max_d = self.max_dist(fingers[i], fingers[j]);
				let sf = Self::comfort_score(d, min_d, max_d);
				penalty_sum += 1.0 - sf;
				pairs += 1;
			}
		}
		1.0 - penalty_sum / (pairs.max(1) as f64)
	}

	/// Enumerates every canonical ascending subset of enabled fingers with
	/// cardinality `placements.len()` and returns the arg-max
	/// `(comfort, assignment_id)`.
	pub fn find_best_assignment(&self, placements: &[FingerPlacement]) -> (f64, usize) {
		let k = placements.len();
		let mut best = (f64::NEG_INFINITY, FingerAssignment::INVALID_ID);
		for (id, subset) in FingerAssignment::canonical().iter().enumerate() {
			if subset.len() != k {
				continue;
			}
			if !subset.iter().all(|f| self.is_enabled(*f)) {
				continue;
			}
			let comfort = self.fingering_comfort(placements, subset);
			if comfort > best.0 {
				best = (comfort, id);
			}
		}
		best
	}
}

/// The 16 canonical finger-number assignments: indices 0..14 are the
/// ascending non-crossing 1-, 2-, 3-, and 4-element subsets of
/// `{Index, Middle, Ring, Pinky}`; index 15 is the invalid sentinel. No
/// class hierarchy — a small static table of slices, per the design note.
pub struct FingerAssignment;

impl FingerAssignment {
	pub const INVALID_ID: usize = 15;

	pub fn canonical() -> &'static [&'static [Finger]] {
		use Finger::*;
		static TABLE: [&[Finger]; 15] = [
			&[Index],
			&[Middle],
			&[Ring],
			&[Pinky],
			&[Index, Middle],
			&[Index, Ring],
			&[Index, Pinky],
			&[Middle, Ring],
			&[Middle, Pinky],
			&[Ring, Pinky],
			&[Index, Middle, Ring],
			&[Index, Middle, Pinky],
			&[Index, Ring, Pinky],
			&[Middle, Ring, Pinky],
			&[Index, Middle, Ring, Pinky],
		];
		&TABLE
	}

	/// `FNGR_NUM[id][slot]`: the finger assigned to the `slot`-th placement
	/// (sorted by string) under assignment `id`.
	pub fn finger_at(id: usize, slot: usize) -> Option<Finger> {
		Self::canonical().get(id).and_then(|s| s.get(slot)).copied()
	}
}

/// Every finger, for code that needs to iterate regardless of a
/// particular hand model's enabled set.
pub fn all_fingers() -> impl Iterator<Item = Finger> {
	Finger::iter()
}
