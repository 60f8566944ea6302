//! The search engine: dispatches one task per tonic placement across a
//! bounded thread pool, and within each task enumerates combinations of
//! finger placements that reproduce the requested chord.

use crate::error::{EngineError, Result};
use crate::filters::{filter1, tonic_filter_fretted, tonic_filter_open};
use crate::fingering::{build_fingering, Fingering};
use crate::guitar::{FingerPlacement, Guitar};
use crate::hand::{FingerAssignment, HandModel};
use crate::pitch::{open_string_mask, ChordMask, Pitch};
use crate::rater::Rater;
use rayon::prelude::*;

/// Acceptance thresholds and barre policy for a search, per the external
/// interface's `Searcher.new(guitar, hand, rater, {maxMutes, minScore,
/// barreEnabled, maxBarre})`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
	pub max_mutes: usize,
	pub min_score: f64,
	pub barre_enabled: bool,
	pub max_barre: usize,
}

/// Tallies of rejected candidates within one tonic's task, logged once per
/// task rather than per candidate.
#[derive(Debug, Default)]
struct Tally {
	accepted: usize,
	no_assignment: usize,
	rejected_mute: usize,
	rejected_score: usize,
	rejected_barre: usize,
}

/// Immutable guitar, hand model, and rater, plus the acceptance policy —
/// everything a search task needs, shared read-only across the pool.
pub struct Searcher {
	guitar: Guitar,
	hand: HandModel,
	rater: Rater,
	config: SearchConfig,
}

impl Searcher {
	pub fn new(guitar: Guitar, hand: HandModel, rater: Rater, config: SearchConfig) -> Self {
		Searcher { guitar, hand, rater, config }
	}

	pub fn guitar(&self) -> &Guitar {
		&self.guitar
	}

	pub fn hand(&self) -> &HandModel {
		&self.hand
	}

	pub fn rater(&self) -> &Rater {
		&self.rater
	}

	pub fn config(&self) -> &SearchConfig {
		&self.config
	}

	/// Phases 1-3 of the search: shift the chord by `key`, enumerate
	/// fretboard positions, dispatch one task per tonic across a pool of
	/// `num_threads` workers, and concatenate their results.
	pub fn generate(&self, chord: ChordMask, key: u8, num_threads: usize) -> Result<Vec<Fingering>> {
		if key >= 12 {
			return Err(EngineError::InvalidKey(key));
		}

		let span = tracing::info_span!("searcher.generate", chord = %chord, key, num_threads);
		let _enter = span.enter();

		let shifted = chord.shifted_to_key(key);
		let fps = self.guitar.find_positions(shifted, self.config.barre_enabled);
		let tonics: Vec<&FingerPlacement> =
			fps.iter().filter(|p| p.position.pitch_class() == key).collect();
		let f_pos: Vec<FingerPlacement> = fps.iter().filter(|p| p.position.fret > 0).cloned().collect();

		tracing::debug!(tonics = tonics.len(), candidates = f_pos.len(), "search setup complete");

		if tonics.is_empty() {
			return Ok(Vec::new());
		}

		let pool = rayon::ThreadPoolBuilder::new()
			.num_threads(num_threads.max(1))
			.build()
			.expect("a positive thread count always builds a pool");

		let per_tonic: Vec<Vec<Fingering>> =
			pool.install(|| tonics.par_iter().map(|tonic| self.search_tonic(tonic, &f_pos, shifted)).collect());

		let results: Vec<Fingering> = per_tonic.into_iter().flatten().collect();
		tracing::debug!(found = results.len(), "search complete");
		Ok(results)
	}

	/// Sorts `fingerings` in place, highest `total_score` first. A separate
	/// post-pass, per the external interface's `searcher.sortDescendingByScore`.
	pub fn sort_descending_by_score(fingerings: &mut [Fingering]) {
		fingerings.sort_by(|a, b| b.total_score.partial_cmp(&a.total_score).unwrap_or(std::cmp::Ordering::Equal));
	}

	fn search_tonic(&self, tonic: &FingerPlacement, f_pos: &[FingerPlacement], chord: ChordMask) -> Vec<Fingering> {
		// A barre-type tonic already spends part of the barre budget before
		// any enumeration starts; if that alone exceeds max_barre, no
		// candidate built on top of it can ever be admissible.
		if usize::from(tonic.is_barre) > self.config.max_barre {
			return Vec::new();
		}

		let num_fingers = self.hand.num_fingers() as usize;
		let max_dist = self.hand.max_search_dist();
		let open_mask = open_string_mask(self.guitar.tuning(), chord, tonic.position.pitch);
		let mut found = Vec::new();
		let mut tally = Tally::default();

		if tonic.position.fret == 0 {
			let list = tonic_filter_open(f_pos, tonic);
			let seed_mask = open_mask.bits() | tonic.notes_sounded.bits();
			let mut selected = Vec::new();
			if seed_mask == chord.bits() {
				self.try_candidate(chord, tonic.position.pitch, &selected, 0, &mut found, &mut tally);
			}
			self.enumerate(
				&list,
				num_fingers,
				max_dist,
				chord.bits(),
				seed_mask,
				0,
				&mut selected,
				tonic.position.pitch,
				&mut found,
				&mut tally,
			);
		} else {
			let list = tonic_filter_fretted(f_pos, tonic, max_dist);
			let seed_mask = open_mask.bits() | tonic.notes_sounded.bits();
			let barre0 = usize::from(tonic.is_barre);
			let mut selected = vec![tonic.clone()];
			if seed_mask == chord.bits() {
				self.try_candidate(chord, tonic.position.pitch, &selected, barre0, &mut found, &mut tally);
			}
			if num_fingers > 1 {
				self.enumerate(
					&list,
					num_fingers - 1,
					max_dist,
					chord.bits(),
					seed_mask,
					barre0,
					&mut selected,
					tonic.position.pitch,
					&mut found,
					&mut tally,
				);
			}
		}

		tracing::debug!(
			tonic_string = tonic.position.string,
			tonic_fret = tonic.position.fret,
			accepted = tally.accepted,
			no_assignment = tally.no_assignment,
			rejected_mute = tally.rejected_mute,
			rejected_score = tally.rejected_score,
			rejected_barre = tally.rejected_barre,
			"tonic task complete"
		);

		found
	}

	/// A single recursive enumerator standing in for spec's depth-unrolled
	/// curJ/curK/curL/curM loops: `filter1` chains anchor-relative, so each
	/// level only ever considers candidates strictly later in `candidates`'
	/// index order than the one just picked, which is what keeps the walk
	/// from revisiting the same unordered combination twice.
	#[allow(clippy::too_many_arguments)]
	fn enumerate(
		&self,
		candidates: &[FingerPlacement],
		remaining: usize,
		max_dist: f64,
		chord_bits: u16,
		note_mask: u16,
		barre_count: usize,
		selected: &mut Vec<FingerPlacement>,
		tonic_pitch: Pitch,
		found: &mut Vec<Fingering>,
		tally: &mut Tally,
	) {
		if remaining == 0 {
			return;
		}
		for (idx, placement) in candidates.iter().enumerate() {
			let new_barre_count = barre_count + usize::from(placement.is_barre);
			if placement.is_barre && new_barre_count > self.config.max_barre {
				continue;
			}

			let new_mask = note_mask | placement.notes_sounded.bits();
			selected.push(placement.clone());

			if new_mask == chord_bits {
				self.try_candidate(ChordMask(chord_bits), tonic_pitch, selected, new_barre_count, found, tally);
			}

			if remaining > 1 {
				let can_barre = new_barre_count < self.config.max_barre;
				let narrowed: Vec<FingerPlacement> =
					filter1(candidates, idx, max_dist, can_barre).into_iter().map(|(_, p)| p).collect();
				self.enumerate(
					&narrowed,
					remaining - 1,
					max_dist,
					chord_bits,
					new_mask,
					new_barre_count,
					selected,
					tonic_pitch,
					found,
					tally,
				);
			}

			selected.pop();
		}
	}

	/// `tryCandidate`: finds the best finger assignment, materializes the
	/// fingering, scores it, and applies the `maxBarre`/`maxMutes`/`minScore`
	/// acceptance gate. Rejections are tallied, never logged individually.
	fn try_candidate(
		&self,
		chord: ChordMask,
		tonic_pitch: Pitch,
		selected: &[FingerPlacement],
		barre_count: usize,
		found: &mut Vec<Fingering>,
		tally: &mut Tally,
	) {
		if barre_count > self.config.max_barre {
			tally.rejected_barre += 1;
			return;
		}

		let mut ordered: Vec<FingerPlacement> = selected.to_vec();
		ordered.sort_by_key(|p| p.position.fret_id);

		// A chord fully satisfied by open strings selects zero finger
		// placements; there is no finger-assignment entry for k=0 (the
		// canonical table only covers 1..=4), and none is needed since
		// `build_fingering` never looks one up when nothing was selected.
		let (comfort, assignment_id) = if ordered.is_empty() {
			(1.0, 0)
		} else {
			let (comfort, assignment_id) = self.hand.find_best_assignment(&ordered);
			if assignment_id == FingerAssignment::INVALID_ID {
				tally.no_assignment += 1;
				return;
			}
			(comfort, assignment_id)
		};

		let fingering = build_fingering(
			&self.guitar,
			&ordered,
			chord,
			tonic_pitch,
			assignment_id,
			comfort,
			self.hand.num_fingers(),
			barre_count,
		);
		let Some(mut fingering) = fingering else {
			tally.no_assignment += 1;
			return;
		};

		let score = self.rater.score(&fingering.category_scores);
		if fingering.mute_count > self.config.max_mutes {
			tally.rejected_mute += 1;
			return;
		}
		if score < self.config.min_score {
			tally.rejected_score += 1;
			return;
		}

		fingering.total_score = score;
		tally.accepted += 1;
		found.push(fingering);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::pitch::ChordMask;

	fn standard6() -> Guitar {
		Guitar::new(vec![40, 45, 50, 55, 59, 64], 12, 44.45, 58.7375, 38.0, 620.0).unwrap()
	}

	fn full_hand() -> HandModel {
		HandModel::new(0b1111, [25.0; 6], [70.0; 6]).unwrap()
	}

	fn lenient_config() -> SearchConfig {
		SearchConfig { max_mutes: 6, min_score: f64::NEG_INFINITY, barre_enabled: true, max_barre: 1 }
	}

	#[test]
	fn rejects_key_out_of_range() {
		let searcher = Searcher::new(standard6(), full_hand(), Rater::default(), lenient_config());
		let chord = ChordMask::new(0b0000_0100_0001).unwrap();
		assert_eq!(searcher.generate(chord, 12, 1), Err(EngineError::InvalidKey(12)));
	}

	#[test]
	fn empty_chord_yields_no_fingerings() {
		let searcher = Searcher::new(standard6(), full_hand(), Rater::default(), lenient_config());
		let result = searcher.generate(ChordMask::EMPTY, 0, 1).unwrap();
		assert!(result.is_empty());
	}

	#[test]
	fn e_major_open_position_is_found() {
		let searcher = Searcher::new(standard6(), full_hand(), Rater::default(), lenient_config());
		let chord = ChordMask::new(0b0000_1001_0001).unwrap(); // major triad
		let results = searcher.generate(chord, 4, 1).unwrap(); // key = E
		assert!(!results.is_empty());
		for fingering in &results {
			assert_eq!(fingering.chord_produced.bits(), chord.shifted_to_key(4).bits());
		}
	}

	#[test]
	fn restricting_to_two_fingers_caps_placement_count() {
		let hand = HandModel::new(0b0011, [25.0; 6], [70.0; 6]).unwrap(); // Index, Middle only
		let searcher = Searcher::new(standard6(), hand, Rater::default(), lenient_config());
		let chord = ChordMask::new(0b0000_0100_0001).unwrap(); // power chord (root + fifth)
		let results = searcher.generate(chord, 0, 1).unwrap();
		for fingering in &results {
			assert!(fingering.selected_placements.len() <= 2);
		}
	}

	#[test]
	fn single_threaded_search_is_deterministic() {
		let searcher = Searcher::new(standard6(), full_hand(), Rater::default(), lenient_config());
		let chord = ChordMask::new(0b0000_1001_0001).unwrap();
		let first = searcher.generate(chord, 4, 1).unwrap();
		let second = searcher.generate(chord, 4, 1).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn chord_satisfied_entirely_by_open_strings_is_found_with_zero_placements() {
		let searcher = Searcher::new(standard6(), full_hand(), Rater::default(), lenient_config());
		let chord = ChordMask::new(0b0000_1000_0001).unwrap(); // power chord: root + fifth
		let results = searcher.generate(chord, 4, 1).unwrap(); // key = E: low E, B, high e are all open chord tones
		assert!(
			results.iter().any(|f| f.selected_placements.is_empty()),
			"expected an all-open-strings fingering with zero finger placements"
		);
	}

	#[test]
	fn max_barre_zero_rejects_every_barre_placement() {
		let config = SearchConfig { max_mutes: 6, min_score: f64::NEG_INFINITY, barre_enabled: true, max_barre: 0 };
		let searcher = Searcher::new(standard6(), full_hand(), Rater::default(), config);
		let chord = ChordMask::new(0b0000_1001_0001).unwrap(); // major triad, F major at key 5 is normally barred
		let results = searcher.generate(chord, 5, 1).unwrap();
		for fingering in &results {
			assert!(fingering.selected_placements.iter().all(|p| !p.is_barre), "max_barre=0 must reject barre placements");
		}
	}

	#[test]
	fn sort_descending_by_score_orders_results() {
		let searcher = Searcher::new(standard6(), full_hand(), Rater::default(), lenient_config());
		let chord = ChordMask::new(0b0000_1001_0001).unwrap();
		let mut results = searcher.generate(chord, 4, 1).unwrap();
		Searcher::sort_descending_by_score(&mut results);
		for w in results.windows(2) {
			assert!(w[0].total_score >= w[1].total_score);
		}
	}
}
