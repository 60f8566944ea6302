//! Fingering materialization: turning a selected set of finger placements
//! into a concrete per-string fretting, with muting, unison counting, and
//! the eight category scores the rater combines.

use crate::guitar::{FingerPlacement, FingerSlot, FretPosition, Guitar};
use crate::hand::FingerAssignment;
use crate::pitch::{ChordMask, Pitch};
use std::collections::HashSet;

/// Number of category scores a fingering is rated on.
pub const NUM_SCORES: usize = 8;

/// A concrete, playable chord fingering: one fret position per string,
/// plus the bookkeeping the rater and the searcher's filters need.
#[derive(Debug, Clone, PartialEq)]
pub struct Fingering {
	pub fret_positions: Vec<FretPosition>,
	pub selected_placements: Vec<FingerPlacement>,
	pub chord_produced: ChordMask,
	pub tonic_pitch: Pitch,
	pub category_scores: [f64; NUM_SCORES],
	pub total_score: f64,
	pub mute_count: usize,
	pub min_fret: u16,
	pub max_fret: u16,
	pub rating: Option<f64>,
}

impl Fingering {
	pub fn string_count(&self) -> usize {
		self.fret_positions.len()
	}
}

/// Builds a [`Fingering`] from a selected set of placements, per the
/// six-step materialization procedure:
///
/// 1. Each string without its own placement adopts the running open-fret
///    register (0 until a barre raises it).
/// 2. Strings with a placement get the placement's own position, with its
///    finger looked up from the canonical assignment table; a barre
///    placement that extends past the current register raises it for
///    every higher-numbered string processed afterward.
/// 3. Every per-string position is then either muted (pitch below the
///    tonic, or its pitch class not in the requested chord) or counted
///    towards the produced chord mask, unison count, and lowest sounding
///    string.
/// 4. If the produced mask doesn't match the requested chord, there is no
///    valid fingering here.
#[allow(clippy::too_many_arguments)]
pub fn build_fingering(
	guitar: &Guitar,
	selected: &[FingerPlacement],
	chord: ChordMask,
	tonic_pitch: Pitch,
	assignment_id: usize,
	comfort_score: f64,
	num_enabled_fingers: u8,
	barre_count: usize,
) -> Option<Fingering> {
	let string_count = guitar.string_count();

	let mut by_string: Vec<&FingerPlacement> = selected.iter().collect();
	by_string.sort_by_key(|p| p.position.string);

	let mut per_string: Vec<FretPosition> = Vec::with_capacity(string_count);
	let mut open_fret: u16 = 0;
	let mut barre_finger = FingerSlot::Undef;
	let mut min_fret = u16::MAX;
	let mut max_fret = 0u16;

	for string in 0..string_count as u8 {
		if let Some(slot) = by_string.iter().position(|p| p.position.string == string) {
			let placement = by_string[slot];
			let finger = FingerAssignment::finger_at(assignment_id, slot)?;
			let mut position = placement.position;
			position.finger = FingerSlot::Assigned(finger);

			min_fret = min_fret.min(position.fret);
			max_fret = max_fret.max(position.fret);

			if placement.is_barre && placement.position.fret > open_fret {
				open_fret = placement.position.fret;
				barre_finger = FingerSlot::Assigned(finger);
			}

			per_string.push(position);
		} else {
			let mut position = *guitar.position_at(string, open_fret);
			position.finger = barre_finger;
			per_string.push(position);
		}
	}

	if min_fret == u16::MAX {
		min_fret = 0;
	}

	let mut produced: u16 = 0;
	let mut mute_count: usize = 0;
	let mut sounded_pitches: HashSet<Pitch> = HashSet::new();
	let mut distinct_pitches: HashSet<Pitch> = HashSet::new();
	let mut unison = 0usize;
	let mut lowest_sounding: Option<usize> = None;

	for (i, position) in per_string.iter_mut().enumerate() {
		let pc = position.pitch_class();
		if position.pitch < tonic_pitch || !chord.contains(pc) {
			*position = position.muted();
			mute_count += 1;
		} else {
			produced |= 1 << pc;
			if lowest_sounding.is_none() {
				lowest_sounding = Some(i);
			}
			if !sounded_pitches.insert(position.pitch) {
				unison += 1;
			}
			distinct_pitches.insert(position.pitch);
		}
	}

	if produced != chord.bits() {
		return None;
	}

	let lowest_sounding_string = lowest_sounding.unwrap_or(0);
	let mute_count = mute_count.saturating_sub(lowest_sounding_string);

	let category_scores = [
		1.0 / (1.0 + unison as f64),
		1.0 / (mute_count as f64 + 1.0).powi(2),
		comfort_score,
		(string_count - lowest_sounding_string) as f64 / string_count as f64,
		(num_enabled_fingers as f64 - selected.len() as f64) / num_enabled_fingers as f64,
		1.0 / (max_fret as f64 - min_fret as f64 + 1.0),
		if distinct_pitches.is_empty() {
			0.0
		} else {
			1.0 - 1.0 / distinct_pitches.len() as f64
		},
		1.0 / (1.0 + barre_count as f64),
	];

	Some(Fingering {
		fret_positions: per_string,
		selected_placements: selected.to_vec(),
		chord_produced: ChordMask(produced),
		tonic_pitch,
		category_scores,
		total_score: 0.0,
		mute_count,
		min_fret,
		max_fret,
		rating: None,
	})
}
