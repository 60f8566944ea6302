//! Placement-list predicates used to prune the searcher's candidate lists
//! before and during combinatorial enumeration.

use crate::guitar::{distance, FingerPlacement};

/// Keeps `p` iff `p.pitch >= tonic.pitch`, `p.string != tonic.string`, and
/// (if `p` is a barre) `p.string > tonic.string || p.fret < tonic.fret`.
pub fn tonic_filter_open(list: &[FingerPlacement], tonic: &FingerPlacement) -> Vec<FingerPlacement> {
	list.iter()
		.filter(|p| {
			p.position.pitch >= tonic.position.pitch
				&& p.position.string != tonic.position.string
				&& (!p.is_barre || p.position.string > tonic.position.string || p.position.fret < tonic.position.fret)
		})
		.cloned()
		.collect()
}

/// As [`tonic_filter_open`], plus a Euclidean fret-distance bound and the
/// pairwise [`t1`] predicate with `can_barre = true`.
pub fn tonic_filter_fretted(
	list: &[FingerPlacement],
	tonic: &FingerPlacement,
	max_dist: f64,
) -> Vec<FingerPlacement> {
	tonic_filter_open(list, tonic)
		.into_iter()
		.filter(|p| distance(&p.position, &tonic.position) <= max_dist && t1(p, tonic, max_dist, true))
		.collect()
}

/// Pairwise admissibility between a candidate `curr` and an already-chosen
/// `anchor` under a reachability budget `max_dist`.
pub fn t1(curr: &FingerPlacement, anchor: &FingerPlacement, max_dist: f64, can_barre: bool) -> bool {
	let different_strings = anchor.position.string != curr.position.string;

	let curr_ok = !curr.is_barre
		|| (can_barre
			&& curr.position.fret != anchor.position.fret
			&& (curr.position.string > anchor.position.string || curr.position.fret < anchor.position.fret));

	let anchor_ok =
		!anchor.is_barre || anchor.position.fret < curr.position.fret || anchor.position.string > curr.position.string;

	different_strings && curr_ok && anchor_ok && distance(&curr.position, &anchor.position) <= max_dist
}

/// Keeps elements strictly later in `list` than `anchor_index` that satisfy
/// [`t1`] against `list[anchor_index]`. The strict ordering is what prevents
/// the searcher's nested enumeration from visiting the same unordered
/// combination of placements more than once.
pub fn filter1(
	list: &[FingerPlacement],
	anchor_index: usize,
	max_dist: f64,
	can_barre: bool,
) -> Vec<(usize, FingerPlacement)> {
	let anchor = &list[anchor_index];
	list.iter()
		.enumerate()
		.skip(anchor_index + 1)
		.filter(|(_, p)| t1(p, anchor, max_dist, can_barre))
		.map(|(i, p)| (i, p.clone()))
		.collect()
}
