//! Built-in chord-mask and tuning catalogs (spec's external interface
//! §6): 39 generic chord masks and 5 common tunings.
//!
//! Two catalog entries are documented duplicates, preserved verbatim
//! rather than deduplicated: `MinSixSharpFive` and `MinThirteen` share a
//! mask, and `MajNine`/`MajNineAlt` are both labelled "Major 9th" while
//! differing in root structure (i.e. they are *not* mask duplicates of
//! each other — only the Min6#5/Min13 pair is).

use crate::pitch::{ChordMask, Pitch};
use strum::EnumIter;

fn mask(semitones: &[u8]) -> ChordMask {
	ChordMask(semitones.iter().fold(0u16, |acc, &s| acc | (1 << s)))
}

/// The 39 built-in generic chord intervallic patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ChordName {
	Empty,
	MajSix,
	MajSixNoFive,
	SixNine,
	Aug,
	Dim,
	DimSeven,
	DimSevenFlatFive,
	Maj,
	MajThirdOnly,
	MajSeven,
	MajSevenSharpFive,
	MajNine,
	MajNineSharpFive,
	MajAddNine,
	DomSeven,
	DomSevenSharpFive,
	MajSevenFlatFive,
	MajSevenOverFive,
	MajNineAlt,
	MajSevenFlatNine,
	MajSevenOverNine,
	MajThirteen,
	Min,
	MinSix,
	MinSixSharpFive,
	MinNine,
	MinEleven,
	MinThirteen,
	MinThirteenSharpNine,
	MinSeven,
	MinSevenSharpFive,
	MinSevenFlatFive,
	MinSevenOverFive,
	MinNineAlt,
	MinSevenFlatNine,
	Power,
	Sus,
	SusTwo,
}

impl ChordName {
	pub fn mask(&self) -> ChordMask {
		use ChordName::*;
		match self {
			Empty => mask(&[]),
			MajSix => mask(&[0, 4, 7, 9]),
			MajSixNoFive => mask(&[0, 4, 9]),
			SixNine => mask(&[0, 2, 4, 7, 9]),
			Aug => mask(&[0, 4, 8]),
			Dim => mask(&[0, 3, 6]),
			DimSeven => mask(&[0, 3, 6, 9]),
			DimSevenFlatFive => mask(&[0, 1, 3, 6]),
			Maj => mask(&[0, 4, 7]),
			MajThirdOnly => mask(&[0, 4]),
			MajSeven => mask(&[0, 4, 7, 11]),
			MajSevenSharpFive => mask(&[0, 4, 8, 11]),
			MajNine => mask(&[0, 2, 4, 7, 11]),
			MajNineSharpFive => mask(&[0, 2, 4, 8, 11]),
			MajAddNine => mask(&[0, 2, 4, 7]),
			DomSeven => mask(&[0, 4, 7, 10]),
			DomSevenSharpFive => mask(&[0, 4, 8, 10]),
			MajSevenFlatFive => mask(&[0, 4, 6, 11]),
			MajSevenOverFive => mask(&[0, 4, 5, 7, 11]),
			MajNineAlt => mask(&[0, 4, 7, 9, 11]),
			MajSevenFlatNine => mask(&[0, 1, 4, 7, 11]),
			MajSevenOverNine => mask(&[0, 2, 4, 6, 11]),
			MajThirteen => mask(&[0, 2, 4, 7, 9, 11]),
			Min => mask(&[0, 3, 7]),
			MinSix => mask(&[0, 3, 7, 9]),
			MinSixSharpFive => mask(&[0, 3, 7, 9, 10]),
			MinNine => mask(&[0, 2, 3, 7, 10]),
			MinEleven => mask(&[0, 3, 5, 7, 10]),
			MinThirteen => mask(&[0, 3, 7, 9, 10]),
			MinThirteenSharpNine => mask(&[0, 1, 3, 7, 9, 10]),
			MinSeven => mask(&[0, 3, 7, 10]),
			MinSevenSharpFive => mask(&[0, 3, 8, 10]),
			MinSevenFlatFive => mask(&[0, 3, 6, 10]),
			MinSevenOverFive => mask(&[0, 3, 4, 7, 10]),
			MinNineAlt => mask(&[0, 1, 3, 7, 10]),
			MinSevenFlatNine => mask(&[0, 1, 3, 5, 7, 10]),
			Power => mask(&[0, 7]),
			Sus => mask(&[0, 5, 7]),
			SusTwo => mask(&[0, 2, 7]),
		}
	}
}

/// The 5 built-in tunings, as absolute open-string pitches low to high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Tuning {
	Standard6,
	DropD,
	Baritone,
	Standard7,
	Standard8,
}

impl Tuning {
	pub fn open_pitches(&self) -> Vec<Pitch> {
		match self {
			Tuning::Standard6 => vec![40, 45, 50, 55, 59, 64],
			Tuning::DropD => vec![38, 45, 50, 55, 59, 64],
			Tuning::Baritone => vec![35, 40, 45, 50, 54, 59],
			Tuning::Standard7 => vec![35, 40, 45, 50, 55, 59, 64],
			Tuning::Standard8 => vec![28, 35, 40, 45, 50, 55, 59, 64],
		}
	}
}
