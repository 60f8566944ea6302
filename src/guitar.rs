//! Fretboard geometry and chord-position enumeration.
//!
//! The fretboard is built once at construction time as a dense,
//! row-major-by-fret array of [`FretPosition`] values; everything else in
//! the engine reads from it without recomputing geometry.

use crate::error::{EngineError, Result};
use crate::pitch::{pitch_class, ChordMask, Pitch};
use strum::EnumIter;

/// `D(a, m, n) = -18.876616839465076 * a * (e^(-0.057762265046662105*n) -
/// e^(-0.057762265046662105*m))`. These constants encode 12-TET fret
/// spacing and must not be altered.
const FRET_DISTANCE_COEFFICIENT: f64 = -18.876616839465076;
const FRET_DISTANCE_EXPONENT: f64 = -0.057762265046662105;

fn fret_distance(a: f64, m: f64, n: f64) -> f64 {
	FRET_DISTANCE_COEFFICIENT
		* a
		* ((FRET_DISTANCE_EXPONENT * n).exp() - (FRET_DISTANCE_EXPONENT * m).exp())
}

/// Which finger (if any) occupies a fretboard position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[repr(u8)]
pub enum Finger {
	Index = 0,
	Middle = 1,
	Ring = 2,
	Pinky = 3,
}

impl Finger {
	pub fn from_index(i: u8) -> Self {
		match i {
			0 => Finger::Index,
			1 => Finger::Middle,
			2 => Finger::Ring,
			_ => Finger::Pinky,
		}
	}

	pub fn index(&self) -> usize {
		*self as usize
	}
}

/// `fingerNumber ∈ {0..3, UNDEF=-2, MUTE=-1}` from spec, realized as an enum
/// rather than raw sentinel integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FingerSlot {
	Assigned(Finger),
	Undef,
	Mute,
}

/// One cell of the fretboard grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FretPosition {
	pub fret_id: usize,
	pub string: u8,
	pub fret: u16,
	pub x: f64,
	pub y: f64,
	pub pitch: Pitch,
	pub finger: FingerSlot,
}

impl FretPosition {
	pub fn pitch_class(&self) -> u8 {
		pitch_class(self.pitch)
	}

	/// Mutes the string in place: `fret <- 0`, `pitch <- pitch - oldFret`,
	/// `fingerNumber <- MUTE`.
	pub fn muted(&self) -> FretPosition {
		FretPosition {
			fret: 0,
			pitch: self.pitch - self.fret as Pitch,
			finger: FingerSlot::Mute,
			..*self
		}
	}
}

/// A candidate fretting: a fret position plus the set of pitch classes it
/// sounds (more than one, for a barre).
#[derive(Debug, Clone, PartialEq)]
pub struct FingerPlacement {
	pub position: FretPosition,
	pub notes_sounded: ChordMask,
	pub is_barre: bool,
}

pub fn distance(a: &FretPosition, b: &FretPosition) -> f64 {
	((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Immutable guitar model: tuning, fret count, scale geometry. Built once
/// per session and shared read-only by every concurrent search task.
#[derive(Debug, Clone)]
pub struct Guitar {
	tuning: Vec<Pitch>,
	num_frets: u16,
	scale_length: f64,
	first_fret_width: f64,
	nut_width: f64,
	bridge_width: f64,
	fretboard: Vec<FretPosition>,
}

impl Guitar {
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		tuning: Vec<Pitch>,
		num_frets: u16,
		nut_width: f64,
		bridge_width: f64,
		first_fret_width: f64,
		scale_length: f64,
	) -> Result<Self> {
		if tuning.is_empty() {
			return Err(EngineError::EmptyTuning);
		}
		let string_count = tuning.len();
		let mut fretboard = Vec::with_capacity((num_frets as usize + 1) * string_count);
		for fret in 0..=num_frets {
			let x = scale_length - fret_distance(first_fret_width, 0.0, fret as f64);
			for (string, &open_pitch) in tuning.iter().enumerate() {
				let t = string as f64 / (string_count - 1).max(1) as f64;
				let y = nut_width * (1.0 - t) + bridge_width * t;
				let fret_id = fret as usize * string_count + string;
				fretboard.push(FretPosition {
					fret_id,
					string: string as u8,
					fret,
					x,
					y,
					pitch: open_pitch + fret as Pitch,
					finger: FingerSlot::Undef,
				});
			}
		}
		Ok(Guitar {
			tuning,
			num_frets,
			scale_length,
			first_fret_width,
			nut_width,
			bridge_width,
			fretboard,
		})
	}

	pub fn string_count(&self) -> usize {
		self.tuning.len()
	}

	pub fn num_frets(&self) -> u16 {
		self.num_frets
	}

	pub fn tuning(&self) -> &[Pitch] {
		&self.tuning
	}

	pub fn scale_length(&self) -> f64 {
		self.scale_length
	}

	pub fn first_fret_width(&self) -> f64 {
		self.first_fret_width
	}

	pub fn nut_width(&self) -> f64 {
		self.nut_width
	}

	pub fn bridge_width(&self) -> f64 {
		self.bridge_width
	}

	pub fn position_at(&self, string: u8, fret: u16) -> &FretPosition {
		&self.fretboard[fret as usize * self.string_count() + string as usize]
	}

	pub fn fretboard(&self) -> &[FretPosition] {
		&self.fretboard
	}

	/// Enumerates every finger placement (barre and non-barre) that sounds
	/// a pitch class in `chord`, ordered ascending by fret id.
	///
	/// Walks the fretboard from highest fret id to lowest (so, within a
	/// fret, from the highest string down), grouping consecutive same-fret
	/// hits (fret > 0, `barre_enabled`) into a single barre candidate
	/// anchored at the group's first (highest-string) member, alongside a
	/// plain single-string candidate per position. Built by pushing in
	/// descending order and reversing once at the end, so indices into the
	/// in-progress vector stay stable for in-place barre accumulation.
	pub fn find_positions(&self, chord: ChordMask, barre_enabled: bool) -> Vec<FingerPlacement> {
		let mut temp: Vec<FingerPlacement> = Vec::new();
		let mut current_fret: Option<u16> = None;
		let mut current_notes: u16 = 0;
		let mut anchor_position: Option<FretPosition> = None;
		let mut barre_idx: Option<usize> = None;

		for position in self.fretboard.iter().rev() {
			let pc = position.pitch_class();
			if !chord.contains(pc) {
				continue;
			}

			let extends = barre_enabled && position.fret > 0 && current_fret == Some(position.fret);

			if extends {
				current_notes |= 1 << pc;
				temp.push(FingerPlacement {
					position: *position,
					notes_sounded: ChordMask(1 << pc),
					is_barre: false,
				});
				match barre_idx {
					Some(i) => temp[i].notes_sounded = ChordMask(current_notes),
					None => {
						temp.push(FingerPlacement {
							position: anchor_position.expect("group has an anchor"),
							notes_sounded: ChordMask(current_notes),
							is_barre: true,
						});
						barre_idx = Some(temp.len() - 1);
					}
				}
			} else {
				current_fret = Some(position.fret);
				current_notes = 1 << pc;
				anchor_position = Some(*position);
				barre_idx = None;
				temp.push(FingerPlacement {
					position: *position,
					notes_sounded: ChordMask(current_notes),
					is_barre: false,
				});
			}
		}

		temp.reverse();
		temp
	}
}
