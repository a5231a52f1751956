//! Camelot wheel key normalization and harmonic compatibility
//!
//! The wheel has 24 positions: numbers 1-12 around the circle of fifths,
//! `A` for minor keys and `B` for major keys. A position is compatible
//! with itself, the opposite mode at the same number, and the two numeric
//! neighbors in its own mode.

use super::NEUTRAL_SCORE;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Exact wheel position match
pub const KEY_EXACT_SCORE: f64 = 100.0;

/// Wheel-adjacent match
pub const KEY_ADJACENT_SCORE: f64 = 85.0;

/// No declared key is compatible
pub const KEY_CLASH_SCORE: f64 = 30.0;

/// Camelot number by pitch class (C = 0) for major keys
const MAJOR_NUMBERS: [u8; 12] = [8, 3, 10, 5, 12, 7, 2, 9, 4, 11, 6, 1];

/// Camelot number by pitch class (C = 0) for minor keys
const MINOR_NUMBERS: [u8; 12] = [5, 12, 7, 2, 9, 4, 11, 6, 1, 8, 3, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// `A` side of the wheel
    Minor,
    /// `B` side of the wheel
    Major,
}

impl Mode {
    pub fn letter(&self) -> char {
        match self {
            Mode::Minor => 'A',
            Mode::Major => 'B',
        }
    }

    pub fn opposite(&self) -> Mode {
        match self {
            Mode::Minor => Mode::Major,
            Mode::Major => Mode::Minor,
        }
    }
}

/// One of the 24 wheel positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CamelotKey {
    number: u8,
    mode: Mode,
}

impl CamelotKey {
    /// Build a position; `number` must be 1-12
    pub fn new(number: u8, mode: Mode) -> Option<Self> {
        (1..=12).contains(&number).then_some(Self { number, mode })
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Normalize a key label onto the wheel
    ///
    /// Accepts Camelot codes (`8A`, `12b`) and standard names with any of
    /// the usual mode spellings: `C`, `Cmaj`, `C major`, `Am`, `Amin`,
    /// `A minor`, `F#m`, `Gb`, `B♭ minor`. Unrecognized labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        parse_camelot_code(label).or_else(|| parse_standard_key(label))
    }

    /// The three positions harmonically adjacent to this one
    pub fn neighbors(&self) -> [CamelotKey; 3] {
        let up = self.number % 12 + 1;
        let down = (self.number + 10) % 12 + 1;
        [
            CamelotKey {
                number: self.number,
                mode: self.mode.opposite(),
            },
            CamelotKey {
                number: up,
                mode: self.mode,
            },
            CamelotKey {
                number: down,
                mode: self.mode,
            },
        ]
    }

    /// Whether `other` is one of this position's neighbors
    pub fn is_adjacent(&self, other: &CamelotKey) -> bool {
        self.neighbors().contains(other)
    }

    /// Whether `other` is this position or one of its neighbors
    pub fn is_compatible(&self, other: &CamelotKey) -> bool {
        self == other || self.is_adjacent(other)
    }
}

impl std::fmt::Display for CamelotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.number, self.mode.letter())
    }
}

fn parse_camelot_code(label: &str) -> Option<CamelotKey> {
    let trimmed = label.trim().to_ascii_uppercase();
    let letter = trimmed.chars().last()?;
    let mode = match letter {
        'A' => Mode::Minor,
        'B' => Mode::Major,
        _ => return None,
    };
    let number: u8 = trimmed[..trimmed.len() - 1].trim().parse().ok()?;
    CamelotKey::new(number, mode)
}

fn parse_standard_key(label: &str) -> Option<CamelotKey> {
    let compact: String = label
        .trim()
        .replace('\u{266F}', "#")
        .replace('\u{266D}', "b")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .collect();
    let lower = compact.to_ascii_lowercase();

    let (root, mode) = if let Some(root) = strip_mode_suffix(&compact, &lower, "minor") {
        (root, Mode::Minor)
    } else if let Some(root) = strip_mode_suffix(&compact, &lower, "min") {
        (root, Mode::Minor)
    } else if let Some(root) = strip_mode_suffix(&compact, &lower, "major") {
        (root, Mode::Major)
    } else if let Some(root) = strip_mode_suffix(&compact, &lower, "maj") {
        (root, Mode::Major)
    } else if let Some(root) = strip_mode_suffix(&compact, &lower, "m") {
        (root, Mode::Minor)
    } else {
        (compact.as_str(), Mode::Major)
    };

    let pitch_class = pitch_class(root)?;
    let number = match mode {
        Mode::Major => MAJOR_NUMBERS[pitch_class],
        Mode::Minor => MINOR_NUMBERS[pitch_class],
    };
    CamelotKey::new(number, mode)
}

/// Strip `suffix` (matched case-insensitively) when something precedes it
fn strip_mode_suffix<'a>(compact: &'a str, lower: &str, suffix: &str) -> Option<&'a str> {
    if lower.len() > suffix.len() && lower.ends_with(suffix) {
        Some(&compact[..compact.len() - suffix.len()])
    } else {
        None
    }
}

/// Pitch class (C = 0) of a root such as `C`, `F#`, `Bb`
fn pitch_class(root: &str) -> Option<usize> {
    let mut chars = root.chars();
    let natural: i32 = match chars.next()?.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    let shift = match chars.next() {
        None => 0,
        Some('#') => 1,
        Some('b') => -1,
        Some(_) => return None,
    };
    if chars.next().is_some() {
        return None;
    }
    Some((natural + shift).rem_euclid(12) as usize)
}

/// Score one track key against a template's declared compatible keys
///
/// Exact position → 100, adjacent position → 85, otherwise 30. A missing
/// or unmapped track key, or a template without any mappable key, is
/// neutral (50). The best match over all declared keys wins.
pub fn score_key(track_key: Option<&str>, compatible_keys: &[String]) -> f64 {
    let Some(track) = track_key.and_then(CamelotKey::parse) else {
        if let Some(label) = track_key {
            trace!("Unmapped track key '{}', scoring neutral", label);
        }
        return NEUTRAL_SCORE;
    };

    let declared: Vec<CamelotKey> = compatible_keys
        .iter()
        .filter_map(|label| {
            let key = CamelotKey::parse(label);
            if key.is_none() {
                trace!("Ignoring unmapped template key '{}'", label);
            }
            key
        })
        .collect();

    if declared.is_empty() {
        return NEUTRAL_SCORE;
    }

    if declared.contains(&track) {
        KEY_EXACT_SCORE
    } else if declared.iter().any(|key| key.is_adjacent(&track)) {
        KEY_ADJACENT_SCORE
    } else {
        KEY_CLASH_SCORE
    }
}
