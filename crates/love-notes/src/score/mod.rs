//! Deterministic compatibility score for a pair of names.
//!
//! The same pair always produces the same score, in either order. The
//! constants below are part of the public contract: changing any of them
//! silently changes every historical score.

mod hash;
mod tier;

pub use hash::{name_hash, normalize};
pub use tier::ScoreTier;

use serde::{Deserialize, Serialize};
use std::fmt;

use hash::{fold_hashes, name_len};

/// Shown when either name is blank.
pub const VALIDATION_MESSAGE: &str = "Please enter both names.";

const LENGTH_BOOST_CAP: usize = 10;
const MAX_SCORE: u8 = 100;

/// Percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LoveScore(u8);

impl LoveScore {
    pub fn new(value: u8) -> Option<Self> {
        (value <= MAX_SCORE).then_some(Self(value))
    }

    fn clamped(raw: i32) -> Self {
        Self(raw.clamp(0, i32::from(MAX_SCORE)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn tier(self) -> ScoreTier {
        ScoreTier::for_score(self)
    }
}

impl fmt::Display for LoveScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl From<LoveScore> for u8 {
    fn from(value: LoveScore) -> Self {
        value.0
    }
}

impl TryFrom<u8> for LoveScore {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        LoveScore::new(value).ok_or_else(|| format!("score {value} exceeds {MAX_SCORE}"))
    }
}

/// Which of the two inputs was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSlot {
    First,
    Second,
}

impl fmt::Display for NameSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameSlot::First => f.write_str("first"),
            NameSlot::Second => f.write_str("second"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    #[error("{0} name is empty after trimming")]
    EmptyName(NameSlot),
}

/// Scores a pair of names.
///
/// Both names are normalized first; a blank name yields
/// [`ScoreError::EmptyName`] and no score.
pub fn love_score(name_a: &str, name_b: &str) -> Result<LoveScore, ScoreError> {
    let a = normalize(name_a);
    let b = normalize(name_b);
    if a.is_empty() {
        return Err(ScoreError::EmptyName(NameSlot::First));
    }
    if b.is_empty() {
        return Err(ScoreError::EmptyName(NameSlot::Second));
    }

    let combined = fold_hashes(name_hash(&a), name_hash(&b));
    let length_boost = name_len(&a).abs_diff(name_len(&b)).min(LENGTH_BOOST_CAP) as i32;

    Ok(LoveScore::clamped(combined + length_boost))
}

/// Display message for a score.
pub fn message(score: LoveScore) -> &'static str {
    score.tier().message()
}

/// Serializable result handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReading {
    pub score: LoveScore,
    pub tier: ScoreTier,
    pub message: &'static str,
}

impl From<LoveScore> for ScoreReading {
    fn from(score: LoveScore) -> Self {
        let tier = score.tier();
        Self {
            score,
            tier,
            message: tier.message(),
        }
    }
}

impl ScoreReading {
    pub fn for_names(name_a: &str, name_b: &str) -> Result<Self, ScoreError> {
        love_score(name_a, name_b).map(Self::from)
    }

    /// Two-line summary used by the CLI.
    pub fn headline(&self) -> String {
        format!("💖 {} 💖\n{}", self.score, self.message)
    }
}
