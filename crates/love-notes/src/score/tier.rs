use serde::{Deserialize, Serialize};

use super::LoveScore;

/// Message band a score falls into, checked top-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Cosmic,
    Great,
    Promising,
    SlowBurn,
    Friends,
}

impl ScoreTier {
    const LADDER: [(u8, ScoreTier); 4] = [
        (90, ScoreTier::Cosmic),
        (75, ScoreTier::Great),
        (50, ScoreTier::Promising),
        (25, ScoreTier::SlowBurn),
    ];

    pub fn for_score(score: LoveScore) -> Self {
        Self::LADDER
            .iter()
            .find(|(floor, _)| score.value() >= *floor)
            .map(|(_, tier)| *tier)
            .unwrap_or(ScoreTier::Friends)
    }

    /// Short categorical name.
    pub fn label(self) -> &'static str {
        match self {
            ScoreTier::Cosmic => "cosmic match",
            ScoreTier::Great => "great pair",
            ScoreTier::Promising => "promising",
            ScoreTier::SlowBurn => "take it slow",
            ScoreTier::Friends => "cute / best friends",
        }
    }

    /// Display message shown under the percentage.
    pub fn message(self) -> &'static str {
        match self {
            ScoreTier::Cosmic => "A cosmic match! 💫",
            ScoreTier::Great => "Great pair — lots of sparks! ✨",
            ScoreTier::Promising => "Promising — could grow with care 💕",
            ScoreTier::SlowBurn => "Take it slow — interesting dynamics ⚖️",
            ScoreTier::Friends => "Cute — maybe best friends? 🌱",
        }
    }
}
