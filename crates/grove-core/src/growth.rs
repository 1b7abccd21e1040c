//! Growth model: elapsed focus time mapped to a discrete tree stage.
//!
//! The tree advances one level every 300 seconds regardless of the
//! configured session duration, capped at level 5. With a short session
//! the tree may never leave level 1; with a long one it tops out before
//! completion. Neither case is clamped to the completion time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Seconds of elapsed focus per growth level.
pub const SECS_PER_LEVEL: u64 = 300;

/// Highest growth level a tree can reach.
pub const MAX_LEVEL: u8 = 5;

/// Session category. Each category grows its own species of tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Study,
    Work,
    Creative,
    Exercise,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Study => "study",
            Category::Work => "work",
            Category::Creative => "creative",
            Category::Exercise => "exercise",
        }
    }

    pub const ALL: [Category; 4] = [
        Category::Study,
        Category::Work,
        Category::Creative,
        Category::Exercise,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "study" => Ok(Category::Study),
            "work" => Ok(Category::Work),
            "creative" => Ok(Category::Creative),
            "exercise" => Ok(Category::Exercise),
            other => Err(ValidationError::UnknownCategory(other.to_string())),
        }
    }
}

/// One immutable stage in a category's five-step growth table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrowthStage {
    pub level: u8,
    pub name: &'static str,
    pub color: &'static str,
    pub symbol: &'static str,
}

const STUDY_STAGES: [GrowthStage; 5] = [
    GrowthStage { level: 1, name: "Sapling", color: "#7cb342", symbol: "\u{1F331}" },
    GrowthStage { level: 2, name: "Young Tree", color: "#8bc34a", symbol: "\u{1F33F}" },
    GrowthStage { level: 3, name: "Tree", color: "#9ccc65", symbol: "\u{1F333}" },
    GrowthStage { level: 4, name: "Mighty Oak", color: "#52b788", symbol: "\u{1F332}" },
    GrowthStage { level: 5, name: "Ancient Forest", color: "#2d5016", symbol: "\u{1F38B}" },
];

const WORK_STAGES: [GrowthStage; 5] = [
    GrowthStage { level: 1, name: "Sprout", color: "#ff9800", symbol: "\u{1F331}" },
    GrowthStage { level: 2, name: "Seedling", color: "#ff9100", symbol: "\u{1F33F}" },
    GrowthStage { level: 3, name: "Sapling", color: "#ff8500", symbol: "\u{1F333}" },
    GrowthStage { level: 4, name: "Redwood", color: "#ff7500", symbol: "\u{1F332}" },
    GrowthStage { level: 5, name: "Ancient Redwood", color: "#ff6500", symbol: "\u{1F38B}" },
];

const CREATIVE_STAGES: [GrowthStage; 5] = [
    GrowthStage { level: 1, name: "Bud", color: "#e91e63", symbol: "\u{1F331}" },
    GrowthStage { level: 2, name: "Blooming Flower", color: "#ec407a", symbol: "\u{1F338}" },
    GrowthStage { level: 3, name: "Flowering Tree", color: "#f06292", symbol: "\u{1F33A}" },
    GrowthStage { level: 4, name: "Blossom Paradise", color: "#f48fb1", symbol: "\u{1F33C}" },
    GrowthStage { level: 5, name: "Cherry Blossom", color: "#f8bbd0", symbol: "\u{1F338}" },
];

const EXERCISE_STAGES: [GrowthStage; 5] = [
    GrowthStage { level: 1, name: "Sprout", color: "#00bcd4", symbol: "\u{1F331}" },
    GrowthStage { level: 2, name: "Growing Plant", color: "#00acc1", symbol: "\u{1F33F}" },
    GrowthStage { level: 3, name: "Palm Tree", color: "#0097a7", symbol: "\u{1F334}" },
    GrowthStage { level: 4, name: "Coconut Tree", color: "#00838f", symbol: "\u{1F334}" },
    GrowthStage { level: 5, name: "Tropical Paradise", color: "#006064", symbol: "\u{1F3DD}" },
];

/// The five growth stages for a category, ordered by level.
pub fn stages(category: Category) -> &'static [GrowthStage; 5] {
    match category {
        Category::Study => &STUDY_STAGES,
        Category::Work => &WORK_STAGES,
        Category::Creative => &CREATIVE_STAGES,
        Category::Exercise => &EXERCISE_STAGES,
    }
}

/// Growth level for an elapsed focus time: one level per 300 s, capped at 5.
///
/// Monotonic non-decreasing in `elapsed_secs`.
pub fn growth_level(elapsed_secs: u64) -> u8 {
    let level = elapsed_secs / SECS_PER_LEVEL + 1;
    level.min(u64::from(MAX_LEVEL)) as u8
}

/// Look up the stage record for a category and level.
///
/// # Errors
///
/// Returns `ValidationError::LevelOutOfRange` when `level` is outside 1..=5.
pub fn stage(category: Category, level: u8) -> Result<&'static GrowthStage, ValidationError> {
    if !(1..=MAX_LEVEL).contains(&level) {
        return Err(ValidationError::LevelOutOfRange(level));
    }
    Ok(&stages(category)[usize::from(level) - 1])
}
