use crate::{osu::OsuDifficultyAttributes, Difficulty};

pub use self::{
    attributes::{BeatmapAttributes, BeatmapAttributesBuilder, HitWindows},
    suspicious::TooSuspicious,
};

use super::hit_object::HitObject;

mod attributes;
mod suspicious;

/// All beatmap data that is relevant for difficulty calculation.
///
/// Decoding `.osu` files is not part of this crate; the hit objects are
/// expected to be provided by the caller, sorted by start time.
#[derive(Clone, Debug, PartialEq)]
pub struct Beatmap {
    // Difficulty
    pub ar: f32,
    pub cs: f32,
    pub hp: f32,
    pub od: f32,

    // HitObjects
    pub hit_objects: Vec<HitObject>,
}

impl Beatmap {
    /// Returns a [`BeatmapAttributesBuilder`] to calculate modified beatmap
    /// attributes.
    pub fn attributes(&self) -> BeatmapAttributesBuilder {
        BeatmapAttributesBuilder::new().map(self)
    }

    /// Check whether hitobjects appear too suspicious for further calculation.
    ///
    /// Sometimes a [`Beatmap`] isn't created for gameplay but rather to test
    /// the limits of osu! itself. Difficulty calculation on such maps can be
    /// very expensive or produce meaningless values, so this method serves as
    /// a heuristic to filter them out.
    pub fn check_suspicion(&self) -> Result<(), TooSuspicious> {
        match TooSuspicious::new(self) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// Shorthand for a default [`Difficulty`] calculation on this map.
    pub fn difficulty(&self) -> OsuDifficultyAttributes {
        Difficulty::new().calculate(self)
    }
}

impl Default for Beatmap {
    fn default() -> Self {
        Self {
            ar: 5.0,
            cs: 5.0,
            hp: 5.0,
            od: 5.0,
            hit_objects: Vec::new(),
        }
    }
}
