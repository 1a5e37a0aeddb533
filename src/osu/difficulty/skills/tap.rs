use crate::osu::difficulty::{
    evaluators::{RhythmEvaluator, SpeedEvaluator},
    object::{HasStartTime, IDifficultyObject, OsuDifficultyObject},
};

use super::strain::{relevant_strain_count, strain_decay, StrainSkill};

define_skill! {
    #[derive(Clone)]
    pub struct Tap: StrainSkill => [OsuDifficultyObject<'a>][OsuDifficultyObject<'a>] {
        current_strain: f64 = 0.0,
        current_rhythm: f64 = 0.0,
        hit_window: f64 = hit_window,
        has_autopilot_mod: bool = has_autopilot_mod,
    }

    pub fn new(hit_window: f64, has_autopilot_mod: bool);
}

impl Tap {
    pub const SKILL_MULTIPLIER: f64 = 0.205;
    pub const STRAIN_DECAY_BASE: f64 = 0.3;
    const REDUCED_SECTION_COUNT: usize = 5;

    fn calculate_initial_strain(
        &self,
        time: f64,
        curr: &OsuDifficultyObject<'_>,
        objects: &[OsuDifficultyObject<'_>],
    ) -> f64 {
        let prev_start_time = curr
            .previous(0, objects)
            .map_or(0.0, HasStartTime::start_time);

        (self.current_strain * self.current_rhythm)
            * strain_decay(time - prev_start_time, Self::STRAIN_DECAY_BASE)
    }

    fn strain_value_at<'a>(
        &mut self,
        curr: &'a OsuDifficultyObject<'a>,
        objects: &'a [OsuDifficultyObject<'a>],
    ) -> f64 {
        self.current_strain *= strain_decay(curr.strain_time, Self::STRAIN_DECAY_BASE);
        self.current_strain += SpeedEvaluator::evaluate_diff_of(
            curr,
            objects,
            self.hit_window,
            self.has_autopilot_mod,
        ) * Self::SKILL_MULTIPLIER;
        self.current_rhythm = RhythmEvaluator::evaluate_diff_of(curr, objects, self.hit_window);

        self.current_strain * self.current_rhythm
    }

    /// Amount of notes weighted by their strain.
    pub fn relevant_note_count(&self) -> f64 {
        relevant_strain_count(self.object_strains().as_slice())
    }
}
