use crate::osu::difficulty::{
    evaluators::AimEvaluator,
    object::{HasStartTime, IDifficultyObject, OsuDifficultyObject},
};

use super::strain::{relevant_strain_count, strain_decay};

define_skill! {
    #[derive(Clone)]
    pub struct Aim: StrainSkill => [OsuDifficultyObject<'a>][OsuDifficultyObject<'a>] {
        current_strain: f64 = 0.0,
        slider_strains: Vec<f64> = Vec::with_capacity(64),
        include_sliders: bool = include_sliders,
    }

    pub fn new(include_sliders: bool);
}

impl Aim {
    pub const SKILL_MULTIPLIER: f64 = 3.7;
    pub const STRAIN_DECAY_BASE: f64 = 0.15;

    fn calculate_initial_strain(
        &self,
        time: f64,
        curr: &OsuDifficultyObject<'_>,
        objects: &[OsuDifficultyObject<'_>],
    ) -> f64 {
        let prev_start_time = curr
            .previous(0, objects)
            .map_or(0.0, HasStartTime::start_time);

        self.current_strain * strain_decay(time - prev_start_time, Self::STRAIN_DECAY_BASE)
    }

    fn strain_value_at(
        &mut self,
        curr: &OsuDifficultyObject<'_>,
        objects: &[OsuDifficultyObject<'_>],
    ) -> f64 {
        self.current_strain *= strain_decay(curr.delta_time, Self::STRAIN_DECAY_BASE);
        self.current_strain += AimEvaluator::evaluate_diff_of(curr, objects, self.include_sliders)
            * Self::SKILL_MULTIPLIER;

        if curr.base.is_slider() {
            self.slider_strains.push(self.current_strain);
        }

        self.current_strain
    }

    /// Amount of sliders weighted by their strain.
    pub fn difficult_slider_count(&self) -> f64 {
        relevant_strain_count(&self.slider_strains)
    }
}
