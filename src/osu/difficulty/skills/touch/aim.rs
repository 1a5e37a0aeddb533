use crate::osu::difficulty::{
    object::{HasStartTime, IDifficultyObject, OsuDifficultyObject},
    skills::{
        aim::Aim,
        strain::{relevant_strain_count, strain_decay},
    },
};

use super::{AimFocus, TouchBeam};

define_skill! {
    /// Aim skill on touch devices.
    #[derive(Clone)]
    pub struct TouchAim: StrainSkill => [OsuDifficultyObject<'a>][OsuDifficultyObject<'a>] {
        current_strain: f64 = 0.0,
        slider_strains: Vec<f64> = Vec::with_capacity(64),
        beam: TouchBeam<AimFocus> = TouchBeam::new(include_sliders, hit_window, has_autopilot_mod),
    }

    pub fn new(include_sliders: bool, hit_window: f64, has_autopilot_mod: bool);
}

impl TouchAim {
    fn calculate_initial_strain(
        &self,
        time: f64,
        curr: &OsuDifficultyObject<'_>,
        objects: &[OsuDifficultyObject<'_>],
    ) -> f64 {
        let prev_start_time = curr
            .previous(0, objects)
            .map_or(0.0, HasStartTime::start_time);

        self.current_strain * strain_decay(time - prev_start_time, Aim::STRAIN_DECAY_BASE)
    }

    fn strain_value_at<'a>(
        &mut self,
        curr: &'a OsuDifficultyObject<'a>,
        objects: &'a [OsuDifficultyObject<'a>],
    ) -> f64 {
        self.current_strain = self.beam.process(curr, objects);

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
