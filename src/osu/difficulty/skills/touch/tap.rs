use crate::osu::difficulty::{
    evaluators::RhythmEvaluator,
    object::{HasStartTime, IDifficultyObject, OsuDifficultyObject},
    skills::{
        strain::{relevant_strain_count, strain_decay, StrainSkill},
        tap::Tap,
    },
};

use super::{SpeedFocus, TouchBeam};

define_skill! {
    /// Tap skill on touch devices.
    #[derive(Clone)]
    pub struct TouchTap: StrainSkill => [OsuDifficultyObject<'a>][OsuDifficultyObject<'a>] {
        current_strain: f64 = 0.0,
        current_rhythm: f64 = 0.0,
        hit_window: f64 = hit_window,
        beam: TouchBeam<SpeedFocus> = TouchBeam::new(true, hit_window, has_autopilot_mod),
    }

    pub fn new(hit_window: f64, has_autopilot_mod: bool);
}

impl TouchTap {
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
            * strain_decay(time - prev_start_time, Tap::STRAIN_DECAY_BASE)
    }

    fn strain_value_at<'a>(
        &mut self,
        curr: &'a OsuDifficultyObject<'a>,
        objects: &'a [OsuDifficultyObject<'a>],
    ) -> f64 {
        self.current_strain = self.beam.process(curr, objects);
        self.current_rhythm = RhythmEvaluator::evaluate_diff_of(curr, objects, self.hit_window);

        self.current_strain * self.current_rhythm
    }

    /// Amount of notes weighted by their strain.
    pub fn relevant_note_count(&self) -> f64 {
        relevant_strain_count(self.object_strains().as_slice())
    }
}
