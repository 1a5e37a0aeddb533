use crate::osu::difficulty::{evaluators::RhythmEvaluator, object::OsuDifficultyObject};

define_skill! {
    #[derive(Clone)]
    pub struct Rhythm: StrainDecaySkill => [OsuDifficultyObject<'a>][OsuDifficultyObject<'a>] {
        hit_window: f64 = hit_window,
    }

    pub fn new(hit_window: f64);
}

impl Rhythm {
    const SKILL_MULTIPLIER: f64 = 7.5;
    const STRAIN_DECAY_BASE: f64 = 0.3;

    fn strain_value_of<'a>(
        &self,
        curr: &'a OsuDifficultyObject<'a>,
        objects: &'a [OsuDifficultyObject<'a>],
    ) -> f64 {
        // The evaluator's baseline of 1 carries no complexity
        RhythmEvaluator::evaluate_diff_of(curr, objects, self.hit_window) - 1.0
    }
}
