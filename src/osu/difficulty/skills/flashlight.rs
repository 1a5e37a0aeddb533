use crate::{
    osu::difficulty::{evaluators::FlashlightEvaluator, object::OsuDifficultyObject},
    util::strains_vec::StrainsVec,
};

define_skill! {
    #[derive(Clone)]
    pub struct Flashlight: StrainDecaySkill => [OsuDifficultyObject<'a>][OsuDifficultyObject<'a>] {
        has_hidden_mod: bool = has_hidden_mod,
        evaluator: FlashlightEvaluator = evaluator,
    }

    pub fn new(has_hidden_mod: bool, evaluator: FlashlightEvaluator);
}

impl Flashlight {
    const SKILL_MULTIPLIER: f64 = 0.0078;
    const STRAIN_DECAY_BASE: f64 = 0.15;

    fn strain_value_of<'a>(
        &self,
        curr: &'a OsuDifficultyObject<'a>,
        objects: &'a [OsuDifficultyObject<'a>],
    ) -> f64 {
        self.evaluator
            .evaluate_diff_of(curr, objects, self.has_hidden_mod)
    }

    // Shadows `StrainSkill::difficulty_value`
    fn difficulty_value(current_strain_peaks: StrainsVec) -> f64 {
        current_strain_peaks.sum()
    }
}
