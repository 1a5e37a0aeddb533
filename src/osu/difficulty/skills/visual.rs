use crate::osu::difficulty::{evaluators::VisualEvaluator, object::OsuDifficultyObject};

define_skill! {
    #[derive(Clone)]
    pub struct Visual: StrainDecaySkill => [OsuDifficultyObject<'a>][OsuDifficultyObject<'a>] {
        has_hidden_mod: bool = has_hidden_mod,
        evaluator: VisualEvaluator = evaluator,
    }

    pub fn new(has_hidden_mod: bool, evaluator: VisualEvaluator);
}

impl Visual {
    const SKILL_MULTIPLIER: f64 = 0.2;
    const STRAIN_DECAY_BASE: f64 = 0.15;

    fn strain_value_of<'a>(
        &self,
        curr: &'a OsuDifficultyObject<'a>,
        objects: &'a [OsuDifficultyObject<'a>],
    ) -> f64 {
        self.evaluator
            .evaluate_diff_of(curr, objects, self.has_hidden_mod)
    }
}
