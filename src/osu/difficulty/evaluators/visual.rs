use crate::{
    osu::difficulty::object::{IDifficultyObject, OsuDifficultyObject},
    util::difficulty::logistic_exp,
};

/// Rates how much has to be read at once, i.e. the amount of visible upcoming
/// objects.
#[derive(Copy, Clone)]
pub struct VisualEvaluator {
    /// Clock rate independent preempt
    time_preempt: f64,
    /// Clock rate independent fade-in
    time_fade_in: f64,
    /// Clock rate adjusted preempt
    preempt: f64,
}

impl VisualEvaluator {
    const LOOKAHEAD_MAX: usize = 32;
    const HIDDEN_BONUS: f64 = 0.2;
    const HIGH_AR_PREEMPT: f64 = 450.0;
    const HIGH_AR_SPREAD: f64 = 40.0;

    pub const fn new(time_preempt: f64, time_fade_in: f64, preempt: f64) -> Self {
        Self {
            time_preempt,
            time_fade_in,
            preempt,
        }
    }

    pub fn evaluate_diff_of<'a>(
        &self,
        curr: &'a OsuDifficultyObject<'a>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        hidden: bool,
    ) -> f64 {
        if curr.base.is_spinner() {
            return 0.0;
        }

        let time = curr.base.start_time;

        let density: f64 = (0..Self::LOOKAHEAD_MAX)
            .map_while(|i| curr.next(i, diff_objects))
            .take_while(|next| next.base.start_time - time < self.time_preempt)
            .map(|next| next.opacity_at(time, hidden, self.time_preempt, self.time_fade_in))
            .sum();

        let high_ar_bonus = logistic_exp(
            (self.preempt - Self::HIGH_AR_PREEMPT) / Self::HIGH_AR_SPREAD,
            None,
        );

        let mut result = density.sqrt() * (1.0 + high_ar_bonus) * 1000.0 / curr.strain_time;

        if hidden {
            result *= 1.0 + Self::HIDDEN_BONUS;
        }

        result
    }
}
