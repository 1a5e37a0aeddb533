use crate::model::mods::Mods;

use super::DIFFICULTY_MULTIPLIER;

const PERFORMANCE_BASE_MULTIPLIER: f64 = 0.0675;
const STAR_RATING_MULTIPLIER: f64 = 0.027;
const NORM_EXPONENT: f64 = 1.1;

/// Aggregated difficulty values of all skills, i.e. before they're turned
/// into ratings.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SkillValues {
    pub aim: f64,
    pub aim_no_sliders: f64,
    pub tap: f64,
    pub rhythm: f64,
    pub flashlight: f64,
    pub visual: f64,
}

/// Ratings of all skills and the resulting star rating.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ratings {
    pub aim: f64,
    pub aim_no_sliders: f64,
    pub tap: f64,
    pub rhythm: f64,
    pub flashlight: f64,
    pub visual: f64,
    pub slider_factor: f64,
    pub stars: f64,
}

impl SkillValues {
    /// Turn the skill values into ratings and compose them into a star
    /// rating.
    pub fn ratings(&self, mods: u32) -> Ratings {
        let mut aim = rating(self.aim);
        let aim_no_sliders = rating(self.aim_no_sliders);
        let mut tap = rating(self.tap);
        let mut rhythm = rating(self.rhythm);
        let mut flashlight = rating(self.flashlight);
        let mut visual = rating(self.visual);

        let slider_factor = if aim > 0.0 {
            aim_no_sliders / aim
        } else {
            1.0
        };

        if mods.rx() {
            aim *= 0.9;
            tap = 0.0;
            rhythm = 0.0;
            visual = 0.0;
            flashlight *= 0.7;
        }

        let aim_performance = skill_performance(aim.powf(0.8));
        let tap_performance = skill_performance(tap);
        let visual_performance = visual.powf(1.6) * 22.5;

        let flashlight_performance = if mods.fl() {
            flashlight.powf(1.6) * 25.0
        } else {
            0.0
        };

        let base_performance = (aim_performance.powf(NORM_EXPONENT)
            + tap_performance.powf(NORM_EXPONENT)
            + flashlight_performance.powf(NORM_EXPONENT)
            + visual_performance.powf(NORM_EXPONENT))
        .powf(NORM_EXPONENT.recip());

        let stars = if base_performance > 0.00001 {
            STAR_RATING_MULTIPLIER
                * ((100_000.0 / 2.0_f64.powf(NORM_EXPONENT.recip()) * base_performance).cbrt()
                    + 4.0)
        } else {
            0.0
        };

        Ratings {
            aim,
            aim_no_sliders,
            tap,
            rhythm,
            flashlight,
            visual,
            slider_factor,
            stars,
        }
    }
}

fn rating(difficulty_value: f64) -> f64 {
    difficulty_value.sqrt() * DIFFICULTY_MULTIPLIER
}

fn skill_performance(rating: f64) -> f64 {
    (5.0 * (rating / PERFORMANCE_BASE_MULTIPLIER).max(1.0) - 4.0).powf(3.0) / 100_000.0
}
