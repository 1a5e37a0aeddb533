use crate::{
    osu::difficulty::object::{IDifficultyObject, OsuDifficultyObject},
    util::difficulty::{bpm_to_milliseconds, milliseconds_to_bpm},
};

pub struct SpeedEvaluator;

impl SpeedEvaluator {
    // 1.25 circles distance between centers
    const SINGLE_SPACING_THRESHOLD: f64 = OsuDifficultyObject::NORMALIZED_DIAMETER as f64 * 1.25;
    const MIN_SPEED_BONUS: f64 = 200.0; // 200 BPM 1/4th
    const SPEED_BALANCING_FACTOR: f64 = 40.0;
    const DIST_MULTIPLIER: f64 = 0.9;

    /// Evaluates the difficulty of tapping the current object, based on:
    ///
    /// - time between pressing the previous and current object,
    /// - distance between those objects,
    /// - and how easily they can be doubletapped.
    pub fn evaluate_diff_of<'a>(
        curr: &'a OsuDifficultyObject<'a>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        hit_window: f64,
        autopilot: bool,
    ) -> f64 {
        let travel_dist = curr
            .previous(0, diff_objects)
            .map_or(0.0, |obj| obj.travel_dist);

        let dist = travel_dist + curr.min_jump_dist;

        Self::evaluate_tap(curr, diff_objects, curr.strain_time, dist, hit_window, autopilot)
    }

    /// Evaluates tapping the current object with a hand whose previous tap
    /// was `last`.
    pub fn evaluate_hand_tap<'a>(
        curr: &'a OsuDifficultyObject<'a>,
        last: &OsuDifficultyObject<'_>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        hit_window: f64,
        autopilot: bool,
    ) -> f64 {
        let strain_time = (curr.start_time - last.start_time).max(OsuDifficultyObject::MIN_DELTA_TIME);
        let dist = f64::from((curr.cursor_start - last.cursor_end).length());

        Self::evaluate_tap(curr, diff_objects, strain_time, dist, hit_window, autopilot)
    }

    fn evaluate_tap<'a>(
        curr: &'a OsuDifficultyObject<'a>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        mut strain_time: f64,
        dist: f64,
        hit_window: f64,
        autopilot: bool,
    ) -> f64 {
        if curr.base.is_spinner() {
            return 0.0;
        }

        let osu_next_obj = curr.next(0, diff_objects);
        let doubletapness = 1.0 - curr.get_doubletapness(osu_next_obj, hit_window);

        // Cap the interval to the great hit window; 0.93 keeps 260bpm OD8
        // streams intact while 0.92 limits the cap's effect
        strain_time /= ((strain_time / hit_window) / 0.93).clamp(0.92, 1.0);

        let speed_bonus = if milliseconds_to_bpm(strain_time, None) > Self::MIN_SPEED_BONUS {
            let base = (bpm_to_milliseconds(Self::MIN_SPEED_BONUS, None) - strain_time)
                / Self::SPEED_BALANCING_FACTOR;

            0.75 * base.powf(2.0)
        } else {
            0.0
        };

        let dist = Self::SINGLE_SPACING_THRESHOLD.min(dist);

        let dist_bonus = if autopilot {
            0.0
        } else {
            (dist / Self::SINGLE_SPACING_THRESHOLD).powf(3.95) * Self::DIST_MULTIPLIER
        };

        let difficulty = (1.0 + speed_bonus + dist_bonus) * 1000.0 / strain_time;

        difficulty * doubletapness
    }
}
