use std::cmp;

use crate::osu::{
    difficulty::object::{IDifficultyObject, OsuDifficultyObject},
    object::OsuObjectKind,
};

#[derive(Copy, Clone)]
pub struct FlashlightEvaluator {
    scaling_factor: f64,
    time_preempt: f64,
    time_fade_in: f64,
}

impl FlashlightEvaluator {
    const MAX_OPACITY_BONUS: f64 = 0.4;
    const HIDDEN_BONUS: f64 = 0.2;

    const MIN_VELOCITY: f64 = 0.5;
    const SLIDER_MULTIPLIER: f64 = 1.3;

    const MIN_ANGLE_MULTIPLIER: f64 = 0.2;

    const MAX_HISTORY: usize = 10;

    pub const fn new(scaling_factor: f64, time_preempt: f64, time_fade_in: f64) -> Self {
        Self {
            scaling_factor,
            time_preempt,
            time_fade_in,
        }
    }

    /// Evaluates the memory demand of the current object, based on
    /// distances to previous objects, their visibility, and slider travel.
    pub fn evaluate_diff_of<'a>(
        &self,
        curr: &'a OsuDifficultyObject<'a>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        hidden: bool,
    ) -> f64 {
        if curr.base.is_spinner() {
            return 0.0;
        }

        let mut small_dist_nerf = 1.0;
        let mut cumulative_strain_time = 0.0;
        let mut angle_repeat_count = 0.0;
        let mut memory = 0.0;

        let mut newer = curr;

        // Walk back in time from the current object
        for i in 0..cmp::min(curr.idx, Self::MAX_HISTORY) {
            let Some(prev) = curr.previous(i, diff_objects) else {
                break;
            };

            if !prev.base.is_spinner() {
                let jump_dist = f64::from(
                    (curr.base.stacked_pos() - prev.base.stacked_end_pos()).length(),
                );
                cumulative_strain_time += newer.strain_time;

                // Objects within the flashlight radius are easy to see
                if i == 0 {
                    small_dist_nerf = (jump_dist / 75.0).min(1.0);
                }

                // Only the first object of a stack counts
                let stack_nerf = (prev.lazy_jump_dist / self.scaling_factor / 25.0).min(1.0);

                let opacity = curr.opacity_at(
                    prev.base.start_time,
                    hidden,
                    self.time_preempt,
                    self.time_fade_in,
                );
                let opacity_bonus = 1.0 + Self::MAX_OPACITY_BONUS * (1.0 - opacity);

                memory += stack_nerf * opacity_bonus * self.scaling_factor * jump_dist
                    / cumulative_strain_time;

                let repeated_angle = prev
                    .angle
                    .zip(curr.angle)
                    .is_some_and(|(prev_angle, curr_angle)| {
                        (prev_angle - curr_angle).abs() < 0.02
                    });

                // Older repetitions count less
                if repeated_angle {
                    angle_repeat_count += (1.0 - 0.1 * i as f64).max(0.0);
                }
            }

            newer = prev;
        }

        let mut strain = (small_dist_nerf * memory).powf(2.0);

        // No approach circles with hidden
        if hidden {
            strain *= 1.0 + Self::HIDDEN_BONUS;
        }

        strain *= Self::MIN_ANGLE_MULTIPLIER
            + (1.0 - Self::MIN_ANGLE_MULTIPLIER) / (angle_repeat_count + 1.0);

        strain + self.slider_bonus(curr) * Self::SLIDER_MULTIPLIER
    }

    fn slider_bonus(&self, curr: &OsuDifficultyObject<'_>) -> f64 {
        let OsuObjectKind::Slider(ref slider) = curr.base.kind else {
            return 0.0;
        };

        // Travel distance independent of circle size
        let pixel_travel_dist = f64::from(slider.lazy_travel_dist) / self.scaling_factor;

        let velocity = pixel_travel_dist / curr.travel_time - Self::MIN_VELOCITY;

        // Longer sliders require more memorisation
        let bonus = velocity.max(0.0).powf(0.5) * pixel_travel_dist;

        match slider.repeat_count() {
            0 => bonus,
            repeats => bonus / (repeats + 1) as f64,
        }
    }
}
