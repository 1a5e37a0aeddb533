use std::f64::consts::FRAC_PI_2;

use crate::{
    osu::difficulty::object::{IDifficultyObject, OsuDifficultyObject},
    util::{
        difficulty::{milliseconds_to_bpm, reverse_lerp, smootherstep, smoothstep},
        float_ext::FloatExt,
    },
};

pub struct AimEvaluator;

impl AimEvaluator {
    const WIDE_ANGLE_MULTIPLIER: f64 = 1.5;
    const ACUTE_ANGLE_MULTIPLIER: f64 = 2.6;
    const SLIDER_MULTIPLIER: f64 = 1.35;
    const VELOCITY_CHANGE_MULTIPLIER: f64 = 0.75;
    const WIGGLE_MULTIPLIER: f64 = 1.02;

    /// Evaluates the difficulty of aiming the current object.
    ///
    /// Accounts for the cursor velocity towards the object, wide and acute
    /// angles, wiggles, sharp velocity changes, and optionally slider travel.
    pub fn evaluate_diff_of<'a>(
        curr: &'a OsuDifficultyObject<'a>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        with_slider_travel_dist: bool,
    ) -> f64 {
        let Some((last_last, last)) = curr
            .previous(1, diff_objects)
            .zip(curr.previous(0, diff_objects))
            .filter(|(_, last)| !(curr.base.is_spinner() || last.base.is_spinner()))
        else {
            return 0.0;
        };

        let curr_vel = Self::velocity(curr, last, with_slider_travel_dist);
        let prev_vel = Self::velocity(last, last_last, with_slider_travel_dist);

        let same_rhythm = curr.strain_time.max(last.strain_time)
            < 1.25 * curr.strain_time.min(last.strain_time);

        let AngleBonuses {
            wide,
            acute,
            wiggle,
        } = match curr.angle.zip(last.angle) {
            Some((curr_angle, last_angle)) if same_rhythm => {
                AngleBonuses::new(curr, last, curr_angle, last_angle, curr_vel.min(prev_vel))
            }
            _ => AngleBonuses::default(),
        };

        let vel_change = if prev_vel.max(curr_vel).not_eq(0.0) {
            Self::velocity_change_bonus(curr, last, last_last)
        } else {
            0.0
        };

        let mut aim_strain = curr_vel + wiggle * Self::WIGGLE_MULTIPLIER;

        aim_strain += (acute * Self::ACUTE_ANGLE_MULTIPLIER).max(
            wide * Self::WIDE_ANGLE_MULTIPLIER + vel_change * Self::VELOCITY_CHANGE_MULTIPLIER,
        );

        if with_slider_travel_dist && last.base.is_slider() {
            aim_strain += last.travel_dist / last.travel_time * Self::SLIDER_MULTIPLIER;
        }

        aim_strain
    }

    /// Cursor velocity from `prev` to `obj`.
    ///
    /// If `prev` is a slider and its travel counts, the velocity through the
    /// slider is taken into account as well.
    fn velocity(
        obj: &OsuDifficultyObject<'_>,
        prev: &OsuDifficultyObject<'_>,
        with_slider_travel_dist: bool,
    ) -> f64 {
        let jump_vel = obj.lazy_jump_dist / obj.strain_time;

        if with_slider_travel_dist && prev.base.is_slider() {
            let travel_vel = prev.travel_dist / prev.travel_time;
            let movement_vel = obj.min_jump_dist / obj.min_jump_time;

            jump_vel.max(movement_vel + travel_vel)
        } else {
            jump_vel
        }
    }

    /// Bonus for changing velocities between overlapping-ish objects,
    /// penalized by rhythm changes.
    fn velocity_change_bonus(
        curr: &OsuDifficultyObject<'_>,
        last: &OsuDifficultyObject<'_>,
        last_last: &OsuDifficultyObject<'_>,
    ) -> f64 {
        let diameter = f64::from(OsuDifficultyObject::NORMALIZED_DIAMETER);

        // Velocities averaged over the whole object including slider travel
        let prev_vel = (last.lazy_jump_dist + last_last.travel_dist) / last.strain_time;
        let curr_vel = (curr.lazy_jump_dist + last.travel_dist) / curr.strain_time;
        let vel_diff = (prev_vel - curr_vel).abs();

        let dist_ratio = (FRAC_PI_2 * vel_diff / prev_vel.max(curr_vel)).sin().powf(2.0);

        let min_strain_time = curr.strain_time.min(last.strain_time);
        let max_strain_time = curr.strain_time.max(last.strain_time);

        let overlap_vel_buff = (diameter * 1.25 / min_strain_time).min(vel_diff);

        overlap_vel_buff * dist_ratio * (min_strain_time / max_strain_time).powf(2.0)
    }

    /// Aim difficulty of a single hand moving from the last object it
    /// handled, `last`, to `curr`.
    ///
    /// Unlike [`AimEvaluator::evaluate_diff_of`] this only considers the
    /// velocity since the hand is not bound to the previous object's cursor.
    pub fn evaluate_hand_movement(
        curr: &OsuDifficultyObject<'_>,
        last: &OsuDifficultyObject<'_>,
        with_slider_travel_dist: bool,
    ) -> f64 {
        if curr.base.is_spinner() || last.base.is_spinner() {
            return 0.0;
        }

        let strain_time =
            (curr.start_time - last.start_time).max(OsuDifficultyObject::MIN_DELTA_TIME);
        let jump_dist = f64::from((curr.cursor_start - last.cursor_end).length());

        let mut vel = jump_dist / strain_time;

        if last.base.is_slider() && with_slider_travel_dist {
            let travel_vel = last.travel_dist / last.travel_time;
            let movement_time =
                (strain_time - last.travel_time).max(OsuDifficultyObject::MIN_DELTA_TIME);

            vel = vel.max(jump_dist / movement_time + travel_vel);
        }

        vel
    }

    fn wide_angle_bonus(angle: f64) -> f64 {
        smoothstep(angle, f64::to_radians(40.0), f64::to_radians(140.0))
    }

    fn acute_angle_bonus(angle: f64) -> f64 {
        smoothstep(angle, f64::to_radians(140.0), f64::to_radians(40.0))
    }
}

#[derive(Default)]
struct AngleBonuses {
    wide: f64,
    acute: f64,
    wiggle: f64,
}

impl AngleBonuses {
    fn new(
        curr: &OsuDifficultyObject<'_>,
        last: &OsuDifficultyObject<'_>,
        curr_angle: f64,
        last_angle: f64,
        angle_bonus: f64,
    ) -> Self {
        let radius = f64::from(OsuDifficultyObject::NORMALIZED_RADIUS);
        let diameter = f64::from(OsuDifficultyObject::NORMALIZED_DIAMETER);

        let mut wide = AimEvaluator::wide_angle_bonus(curr_angle);
        let mut acute = AimEvaluator::acute_angle_bonus(curr_angle);

        // Repeated angles are easier
        wide *= 1.0 - wide.min(AimEvaluator::wide_angle_bonus(last_angle).powf(3.0));
        acute *= 0.08
            + 0.92 * (1.0 - acute.min(AimEvaluator::acute_angle_bonus(last_angle).powf(3.0)));

        wide *= angle_bonus * smootherstep(curr.lazy_jump_dist, 0.0, diameter);

        acute *= angle_bonus
            * smootherstep(milliseconds_to_bpm(curr.strain_time, Some(2)), 300.0, 400.0)
            * smootherstep(curr.lazy_jump_dist, diameter, diameter * 2.0);

        // Jumps between one radius and three diameters at angles below 110°
        let wiggle_of = |obj: &OsuDifficultyObject<'_>, angle: f64| {
            smootherstep(obj.lazy_jump_dist, radius, diameter)
                * reverse_lerp(obj.lazy_jump_dist, diameter * 3.0, diameter).powf(1.8)
                * smootherstep(angle, f64::to_radians(110.0), f64::to_radians(60.0))
        };

        let wiggle = angle_bonus * wiggle_of(curr, curr_angle) * wiggle_of(last, last_angle);

        Self {
            wide,
            acute,
            wiggle,
        }
    }
}
