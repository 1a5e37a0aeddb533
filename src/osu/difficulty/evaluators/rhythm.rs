use std::{cmp, f64::consts::PI};

use crate::osu::difficulty::object::{IDifficultyObject, OsuDifficultyObject};

/// Scores the timing irregularity leading up to an object.
pub struct RhythmEvaluator;

impl RhythmEvaluator {
    const HISTORY_TIME_MAX: f64 = 5000.0;
    const HISTORY_OBJECTS_MAX: usize = 32;
    const ISLAND_SIZE_MAX: u32 = 7;
    /// Relative interval change to count as a speed change
    const DELTA_CHANGE_RATIO: f64 = 1.25;
    const RATIO_MULTIPLIER: f64 = 6.0;
    const WINDOW_PENALTY_RATIO: f64 = 0.4;

    /// Calculates a rhythm multiplier for the tap difficulty of the current
    /// object.
    ///
    /// The result is at least `1.0`; spinners and overlapping objects always
    /// yield exactly `1.0`.
    pub fn evaluate_diff_of<'a>(
        curr: &'a OsuDifficultyObject<'a>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        hit_window: f64,
    ) -> f64 {
        if curr.base.is_spinner() || curr.is_overlapping {
            return 1.0;
        }

        let rhythm_complexity_sum = Self::complexity_sum(curr, diff_objects, hit_window);

        let doubletapness = curr
            .next(0, diff_objects)
            .map_or(1.0, |next| Self::doubletapness(curr, next));

        (4.0 + rhythm_complexity_sum * Self::rhythm_multiplier(hit_window) * doubletapness).sqrt()
            / 2.0
    }

    fn complexity_sum<'a>(
        curr: &'a OsuDifficultyObject<'a>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        hit_window: f64,
    ) -> f64 {
        let historical_note_count = cmp::min(curr.idx, Self::HISTORY_OBJECTS_MAX);

        // Overlapping objects can be tapped at once so they're skipped
        let valid_previous: Vec<_> = (0..historical_note_count)
            .map_while(|i| curr.previous(i, diff_objects))
            .filter(|obj| !obj.is_overlapping)
            .collect();

        let mut rhythm_start = 0;

        while rhythm_start + 2 < valid_previous.len()
            && curr.start_time - valid_previous[rhythm_start].start_time < Self::HISTORY_TIME_MAX
        {
            rhythm_start += 1;
        }

        let penalty_window = hit_window * Self::WINDOW_PENALTY_RATIO;

        let mut state = RhythmWindowState::default();
        let mut sum = 0.0;

        // From the oldest object of the window towards the current one
        for i in (1..=rhythm_start).rev() {
            let curr_obj = valid_previous[i - 1];
            let prev_obj = valid_previous[i];
            let last_obj = valid_previous[i + 1];

            let time_decay =
                (Self::HISTORY_TIME_MAX - (curr.start_time - curr_obj.start_time)) / Self::HISTORY_TIME_MAX;
            let note_decay = (valid_previous.len() - i) as f64 / valid_previous.len() as f64;
            let historical_decay = note_decay.min(time_decay);

            let curr_delta = curr_obj.strain_time;
            let prev_delta = prev_obj.strain_time;
            let last_delta = last_obj.strain_time;

            let curr_ratio = 1.0
                + Self::RATIO_MULTIPLIER
                    * f64::min(
                        0.5,
                        (PI / (prev_delta.min(curr_delta) / prev_delta.max(curr_delta)))
                            .sin()
                            .powf(2.0),
                    );

            let window_penalty = (((prev_delta - curr_delta).abs() - penalty_window).max(0.0)
                / penalty_window)
                .min(1.0);

            let mut effective_ratio = window_penalty * curr_ratio;

            if state.first_delta_switch {
                let speed_changed = prev_delta > Self::DELTA_CHANGE_RATIO * curr_delta
                    || prev_delta * Self::DELTA_CHANGE_RATIO < curr_delta;

                if !speed_changed {
                    // Island is still progressing
                    if state.island_size < Self::ISLAND_SIZE_MAX {
                        state.island_size += 1;
                    }
                } else {
                    // Speed change into a slider is an easy acc window
                    if curr.previous(i - 1, diff_objects).is_some_and(|h| h.base.is_slider()) {
                        effective_ratio *= 0.125;
                    }

                    // Speed change coming from a slider
                    if curr.previous(i, diff_objects).is_some_and(|h| h.base.is_slider()) {
                        effective_ratio *= 0.25;
                    }

                    // Repeated island size, e.g. triplet -> triplet
                    if state.previous_island_size == state.island_size {
                        effective_ratio *= 0.25;
                    }

                    // Repeated island polarity, e.g. 2 -> 4 or 3 -> 5
                    if state.previous_island_size % 2 == state.island_size % 2 {
                        effective_ratio *= 0.5;
                    }

                    // Deceleration already started a note ago
                    if last_delta > prev_delta + 10.0 && prev_delta > curr_delta + 10.0 {
                        effective_ratio *= 0.125;
                    }

                    sum += (effective_ratio * state.start_ratio).sqrt()
                        * historical_decay
                        * f64::from(4 + state.island_size).sqrt()
                        / 2.0
                        * f64::from(4 + state.previous_island_size).sqrt()
                        / 2.0;

                    state.start_ratio = effective_ratio;
                    state.previous_island_size = state.island_size;

                    if prev_delta * Self::DELTA_CHANGE_RATIO < curr_delta {
                        // Slowing down; speeding up keeps counting islands
                        state.first_delta_switch = false;
                    }

                    state.island_size = 1;
                }
            } else if prev_delta > Self::DELTA_CHANGE_RATIO * curr_delta {
                // Speeding up, count the island until the speed changes again
                state.first_delta_switch = true;
                state.start_ratio = effective_ratio;
                state.island_size = 1;
            }
        }

        sum
    }

    /// Nerf for doubles that can be tapped at the same time for a great hit.
    fn doubletapness(curr: &OsuDifficultyObject<'_>, next: &OsuDifficultyObject<'_>) -> f64 {
        let curr_delta_time = curr.delta_time.max(1.0);
        let next_delta_time = next.delta_time.max(1.0);
        let delta_diff = (next_delta_time - curr_delta_time).abs();
        let speed_ratio = curr_delta_time / curr_delta_time.max(delta_diff);
        let window_ratio = (curr_delta_time / curr.hit_window_great).min(1.0).powf(2.0);

        speed_ratio.powf(1.0 - window_ratio)
    }

    fn rhythm_multiplier(hit_window: f64) -> f64 {
        let od = (80.0 - hit_window) / 6.0;
        let od_scaling = od.powf(2.0) / 400.0;

        if od >= 0.0 {
            0.75 + od_scaling
        } else {
            0.75 - od_scaling
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct RhythmWindowState {
    island_size: u32,
    previous_island_size: u32,
    start_ratio: f64,
    first_delta_switch: bool,
}

impl Default for RhythmWindowState {
    fn default() -> Self {
        Self {
            island_size: 1,
            previous_island_size: 0,
            start_ratio: 0.0,
            first_delta_switch: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rosu_map::util::Pos;

    use crate::{
        model::hit_object::{
            HitObject, HitObjectKind, NestedSliderObject, NestedSliderObjectKind, Slider,
        },
        osu::{
            difficulty::{create_difficulty_objects, scaling_factor::ScalingFactor},
            object::OsuObject,
        },
        util::float_ext::FloatExt,
    };

    use super::*;

    const HIT_WINDOW: f64 = 100.0;

    fn osu_objects(hit_objects: &[HitObject]) -> (Vec<OsuObject>, ScalingFactor) {
        let scaling_factor = ScalingFactor::new(4.0);

        let osu_objects = hit_objects
            .iter()
            .map(|h| {
                let mut h = OsuObject::new(h, &scaling_factor);
                h.compute_slider_cursor_pos(scaling_factor.radius);

                h
            })
            .collect();

        (osu_objects, scaling_factor)
    }

    /// Objects alternating between two far apart positions.
    ///
    /// Indices in `sliders` become short sliders and indices in `stacked`
    /// are placed on top of their predecessor.
    fn pattern(times: &[f64], sliders: &[usize], stacked: &[usize]) -> Vec<HitObject> {
        let mut hit_objects: Vec<HitObject> = Vec::with_capacity(times.len());
        let mut x = 100.0;

        for (i, &start_time) in times.iter().enumerate() {
            if stacked.contains(&i) {
                let pos = hit_objects[i - 1].pos;
                hit_objects.push(HitObject::circle(pos, start_time));

                continue;
            }

            let pos = Pos::new(x, 192.0);
            x = if x < 200.0 { 400.0 } else { 100.0 };

            let h = if sliders.contains(&i) {
                HitObject {
                    pos,
                    start_time,
                    stack_height: 0,
                    kind: HitObjectKind::Slider(Slider {
                        end_time: start_time + 150.0,
                        lazy_end_pos: Pos::new(pos.x, 242.0),
                        nested_objects: vec![NestedSliderObject {
                            pos: Pos::new(pos.x, 242.0),
                            start_time: start_time + 114.0,
                            kind: NestedSliderObjectKind::Tail,
                        }],
                    }),
                }
            } else {
                HitObject::circle(pos, start_time)
            };

            hit_objects.push(h);
        }

        hit_objects
    }

    fn times(deltas: &[f64]) -> Vec<f64> {
        let mut time = 0.0;
        let mut times = vec![time];

        for delta in deltas {
            time += delta;
            times.push(time);
        }

        times
    }

    fn circles(times: &[f64]) -> Vec<HitObject> {
        pattern(times, &[], &[])
    }

    /// Rhythm complexity sum of the difficulty object at `idx`, or the last
    /// one if `None`.
    fn complexity_sum_at(hit_objects: &[HitObject], idx: Option<usize>) -> f64 {
        let (osu_objects, scaling_factor) = osu_objects(hit_objects);
        let diff_objects =
            create_difficulty_objects(&osu_objects, 1.0, &scaling_factor, HIT_WINDOW);
        let curr = &diff_objects[idx.unwrap_or(diff_objects.len() - 1)];

        RhythmEvaluator::complexity_sum(curr, &diff_objects, HIT_WINDOW)
    }

    fn evaluate_last(hit_objects: &[HitObject], hit_window: f64) -> f64 {
        let (osu_objects, scaling_factor) = osu_objects(hit_objects);
        let diff_objects =
            create_difficulty_objects(&osu_objects, 1.0, &scaling_factor, hit_window);
        let last = diff_objects.last().unwrap();

        RhythmEvaluator::evaluate_diff_of(last, &diff_objects, hit_window)
    }

    fn ratio(curr_delta: f64, prev_delta: f64) -> f64 {
        let ratio = prev_delta.min(curr_delta) / prev_delta.max(curr_delta);

        1.0 + 6.0 * f64::min(0.5, (PI / ratio).sin().powf(2.0))
    }

    /// Contribution of a single speed change to the complexity sum.
    fn island_term(
        effective_ratio: f64,
        start_ratio: f64,
        decay: f64,
        island_size: u32,
        previous_island_size: u32,
    ) -> f64 {
        (effective_ratio * start_ratio).sqrt()
            * decay
            * f64::from(4 + island_size).sqrt()
            / 2.0
            * f64::from(4 + previous_island_size).sqrt()
            / 2.0
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "{actual} != {expected}"
        );
    }

    // 400 -> 200 -> 200 -> 400 ms, i.e. a speed-up island of size 2
    const SPEED_UP: [f64; 8] = [0.0, 400.0, 800.0, 1000.0, 1200.0, 1600.0, 2000.0, 2400.0];

    #[test]
    fn constant_rhythm() {
        let hit_objects = circles(&[0.0, 200.0, 400.0, 600.0, 800.0]);

        assert!(complexity_sum_at(&hit_objects, None).eq(0.0));
        assert!(evaluate_last(&hit_objects, 100.0).eq(1.0));
    }

    #[test]
    fn spinner() {
        let mut hit_objects = circles(&[0.0, 300.0, 600.0, 700.0]);
        hit_objects.push(HitObject::spinner(Pos::new(256.0, 192.0), 800.0, 2000.0));

        assert!(evaluate_last(&hit_objects, 100.0).eq(1.0));
    }

    #[test]
    fn overlapping() {
        let mut hit_objects = circles(&[0.0, 400.0, 800.0, 1000.0]);
        let stacked = HitObject::circle(hit_objects[3].pos, 1030.0);
        hit_objects.push(stacked);

        let (osu_objects, scaling_factor) = osu_objects(&hit_objects);
        let diff_objects = create_difficulty_objects(&osu_objects, 1.0, &scaling_factor, 50.0);
        let last = diff_objects.last().unwrap();

        assert!(last.is_overlapping);
        assert!(RhythmEvaluator::evaluate_diff_of(last, &diff_objects, 50.0).eq(1.0));
    }

    #[test]
    fn speed_up_island() {
        let sum = complexity_sum_at(&circles(&SPEED_UP), None);

        // Island sizes 2 and 0 share parity; the note count limits the decay
        let expected = island_term(ratio(400.0, 200.0) * 0.5, ratio(200.0, 400.0), 4.0 / 6.0, 2, 0);

        assert_close(sum, expected);
    }

    #[test]
    fn speed_change_into_slider() {
        let sum = complexity_sum_at(&pattern(&SPEED_UP, &[5], &[]), None);

        let effective_ratio = ratio(400.0, 200.0) * 0.125 * 0.5;
        let expected = island_term(effective_ratio, ratio(200.0, 400.0), 4.0 / 6.0, 2, 0);

        assert_close(sum, expected);
    }

    #[test]
    fn speed_change_from_slider() {
        let sum = complexity_sum_at(&pattern(&SPEED_UP, &[4], &[]), None);

        let effective_ratio = ratio(400.0, 200.0) * 0.25 * 0.5;
        let expected = island_term(effective_ratio, ratio(200.0, 400.0), 4.0 / 6.0, 2, 0);

        assert_close(sum, expected);
    }

    #[test]
    fn repeated_triplets() {
        let deltas = [
            400.0, 400.0, 200.0, 200.0, 200.0, 400.0, 200.0, 200.0, 200.0, 400.0, 400.0,
        ];

        let sum = complexity_sum_at(&circles(&times(&deltas)), None);

        let first = island_term(ratio(400.0, 200.0), ratio(200.0, 400.0), 0.5, 3, 0);

        // Same island size and parity as the previous triplet
        let second = island_term(
            ratio(400.0, 200.0) * 0.25 * 0.5,
            ratio(200.0, 400.0),
            0.9,
            3,
            3,
        );

        assert_close(sum, first + second);
    }

    #[test]
    fn deceleration_started_a_note_earlier() {
        let deltas = [400.0, 400.0, 300.0, 200.0, 200.0, 400.0, 400.0];

        let sum = complexity_sum_at(&circles(&times(&deltas)), None);

        // 400 -> 300 -> 200 keeps speeding up
        let start_ratio = ratio(300.0, 400.0);
        let damped = ratio(200.0, 300.0) * 0.125;
        let first = island_term(damped, start_ratio, 0.5, 1, 0);
        let second = island_term(ratio(400.0, 200.0), damped, 5.0 / 6.0, 2, 1);

        assert_close(sum, first + second);
    }

    #[test]
    fn island_size_is_capped() {
        let mut deltas = vec![400.0, 400.0];
        deltas.extend([200.0; 10]);
        deltas.extend([400.0, 400.0]);

        let sum = complexity_sum_at(&circles(&times(&deltas)), None);

        // Ten notes in the island but it counts as seven; 400ms to the
        // current object limits the decay
        let time_decay = (5000.0 - 400.0) / 5000.0;
        let expected = island_term(ratio(400.0, 200.0), ratio(200.0, 400.0), time_decay, 7, 0);

        assert_close(sum, expected);
    }

    #[test]
    fn history_is_limited_in_time() {
        let mut times = SPEED_UP[..6].to_vec();
        times.extend((0..10).map(|i| 2000.0 + 400.0 * f64::from(i)));

        // The speed change 4000ms ago only counts a fifth
        assert_eq!(times.last(), Some(&5600.0));
        let sum = complexity_sum_at(&circles(&times), None);
        let expected = island_term(ratio(400.0, 200.0) * 0.5, ratio(200.0, 400.0), 0.2, 2, 0);

        assert_close(sum, expected);

        // The start of the speed-up is 5000ms back and no longer considered
        times.push(6000.0);
        assert!(complexity_sum_at(&circles(&times), None).eq(0.0));
    }

    #[test]
    fn overlapping_objects_keep_their_index() {
        let times = times(&[400.0, 400.0, 200.0, 200.0, 400.0, 30.0, 370.0, 400.0]);

        let regular = complexity_sum_at(&pattern(&times, &[], &[6]), None);
        let into_circles = complexity_sum_at(&circles(&SPEED_UP), None);

        // The stacked object is skipped in the history
        assert_close(regular, into_circles);

        // The slider lookups are shifted by the skipped object so the slider
        // ending the island is treated as the island's last object
        let slider_end = complexity_sum_at(&pattern(&times, &[5], &[6]), None);
        let from_slider = complexity_sum_at(&pattern(&SPEED_UP, &[4], &[]), None);
        assert_close(slider_end, from_slider);

        let slider_before = complexity_sum_at(&pattern(&times, &[4], &[6]), None);
        assert_close(slider_before, into_circles);
    }

    #[test]
    fn doubletapness() {
        let mut times = SPEED_UP.to_vec();
        times.extend([2450.0, 2650.0]);

        let hit_objects = circles(&times);
        let (osu_objects, scaling_factor) = osu_objects(&hit_objects);
        let diff_objects =
            create_difficulty_objects(&osu_objects, 1.0, &scaling_factor, HIT_WINDOW);

        // 50ms followed by 200ms
        let curr = &diff_objects[7];
        let next = &diff_objects[8];
        assert!(!curr.is_overlapping);

        let doubletapness = RhythmEvaluator::doubletapness(curr, next);
        let speed_ratio: f64 = 50.0 / 150.0;
        let window_ratio: f64 = (50.0 / HIT_WINDOW).powf(2.0);
        assert_close(doubletapness, speed_ratio.powf(1.0 - window_ratio));

        let sum = island_term(ratio(400.0, 200.0) * 0.5, ratio(200.0, 400.0), 4.0 / 7.0, 2, 0);
        assert_close(complexity_sum_at(&hit_objects, Some(7)), sum);

        let multiplier = 0.75 - ((80.0 - HIT_WINDOW) / 6.0).powf(2.0) / 400.0;
        let expected = (4.0 + sum * multiplier * doubletapness).sqrt() / 2.0;
        let actual = RhythmEvaluator::evaluate_diff_of(curr, &diff_objects, HIT_WINDOW);

        assert_close(actual, expected);
    }

    #[test]
    fn speed_changes_add_complexity() {
        let hit_objects = circles(&[
            0.0, 400.0, 800.0, 1200.0, 1400.0, 1600.0, 1800.0, 2200.0, 2600.0,
        ]);

        assert!(evaluate_last(&hit_objects, 100.0) > 1.0);
    }

    #[test]
    fn rhythm_multiplier_sign() {
        assert!(RhythmEvaluator::rhythm_multiplier(80.0).eq(0.75));
        assert!(RhythmEvaluator::rhythm_multiplier(20.0) > 0.75);
        assert!(RhythmEvaluator::rhythm_multiplier(140.0) < 0.75);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn overlap_rule(
            dx in -80.0_f32..80.0,
            dy in -80.0_f32..80.0,
            delta in 1.0_f64..200.0,
            hit_window in 20.0_f64..140.0,
        ) {
            let mut hit_objects = circles(&[0.0, 300.0, 500.0, 800.0]);
            hit_objects.push(HitObject::circle(Pos::new(256.0, 192.0), 1000.0));
            hit_objects.push(HitObject::circle(Pos::new(256.0 + dx, 192.0 + dy), 1000.0 + delta));

            let (osu_objects, scaling_factor) = osu_objects(&hit_objects);
            let diff_objects =
                create_difficulty_objects(&osu_objects, 1.0, &scaling_factor, hit_window);
            let last = diff_objects.last().unwrap();

            let [.., prev, curr] = hit_objects.as_slice() else {
                unreachable!()
            };

            let dist = f64::from((curr.pos - prev.pos).length() * scaling_factor.factor);
            let delta_time = curr.start_time - prev.start_time;
            let expected = dist < f64::from(OsuDifficultyObject::NORMALIZED_DIAMETER)
                && delta_time <= hit_window;

            prop_assert_eq!(last.is_overlapping, expected);

            if last.is_overlapping {
                let rhythm = RhythmEvaluator::evaluate_diff_of(last, &diff_objects, hit_window);
                prop_assert!(rhythm.eq(1.0));
            }
        }
    }
}
