use std::{error, fmt};

use crate::{
    model::hit_object::{HitObject, HitObjectKind, Pos},
    util::hint::unlikely,
};

use super::Beatmap;

/// Resulting error type of [`Beatmap::check_suspicion`].
///
/// [`Beatmap::check_suspicion`]: crate::model::beatmap::Beatmap::check_suspicion
/// [`Beatmap`]: crate::model::beatmap::Beatmap
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum TooSuspicious {
    /// Notes are too dense time-wise.
    Density,
    /// The map seems too long.
    Length,
    /// Too many objects.
    ObjectCount,
    /// Too many sliders' positions were suspicious.
    SliderPositions,
    /// Too many sliders had a very high amount of repeats.
    SliderRepeats,
    /// Hit objects are not sorted by their start time.
    Unordered,
}

impl TooSuspicious {
    pub(crate) fn new(map: &Beatmap) -> Option<Self> {
        #[inline]
        fn too_long(hit_objects: &[HitObject]) -> bool {
            const DAY_MS: u32 = 60 * 60 * 24 * 1000;

            match hit_objects {
                [first, .., last] => (last.start_time - first.start_time) > f64::from(DAY_MS),
                _ => false,
            }
        }

        #[inline]
        const fn too_many_objects(map: &Beatmap) -> bool {
            const THRESHOLD: usize = 500_000;

            map.hit_objects.len() > THRESHOLD
        }

        #[inline]
        fn too_dense(i: usize, curr: &HitObject, hit_objects: &[HitObject]) -> bool {
            const THRESHOLD_1S: usize = 100; // 100 notes per 1s = 6000BPM
            const THRESHOLD_10S: usize = 250; // 250 notes per 10s = 1500BPM

            (hit_objects.len() > i + THRESHOLD_1S
                && hit_objects[i + THRESHOLD_1S].start_time - curr.start_time < 1000.0)
                || (hit_objects.len() > i + THRESHOLD_10S
                    && hit_objects[i + THRESHOLD_10S].start_time - curr.start_time < 10_000.0)
        }

        #[inline]
        fn check_pos(pos: Pos) -> bool {
            /// osu!'s max value is `131_072` and the playfield is `512x384`
            const THRESHOLD: f32 = 10_000.0;

            pos.x.abs() > THRESHOLD || pos.y.abs() > THRESHOLD
        }

        #[inline]
        const fn check_repeats(repeats: usize) -> bool {
            /// osu!'s max value is `9000`
            const THRESHOLD: usize = 1000;

            repeats > THRESHOLD
        }

        if unlikely(too_many_objects(map)) {
            return Some(Self::ObjectCount);
        } else if unlikely(too_long(&map.hit_objects)) {
            return Some(Self::Length);
        }

        let mut pos_beyond_threshold = 0;
        let mut repeats_beyond_threshold = 0;

        for (i, h) in map.hit_objects.iter().enumerate() {
            if unlikely(too_dense(i, h, &map.hit_objects)) {
                return Some(Self::Density);
            }

            if let Some(next) = map.hit_objects.get(i + 1) {
                if unlikely(next.start_time < h.start_time) {
                    return Some(Self::Unordered);
                }
            }

            if let HitObjectKind::Slider(ref slider) = h.kind {
                if unlikely(check_repeats(slider.repeat_count())) {
                    repeats_beyond_threshold += 1;
                } else if unlikely(check_pos(h.pos)) {
                    pos_beyond_threshold += 1;
                }
            }
        }

        if unlikely(pos_beyond_threshold > 256) {
            Some(Self::SliderPositions)
        } else if unlikely(repeats_beyond_threshold > 256) {
            Some(Self::SliderRepeats)
        } else {
            None
        }
    }
}

impl error::Error for TooSuspicious {}

impl fmt::Display for TooSuspicious {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "the map seems too suspicious for further calculation (reason={self:?})",
        )
    }
}
