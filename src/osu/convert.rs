use crate::model::beatmap::Beatmap;

use super::{
    attributes::OsuDifficultyAttributes,
    difficulty::scaling_factor::ScalingFactor,
    object::{OsuObject, OsuObjectKind},
};

/// Prepare the first `take` hitobjects of the map for difficulty calculation
/// and count them into `attrs`.
pub fn convert_objects(
    map: &Beatmap,
    scaling_factor: &ScalingFactor,
    take: usize,
    attrs: &mut OsuDifficultyAttributes,
) -> Box<[OsuObject]> {
    map.hit_objects
        .iter()
        .take(take)
        .map(|h| {
            let mut h = OsuObject::new(h, scaling_factor);
            h.compute_slider_cursor_pos(scaling_factor.radius);

            h
        })
        .inspect(|h| {
            attrs.max_combo += 1;

            match h.kind {
                OsuObjectKind::Circle => attrs.n_circles += 1,
                OsuObjectKind::Slider(ref slider) => {
                    attrs.n_sliders += 1;
                    attrs.max_combo += slider.nested_objects.len() as u32;
                }
                OsuObjectKind::Spinner(_) => attrs.n_spinners += 1,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rosu_map::util::Pos;

    use crate::model::hit_object::{
        HitObject, HitObjectKind, NestedSliderObject, NestedSliderObjectKind, Slider,
    };

    use super::*;

    fn slider(start_time: f64) -> HitObject {
        let nested = |x: f32, time: f64, kind| NestedSliderObject {
            pos: Pos::new(x, 100.0),
            start_time: time,
            kind,
        };

        HitObject {
            pos: Pos::new(100.0, 100.0),
            start_time,
            stack_height: 0,
            kind: HitObjectKind::Slider(Slider {
                end_time: start_time + 300.0,
                lazy_end_pos: Pos::new(300.0, 100.0),
                nested_objects: vec![
                    nested(200.0, start_time + 150.0, NestedSliderObjectKind::Tick),
                    nested(300.0, start_time + 264.0, NestedSliderObjectKind::Tail),
                ],
            }),
        }
    }

    #[test]
    fn counts_and_max_combo() {
        let map = Beatmap {
            hit_objects: vec![
                HitObject::circle(Pos::new(0.0, 0.0), 0.0),
                slider(500.0),
                HitObject::spinner(Pos::new(256.0, 192.0), 1000.0, 2000.0),
            ],
            ..Default::default()
        };

        let mut attrs = OsuDifficultyAttributes::default();
        let objects = convert_objects(&map, &ScalingFactor::new(4.0), usize::MAX, &mut attrs);

        assert_eq!(objects.len(), 3);
        assert_eq!((attrs.n_circles, attrs.n_sliders, attrs.n_spinners), (1, 1, 1));
        assert_eq!(attrs.max_combo, 5);
    }

    #[test]
    fn respects_take() {
        let map = Beatmap {
            hit_objects: vec![
                HitObject::circle(Pos::new(0.0, 0.0), 0.0),
                slider(500.0),
            ],
            ..Default::default()
        };

        let mut attrs = OsuDifficultyAttributes::default();
        let objects = convert_objects(&map, &ScalingFactor::new(4.0), 1, &mut attrs);

        assert_eq!(objects.len(), 1);
        assert_eq!(attrs.n_sliders, 0);
        assert_eq!(attrs.max_combo, 1);
    }
}
