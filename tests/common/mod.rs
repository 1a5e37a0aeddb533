#![allow(dead_code)]

use touch_pp::{
    model::hit_object::{
        HitObject, HitObjectKind, NestedSliderObject, NestedSliderObjectKind, Pos, Slider,
    },
    Beatmap,
};

/// Settings shared by all test maps.
pub fn map(hit_objects: Vec<HitObject>) -> Beatmap {
    Beatmap {
        ar: 9.0,
        cs: 4.0,
        hp: 5.0,
        od: 8.0,
        hit_objects,
    }
}

/// Circles alternating between two spots with a constant interval.
pub fn jumps(count: u32, interval: f64, spacing: f32) -> Vec<HitObject> {
    (0..count)
        .map(|i| {
            let x = if i % 2 == 0 { 256.0 - spacing } else { 256.0 + spacing };

            HitObject::circle(Pos::new(x, 192.0), 1000.0 + f64::from(i) * interval)
        })
        .collect()
}

/// A stream whose intervals switch between the given values every
/// `switch_every` objects.
pub fn stream(count: u32, intervals: &[f64], switch_every: u32) -> Vec<HitObject> {
    let mut time = 1000.0;

    (0..count)
        .map(|i| {
            let x = 200.0 + (i % 8) as f32 * 16.0;
            let h = HitObject::circle(Pos::new(x, 192.0), time);
            let interval_idx = (i / switch_every) as usize % intervals.len();
            time += intervals[interval_idx];

            h
        })
        .collect()
}

/// A horizontal slider with a single tick.
pub fn slider(start_time: f64, x: f32, length: f32, duration: f64) -> HitObject {
    let nested = |dx: f32, dt: f64, kind| NestedSliderObject {
        pos: Pos::new(x + dx, 192.0),
        start_time: start_time + dt,
        kind,
    };

    HitObject {
        pos: Pos::new(x, 192.0),
        start_time,
        stack_height: 0,
        kind: HitObjectKind::Slider(Slider {
            end_time: start_time + duration,
            lazy_end_pos: Pos::new(x + length, 192.0),
            nested_objects: vec![
                nested(length / 2.0, duration / 2.0, NestedSliderObjectKind::Tick),
                nested(length, duration - 36.0, NestedSliderObjectKind::Tail),
            ],
        }),
    }
}

/// Circles interleaved with sliders.
pub fn mixed(count: u32) -> Vec<HitObject> {
    (0..count)
        .map(|i| {
            let time = 1000.0 + f64::from(i) * 450.0;

            if i % 3 == 2 {
                slider(time, 100.0, 200.0, 300.0)
            } else {
                let x = if i % 2 == 0 { 80.0 } else { 420.0 };

                HitObject::circle(Pos::new(x, 100.0), time)
            }
        })
        .collect()
}
