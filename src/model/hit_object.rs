use std::cmp::Ordering;

pub use rosu_map::util::Pos;

/// All hitobject related data required for difficulty calculation.
///
/// Positions are in playfield coordinates and unstacked; stacking is applied
/// through [`HitObject::stack_height`].
#[derive(Clone, Debug, PartialEq)]
pub struct HitObject {
    pub pos: Pos,
    pub start_time: f64,
    pub stack_height: i32,
    pub kind: HitObjectKind,
}

impl HitObject {
    /// Create a circle at the given position and time.
    pub const fn circle(pos: Pos, start_time: f64) -> Self {
        Self {
            pos,
            start_time,
            stack_height: 0,
            kind: HitObjectKind::Circle,
        }
    }

    /// Create a spinner spanning from `start_time` to `end_time`.
    pub const fn spinner(pos: Pos, start_time: f64, end_time: f64) -> Self {
        Self {
            pos,
            start_time,
            stack_height: 0,
            kind: HitObjectKind::Spinner(Spinner { end_time }),
        }
    }

    /// Whether the hitobject is a circle.
    pub const fn is_circle(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Circle)
    }

    /// Whether the hitobject is a slider.
    pub const fn is_slider(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Slider(_))
    }

    /// Whether the hitobject is a spinner.
    pub const fn is_spinner(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Spinner(_))
    }

    /// The end time of the object.
    pub const fn end_time(&self) -> f64 {
        match &self.kind {
            HitObjectKind::Circle => self.start_time,
            HitObjectKind::Slider(slider) => slider.end_time,
            HitObjectKind::Spinner(spinner) => spinner.end_time,
        }
    }
}

impl PartialOrd for HitObject {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.start_time.partial_cmp(&other.start_time)
    }
}

/// Additional data for a [`HitObject`].
#[derive(Clone, Debug, PartialEq)]
pub enum HitObjectKind {
    Circle,
    Slider(Slider),
    Spinner(Spinner),
}

/// A slider whose path has already been evaluated into nested objects.
#[derive(Clone, Debug, PartialEq)]
pub struct Slider {
    pub end_time: f64,
    /// Position along the path at the time of the last nested object.
    pub lazy_end_pos: Pos,
    /// Ticks, repeats, and the tail, sorted by time.
    pub nested_objects: Vec<NestedSliderObject>,
}

impl Slider {
    /// The amount of repeats of the slider.
    pub fn repeat_count(&self) -> usize {
        self.nested_objects
            .iter()
            .filter(|nested| nested.is_repeat())
            .count()
    }

    /// The tail of the slider.
    ///
    /// The tail is not necessarily the last nested object, e.g. on very short
    /// and fast buzz sliders.
    pub fn tail(&self) -> Option<&NestedSliderObject> {
        self.nested_objects
            .iter()
            .rfind(|nested| matches!(nested.kind, NestedSliderObjectKind::Tail))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NestedSliderObject {
    pub pos: Pos,
    pub start_time: f64,
    pub kind: NestedSliderObjectKind,
}

impl NestedSliderObject {
    pub const fn is_repeat(&self) -> bool {
        matches!(self.kind, NestedSliderObjectKind::Repeat)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NestedSliderObjectKind {
    Repeat,
    Tail,
    Tick,
}

/// A spinner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spinner {
    pub end_time: f64,
}
