use rosu_map::util::Pos;

use crate::model::hit_object::{
    HitObject, HitObjectKind, NestedSliderObject, NestedSliderObjectKind, Spinner,
};

use super::difficulty::scaling_factor::ScalingFactor;

/// A [`HitObject`] prepared for difficulty calculation, i.e. with its stack
/// offset applied and the lazy slider cursor travel computed.
pub struct OsuObject {
    pub pos: Pos,
    pub start_time: f64,
    pub stack_height: i32,
    pub stack_offset: Pos,
    pub kind: OsuObjectKind,
}

impl OsuObject {
    pub const OBJECT_RADIUS: f32 = 64.0;
    pub const PREEMPT_MIN: f64 = 450.0;

    pub fn new(h: &HitObject, scaling_factor: &ScalingFactor) -> Self {
        let stack_offset = scaling_factor.stack_offset(h.stack_height);

        let kind = match h.kind {
            HitObjectKind::Circle => OsuObjectKind::Circle,
            HitObjectKind::Slider(ref slider) => OsuObjectKind::Slider(OsuSlider {
                end_time: slider.end_time,
                // Cursor tracking works on stacked positions
                lazy_end_pos: slider.lazy_end_pos + stack_offset,
                lazy_travel_dist: 0.0,
                nested_objects: slider.nested_objects.clone(),
            }),
            HitObjectKind::Spinner(spinner) => OsuObjectKind::Spinner(spinner),
        };

        Self {
            pos: h.pos,
            start_time: h.start_time,
            stack_height: h.stack_height,
            stack_offset,
            kind,
        }
    }

    pub const fn end_time(&self) -> f64 {
        match self.kind {
            OsuObjectKind::Circle => self.start_time,
            OsuObjectKind::Slider(ref slider) => slider.end_time,
            OsuObjectKind::Spinner(ref spinner) => spinner.end_time,
        }
    }

    pub fn stacked_pos(&self) -> Pos {
        self.pos + self.stack_offset
    }

    pub fn end_pos(&self) -> Pos {
        match self.kind {
            OsuObjectKind::Circle | OsuObjectKind::Spinner(_) => self.pos,
            OsuObjectKind::Slider(ref slider) => {
                slider.tail().map_or(self.pos, |nested| nested.pos)
            }
        }
    }

    pub fn stacked_end_pos(&self) -> Pos {
        self.end_pos() + self.stack_offset
    }

    /// Position of the cursor after the object has been fully handled.
    pub fn end_cursor_pos(&self) -> Pos {
        if let OsuObjectKind::Slider(ref slider) = self.kind {
            // We don't have access to the slider's curve at this point so we
            // take the pre-computed value.
            slider.lazy_end_pos
        } else {
            self.stacked_pos()
        }
    }

    pub fn lazy_travel_time(&self) -> f64 {
        match self.kind {
            OsuObjectKind::Circle | OsuObjectKind::Spinner(_) => 0.0,
            OsuObjectKind::Slider(ref slider) => slider
                .nested_objects
                // Here we really want the last nested object which is not
                // necessarily the tail
                .last()
                .map_or(0.0, |nested| nested.start_time - self.start_time),
        }
    }

    pub const fn is_circle(&self) -> bool {
        matches!(self.kind, OsuObjectKind::Circle)
    }

    pub const fn is_slider(&self) -> bool {
        matches!(self.kind, OsuObjectKind::Slider { .. })
    }

    pub const fn is_spinner(&self) -> bool {
        matches!(self.kind, OsuObjectKind::Spinner(_))
    }

    /// Moves the lazy cursor along the slider's nested objects and stores the
    /// resulting end position and travelled distance.
    pub fn compute_slider_cursor_pos(&mut self, radius: f64) {
        /// Normalized radius
        const RADIUS: f64 = 50.0;
        const ASSUMED_SLIDER_RADIUS: f64 = RADIUS * 1.8;

        let pos = self.pos;
        let stack_offset = self.stack_offset;

        let OsuObjectKind::Slider(ref mut slider) = self.kind else {
            return;
        };

        let mut curr_cursor_pos = pos + stack_offset;
        let scaling_factor = RADIUS / radius;
        let nested_len = slider.nested_objects.len();

        for (curr_movement_obj, i) in slider.nested_objects.iter().zip(1..) {
            let mut curr_movement = curr_movement_obj.pos + stack_offset - curr_cursor_pos;
            let mut curr_movement_len = scaling_factor * f64::from(curr_movement.length());
            let mut required_movement = ASSUMED_SLIDER_RADIUS;

            if i == nested_len {
                let lazy_movement = slider.lazy_end_pos - curr_cursor_pos;

                if lazy_movement.length() < curr_movement.length() {
                    curr_movement = lazy_movement;
                }

                curr_movement_len = scaling_factor * f64::from(curr_movement.length());
            } else if curr_movement_obj.is_repeat() {
                required_movement = RADIUS;
            }

            if curr_movement_len > required_movement {
                curr_cursor_pos += curr_movement
                    * ((curr_movement_len - required_movement) / curr_movement_len) as f32;
                curr_movement_len *= (curr_movement_len - required_movement) / curr_movement_len;
                slider.lazy_travel_dist += curr_movement_len as f32;
            }

            if i == nested_len {
                slider.lazy_end_pos = curr_cursor_pos;
            }
        }
    }
}

pub enum OsuObjectKind {
    Circle,
    Slider(OsuSlider),
    Spinner(Spinner),
}

pub struct OsuSlider {
    pub end_time: f64,
    pub lazy_end_pos: Pos,
    pub lazy_travel_dist: f32,
    pub nested_objects: Vec<NestedSliderObject>,
}

impl OsuSlider {
    pub fn repeat_count(&self) -> usize {
        self.nested_objects
            .iter()
            .filter(|nested| nested.is_repeat())
            .count()
    }

    pub fn tail(&self) -> Option<&NestedSliderObject> {
        self.nested_objects
            .iter()
            // The tail is not necessarily the last nested object, e.g. on very
            // short and fast buzz sliders
            .rfind(|nested| matches!(nested.kind, NestedSliderObjectKind::Tail))
    }
}
