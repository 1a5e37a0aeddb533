use rosu_map::util::Pos;

use crate::osu::object::OsuObject;

use super::object::OsuDifficultyObject;

const BROKEN_GAMEFIELD_ROUNDING_ALLOWANCE: f32 = 1.00041;

/// Circle size dependent scaling shared by all hit objects of a map.
pub struct ScalingFactor {
    /// `NORMALIZED_RADIUS / radius`, buffed for radii below 30
    pub factor: f32,
    pub radius: f64,
    pub scale: f32,
}

impl ScalingFactor {
    pub fn new(cs: f64) -> Self {
        let scale = (1.0 - 0.7 * ((cs - 5.0) / 5.0)) as f32 / 2.0
            * BROKEN_GAMEFIELD_ROUNDING_ALLOWANCE;

        let radius = f64::from(OsuObject::OBJECT_RADIUS * scale);
        let factor = OsuDifficultyObject::NORMALIZED_RADIUS as f32 / radius as f32;

        let factor_with_small_circle_bonus = if radius < 30.0 {
            factor * (1.0 + (30.0 - radius as f32).min(5.0) / 50.0)
        } else {
            factor
        };

        Self {
            factor: factor_with_small_circle_bonus,
            radius,
            scale,
        }
    }

    /// Offset of an object with the given stack height.
    pub fn stack_offset(&self, stack_height: i32) -> Pos {
        let stack_offset = stack_height as f32 * self.scale * -6.4;

        Pos::new(stack_offset, stack_offset)
    }

    /// Radius of the flashlight relevant scaling.
    pub fn flashlight(&self) -> f64 {
        52.0 / self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_circles_get_bonus() {
        let regular = ScalingFactor::new(4.0);
        let tiny = ScalingFactor::new(9.0);

        assert!(tiny.radius < 30.0);
        assert!(tiny.factor > OsuDifficultyObject::NORMALIZED_RADIUS as f32 / tiny.radius as f32);

        let expected = OsuDifficultyObject::NORMALIZED_RADIUS as f32 / regular.radius as f32;
        assert!((regular.factor - expected).abs() < f32::EPSILON);
    }

    #[test]
    fn no_offset_without_stack() {
        assert_eq!(ScalingFactor::new(5.0).stack_offset(0), Pos::new(0.0, 0.0));
    }
}
