use crate::{
    model::mods::Mods,
    util::difficulty::difficulty_range,
};

use super::Beatmap;

/// Summary struct for a [`Beatmap`]'s attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct BeatmapAttributes {
    /// The approach rate.
    pub ar: f64,
    /// The overall difficulty.
    pub od: f64,
    /// The circle size.
    pub cs: f64,
    /// The health drain rate
    pub hp: f64,
    /// The clock rate with respect to mods.
    pub clock_rate: f64,
    /// The hit windows for approach rate and overall difficulty.
    pub hit_windows: HitWindows,
}

/// AR and OD hit windows
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitWindows {
    /// Hit window for approach rate i.e. `TimePreempt` in milliseconds.
    pub ar: f64,
    /// Hit window for overall difficulty i.e. time to hit a 300 ("Great") in
    /// milliseconds.
    pub od_great: f64,
}

/// A builder for [`BeatmapAttributes`] and [`HitWindows`].
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct BeatmapAttributesBuilder {
    ar: f32,
    od: f32,
    cs: f32,
    hp: f32,
    mods: u32,
    clock_rate: Option<f64>,
}

impl BeatmapAttributesBuilder {
    const GREAT_MIN: f64 = 100.0;
    const GREAT_AVG: f64 = 75.0;
    const GREAT_MAX: f64 = 50.0;

    const PRECISE_GREAT_MIN: f64 = 80.0;
    const PRECISE_GREAT_AVG: f64 = 50.0;
    const PRECISE_GREAT_MAX: f64 = 20.0;

    const PREEMPT_MIN: f64 = 1800.0;
    const PREEMPT_AVG: f64 = 1200.0;
    const PREEMPT_MAX: f64 = 450.0;

    /// Create a new [`BeatmapAttributesBuilder`].
    ///
    /// Attributes are set to `5.0`.
    pub const fn new() -> Self {
        Self {
            ar: 5.0,
            od: 5.0,
            cs: 5.0,
            hp: 5.0,
            mods: 0,
            clock_rate: None,
        }
    }

    /// Use the given [`Beatmap`]'s attributes.
    pub const fn map(self, map: &Beatmap) -> Self {
        Self {
            ar: map.ar,
            od: map.od,
            cs: map.cs,
            hp: map.hp,
            ..self
        }
    }

    /// Specify the approach rate before mods are applied.
    pub const fn ar(self, ar: f32) -> Self {
        Self { ar, ..self }
    }

    /// Specify the overall difficulty before mods are applied.
    pub const fn od(self, od: f32) -> Self {
        Self { od, ..self }
    }

    /// Specify the circle size before mods are applied.
    pub const fn cs(self, cs: f32) -> Self {
        Self { cs, ..self }
    }

    /// Specify the drain rate before mods are applied.
    pub const fn hp(self, hp: f32) -> Self {
        Self { hp, ..self }
    }

    /// Specify the mods.
    pub const fn mods(self, mods: u32) -> Self {
        Self { mods, ..self }
    }

    /// Specify a custom clock rate.
    pub const fn clock_rate(self, clock_rate: f64) -> Self {
        Self {
            clock_rate: Some(clock_rate),
            ..self
        }
    }

    fn get_clock_rate(&self) -> f64 {
        self.clock_rate.unwrap_or_else(|| self.mods.clock_rate())
    }

    fn mod_mult(&self, val: f32) -> f32 {
        if self.mods.hr() {
            (val * 1.4).min(10.0)
        } else if self.mods.ez() {
            val * 0.5
        } else {
            val
        }
    }

    /// Calculate the AR and OD hit windows.
    pub fn hit_windows(&self) -> HitWindows {
        let clock_rate = self.get_clock_rate();

        let raw_ar = f64::from(self.mod_mult(self.ar));
        let preempt = difficulty_range(
            raw_ar,
            Self::PREEMPT_MIN,
            Self::PREEMPT_AVG,
            Self::PREEMPT_MAX,
        ) / clock_rate;

        let raw_od = f64::from(self.mod_mult(self.od));

        let great = if self.mods.precise() {
            difficulty_range(
                raw_od,
                Self::PRECISE_GREAT_MIN,
                Self::PRECISE_GREAT_AVG,
                Self::PRECISE_GREAT_MAX,
            )
        } else {
            difficulty_range(raw_od, Self::GREAT_MIN, Self::GREAT_AVG, Self::GREAT_MAX)
        };

        HitWindows {
            ar: preempt,
            od_great: great / clock_rate,
        }
    }

    /// Calculate the [`BeatmapAttributes`].
    pub fn build(&self) -> BeatmapAttributes {
        let clock_rate = self.get_clock_rate();

        // HP
        let hp = (f64::from(self.hp) * self.mods.od_ar_hp_multiplier()).min(10.0);

        // CS
        let mut cs = self.cs;

        if self.mods.hr() {
            cs = (cs * 1.3).min(10.0);
        } else if self.mods.ez() {
            cs *= 0.5;
        }

        let hit_windows = self.hit_windows();
        let HitWindows { ar, od_great } = hit_windows;

        // AR
        let ar = if ar > 1200.0 {
            (1800.0 - ar) / 120.0
        } else {
            (1200.0 - ar) / 150.0 + 5.0
        };

        // OD
        let od = (80.0 - od_great) / 6.0;

        BeatmapAttributes {
            ar,
            od,
            cs: f64::from(cs),
            hp,
            clock_rate,
            hit_windows,
        }
    }
}

impl From<&Beatmap> for BeatmapAttributesBuilder {
    fn from(map: &Beatmap) -> Self {
        Self::new().map(map)
    }
}

impl Default for BeatmapAttributesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::{model::mods, util::float_ext::FloatExt};

    use super::*;

    #[test]
    fn consider_mods() {
        let attrs = BeatmapAttributesBuilder::new()
            .ar(8.5)
            .mods(mods::DOUBLE_TIME)
            .build();

        let expected = 10.0;

        assert!(attrs.ar.eq(expected), "{} != {expected}", attrs.ar);
    }

    #[test]
    fn great_window() {
        let windows = BeatmapAttributesBuilder::new().od(10.0).hit_windows();
        assert!(windows.od_great.eq(50.0), "{}", windows.od_great);

        let windows = BeatmapAttributesBuilder::new()
            .od(10.0)
            .mods(mods::PRECISE)
            .hit_windows();
        assert!(windows.od_great.eq(20.0), "{}", windows.od_great);

        let windows = BeatmapAttributesBuilder::new()
            .od(5.0)
            .clock_rate(1.5)
            .hit_windows();
        assert!(windows.od_great.eq(50.0), "{}", windows.od_great);
    }

    #[test]
    fn overall_difficulty_from_window() {
        let attrs = BeatmapAttributesBuilder::new().od(10.0).build();

        assert!(attrs.od.eq(5.0), "{}", attrs.od);
    }
}
