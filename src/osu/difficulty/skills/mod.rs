use crate::{
    model::{beatmap::BeatmapAttributes, mods::Mods},
    osu::object::OsuObject,
    util::strains_vec::StrainsVec,
};

use self::{
    aim::Aim,
    flashlight::Flashlight,
    rhythm::Rhythm,
    strain::StrainSkill,
    tap::Tap,
    touch::{TouchAim, TouchTap},
    visual::Visual,
};

use super::{
    evaluators::{FlashlightEvaluator, VisualEvaluator},
    object::OsuDifficultyObject,
    scaling_factor::ScalingFactor,
    HD_FADE_IN_DURATION_MULTIPLIER,
};

pub mod aim;
pub mod flashlight;
pub mod rhythm;
pub mod strain;
pub mod tap;
pub mod touch;
pub mod visual;

/// Aim skill, either for a mouse or for touch devices.
#[derive(Clone)]
pub enum AimSkill {
    Standard(Aim),
    Touch(TouchAim),
}

/// Tap skill, either for a mouse or for touch devices.
#[derive(Clone)]
pub enum TapSkill {
    Standard(Tap),
    Touch(TouchTap),
}

impl AimSkill {
    fn new(touch_device: bool, include_sliders: bool, hit_window: f64, autopilot: bool) -> Self {
        if touch_device {
            Self::Touch(TouchAim::new(include_sliders, hit_window, autopilot))
        } else {
            Self::Standard(Aim::new(include_sliders))
        }
    }

    pub fn process<'a>(
        &mut self,
        curr: &OsuDifficultyObject<'a>,
        objects: &[OsuDifficultyObject<'a>],
    ) {
        match self {
            Self::Standard(aim) => aim.process(curr, objects),
            Self::Touch(aim) => aim.process(curr, objects),
        }
    }

    /// Amount of sliders weighted by their strain.
    pub fn difficult_slider_count(&self) -> f64 {
        match self {
            Self::Standard(aim) => aim.difficult_slider_count(),
            Self::Touch(aim) => aim.difficult_slider_count(),
        }
    }

    pub fn into_difficulty_value(self) -> f64 {
        match self {
            Self::Standard(aim) => aim.into_difficulty_value(),
            Self::Touch(aim) => aim.into_difficulty_value(),
        }
    }

    pub fn into_current_strain_peaks(self) -> StrainsVec {
        match self {
            Self::Standard(aim) => aim.into_current_strain_peaks(),
            Self::Touch(aim) => aim.into_current_strain_peaks(),
        }
    }
}

impl TapSkill {
    fn new(touch_device: bool, hit_window: f64, autopilot: bool) -> Self {
        if touch_device {
            Self::Touch(TouchTap::new(hit_window, autopilot))
        } else {
            Self::Standard(Tap::new(hit_window, autopilot))
        }
    }

    pub fn process<'a>(
        &mut self,
        curr: &OsuDifficultyObject<'a>,
        objects: &[OsuDifficultyObject<'a>],
    ) {
        match self {
            Self::Standard(tap) => tap.process(curr, objects),
            Self::Touch(tap) => tap.process(curr, objects),
        }
    }

    /// Amount of notes weighted by their strain.
    pub fn relevant_note_count(&self) -> f64 {
        match self {
            Self::Standard(tap) => tap.relevant_note_count(),
            Self::Touch(tap) => tap.relevant_note_count(),
        }
    }

    pub fn into_difficulty_value(self) -> f64 {
        match self {
            Self::Standard(tap) => tap.into_difficulty_value(),
            Self::Touch(tap) => tap.into_difficulty_value(),
        }
    }

    pub fn into_current_strain_peaks(self) -> StrainsVec {
        match self {
            Self::Standard(tap) => tap.into_current_strain_peaks(),
            Self::Touch(tap) => tap.into_current_strain_peaks(),
        }
    }
}

/// All skills that are evaluated on an osu!standard map.
#[derive(Clone)]
pub struct OsuSkills {
    pub aim: AimSkill,
    pub aim_no_sliders: AimSkill,
    pub tap: TapSkill,
    pub rhythm: Rhythm,
    pub flashlight: Flashlight,
    pub visual: Visual,
}

impl OsuSkills {
    pub fn new(
        mods: u32,
        hit_window_great: f64,
        scaling_factor: &ScalingFactor,
        map_attrs: &BeatmapAttributes,
        time_preempt: f64,
    ) -> Self {
        // * Preempt time can go below 450ms when AR goes above 10 so the
        // * fade in duration is scaled down alongside it.
        let time_fade_in = if mods.hd() {
            time_preempt * HD_FADE_IN_DURATION_MULTIPLIER
        } else {
            400.0 * (time_preempt / OsuObject::PREEMPT_MIN).min(1.0)
        };

        let touch_device = mods.td();
        let autopilot = mods.ap();

        let aim = AimSkill::new(touch_device, true, hit_window_great, autopilot);
        let aim_no_sliders = AimSkill::new(touch_device, false, hit_window_great, autopilot);
        let tap = TapSkill::new(touch_device, hit_window_great, autopilot);
        let rhythm = Rhythm::new(hit_window_great);

        let flashlight = Flashlight::new(
            mods.hd(),
            FlashlightEvaluator::new(scaling_factor.flashlight(), time_preempt, time_fade_in),
        );

        let visual = Visual::new(
            mods.hd(),
            VisualEvaluator::new(time_preempt, time_fade_in, map_attrs.hit_windows.ar),
        );

        Self {
            aim,
            aim_no_sliders,
            tap,
            rhythm,
            flashlight,
            visual,
        }
    }

    pub fn process<'a>(
        &mut self,
        curr: &OsuDifficultyObject<'a>,
        objects: &[OsuDifficultyObject<'a>],
    ) {
        self.aim.process(curr, objects);
        self.aim_no_sliders.process(curr, objects);
        self.tap.process(curr, objects);
        self.rhythm.process(curr, objects);
        self.flashlight.process(curr, objects);
        self.visual.process(curr, objects);
    }
}
