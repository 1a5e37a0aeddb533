use crate::{model::beatmap::Beatmap, Difficulty};

use super::difficulty::{
    skills::{strain::StrainSkill, OsuSkills},
    DifficultyValues,
};

/// The result of calculating the strains on a osu! map.
///
/// Suitable to plot the difficulty of a map over time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OsuStrains {
    /// Strain peaks of the aim skill.
    pub aim: Vec<f64>,
    /// Strain peaks of the aim skill without sliders.
    pub aim_no_sliders: Vec<f64>,
    /// Strain peaks of the tap skill.
    pub tap: Vec<f64>,
    /// Strain peaks of the rhythm skill.
    pub rhythm: Vec<f64>,
    /// Strain peaks of the flashlight skill.
    pub flashlight: Vec<f64>,
    /// Strain peaks of the visual skill.
    pub visual: Vec<f64>,
}

impl OsuStrains {
    /// Time between two strains in ms.
    pub const SECTION_LEN: f64 = 400.0;
}

pub fn strains(difficulty: &Difficulty, map: &Beatmap) -> OsuStrains {
    let DifficultyValues {
        skills:
            OsuSkills {
                aim,
                aim_no_sliders,
                tap,
                rhythm,
                flashlight,
                visual,
            },
        attrs: _,
    } = DifficultyValues::calculate(difficulty, map);

    OsuStrains {
        aim: aim.into_current_strain_peaks().into_vec(),
        aim_no_sliders: aim_no_sliders.into_current_strain_peaks().into_vec(),
        tap: tap.into_current_strain_peaks().into_vec(),
        rhythm: rhythm.into_current_strain_peaks().into_vec(),
        flashlight: flashlight.into_current_strain_peaks().into_vec(),
        visual: visual.into_current_strain_peaks().into_vec(),
    }
}
