use crate::util::{
    difficulty::{lerp, sigmoid},
    strains_vec::StrainsVec,
};

/// A skill that buckets per-object strains into sections and keeps the peak
/// of each section.
///
/// Implemented through `define_skill!`.
pub trait StrainSkill: Sized {
    type DifficultyObject<'a>;
    type DifficultyObjects<'a>: ?Sized;

    const DECAY_WEIGHT: f64 = 0.9;
    const SECTION_LENGTH: i32 = 400;
    const REDUCED_SECTION_COUNT: usize = 10;
    const REDUCED_STRAIN_BASELINE: f64 = 0.75;

    fn process<'a>(
        &mut self,
        curr: &Self::DifficultyObject<'a>,
        objects: &Self::DifficultyObjects<'a>,
    );

    /// Strain values of all processed objects.
    fn object_strains(&self) -> &StrainsVec;

    /// Peaks of all sections, including the current one.
    fn into_current_strain_peaks(self) -> StrainsVec;

    fn difficulty_value(current_strain_peaks: StrainsVec) -> f64;

    fn into_difficulty_value(self) -> f64;
}

/// A [`StrainSkill`] whose strain decays exponentially between objects.
pub trait StrainDecaySkill: StrainSkill {
    fn calculate_initial_strain<'a>(
        &self,
        time: f64,
        curr: &Self::DifficultyObject<'a>,
        objects: &Self::DifficultyObjects<'a>,
    ) -> f64;

    fn strain_value_at<'a>(
        &mut self,
        curr: &Self::DifficultyObject<'a>,
        objects: &Self::DifficultyObjects<'a>,
    ) -> f64;

    fn strain_decay(ms: f64) -> f64;
}

/// Section bookkeeping of a [`StrainSkill`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrainSections {
    pub current_section_peak: f64,
    pub current_section_end: f64,
    pub strain_peaks: StrainsVec,
    pub object_strains: StrainsVec,
}

impl StrainSections {
    pub fn new() -> Self {
        Self {
            current_section_peak: 0.0,
            current_section_end: 0.0,
            strain_peaks: StrainsVec::with_capacity(256),
            object_strains: StrainsVec::with_capacity(256),
        }
    }

    /// Stores the current peak and starts the next section with the given
    /// initial strain.
    pub fn next_section(&mut self, initial_strain: f64, section_length: f64) {
        self.strain_peaks.push(self.current_section_peak);
        self.current_section_peak = initial_strain;
        self.current_section_end += section_length;
    }

    pub fn add_object_strain(&mut self, strain: f64) {
        self.current_section_peak = self.current_section_peak.max(strain);
        self.object_strains.push(strain);
    }

    pub fn into_peaks(self) -> StrainsVec {
        let mut peaks = self.strain_peaks;
        peaks.push(self.current_section_peak);

        peaks
    }
}

/// Weighted sum of the section peaks where the hardest sections are scaled
/// down to reduce the impact of short difficulty spikes.
pub fn difficulty_value(
    current_strain_peaks: StrainsVec,
    reduced_section_count: usize,
    reduced_strain_baseline: f64,
    decay_weight: f64,
) -> f64 {
    let mut difficulty = 0.0;
    let mut weight = 1.0;

    // Sections with 0 strain are excluded to avoid worst-case time
    // complexity of the following sort; they don't contribute anyway.
    let mut peaks = current_strain_peaks;
    peaks.retain_non_zero_and_sort();

    for (i, strain) in peaks
        .as_mut_slice()
        .iter_mut()
        .take(reduced_section_count)
        .enumerate()
    {
        let clamped = f64::from((i as f32 / reduced_section_count as f32).clamp(0.0, 1.0));
        let scale = f64::log10(lerp(1.0, 10.0, clamped));
        *strain *= lerp(reduced_strain_baseline, 1.0, scale);
    }

    peaks.sort_desc();

    for strain in peaks.iter() {
        difficulty += strain * weight;
        weight *= decay_weight;
    }

    difficulty
}

pub fn strain_decay(ms: f64, strain_decay_base: f64) -> f64 {
    f64::powf(strain_decay_base, ms / 1000.0)
}

/// Effective amount of hard entries within the given strains.
///
/// Each strain contributes `sigmoid(12 * strain / max - 6)` so the count
/// saturates smoothly instead of thresholding. Empty series or series
/// without positive strain yield `0.0`.
pub fn relevant_strain_count(strains: &[f64]) -> f64 {
    let max_strain = strains.iter().copied().fold(0.0, f64::max);

    if max_strain <= 0.0 {
        return 0.0;
    }

    strains
        .iter()
        .map(|strain| sigmoid(strain / max_strain * 12.0 - 6.0))
        .sum()
}
