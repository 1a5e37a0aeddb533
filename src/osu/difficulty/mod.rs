use crate::{
    model::{
        beatmap::{Beatmap, BeatmapAttributes, TooSuspicious},
        mods::Mods,
    },
    osu::{
        attributes::OsuDifficultyAttributes,
        convert::convert_objects,
        object::OsuObject,
        strains::{strains, OsuStrains},
    },
};

use self::{
    object::OsuDifficultyObject,
    rating::{Ratings, SkillValues},
    scaling_factor::ScalingFactor,
    skills::{strain::StrainSkill, OsuSkills},
};

pub mod evaluators;
pub mod object;
pub mod rating;
pub mod scaling_factor;
pub mod skills;

const DIFFICULTY_MULTIPLIER: f64 = 0.18;

const HD_FADE_IN_DURATION_MULTIPLIER: f64 = 0.4;
const HD_FADE_OUT_DURATION_MULTIPLIER: f64 = 0.3;

/// Difficulty calculator on osu!standard maps.
///
/// # Example
///
/// ```
/// use touch_pp::{model::mods, Beatmap, Difficulty};
///
/// let map = Beatmap::default();
///
/// let attrs = Difficulty::new()
///     .mods(mods::HIDDEN | mods::TOUCH_DEVICE)
///     .clock_rate(1.2)
///     .calculate(&map);
///
/// assert_eq!(attrs.stars, 0.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct Difficulty {
    mods: u32,
    passed_objects: Option<u32>,
    clock_rate: Option<f64>,
}

impl Difficulty {
    /// Create a new difficulty calculator.
    pub const fn new() -> Self {
        Self {
            mods: 0,
            passed_objects: None,
            clock_rate: None,
        }
    }

    /// Specify mods through their bit values.
    ///
    /// See [`crate::model::mods`] for the available bits.
    pub const fn mods(self, mods: u32) -> Self {
        Self { mods, ..self }
    }

    /// Amount of passed objects for partial plays, e.g. a fail.
    pub const fn passed_objects(self, passed_objects: u32) -> Self {
        Self {
            passed_objects: Some(passed_objects),
            ..self
        }
    }

    /// Adjust the clock rate used in the calculation.
    ///
    /// If none is specified, it will take the clock rate based on the mods
    /// i.e. 1.5 for DT, 0.75 for HT and 1.0 otherwise.
    pub const fn clock_rate(self, clock_rate: f64) -> Self {
        Self {
            clock_rate: Some(clock_rate),
            ..self
        }
    }

    /// Perform the difficulty calculation.
    pub fn calculate(&self, map: &Beatmap) -> OsuDifficultyAttributes {
        if map.hit_objects.is_empty() || self.get_passed_objects() == 0 {
            return OsuDifficultyAttributes::default();
        }

        let DifficultyValues { skills, mut attrs } = DifficultyValues::calculate(self, map);

        DifficultyValues::eval(&mut attrs, self.mods, skills);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            stars = attrs.stars,
            n_objects = attrs.n_objects(),
            mods = self.mods,
            "Calculated difficulty"
        );

        attrs
    }

    /// Same as [`Difficulty::calculate`] but first checks whether the map's
    /// hitobjects appear too suspicious for a meaningful calculation.
    pub fn checked_calculate(
        &self,
        map: &Beatmap,
    ) -> Result<OsuDifficultyAttributes, TooSuspicious> {
        if let Err(err) = map.check_suspicion() {
            #[cfg(feature = "tracing")]
            tracing::warn!(%err, "Skipping difficulty calculation");

            return Err(err);
        }

        Ok(self.calculate(map))
    }

    /// Perform the difficulty calculation but instead of evaluating the skill
    /// strains, return them as is.
    ///
    /// Suitable to plot the difficulty of a map over time.
    pub fn strains(&self, map: &Beatmap) -> OsuStrains {
        strains(self, map)
    }

    pub const fn get_mods(&self) -> u32 {
        self.mods
    }

    pub fn get_clock_rate(&self) -> f64 {
        self.clock_rate.unwrap_or_else(|| self.mods.clock_rate())
    }

    pub fn get_passed_objects(&self) -> usize {
        self.passed_objects.map_or(usize::MAX, |n| n as usize)
    }
}

/// Map dependent values that are required before processing hitobjects.
pub struct OsuDifficultySetup {
    pub scaling_factor: ScalingFactor,
    pub map_attrs: BeatmapAttributes,
    pub attrs: OsuDifficultyAttributes,
    /// Preempt time before the clock rate is applied.
    pub time_preempt: f64,
}

impl OsuDifficultySetup {
    pub fn new(difficulty: &Difficulty, map: &Beatmap) -> Self {
        let clock_rate = difficulty.get_clock_rate();

        let map_attrs = map
            .attributes()
            .mods(difficulty.get_mods())
            .clock_rate(clock_rate)
            .build();

        let scaling_factor = ScalingFactor::new(map_attrs.cs);

        let attrs = OsuDifficultyAttributes {
            ar: map_attrs.ar,
            hp: map_attrs.hp,
            od: map_attrs.od,
            great_hit_window: map_attrs.hit_windows.od_great,
            ..Default::default()
        };

        let time_preempt = f64::from((map_attrs.hit_windows.ar * clock_rate) as f32);

        Self {
            scaling_factor,
            map_attrs,
            attrs,
            time_preempt,
        }
    }

    fn skills(&self, mods: u32, hit_window_great: f64) -> OsuSkills {
        OsuSkills::new(
            mods,
            hit_window_great,
            &self.scaling_factor,
            &self.map_attrs,
            self.time_preempt,
        )
    }
}

/// Processed skills alongside the attributes that are already known.
pub struct DifficultyValues {
    pub skills: OsuSkills,
    pub attrs: OsuDifficultyAttributes,
}

impl DifficultyValues {
    pub fn calculate(difficulty: &Difficulty, map: &Beatmap) -> Self {
        let mut setup = OsuDifficultySetup::new(difficulty, map);

        let osu_objects = convert_objects(
            map,
            &setup.scaling_factor,
            difficulty.get_passed_objects(),
            &mut setup.attrs,
        );

        let hit_window_great = setup.map_attrs.hit_windows.od_great;

        let diff_objects = create_difficulty_objects(
            &osu_objects,
            setup.map_attrs.clock_rate,
            &setup.scaling_factor,
            hit_window_great,
        );

        let skills = Self::process(
            &diff_objects,
            difficulty.get_mods(),
            hit_window_great,
            &setup,
        );

        Self {
            skills,
            attrs: setup.attrs,
        }
    }

    fn process(
        diff_objects: &[OsuDifficultyObject<'_>],
        mods: u32,
        hit_window_great: f64,
        setup: &OsuDifficultySetup,
    ) -> OsuSkills {
        let mut skills = setup.skills(mods, hit_window_great);

        for curr in diff_objects {
            skills.process(curr, diff_objects);
        }

        skills
    }

    /// Process the difficulty values and store the results in `attrs`.
    pub fn eval(attrs: &mut OsuDifficultyAttributes, mods: u32, skills: OsuSkills) {
        let OsuSkills {
            aim,
            aim_no_sliders,
            tap,
            rhythm,
            flashlight,
            visual,
        } = skills;

        let aim_difficult_slider_count = aim.difficult_slider_count();
        let speed_note_count = tap.relevant_note_count();

        let values = SkillValues {
            aim: aim.into_difficulty_value(),
            aim_no_sliders: aim_no_sliders.into_difficulty_value(),
            tap: tap.into_difficulty_value(),
            rhythm: rhythm.into_difficulty_value(),
            flashlight: flashlight.into_difficulty_value(),
            visual: visual.into_difficulty_value(),
        };

        let Ratings {
            aim,
            aim_no_sliders,
            tap,
            rhythm,
            flashlight,
            visual,
            slider_factor,
            stars,
        } = values.ratings(mods);

        attrs.aim = aim;
        attrs.aim_no_sliders = aim_no_sliders;
        attrs.tap = tap;
        attrs.rhythm = rhythm;
        attrs.flashlight = flashlight;
        attrs.visual = visual;
        attrs.slider_factor = slider_factor;
        attrs.speed_note_count = speed_note_count;
        attrs.aim_difficult_slider_count = aim_difficult_slider_count;
        attrs.stars = stars;
    }
}

/// Evaluate prepared difficulty objects into attributes.
///
/// All attributes that are not derived from the skills, e.g. the object
/// counts, are taken from `setup`.
pub fn compute_attributes(
    diff_objects: &[OsuDifficultyObject<'_>],
    hit_window_great: f64,
    mods: u32,
    setup: &OsuDifficultySetup,
) -> OsuDifficultyAttributes {
    let mut attrs = setup.attrs.clone();

    if diff_objects.is_empty() && attrs.n_objects() == 0 {
        return OsuDifficultyAttributes::default();
    }

    let skills = DifficultyValues::process(diff_objects, mods, hit_window_great, setup);
    DifficultyValues::eval(&mut attrs, mods, skills);

    attrs
}

/// Create a difficulty object for every hitobject but the first.
pub fn create_difficulty_objects<'a>(
    osu_objects: &'a [OsuObject],
    clock_rate: f64,
    scaling_factor: &ScalingFactor,
    hit_window_great: f64,
) -> Vec<OsuDifficultyObject<'a>> {
    let mut osu_objects_iter = osu_objects.iter();

    let Some(mut last) = osu_objects_iter.next() else {
        return Vec::new();
    };

    let mut last_last = None;

    osu_objects_iter
        .enumerate()
        .map(|(idx, h)| {
            let diff_object = OsuDifficultyObject::new(
                h,
                last,
                last_last,
                clock_rate,
                idx,
                scaling_factor,
                hit_window_great,
            );

            last_last = Some(last);
            last = h;

            diff_object
        })
        .collect()
}
