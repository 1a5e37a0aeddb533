/// Defines a strain skill struct alongside its `new` function and implements
/// [`StrainSkill`] for it, as well as [`StrainDecaySkill`] if specified.
///
/// Every field needs an initializer which may refer to the arguments of
/// `new`. Section bookkeeping is stored in an additional `sections` field.
///
/// A `StrainSkill` must provide the inherent methods
/// `calculate_initial_strain` and `strain_value_at`. A `StrainDecaySkill`
/// must instead provide `strain_value_of` and the constants
/// `SKILL_MULTIPLIER` and `STRAIN_DECAY_BASE`; its strain is stored in an
/// additional `decay_strain` field.
///
/// Inherent constants and a `difficulty_value` function take priority over
/// the trait's defaults.
///
/// [`StrainSkill`]: crate::osu::difficulty::skills::strain::StrainSkill
/// [`StrainDecaySkill`]: crate::osu::difficulty::skills::strain::StrainDecaySkill
macro_rules! define_skill {
    (
        $( #[$meta:meta] )*
        $vis:vis struct $skill:ident: StrainSkill => $objects:ty[$object:ty] {
            $( $fields:tt )*
        }

        $new_vis:vis fn new( $( $args:tt )* );
    ) => {
        define_skill! {
            @struct $( #[$meta] )* $vis $skill
            fields { $( $fields )* }
            decay {}
            new $new_vis ( $( $args )* )
        }

        define_skill!( @impl StrainSkill $skill $objects[$object] );
    };

    (
        $( #[$meta:meta] )*
        $vis:vis struct $skill:ident: StrainDecaySkill => $objects:ty[$object:ty] {
            $( $fields:tt )*
        }

        $new_vis:vis fn new( $( $args:tt )* );
    ) => {
        define_skill! {
            @struct $( #[$meta] )* $vis $skill
            fields { $( $fields )* }
            decay { decay_strain }
            new $new_vis ( $( $args )* )
        }

        define_skill!( @impl StrainSkill $skill $objects[$object] );
        define_skill!( @impl StrainDecaySkill $skill $objects[$object] );
    };

    (
        @struct $( #[$meta:meta] )* $vis:vis $skill:ident
        fields { $( $field:ident: $field_ty:ty = $init:expr, )* }
        decay { $( $decay_field:ident )? }
        new $new_vis:vis ( $( $arg:ident: $arg_ty:ty ),* $(,)? )
    ) => {
        $( #[$meta] )*
        $vis struct $skill {
            $( $field: $field_ty, )*
            $( $decay_field: f64, )?
            sections: crate::osu::difficulty::skills::strain::StrainSections,
        }

        impl $skill {
            $new_vis fn new( $( $arg: $arg_ty ),* ) -> Self {
                Self {
                    $( $field: $init, )*
                    $( $decay_field: 0.0, )?
                    sections: crate::osu::difficulty::skills::strain::StrainSections::new(),
                }
            }
        }
    };

    ( @impl StrainSkill $skill:ident $objects:ty[$object:ty] ) => {
        const _: () = {
            #[allow(unused_imports)]
            use crate::{
                osu::difficulty::{
                    object::{HasStartTime, IDifficultyObject},
                    skills::strain::{self, StrainDecaySkill, StrainSkill},
                },
                util::strains_vec::StrainsVec,
            };

            impl StrainSkill for $skill {
                type DifficultyObject<'a> = $object;
                type DifficultyObjects<'a> = $objects;

                fn process<'a>(
                    &mut self,
                    curr: &Self::DifficultyObject<'a>,
                    objects: &Self::DifficultyObjects<'a>,
                ) {
                    let section_length = f64::from(Self::SECTION_LENGTH);

                    // The first object has no strain so the first section
                    // ends after it
                    if curr.idx == 0 {
                        self.sections.current_section_end =
                            f64::ceil(curr.start_time / section_length) * section_length;
                    }

                    while curr.start_time > self.sections.current_section_end {
                        let initial_strain = self.calculate_initial_strain(
                            self.sections.current_section_end,
                            curr,
                            objects,
                        );

                        self.sections.next_section(initial_strain, section_length);
                    }

                    let strain = self.strain_value_at(curr, objects);
                    self.sections.add_object_strain(strain);
                }

                fn object_strains(&self) -> &StrainsVec {
                    &self.sections.object_strains
                }

                fn into_current_strain_peaks(self) -> StrainsVec {
                    self.sections.into_peaks()
                }

                fn difficulty_value(current_strain_peaks: StrainsVec) -> f64 {
                    strain::difficulty_value(
                        current_strain_peaks,
                        Self::REDUCED_SECTION_COUNT,
                        Self::REDUCED_STRAIN_BASELINE,
                        Self::DECAY_WEIGHT,
                    )
                }

                fn into_difficulty_value(self) -> f64 {
                    Self::difficulty_value(self.sections.into_peaks())
                }
            }
        };
    };

    ( @impl StrainDecaySkill $skill:ident $objects:ty[$object:ty] ) => {
        const _: () = {
            use crate::osu::difficulty::{
                object::{HasStartTime, IDifficultyObject},
                skills::strain::{self, StrainDecaySkill},
            };

            impl StrainDecaySkill for $skill {
                fn calculate_initial_strain<'a>(
                    &self,
                    time: f64,
                    curr: &Self::DifficultyObject<'a>,
                    objects: &Self::DifficultyObjects<'a>,
                ) -> f64 {
                    let prev_start_time = curr
                        .previous(0, objects)
                        .map_or(0.0, HasStartTime::start_time);

                    self.decay_strain * Self::strain_decay(time - prev_start_time)
                }

                fn strain_value_at<'a>(
                    &mut self,
                    curr: &Self::DifficultyObject<'a>,
                    objects: &Self::DifficultyObjects<'a>,
                ) -> f64 {
                    self.decay_strain *= Self::strain_decay(curr.delta_time);
                    self.decay_strain += self.strain_value_of(curr, objects) * Self::SKILL_MULTIPLIER;

                    self.decay_strain
                }

                fn strain_decay(ms: f64) -> f64 {
                    strain::strain_decay(ms, Self::STRAIN_DECAY_BASE)
                }
            }
        };
    };
}
