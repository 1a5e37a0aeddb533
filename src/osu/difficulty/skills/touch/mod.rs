//! Touch device skills.
//!
//! On touch devices objects may be hit by either hand or by dragging a single
//! cursor. Since the assignment is unknown, a bounded beam search keeps the
//! most probable hypotheses about which actor handled each object and blends
//! their strains.

use std::marker::PhantomData;

use crate::osu::difficulty::object::OsuDifficultyObject;

pub use self::{
    aim::TouchAim,
    probability::{Actor, ActorStrain, TouchProbability, TouchStep},
    tap::TouchTap,
};

mod aim;
mod probability;
mod tap;

/// Default amount of actors: left hand, right hand, and drag.
pub const ACTOR_COUNT: usize = 3;

/// Folds aim and speed strain into one value.
///
/// Both can't be maximally stressed at once so this lies between the maximum
/// and the sum of both.
pub fn combine(aim_strain: f64, speed_strain: f64) -> f64 {
    (aim_strain.powf(1.5) + speed_strain.powf(1.5)).powf(2.0 / 3.0)
}

/// Selects which category's strain a touch skill emits.
pub trait TouchFocus {
    fn strain<const N: usize>(probability: &TouchProbability<N>) -> f64;
}

#[derive(Copy, Clone, Debug)]
pub struct AimFocus;

impl TouchFocus for AimFocus {
    fn strain<const N: usize>(probability: &TouchProbability<N>) -> f64 {
        probability.aim_strain()
    }
}

#[derive(Copy, Clone, Debug)]
pub struct SpeedFocus;

impl TouchFocus for SpeedFocus {
    fn strain<const N: usize>(probability: &TouchProbability<N>) -> f64 {
        probability.speed_strain()
    }
}

/// Beam search over actor assignments.
#[derive(Clone, Debug)]
pub struct TouchBeam<F, const N: usize = ACTOR_COUNT> {
    probabilities: Vec<TouchProbability<N>>,
    include_sliders: bool,
    hit_window: f64,
    has_autopilot_mod: bool,
    focus: PhantomData<F>,
}

impl<F: TouchFocus, const N: usize> TouchBeam<F, N> {
    /// Maximum amount of hypotheses kept after each object.
    pub const MAX_PROBABILITIES: usize = 15;

    pub fn new(include_sliders: bool, hit_window: f64, has_autopilot_mod: bool) -> Self {
        Self {
            probabilities: Vec::with_capacity(Self::MAX_PROBABILITIES * N),
            include_sliders,
            hit_window,
            has_autopilot_mod,
            focus: PhantomData,
        }
    }

    /// The currently kept hypotheses, sorted by descending probability.
    pub fn probabilities(&self) -> &[TouchProbability<N>] {
        &self.probabilities
    }

    /// Processes the current object and returns its blended strain.
    ///
    /// Objects must be processed in order.
    pub fn process<'a>(
        &mut self,
        curr: &'a OsuDifficultyObject<'a>,
        objects: &'a [OsuDifficultyObject<'a>],
    ) -> f64 {
        let step = TouchStep::new(
            curr,
            objects,
            self.include_sliders,
            self.hit_window,
            self.has_autopilot_mod,
        );

        if curr.idx == 0 || self.probabilities.is_empty() {
            let mut probability = TouchProbability::new();

            // The first object only adds to the history
            probability.process(TouchProbability::<N>::DRAG, &step);

            self.probabilities.clear();
            self.probabilities.push(probability);

            return 0.0;
        }

        let mut next = Vec::with_capacity(self.probabilities.len() * N);

        for parent in self.probabilities.iter() {
            let mut branches = [*parent; N];
            let mut strains = [0.0; N];

            for (actor, (branch, strain)) in branches.iter_mut().zip(strains.iter_mut()).enumerate()
            {
                branch.process(actor, &step);
                *strain = branch.total_strain();
            }

            let weights = branch_weights(&strains);

            for (mut branch, weight) in branches.into_iter().zip(weights) {
                branch.probability *= weight;
                next.push(branch);
            }
        }

        // Stable sort so that equally probable branches keep actor order
        next.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        next.truncate(Self::MAX_PROBABILITIES);

        let total: f64 = next.iter().map(|probability| probability.probability).sum();
        let uniform = (next.len() as f64).recip();

        let mut strain = 0.0;

        for probability in next.iter_mut() {
            probability.probability = if total > 0.0 {
                probability.probability / total
            } else {
                uniform
            };

            strain += F::strain(probability) * probability.probability;
        }

        self.probabilities = next;

        strain
    }
}

/// Weighs the branches of one parent.
///
/// Each branch is weighed by the geometric mean of the *other* branches'
/// strains so that the least straining assignment is the most probable.
fn branch_weights<const N: usize>(strains: &[f64; N]) -> [f64; N] {
    if N == 1 {
        return [1.0; N];
    }

    let mut weights = [0.0; N];

    for (i, weight) in weights.iter_mut().enumerate() {
        let product: f64 = strains
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, strain)| *strain)
            .product();

        *weight = match N - 1 {
            1 => product,
            2 => product.sqrt(),
            degree => product.powf((degree as f64).recip()),
        };
    }

    let sum: f64 = weights.iter().sum();

    if sum > 0.0 {
        for weight in weights.iter_mut() {
            *weight /= sum;
        }

        weights
    } else {
        #[cfg(feature = "tracing")]
        tracing::trace!(?strains, "no strain on any branch, weighing uniformly");

        [(N as f64).recip(); N]
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{
        model::hit_object::{HitObject, Pos},
        osu::{
            difficulty::{
                create_difficulty_objects,
                evaluators::SpeedEvaluator,
                scaling_factor::ScalingFactor,
                skills::{strain::strain_decay, tap::Tap},
            },
            object::OsuObject,
        },
        util::float_ext::FloatExt,
    };

    use super::*;

    fn osu_objects(hit_objects: &[HitObject]) -> (Vec<OsuObject>, ScalingFactor) {
        let scaling_factor = ScalingFactor::new(4.0);

        let objects = hit_objects
            .iter()
            .map(|h| OsuObject::new(h, &scaling_factor))
            .collect();

        (objects, scaling_factor)
    }

    fn run_beam<F: TouchFocus, const N: usize>(hit_objects: &[HitObject]) -> Vec<f64> {
        let (osu_objects, scaling_factor) = osu_objects(hit_objects);
        let diff_objects = create_difficulty_objects(&osu_objects, 1.0, &scaling_factor, 50.0);
        let mut beam = TouchBeam::<F, N>::new(true, 50.0, false);

        diff_objects
            .iter()
            .map(|curr| {
                let strain = beam.process(curr, &diff_objects);
                let probabilities = beam.probabilities();

                assert!(!probabilities.is_empty());
                assert!(probabilities.len() <= TouchBeam::<F, N>::MAX_PROBABILITIES);

                let sum: f64 = probabilities.iter().map(|p| p.probability).sum();
                assert!((sum - 1.0).abs() <= 1e-9, "probability sum {sum}");

                strain
            })
            .collect()
    }

    fn jumps(count: usize, spacing: f64) -> Vec<HitObject> {
        (0..count)
            .map(|i| {
                let x = if i % 2 == 0 { 64.0 } else { 448.0 };
                let y = 64.0 + (i % 5) as f32 * 64.0;

                HitObject::circle(Pos::new(x, y), i as f64 * spacing)
            })
            .collect()
    }

    #[test]
    fn combine_strains() {
        assert!(combine(0.0, 0.0).eq(0.0));
        assert!(combine(3.0, 0.0).eq(3.0));
        assert!(combine(0.0, 4.0).eq(4.0));

        let both = combine(2.0, 2.0);
        assert!(both > 2.0 && both < 4.0);
    }

    #[test]
    fn weights_favor_least_strain() {
        let weights = branch_weights(&[1.0, 4.0, 9.0]);

        assert!(weights[0] > weights[1] && weights[1] > weights[2]);
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);

        // sqrt(4 * 9), sqrt(1 * 9), sqrt(1 * 4)
        let expected = [6.0 / 11.0, 3.0 / 11.0, 2.0 / 11.0];

        for (weight, expected) in weights.into_iter().zip(expected) {
            assert!(weight.eq(expected), "{weight} != {expected}");
        }
    }

    #[test]
    fn weights_fall_back_to_uniform() {
        let weights = branch_weights(&[0.0, 0.0, 0.0]);
        assert!(weights.iter().all(|&w| w.eq(1.0 / 3.0)));

        let weights = branch_weights(&[0.0, 0.0, 0.0, 0.0]);
        assert!(weights.iter().all(|&w| w.eq(0.25)));

        assert_eq!(branch_weights(&[5.0]), [1.0]);
    }

    #[test]
    fn first_object_has_no_strain() {
        let strains = run_beam::<AimFocus, ACTOR_COUNT>(&jumps(2, 200.0));

        assert_eq!(strains.len(), 1);
        assert!(strains[0].eq(0.0));
    }

    #[test]
    fn beam_is_bounded() {
        let hit_objects = jumps(40, 150.0);

        let aim = run_beam::<AimFocus, ACTOR_COUNT>(&hit_objects);
        let speed = run_beam::<SpeedFocus, ACTOR_COUNT>(&hit_objects);

        assert!(aim.iter().skip(1).any(|&strain| strain > 0.0));
        assert!(speed.iter().skip(1).any(|&strain| strain > 0.0));
    }

    #[test]
    fn synthetic_actor_counts() {
        let hit_objects = jumps(30, 120.0);

        for strain in run_beam::<SpeedFocus, 2>(&hit_objects) {
            assert!(strain.is_finite() && strain >= 0.0);
        }

        for strain in run_beam::<AimFocus, 4>(&hit_objects) {
            assert!(strain.is_finite() && strain >= 0.0);
        }

        for strain in run_beam::<AimFocus, 1>(&hit_objects) {
            assert!(strain.is_finite() && strain >= 0.0);
        }
    }

    #[test]
    fn stacked_objects_stay_finite() {
        let hit_objects: Vec<_> = (0..20)
            .map(|i| HitObject::circle(Pos::new(256.0, 192.0), f64::from(i) * 10.0))
            .collect();

        for strain in run_beam::<SpeedFocus, ACTOR_COUNT>(&hit_objects) {
            assert!(strain.is_finite());
        }
    }

    #[test]
    fn branches_are_independent() {
        let hit_objects = jumps(6, 200.0);
        let (osu_objects, scaling_factor) = osu_objects(&hit_objects);
        let diff_objects = create_difficulty_objects(&osu_objects, 1.0, &scaling_factor, 50.0);
        let mut beam = TouchBeam::<AimFocus>::new(true, 50.0, false);

        for curr in diff_objects.iter() {
            beam.process(curr, &diff_objects);
        }

        // Every hypothesis assigned the latest object to its current actor
        let last_idx = diff_objects.len() - 1;

        for probability in beam.probabilities() {
            let actor = &probability.actors()[probability.current_actor()];
            assert_eq!(actor.last, Some(last_idx));
        }
    }

    #[test]
    fn second_object_splits_evenly() {
        let hit_objects = jumps(3, 200.0);
        let (osu_objects, scaling_factor) = osu_objects(&hit_objects);
        let diff_objects = create_difficulty_objects(&osu_objects, 1.0, &scaling_factor, 50.0);
        let mut beam = TouchBeam::<SpeedFocus>::new(true, 50.0, false);

        assert!(beam.process(&diff_objects[0], &diff_objects).eq(0.0));
        let strain = beam.process(&diff_objects[1], &diff_objects);

        let speed = |i: usize| {
            SpeedEvaluator::evaluate_diff_of(&diff_objects[i], &diff_objects, 50.0, false)
                * Tap::SKILL_MULTIPLIER
        };

        let elapsed = diff_objects[1].start_time - diff_objects[0].start_time;
        let drag = speed(0) * strain_decay(elapsed, Tap::STRAIN_DECAY_BASE) + speed(1);

        // Hands without history add no strain so every branch weighs 1/3
        // and only the drag branch contributes
        assert!(drag > 0.0);
        assert!((strain - drag / 3.0).abs() <= 1e-12 * drag.max(1.0));

        let probabilities = beam.probabilities();
        assert_eq!(probabilities.len(), ACTOR_COUNT);

        for (actor, probability) in probabilities.iter().enumerate() {
            assert_eq!(probability.current_actor(), actor);
            assert!((probability.probability - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn keeps_most_probable_branches() {
        let hit_objects = jumps(8, 150.0);
        let (osu_objects, scaling_factor) = osu_objects(&hit_objects);
        let diff_objects = create_difficulty_objects(&osu_objects, 1.0, &scaling_factor, 50.0);
        let mut beam = TouchBeam::<AimFocus>::new(true, 50.0, false);

        let mut expected: Vec<TouchProbability<ACTOR_COUNT>> = Vec::new();
        let mut truncated = false;

        for curr in diff_objects.iter() {
            let strain = beam.process(curr, &diff_objects);
            let step = TouchStep::new(curr, &diff_objects, true, 50.0, false);

            if expected.is_empty() {
                let mut first = TouchProbability::new();
                first.process(TouchProbability::<ACTOR_COUNT>::DRAG, &step);
                expected.push(first);

                assert!(strain.eq(0.0));
                assert_eq!(beam.probabilities(), expected.as_slice());

                continue;
            }

            let mut children = Vec::new();

            for parent in expected.iter() {
                let branches: [TouchProbability<ACTOR_COUNT>; ACTOR_COUNT] =
                    std::array::from_fn(|actor| {
                        let mut branch = *parent;
                        branch.process(actor, &step);

                        branch
                    });

                let weights = branch_weights(&branches.map(|branch| branch.total_strain()));

                for (mut branch, weight) in branches.into_iter().zip(weights) {
                    branch.probability *= weight;
                    children.push(branch);
                }
            }

            assert_eq!(children.len(), expected.len() * ACTOR_COUNT);

            let mut kept = children.clone();
            kept.sort_by(|a, b| b.probability.total_cmp(&a.probability));
            kept.truncate(15);

            truncated |= kept.len() < children.len();

            let total: f64 = kept.iter().map(|p| p.probability).sum();
            assert!(total > 0.0);

            let mut blended = 0.0;

            for probability in kept.iter_mut() {
                probability.probability /= total;
                blended += AimFocus::strain(probability) * probability.probability;
            }

            assert_eq!(beam.probabilities(), kept.as_slice());
            assert!(strain.eq(blended));

            expected = kept;
        }

        // 9 parents branch into 27 children at the fourth object
        assert!(truncated);
        assert_eq!(expected.len(), 15);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn probabilities_sum_to_one(
            deltas in prop::collection::vec(1.0_f64..400.0, 1..60),
            xs in prop::collection::vec(0.0_f32..512.0, 60),
        ) {
            let mut time = 0.0;

            let hit_objects: Vec<_> = deltas
                .iter()
                .zip(xs.iter())
                .map(|(delta, &x)| {
                    time += delta;

                    HitObject::circle(Pos::new(x, 192.0), time)
                })
                .collect();

            run_beam::<SpeedFocus, ACTOR_COUNT>(&hit_objects);
        }
    }
}
