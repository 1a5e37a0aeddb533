use crate::osu::difficulty::{
    evaluators::{AimEvaluator, SpeedEvaluator},
    object::OsuDifficultyObject,
    skills::{aim::Aim, strain::strain_decay, tap::Tap},
};

use super::combine;

/// Exponentially decaying strain of a single actor in a single category.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ActorStrain {
    current_strain: f64,
}

impl ActorStrain {
    pub const fn current_strain(&self) -> f64 {
        self.current_strain
    }

    /// Decays the strain by `elapsed` milliseconds and adds `increment`.
    pub fn process(&mut self, elapsed: f64, decay_base: f64, increment: f64) {
        self.current_strain = self.current_strain * strain_decay(elapsed, decay_base) + increment;
    }
}

/// Strain state of an actor, i.e. a hand or the drag cursor.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Actor {
    pub aim: ActorStrain,
    pub speed: ActorStrain,
    /// Index of the last difficulty object handled by this actor.
    pub last: Option<usize>,
}

/// Everything a hypothesis needs to process the current object.
pub struct TouchStep<'a> {
    pub curr: &'a OsuDifficultyObject<'a>,
    pub objects: &'a [OsuDifficultyObject<'a>],
    pub include_sliders: bool,
    pub hit_window: f64,
    pub has_autopilot_mod: bool,
    /// Aim increment of the drag actor.
    ///
    /// The drag actor follows the regular cursor so its increments don't
    /// depend on the hypothesis and are only evaluated once per object.
    drag_aim: f64,
    /// Speed increment of the drag actor.
    drag_speed: f64,
}

impl<'a> TouchStep<'a> {
    pub fn new(
        curr: &'a OsuDifficultyObject<'a>,
        objects: &'a [OsuDifficultyObject<'a>],
        include_sliders: bool,
        hit_window: f64,
        has_autopilot_mod: bool,
    ) -> Self {
        let drag_aim = AimEvaluator::evaluate_diff_of(curr, objects, include_sliders)
            * Aim::SKILL_MULTIPLIER;
        let drag_speed =
            SpeedEvaluator::evaluate_diff_of(curr, objects, hit_window, has_autopilot_mod)
                * Tap::SKILL_MULTIPLIER;

        Self {
            curr,
            objects,
            include_sliders,
            hit_window,
            has_autopilot_mod,
            drag_aim,
            drag_speed,
        }
    }

    /// Strain increments of a hand whose previous object was `last`.
    fn hand_increments(&self, last: &OsuDifficultyObject<'_>) -> (f64, f64) {
        let aim = AimEvaluator::evaluate_hand_movement(self.curr, last, self.include_sliders)
            * Aim::SKILL_MULTIPLIER;
        let speed = SpeedEvaluator::evaluate_hand_tap(
            self.curr,
            last,
            self.objects,
            self.hit_window,
            self.has_autopilot_mod,
        ) * Tap::SKILL_MULTIPLIER;

        (aim, speed)
    }
}

/// One hypothesis about which actor handled each object so far.
///
/// Actors `0..N - 1` are hands and the last actor is the drag cursor. The
/// type is `Copy` so that branching always produces independent states.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchProbability<const N: usize> {
    pub probability: f64,
    actors: [Actor; N],
    /// The actor that handled the latest object.
    current: usize,
}

impl<const N: usize> TouchProbability<N> {
    /// Index of the drag actor.
    pub const DRAG: usize = N - 1;

    pub fn new() -> Self {
        Self {
            probability: 1.0,
            actors: [Actor::default(); N],
            current: Self::DRAG,
        }
    }

    /// Assigns the current object to the given actor.
    pub fn process(&mut self, actor_idx: usize, step: &TouchStep<'_>) {
        let curr = step.curr;
        let actor = &mut self.actors[actor_idx];

        let last = actor.last.and_then(|idx| step.objects.get(idx));

        let (aim, speed) = if actor_idx == Self::DRAG {
            (step.drag_aim, step.drag_speed)
        } else {
            // A hand without history has nothing to move from
            last.map_or((0.0, 0.0), |last| step.hand_increments(last))
        };

        let elapsed = last.map_or(0.0, |last| curr.start_time - last.start_time);

        actor.aim.process(elapsed, Aim::STRAIN_DECAY_BASE, aim);
        actor.speed.process(elapsed, Tap::STRAIN_DECAY_BASE, speed);
        actor.last = Some(curr.idx);
        self.current = actor_idx;
    }

    pub fn actors(&self) -> &[Actor; N] {
        &self.actors
    }

    pub const fn current_actor(&self) -> usize {
        self.current
    }

    /// Aim strain of the actor that handled the latest object.
    pub fn aim_strain(&self) -> f64 {
        self.actors[self.current].aim.current_strain()
    }

    /// Speed strain of the actor that handled the latest object.
    pub fn speed_strain(&self) -> f64 {
        self.actors[self.current].speed.current_strain()
    }

    /// Aim and speed strain folded into one value.
    pub fn total_strain(&self) -> f64 {
        combine(self.aim_strain(), self.speed_strain())
    }
}

impl<const N: usize> Default for TouchProbability<N> {
    fn default() -> Self {
        Self::new()
    }
}
