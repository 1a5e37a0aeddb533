//! Library to calculate the difficulty of [osu!] standard maps, including
//! touch device plays.
//!
//! ## Description
//!
//! On top of the established aim, speed and flashlight skills, `touch-pp`
//! evaluates the rhythm complexity of a map, how much reading the density of
//! visible objects demands, and, for the touch device mod, which hand is
//! most likely to hit each object.
//!
//! The latter is a bounded beam search over hand assignments: every object
//! may be hit by the left hand, the right hand, or by dragging the cursor.
//! Each hypothesis carries its own strain state and the resulting strain is
//! the probability-weighted sum over all surviving hypotheses.
//!
//! Decoding `.osu` files is not part of this crate; hitobjects are provided
//! by the caller through [`Beatmap`].
//!
//! ## Usage
//!
//! ```
//! use touch_pp::{
//!     model::{hit_object::{HitObject, Pos}, mods},
//!     Beatmap, Difficulty,
//! };
//!
//! let map = Beatmap {
//!     ar: 9.0,
//!     od: 8.0,
//!     cs: 4.0,
//!     hp: 5.0,
//!     hit_objects: (0..32)
//!         .map(|i| {
//!             let x = if i % 2 == 0 { 128.0 } else { 384.0 };
//!
//!             HitObject::circle(Pos::new(x, 192.0), f64::from(i) * 200.0)
//!         })
//!         .collect(),
//! };
//!
//! let attrs = Difficulty::new()
//!     .mods(mods::TOUCH_DEVICE | mods::HIDDEN)
//!     .calculate(&map);
//!
//! let stars = attrs.stars();
//! let strains = Difficulty::new().strains(&map);
//!
//! println!("Stars: {stars} | Aim peaks: {:?}", strains.aim);
//! ```
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | No features |
//! | `tracing` | Suspicious maps, degenerate hand weights and finished calculations are logged through `tracing`. If this features is not enabled, nothing will be logged. | [`tracing`]
//!
//! [osu!]: https://osu.ppy.sh/home
//! [`tracing`]: https://docs.rs/tracing

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::struct_excessive_bools,
    clippy::match_same_arms,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::explicit_iter_loop,
    clippy::similar_names,
    clippy::cast_possible_wrap
)]

#[doc(inline)]
pub use self::{
    model::beatmap::Beatmap,
    osu::{difficulty::Difficulty, OsuDifficultyAttributes, OsuStrains},
};

#[macro_use]
mod util;

/// Types used in and around this crate.
pub mod model;

/// Types for osu!standard calculations.
pub mod osu;
