//! Bit values of the mods that affect the difficulty calculation.
//!
//! Values follow the legacy mod bits, see
//! [https://github.com/ppy/osu-api/wiki#mods](https://github.com/ppy/osu-api/wiki#mods).
//! The only addition is [`PRECISE`] which has no legacy counterpart and
//! occupies the otherwise unused highest bit.

pub const EASY: u32 = 1 << 1;
pub const TOUCH_DEVICE: u32 = 1 << 2;
pub const HIDDEN: u32 = 1 << 3;
pub const HARD_ROCK: u32 = 1 << 4;
pub const DOUBLE_TIME: u32 = 1 << 6;
pub const RELAX: u32 = 1 << 7;
pub const HALF_TIME: u32 = 1 << 8;
/// Always set alongside [`DOUBLE_TIME`].
pub const NIGHTCORE: u32 = (1 << 9) | DOUBLE_TIME;
pub const FLASHLIGHT: u32 = 1 << 10;
pub const AUTOPILOT: u32 = 1 << 13;
/// Tighter hit windows for the same overall difficulty.
pub const PRECISE: u32 = 1 << 31;

/// Convenience accessors for mod bit flags.
pub trait Mods: Copy {
    fn ez(self) -> bool;
    fn td(self) -> bool;
    fn hd(self) -> bool;
    fn hr(self) -> bool;
    fn dt(self) -> bool;
    fn rx(self) -> bool;
    fn ht(self) -> bool;
    fn fl(self) -> bool;
    fn ap(self) -> bool;
    fn precise(self) -> bool;

    fn clock_rate(self) -> f64 {
        if self.dt() {
            1.5
        } else if self.ht() {
            0.75
        } else {
            1.0
        }
    }

    fn od_ar_hp_multiplier(self) -> f64 {
        if self.hr() {
            1.4
        } else if self.ez() {
            0.5
        } else {
            1.0
        }
    }
}

macro_rules! impl_mods_fn {
    ( $fn_name:ident, $bits:expr ) => {
        fn $fn_name(self) -> bool {
            self & ($bits) != 0
        }
    };
}

impl Mods for u32 {
    impl_mods_fn!(ez, EASY);
    impl_mods_fn!(td, TOUCH_DEVICE);
    impl_mods_fn!(hd, HIDDEN);
    impl_mods_fn!(hr, HARD_ROCK);
    impl_mods_fn!(dt, DOUBLE_TIME);
    impl_mods_fn!(rx, RELAX);
    impl_mods_fn!(ht, HALF_TIME);
    impl_mods_fn!(fl, FLASHLIGHT);
    impl_mods_fn!(ap, AUTOPILOT);
    impl_mods_fn!(precise, PRECISE);
}
