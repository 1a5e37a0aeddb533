pub use self::{attributes::OsuDifficultyAttributes, strains::OsuStrains};

mod attributes;
mod convert;
pub mod difficulty;
pub mod object;
mod strains;
