pub use self::{
    aim::AimEvaluator, flashlight::FlashlightEvaluator, rhythm::RhythmEvaluator,
    speed::SpeedEvaluator, visual::VisualEvaluator,
};

mod aim;
mod flashlight;
mod rhythm;
mod speed;
mod visual;
