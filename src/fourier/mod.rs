pub mod polar;
pub mod spectrum;
pub mod synth;
