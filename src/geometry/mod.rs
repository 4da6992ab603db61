pub mod normalize;
pub mod resample;
