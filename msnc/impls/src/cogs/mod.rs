pub mod inheritance_sampler;
pub mod rng;
