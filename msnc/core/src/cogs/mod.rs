pub mod inheritance_sampler;
pub use inheritance_sampler::InheritanceSampler;

pub mod rng;
pub use rng::{RngCore, RngSampler, SeedableRng, SplittableRng};
