#![deny(clippy::pedantic)]

#[macro_use]
extern crate contracts;

pub mod cogs;
pub mod correlation;
pub mod parallelism;
pub mod population_size;
pub mod simulation;

#[cfg(test)]
mod stats;
