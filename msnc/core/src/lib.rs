#![deny(clippy::pedantic)]

#[macro_use]
extern crate contracts;

pub mod cogs;
pub mod gene_tree;
pub mod individuals;
pub mod lineage;
pub mod network;
pub mod population;
