use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

use msnc_core::{individuals::IndividualCount, network::SpeciesNetwork};
use msnc_impls::{
    correlation::InheritanceCorrelation, parallelism::Parallelism,
    population_size::PopulationSize, simulation::SimulationArguments,
};

mod parse;
mod rng;

pub use parse::{try_parse, try_print};
pub use rng::Rng;

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct RustmsncArgs {
    /// Log debug (-v) or trace (-vv) messages
    #[clap(short, long, global = true, parse(from_occurrences))]
    pub verbose: u8,
    /// Only log warnings and errors
    #[clap(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
    #[clap(subcommand)]
    pub command: RustmsncCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum RustmsncCommand {
    /// Simulate gene trees inside a species network
    Simulate(CommandArgs),
}

#[derive(Debug, clap::Args)]
pub struct CommandArgs {
    /// The simulation configuration in RON
    #[clap(allow_hyphen_values = true, required = true)]
    args: Vec<String>,
}

impl CommandArgs {
    /// Joins the arguments into one RON document, with the extensions the
    /// configuration relies on enabled and the outer parentheses optional.
    #[must_use]
    pub fn into_config_string(self) -> String {
        let config = self.args.join(" ");
        let config = config.trim();

        let mut ron_args = String::with_capacity(config.len() + 2);

        if config.starts_with('(') {
            ron_args.push_str(config);
        } else {
            ron_args.push('(');
            ron_args.push_str(config);
            ron_args.push(')');
        }

        ron_args
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(rename = "Simulate")]
pub struct SimulateArgs {
    pub network: SpeciesNetwork,

    #[serde(alias = "genes")]
    pub loci: u64,

    #[serde(default)]
    pub individuals: IndividualCount,

    #[serde(alias = "mapping")]
    #[serde(default)]
    pub node_mapping: bool,

    #[serde(alias = "inheritance_correlation")]
    #[serde(default)]
    pub correlation: InheritanceCorrelation,

    #[serde(alias = "randomness")]
    #[serde(default)]
    pub rng: Rng,

    #[serde(alias = "ne")]
    #[serde(default)]
    pub population_size: Option<PopulationSize>,

    #[serde(default = "default_round_generations")]
    pub round_generations: bool,

    #[serde(default)]
    pub parallelism: Parallelism,

    #[serde(default)]
    pub output: Option<PathBuf>,
}

fn default_round_generations() -> bool {
    true
}

impl SimulateArgs {
    #[must_use]
    pub fn simulation_arguments(&self) -> SimulationArguments {
        SimulationArguments {
            individuals: self.individuals.clone(),
            node_mapping: self.node_mapping,
            correlation: self.correlation,
            parallelism: self.parallelism.clone(),
        }
    }
}
