use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use anyhow::{Context, Result};

use msnc_core::gene_tree::GeneTree;
use msnc_impls::{
    population_size::simulate_coalescent_in_generations, simulation::simulate_coalescent,
};

use crate::args::{try_parse, try_print, CommandArgs, Rng, SimulateArgs};

#[allow(clippy::module_name_repetitions)]
pub fn simulate_with_logger(simulate_args: CommandArgs) -> Result<()> {
    let ron_args = simulate_args.into_config_string();
    let mut simulate_args: SimulateArgs = try_parse("simulate", &ron_args)?;

    let rng = simulate_args
        .rng
        .resolve()
        .context("Failed to draw a seed from entropy.")?;
    simulate_args.rng = Rng::Seed(rng.seed());

    info!(
        "Parsed simulation arguments:\n{}",
        try_print(&simulate_args)?
    );

    let args = simulate_args.simulation_arguments();

    let trees = match &simulate_args.population_size {
        Some(population_size) => simulate_coalescent_in_generations(
            &simulate_args.network,
            simulate_args.loci,
            population_size,
            simulate_args.round_generations,
            &args,
            &rng,
        ),
        None => simulate_coalescent(&simulate_args.network, simulate_args.loci, &args, &rng),
    }
    .context("Failed to simulate the gene trees.")?;

    match &simulate_args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create the output file {path:?}."))?;

            write_gene_trees(BufWriter::new(file), &trees)
                .with_context(|| format!("Failed to write the gene trees to {path:?}."))?;

            info!("Wrote {} gene tree(s) to {:?}.", trees.len(), path);
        },
        None => write_gene_trees(io::stdout().lock(), &trees)
            .context("Failed to write the gene trees to stdout.")?,
    }

    Ok(())
}

/// Writes one gene tree per line in Newick format.
fn write_gene_trees<W: Write>(mut writer: W, trees: &[GeneTree]) -> io::Result<()> {
    for tree in trees {
        writeln!(writer, "{tree}")?;
    }

    writer.flush()
}
