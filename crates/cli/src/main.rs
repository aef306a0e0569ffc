use argparse::{ArgumentParser, Store};
use newman_io::{read_adjacency_path, write_division_path, FormatError};
use petgraph_clustering_newman::{partition, ModularityStructure, EPSILON};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::process::exit;
use std::time::Instant;

const SEED: u64 = 42;

fn parse_args(input_path: &mut String, output_path: &mut String) {
    let mut parser = ArgumentParser::new();
    parser.set_description("Divide a graph into communities by modularity maximization.");
    parser
        .refer(input_path)
        .add_argument("adjacency", Store, "input adjacency file path")
        .required();
    parser
        .refer(output_path)
        .add_argument("division", Store, "output division file path")
        .required();
    parser.parse_args_or_exit();
}

fn run(input_path: &str, output_path: &str) -> Result<(), FormatError> {
    let started = Instant::now();

    let graph = read_adjacency_path(input_path)?;
    log::info!(
        "read {} vertices and {} edges from {}",
        graph.node_count(),
        graph.edge_count(),
        input_path
    );

    let structure = ModularityStructure::new(&graph);
    let mut rng = StdRng::seed_from_u64(SEED);
    let groups = partition(&structure, &mut rng, EPSILON);

    write_division_path(output_path, &groups)?;
    log::info!(
        "wrote {} groups to {} in {:.3}s",
        groups.len(),
        output_path,
        started.elapsed().as_secs_f64()
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let mut input_path = String::new();
    let mut output_path = String::new();
    parse_args(&mut input_path, &mut output_path);

    if let Err(error) = run(&input_path, &output_path) {
        eprintln!("{}", error);
        exit(1);
    }
}
