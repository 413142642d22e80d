//! Route planner - Command Line Interface
//!
//! Reads a JSON instance describing the road graph, stop demands and fleet,
//! then plans delivery routes with the swap optimizer or the
//! nearest-neighbour planner.

use clap::{Parser, ValueEnum};
use delivery_router::solution;
use delivery_router::{
    AllPairsDijkstra, DirectedEdge, NNRoutePlanner, OptimizerConfig, PlanState, Problem,
    SwapRoutePlanner, WeightedDigraph,
};
use log::info;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "route-planner")]
#[command(version)]
#[command(about = "Plans capacitated delivery routes over shortest-path distances")]
struct Cli {
    /// JSON instance file
    #[arg(short, long)]
    instance: PathBuf,

    /// Planning strategy
    #[arg(long, value_enum, default_value = "swap")]
    strategy: Strategy,

    /// Number of shuffle + local search restarts
    #[arg(long, default_value = "3")]
    starts: usize,

    /// Maximum swap sweeps per restart
    #[arg(long, default_value = "20")]
    iterations: usize,

    /// Stop a restart after this many sweeps without improvement
    #[arg(long, default_value = "2")]
    early_stopping: usize,

    /// Improvements below this distance count as no improvement
    #[arg(long, default_value = "1.0")]
    tolerance: f64,

    /// Shuffle passes over every slot before each restart
    #[arg(long, default_value = "2")]
    shuffle_repetitions: usize,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run restarts in parallel
    #[arg(long)]
    parallel: bool,

    /// Write the resulting plan as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Randomized multi-start swap local search
    Swap,
    /// Balanced initial assignment sequenced by nearest neighbour
    Nearest,
}

#[derive(Deserialize)]
struct Instance {
    #[serde(default)]
    name: String,
    vertices: usize,
    edges: Vec<DirectedEdge>,
    /// Add the reverse of every edge
    #[serde(default)]
    undirected: bool,
    /// Zero derives the fleet size from total demand
    #[serde(default)]
    routes: usize,
    capacity: usize,
    demands: Vec<StopDemand>,
    #[serde(default)]
    pins: Vec<Pin>,
}

#[derive(Deserialize)]
struct StopDemand {
    stop: usize,
    units: usize,
}

#[derive(Deserialize)]
struct Pin {
    route: usize,
    stop: usize,
}

fn load_instance(path: &Path) -> Result<(WeightedDigraph, Problem), Box<dyn std::error::Error>> {
    let reader = BufReader::new(File::open(path)?);
    let instance: Instance = serde_json::from_reader(reader)?;

    let mut graph = WeightedDigraph::new(instance.vertices)?;
    for edge in &instance.edges {
        graph.add_edge(*edge)?;
        if instance.undirected {
            graph.add_edge(edge.reversed())?;
        }
    }

    let mut demands = BTreeMap::new();
    for demand in &instance.demands {
        *demands.entry(demand.stop).or_insert(0) += demand.units;
    }

    let mut problem = Problem::new(instance.name, demands, instance.routes, instance.capacity);
    for pin in &instance.pins {
        problem.constrain(pin.route, pin.stop)?;
    }

    Ok((graph, problem))
}

fn print_plan(plan: &PlanState, distances: &[Vec<f64>], problem: &Problem) {
    println!("Total distance: {:.2}", plan.cost);
    println!("Number of routes: {}", plan.routes.len());
    println!();

    for (i, route) in plan.routes.iter().enumerate() {
        let stops = route
            .iter()
            .map(|stop| stop.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        let distance: f64 = distances[i].iter().sum();

        println!("Route #{}: {}", i + 1, stops);
        println!("  Distance: {:.2}", distance);
        println!("  Load: {} / {}", plan.loads[i], problem.capacity(i));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();

    let (graph, problem) = load_instance(&cli.instance)?;
    info!(
        "Loaded {} stops on a graph with {} vertices and {} edges",
        problem.stop_count(),
        graph.vertex_count(),
        graph.edge_count()
    );

    let start_time = Instant::now();
    let paths = AllPairsDijkstra::new(&graph)?;
    info!("Shortest paths computed in {:?}", start_time.elapsed());

    let mut config = OptimizerConfig::new()
        .with_starts(cli.starts)
        .with_iterations(cli.iterations)
        .with_early_stopping(cli.early_stopping)
        .with_tolerance(cli.tolerance)
        .with_shuffle_repetitions(cli.shuffle_repetitions);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    // Only the swap planner requires every stop to be mutually reachable.
    let plan = match cli.strategy {
        Strategy::Swap => {
            let planner = SwapRoutePlanner::new(&paths, problem.clone(), config)?;
            if cli.parallel {
                planner.optimize_parallel()?
            } else {
                planner.optimize()?
            }
        }
        Strategy::Nearest => NNRoutePlanner::new(&paths).plan(&problem)?,
    };
    info!("Planning finished in {:?}", start_time.elapsed());

    let leg_distances = solution::distances(&paths, &plan.routes);
    print_plan(&plan, &leg_distances, &problem);

    if let Some(output) = cli.output {
        serde_json::to_writer_pretty(File::create(&output)?, &plan)?;
        println!();
        println!("Saved plan to: {}", output.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_tuning_flags() {
        let cli = Cli::try_parse_from([
            "route-planner",
            "--instance",
            "city.json",
            "--tolerance",
            "0.5",
            "--shuffle-repetitions",
            "4",
        ])
        .unwrap();

        assert_eq!(cli.shuffle_repetitions, 4);
        assert_eq!(cli.tolerance, 0.5);
        assert!(cli.strategy == Strategy::Swap);
    }

    #[test]
    fn test_cli_shuffle_repetitions_default() {
        let cli = Cli::try_parse_from(["route-planner", "-i", "city.json"]).unwrap();

        assert_eq!(
            cli.shuffle_repetitions,
            OptimizerConfig::default().shuffle_repetitions
        );
    }
}
