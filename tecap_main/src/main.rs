// Tecap: Traffic-Engineering Weight Setting and Flow Simulation
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use tecap::netsim::{printer, Metric, Network, NodeId};
use tecap::optimizers::{LocalSearchOptimizer, Optimizer, OptimizerOptions};
use tecap::soft_policies::{CongestionCost, TrafficCongestionCost};
use tecap::statistics::{LoadLevel, LoadStatistics};
use tecap::Stopper;

use clap::{Parser, Subcommand, ValueEnum};
use log::*;
use std::error::Error;
use std::thread::sleep;
use std::time::Duration;

mod network_selection;
use network_selection::NetworkSelection;

fn main() -> Result<(), Box<dyn Error>> {
    // initialize the env logger
    pretty_env_logger::init();
    // run clap
    let args = CommandLineArguments::parse();
    let (mut net, traffic) = args.network.network()?;

    match args.cmd {
        MainCommand::Route { source, target, metric } => {
            let (s, t) = endpoints(&net, &source, &target)?;
            let path = net.shortest_path(s, t, Metric::from(metric))?;
            println!("{} (cost {})", printer::path(&net, &path)?, path.cost());
            for link in path.links() {
                let summary = printer::link_summary(&net, *link)?;
                println!("    {}: {}", printer::link(&net, *link)?, summary);
            }
        }
        MainCommand::Simulate { source, target, volume, metric, round_delay_ms } => {
            let (s, t) = endpoints(&net, &source, &target)?;
            let path = net.shortest_path(s, t, Metric::from(metric))?;
            println!("Path: {}", printer::path(&net, &path)?);
            net.reset_loads();
            let simulation = net.simulate_flow(&path, volume)?;
            println!("Bottleneck: {}", simulation.bottleneck());
            for round in simulation {
                println!(
                    "Round {}: sent {}, remaining {}",
                    round.round, round.sent, round.remaining
                );
                if round.remaining > 0.0 && round_delay_ms > 0 {
                    sleep(Duration::from_millis(round_delay_ms));
                }
            }
            println!("{}", LoadStatistics::new(&net));
        }
        MainCommand::Optimize {
            source,
            target,
            iterations,
            w_max,
            seed,
            stop_on_convergence,
        } => {
            let (s, t) = endpoints(&net, &source, &target)?;
            let options = OptimizerOptions {
                iterations,
                max_weight: w_max,
                seed,
                stop_on_convergence,
            };

            // abort the optimization on Ctrl-C
            let stopper = Stopper::new();
            let handler_stopper = stopper.clone();
            ctrlc::set_handler(move || {
                warn!("Received Ctrl-C, stopping the optimization");
                handler_stopper.send_stop();
            })?;

            let result = match traffic.as_ref() {
                Some(traffic) => {
                    let cost_function = TrafficCongestionCost::new(traffic.clone());
                    let result = LocalSearchOptimizer::synthesize(
                        &mut net,
                        s,
                        t,
                        cost_function,
                        options,
                        stopper,
                    )?;
                    // the loads follow the optimized weights
                    net.compute_link_loads(traffic)?;
                    result
                }
                None => LocalSearchOptimizer::synthesize(
                    &mut net,
                    s,
                    t,
                    CongestionCost,
                    options,
                    stopper,
                )?,
            };

            println!("Path: {}", printer::path(&net, &result.path)?);
            for change in result.applied_changes.iter() {
                println!(
                    "Iteration {}: {} {} -> {} (cost {})",
                    change.iteration,
                    printer::link(&net, change.link)?,
                    change.old_weight,
                    change.new_weight,
                    change.cost
                );
            }
            println!(
                "Cost {} -> {} after {} iterations{}",
                result.initial_cost,
                result.best_cost,
                result.iterations,
                if result.aborted { " (aborted)" } else { "" }
            );
        }
        MainCommand::Stats => {
            println!("{}", LoadStatistics::new(&net));
            for (link, l) in net.links() {
                println!(
                    "{} [{}] {}",
                    printer::link(&net, link)?,
                    LoadLevel::of_link(l),
                    printer::link_summary(&net, link)?
                );
            }
        }
    }
    Ok(())
}

fn endpoints(
    net: &Network,
    source: &str,
    target: &str,
) -> Result<(NodeId, NodeId), Box<dyn Error>> {
    Ok((net.get_node_id(source)?, net.get_node_id(target)?))
}

/// Route traffic through a network, simulate the flow along the path, and optimize the link
/// weights such that the congestion of the network is minimized.
#[derive(Parser, Debug)]
#[command(name = "tecap", author = "Tibor Schneider")]
struct CommandLineArguments {
    /// Network to work on
    #[command(flatten)]
    network: NetworkSelection,
    /// Action to perform
    #[command(subcommand)]
    cmd: MainCommand,
}

#[derive(Subcommand, Debug)]
enum MainCommand {
    /// Print the shortest path between two nodes
    #[command(name = "route")]
    Route {
        /// Source node
        source: String,
        /// Target node
        target: String,
        /// Link metric used for the path computation
        #[arg(short = 'm', long, value_enum, default_value = "cost")]
        metric: MetricArg,
    },
    /// Simulate a flow along the shortest path between two nodes
    #[command(name = "simulate")]
    Simulate {
        /// Source node
        source: String,
        /// Target node
        target: String,
        /// Volume to send
        volume: f64,
        /// Link metric used for the path computation
        #[arg(short = 'm', long, value_enum, default_value = "cost")]
        metric: MetricArg,
        /// Pause between two rounds, in milliseconds
        #[arg(short = 'd', long, default_value = "0")]
        round_delay_ms: u64,
    },
    /// Optimize the link weights on the path between two nodes
    #[command(name = "optimize")]
    Optimize {
        /// Source node
        source: String,
        /// Target node
        target: String,
        /// Number of iterations
        #[arg(short = 'n', long, default_value = "5000")]
        iterations: usize,
        /// Largest weight that is assigned
        #[arg(short = 'w', long, default_value = "20")]
        w_max: u32,
        /// Random seed, to get reproducable initial weights
        #[arg(short = 's', long)]
        seed: Option<u64>,
        /// Stop after the first iteration without improvement
        #[arg(short = 'c', long)]
        stop_on_convergence: bool,
    },
    /// Print the load statistics of the network
    #[command(name = "stats")]
    Stats,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum MetricArg {
    /// Static link cost
    Cost,
    /// Routing weight
    Weight,
}

impl From<MetricArg> for Metric {
    fn from(metric: MetricArg) -> Self {
        match metric {
            MetricArg::Cost => Metric::LinkCost,
            MetricArg::Weight => Metric::Weight,
        }
    }
}
