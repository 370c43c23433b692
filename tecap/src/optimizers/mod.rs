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

//! # Optimizer
//!
//! Optimizers search for link weights, such that the cost of a [`CostFunction`] is minimized.
//! The following optimizers exist:
//!
//! - **[`LocalSearchOptimizer`]**: Local search in the style of the OSPF weight-setting heuristic
//!   by Fortz and Thorup. All links start with a random weight. Then, the weights on the shortest
//!   path between two nodes are tuned, one link at a time, always keeping the single change that
//!   improves the cost the most.
//!
//! The simplest entry point is [`optimize_weights`], which runs the local search with the
//! [`CongestionCost`] and without the possibility to abort.

mod local_search;
pub use local_search::{EvaluatedCombinations, LocalSearchOptimizer};

use crate::netsim::{LinkId, LinkWeight, Network, NetworkError, NodeId, Path};
use crate::soft_policies::{CongestionCost, CostFunction};
use crate::{Error, Stopper};

use log::*;

/// Default number of iterations of the local search
pub const DEFAULT_ITERATIONS: usize = 5000;
/// Default upper bound of the link weights
pub const DEFAULT_MAX_WEIGHT: u32 = 20;
/// Largest accepted upper bound of the link weights (the range of an OSPF link metric)
pub const MAX_WEIGHT_LIMIT: u32 = 65535;

/// Options for the weight optimization
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerOptions {
    /// Maximum number of iterations
    pub iterations: usize,
    /// Link weights are integers in the range `[1, max_weight]`. Must be between 1 and
    /// [`MAX_WEIGHT_LIMIT`].
    pub max_weight: u32,
    /// Seed for the random initial weights. If `None`, the generator is seeded from the
    /// operating system.
    pub seed: Option<u64>,
    /// Stop after the first iteration that does not improve the cost, instead of running all
    /// iterations.
    pub stop_on_convergence: bool,
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            max_weight: DEFAULT_MAX_WEIGHT,
            seed: None,
            stop_on_convergence: false,
        }
    }
}

/// A weight change that was permanently applied by the optimizer.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightChange {
    /// Iteration (starting at 0) in which the change was applied
    pub iteration: usize,
    /// Changed link
    pub link: LinkId,
    /// Weight before the change
    pub old_weight: LinkWeight,
    /// Weight after the change
    pub new_weight: LinkWeight,
    /// Cost after the change
    pub cost: f64,
}

/// Result of a weight optimization
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// Path whose links were tuned (computed once, with the initial random weights)
    pub path: Path,
    /// Cost right after the random initialization
    pub initial_cost: f64,
    /// Best cost found. This is never larger than `initial_cost`.
    pub best_cost: f64,
    /// All changes that were applied, in order. Their cost is strictly decreasing.
    pub applied_changes: Vec<WeightChange>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Number of times the cost function was evaluated for a trial weight
    pub evaluations: usize,
    /// Number of trial weights whose cost was taken from the cache
    pub cache_hits: usize,
    /// True if the optimization was stopped early by the [`Stopper`]
    pub aborted: bool,
}

/// Interface for all Optimizers
pub trait Optimizer<'a, C>
where
    C: CostFunction,
{
    /// Wrapper, that creates the optimizer and performs the optimization.
    fn synthesize(
        net: &'a mut Network,
        source: NodeId,
        target: NodeId,
        cost_function: C,
        options: OptimizerOptions,
        abort: Stopper,
    ) -> Result<OptimizationResult, Error> {
        let mut optimizer = match Self::new(net, source, target, cost_function, options) {
            Ok(o) => {
                info!("Initial path found, starting the optimization");
                o
            }
            Err(Error::NetworkError(NetworkError::NoPathFound(s, t))) => {
                error!("No path from {:?} to {:?}, no optimization performed", s, t);
                return Err(NetworkError::NoPathFound(s, t).into());
            }
            Err(e) => {
                error!("Unexpected error while setting up the optimizer: {}", e);
                return Err(e);
            }
        };
        optimizer.work(abort)
    }

    /// Create the optimizer. This initializes the network (e.g., assigns the initial weights) and
    /// computes the path which is optimized.
    fn new(
        net: &'a mut Network,
        source: NodeId,
        target: NodeId,
        cost_function: C,
        options: OptimizerOptions,
    ) -> Result<Box<Self>, Error>;

    /// Main function performing the optimization. The network is left in the best state found. If
    /// the stopper is triggered, the optimization stops after the current iteration, and the
    /// result found so far is returned.
    fn work(&mut self, abort: Stopper) -> Result<OptimizationResult, Error>;
}

/// Optimize the link weights on the shortest path from `source` to `target` with the
/// [`LocalSearchOptimizer`], minimizing the [`CongestionCost`] of the network.
pub fn optimize_weights(
    net: &mut Network,
    source: NodeId,
    target: NodeId,
    options: OptimizerOptions,
) -> Result<OptimizationResult, Error> {
    LocalSearchOptimizer::synthesize(net, source, target, CongestionCost, options, Stopper::new())
}
