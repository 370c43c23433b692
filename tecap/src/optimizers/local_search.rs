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

//! # Local Search Optimizer
//!
//! This optimizer tunes the weights of the links on a single path:
//!
//! 1. Every link of the network gets a random integer weight in `[1, max_weight]`.
//! 2. The shortest path from the source to the target is computed using these weights. The path
//!    stays fixed for the remainder of the search, i.e., links that are not on this path are never
//!    changed.
//! 3. In every iteration, every link on the path is tried with every other weight in
//!    `[1, max_weight]`. The trial weight is set, the cost function is evaluated, and the original
//!    weight is restored. The costs are cached per `(link, weight)` for the whole run.
//! 4. The best trial of the iteration is applied permanently, but only if its cost is strictly
//!    lower than the best cost so far. If several trials have the same cost, the first one wins
//!    (in path order, then by ascending weight).
//!
//! The search stops after a fixed number of iterations, or (optionally) after the first iteration
//! without improvement. The cache is never invalidated during a run, which means that a cached
//! cost may have been computed while another link of the path still had its previous weight.

use super::{OptimizationResult, Optimizer, OptimizerOptions, WeightChange, MAX_WEIGHT_LIMIT};
use crate::netsim::event::Event;
use crate::netsim::{printer, LinkId, LinkWeight, Metric, Network, NetworkError, NodeId, Path};
use crate::soft_policies::CostFunction;
use crate::{Error, Stopper};

use log::*;
use rand::prelude::*;
use std::collections::HashMap;

/// Local search weight optimizer. See the [module](self) documentation for details.
#[derive(Debug)]
pub struct LocalSearchOptimizer<'a, C>
where
    C: CostFunction,
{
    net: &'a mut Network,
    cost_function: C,
    options: OptimizerOptions,
    path: Path,
    initial_cost: f64,
}

impl<'a, C> Optimizer<'a, C> for LocalSearchOptimizer<'a, C>
where
    C: CostFunction,
{
    fn new(
        net: &'a mut Network,
        source: NodeId,
        target: NodeId,
        mut cost_function: C,
        options: OptimizerOptions,
    ) -> Result<Box<Self>, Error> {
        if options.max_weight == 0 {
            return Err(Error::InvalidOptions("the maximum weight must be at least 1"));
        }
        if options.max_weight > MAX_WEIGHT_LIMIT {
            return Err(Error::InvalidOptions("the maximum weight must be at most 65535"));
        }

        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let links: Vec<LinkId> = net.links().map(|(id, _)| id).collect();
        for link in links {
            let weight = rng.gen_range(1, options.max_weight + 1);
            net.set_link_weight(link, weight as LinkWeight)?;
        }
        debug!("Assigned random weights to {} links", net.num_links());

        let path = net.shortest_path(source, target, Metric::Weight)?;
        info!("Optimizing the weights along {}", printer::path(net, &path)?);
        let initial_cost = cost_function.cost(net);

        Ok(Box::new(Self { net, cost_function, options, path, initial_cost }))
    }

    fn work(&mut self, mut abort: Stopper) -> Result<OptimizationResult, Error> {
        let mut cache = EvaluatedCombinations::new();
        let mut best_cost = self.initial_cost;
        let mut applied_changes: Vec<WeightChange> = Vec::new();
        let mut iterations: usize = 0;
        let mut aborted = false;

        for iteration in 0..self.options.iterations {
            if abort.try_is_stop().unwrap_or(false) {
                info!("Optimization aborted after {} iterations", iterations);
                aborted = true;
                break;
            }
            iterations += 1;

            match self.best_candidate(&mut cache)? {
                Some((link, weight, cost)) if cost < best_cost => {
                    let weight = weight as LinkWeight;
                    let old_weight = self.net.set_link_weight(link, weight)?.unwrap_or(0.0);
                    self.net.record_event(Event::WeightOptimized { iteration, link, weight, cost });
                    debug!(
                        "Iteration {}: weight of {} {} -> {}, cost {} -> {}",
                        iteration,
                        printer::link(self.net, link)?,
                        old_weight,
                        weight,
                        best_cost,
                        cost
                    );
                    applied_changes.push(WeightChange {
                        iteration,
                        link,
                        old_weight,
                        new_weight: weight,
                        cost,
                    });
                    best_cost = cost;
                }
                _ if self.options.stop_on_convergence => {
                    info!("No improvement in iteration {}, stopping", iteration);
                    break;
                }
                _ => {}
            }
        }

        info!(
            "Optimization finished after {} iterations: cost {} -> {} ({} changes applied)",
            iterations,
            self.initial_cost,
            best_cost,
            applied_changes.len()
        );

        Ok(OptimizationResult {
            path: self.path.clone(),
            initial_cost: self.initial_cost,
            best_cost,
            applied_changes,
            iterations,
            evaluations: cache.len(),
            cache_hits: cache.hits(),
            aborted,
        })
    }
}

impl<'a, C> LocalSearchOptimizer<'a, C>
where
    C: CostFunction,
{
    /// Returns the path that is optimized
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Try every other weight on every link of the path, and return the best `(link, weight,
    /// cost)`. Every trial weight is restored before the next one is evaluated.
    fn best_candidate(
        &mut self,
        cache: &mut EvaluatedCombinations,
    ) -> Result<Option<(LinkId, u32, f64)>, NetworkError> {
        let mut best: Option<(LinkId, u32, f64)> = None;
        for link in self.path.links().iter().copied() {
            let current = self.net.get_link(link).ok_or(NetworkError::LinkNotFound(link))?.weight;
            for weight in 1..=self.options.max_weight {
                if current == Some(weight as LinkWeight) {
                    continue;
                }
                let cost = match cache.get(link, weight) {
                    Some(cost) => cost,
                    None => {
                        let original = self.net.swap_weight(link, Some(weight as LinkWeight))?;
                        let cost = self.cost_function.cost(self.net);
                        self.net.swap_weight(link, original)?;
                        cache.insert(link, weight, cost);
                        cost
                    }
                };
                if best.map(|(_, _, c)| cost < c).unwrap_or(true) {
                    best = Some((link, weight, cost));
                }
            }
        }
        Ok(best)
    }
}

/// Cache of the cost computed for a trial weight on a link. It lives for a single optimization
/// run.
#[derive(Debug, Clone, Default)]
pub struct EvaluatedCombinations {
    costs: HashMap<(LinkId, u32), f64>,
    hits: usize,
}

impl EvaluatedCombinations {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the cost of the combination, counting a hit if it is present.
    pub fn get(&mut self, link: LinkId, weight: u32) -> Option<f64> {
        let cost = self.costs.get(&(link, weight)).copied();
        if cost.is_some() {
            self.hits += 1;
        }
        cost
    }

    /// Store the cost of the combination
    pub fn insert(&mut self, link: LinkId, weight: u32, cost: f64) {
        self.costs.insert((link, weight), cost);
    }

    /// Number of stored combinations
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Returns true if no combination is stored
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Number of successful lookups
    pub fn hits(&self) -> usize {
        self.hits
    }
}
