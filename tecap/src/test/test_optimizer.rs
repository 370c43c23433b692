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

//! Test the weight optimizer

use crate::example_networks::{AbileneNetwork, ChainNet, ExampleNetwork};
use crate::netsim::event::Event;
use crate::netsim::{LinkWeight, Metric, Network, NetworkError, NodeId};
use crate::optimizers::{
    LocalSearchOptimizer, OptimizationResult, Optimizer, OptimizerOptions, MAX_WEIGHT_LIMIT,
};
use crate::soft_policies::{CongestionCost, CostFunction};
use crate::{optimize_weights, Error, Stopper};
use assert_approx_eq::assert_approx_eq;
use std::cell::Cell;
use std::rc::Rc;

/// Wraps a cost function and counts how often it is evaluated.
struct CountingCost<C> {
    inner: C,
    calls: Rc<Cell<usize>>,
}

impl<C: CostFunction> CostFunction for CountingCost<C> {
    fn cost(&mut self, net: &Network) -> f64 {
        self.calls.set(self.calls.get() + 1);
        self.inner.cost(net)
    }
}

/// Sum of all link weights. Lower weights are always better.
struct TotalWeight;

impl CostFunction for TotalWeight {
    fn cost(&mut self, net: &Network) -> f64 {
        net.links().map(|(_, l)| l.weight()).sum()
    }
}

fn endpoints(net: &Network, source: &str, target: &str) -> (NodeId, NodeId) {
    (net.get_node_id(source).unwrap(), net.get_node_id(target).unwrap())
}

fn weights(net: &Network) -> Vec<LinkWeight> {
    net.links().map(|(_, l)| l.weight()).collect()
}

fn options(iterations: usize, seed: u64) -> OptimizerOptions {
    OptimizerOptions { iterations, seed: Some(seed), ..Default::default() }
}

fn run<C: CostFunction>(
    net: &mut Network,
    source: NodeId,
    target: NodeId,
    cost_function: C,
    options: OptimizerOptions,
) -> Result<OptimizationResult, Error> {
    LocalSearchOptimizer::synthesize(net, source, target, cost_function, options, Stopper::new())
}

#[test]
fn test_default_options() {
    let options = OptimizerOptions::default();
    assert_eq!(options.iterations, 5000);
    assert_eq!(options.max_weight, 20);
    assert_eq!(options.seed, None);
    assert!(!options.stop_on_convergence);
}

#[test]
fn test_random_initial_weights() {
    let mut net = AbileneNetwork::net().unwrap();
    let (source, target) = endpoints(&net, "Seattle", "Atlanta");
    run(&mut net, source, target, CongestionCost, options(0, 7)).unwrap();
    for weight in weights(&net) {
        assert!(weight >= 1.0 && weight <= 20.0);
        assert_eq!(weight, weight.round());
    }
}

#[test]
fn test_seed_is_reproducible() {
    let mut net_a = AbileneNetwork::net().unwrap();
    let mut net_b = net_a.clone();
    let (source, target) = endpoints(&net_a, "Seattle", "Atlanta");
    let result_a = run(&mut net_a, source, target, CongestionCost, options(10, 42)).unwrap();
    let result_b = run(&mut net_b, source, target, CongestionCost, options(10, 42)).unwrap();
    assert_eq!(weights(&net_a), weights(&net_b));
    assert_eq!(result_a, result_b);
}

#[test]
fn test_no_path() {
    let mut net = ChainNet::net().unwrap();
    net.add_node("D");
    let (source, target) = endpoints(&net, "A", "D");
    let result = optimize_weights(&mut net, source, target, options(10, 1));
    assert!(matches!(
        result,
        Err(Error::NetworkError(NetworkError::NoPathFound(s, t))) if s == source && t == target
    ));
}

#[test]
fn test_invalid_options() {
    let mut net = ChainNet::net().unwrap();
    let (source, target) = endpoints(&net, "A", "C");
    let options = OptimizerOptions { max_weight: 0, ..options(10, 1) };
    assert!(matches!(
        optimize_weights(&mut net, source, target, options),
        Err(Error::InvalidOptions(_))
    ));
}

#[test]
fn test_max_weight_out_of_range() {
    let mut net = ChainNet::net().unwrap();
    let (source, target) = endpoints(&net, "A", "C");
    let before = weights(&net);
    for max_weight in [MAX_WEIGHT_LIMIT + 1, u32::MAX].iter() {
        let options = OptimizerOptions { max_weight: *max_weight, ..options(0, 1) };
        assert!(matches!(
            optimize_weights(&mut net, source, target, options),
            Err(Error::InvalidOptions(_))
        ));
    }
    // the network is left untouched
    assert_eq!(weights(&net), before);

    let options = OptimizerOptions { max_weight: MAX_WEIGHT_LIMIT, ..options(0, 1) };
    let result = optimize_weights(&mut net, source, target, options).unwrap();
    assert_eq!(result.iterations, 0);
    assert!(weights(&net).iter().all(|w| *w >= 1.0 && *w <= MAX_WEIGHT_LIMIT as f64));
}

#[test]
fn test_cache_avoids_recomputation() {
    // without loads, the congestion cost is constant, so nothing is ever applied
    let mut net = ChainNet::net().unwrap();
    let (source, target) = endpoints(&net, "A", "C");
    let calls = Rc::new(Cell::new(0));
    let cost_function = CountingCost { inner: CongestionCost, calls: calls.clone() };
    let result = run(&mut net, source, target, cost_function, options(50, 3)).unwrap();

    let trials = result.path.len() * 19;
    assert_eq!(result.iterations, 50);
    assert!(result.applied_changes.is_empty());
    assert_eq!(result.evaluations, trials);
    assert_eq!(result.cache_hits, 49 * trials);
    // one evaluation for the initial cost, and one per (link, weight) combination
    assert_eq!(calls.get(), 1 + trials);
    assert_approx_eq!(result.best_cost, result.initial_cost);
}

#[test]
fn test_trial_weights_are_restored() {
    let mut net = AbileneNetwork::net().unwrap();
    let mut reference = net.clone();
    let (source, target) = endpoints(&net, "Seattle", "Atlanta");
    run(&mut net, source, target, CongestionCost, options(20, 11)).unwrap();
    run(&mut reference, source, target, CongestionCost, options(0, 11)).unwrap();
    assert_eq!(weights(&net), weights(&reference));
}

#[test]
fn test_improvements_are_applied() {
    let mut net = Network::new();
    net.add_link("A", "B");
    let (source, target) = endpoints(&net, "A", "B");
    net.take_events();
    let result = run(&mut net, source, target, TotalWeight, options(10, 5)).unwrap();

    assert_eq!(weights(&net), vec![1.0]);
    assert_approx_eq!(result.best_cost, 1.0);
    assert!(result.best_cost <= result.initial_cost);
    assert_eq!(result.iterations, 10);
    assert!(result.applied_changes.len() <= 1);
    assert!(!result.aborted);

    let optimized = net
        .events()
        .iter()
        .filter(|e| matches!(e, Event::WeightOptimized { .. }))
        .count();
    assert_eq!(optimized, result.applied_changes.len());
}

#[test]
fn test_best_trial_wins() {
    let mut initial = ChainNet::net().unwrap();
    let (source, target) = endpoints(&initial, "A", "C");
    let mut net = initial.clone();
    run(&mut initial, source, target, TotalWeight, options(0, 13)).unwrap();
    let initial_weights = weights(&initial);
    let result = run(&mut net, source, target, TotalWeight, options(10, 13)).unwrap();

    // the first improvement sets the largest weight on the path to 1 (first link on ties)
    let largest = initial_weights.iter().cloned().fold(0.0, f64::max);
    if largest > 1.0 {
        let position = initial_weights.iter().position(|w| *w == largest).unwrap();
        let first = &result.applied_changes[0];
        assert_eq!(first.iteration, 0);
        assert_eq!(first.link, result.path.links()[position]);
        assert_eq!(first.old_weight, largest);
        assert_eq!(first.new_weight, 1.0);
        assert_approx_eq!(first.cost, initial_weights.iter().sum::<f64>() - largest + 1.0);
    }

    // every applied change strictly improves the cost
    let mut last = result.initial_cost;
    for change in result.applied_changes.iter() {
        assert!(change.cost < last);
        assert!(result.path.links().contains(&change.link));
        last = change.cost;
    }
    assert_approx_eq!(result.best_cost, last);
}

#[test]
fn test_path_is_fixed() {
    let mut reference = ChainNet::net().unwrap();
    reference.add_link("X", "Y");
    let mut net = reference.clone();
    let (source, target) = endpoints(&net, "A", "C");
    let xy = net.get_link_id("X", "Y").unwrap();
    run(&mut reference, source, target, TotalWeight, options(0, 9)).unwrap();
    let result = run(&mut net, source, target, TotalWeight, options(10, 9)).unwrap();

    // the link off the path keeps its random weight
    assert!(result.applied_changes.iter().all(|c| c.link != xy));
    assert_eq!(net.get_link(xy).unwrap().weight(), reference.get_link(xy).unwrap().weight());
    let path = net.shortest_path(source, target, Metric::Weight).unwrap();
    assert_eq!(result.path.links(), path.links());
}

#[test]
fn test_stop_on_convergence() {
    let mut net = ChainNet::net().unwrap();
    let (source, target) = endpoints(&net, "A", "C");
    let options = OptimizerOptions { stop_on_convergence: true, ..options(100, 4) };
    let result = run(&mut net, source, target, CongestionCost, options).unwrap();
    assert_eq!(result.iterations, 1);
    assert!(!result.aborted);
}

#[test]
fn test_abort() {
    let mut net = AbileneNetwork::net().unwrap();
    let (source, target) = endpoints(&net, "Seattle", "Atlanta");
    let abort = Stopper::new();
    abort.send_stop();
    assert!(abort.is_stop());
    let result = LocalSearchOptimizer::synthesize(
        &mut net,
        source,
        target,
        TotalWeight,
        options(5000, 1),
        abort,
    )
    .unwrap();
    assert!(result.aborted);
    assert!(result.iterations < 5000);
    assert!(result.best_cost <= result.initial_cost);
}

#[test]
fn test_optimize_after_flow() {
    let mut net = AbileneNetwork::net().unwrap();
    let (source, target) = endpoints(&net, "Seattle", "Atlanta");
    let path = net.shortest_path(source, target, Metric::LinkCost).unwrap();
    net.simulate_flow(&path, 25_000.0).unwrap().for_each(drop);
    let loaded_cost = net.network_cost();
    let result = optimize_weights(&mut net, source, target, options(30, 21)).unwrap();
    assert_approx_eq!(result.initial_cost, loaded_cost);
    assert!(result.best_cost <= result.initial_cost);
}
