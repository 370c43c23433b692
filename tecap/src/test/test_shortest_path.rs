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

//! Test the shortest path computation

use crate::example_networks::{AbileneNetwork, ChainNet, ExampleNetwork};
use crate::netsim::{Link, LinkId, LinkWeight, Metric, Network, NetworkError, NodeId};
use assert_approx_eq::assert_approx_eq;
use maplit::hashmap;
use rand::prelude::*;
use std::collections::HashMap;

#[test]
fn test_chain_path() {
    let net = ChainNet::net().unwrap();
    let a = net.get_node_id("A").unwrap();
    let c = net.get_node_id("C").unwrap();
    let path = net.shortest_path(a, c, Metric::LinkCost).unwrap();
    assert_eq!(
        path.links(),
        &[net.get_link_id("A", "B").unwrap(), net.get_link_id("B", "C").unwrap()]
    );
    assert_eq!(path.source(), a);
    assert_eq!(path.target(), c);
    assert_eq!(path.len(), 2);
    assert!(!path.is_empty());
    assert_approx_eq!(path.cost(), 2.0);
    assert_eq!(path.nodes(&net).unwrap(), vec![a, net.get_node_id("B").unwrap(), c]);
}

#[test]
fn test_disconnected_target() {
    let mut net = ChainNet::net().unwrap();
    let d = net.add_node("D");
    let a = net.get_node_id("A").unwrap();
    assert_eq!(net.shortest_path(a, d, Metric::LinkCost), Err(NetworkError::NoPathFound(a, d)));
    assert_eq!(net.shortest_path(a, d, Metric::Weight), Err(NetworkError::NoPathFound(a, d)));
}

#[test]
fn test_direction_matters() {
    let net = ChainNet::net().unwrap();
    let a = net.get_node_id("A").unwrap();
    let c = net.get_node_id("C").unwrap();
    assert_eq!(net.shortest_path(c, a, Metric::LinkCost), Err(NetworkError::NoPathFound(c, a)));
}

#[test]
fn test_source_is_target() {
    let net = ChainNet::net().unwrap();
    let a = net.get_node_id("A").unwrap();
    assert_eq!(net.shortest_path(a, a, Metric::LinkCost), Err(NetworkError::NoPathFound(a, a)));
}

#[test]
fn test_unknown_node() {
    let net = ChainNet::net().unwrap();
    let a = net.get_node_id("A").unwrap();
    let x: NodeId = 42.into();
    assert_eq!(net.shortest_path(a, x, Metric::LinkCost), Err(NetworkError::NodeNotFound(x)));
}

/// # Test network
///
/// ```text
///     .--> B --.
///    /          v
///   A           D
///    \          ^
///     '--> C --'
/// ```
///
/// The upper path is cheaper by link cost, the lower one by weight.
fn get_diamond_net() -> Network {
    let mut net = Network::new();
    let values: HashMap<(&str, &str), (LinkWeight, LinkWeight)> = hashmap! {
        ("A", "B") => (1.0, 10.0),
        ("B", "D") => (1.0, 10.0),
        ("A", "C") => (5.0, 1.0),
        ("C", "D") => (5.0, 1.0),
    };
    for (&(source, target), &(cost, weight)) in values.iter() {
        let link = net.add_link(source, target);
        net.set_link_cost(link, cost).unwrap();
        net.set_link_weight(link, weight).unwrap();
    }
    net
}

#[test]
fn test_metric_selection() {
    let net = get_diamond_net();
    let a = net.get_node_id("A").unwrap();
    let b = net.get_node_id("B").unwrap();
    let c = net.get_node_id("C").unwrap();
    let d = net.get_node_id("D").unwrap();

    let by_cost = net.shortest_path(a, d, Metric::LinkCost).unwrap();
    assert_eq!(by_cost.nodes(&net).unwrap(), vec![a, b, d]);
    assert_approx_eq!(by_cost.cost(), 2.0);

    let by_weight = net.shortest_path(a, d, Metric::Weight).unwrap();
    assert_eq!(by_weight.nodes(&net).unwrap(), vec![a, c, d]);
    assert_approx_eq!(by_weight.cost(), 2.0);

    // caller-supplied metric: hop count
    let by_hops = net.shortest_path(a, d, |_: LinkId, _: &Link| 1.0).unwrap();
    assert_eq!(by_hops.len(), 2);
    assert_approx_eq!(by_hops.cost(), 2.0);
}

#[test]
fn test_invalid_metric() {
    let net = get_diamond_net();
    let a = net.get_node_id("A").unwrap();
    let d = net.get_node_id("D").unwrap();
    let result = net.shortest_path(a, d, |_: LinkId, _: &Link| -1.0);
    assert!(matches!(result, Err(NetworkError::InvalidLinkWeight(_, w)) if w == -1.0));
    let result = net.shortest_path(a, d, |_: LinkId, _: &Link| f64::NAN);
    assert!(matches!(result, Err(NetworkError::InvalidLinkWeight(_, _))));
}

#[test]
fn test_invalid_metric_off_path() {
    let mut net = get_diamond_net();
    let xy = net.add_link("X", "Y");
    let a = net.get_node_id("A").unwrap();
    let d = net.get_node_id("D").unwrap();
    // every link is checked before searching, even if it cannot be part of the path
    let metric = |id: LinkId, _: &Link| if id == xy { -2.0 } else { 1.0 };
    assert_eq!(net.shortest_path(a, d, metric), Err(NetworkError::InvalidLinkWeight(xy, -2.0)));
}

#[test]
fn test_zero_weights() {
    // absent weights read as 0, which is allowed
    let mut net = Network::new();
    net.add_link("A", "B");
    net.add_link("B", "C");
    let a = net.get_node_id("A").unwrap();
    let c = net.get_node_id("C").unwrap();
    let path = net.shortest_path(a, c, Metric::Weight).unwrap();
    assert_eq!(path.len(), 2);
    assert_approx_eq!(path.cost(), 0.0);
}

#[test]
fn test_equal_weight_ties() {
    // all links on the abilene network have weight 1
    let net = AbileneNetwork::net().unwrap();
    let seattle = net.get_node_id("Seattle").unwrap();
    let new_york = net.get_node_id("New York").unwrap();
    let path = net.shortest_path(seattle, new_york, Metric::Weight).unwrap();
    // Seattle - Denver - Kansas City - Indianapolis - Chicago - New York
    assert_approx_eq!(path.cost(), 5.0);
    assert_eq!(path.len(), 5);
}

/// Minimal cost over all simple paths from `node` to `target`.
fn brute_force(
    net: &Network,
    node: NodeId,
    target: NodeId,
    visited: &mut Vec<NodeId>,
) -> Option<LinkWeight> {
    if node == target {
        return Some(0.0);
    }
    visited.push(node);
    let mut best: Option<LinkWeight> = None;
    for (id, link) in net.links() {
        let (src, dst) = net.link_endpoints(id).unwrap();
        if src != node || visited.contains(&dst) {
            continue;
        }
        if let Some(rest) = brute_force(net, dst, target, visited) {
            let cost = link.link_cost() + rest;
            if best.map(|b| cost < b).unwrap_or(true) {
                best = Some(cost);
            }
        }
    }
    visited.pop();
    best
}

#[test]
fn test_brute_force_cross_check() {
    let mut rng = StdRng::seed_from_u64(1234);
    let names = ["N0", "N1", "N2", "N3", "N4", "N5"];
    for _ in 0..30 {
        let mut net = Network::new();
        for name in names.iter() {
            net.add_node(*name);
        }
        for source in names.iter() {
            for target in names.iter() {
                if source != target && rng.gen_bool(0.35) {
                    let link = net.add_link(*source, *target);
                    net.set_link_cost(link, rng.gen_range(0, 10) as LinkWeight).unwrap();
                }
            }
        }

        for source in net.get_nodes() {
            for target in net.get_nodes() {
                if source == target {
                    continue;
                }
                let expected = brute_force(&net, source, target, &mut Vec::new());
                match (net.shortest_path(source, target, Metric::LinkCost), expected) {
                    (Ok(path), Some(cost)) => {
                        assert_approx_eq!(path.cost(), cost);
                        // the path is connected, and its cost matches
                        let nodes = path.nodes(&net).unwrap();
                        assert_eq!(nodes.first(), Some(&source));
                        assert_eq!(nodes.last(), Some(&target));
                        let sum: LinkWeight = path
                            .links()
                            .iter()
                            .map(|l| net.get_link(*l).unwrap().link_cost())
                            .sum();
                        assert_approx_eq!(sum, cost);
                    }
                    (Err(NetworkError::NoPathFound(s, t)), None) => {
                        assert_eq!((s, t), (source, target));
                    }
                    (result, expected) => {
                        panic!("Mismatch: {:?} vs. expected {:?}", result, expected)
                    }
                }
            }
        }
    }
}
