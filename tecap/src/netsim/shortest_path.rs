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

//! Single-source shortest paths over a selectable link metric.

use crate::netsim::{LinkId, LinkMetric, LinkWeight, Network, NetworkError, NodeId};

use log::*;
use petgraph::algo::astar;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use std::collections::HashMap;

/// # Path
/// Ordered, non-empty sequence of links from the source to the target, together with the total
/// cost under the metric used to compute it. A path is only a snapshot: it is not updated when
/// link attributes change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    source: NodeId,
    target: NodeId,
    links: Vec<LinkId>,
    cost: LinkWeight,
}

impl Path {
    /// First node of the path
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Last node of the path
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Links of the path, in traversal order
    pub fn links(&self) -> &[LinkId] {
        &self.links
    }

    /// Total cost of the path at the time it was computed
    pub fn cost(&self) -> LinkWeight {
        self.cost
    }

    /// Number of links on the path
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Always false, since a path contains at least one link.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Returns all nodes along the path, including source and target.
    pub fn nodes(&self, net: &Network) -> Result<Vec<NodeId>, NetworkError> {
        let mut nodes = vec![self.source];
        for link in self.links.iter() {
            nodes.push(net.link_endpoints(*link)?.1);
        }
        Ok(nodes)
    }
}

/// Shortest path with `petgraph::algo::astar` (without a heuristic, i.e., Dijkstra's algorithm),
/// stopping as soon as the target is reached. Every link weight is taken from the metric, and is
/// checked up front: it must be finite and non-negative.
pub(crate) fn find_path<M: LinkMetric + ?Sized>(
    net: &Network,
    source: NodeId,
    target: NodeId,
    metric: &M,
) -> Result<Path, NetworkError> {
    let graph = net.get_topology();
    for node in [source, target].iter() {
        if !graph.contains_node(*node) {
            return Err(NetworkError::NodeNotFound(*node));
        }
    }
    if source == target {
        return Err(NetworkError::NoPathFound(source, target));
    }

    let mut weights: HashMap<LinkId, LinkWeight> = HashMap::with_capacity(graph.edge_count());
    for edge in graph.edge_references() {
        let weight = metric.link_weight(edge.id(), edge.weight());
        if !weight.is_finite() || weight < 0.0 {
            return Err(NetworkError::InvalidLinkWeight(edge.id(), weight));
        }
        weights.insert(edge.id(), weight);
    }

    let (cost, nodes) = match astar(
        graph,
        source,
        |node| node == target,
        |edge| weights.get(&edge.id()).copied().unwrap_or(LinkWeight::INFINITY),
        |_| 0.0,
    ) {
        Some(result) => result,
        None => {
            debug!("No path from {:?} to {:?}", source, target);
            return Err(NetworkError::NoPathFound(source, target));
        }
    };

    let links = nodes
        .windows(2)
        .map(|pair| {
            net.find_link(pair[0], pair[1])
                .ok_or(NetworkError::NodesNotConnected(pair[0], pair[1]))
        })
        .collect::<Result<Vec<LinkId>, NetworkError>>()?;

    Ok(Path { source, target, links, cost })
}
