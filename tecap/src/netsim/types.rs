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

//! Module containing all type definitions

use petgraph::prelude::*;
use petgraph::stable_graph::StableGraph;
use std::fmt;
use thiserror::Error;

type IndexType = u32;
/// Node Identification (and index into the graph)
pub type NodeId = NodeIndex<IndexType>;
/// Link Identification (and index into the graph)
pub type LinkId = EdgeIndex<IndexType>;
/// Link weight (or link cost) used as a routing metric
pub type LinkWeight = f64;
/// Directed link graph. Every node carries its name, and every edge carries its [`Link`].
pub type LinkGraph = StableGraph<String, Link, Directed, IndexType>;

/// # Link
/// Attributes of a single, directed link. Attributes which were never configured are `None`, and
/// read as `0` through the getters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Link {
    pub(crate) link_cost: Option<LinkWeight>,
    pub(crate) weight: Option<LinkWeight>,
    pub(crate) capacity: Option<f64>,
    pub(crate) load: f64,
}

impl Link {
    /// Static link cost, or `0` if not configured.
    pub fn link_cost(&self) -> LinkWeight {
        self.link_cost.unwrap_or(0.0)
    }

    /// Routing weight, or `0` if not configured.
    pub fn weight(&self) -> LinkWeight {
        self.weight.unwrap_or(0.0)
    }

    /// Capacity of the link, or `0` if not configured.
    pub fn capacity(&self) -> f64 {
        self.capacity.unwrap_or(0.0)
    }

    /// Current load on the link
    pub fn load(&self) -> f64 {
        self.load
    }

    /// Returns the configured value of the attribute, or `None` if it was never set.
    pub fn get(&self, attribute: LinkAttribute) -> Option<f64> {
        match attribute {
            LinkAttribute::LinkCost => self.link_cost,
            LinkAttribute::Weight => self.weight,
            LinkAttribute::Capacity => self.capacity,
        }
    }

    pub(crate) fn slot(&mut self, attribute: LinkAttribute) -> &mut Option<f64> {
        match attribute {
            LinkAttribute::LinkCost => &mut self.link_cost,
            LinkAttribute::Weight => &mut self.weight,
            LinkAttribute::Capacity => &mut self.capacity,
        }
    }
}

/// Configurable attribute of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkAttribute {
    /// Static link cost
    LinkCost,
    /// Mutable routing weight
    Weight,
    /// Capacity (maximum sustained throughput)
    Capacity,
}

impl fmt::Display for LinkAttribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LinkAttribute::LinkCost => write!(f, "link cost"),
            LinkAttribute::Weight => write!(f, "weight"),
            LinkAttribute::Capacity => write!(f, "capacity"),
        }
    }
}

/// Selects which link attribute is used as the routing metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Route by the static link cost
    LinkCost,
    /// Route by the (optimizable) link weight
    Weight,
}

/// Anything that assigns a routing weight to a link. Implemented for [`Metric`], and for every
/// closure of the form `Fn(LinkId, &Link) -> LinkWeight`.
pub trait LinkMetric {
    /// Weight of the link when computing shortest paths.
    fn link_weight(&self, id: LinkId, link: &Link) -> LinkWeight;
}

impl LinkMetric for Metric {
    fn link_weight(&self, _id: LinkId, link: &Link) -> LinkWeight {
        match self {
            Metric::LinkCost => link.link_cost(),
            Metric::Weight => link.weight(),
        }
    }
}

impl<F> LinkMetric for F
where
    F: Fn(LinkId, &Link) -> LinkWeight,
{
    fn link_weight(&self, id: LinkId, link: &Link) -> LinkWeight {
        self(id, link)
    }
}

/// Configuration Error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The added expression would overwrite an existing expression
    #[error("The new ConfigExpr would overwrite an existing one!")]
    ConfigExprOverload,
    /// The expression references a link which was never declared
    #[error("Link {0}-{1} was never declared, the expression is skipped")]
    UnknownLink(String, String),
    /// The expression sets an invalid value (negative or not finite)
    #[error("Invalid {2} for link {0}-{1}: {3}, the expression is skipped")]
    InvalidValue(String, String, LinkAttribute, f64),
}

/// Network Errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Configuration error
    #[error("Configuration Error: {0}")]
    ConfigError(#[from] ConfigError),
    /// Node is not present in the topology
    #[error("Node was not found in topology: {0:?}")]
    NodeNotFound(NodeId),
    /// Node name is not present in the topology
    #[error("Node name was not found in topology: {0}")]
    NodeNameNotFound(String),
    /// Link is not present in the topology
    #[error("Link was not found in topology: {0:?}")]
    LinkNotFound(LinkId),
    /// Two nodes are not connected by a link
    #[error("Network link does not exist: {0:?} -> {1:?}")]
    NodesNotConnected(NodeId, NodeId),
    /// Target cannot be reached from the source
    #[error("No path found from {0:?} to {1:?}")]
    NoPathFound(NodeId, NodeId),
    /// The routing metric returned a negative or non-finite weight
    #[error("Invalid link weight on {0:?}: {1}")]
    InvalidLinkWeight(LinkId, LinkWeight),
    /// A link attribute must be finite and non-negative
    #[error("Invalid {1} on {0:?}: {2}")]
    InvalidAttributeValue(LinkId, LinkAttribute, f64),
    /// The data volume must be finite and non-negative
    #[error("Invalid data volume: {0}")]
    InvalidVolume(f64),
    /// The bottleneck of the path is zero, but a positive volume must be transferred.
    #[error("Path cannot carry any data: link {0:?} has zero capacity")]
    DegenerateZeroCapacityPath(LinkId),
}
