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

//! # Top-level Network module
//!
//! This module represents the network topology, applies the configuration, and provides the
//! entry points for routing and flow simulation.

use crate::netsim::config::{Config, ConfigExpr};
use crate::netsim::event::Event;
use crate::netsim::flow::FlowSimulation;
use crate::netsim::printer;
use crate::netsim::shortest_path::{self, Path};
use crate::netsim::traffic::TrafficMatrix;
use crate::netsim::{
    ConfigError, Link, LinkAttribute, LinkGraph, LinkId, LinkMetric, LinkWeight, NetworkError,
    NodeId,
};
use crate::soft_policies::congestion_cost;

use log::*;
use std::collections::HashMap;

/// # Network struct
/// The struct contains the directed topology (nodes and links), together with all link attributes
/// (link cost, weight, capacity and load). Nodes are identified by their name, and addressed
/// internally by a [`NodeId`]. Links are identified by the ordered pair of their endpoints, and
/// addressed internally by a [`LinkId`]. Nodes and links are never removed.
///
/// ## Capacities of undeclared links
///
/// Capacities are often configured independently of the topology. Therefore, a capacity can be set
/// for a link that does not exist yet (see [`Network::set_capacity`]). The value is kept aside and
/// attached to the link as soon as it is added. Reading the capacity of a link that has none
/// returns `0`.
///
/// ## Event History
///
/// Every mutation (added nodes and links, changed attributes, reset loads) and every decision
/// (completed flow rounds, applied optimizer steps) is appended to the event history. The history
/// can be inspected with [`Network::events`] or drained with [`Network::take_events`]. The network
/// itself only logs through the `log` facade, and never decides how events are presented.
#[derive(Debug)]
pub struct Network {
    graph: LinkGraph,
    node_lookup: HashMap<String, NodeId>,
    links: Vec<LinkId>,
    link_lookup: HashMap<(NodeId, NodeId), LinkId>,
    pending_capacities: HashMap<(String, String), f64>,
    event_history: Vec<Event>,
}

impl Clone for Network {
    /// Cloning the network does not clone the event history.
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            node_lookup: self.node_lookup.clone(),
            links: self.links.clone(),
            link_lookup: self.link_lookup.clone(),
            pending_capacities: self.pending_capacities.clone(),
            event_history: Vec::new(),
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl Network {
    /// Generate an empty Network
    pub fn new() -> Self {
        Self {
            graph: LinkGraph::new(),
            node_lookup: HashMap::new(),
            links: Vec::new(),
            link_lookup: HashMap::new(),
            pending_capacities: HashMap::new(),
            event_history: Vec::new(),
        }
    }

    /// Add a new node to the topology, and return its ID. If a node with the same name already
    /// exists, its ID is returned and nothing is changed.
    pub fn add_node<S: Into<String>>(&mut self, name: S) -> NodeId {
        let name = name.into();
        if let Some(id) = self.node_lookup.get(&name) {
            return *id;
        }
        let id = self.graph.add_node(name.clone());
        debug!("Add node {} ({})", name, id.index());
        self.node_lookup.insert(name, id);
        self.event_history.push(Event::NodeAdded(id));
        id
    }

    /// Add a directed link from `source` to `target`, and return its ID. Both endpoints are
    /// created if they do not exist. If the link already exists, its ID is returned and nothing is
    /// changed. If a capacity was configured for this link before, it is attached now.
    pub fn add_link(&mut self, source: impl AsRef<str>, target: impl AsRef<str>) -> LinkId {
        let (source, target) = (source.as_ref(), target.as_ref());
        let src = self.add_node(source);
        let dst = self.add_node(target);
        if let Some(link) = self.link_lookup.get(&(src, dst)) {
            return *link;
        }

        let pending = self.pending_capacities.remove(&(source.to_string(), target.to_string()));
        let link = Link { capacity: pending, ..Default::default() };
        let id = self.graph.add_edge(src, dst, link);
        self.links.push(id);
        self.link_lookup.insert((src, dst), id);
        debug!("Add link {}-{}", source, target);
        self.event_history.push(Event::LinkAdded(id));

        if let Some(capacity) = pending {
            debug!("Attach stored capacity {} to link {}-{}", capacity, source, target);
            self.event_history.push(Event::LinkAttributeChanged {
                link: id,
                attribute: LinkAttribute::Capacity,
                old: None,
                new: capacity,
            });
        }
        id
    }

    /// Get the node ID of the node with the given name.
    pub fn get_node_id(&self, name: impl AsRef<str>) -> Result<NodeId, NetworkError> {
        self.node_lookup
            .get(name.as_ref())
            .copied()
            .ok_or_else(|| NetworkError::NodeNameNotFound(name.as_ref().to_string()))
    }

    /// Return the name of the node.
    pub fn get_node_name(&self, node: NodeId) -> Result<&str, NetworkError> {
        self.graph.node_weight(node).map(|n| n.as_str()).ok_or(NetworkError::NodeNotFound(node))
    }

    /// Returns a vector of all node IDs, in the order they were added.
    pub fn get_nodes(&self) -> Vec<NodeId> {
        self.graph.node_indices().collect()
    }

    /// Returns the number of nodes in the topology
    pub fn num_nodes(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of links in the topology
    pub fn num_links(&self) -> usize {
        self.links.len()
    }

    /// Returns a reference to the underlying graph
    pub fn get_topology(&self) -> &LinkGraph {
        &self.graph
    }

    /// Returns the link, or `None` if it does not exist.
    pub fn get_link(&self, link: LinkId) -> Option<&Link> {
        self.graph.edge_weight(link)
    }

    /// Returns the ID of the link from `source` to `target`, if it exists.
    pub fn find_link(&self, source: NodeId, target: NodeId) -> Option<LinkId> {
        self.link_lookup.get(&(source, target)).copied()
    }

    /// Returns the ID of the link between the two named nodes.
    pub fn get_link_id(
        &self,
        source: impl AsRef<str>,
        target: impl AsRef<str>,
    ) -> Result<LinkId, NetworkError> {
        let src = self.get_node_id(source)?;
        let dst = self.get_node_id(target)?;
        self.find_link(src, dst).ok_or(NetworkError::NodesNotConnected(src, dst))
    }

    /// Returns the source and the target of the link.
    pub fn link_endpoints(&self, link: LinkId) -> Result<(NodeId, NodeId), NetworkError> {
        self.graph.edge_endpoints(link).ok_or(NetworkError::LinkNotFound(link))
    }

    /// Iterate over all links, in the order in which they were added.
    pub fn links(&self) -> impl Iterator<Item = (LinkId, &Link)> + '_ {
        self.links.iter().filter_map(move |id| self.graph.edge_weight(*id).map(|l| (*id, l)))
    }

    /// Set an attribute of the link, and return its previous value. The value must be finite and
    /// non-negative.
    pub fn set_link_attribute(
        &mut self,
        link: LinkId,
        attribute: LinkAttribute,
        value: f64,
    ) -> Result<Option<f64>, NetworkError> {
        if !value.is_finite() || value < 0.0 {
            return Err(NetworkError::InvalidAttributeValue(link, attribute, value));
        }
        let old = self
            .graph
            .edge_weight_mut(link)
            .ok_or(NetworkError::LinkNotFound(link))?
            .slot(attribute)
            .replace(value);
        debug!("Set {} of {} to {}", attribute, printer::link(self, link)?, value);
        self.event_history.push(Event::LinkAttributeChanged { link, attribute, old, new: value });
        Ok(old)
    }

    /// Set the static link cost
    pub fn set_link_cost(
        &mut self,
        link: LinkId,
        cost: LinkWeight,
    ) -> Result<Option<LinkWeight>, NetworkError> {
        self.set_link_attribute(link, LinkAttribute::LinkCost, cost)
    }

    /// Set the routing weight
    pub fn set_link_weight(
        &mut self,
        link: LinkId,
        weight: LinkWeight,
    ) -> Result<Option<LinkWeight>, NetworkError> {
        self.set_link_attribute(link, LinkAttribute::Weight, weight)
    }

    /// Set the capacity of an existing link
    pub fn set_link_capacity(
        &mut self,
        link: LinkId,
        capacity: f64,
    ) -> Result<Option<f64>, NetworkError> {
        self.set_link_attribute(link, LinkAttribute::Capacity, capacity)
    }

    /// Set the capacity of the link from `source` to `target`. If the link (or any of its
    /// endpoints) does not exist yet, the capacity is stored and attached to the link once it is
    /// added.
    pub fn set_capacity(
        &mut self,
        source: impl AsRef<str>,
        target: impl AsRef<str>,
        capacity: f64,
    ) -> Result<(), NetworkError> {
        let (source, target) = (source.as_ref(), target.as_ref());
        if let Some(link) = self.lookup_link(source, target) {
            return self.set_link_capacity(link, capacity).map(|_| ());
        }
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(ConfigError::InvalidValue(
                source.to_string(),
                target.to_string(),
                LinkAttribute::Capacity,
                capacity,
            )
            .into());
        }
        debug!("Store capacity {} for the undeclared link {}-{}", capacity, source, target);
        self.pending_capacities.insert((source.to_string(), target.to_string()), capacity);
        self.event_history.push(Event::PendingCapacity {
            source: source.to_string(),
            target: target.to_string(),
            capacity,
        });
        Ok(())
    }

    /// Returns the capacity configured for the link from `source` to `target`, independent of
    /// whether the link exists. If no capacity is known, `0` is returned.
    pub fn get_capacity(&self, source: impl AsRef<str>, target: impl AsRef<str>) -> f64 {
        let (source, target) = (source.as_ref(), target.as_ref());
        match self.lookup_link(source, target) {
            Some(link) => self.graph.edge_weight(link).map(|l| l.capacity()).unwrap_or(0.0),
            None => self
                .pending_capacities
                .get(&(source.to_string(), target.to_string()))
                .copied()
                .unwrap_or(0.0),
        }
    }

    /// Set the load of every link back to zero. This must be called before simulating a new
    /// scenario, such that no stale load carries over.
    pub fn reset_loads(&mut self) {
        for id in self.links.iter() {
            if let Some(link) = self.graph.edge_weight_mut(*id) {
                link.load = 0.0;
            }
        }
        debug!("Reset the load of all links");
        self.event_history.push(Event::LoadsReset);
    }

    /// Set the load of every link with traffic to `weight * traffic`. Links without traffic keep
    /// their load, and are returned in insertion order.
    pub fn compute_link_loads(
        &mut self,
        traffic: &TrafficMatrix,
    ) -> Result<Vec<LinkId>, NetworkError> {
        let mut skipped = Vec::new();
        for link in self.links.clone() {
            let load = match traffic.link_load(self, link)? {
                Some(load) => load,
                None => {
                    debug!("No traffic for link {}", printer::link(self, link)?);
                    skipped.push(link);
                    continue;
                }
            };
            self.set_load(link, load)?;
            self.event_history.push(Event::LinkLoadComputed { link, load });
        }
        info!(
            "Computed the load of {} links ({} without traffic)",
            self.links.len() - skipped.len(),
            skipped.len()
        );
        Ok(skipped)
    }

    /// Apply a configuration to the network. The configuration is applied in three phases:
    ///
    /// 1. All links are declared (creating the nodes on the way).
    /// 2. Link costs and weights are set. Expressions referencing a link that was never declared
    ///    are skipped.
    /// 3. Capacities are set, also for links that do not exist (yet).
    ///
    /// Expressions that cannot be applied (unknown links, invalid values) are skipped. They are
    /// logged, and returned as warnings. Only unexpected errors abort the operation.
    pub fn set_config(&mut self, config: &Config) -> Result<Vec<ConfigError>, NetworkError> {
        let mut warnings = Vec::new();

        for expr in config.iter() {
            if let ConfigExpr::Link { source, target } = expr {
                self.add_link(source, target);
            }
        }

        for expr in config.iter() {
            let (source, target) = expr.link();
            let warning = match expr {
                ConfigExpr::Cost { .. } | ConfigExpr::Weight { .. } => {
                    match (self.lookup_link(source, target), expr.attribute()) {
                        (Some(link), Some((attribute, value))) => {
                            match self.set_link_attribute(link, attribute, value) {
                                Ok(_) => None,
                                Err(NetworkError::InvalidAttributeValue(_, attribute, value)) => {
                                    Some(ConfigError::InvalidValue(
                                        source.to_string(),
                                        target.to_string(),
                                        attribute,
                                        value,
                                    ))
                                }
                                Err(e) => return Err(e),
                            }
                        }
                        _ => Some(ConfigError::UnknownLink(source.to_string(), target.to_string())),
                    }
                }
                _ => None,
            };
            warnings.extend(warning);
        }

        for expr in config.iter() {
            if let ConfigExpr::Capacity { source, target, capacity } = expr {
                match self.set_capacity(source, target, *capacity) {
                    Ok(()) => {}
                    Err(NetworkError::InvalidAttributeValue(_, attribute, value)) => warnings
                        .push(ConfigError::InvalidValue(
                            source.to_string(),
                            target.to_string(),
                            attribute,
                            value,
                        )),
                    Err(NetworkError::ConfigError(e)) => warnings.push(e),
                    Err(e) => return Err(e),
                }
            }
        }

        for warning in warnings.iter() {
            warn!("{}", warning);
        }
        Ok(warnings)
    }

    /// Compute the shortest path from `source` to `target`, using the given metric (e.g.
    /// [`Metric::LinkCost`](crate::netsim::Metric::LinkCost),
    /// [`Metric::Weight`](crate::netsim::Metric::Weight), or a closure). The path is computed from
    /// scratch on every call. If the target cannot be reached, `NetworkError::NoPathFound` is
    /// returned.
    pub fn shortest_path<M: LinkMetric>(
        &self,
        source: NodeId,
        target: NodeId,
        metric: M,
    ) -> Result<Path, NetworkError> {
        shortest_path::find_path(self, source, target, &metric)
    }

    /// Prepare the flow simulation of `volume` along the path. The returned simulation is a lazy
    /// iterator over the rounds, starting at round 0. See [`FlowSimulation`] for details.
    pub fn simulate_flow(
        &mut self,
        path: &Path,
        volume: f64,
    ) -> Result<FlowSimulation<'_>, NetworkError> {
        FlowSimulation::new(self, path, volume)
    }

    /// Total congestion cost of the current load distribution (see
    /// [`CongestionCost`](crate::soft_policies::CongestionCost)).
    pub fn network_cost(&self) -> f64 {
        congestion_cost::network_cost(self)
    }

    /// Returns all events recorded since the network was created (or since the last call to
    /// [`Network::take_events`]).
    pub fn events(&self) -> &[Event] {
        &self.event_history
    }

    /// Drain the event history.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.event_history)
    }

    pub(crate) fn record_event(&mut self, event: Event) {
        self.event_history.push(event);
    }

    pub(crate) fn set_load(&mut self, link: LinkId, load: f64) -> Result<(), NetworkError> {
        self.graph.edge_weight_mut(link).ok_or(NetworkError::LinkNotFound(link))?.load = load;
        Ok(())
    }

    /// Replace the weight of the link without recording an event, and return the previous value.
    /// Used to evaluate trial weights, which are always restored afterwards.
    pub(crate) fn swap_weight(
        &mut self,
        link: LinkId,
        weight: Option<LinkWeight>,
    ) -> Result<Option<LinkWeight>, NetworkError> {
        let link = self.graph.edge_weight_mut(link).ok_or(NetworkError::LinkNotFound(link))?;
        Ok(std::mem::replace(&mut link.weight, weight))
    }

    fn lookup_link(&self, source: &str, target: &str) -> Option<LinkId> {
        let src = self.node_lookup.get(source)?;
        let dst = self.node_lookup.get(target)?;
        self.find_link(*src, *dst)
    }
}
