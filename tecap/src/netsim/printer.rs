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

//! # Helper (printer) functions for the Network
//! Module containing helper functions to get formatted strings and print information about the
//! network. All node IDs are replaced by the node names.

use crate::netsim::event::Event;
use crate::netsim::network::Network;
use crate::netsim::{LinkAttribute, LinkId, NetworkError, Path};
use crate::statistics::utilization_percent;

use itertools::Itertools;

/// Returns the formatted link key `source-target`.
pub fn link(net: &Network, link: LinkId) -> Result<String, NetworkError> {
    let (source, target) = net.link_endpoints(link)?;
    Ok(format!("{}-{}", net.get_node_name(source)?, net.get_node_name(target)?))
}

/// Returns the path as a sequence of node names, e.g. `A -> B -> C`.
pub fn path(net: &Network, path: &Path) -> Result<String, NetworkError> {
    let names = path
        .nodes(net)?
        .into_iter()
        .map(|n| net.get_node_name(n))
        .collect::<Result<Vec<_>, NetworkError>>()?;
    Ok(names.into_iter().join(" -> "))
}

/// Returns a one-line summary of the link attributes, e.g.
/// `Link Cost: 1.00 | Weight: 3.00 | Load: 50.00%`. The load is given relative to the capacity,
/// and shown as `0%` for links without a (positive) capacity.
pub fn link_summary(net: &Network, link: LinkId) -> Result<String, NetworkError> {
    let l = net.get_link(link).ok_or(NetworkError::LinkNotFound(link))?;
    let utilization = match l.get(LinkAttribute::Capacity) {
        Some(c) if c > 0.0 => utilization_percent(l),
        _ => 0.0,
    };
    Ok(format!(
        "Link Cost: {:.2} | Weight: {:.2} | Load: {:.2}%",
        l.link_cost(),
        l.weight(),
        utilization
    ))
}

/// Returns a formatted string of the event.
pub fn event(net: &Network, event: &Event) -> Result<String, NetworkError> {
    Ok(match event {
        Event::NodeAdded(node) => format!("Node {} added", net.get_node_name(*node)?),
        Event::LinkAdded(l) => format!("Link {} added", link(net, *l)?),
        Event::LinkAttributeChanged { link: l, attribute, old: Some(old), new } => {
            format!("{}: {} changed from {} to {}", link(net, *l)?, attribute, old, new)
        }
        Event::LinkAttributeChanged { link: l, attribute, old: None, new } => {
            format!("{}: {} set to {}", link(net, *l)?, attribute, new)
        }
        Event::PendingCapacity { source, target, capacity } => {
            format!("{}-{}: capacity {} stored for an undeclared link", source, target, capacity)
        }
        Event::LoadsReset => String::from("All loads reset"),
        Event::LinkLoadComputed { link: l, load } => {
            format!("{}: load computed as {}", link(net, *l)?, load)
        }
        Event::FlowRoundCompleted { round, sent, remaining } => {
            format!("Round {}: sent {}, remaining {}", round, sent, remaining)
        }
        Event::WeightOptimized { iteration, link: l, weight, cost } => format!(
            "Iteration {}: weight of {} set to {} (cost {})",
            iteration,
            link(net, *l)?,
            weight,
            cost
        ),
    })
}
