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

//! Module for defining events

use crate::netsim::{LinkAttribute, LinkId, LinkWeight, NodeId};

/// Every mutation of the network, and every decision taken by the flow simulation or by the
/// optimizer, is recorded as an event in the network's history.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A new node was added to the topology
    NodeAdded(NodeId),
    /// A new link was added to the topology
    LinkAdded(LinkId),
    /// A link attribute was changed.
    LinkAttributeChanged {
        /// Modified link
        link: LinkId,
        /// Modified attribute
        attribute: LinkAttribute,
        /// Value before the change (`None` if not configured before)
        old: Option<f64>,
        /// New value
        new: f64,
    },
    /// A capacity was stored for a link that does not exist yet. It is attached once the link is
    /// added.
    PendingCapacity {
        /// Name of the source node
        source: String,
        /// Name of the target node
        target: String,
        /// Stored capacity
        capacity: f64,
    },
    /// The load on every link was set back to zero
    LoadsReset,
    /// The load of a link was computed from its weight and its traffic.
    LinkLoadComputed {
        /// Link whose load was set
        link: LinkId,
        /// New load
        load: f64,
    },
    /// One round of a flow simulation has finished.
    FlowRoundCompleted {
        /// Round index, starting at 0
        round: usize,
        /// Volume sent over every link of the path in this round
        sent: f64,
        /// Volume still to be sent after this round
        remaining: f64,
    },
    /// The optimizer permanently applied the best weight found during an iteration.
    WeightOptimized {
        /// Iteration in which the change was found
        iteration: usize,
        /// Changed link
        link: LinkId,
        /// New weight
        weight: LinkWeight,
        /// Network cost after the change
        cost: f64,
    },
}

impl Event {
    /// Returns the link this event is about, if any.
    pub fn link(&self) -> Option<LinkId> {
        match self {
            Event::LinkAdded(link) => Some(*link),
            Event::LinkAttributeChanged { link, .. } => Some(*link),
            Event::WeightOptimized { link, .. } => Some(*link),
            Event::LinkLoadComputed { link, .. } => Some(*link),
            _ => None,
        }
    }

    /// Returns true if the event modified the configuration of the network (as opposed to loads
    /// or decisions of the simulation).
    pub fn is_config_event(&self) -> bool {
        matches!(
            self,
            Event::NodeAdded(_)
                | Event::LinkAdded(_)
                | Event::LinkAttributeChanged { .. }
                | Event::PendingCapacity { .. }
        )
    }
}
