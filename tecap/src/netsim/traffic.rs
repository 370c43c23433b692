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

//! # Traffic Matrix
//!
//! Offered traffic per directed link, keyed by the names of its endpoints. The load of a link is
//! its routing weight multiplied by its traffic (see [`Network::compute_link_loads`]).

use crate::netsim::{LinkId, Network, NetworkError};

use std::collections::HashMap;

/// Traffic per link. Like capacities, traffic may be given for links that do not exist (yet).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrafficMatrix {
    traffic: HashMap<(String, String), f64>,
}

impl TrafficMatrix {
    /// Create an empty traffic matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the traffic of the link `source -> target`, and return the previous value.
    pub fn insert(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        traffic: f64,
    ) -> Option<f64> {
        self.traffic.insert((source.into(), target.into()), traffic)
    }

    /// Returns the traffic of the link `source -> target`.
    pub fn get(&self, source: &str, target: &str) -> Option<f64> {
        self.traffic.get(&(source.to_string(), target.to_string())).copied()
    }

    /// Number of links with traffic
    pub fn len(&self) -> usize {
        self.traffic.len()
    }

    /// Returns true if no traffic is given
    pub fn is_empty(&self) -> bool {
        self.traffic.is_empty()
    }

    /// Iterate over all entries `(source, target, traffic)`, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.traffic.iter().map(|((s, t), v)| (s.as_str(), t.as_str(), *v))
    }

    /// Load of the link under the current weight, i.e., `weight * traffic`. Returns `None` if no
    /// traffic is given for the link.
    pub fn link_load(&self, net: &Network, link: LinkId) -> Result<Option<f64>, NetworkError> {
        let (source, target) = net.link_endpoints(link)?;
        let weight = net.get_link(link).ok_or(NetworkError::LinkNotFound(link))?.weight();
        Ok(self.get(net.get_node_name(source)?, net.get_node_name(target)?).map(|t| t * weight))
    }
}
