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

//! # Congestion Cost
//!
//! Piecewise-linear cost of a link, as a function of its utilization $u = \text{load} /
//! \text{capacity}$. The slope increases steeply once the link approaches its capacity:
//!
//! | Utilization             | Cost                    |
//! |-------------------------|-------------------------|
//! | $u < 1/3$               | $u$                     |
//! | $1/3 \le u < 2/3$       | $3u - 2/3$              |
//! | $2/3 \le u < 9/10$      | $10u - 16/3$            |
//! | $9/10 \le u < 1$        | $70u - 178/3$           |
//! | $1 \le u < 11/10$       | $500u - 1468/3$         |
//! | $u \ge 11/10$           | $5000u - 19468/3$       |
//!
//! The function is continuous at $1/3$, $2/3$, $9/10$ and $1$. At $11/10$, the last segment starts
//! below the end of the previous one (by $1050$), but it is still strictly increasing.

use super::CostFunction;
use crate::netsim::{Link, Network, TrafficMatrix};

/// Cost of a single link at the given utilization.
pub fn link_congestion_cost(utilization: f64) -> f64 {
    let u = utilization;
    if u < 1.0 / 3.0 {
        u
    } else if u < 2.0 / 3.0 {
        3.0 * u - 2.0 / 3.0
    } else if u < 0.9 {
        10.0 * u - 16.0 / 3.0
    } else if u < 1.0 {
        70.0 * u - 178.0 / 3.0
    } else if u < 1.1 {
        500.0 * u - 1468.0 / 3.0
    } else {
        5000.0 * u - 19468.0 / 3.0
    }
}

/// Utilization used for the congestion cost. Links without capacity (or with capacity 0) are
/// treated as having capacity 1. The stored capacity is not changed.
fn congestion_utilization(link: &Link, load: f64) -> f64 {
    match link.capacity {
        Some(c) if c > 0.0 => load / c,
        _ => load,
    }
}

/// Sum of the congestion cost of all links in the network.
pub fn network_cost(net: &Network) -> f64 {
    net.links().map(|(_, l)| link_congestion_cost(congestion_utilization(l, l.load))).sum()
}

/// Cost function summing up the congestion cost of every link (see the [module](self)
/// documentation).
#[derive(Debug, Clone, Copy, Default)]
pub struct CongestionCost;

impl CostFunction for CongestionCost {
    fn cost(&mut self, net: &Network) -> f64 {
        network_cost(net)
    }
}

/// Congestion cost where the load of every link with traffic follows its current weight
/// (`weight * traffic`), without writing the loads to the network. Links without traffic use their
/// stored load. This makes the cost depend on the weights chosen by an optimizer.
#[derive(Debug, Clone, Default)]
pub struct TrafficCongestionCost {
    traffic: TrafficMatrix,
}

impl TrafficCongestionCost {
    /// Create the cost function for the given traffic
    pub fn new(traffic: TrafficMatrix) -> Self {
        Self { traffic }
    }

    /// Returns the traffic matrix
    pub fn traffic(&self) -> &TrafficMatrix {
        &self.traffic
    }
}

impl CostFunction for TrafficCongestionCost {
    fn cost(&mut self, net: &Network) -> f64 {
        net.links()
            .map(|(id, l)| {
                let load = self.traffic.link_load(net, id).ok().flatten().unwrap_or(l.load);
                link_congestion_cost(congestion_utilization(l, load))
            })
            .sum()
    }
}
