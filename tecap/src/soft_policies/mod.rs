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

//! # Soft Policies
//!
//! Soft policies are expressed as cost functions over the current state of the network. The
//! smaller the cost, the better the state. The weight optimizer searches for link weights which
//! minimize such a cost function.

use crate::netsim::Network;

pub mod congestion_cost;
pub use congestion_cost::{
    link_congestion_cost, network_cost, CongestionCost, TrafficCongestionCost,
};

/// Trait for cost functions, which score the current state of the network.
pub trait CostFunction {
    /// Compute the cost of the current network state. Lower is better. The function must not
    /// depend on anything but the state of the network (and possibly internal bookkeeping).
    fn cost(&mut self, net: &Network) -> f64;
}
