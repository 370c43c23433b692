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

#![deny(missing_docs)]

//! # Tecap: Traffic-Engineering Weight Setting and Flow Simulation
//! This is a library for routing a volume of data through a directed network, and for tuning the
//! link weights of the network such that the resulting congestion is low.
//!
//! ## Problem Statement
//! Given
//! - a directed network, where every link has a static cost, a routing weight and a capacity,
//! - a source, a target and a volume of data,
//!
//! route the data along the shortest path (by link cost, or by weight), simulate how it is pushed
//! through the path in rounds bounded by the bottleneck capacity, and find integer link weights
//! which minimize the congestion cost of the network (similar to the OSPF weight-setting problem).
//!
//! ## Structure
//!
//! This library is structured in the following way:
//!
//! - **[`NetSim`](netsim)**: The network model. See the main structure
//!   [`Network`](netsim::Network), which also computes shortest paths and runs the
//!   [flow simulation](netsim::FlowSimulation). The network is configured with a
//!   [`Config`](netsim::config::Config).
//!
//! - **[`SoftPolicy`](soft_policies)**: Cost functions scoring the state of the network, most
//!   importantly the piecewise-linear [`CongestionCost`](soft_policies::CongestionCost).
//!
//! - **[`Optimizers`](optimizers)**: Weight optimizers minimizing a cost function, i.e., the
//!   [`LocalSearchOptimizer`](optimizers::LocalSearchOptimizer).
//!
//! - **[`Statistics`](statistics)**: Load and utilization statistics of the links.
//!
//! - **[`TopologyFiles`](topology_files)**: Reads the line-oriented record files (link costs,
//!   weights, capacities and topologies) into a configuration.
//!
//! - **[`ExampleNetworks`](example_networks)**: Collection of prepared networks.
//!
//! ## Usage
//!
//! ```
//! use tecap::example_networks::{AbileneNetwork, ExampleNetwork};
//! use tecap::netsim::Metric;
//! use tecap::optimizers::OptimizerOptions;
//! use tecap::{optimize_weights, Error};
//!
//! fn main() -> Result<(), Error> {
//!     let mut net = AbileneNetwork::net()?;
//!     let source = net.get_node_id("Seattle")?;
//!     let target = net.get_node_id("Atlanta")?;
//!
//!     // simulate a flow along the path with the smallest link cost
//!     let path = net.shortest_path(source, target, Metric::LinkCost)?;
//!     let rounds = net.simulate_flow(&path, 25_000.0)?.count();
//!     assert!(rounds > 0);
//!
//!     // tune the weights on the path, using a reproducible seed
//!     let options = OptimizerOptions { iterations: 100, seed: Some(42), ..Default::default() };
//!     let result = optimize_weights(&mut net, source, target, options)?;
//!     assert!(result.best_cost <= result.initial_cost);
//!
//!     Ok(())
//! }
//! ```
// test modules
pub mod example_networks;
mod test;

mod error;
pub mod netsim;
pub mod optimizers;
pub mod soft_policies;
pub mod statistics;
pub mod topology_files;

pub use error::Error;
pub use optimizers::optimize_weights;

use std::sync::{Arc, RwLock};

/// Stopper, to check when to stop, or to send the stop command
#[derive(Clone, Debug)]
pub struct Stopper {
    flag: Arc<RwLock<bool>>,
    calls: usize,
}

impl Default for Stopper {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopper {
    /// Create a new stopper
    pub fn new() -> Self {
        Self { flag: Arc::new(RwLock::new(false)), calls: 0 }
    }

    /// Send the stop command. This function will block until the write lock can be acquired.
    pub fn send_stop(&self) {
        match self.flag.write() {
            Ok(mut flag) => *flag = true,
            Err(poisoned) => *poisoned.into_inner() = true,
        }
    }

    /// Checks if the stop flag is set. Only every 9th call actually reads the flag, all other
    /// calls return `None`. This function will not block, it returns `None` if the read-lock
    /// cannot be acquired.
    pub fn try_is_stop(&mut self) -> Option<bool> {
        self.calls += 1;
        if self.calls >= 9 {
            self.calls = 0;
            self.flag.try_read().map(|x| *x).ok()
        } else {
            None
        }
    }

    /// Checks if the stop flag is set. This function will block until the read lock can be
    /// acquired.
    pub fn is_stop(&self) -> bool {
        match self.flag.read() {
            Ok(flag) => *flag,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
