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

#![deny(missing_docs, missing_debug_implementations)]

//! # NetSim
//!
//! This module models a directed network of named nodes and links. Every link carries a static
//! link cost, a mutable routing weight, a capacity, and the load currently assigned to it. On top
//! of this model, the module computes shortest paths over a chosen metric, and simulates how a
//! volume of data is pushed along a path in discrete rounds.
//!
//! ## Example usage
//!
//! The following example builds the chain `A -> B -> C`, where the link `A -> B` has capacity 10
//! and the link `B -> C` has capacity 5. Sending 12 units along the path takes three rounds.
//!
//! ```rust
//! use tecap::netsim::{Network, Metric};
//! use tecap::netsim::config::{Config, ConfigExpr};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut c = Config::new();
//!     c.add(ConfigExpr::Cost { source: "A".into(), target: "B".into(), cost: 1.0 })?;
//!     c.add(ConfigExpr::Cost { source: "B".into(), target: "C".into(), cost: 1.0 })?;
//!     c.add(ConfigExpr::Capacity { source: "A".into(), target: "B".into(), capacity: 10.0 })?;
//!     c.add(ConfigExpr::Capacity { source: "B".into(), target: "C".into(), capacity: 5.0 })?;
//!
//!     let mut net = Network::new();
//!     net.add_link("A", "B");
//!     net.add_link("B", "C");
//!     let warnings = net.set_config(&c)?;
//!     assert!(warnings.is_empty());
//!
//!     let a = net.get_node_id("A")?;
//!     let c = net.get_node_id("C")?;
//!     let path = net.shortest_path(a, c, Metric::LinkCost)?;
//!     assert_eq!(path.len(), 2);
//!
//!     let sent: Vec<f64> = net.simulate_flow(&path, 12.0)?.map(|round| round.sent).collect();
//!     assert_eq!(sent, vec![5.0, 5.0, 2.0]);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod event;
mod flow;
mod network;
pub mod printer;
mod shortest_path;
mod traffic;
mod types;

pub use flow::{Delivery, FlowRound, FlowSimulation};
pub use network::Network;
pub use shortest_path::Path;
pub use traffic::TrafficMatrix;
pub use types::*;
