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

//! Networks for testing

use crate::netsim::config::{Config, ConfigExpr};
use crate::netsim::{LinkWeight, Network, NetworkError};

mod chain_net;
pub use chain_net::ChainNet;

mod abilene_net;
pub use abilene_net::AbileneNetwork;

/// Trait for easier access to example networks.
pub trait ExampleNetwork {
    /// Get the configuration describing the network (links, costs, weights and capacities).
    fn config() -> Config;

    /// Get the network with the configuration applied. Fails if the configuration produces any
    /// warning.
    fn net() -> Result<Network, NetworkError> {
        let mut net = Network::new();
        let warnings = net.set_config(&Self::config())?;
        match warnings.into_iter().next() {
            Some(warning) => Err(warning.into()),
            None => Ok(net),
        }
    }
}

/// Declare the link `source -> target` in the configuration, with all its attributes.
fn configure_link(
    config: &mut Config,
    source: &str,
    target: &str,
    cost: LinkWeight,
    weight: LinkWeight,
    capacity: f64,
) {
    let (source, target) = (source.to_string(), target.to_string());
    config.set(ConfigExpr::Link { source: source.clone(), target: target.clone() });
    config.set(ConfigExpr::Cost { source: source.clone(), target: target.clone(), cost });
    config.set(ConfigExpr::Weight { source: source.clone(), target: target.clone(), weight });
    config.set(ConfigExpr::Capacity { source, target, capacity });
}
