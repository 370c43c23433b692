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

use tecap::example_networks::{AbileneNetwork, ChainNet, ExampleNetwork};
use tecap::netsim::{Network, TrafficMatrix};
use tecap::topology_files::{read_traffic, RecordFiles};

use clap::{Args, ValueEnum};
use log::*;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Prepared networks, which can be used instead of record files
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// A -> B -> C, with capacities 10 and 5
    Chain,
    /// The Abilene backbone network
    Abilene,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Topology::Chain => write!(f, "ChainNet"),
            Topology::Abilene => write!(f, "AbileneNetwork"),
        }
    }
}

/// Where to take the network from. Record files take precedence over the example network.
#[derive(Args, Debug, Clone)]
pub struct NetworkSelection {
    /// Topology file with records `source,target,weight`
    #[arg(long, global = true)]
    topology: Option<PathBuf>,
    /// Link cost file with records `source-target,cost`
    #[arg(long, global = true)]
    costs: Option<PathBuf>,
    /// Weight file with records `source-target,weight`
    #[arg(long, global = true)]
    weights: Option<PathBuf>,
    /// Capacity file with records `source-target,capacity`
    #[arg(long, global = true)]
    capacities: Option<PathBuf>,
    /// Traffic file with records `source-target,traffic`. Sets the link loads to
    /// `weight * traffic`.
    #[arg(long, global = true)]
    traffic: Option<PathBuf>,
    /// Example network, used if no record file is given
    #[arg(short = 'e', long, value_enum, global = true, default_value = "abilene")]
    example: Topology,
}

impl NetworkSelection {
    fn record_files(&self) -> RecordFiles {
        RecordFiles {
            topology: self.topology.clone(),
            link_costs: self.costs.clone(),
            weights: self.weights.clone(),
            capacities: self.capacities.clone(),
        }
    }

    /// Build the selected network. Skipped records only produce warnings. If a traffic file is
    /// given, the link loads are computed from it, and the traffic matrix is returned as well.
    pub fn network(&self) -> Result<(Network, Option<TrafficMatrix>), Box<dyn Error>> {
        let mut net = self.topology()?;
        let traffic = match self.traffic.as_ref() {
            Some(file) => {
                let mut traffic = TrafficMatrix::new();
                let warnings = read_traffic(file, &mut traffic)?;
                let skipped = net.compute_link_loads(&traffic)?;
                info!(
                    "Traffic for {} links loaded ({} records skipped, {} links without traffic)",
                    traffic.len(),
                    warnings.len(),
                    skipped.len()
                );
                Some(traffic)
            }
            None => None,
        };
        Ok((net, traffic))
    }

    fn topology(&self) -> Result<Network, Box<dyn Error>> {
        let files = self.record_files();
        if files.is_empty() {
            info!("Using the example network {}", self.example);
            return Ok(match self.example {
                Topology::Chain => ChainNet::net()?,
                Topology::Abilene => AbileneNetwork::net()?,
            });
        }

        let (config, record_warnings) = files.load()?;
        let mut net = Network::new();
        let config_warnings = net.set_config(&config)?;
        info!(
            "Network with {} nodes and {} links loaded ({} records skipped, {} not applied)",
            net.num_nodes(),
            net.num_links(),
            record_warnings.len(),
            config_warnings.len()
        );
        Ok(net)
    }
}
