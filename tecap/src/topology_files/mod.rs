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

//! # Record Files
//!
//! This module reads the line-oriented record files describing a network, and translates them
//! into a [`Config`], which can then be applied with
//! [`Network::set_config`](crate::netsim::Network::set_config). There are four kinds of files
//! (see [`RecordKind`]):
//!
//! ```text
//! link costs:   A-B,10       (declares the link A -> B with link cost 10)
//! weights:      A-B,3        (sets the weight of the declared link A -> B)
//! capacities:   A-B,1000     (sets the capacity of A -> B, even if it is not declared)
//! topology:     A,B,3        (declares the link A -> B with weight 3)
//! traffic:      A-B,40       (traffic on A -> B, read into a TrafficMatrix)
//! ```
//!
//! Records that cannot be parsed are skipped, and reported as [`RecordError`]. Only failing to
//! read a file is an error.

mod error;
mod parser;

pub use error::{RecordError, TopologyFileError};
pub use parser::{parse_records, parse_traffic, RecordKind};

use crate::netsim::config::Config;
use crate::netsim::TrafficMatrix;

use log::*;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

/// Reads a record file, and adds all records to the configuration. All skipped records are logged
/// and returned.
pub fn read_records(
    filename: impl AsRef<Path>,
    kind: RecordKind,
    config: &mut Config,
) -> Result<Vec<RecordError>, TopologyFileError> {
    let filename = filename.as_ref();
    let content = read_to_string(filename)
        .map_err(|e| TopologyFileError::Io(filename.display().to_string(), e))?;
    let warnings = parse_records(&content, kind, config);
    for warning in warnings.iter() {
        warn!("{}: {}", filename.display(), warning);
    }
    info!("Read {} ({:?}) with {} skipped records", filename.display(), kind, warnings.len());
    Ok(warnings)
}

/// Reads a traffic file (`source-target,traffic`) into the traffic matrix. All skipped records are
/// logged and returned.
pub fn read_traffic(
    filename: impl AsRef<Path>,
    traffic: &mut TrafficMatrix,
) -> Result<Vec<RecordError>, TopologyFileError> {
    let filename = filename.as_ref();
    let content = read_to_string(filename)
        .map_err(|e| TopologyFileError::Io(filename.display().to_string(), e))?;
    let warnings = parse_traffic(&content, traffic);
    for warning in warnings.iter() {
        warn!("{}: {}", filename.display(), warning);
    }
    info!("Read {} (traffic) with {} skipped records", filename.display(), warnings.len());
    Ok(warnings)
}

/// Set of record files describing a single network. All files are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFiles {
    /// Topology file (`source,target,weight`)
    pub topology: Option<PathBuf>,
    /// Link cost file (`source-target,cost`)
    pub link_costs: Option<PathBuf>,
    /// Weight file (`source-target,weight`)
    pub weights: Option<PathBuf>,
    /// Capacity file (`source-target,capacity`)
    pub capacities: Option<PathBuf>,
}

impl RecordFiles {
    /// Returns true if no file is given
    pub fn is_empty(&self) -> bool {
        self.topology.is_none()
            && self.link_costs.is_none()
            && self.weights.is_none()
            && self.capacities.is_none()
    }

    /// Read all given files into a single configuration. The files are read in the order
    /// topology, link costs, weights, capacities. Values of later files replace values of earlier
    /// ones.
    pub fn load(&self) -> Result<(Config, Vec<RecordError>), TopologyFileError> {
        let mut config = Config::new();
        let mut warnings = Vec::new();
        let files = [
            (&self.topology, RecordKind::Topology),
            (&self.link_costs, RecordKind::LinkCosts),
            (&self.weights, RecordKind::Weights),
            (&self.capacities, RecordKind::Capacities),
        ];
        for &(file, kind) in files.iter() {
            if let Some(file) = file {
                warnings.extend(read_records(file, kind, &mut config)?);
            }
        }
        Ok((config, warnings))
    }
}
