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

//! Module containing all error types

use crate::netsim::{ConfigError, NetworkError};
use crate::topology_files::TopologyFileError;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// Error propagated from `netsim`
    #[error("Network Error: {0}")]
    NetworkError(#[from] NetworkError),
    /// The options of the optimizer are invalid
    #[error("Invalid optimizer options: {0}")]
    InvalidOptions(&'static str),
    /// Error while reading the record files
    #[error("Topology File Error: {0}")]
    TopologyFileError(#[from] TopologyFileError),
}

impl From<ConfigError> for Error {
    fn from(cause: ConfigError) -> Self {
        Self::NetworkError(NetworkError::ConfigError(cause))
    }
}
