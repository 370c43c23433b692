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

//! # Load Statistics
//!
//! Summary of the link loads and utilizations of a network, typically taken after a flow
//! simulation.

use crate::netsim::{Link, Network};

use itertools::{Itertools, MinMaxResult};
use std::fmt;

/// Utilization above which a link is considered highly loaded (in percent)
pub const HIGH_LOAD_THRESHOLD: f64 = 75.0;
/// Utilization above which a link is considered moderately loaded (in percent)
pub const MEDIUM_LOAD_THRESHOLD: f64 = 50.0;

/// Utilization of a link in percent. A link without a configured capacity is treated as having
/// capacity 1, while a link with capacity 0 has a utilization of 0.
pub fn utilization_percent(link: &Link) -> f64 {
    match link.capacity {
        Some(c) if c == 0.0 => 0.0,
        Some(c) => link.load / c * 100.0,
        None => link.load * 100.0,
    }
}

/// Classification of a link by its utilization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadLevel {
    /// At most 50%
    Low,
    /// More than 50%, but at most 75%
    Medium,
    /// More than 75%
    High,
}

impl LoadLevel {
    /// Classify the utilization (given in percent)
    pub fn from_utilization(percent: f64) -> Self {
        if percent > HIGH_LOAD_THRESHOLD {
            Self::High
        } else if percent > MEDIUM_LOAD_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Classify the link by its current utilization
    pub fn of_link(link: &Link) -> Self {
        Self::from_utilization(utilization_percent(link))
    }
}

impl fmt::Display for LoadLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadLevel::Low => write!(f, "low"),
            LoadLevel::Medium => write!(f, "medium"),
            LoadLevel::High => write!(f, "high"),
        }
    }
}

/// Load statistics over all links of a network. All values are zero for a network without links.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadStatistics {
    /// Number of links considered
    pub num_links: usize,
    /// Average utilization in percent
    pub average_utilization: f64,
    /// Smallest utilization in percent
    pub min_utilization: f64,
    /// Largest utilization in percent
    pub max_utilization: f64,
    /// Average load
    pub average_load: f64,
    /// Smallest load
    pub min_load: f64,
    /// Largest load
    pub max_load: f64,
}

impl LoadStatistics {
    /// Compute the statistics of the current load distribution
    pub fn new(net: &Network) -> Self {
        let utilizations: Vec<f64> = net.links().map(|(_, l)| utilization_percent(l)).collect();
        let loads: Vec<f64> = net.links().map(|(_, l)| l.load()).collect();
        if utilizations.is_empty() {
            return Self::default();
        }
        let (min_utilization, max_utilization) = min_max(&utilizations);
        let (min_load, max_load) = min_max(&loads);
        Self {
            num_links: loads.len(),
            average_utilization: average(&utilizations),
            min_utilization,
            max_utilization,
            average_load: average(&loads),
            min_load,
            max_load,
        }
    }
}

impl fmt::Display for LoadStatistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Average Utilization: {:.2}%", self.average_utilization)?;
        writeln!(f, "Minimum Utilization: {:.2}%", self.min_utilization)?;
        writeln!(f, "Maximum Utilization: {:.2}%", self.max_utilization)?;
        writeln!(f, "Average Load: {:.2}", self.average_load)?;
        writeln!(f, "Minimum Load: {:.2}", self.min_load)?;
        write!(f, "Maximum Load: {:.2}", self.max_load)
    }
}

fn average(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn min_max(values: &[f64]) -> (f64, f64) {
    match values.iter().minmax() {
        MinMaxResult::NoElements => (0.0, 0.0),
        MinMaxResult::OneElement(x) => (*x, *x),
        MinMaxResult::MinMax(min, max) => (*min, *max),
    }
}
