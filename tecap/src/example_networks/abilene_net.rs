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

//! [Abilene Network](http://topology-zoo.org/dataset.html)

use super::{configure_link, ExampleNetwork};
use crate::netsim::config::Config;

/// # Abilene Network
///
/// This network is taken from [topology-zoo](http://topology-zoo.org/dataset.html), and consists of
/// 11 nodes and 14 bidirectional links (28 directed links). Both directions of a link have the
/// same attributes. All weights are 1, the link costs follow the geographic distance, and most
/// links have a capacity of 10000. The links Sunnyvale - Los Angeles and Houston - Atlanta only
/// have a capacity of 2500.
///
/// ```text
/// Seattle ------------ Denver ----- Kansas City -- Indianapolis -- Chicago
///    |              /                   |              |              |
/// Sunnyvale -------'                    |              |           New York
///    |                                  |              |              |
/// Los Angeles ------------------------ Houston ---- Atlanta --- Washington DC
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AbileneNetwork;

/// `(node, node, link cost, capacity)`
const LINKS: [(&str, &str, f64, f64); 14] = [
    ("Sunnyvale", "Seattle", 11.0, 10000.0),
    ("Sunnyvale", "Denver", 15.0, 10000.0),
    ("Sunnyvale", "Los Angeles", 5.0, 2500.0),
    ("Seattle", "Denver", 16.0, 10000.0),
    ("Denver", "Kansas City", 9.0, 10000.0),
    ("Los Angeles", "Houston", 22.0, 10000.0),
    ("Kansas City", "Houston", 12.0, 10000.0),
    ("Kansas City", "Indianapolis", 8.0, 10000.0),
    ("Houston", "Atlanta", 13.0, 2500.0),
    ("Indianapolis", "Atlanta", 7.0, 10000.0),
    ("Indianapolis", "Chicago", 3.0, 10000.0),
    ("Atlanta", "Washington DC", 9.0, 10000.0),
    ("Chicago", "New York", 11.0, 10000.0),
    ("Washington DC", "New York", 3.0, 10000.0),
];

impl ExampleNetwork for AbileneNetwork {
    fn config() -> Config {
        let mut c = Config::new();
        for (a, b, cost, capacity) in LINKS.iter() {
            configure_link(&mut c, a, b, *cost, 1.0, *capacity);
            configure_link(&mut c, b, a, *cost, 1.0, *capacity);
        }
        c
    }
}
