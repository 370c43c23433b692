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

//! Chain of three nodes

use super::{configure_link, ExampleNetwork};
use crate::netsim::config::Config;

/// # Chain Network
///
/// ```text
/// A ---(10)---> B ---(5)---> C
/// ```
///
/// Both links have link cost 1 and weight 1. The capacity of `A -> B` is 10, and the capacity of
/// `B -> C` is 5, such that the bottleneck of the path from `A` to `C` is 5.
#[derive(Debug, Clone, Copy)]
pub struct ChainNet;

impl ExampleNetwork for ChainNet {
    fn config() -> Config {
        let mut c = Config::new();
        configure_link(&mut c, "A", "B", 1.0, 1.0, 10.0);
        configure_link(&mut c, "B", "C", 1.0, 1.0, 5.0);
        c
    }
}
