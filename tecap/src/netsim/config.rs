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

//! # Network Configuration
//! This module represents the network configuration.
//!
//! - [`Config`]: Network-wide configuration. The datastructure is a collection of several
//!   [`ConfigExpr`], kept in the order in which they were added.
//! - [`ConfigExpr`]: Single configuration expression: the declaration of a link, or the value of
//!   one link attribute.
//! - [`ConfigExprKey`]: Identifies what a [`ConfigExpr`] configures, independent of its value.
//!
//! Links are referenced by the names of their endpoints, so that a configuration can be built
//! before (or without) the network, e.g. by reading record files.
//!
//! # Example Usage
//!
//! ```rust
//! use tecap::netsim::config::{Config, ConfigExpr::*};
//! use tecap::netsim::ConfigError;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let mut c = Config::new();
//!
//!     c.add(Link { source: "A".into(), target: "B".into() })?;
//!     c.add(Weight { source: "A".into(), target: "B".into(), weight: 3.0 })?;
//!
//!     // the same attribute cannot be configured twice
//!     let result = c.add(Weight { source: "A".into(), target: "B".into(), weight: 4.0 });
//!     assert_eq!(result, Err(ConfigError::ConfigExprOverload));
//!
//!     // but it can be overwritten explicitly
//!     c.set(Weight { source: "A".into(), target: "B".into(), weight: 4.0 });
//!     assert_eq!(c.len(), 2);
//!
//!     Ok(())
//! }
//! ```

use crate::netsim::{ConfigError, LinkAttribute, LinkWeight};

use std::collections::HashMap;

/// # Network Configuration
/// This struct represents the configuration of a network. It is made up of several [`ConfigExpr`],
/// which are unique by their [`ConfigExprKey`]. This means, that a config cannot have an expression
/// setting the weight of a link to 1, and another one setting the same weight to 2.
///
/// The expressions are stored in the order in which they were first added. This order is
/// preserved when iterating, such that applying a configuration is reproducible.
#[derive(Debug, Clone)]
pub struct Config {
    expr: Vec<ConfigExpr>,
    index: HashMap<ConfigExprKey, usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self { expr: Vec::new(), index: HashMap::new() }
    }

    /// Add a single configuration expression. This fails if a similar expression already exists.
    pub fn add(&mut self, expr: ConfigExpr) -> Result<(), ConfigError> {
        let key = expr.key();
        if self.index.contains_key(&key) {
            return Err(ConfigError::ConfigExprOverload);
        }
        self.index.insert(key, self.expr.len());
        self.expr.push(expr);
        Ok(())
    }

    /// Add or replace a configuration expression. If an expression with the same key already
    /// exists, it is replaced (keeping its position), and the old expression is returned.
    pub fn set(&mut self, expr: ConfigExpr) -> Option<ConfigExpr> {
        match self.index.get(&expr.key()) {
            Some(idx) => Some(std::mem::replace(&mut self.expr[*idx], expr)),
            None => {
                self.index.insert(expr.key(), self.expr.len());
                self.expr.push(expr);
                None
            }
        }
    }

    /// Returns the expression with the given key.
    pub fn get(&self, key: &ConfigExprKey) -> Option<&ConfigExpr> {
        self.index.get(key).map(|idx| &self.expr[*idx])
    }

    /// Returns an iterator over all expressions, in the order they were added.
    pub fn iter(&self) -> std::slice::Iter<'_, ConfigExpr> {
        self.expr.iter()
    }

    /// Returns the number of expressions
    pub fn len(&self) -> usize {
        self.expr.len()
    }

    /// Returns true if the configuration contains no expression
    pub fn is_empty(&self) -> bool {
        self.expr.is_empty()
    }

    /// Merge another configuration into this one. Expressions of `other` replace expressions in
    /// `self` with the same key. The replaced expressions are returned.
    pub fn merge(&mut self, other: Config) -> Vec<ConfigExpr> {
        other.expr.into_iter().filter_map(|e| self.set(e)).collect()
    }
}

impl PartialEq for Config {
    /// Two configurations are equal if they contain the same expressions, independent of order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|e| other.get(&e.key()) == Some(e))
    }
}

impl<'a> IntoIterator for &'a Config {
    type Item = &'a ConfigExpr;
    type IntoIter = std::slice::Iter<'a, ConfigExpr>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// # Single configuration expression
/// All links are referenced by the names of their (directed) endpoints.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigExpr {
    /// Declares a directed link. Nodes are created if they do not exist.
    Link {
        /// Source node of the link
        source: String,
        /// Target node of the link
        target: String,
    },
    /// Sets the static link cost of a declared link.
    Cost {
        /// Source node of the link
        source: String,
        /// Target node of the link
        target: String,
        /// Link cost
        cost: LinkWeight,
    },
    /// Sets the routing weight of a declared link.
    Weight {
        /// Source node of the link
        source: String,
        /// Target node of the link
        target: String,
        /// Routing weight
        weight: LinkWeight,
    },
    /// Sets the capacity of a link. The link does not need to exist.
    Capacity {
        /// Source node of the link
        source: String,
        /// Target node of the link
        target: String,
        /// Capacity
        capacity: f64,
    },
}

impl ConfigExpr {
    /// Returns the key of the config expression. The idea behind the key is that the `ConfigExpr`
    /// cannot be hashed and used as a key for a `HashMap`. But `ConfigExprKey` implements `Hash`,
    /// and can therefore be used as a key.
    pub fn key(&self) -> ConfigExprKey {
        let (source, target) = self.link();
        let (source, target) = (source.to_string(), target.to_string());
        match self {
            ConfigExpr::Link { .. } => ConfigExprKey::Link { source, target },
            ConfigExpr::Cost { .. } => ConfigExprKey::Cost { source, target },
            ConfigExpr::Weight { .. } => ConfigExprKey::Weight { source, target },
            ConfigExpr::Capacity { .. } => ConfigExprKey::Capacity { source, target },
        }
    }

    /// Returns the names of the source and target node of the configured link.
    pub fn link(&self) -> (&str, &str) {
        match self {
            ConfigExpr::Link { source, target }
            | ConfigExpr::Cost { source, target, .. }
            | ConfigExpr::Weight { source, target, .. }
            | ConfigExpr::Capacity { source, target, .. } => (source.as_str(), target.as_str()),
        }
    }

    /// Returns the configured attribute and its value, or `None` for link declarations.
    pub fn attribute(&self) -> Option<(LinkAttribute, f64)> {
        match self {
            ConfigExpr::Link { .. } => None,
            ConfigExpr::Cost { cost, .. } => Some((LinkAttribute::LinkCost, *cost)),
            ConfigExpr::Weight { weight, .. } => Some((LinkAttribute::Weight, *weight)),
            ConfigExpr::Capacity { capacity, .. } => Some((LinkAttribute::Capacity, *capacity)),
        }
    }
}

/// # Key for Config Expressions
/// Data structure capturing the config expression (without the value), such that a set of
/// expressions can be stored in a `HashMap`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigExprKey {
    /// Declaration of a link
    Link {
        /// Source node of the link
        source: String,
        /// Target node of the link
        target: String,
    },
    /// Link cost of a link
    Cost {
        /// Source node of the link
        source: String,
        /// Target node of the link
        target: String,
    },
    /// Routing weight of a link
    Weight {
        /// Source node of the link
        source: String,
        /// Target node of the link
        target: String,
    },
    /// Capacity of a link
    Capacity {
        /// Source node of the link
        source: String,
        /// Target node of the link
        target: String,
    },
}
