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

//! Test the configuration and how it is applied to the network

use crate::netsim::config::*;
use crate::netsim::{ConfigError, LinkAttribute, Network};
use maplit::hashset;
use std::collections::HashSet;

fn link(s: &str, t: &str) -> ConfigExpr {
    ConfigExpr::Link { source: s.to_string(), target: t.to_string() }
}

fn cost(s: &str, t: &str, cost: f64) -> ConfigExpr {
    ConfigExpr::Cost { source: s.to_string(), target: t.to_string(), cost }
}

fn weight(s: &str, t: &str, weight: f64) -> ConfigExpr {
    ConfigExpr::Weight { source: s.to_string(), target: t.to_string(), weight }
}

fn capacity(s: &str, t: &str, capacity: f64) -> ConfigExpr {
    ConfigExpr::Capacity { source: s.to_string(), target: t.to_string(), capacity }
}

#[test]
fn test_add_and_set() {
    let mut c = Config::new();
    assert!(c.is_empty());
    c.add(weight("A", "B", 1.0)).unwrap();
    c.add(cost("A", "B", 1.0)).unwrap();
    assert_eq!(c.add(weight("A", "B", 2.0)), Err(ConfigError::ConfigExprOverload));
    assert_eq!(c.len(), 2);

    assert_eq!(c.set(weight("A", "B", 2.0)), Some(weight("A", "B", 1.0)));
    assert_eq!(c.set(weight("B", "A", 3.0)), None);
    assert_eq!(c.len(), 3);

    let key = ConfigExprKey::Weight { source: "A".to_string(), target: "B".to_string() };
    assert_eq!(c.get(&key), Some(&weight("A", "B", 2.0)));
    // replaced expressions keep their position
    assert_eq!(c.iter().next(), Some(&weight("A", "B", 2.0)));
}

#[test]
fn test_expr_accessors() {
    assert_eq!(link("A", "B").link(), ("A", "B"));
    assert_eq!(link("A", "B").attribute(), None);
    assert_eq!(cost("A", "B", 4.0).attribute(), Some((LinkAttribute::LinkCost, 4.0)));
    assert_eq!(capacity("X", "Y", 7.0).link(), ("X", "Y"));
    let exprs = vec![link("A", "B"), cost("A", "B", 1.0), cost("A", "B", 2.0)];
    let keys: HashSet<ConfigExprKey> = exprs
        .iter()
        .map(|e| e.key())
        .collect();
    assert_eq!(
        keys,
        hashset! {
            ConfigExprKey::Link { source: "A".to_string(), target: "B".to_string() },
            ConfigExprKey::Cost { source: "A".to_string(), target: "B".to_string() },
        }
    );
}

#[test]
fn test_merge_and_equality() {
    let mut a = Config::new();
    a.add(link("A", "B")).unwrap();
    a.add(weight("A", "B", 1.0)).unwrap();

    let mut b = Config::new();
    b.add(weight("A", "B", 5.0)).unwrap();
    b.add(capacity("A", "B", 10.0)).unwrap();

    let replaced = a.merge(b);
    assert_eq!(replaced, vec![weight("A", "B", 1.0)]);

    let mut expected = Config::new();
    expected.add(capacity("A", "B", 10.0)).unwrap();
    expected.add(weight("A", "B", 5.0)).unwrap();
    expected.add(link("A", "B")).unwrap();
    assert_eq!(a, expected);

    expected.set(weight("A", "B", 6.0));
    assert_ne!(a, expected);
}

#[test]
fn test_apply_config() {
    let mut c = Config::new();
    // attributes before the declaration are applied nevertheless
    c.add(cost("A", "B", 3.0)).unwrap();
    c.add(capacity("A", "B", 10.0)).unwrap();
    c.add(link("A", "B")).unwrap();
    c.add(weight("A", "B", 2.0)).unwrap();

    let mut net = Network::new();
    let warnings = net.set_config(&c).unwrap();
    assert!(warnings.is_empty());
    let ab = net.get_link_id("A", "B").unwrap();
    let l = net.get_link(ab).unwrap();
    assert_eq!(l.link_cost(), 3.0);
    assert_eq!(l.weight(), 2.0);
    assert_eq!(l.capacity(), 10.0);
    assert_eq!(l.load(), 0.0);
}

#[test]
fn test_apply_config_warnings() {
    let mut c = Config::new();
    c.add(link("A", "B")).unwrap();
    c.add(cost("A", "B", -1.0)).unwrap();
    c.add(weight("B", "C", 2.0)).unwrap();
    c.add(capacity("A", "B", f64::NAN)).unwrap();
    c.add(capacity("C", "D", 8.0)).unwrap();

    let mut net = Network::new();
    let warnings = net.set_config(&c).unwrap();
    assert_eq!(warnings.len(), 3);
    assert_eq!(
        warnings[0],
        ConfigError::InvalidValue("A".to_string(), "B".to_string(), LinkAttribute::LinkCost, -1.0)
    );
    assert_eq!(warnings[1], ConfigError::UnknownLink("B".to_string(), "C".to_string()));
    assert!(matches!(
        &warnings[2],
        ConfigError::InvalidValue(s, t, LinkAttribute::Capacity, v)
            if s == "A" && t == "B" && v.is_nan()
    ));

    // no link and no node was created for the skipped expressions
    assert_eq!(net.num_links(), 1);
    assert_eq!(net.num_nodes(), 2);
    assert!(net.get_node_id("C").is_err());

    // the capacity of the undeclared link is kept for later
    assert_eq!(net.get_capacity("C", "D"), 8.0);
    let cd = net.add_link("C", "D");
    assert_eq!(net.get_link(cd).unwrap().capacity(), 8.0);
}

#[test]
fn test_apply_config_twice() {
    let mut c = Config::new();
    c.add(link("A", "B")).unwrap();
    c.add(weight("A", "B", 2.0)).unwrap();

    let mut net = Network::new();
    net.set_config(&c).unwrap();
    c.set(weight("A", "B", 4.0));
    net.set_config(&c).unwrap();
    assert_eq!(net.num_links(), 1);
    let ab = net.get_link_id("A", "B").unwrap();
    assert_eq!(net.get_link(ab).unwrap().weight(), 4.0);
}
