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

//! Parses the line-oriented record files

use super::RecordError;
use crate::netsim::config::{Config, ConfigExpr};
use crate::netsim::TrafficMatrix;

/// Kind of a record file, which determines the format of its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// `source-target,cost`: declares the link and sets its link cost
    LinkCosts,
    /// `source-target,weight`: sets the weight of an already declared link
    Weights,
    /// `source-target,capacity`: sets the capacity of a link, which does not need to exist
    Capacities,
    /// `source,target,weight`: declares the link and sets its weight
    Topology,
}

/// Parses the content of a record file, and adds the resulting expressions to the configuration.
/// Empty lines are ignored, and all fields are trimmed. Records that cannot be parsed are skipped
/// and returned as warnings. If a record configures something that is already configured, the
/// new value replaces the old one (also reported as a warning). Repeated link declarations are
/// ignored silently.
pub fn parse_records(content: &str, kind: RecordKind, config: &mut Config) -> Vec<RecordError> {
    let mut warnings = Vec::new();
    for (line_nr, line) in records(content) {
        match parse_record(line_nr, line, kind) {
            Ok(exprs) => {
                for expr in exprs {
                    let declaration = matches!(expr, ConfigExpr::Link { .. });
                    match config.set(expr) {
                        Some(old) if !declaration => {
                            let (source, target) = old.link();
                            warnings.push(RecordError::DuplicateRecord(
                                line_nr,
                                source.to_string(),
                                target.to_string(),
                            ));
                        }
                        _ => {}
                    }
                }
            }
            Err(e) => warnings.push(e),
        }
    }
    warnings
}

/// Parses the content of a traffic file with records `source-target,traffic`, and adds them to
/// the traffic matrix. Malformed records are skipped and returned as warnings, and later records
/// replace earlier ones for the same link (also reported as a warning).
pub fn parse_traffic(content: &str, traffic: &mut TrafficMatrix) -> Vec<RecordError> {
    let mut warnings = Vec::new();
    for (line_nr, line) in records(content) {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 2 {
            warnings.push(RecordError::InvalidRecordFormat(line_nr, 2, fields.len()));
            continue;
        }
        let parsed = parse_link(line_nr, fields[0])
            .and_then(|(source, target)| Ok((source, target, parse_value(line_nr, fields[1])?)));
        match parsed {
            Ok((source, target, value)) => {
                if traffic.insert(source.as_str(), target.as_str(), value).is_some() {
                    warnings.push(RecordError::DuplicateRecord(line_nr, source, target));
                }
            }
            Err(e) => warnings.push(e),
        }
    }
    warnings
}

/// Non-empty, trimmed lines together with their line number (starting at 1).
fn records(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn parse_record(
    line_nr: usize,
    line: &str,
    kind: RecordKind,
) -> Result<Vec<ConfigExpr>, RecordError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let expected = if kind == RecordKind::Topology { 3 } else { 2 };
    if fields.len() != expected {
        return Err(RecordError::InvalidRecordFormat(line_nr, expected, fields.len()));
    }

    let (source, target, value) = if kind == RecordKind::Topology {
        if fields[0].is_empty() || fields[1].is_empty() {
            let key = format!("{}-{}", fields[0], fields[1]);
            return Err(RecordError::InvalidLinkFormat(line_nr, key));
        }
        (fields[0].to_string(), fields[1].to_string(), parse_value(line_nr, fields[2])?)
    } else {
        let (source, target) = parse_link(line_nr, fields[0])?;
        (source, target, parse_value(line_nr, fields[1])?)
    };

    let declaration = ConfigExpr::Link { source: source.clone(), target: target.clone() };
    Ok(match kind {
        RecordKind::LinkCosts => {
            vec![declaration, ConfigExpr::Cost { source, target, cost: value }]
        }
        RecordKind::Weights => vec![ConfigExpr::Weight { source, target, weight: value }],
        RecordKind::Capacities => vec![ConfigExpr::Capacity { source, target, capacity: value }],
        RecordKind::Topology => {
            vec![declaration, ConfigExpr::Weight { source, target, weight: value }]
        }
    })
}

/// Parses a link key of the form `source-target`.
fn parse_link(line_nr: usize, key: &str) -> Result<(String, String), RecordError> {
    let parts: Vec<&str> = key.split('-').map(str::trim).collect();
    match parts.as_slice() {
        [source, target] if !source.is_empty() && !target.is_empty() => {
            Ok((source.to_string(), target.to_string()))
        }
        _ => Err(RecordError::InvalidLinkFormat(line_nr, key.to_string())),
    }
}

fn parse_value(line_nr: usize, field: &str) -> Result<f64, RecordError> {
    let value: f64 =
        field.parse().map_err(|e| RecordError::InvalidNumber(line_nr, field.to_string(), e))?;
    if !value.is_finite() || value < 0.0 {
        return Err(RecordError::InvalidValue(line_nr, value));
    }
    Ok(value)
}
