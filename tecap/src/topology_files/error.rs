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

//! Module that contains the definitions for the error classes

use std::num::ParseFloatError;
use thiserror::Error;

/// Problem with a single record. The record is skipped, and the problem reported as a warning.
/// The line numbers start at 1.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecordError {
    /// The record does not have the expected number of comma-separated fields
    #[error("line {0}: expected {1} comma-separated fields, found {2}")]
    InvalidRecordFormat(usize, usize, usize),
    /// The link key is not of the form `source-target`
    #[error("line {0}: invalid link `{1}`, expected `<source>-<target>`")]
    InvalidLinkFormat(usize, String),
    /// The value cannot be parsed as a number
    #[error("line {0}: invalid number `{1}`: {2}")]
    InvalidNumber(usize, String, ParseFloatError),
    /// The value is negative or not finite
    #[error("line {0}: value must be finite and non-negative, found {1}")]
    InvalidValue(usize, f64),
    /// The same attribute of the same link was already configured. The later value is used.
    #[error("line {0}: link {1}-{2} is configured twice, using the later value")]
    DuplicateRecord(usize, String, String),
}

/// Error while loading record files
#[derive(Debug, Error)]
pub enum TopologyFileError {
    /// The file cannot be read
    #[error("Cannot read {0}: {1}")]
    Io(String, #[source] std::io::Error),
}
