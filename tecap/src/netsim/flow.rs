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

//! # Flow Simulation
//!
//! Pushes a volume of data along a fixed path in discrete rounds. In every round, the amount that
//! can be sent is bounded by the bottleneck of the path (the smallest capacity of all its links).

use crate::netsim::event::Event;
use crate::netsim::{LinkId, Network, NetworkError, Path};

use log::*;

/// Volume delivered over a single link in a single round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delivery {
    /// Round index, starting at 0
    pub round: usize,
    /// Link over which the volume was delivered
    pub link: LinkId,
    /// Delivered volume
    pub volume: f64,
}

/// Result of a single round of the flow simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowRound {
    /// Round index, starting at 0
    pub round: usize,
    /// Volume sent over the path in this round
    pub sent: f64,
    /// Volume which still needs to be sent after this round
    pub remaining: f64,
    /// One delivery for every link on the path, in traversal order
    pub deliveries: Vec<Delivery>,
}

/// # Flow Simulation
///
/// Lazy iterator over the rounds of a flow simulation, created by
/// [`Network::simulate_flow`]. Each call to `next` performs one round:
///
/// 1. `sent = min(remaining, bottleneck)`
/// 2. The load of every link on the path is **overwritten** with `sent`. After the simulation, the
///    loads therefore describe the last round.
/// 3. `remaining -= sent`, and one [`Delivery`] per link is reported.
///
/// The iterator ends once the whole volume is sent, after exactly `ceil(volume / bottleneck)`
/// rounds. The last round sends whatever remains, such that no rounding residue is left over. A
/// volume of `0` produces no rounds. Pacing
/// (e.g. waiting between rounds) is left to the caller, which can also stop early by dropping the
/// iterator. In that case, the loads reflect the last completed round.
///
/// The bottleneck is determined once, when the simulation is created. The network is borrowed
/// mutably for the whole simulation, so capacities cannot change in between.
#[derive(Debug)]
pub struct FlowSimulation<'a> {
    net: &'a mut Network,
    links: Vec<LinkId>,
    bottleneck: f64,
    remaining: f64,
    round: usize,
    total_rounds: usize,
}

impl<'a> FlowSimulation<'a> {
    /// Validate the input and prepare the simulation. Fails if the volume is negative or not
    /// finite, if the path references an unknown link, or if the bottleneck is zero while a
    /// positive volume must be sent.
    pub(crate) fn new(
        net: &'a mut Network,
        path: &Path,
        volume: f64,
    ) -> Result<Self, NetworkError> {
        if !volume.is_finite() || volume < 0.0 {
            return Err(NetworkError::InvalidVolume(volume));
        }

        let mut bottleneck: Option<(LinkId, f64)> = None;
        for link in path.links() {
            let capacity = net.get_link(*link).ok_or(NetworkError::LinkNotFound(*link))?.capacity();
            if bottleneck.map(|(_, b)| capacity < b).unwrap_or(true) {
                bottleneck = Some((*link, capacity));
            }
        }
        let (bottleneck_link, bottleneck) = match bottleneck {
            Some(b) => b,
            None => (LinkId::end(), 0.0),
        };

        if volume > 0.0 && bottleneck <= 0.0 {
            warn!("Cannot send {} units: link {:?} has no capacity", volume, bottleneck_link);
            return Err(NetworkError::DegenerateZeroCapacityPath(bottleneck_link));
        }

        let total_rounds = if volume > 0.0 { (volume / bottleneck).ceil() as usize } else { 0 };
        debug!(
            "Simulate a flow of {} units with a bottleneck of {} ({} rounds)",
            volume, bottleneck, total_rounds
        );
        Ok(Self {
            net,
            links: path.links().to_vec(),
            bottleneck,
            remaining: volume,
            round: 0,
            total_rounds,
        })
    }

    /// Bottleneck capacity of the path
    pub fn bottleneck(&self) -> f64 {
        self.bottleneck
    }

    /// Volume that still needs to be sent
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// Number of rounds performed so far
    pub fn rounds_completed(&self) -> usize {
        self.round
    }

    /// Number of rounds needed to send the whole volume
    pub fn total_rounds(&self) -> usize {
        self.total_rounds
    }
}

impl<'a> Iterator for FlowSimulation<'a> {
    type Item = FlowRound;

    fn next(&mut self) -> Option<Self::Item> {
        if self.round >= self.total_rounds {
            return None;
        }

        let round = self.round;
        let last = round + 1 == self.total_rounds;
        let sent = if last { self.remaining } else { self.remaining.min(self.bottleneck) };
        let mut deliveries = Vec::with_capacity(self.links.len());
        for link in self.links.iter() {
            match self.net.set_load(*link, sent) {
                Ok(()) => deliveries.push(Delivery { round, link: *link, volume: sent }),
                // all links were checked when creating the simulation
                Err(e) => error!("Round {}: cannot set the load of {:?}: {}", round, link, e),
            }
        }
        self.remaining = if last { 0.0 } else { (self.remaining - sent).max(0.0) };
        self.round += 1;

        debug!("Round {}: sent {}, remaining {}", round, sent, self.remaining);
        self.net.record_event(Event::FlowRoundCompleted {
            round,
            sent,
            remaining: self.remaining,
        });

        Some(FlowRound { round, sent, remaining: self.remaining, deliveries })
    }
}
