//! Common test utilities for integration tests
//!
//! This module provides:
//! - A scripted three-channel ADC that advances a mock timer per cycle
//! - Deterministic noise for realistic at-rest signals
//! - Line inspection helpers for reporter output

#![allow(dead_code)]

use std::collections::VecDeque;

use shockwatch_core::{
    acquisition::Channel,
    report::EVENT_MARKER,
    time::MockTicks,
    traits::ChannelSource,
};

pub mod generators;
pub mod scenarios;

/// Raw counts for one cycle; `None` fails that channel's conversion
pub type RawCycle = [Option<u16>; 3];

/// Replays raw cycles and advances the timer after each complete cycle
///
/// Once the script runs out, the last cycle repeats.
pub struct ScriptedAdc<'a> {
    script: VecDeque<RawCycle>,
    current: RawCycle,
    ticks: &'a MockTicks,
    ticks_per_cycle: u32,
    reads: u64,
}

impl<'a> ScriptedAdc<'a> {
    pub fn new(script: Vec<RawCycle>, ticks: &'a MockTicks, ticks_per_cycle: u32) -> Self {
        let mut script: VecDeque<RawCycle> = script.into();
        let current = script.pop_front().unwrap_or([Some(0); 3]);
        Self {
            script,
            current,
            ticks,
            ticks_per_cycle,
            reads: 0,
        }
    }

    /// Append more cycles to the script
    pub fn extend(&mut self, cycles: impl IntoIterator<Item = RawCycle>) {
        self.script.extend(cycles);
    }

    /// Total conversions requested
    pub fn reads(&self) -> u64 {
        self.reads
    }
}

impl<'a> ChannelSource for ScriptedAdc<'a> {
    type Error = ();

    fn read_channel(&mut self, channel: Channel) -> nb::Result<u16, ()> {
        self.reads += 1;
        let value = self.current[channel.index()];

        if channel == Channel::Z {
            self.ticks.advance(self.ticks_per_cycle);
            if let Some(next) = self.script.pop_front() {
                self.current = next;
            }
        }

        value.ok_or(nb::Error::Other(()))
    }
}

/// Xorshift generator for reproducible noise
pub struct TestRng {
    state: u32,
}

impl TestRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / 16777216.0
    }

    pub fn gen_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

/// Split reporter output into event tables (rows between marker pairs)
pub fn event_tables(lines: &[String]) -> Vec<Vec<(usize, f32, f32)>> {
    let mut tables = Vec::new();
    let mut current: Option<Vec<(usize, f32, f32)>> = None;

    for line in lines {
        if line == EVENT_MARKER {
            match current.take() {
                Some(table) => tables.push(table),
                None => current = Some(Vec::new()),
            }
            continue;
        }
        if let Some(table) = current.as_mut() {
            let mut fields = line.split(',');
            let position = fields.next().and_then(|f| f.parse().ok()).expect("position");
            let magnitude = fields.next().and_then(|f| f.parse().ok()).expect("magnitude");
            let interval = fields.next().and_then(|f| f.parse().ok()).expect("interval");
            table.push((position, magnitude, interval));
        }
    }
    tables
}

/// Lines reporting a failed conversion
pub fn failure_lines(lines: &[String]) -> Vec<&String> {
    lines.iter().filter(|l| l.contains("convert failed")).collect()
}
