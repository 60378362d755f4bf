use std::fmt::Display;

use crate::carrier::Carrier;
use crate::config::ModemConfig;
use crate::error::{ModemError, Result};
use crate::phase::Dibit;

/// Synchronizer states
///
/// The preamble is `00 11 00 11`, each symbol lasting an unknown number of
/// samples. The first `00` plateau reports its own length, the three
/// remaining plateaus are then checked against that length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Nothing seen yet, first sample must be `00`
    Init,
    /// Counting the first `00` run
    FirstZeros,
    /// Symbol length known, draining the first `11` run
    FirstOnes,
    SecondZeros,
    SecondOnes,
    /// Whole preamble consumed
    Synced,
    /// A sample did not fit, the run is over
    Rejected,
}

/// Outcome of feeding one sample to the [`Synchronizer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    /// Sample consumed, preamble not finished yet
    Continue,
    /// Last preamble sample consumed; `time` is the first payload time index
    Done { symbol_len: usize, time: usize },
    /// Sample at `time` did not match what `state` expected
    Failed { state: SyncState, time: usize },
}

/// Result of a successful synchronization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncResult {
    /// Samples per symbol used by the transmitter
    pub symbol_len: usize,
    /// Time index of the first sample after the preamble
    pub time: usize,
}

/// Preamble tracker that discovers the transmitter's symbol length
///
/// One instance serves exactly one demodulation run.
pub struct Synchronizer {
    carrier: Carrier,
    threshold: f64,
    state: SyncState,
    symbol_len: usize,
    remaining: usize,
    time: usize,
    failure: Option<(SyncState, usize)>,
}

impl Synchronizer {
    pub fn new(carrier: Carrier, threshold: f64) -> Self {
        Self {
            carrier,
            threshold,
            state: SyncState::Init,
            symbol_len: 0,
            remaining: 0,
            time: 0,
            failure: None,
        }
    }

    pub fn from_config(config: &ModemConfig) -> Self {
        Self::new(Carrier::from_config(config), config.threshold)
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Time index of the next sample to be consumed
    pub fn time(&self) -> usize {
        self.time
    }

    fn matches(&self, dibit: Dibit, sample: i32) -> bool {
        self.carrier.matches(self.time, dibit, sample, self.threshold)
    }

    fn enter(&mut self, state: SyncState) {
        log::trace!("sync: {:?} -> {:?} at t={}", self.state, state, self.time);
        self.state = state;
    }

    fn reject(&mut self) -> SyncStep {
        let (state, time) = (self.state, self.time);
        log::debug!("sync: sample at t={} rejected in state {:?}", time, state);
        self.failure = Some((state, time));
        self.state = SyncState::Rejected;
        SyncStep::Failed { state, time }
    }

    /// Feed the next sample
    ///
    /// A state whose run is exhausted hands the same sample on to the
    /// following state, so every call consumes exactly one sample.
    pub fn step(&mut self, sample: i32) -> SyncStep {
        loop {
            match self.state {
                SyncState::Init => {
                    if !self.matches(Dibit::D00, sample) {
                        return self.reject();
                    }
                    self.symbol_len += 1;
                    self.enter(SyncState::FirstZeros);
                    break;
                }
                SyncState::FirstZeros => {
                    if self.matches(Dibit::D00, sample) {
                        self.symbol_len += 1;
                    } else if self.matches(Dibit::D11, sample) {
                        self.remaining = self.symbol_len - 1;
                        self.enter(SyncState::FirstOnes);
                    } else {
                        return self.reject();
                    }
                    break;
                }
                SyncState::FirstOnes => {
                    if self.remaining == 0 {
                        self.remaining = self.symbol_len;
                        self.enter(SyncState::SecondZeros);
                        continue;
                    }
                    if !self.matches(Dibit::D11, sample) {
                        return self.reject();
                    }
                    self.remaining -= 1;
                    break;
                }
                SyncState::SecondZeros => {
                    if self.remaining == 0 {
                        self.remaining = self.symbol_len;
                        self.enter(SyncState::SecondOnes);
                        continue;
                    }
                    if !self.matches(Dibit::D00, sample) {
                        return self.reject();
                    }
                    self.remaining -= 1;
                    break;
                }
                SyncState::SecondOnes => {
                    if !self.matches(Dibit::D11, sample) {
                        return self.reject();
                    }
                    self.remaining -= 1;
                    if self.remaining == 0 {
                        self.enter(SyncState::Synced);
                        self.time += 1;
                        return SyncStep::Done {
                            symbol_len: self.symbol_len,
                            time: self.time,
                        };
                    }
                    break;
                }
                SyncState::Synced => {
                    return SyncStep::Done {
                        symbol_len: self.symbol_len,
                        time: self.time,
                    };
                }
                SyncState::Rejected => {
                    let (state, time) = self.failure.unwrap_or((SyncState::Rejected, self.time));
                    return SyncStep::Failed { state, time };
                }
            }
        }

        self.time += 1;
        SyncStep::Continue
    }

    /// Pull samples from `source` until the preamble is fully consumed
    ///
    /// Samples after the preamble stay in `source`. Returns `None` when the
    /// source runs dry before the preamble is complete, which is not an error.
    pub fn run<I, E>(&mut self, source: &mut I) -> Result<Option<SyncResult>>
    where
        I: Iterator<Item = std::result::Result<i32, E>>,
        E: Display,
    {
        for sample in source {
            let sample = sample.map_err(|e| ModemError::Source(e.to_string()))?;
            match self.step(sample) {
                SyncStep::Continue => {}
                SyncStep::Done { symbol_len, time } => {
                    return Ok(Some(SyncResult { symbol_len, time }));
                }
                SyncStep::Failed { state, time } => {
                    return Err(ModemError::PreambleMismatch { state, time });
                }
            }
        }

        log::warn!(
            "Sample stream ended after {} samples, inside the synchronization sequence ({:?})",
            self.time,
            self.state
        );
        Ok(None)
    }
}
