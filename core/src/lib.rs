//! Baseband QPSK modem core
//!
//! Encodes a bitstream into a real-valued carrier (two bits per symbol, four
//! phase offsets) and recovers it again, discovering the transmitter's symbol
//! length blindly from a fixed preamble.

pub mod error;
pub mod config;
pub mod phase;
pub mod carrier;
pub mod bits;
pub mod modulator;
pub mod sync;
pub mod classifier;
pub mod demodulator;

pub use bits::{render_dibits, BitPairs};
pub use carrier::Carrier;
pub use classifier::SymbolClassifier;
pub use config::ModemConfig;
pub use demodulator::{Demodulation, Demodulator};
pub use error::{ModemError, Result};
pub use modulator::{Modulator, SampleSink};
pub use phase::{Dibit, PHASE_TABLE};
pub use sync::{SyncResult, SyncState, SyncStep, Synchronizer};

// Carrier configuration
pub const SAMPLE_RATE: u32 = 18000; // Hz
pub const CARRIER_FREQUENCY: u32 = 1000; // Hz
pub const AMPLITUDE: u32 = 0x7F00_0000; // full scale for 32-bit PCM

/// Maximum allowed distance between a normalized sample and a reference
/// cosine for the two to count as the same phase.
///
/// Empirical value, kept as-is.
pub const THRESHOLD: f64 = 0.1;

// Symbol configuration
pub const SYMBOL_LEN_MIN: usize = 1; // one sample per symbol
pub const SYMBOL_LEN: usize = 30; // samples per symbol on the transmit side

/// Bit pattern sent ahead of every payload (`00`, `11`, `00`, `11`)
pub const PREAMBLE: &str = "00110011";

/// Number of two-bit symbols in [`PREAMBLE`]
pub const PREAMBLE_SYMBOLS: usize = PREAMBLE.len() / 2;
