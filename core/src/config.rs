use crate::error::{ModemError, Result};
use crate::{AMPLITUDE, CARRIER_FREQUENCY, SAMPLE_RATE, SYMBOL_LEN, SYMBOL_LEN_MIN, THRESHOLD};

/// Numeric parameters shared by the modulator and the demodulator
#[derive(Debug, Clone, PartialEq)]
pub struct ModemConfig {
    /// Samples per second
    pub sample_rate: u32,
    /// Carrier frequency in Hz
    pub frequency: u32,
    /// Full-scale sample amplitude
    pub amplitude: u32,
    /// Correlation tolerance on normalized samples
    pub threshold: f64,
    /// Samples per symbol (transmit side only, the receiver discovers it)
    pub symbol_len: usize,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            frequency: CARRIER_FREQUENCY,
            amplitude: AMPLITUDE,
            threshold: THRESHOLD,
            symbol_len: SYMBOL_LEN,
        }
    }
}

impl ModemConfig {
    pub fn with_symbol_len(mut self, symbol_len: usize) -> Self {
        self.symbol_len = symbol_len;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Carrier frequency in cycles per sample
    pub fn norm_freq(&self) -> f64 {
        self.frequency as f64 / self.sample_rate as f64
    }

    /// Longest symbol the transmitter may use: two carrier periods
    pub fn max_symbol_len(&self) -> usize {
        if self.frequency == 0 {
            return 0;
        }
        (self.sample_rate / self.frequency) as usize * 2
    }

    /// Payload bit rate for the configured symbol length
    pub fn bit_rate(&self) -> f64 {
        self.sample_rate as f64 / self.symbol_len as f64 * 2.0
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(ModemError::InvalidConfig("sample rate must be positive".into()));
        }
        if self.frequency == 0 || self.frequency >= self.sample_rate {
            return Err(ModemError::InvalidConfig(format!(
                "carrier frequency {} Hz must lie in (0, {}) Hz",
                self.frequency, self.sample_rate
            )));
        }
        if self.amplitude == 0 || self.amplitude > i32::MAX as u32 {
            return Err(ModemError::InvalidConfig(format!(
                "amplitude {:#x} does not fit a signed 32-bit sample",
                self.amplitude
            )));
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ModemError::InvalidConfig(format!(
                "threshold {} must be a positive number",
                self.threshold
            )));
        }
        let max = self.max_symbol_len();
        if self.symbol_len < SYMBOL_LEN_MIN || self.symbol_len > max {
            return Err(ModemError::InvalidConfig(format!(
                "symbol length {} outside [{}, {}]",
                self.symbol_len, SYMBOL_LEN_MIN, max
            )));
        }
        Ok(())
    }
}
