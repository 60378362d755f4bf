use std::f64::consts::PI;

use crate::config::ModemConfig;
use crate::phase::Dibit;

/// Reference carrier shared by both directions
///
/// Every cosine argument is built here so the transmitter and the receiver
/// evaluate exactly the same expression for a given time index and symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Carrier {
    norm_freq: f64,
    amplitude: f64,
}

impl Carrier {
    /// norm_freq: carrier frequency in cycles per sample
    pub fn new(norm_freq: f64, amplitude: u32) -> Self {
        Self {
            norm_freq,
            amplitude: amplitude as f64,
        }
    }

    pub fn from_config(config: &ModemConfig) -> Self {
        Self::new(config.norm_freq(), config.amplitude)
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Unit-amplitude carrier value at discrete time `time`
    pub fn reference(&self, time: usize, dibit: Dibit) -> f64 {
        (2.0 * PI * self.norm_freq * time as f64 + dibit.phase()).cos()
    }

    /// Quantized transmit sample
    pub fn sample(&self, time: usize, dibit: Dibit) -> i32 {
        // |amplitude| <= i32::MAX, so the rounded value always fits
        (self.amplitude * self.reference(time, dibit)).round() as i32
    }

    pub fn normalize(&self, sample: i32) -> f64 {
        sample as f64 / self.amplitude
    }

    /// Whether `sample` lies within `threshold` of the reference for `dibit`
    pub fn matches(&self, time: usize, dibit: Dibit, sample: i32, threshold: f64) -> bool {
        (self.reference(time, dibit) - self.normalize(sample)).abs() < threshold
    }
}
