use std::convert::Infallible;
use std::fmt::Display;

use crate::bits::render_dibits;
use crate::carrier::Carrier;
use crate::classifier::SymbolClassifier;
use crate::config::ModemConfig;
use crate::error::{ModemError, Result};
use crate::phase::Dibit;
use crate::sync::Synchronizer;

/// Output of one demodulation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demodulation {
    /// Samples per symbol discovered from the preamble, `None` when the
    /// stream ended before the preamble was complete
    pub symbol_len: Option<usize>,
    /// Payload symbols in order of arrival
    pub symbols: Vec<Dibit>,
}

impl Demodulation {
    /// Bit string followed by a newline
    pub fn render(&self) -> String {
        render_dibits(&self.symbols)
    }
}

/// QPSK demodulator
///
/// Synchronizes on the preamble to learn the symbol length, then decides
/// every following symbol period by majority vote.
#[derive(Default)]
pub struct Demodulator {
    config: ModemConfig,
}

impl Demodulator {
    /// Only the carrier fields of `config` are used, the symbol length
    /// always comes from the received preamble.
    pub fn new(config: &ModemConfig) -> Result<Self> {
        // symbol_len is irrelevant on this side, validate the rest
        config.clone().with_symbol_len(crate::SYMBOL_LEN_MIN).validate()?;
        Ok(Self {
            config: config.clone(),
        })
    }

    /// Demodulate a fallible sample stream
    pub fn demodulate<I, E>(&self, source: I) -> Result<Demodulation>
    where
        I: IntoIterator<Item = std::result::Result<i32, E>>,
        E: Display,
    {
        let carrier = Carrier::from_config(&self.config);
        let mut source = source.into_iter();

        let mut synchronizer = Synchronizer::new(carrier, self.config.threshold);
        let Some(sync) = synchronizer.run(&mut source)? else {
            return Ok(Demodulation {
                symbol_len: None,
                symbols: Vec::new(),
            });
        };
        log::debug!(
            "Synchronized: symbol length {} samples ({:.1} bit/s), payload starts at t={}",
            sync.symbol_len,
            self.config.clone().with_symbol_len(sync.symbol_len).bit_rate(),
            sync.time
        );

        let classifier = SymbolClassifier::new(carrier, self.config.threshold);
        let mut time = sync.time;
        let mut period = Vec::with_capacity(sync.symbol_len);
        let mut symbols = Vec::new();

        for sample in source {
            period.push(sample.map_err(|e| ModemError::Source(e.to_string()))?);
            if period.len() == sync.symbol_len {
                symbols.push(classifier.classify(&period, time));
                time += sync.symbol_len;
                period.clear();
            }
        }

        if !period.is_empty() {
            log::warn!(
                "Discarding {} trailing samples (partial symbol of {})",
                period.len(),
                sync.symbol_len
            );
        }

        Ok(Demodulation {
            symbol_len: Some(sync.symbol_len),
            symbols,
        })
    }

    /// Demodulate an in-memory sample buffer
    pub fn demodulate_samples(&self, samples: &[i32]) -> Result<Demodulation> {
        self.demodulate(samples.iter().map(|&s| Ok::<i32, Infallible>(s)))
    }
}
