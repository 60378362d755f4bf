use crate::bits::BitPairs;
use crate::carrier::Carrier;
use crate::config::ModemConfig;
use crate::error::Result;
use crate::phase::Dibit;
use crate::PREAMBLE;

/// Destination for generated samples
pub trait SampleSink {
    fn write_sample(&mut self, sample: i32) -> Result<()>;
}

impl SampleSink for Vec<i32> {
    fn write_sample(&mut self, sample: i32) -> Result<()> {
        self.push(sample);
        Ok(())
    }
}

/// QPSK modulator
///
/// Emits the preamble followed by one symbol per input bit pair. The
/// discrete time index runs continuously across both regions.
pub struct Modulator {
    carrier: Carrier,
    symbol_len: usize,
    time: usize,
}

impl Modulator {
    pub fn new(config: &ModemConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            carrier: Carrier::from_config(config),
            symbol_len: config.symbol_len,
            time: 0,
        })
    }

    /// Time index of the next sample to be generated
    pub fn time(&self) -> usize {
        self.time
    }

    /// Write `symbol_len` samples of `dibit` and advance the clock
    pub fn modulate_symbol<S>(&mut self, dibit: Dibit, sink: &mut S) -> Result<()>
    where
        S: SampleSink + ?Sized,
    {
        for _ in 0..self.symbol_len {
            sink.write_sample(self.carrier.sample(self.time, dibit))?;
            self.time += 1;
        }
        Ok(())
    }

    pub fn modulate_preamble<S>(&mut self, sink: &mut S) -> Result<()>
    where
        S: SampleSink + ?Sized,
    {
        for dibit in BitPairs::new(PREAMBLE.as_bytes()) {
            self.modulate_symbol(dibit, sink)?;
        }
        Ok(())
    }

    /// Modulate preamble + payload into `sink`, restarting the clock at zero
    /// Returns the number of payload symbols written
    pub fn modulate_into<S>(&mut self, bits: &[u8], sink: &mut S) -> Result<usize>
    where
        S: SampleSink + ?Sized,
    {
        self.time = 0;
        self.modulate_preamble(sink)?;

        let mut pairs = BitPairs::new(bits);
        let mut symbols = 0;
        for dibit in pairs.by_ref() {
            self.modulate_symbol(dibit, sink)?;
            symbols += 1;
        }

        if pairs.consumed() < bits.len() {
            log::debug!(
                "Bit input ended after {} of {} characters",
                pairs.consumed(),
                bits.len()
            );
        }

        Ok(symbols)
    }

    /// Modulate preamble + payload into an in-memory buffer
    pub fn modulate(&mut self, bits: &[u8]) -> Result<Vec<i32>> {
        let mut samples = Vec::new();
        self.modulate_into(bits, &mut samples)?;
        Ok(samples)
    }
}
