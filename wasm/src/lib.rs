use qpskmodem_core::{Demodulator, ModemConfig, Modulator};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmModulator {
    config: ModemConfig,
}

#[wasm_bindgen]
impl WasmModulator {
    #[wasm_bindgen(constructor)]
    pub fn new(symbol_len: usize) -> Result<WasmModulator, JsValue> {
        let config = ModemConfig::default().with_symbol_len(symbol_len);
        config
            .validate()
            .map(|_| WasmModulator { config })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Modulate a string of '0'/'1' characters
    /// Returns an Int32Array of carrier samples (preamble included)
    #[wasm_bindgen]
    pub fn modulate(&self, bits: &str) -> Result<Vec<i32>, JsValue> {
        Modulator::new(&self.config)
            .and_then(|mut modulator| modulator.modulate(bits.as_bytes()))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }
}

#[wasm_bindgen]
pub struct WasmDemodulator {
    inner: Demodulator,
}

#[wasm_bindgen]
impl WasmDemodulator {
    #[wasm_bindgen(constructor)]
    pub fn new(sample_rate: u32) -> Result<WasmDemodulator, JsValue> {
        Demodulator::new(&ModemConfig::default().with_sample_rate(sample_rate))
            .map(|inner| WasmDemodulator { inner })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Demodulate an Int32Array of samples
    /// Returns the bit string terminated by a newline
    #[wasm_bindgen]
    pub fn demodulate(&self, samples: &[i32]) -> Result<String, JsValue> {
        self.inner
            .demodulate_samples(samples)
            .map(|result| result.render())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
