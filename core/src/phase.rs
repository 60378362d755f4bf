use std::f64::consts::PI;
use std::fmt;

/// Carrier phase offset per two-bit symbol, indexed by `2*bit1 + bit2`
///
/// 00 -> 45°, 01 -> 315°, 10 -> 135°, 11 -> 225°
pub const PHASE_TABLE: [f64; 4] = [
    1.0 / 4.0 * PI,
    7.0 / 4.0 * PI,
    3.0 / 4.0 * PI,
    5.0 / 4.0 * PI,
];

/// One QPSK symbol (two bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dibit {
    D00,
    D01,
    D10,
    D11,
}

impl Dibit {
    /// All symbols in table order
    pub const ALL: [Dibit; 4] = [Dibit::D00, Dibit::D01, Dibit::D10, Dibit::D11];

    pub fn from_bits(bit1: bool, bit2: bool) -> Self {
        match (bit1, bit2) {
            (false, false) => Dibit::D00,
            (false, true) => Dibit::D01,
            (true, false) => Dibit::D10,
            (true, true) => Dibit::D11,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse two ASCII characters, `None` unless both are `'0'` or `'1'`
    pub fn from_ascii_pair(first: u8, second: u8) -> Option<Self> {
        let bit = |c: u8| match c {
            b'0' => Some(false),
            b'1' => Some(true),
            _ => None,
        };
        Some(Self::from_bits(bit(first)?, bit(second)?))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Phase offset in radians
    pub fn phase(self) -> f64 {
        PHASE_TABLE[self.index()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dibit::D00 => "00",
            Dibit::D01 => "01",
            Dibit::D10 => "10",
            Dibit::D11 => "11",
        }
    }
}

impl fmt::Display for Dibit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
