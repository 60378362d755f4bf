use crate::phase::Dibit;

/// Iterator over the symbols of an ASCII bit string
///
/// Consumes two characters per symbol. Iteration ends quietly at the first
/// character that is not `'0'` or `'1'`, or when a single bit is left over.
pub struct BitPairs<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitPairs<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Number of input characters turned into symbols so far
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl Iterator for BitPairs<'_> {
    type Item = Dibit;

    fn next(&mut self) -> Option<Dibit> {
        let pair = self.bytes.get(self.pos..self.pos + 2)?;
        let dibit = Dibit::from_ascii_pair(pair[0], pair[1])?;
        self.pos += 2;
        Some(dibit)
    }
}

/// Text form of demodulated symbols, terminated by one newline
pub fn render_dibits(symbols: &[Dibit]) -> String {
    let mut out = String::with_capacity(symbols.len() * 2 + 1);
    for dibit in symbols {
        out.push_str(dibit.as_str());
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs() {
        let symbols: Vec<Dibit> = BitPairs::new(b"00011011").collect();
        assert_eq!(symbols, vec![Dibit::D00, Dibit::D01, Dibit::D10, Dibit::D11]);
    }

    #[test]
    fn test_odd_bit_dropped() {
        let mut pairs = BitPairs::new(b"10110");
        assert_eq!(pairs.next(), Some(Dibit::D10));
        assert_eq!(pairs.next(), Some(Dibit::D11));
        assert_eq!(pairs.next(), None);
        assert_eq!(pairs.consumed(), 4);
    }

    #[test]
    fn test_stops_at_foreign_character() {
        let symbols: Vec<Dibit> = BitPairs::new(b"0110\n11").collect();
        assert_eq!(symbols, vec![Dibit::D01, Dibit::D10]);

        // A bad character in the second half of a pair ends the stream too
        let symbols: Vec<Dibit> = BitPairs::new(b"111x00").collect();
        assert_eq!(symbols, vec![Dibit::D11]);
    }

    #[test]
    fn test_stays_exhausted() {
        let mut pairs = BitPairs::new(b"0a11");
        assert_eq!(pairs.next(), None);
        assert_eq!(pairs.next(), None);
    }

    #[test]
    fn test_render() {
        assert_eq!(render_dibits(&[]), "\n");
        assert_eq!(render_dibits(&[Dibit::D11, Dibit::D00]), "1100\n");
    }
}
