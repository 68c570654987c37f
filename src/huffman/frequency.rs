use std::io::{self, BufRead, BufReader, Read};

use crate::collections::AssociativeMap;

/// Byte counts for one input stream.
#[derive(Debug, Default)]
pub struct FrequencyTable {
    counts: AssociativeMap<u8, u64>,
    total: usize,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `input` to the end, counting every byte.
    pub fn count(input: impl Read) -> io::Result<Self> {
        let mut input = BufReader::new(input);
        let mut table = Self::new();

        loop {
            let buf = match input.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buf.is_empty() {
                break;
            }

            for &symbol in buf {
                table.record(symbol);
            }
            let n = buf.len();
            input.consume(n);
        }

        Ok(table)
    }

    pub fn record(&mut self, symbol: u8) {
        match self.counts.get_mut(&symbol) {
            Some(count) => *count += 1,
            None => {
                self.counts.put(symbol, 1);
            }
        }
        self.total += 1;
    }

    /// How often `symbol` occurred; zero if never.
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of symbols read, counting repeats.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Split into parallel arrays: weights ascending, symbols to match.
    ///
    /// Symbols sharing a weight keep the map's iteration order, so the result
    /// is not canonical across runs.
    pub fn into_sorted(self) -> (Vec<u64>, Vec<u8>) {
        let mut pairs: Vec<(u64, u8)> = self
            .counts
            .entries()
            .map(|(&symbol, &count)| (count, symbol))
            .collect();

        // Must be stable.
        pairs.sort_by_key(|&(count, _)| count);

        pairs.into_iter().unzip()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    /// Yields one byte, then fails.
    struct Broken(bool);

    impl Read for Broken {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
            }
            self.0 = true;
            buf[0] = b'z';
            Ok(1)
        }
    }

    #[test]
    fn counts_bytes() -> anyhow::Result<()> {
        let table = FrequencyTable::count(Cursor::new("abracadabra"))?;
        assert_eq!(table.total(), 11);
        assert_eq!(table.len(), 5);
        assert_eq!(table.get(b'a'), 5);
        assert_eq!(table.get(b'b'), 2);
        assert_eq!(table.get(b'r'), 2);
        assert_eq!(table.get(b'c'), 1);
        assert_eq!(table.get(b'd'), 1);
        assert_eq!(table.get(b'x'), 0);
        Ok(())
    }

    #[test]
    fn empty_stream() -> anyhow::Result<()> {
        let table = FrequencyTable::count(io::empty())?;
        assert_eq!(table.total(), 0);
        assert!(table.is_empty());
        assert_eq!(table.into_sorted(), (vec![], vec![]));
        Ok(())
    }

    #[test]
    fn read_errors_propagate() {
        let err = FrequencyTable::count(Broken(false)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn sorted_arrays_line_up() -> anyhow::Result<()> {
        let input = "aaaaaaaaaaaaaaaabbbbbbbbccccdde";
        let table = FrequencyTable::count(input.as_bytes())?;
        let (weights, symbols) = table.into_sorted();

        assert_eq!(weights, vec![1, 2, 4, 8, 16]);
        assert_eq!(symbols, b"edcba".to_vec());
        Ok(())
    }

    #[test]
    fn equal_weights_keep_every_symbol() -> anyhow::Result<()> {
        let table = FrequencyTable::count("xyzzyx".as_bytes())?;
        let (weights, mut symbols) = table.into_sorted();

        assert_eq!(weights, vec![2, 2, 2]);
        symbols.sort();
        assert_eq!(symbols, b"xyz".to_vec());
        Ok(())
    }
}
