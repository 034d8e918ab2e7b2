//! Key ranges used by prefix scans

use core::ops::Bound;

/// Computes the smallest byte string greater than every string starting with `data`.
///
/// - `[0x61]` -> `Some([0x62])`
/// - `[0x61, 0xff]` -> `Some([0x62])`
/// - `[0xff]` -> `None` (no upper bound)
pub fn lex_increment(data: &[u8]) -> Option<Vec<u8>> {
    let mut v: Vec<u8> = data.to_vec();
    while let Some(last) = v.last_mut() {
        if *last < 0xff {
            *last += 1;
            return Some(v);
        }
        v.pop();
    }
    None
}

/// Half open range of keys: `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    pub start: Vec<u8>,

    /// `None` means unbounded.
    pub end: Option<Vec<u8>>,
}

impl KeyRange {
    /// All keys which start with `prefix`.
    pub fn prefix(prefix: Vec<u8>) -> Self {
        let end: Option<Vec<u8>> = lex_increment(&prefix);
        Self { start: prefix, end }
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        let lower: bool = self.start.as_slice() <= key;
        let upper: bool = self
            .end
            .as_ref()
            .map(|e| key < e.as_slice())
            .unwrap_or(true);
        lower && upper
    }

    /// Bounds which skip every key up to (and including) `after`.
    pub fn bounds_after(&self, after: Option<&[u8]>) -> (Bound<Vec<u8>>, Bound<Vec<u8>>) {
        let lower = match after {
            None => Bound::Included(self.start.clone()),
            Some(k) => Bound::Excluded(k.to_vec()),
        };
        let upper = match &self.end {
            None => Bound::Unbounded,
            Some(e) => Bound::Excluded(e.clone()),
        };
        (lower, upper)
    }
}
