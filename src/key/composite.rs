//! Composite key codec.
//!
//! A composite key packs an ordered list of string components into one
//! sortable byte key:
//!
//! ```text
//! 0x00 | component 0 | 0x00 | component 1 | 0x00 | ... | component n | 0x00
//! ```
//!
//! - The leading `0x00` keeps composite keys apart from plain keys.
//! - Every component is terminated by `0x00`, so `encode([a, b])` is a byte
//!   prefix of `encode([a, b, c])`.
//! - Components must be non-empty and must not contain `U+0000`; no escaping
//!   is applied, such components are rejected instead.

/// Namespace byte in front of every composite key.
pub const NAMESPACE: u8 = 0x00;

/// Terminates each component.
pub const DELIMITER: u8 = 0x00;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("invalid key component: {0}")]
    InvalidComponent(String),

    #[error("malformed composite key: {0}")]
    MalformedKey(String),
}

fn check_component(ix: usize, c: &str) -> Result<(), KeyError> {
    if c.is_empty() {
        return Err(KeyError::InvalidComponent(format!("component {ix} is empty")));
    }
    match c.bytes().position(|b| b == DELIMITER) {
        None => Ok(()),
        Some(pos) => Err(KeyError::InvalidComponent(format!(
            "component {ix} contains U+0000 at byte {pos}"
        ))),
    }
}

fn write_components<S>(components: &[S]) -> Result<Vec<u8>, KeyError>
where
    S: AsRef<str>,
{
    let sz: usize = components.iter().fold(1, |tot, c| {
        let s: &str = c.as_ref();
        tot + s.len() + 1
    });
    let mut key: Vec<u8> = Vec::with_capacity(sz);
    key.push(NAMESPACE);
    components.iter().enumerate().try_fold(key, |mut k, pair| {
        let (ix, c) = pair;
        let s: &str = c.as_ref();
        check_component(ix, s)?;
        k.extend_from_slice(s.as_bytes());
        k.push(DELIMITER);
        Ok(k)
    })
}

/// Encodes the components into a composite key.
pub fn encode<S>(components: &[S]) -> Result<Vec<u8>, KeyError>
where
    S: AsRef<str>,
{
    if components.is_empty() {
        return Err(KeyError::InvalidComponent("no components".into()));
    }
    write_components(components)
}

/// Creates the prefix shared by every key whose leading components equal
/// `components`.
///
/// An empty slice gives the bare namespace prefix which matches every
/// composite key.
pub fn prefix_for<S>(components: &[S]) -> Result<Vec<u8>, KeyError>
where
    S: AsRef<str>,
{
    write_components(components)
}

/// Splits a composite key back into its components.
pub fn decode(key: &[u8]) -> Result<Vec<String>, KeyError> {
    let body: &[u8] = match key.split_first() {
        Some((&NAMESPACE, rest)) => rest,
        Some((b, _)) => {
            return Err(KeyError::MalformedKey(format!(
                "unexpected namespace byte 0x{b:02x}"
            )))
        }
        None => return Err(KeyError::MalformedKey("empty key".into())),
    };
    let parts: &[u8] = match body.split_last() {
        Some((&DELIMITER, parts)) => parts,
        _ => return Err(KeyError::MalformedKey("missing trailing delimiter".into())),
    };
    parts
        .split(|b| *b == DELIMITER)
        .enumerate()
        .map(|pair| {
            let (ix, raw) = pair;
            if raw.is_empty() {
                return Err(KeyError::MalformedKey(format!("component {ix} is empty")));
            }
            String::from_utf8(raw.to_vec()).map_err(|e| {
                KeyError::MalformedKey(format!("component {ix} is not utf-8: {e}"))
            })
        })
        .collect()
}
