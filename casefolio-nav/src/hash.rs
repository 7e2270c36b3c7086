//! The address-bar hash as a small ordered key-value set.
//!
//! `#cs=curb-appeal&ref=home` holds two parameters. Writing one key leaves
//! every other key, and the order they appear in, untouched.

use std::fmt;

use url::form_urlencoded;

/// Hash key holding the slug of the open overlay.
pub const OVERLAY_PARAM: &str = "cs";

/// One `&`-separated piece of the hash. `raw` is written back verbatim;
/// `key` is `None` for pieces with no usable key (`&&`, `=x`).
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    raw: String,
    key: Option<String>,
    value: String,
}

impl Segment {
    fn parse(raw: &str) -> Self {
        let decoded = form_urlencoded::parse(raw.as_bytes()).next();
        let (key, value) = match decoded {
            Some((k, v)) if !k.is_empty() => (Some(k.into_owned()), v.into_owned()),
            _ => (None, String::new()),
        };
        Self {
            raw: raw.to_string(),
            key,
            value,
        }
    }

    fn encoded(key: &str, value: &str) -> Self {
        let raw = form_urlencoded::Serializer::new(String::new())
            .append_pair(key, value)
            .finish();
        Self {
            raw,
            key: Some(key.to_string()),
            value: value.to_string(),
        }
    }

    fn is(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }
}

/// Parsed hash parameters, in their original order.
///
/// Only segments written through [`HashParams::set`] are re-encoded; every
/// other segment keeps its exact text, so `#intro&q=a%20b` survives a round
/// trip byte for byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashParams {
    segments: Vec<Segment>,
}

impl HashParams {
    /// Parse a hash, with or without the leading `#`.
    pub fn parse(hash: &str) -> Self {
        let raw = hash.strip_prefix('#').unwrap_or(hash);
        if raw.is_empty() {
            return Self::default();
        }
        Self {
            segments: raw.split('&').map(Segment::parse).collect(),
        }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.segments
            .iter()
            .find(|s| s.is(key))
            .map(|s| s.value.as_str())
    }

    /// Set `key`, replacing its first occurrence in place and dropping any
    /// duplicates, or appending it when absent.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.segments.iter().position(|s| s.is(key)) {
            Some(i) => {
                self.segments[i] = Segment::encoded(key, value);
                let mut seen = false;
                self.segments.retain(|s| {
                    if !s.is(key) {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => self.segments.push(Segment::encoded(key, value)),
        }
    }

    /// Remove every occurrence of `key`. Returns whether anything was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.segments.len();
        self.segments.retain(|s| !s.is(key));
        self.segments.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of keyed parameters.
    pub fn len(&self) -> usize {
        self.keys().count()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| s.key.as_deref())
    }

    /// The hash to write into the address bar: empty, or `#` plus the
    /// parameters.
    pub fn to_hash(&self) -> String {
        if self.segments.is_empty() {
            String::new()
        } else {
            format!("#{self}")
        }
    }
}

impl fmt::Display for HashParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            f.write_str(&segment.raw)?;
        }
        Ok(())
    }
}
