//! Address-bar port and the navigation adapter built on top of it.
//!
//! All hash reads and writes go through [`Navigator`]; nothing else in the
//! crate touches hash encoding.

use std::cell::RefCell;
use std::rc::Rc;

use crate::hash::HashParams;

// ── Port ────────────────────────────────────────────────────────────────────

/// Current address-bar contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    /// Query string including the leading `?`, or empty.
    pub query: String,
    /// Hash including the leading `#`, or empty.
    pub hash: String,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        let hash = hash.into();
        self.hash = if hash.is_empty() || hash.starts_with('#') {
            hash
        } else {
            format!("#{hash}")
        };
        self
    }

    /// Path plus query, the part a page view is reported for.
    pub fn page_path(&self) -> String {
        format!("{}{}", self.path, self.query)
    }

    /// Split an address like `/case-studies/x?a=1#cs=y`.
    pub fn parse(address: &str) -> Self {
        let (rest, hash) = match address.find('#') {
            Some(i) => (&address[..i], &address[i..]),
            None => (address, ""),
        };
        let (path, query) = match rest.find('?') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };
        let path = if path.is_empty() { "/" } else { path };
        Self {
            path: path.to_string(),
            query: query.to_string(),
            hash: hash.to_string(),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.path, self.query, self.hash)
    }
}

/// How a write lands in session history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// New entry; back returns to the previous location.
    Push,
    /// Overwrite the current entry.
    Replace,
}

/// The browser's address bar and session history.
pub trait AddressBar {
    fn location(&self) -> Location;
    fn write(&mut self, location: Location, mode: HistoryMode);
}

// ── In-memory implementation ───────────────────────────────────────────────

#[derive(Debug)]
struct History {
    entries: Vec<Location>,
    index: usize,
}

/// Address bar backed by an in-memory history stack.
///
/// Clones share the same history, so a test (or a replay driver) can keep a
/// handle and press "back" while the machine owns another.
#[derive(Debug, Clone)]
pub struct MemoryAddressBar {
    history: Rc<RefCell<History>>,
}

impl MemoryAddressBar {
    pub fn new(initial: Location) -> Self {
        Self {
            history: Rc::new(RefCell::new(History {
                entries: vec![initial],
                index: 0,
            })),
        }
    }

    pub fn at(address: &str) -> Self {
        Self::new(Location::parse(address))
    }

    /// Step back one entry. Returns false at the start of history.
    pub fn back(&self) -> bool {
        let mut h = self.history.borrow_mut();
        if h.index == 0 {
            return false;
        }
        h.index -= 1;
        true
    }

    /// Step forward one entry. Returns false at the end of history.
    pub fn forward(&self) -> bool {
        let mut h = self.history.borrow_mut();
        if h.index + 1 >= h.entries.len() {
            return false;
        }
        h.index += 1;
        true
    }

    /// Simulate the user editing the address bar directly.
    pub fn type_address(&self, address: &str) {
        let mut bar = self.clone();
        bar.write(Location::parse(address), HistoryMode::Push);
    }

    pub fn history_len(&self) -> usize {
        self.history.borrow().entries.len()
    }
}

impl Default for MemoryAddressBar {
    fn default() -> Self {
        Self::new(Location::new("/"))
    }
}

impl AddressBar for MemoryAddressBar {
    fn location(&self) -> Location {
        let h = self.history.borrow();
        h.entries[h.index].clone()
    }

    fn write(&mut self, location: Location, mode: HistoryMode) {
        let mut h = self.history.borrow_mut();
        match mode {
            HistoryMode::Push => {
                let keep = h.index + 1;
                h.entries.truncate(keep);
                h.entries.push(location);
                h.index = keep;
            }
            HistoryMode::Replace => {
                let i = h.index;
                h.entries[i] = location;
            }
        }
    }
}

// ── Navigator ───────────────────────────────────────────────────────────────

/// A hash parameter whose value differs from the last one the navigator saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamChange {
    pub key: String,
    pub old: Option<String>,
    pub new: Option<String>,
}

type ParamListener = Box<dyn FnMut(&ParamChange)>;

/// Single entry point for reading and writing hash parameters.
pub struct Navigator<B: AddressBar> {
    bar: B,
    last_seen: HashParams,
    listeners: Vec<(String, ParamListener)>,
}

impl<B: AddressBar> Navigator<B> {
    pub fn new(bar: B) -> Self {
        let last_seen = HashParams::parse(&bar.location().hash);
        Self {
            bar,
            last_seen,
            listeners: Vec::new(),
        }
    }

    pub fn location(&self) -> Location {
        self.bar.location()
    }

    pub fn params(&self) -> HashParams {
        HashParams::parse(&self.bar.location().hash)
    }

    pub fn param(&self, key: &str) -> Option<String> {
        self.params().get(key).map(str::to_string)
    }

    /// Write `key=value` into the hash, keeping every other parameter.
    /// Returns false if the hash already held that value.
    pub fn set_param(&mut self, key: &str, value: &str, mode: HistoryMode) -> bool {
        let mut params = self.params();
        if params.get(key) == Some(value) {
            return false;
        }
        params.set(key, value);
        self.write_params(params, mode);
        true
    }

    /// Remove `key` from the hash, keeping every other parameter.
    /// Returns false if the key was not present.
    pub fn clear_param(&mut self, key: &str, mode: HistoryMode) -> bool {
        let mut params = self.params();
        if !params.remove(key) {
            return false;
        }
        self.write_params(params, mode);
        true
    }

    /// Move to a new path, dropping the query and hash.
    pub fn navigate(&mut self, path: &str) {
        self.bar.write(Location::new(path), HistoryMode::Push);
        self.last_seen = HashParams::default();
    }

    /// Register a callback for external changes to `key`.
    pub fn on_param_change(&mut self, key: &str, listener: impl FnMut(&ParamChange) + 'static) {
        self.listeners.push((key.to_string(), Box::new(listener)));
    }

    /// Diff the hash against the last known state after the address bar
    /// changed underneath us (back/forward, manual edit). Listeners for each
    /// changed key are invoked before the changes are returned.
    pub fn location_changed(&mut self) -> Vec<ParamChange> {
        let current = self.params();
        let mut keys: Vec<&str> = self.last_seen.keys().collect();
        for k in current.keys() {
            if !keys.contains(&k) {
                keys.push(k);
            }
        }

        let changes: Vec<ParamChange> = keys
            .into_iter()
            .filter_map(|key| {
                let old = self.last_seen.get(key);
                let new = current.get(key);
                (old != new).then(|| ParamChange {
                    key: key.to_string(),
                    old: old.map(str::to_string),
                    new: new.map(str::to_string),
                })
            })
            .collect();

        for change in &changes {
            for (key, listener) in self.listeners.iter_mut() {
                if *key == change.key {
                    listener(change);
                }
            }
        }

        self.last_seen = current;
        changes
    }

    pub fn bar(&self) -> &B {
        &self.bar
    }

    fn write_params(&mut self, params: HashParams, mode: HistoryMode) {
        let mut location = self.bar.location();
        location.hash = params.to_hash();
        log::debug!("Address bar -> {location} ({mode:?})");
        self.bar.write(location, mode);
        self.last_seen = params;
    }
}

#[cfg(test)]
#[path = "tests/address_bar_tests.rs"]
mod tests;
