//! Map Operations Module
//!
//! Provides the associative structure carried by the map wire tag.
//!
//! Pairs are kept in insertion order, which is the order they are written to
//! the wire. Keys are unique under key equivalence: ordinary term equality,
//! except that an `Atom`, a `Text` and a UTF-8 `Binary` with the same
//! characters are the same key. A map decoded with atom or binary keys can
//! therefore be queried with text keys and the other way around.

use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher, RandomState};

use crate::term::Term;

/// Map data structure
///
/// Pairs live in a vector in insertion order. A side index from key hash to
/// pair positions keeps lookups and inserts constant time on average.
#[derive(Clone, Default)]
pub struct Map {
    /// Key-value pairs stored in insertion order
    pairs: Vec<(Term, Term)>,
    /// Key hash to positions in `pairs`
    index: HashMap<u64, Vec<usize>>,
    hasher: RandomState,
}

/// Map operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// Key not found in map
    KeyNotFound,
}

/// Key equivalence used for map lookups
///
/// Atoms, text and UTF-8 binaries collapse into one key space; everything
/// else uses term equality.
pub fn keys_equivalent(a: &Term, b: &Term) -> bool {
    match (string_key(a), string_key(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}

/// The characters of a key in the shared atom/text space
fn string_key(term: &Term) -> Option<&str> {
    match term {
        Term::Atom(atom) => Some(atom.as_str()),
        Term::Text(text) => Some(text),
        Term::Binary(bytes) => std::str::from_utf8(bytes).ok(),
        _ => None,
    }
}

/// Hashes a term so that equivalent keys hash alike
struct KeyHash<'a>(&'a Term);

impl Hash for KeyHash<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let term = self.0;
        if let Some(chars) = string_key(term) {
            0u8.hash(state);
            chars.hash(state);
            return;
        }
        match term {
            Term::Null => 1u8.hash(state),
            Term::Nil => 2u8.hash(state),
            Term::List(items) if items.is_empty() => 2u8.hash(state),
            Term::Boolean(value) => {
                3u8.hash(state);
                value.hash(state);
            }
            Term::SmallInt(_) | Term::Int32(_) => {
                4u8.hash(state);
                term.as_i64().hash(state);
            }
            Term::BigInt(value) => {
                4u8.hash(state);
                match term.as_i64() {
                    Some(small) => Some(small).hash(state),
                    None => value.hash(state),
                }
            }
            Term::Float64(value) => {
                5u8.hash(state);
                value.to_bits().hash(state);
            }
            Term::Binary(bytes) => {
                6u8.hash(state);
                bytes.hash(state);
            }
            Term::List(items) => {
                7u8.hash(state);
                items.len().hash(state);
                items.iter().for_each(|item| KeyHash(item).hash(state));
            }
            Term::Tuple(items) => {
                8u8.hash(state);
                items.len().hash(state);
                items.iter().for_each(|item| KeyHash(item).hash(state));
            }
            // Map equality ignores order, so only the size is stable
            Term::Map(map) => {
                9u8.hash(state);
                map.len().hash(state);
            }
            Term::Atom(_) | Term::Text(_) => {}
        }
    }
}

impl Map {
    /// Create a new empty map
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            hasher: RandomState::new(),
        }
    }

    /// Number of key-value pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Check if an equivalent key exists in the map
    pub fn contains_key(&self, key: &Term) -> bool {
        self.find_index(key).is_some()
    }

    /// Get a value by key, returning None if no equivalent key exists
    pub fn get(&self, key: &Term) -> Option<&Term> {
        self.find_index(key).map(|idx| &self.pairs[idx].1)
    }

    /// Find the stored key-value pair for an equivalent key
    pub fn find(&self, key: &Term) -> Option<(&Term, &Term)> {
        self.find_index(key).map(|idx| {
            let (k, v) = &self.pairs[idx];
            (k, v)
        })
    }

    /// Put a key-value pair into the map
    ///
    /// If an equivalent key already exists, its value is replaced and the
    /// stored key is kept. Returns the previous value if there was one.
    pub fn put(&mut self, key: Term, value: Term) -> Option<Term> {
        let hash = self.key_hash(&key);
        if let Some(idx) = self.find_in_bucket(hash, &key) {
            Some(std::mem::replace(&mut self.pairs[idx].1, value))
        } else {
            self.index.entry(hash).or_default().push(self.pairs.len());
            self.pairs.push((key, value));
            None
        }
    }

    /// Update the value of an existing key
    ///
    /// Returns Ok(previous_value) if the key exists, Err(MapError::KeyNotFound) otherwise.
    pub fn update(&mut self, key: &Term, value: Term) -> Result<Term, MapError> {
        match self.find_index(key) {
            Some(idx) => Ok(std::mem::replace(&mut self.pairs[idx].1, value)),
            None => Err(MapError::KeyNotFound),
        }
    }

    /// Remove a key from the map, returning its value
    pub fn remove(&mut self, key: &Term) -> Option<Term> {
        self.take(key).map(|(_, value)| value)
    }

    /// Remove a key from the map, returning the stored pair
    pub fn take(&mut self, key: &Term) -> Option<(Term, Term)> {
        let idx = self.find_index(key)?;
        let pair = self.pairs.remove(idx);
        self.reindex();
        Some(pair)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Term, &Term)> {
        self.pairs.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Term> {
        self.pairs.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Term> {
        self.pairs.iter().map(|(_, v)| v)
    }

    /// Convert the map into its (key, value) pairs in insertion order
    pub fn into_pairs(self) -> Vec<(Term, Term)> {
        self.pairs
    }

    /// Create a map from (key, value) pairs
    ///
    /// If equivalent keys repeat, the last value is kept.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Term, Term)>) -> Self {
        let mut map = Self::new();
        for (key, value) in pairs {
            map.put(key, value);
        }
        map
    }

    fn key_hash(&self, key: &Term) -> u64 {
        self.hasher.hash_one(KeyHash(key))
    }

    fn find_index(&self, key: &Term) -> Option<usize> {
        self.find_in_bucket(self.key_hash(key), key)
    }

    fn find_in_bucket(&self, hash: u64, key: &Term) -> Option<usize> {
        self.index
            .get(&hash)?
            .iter()
            .copied()
            .find(|&idx| keys_equivalent(&self.pairs[idx].0, key))
    }

    /// Positions shift after a removal
    fn reindex(&mut self) {
        self.index.clear();
        for idx in 0..self.pairs.len() {
            let hash = self.key_hash(&self.pairs[idx].0);
            self.index.entry(hash).or_default().push(idx);
        }
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.pairs.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

/// Maps are equal when they hold equivalent keys bound to equal values,
/// regardless of insertion order.
impl PartialEq for Map {
    fn eq(&self, other: &Map) -> bool {
        self.len() == other.len()
            && self
                .pairs
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl Eq for Map {}

impl FromIterator<(Term, Term)> for Map {
    fn from_iter<I: IntoIterator<Item = (Term, Term)>>(iter: I) -> Self {
        Map::from_pairs(iter)
    }
}
