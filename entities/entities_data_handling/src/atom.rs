//! Atom Module
//!
//! Provides the `Atom` type: a symbolic name carried as owned UTF-8 text.
//!
//! Atoms are a separate type from plain text so that the encoder can pick the
//! atom wire tag instead of a binary or string tag. An atom compares, orders
//! and hashes exactly like its name, and can be compared directly with `str`
//! and `String`.

use std::borrow::Borrow;
use std::fmt;

/// Symbolic atom name
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Atom(String);

impl Atom {
    /// Create an atom
    ///
    /// Accepts anything convertible into an `Atom`. Passing an existing atom
    /// returns it unchanged.
    ///
    /// # Examples
    /// ```
    /// use entities_data_handling::Atom;
    ///
    /// let ok = Atom::new("ok");
    /// assert_eq!(Atom::new(ok.clone()), ok);
    /// assert_eq!(ok, "ok");
    /// ```
    pub fn new(name: impl Into<Atom>) -> Self {
        name.into()
    }

    /// Name of the atom
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the atom, returning its name
    pub fn into_string(self) -> String {
        self.0
    }

    /// Length of the name in UTF-8 bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the name prints without quotes in Erlang syntax
    pub(crate) fn is_bare(&self) -> bool {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) if first.is_ascii_lowercase() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '@')
            }
            _ => false,
        }
    }
}

impl From<&str> for Atom {
    fn from(name: &str) -> Self {
        Atom(name.to_owned())
    }
}

impl From<String> for Atom {
    fn from(name: String) -> Self {
        Atom(name)
    }
}

impl From<&String> for Atom {
    fn from(name: &String) -> Self {
        Atom(name.clone())
    }
}

impl From<&Atom> for Atom {
    fn from(atom: &Atom) -> Self {
        atom.clone()
    }
}

impl From<Atom> for String {
    fn from(atom: Atom) -> Self {
        atom.0
    }
}

impl AsRef<str> for Atom {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Atom {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Atom {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Atom {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<String> for Atom {
    fn eq(&self, other: &String) -> bool {
        &self.0 == other
    }
}

impl PartialEq<Atom> for str {
    fn eq(&self, other: &Atom) -> bool {
        self == other.0
    }
}

impl PartialEq<Atom> for &str {
    fn eq(&self, other: &Atom) -> bool {
        *self == other.0
    }
}

impl PartialEq<Atom> for String {
    fn eq(&self, other: &Atom) -> bool {
        *self == other.0
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bare() {
            f.write_str(&self.0)
        } else {
            write!(f, "'{}'", self.0.replace('\'', "\\'"))
        }
    }
}
