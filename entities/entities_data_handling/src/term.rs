//! Term Module
//!
//! Provides the `Term` enum: every value category that can travel through the
//! external term format between the host and the remote runtime.
//!
//! ## Integers
//!
//! Integers come in three width classes that mirror the wire tags:
//! `SmallInt` (0..=255), `Int32` and `BigInt`. Equality is numeric across the
//! three variants, so `Term::SmallInt(7) == Term::BigInt(7.into())`. Use
//! [`Term::integer`] to build the narrowest variant for a value.
//!
//! ## Null and Nil
//!
//! `Nil` is the empty list. `Null` is the host's null value; it travels as the
//! atom `nil` or `undefined` depending on the naming convention in use.

use std::fmt;

use malachite::Integer;

use crate::atom::Atom;
use crate::map::Map;

/// Smallest value carried by the 32-bit integer wire class
pub const INT32_MIN: i64 = -(1 << 27);

/// Largest value carried by the 32-bit integer wire class
pub const INT32_MAX: i64 = (1 << 27) - 1;

/// A value exchanged with the remote runtime
#[derive(Clone, Debug)]
pub enum Term {
    /// Host null, sent as the convention's null atom
    Null,
    /// Empty list
    Nil,
    Boolean(bool),
    SmallInt(u8),
    Int32(i32),
    BigInt(Integer),
    Float64(f64),
    Atom(Atom),
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Binary(Vec<u8>),
    /// Proper list; an empty vector is equivalent to `Nil`
    List(Vec<Term>),
    /// Fixed-arity tuple
    Tuple(Box<[Term]>),
    Map(Map),
}

impl Term {
    /// Build an atom term
    pub fn atom(name: impl Into<Atom>) -> Term {
        Term::Atom(name.into())
    }

    /// Build a text term
    pub fn text(text: impl Into<String>) -> Term {
        Term::Text(text.into())
    }

    /// Build a binary term
    pub fn binary(bytes: impl Into<Vec<u8>>) -> Term {
        Term::Binary(bytes.into())
    }

    /// Build a list term, collapsing an empty list to `Nil`
    pub fn list(items: Vec<Term>) -> Term {
        if items.is_empty() {
            Term::Nil
        } else {
            Term::List(items)
        }
    }

    /// Build a tuple term
    pub fn tuple(items: Vec<Term>) -> Term {
        Term::Tuple(items.into_boxed_slice())
    }

    /// Build an integer term using the narrowest variant that holds the value
    ///
    /// Values in 0..=255 become `SmallInt`, values in
    /// [`INT32_MIN`]..=[`INT32_MAX`] become `Int32`, anything else `BigInt`.
    pub fn integer(value: impl Into<Integer>) -> Term {
        let value: Integer = value.into();
        match i64::try_from(&value) {
            Ok(small) => Term::from_i64(small),
            Err(_) => Term::BigInt(value),
        }
    }

    fn from_i64(value: i64) -> Term {
        if (0..=255).contains(&value) {
            Term::SmallInt(value as u8)
        } else if (INT32_MIN..=INT32_MAX).contains(&value) {
            Term::Int32(value as i32)
        } else {
            Term::BigInt(Integer::from(value))
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Term::Null)
    }

    /// True for `Nil` and for an empty `List`
    pub fn is_empty_list(&self) -> bool {
        match self {
            Term::Nil => true,
            Term::List(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Term::SmallInt(_) | Term::Int32(_) | Term::BigInt(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Term::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Term::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Term::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Term::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Elements of a list; `Nil` yields an empty slice
    pub fn as_list(&self) -> Option<&[Term]> {
        match self {
            Term::Nil => Some(&[]),
            Term::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Term]> {
        match self {
            Term::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Term::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Term::Float64(value) => Some(*value),
            _ => None,
        }
    }

    /// Integer value if it fits in an `i64`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Term::SmallInt(value) => Some(i64::from(*value)),
            Term::Int32(value) => Some(i64::from(*value)),
            Term::BigInt(value) => i64::try_from(value).ok(),
            _ => None,
        }
    }

    /// Integer value at arbitrary precision
    pub fn as_integer(&self) -> Option<Integer> {
        match self {
            Term::SmallInt(value) => Some(Integer::from(*value)),
            Term::Int32(value) => Some(Integer::from(*value)),
            Term::BigInt(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Value of a `SmallInt` or `Int32`
    fn native_int(&self) -> Option<i64> {
        match self {
            Term::SmallInt(value) => Some(i64::from(*value)),
            Term::Int32(value) => Some(i64::from(*value)),
            _ => None,
        }
    }

    fn integer_eq(&self, other: &Term) -> Option<bool> {
        match (self, other) {
            (Term::BigInt(a), Term::BigInt(b)) => Some(a == b),
            (Term::BigInt(big), small) | (small, Term::BigInt(big)) => {
                small.native_int().map(|value| *big == value)
            }
            _ => match (self.native_int(), other.native_int()) {
                (Some(a), Some(b)) => Some(a == b),
                _ => None,
            },
        }
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Term) -> bool {
        match (self, other) {
            (Term::Null, Term::Null) => true,
            (Term::Nil, Term::Nil) => true,
            (Term::Nil, Term::List(items)) | (Term::List(items), Term::Nil) => items.is_empty(),
            (Term::Boolean(a), Term::Boolean(b)) => a == b,
            (Term::Float64(a), Term::Float64(b)) => a.to_bits() == b.to_bits(),
            (Term::Atom(a), Term::Atom(b)) => a == b,
            (Term::Text(a), Term::Text(b)) => a == b,
            (Term::Binary(a), Term::Binary(b)) => a == b,
            (Term::List(a), Term::List(b)) => a == b,
            (Term::Tuple(a), Term::Tuple(b)) => a == b,
            (Term::Map(a), Term::Map(b)) => a == b,
            _ => self.integer_eq(other).unwrap_or(false),
        }
    }
}

impl Eq for Term {}

impl From<bool> for Term {
    fn from(value: bool) -> Self {
        Term::Boolean(value)
    }
}

impl From<u8> for Term {
    fn from(value: u8) -> Self {
        Term::SmallInt(value)
    }
}

impl From<i32> for Term {
    fn from(value: i32) -> Self {
        Term::from_i64(i64::from(value))
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::from_i64(value)
    }
}

impl From<u64> for Term {
    fn from(value: u64) -> Self {
        Term::integer(value)
    }
}

impl From<Integer> for Term {
    fn from(value: Integer) -> Self {
        Term::integer(value)
    }
}

impl From<f64> for Term {
    fn from(value: f64) -> Self {
        Term::Float64(value)
    }
}

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Term::Text(value.to_owned())
    }
}

impl From<String> for Term {
    fn from(value: String) -> Self {
        Term::Text(value)
    }
}

impl From<Vec<u8>> for Term {
    fn from(value: Vec<u8>) -> Self {
        Term::Binary(value)
    }
}

impl From<Atom> for Term {
    fn from(value: Atom) -> Self {
        Term::Atom(value)
    }
}

impl From<Map> for Term {
    fn from(value: Map) -> Self {
        Term::Map(value)
    }
}

impl From<Vec<Term>> for Term {
    fn from(items: Vec<Term>) -> Self {
        Term::list(items)
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Term]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Erlang-style rendering, e.g. `{ok,[1,2],#{a => <<"x">>}}`
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Null => f.write_str("null"),
            Term::Nil => f.write_str("[]"),
            Term::Boolean(b) => write!(f, "{}", b),
            Term::SmallInt(v) => write!(f, "{}", v),
            Term::Int32(v) => write!(f, "{}", v),
            Term::BigInt(v) => write!(f, "{}", v),
            Term::Float64(v) => write!(f, "{:?}", v),
            Term::Atom(atom) => write!(f, "{}", atom),
            Term::Text(text) => write!(f, "{:?}", text),
            Term::Binary(bytes) => {
                f.write_str("<<")?;
                for (i, byte) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", byte)?;
                }
                f.write_str(">>")
            }
            Term::List(items) => {
                f.write_str("[")?;
                write_seq(f, items)?;
                f.write_str("]")
            }
            Term::Tuple(items) => {
                f.write_str("{")?;
                write_seq(f, items)?;
                f.write_str("}")
            }
            Term::Map(map) => {
                f.write_str("#{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{} => {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}
