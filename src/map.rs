//! Ordered array type for PHP values.
//!
//! This module provides [`PhpArray`], a wrapper around [`IndexMap`] keyed by
//! [`ArrayKey`]. PHP arrays are ordered dictionaries: a list is just an array
//! whose keys happen to be `0..n`, and the wire format writes entries in
//! insertion order. Hash-map iteration order would scramble round-tripped
//! payloads, so insertion order is load-bearing here.
//!
//! ## Examples
//!
//! ```rust
//! use serde_php::{ArrayKey, PhpArray, PhpValue};
//!
//! let mut array = PhpArray::new();
//! array.push(PhpValue::from(10));
//! array.insert(ArrayKey::from("name"), PhpValue::from("Alice"));
//!
//! assert_eq!(array.len(), 2);
//! assert_eq!(array.get_int(0).and_then(|v| v.as_i64()), Some(10));
//! assert_eq!(array.get_str("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;

use crate::value::{ArrayKey, PhpValue};

/// An insertion-ordered map of array keys to PHP values.
///
/// Mirrors PHP array semantics: integer and string keys coexist, entries keep
/// insertion order, and [`push`](PhpArray::push) appends with the next free
/// integer index the way `$array[] = $value` does.
///
/// # Examples
///
/// ```rust
/// use serde_php::{ArrayKey, PhpArray, PhpValue};
///
/// let mut array = PhpArray::new();
/// array.insert(ArrayKey::from(5), PhpValue::from("five"));
/// array.push(PhpValue::from("six"));
///
/// let keys: Vec<_> = array.keys().cloned().collect();
/// assert_eq!(keys, vec![ArrayKey::Int(5), ArrayKey::Int(6)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PhpArray {
    entries: IndexMap<ArrayKey, PhpValue>,
    next_index: i64,
}

impl PhpArray {
    /// Creates an empty `PhpArray`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_php::PhpArray;
    ///
    /// let array = PhpArray::new();
    /// assert!(array.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        PhpArray::default()
    }

    /// Creates an empty `PhpArray` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        PhpArray {
            entries: IndexMap::with_capacity(capacity),
            next_index: 0,
        }
    }

    /// Inserts a key-value pair into the array.
    ///
    /// If the array already contained this key, the old value is returned and
    /// the entry keeps its original position. Inserting an integer key bumps
    /// the auto-index used by [`push`](PhpArray::push), as in PHP.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_php::{ArrayKey, PhpArray, PhpValue};
    ///
    /// let mut array = PhpArray::new();
    /// assert!(array.insert(ArrayKey::from("k"), PhpValue::from(1)).is_none());
    /// assert!(array.insert(ArrayKey::from("k"), PhpValue::from(2)).is_some());
    /// ```
    pub fn insert(&mut self, key: ArrayKey, value: PhpValue) -> Option<PhpValue> {
        if let ArrayKey::Int(index) = key {
            if index >= self.next_index {
                self.next_index = index.saturating_add(1);
            }
        }
        self.entries.insert(key, value)
    }

    /// Appends a value with the next free integer index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_php::{ArrayKey, PhpArray, PhpValue};
    ///
    /// let mut array = PhpArray::new();
    /// array.push(PhpValue::from("a"));
    /// array.push(PhpValue::from("b"));
    /// assert!(array.get_int(1).is_some());
    /// ```
    pub fn push(&mut self, value: PhpValue) {
        self.insert(ArrayKey::Int(self.next_index), value);
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &ArrayKey) -> Option<&PhpValue> {
        self.entries.get(key)
    }

    /// Returns the value stored under a string key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_php::{ArrayKey, PhpArray, PhpValue};
    ///
    /// let mut array = PhpArray::new();
    /// array.insert(ArrayKey::from("name"), PhpValue::from("Alice"));
    /// assert_eq!(array.get_str("name").and_then(|v| v.as_str()), Some("Alice"));
    /// ```
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&PhpValue> {
        self.entries.get(&ArrayKey::Str(key.to_string()))
    }

    /// Returns the value stored under an integer key.
    #[must_use]
    pub fn get_int(&self, key: i64) -> Option<&PhpValue> {
        self.entries.get(&ArrayKey::Int(key))
    }

    /// Returns the number of entries in the array.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the array contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the keys are exactly `0..len` in order, i.e. the
    /// array is a PHP list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_php::{ArrayKey, PhpArray, PhpValue};
    ///
    /// let mut array = PhpArray::new();
    /// array.push(PhpValue::from(1));
    /// array.push(PhpValue::from(2));
    /// assert!(array.is_list());
    ///
    /// array.insert(ArrayKey::from("k"), PhpValue::Null);
    /// assert!(!array.is_list());
    /// ```
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.entries
            .keys()
            .enumerate()
            .all(|(expected, key)| matches!(key, ArrayKey::Int(i) if *i == expected as i64))
    }

    /// Returns an iterator over the keys of the array, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, ArrayKey, PhpValue> {
        self.entries.keys()
    }

    /// Returns an iterator over the values of the array, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, ArrayKey, PhpValue> {
        self.entries.values()
    }

    /// Returns an iterator over the key-value pairs of the array, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, ArrayKey, PhpValue> {
        self.entries.iter()
    }
}

/// Equality compares entries and their order; the auto-index bookkeeping is
/// not observable.
impl PartialEq for PhpArray {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl IntoIterator for PhpArray {
    type Item = (ArrayKey, PhpValue);
    type IntoIter = indexmap::map::IntoIter<ArrayKey, PhpValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a PhpArray {
    type Item = (&'a ArrayKey, &'a PhpValue);
    type IntoIter = indexmap::map::Iter<'a, ArrayKey, PhpValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(ArrayKey, PhpValue)> for PhpArray {
    fn from_iter<T: IntoIterator<Item = (ArrayKey, PhpValue)>>(iter: T) -> Self {
        let mut array = PhpArray::new();
        for (key, value) in iter {
            array.insert(key, value);
        }
        array
    }
}

impl FromIterator<PhpValue> for PhpArray {
    fn from_iter<T: IntoIterator<Item = PhpValue>>(iter: T) -> Self {
        let mut array = PhpArray::new();
        for value in iter {
            array.push(value);
        }
        array
    }
}
