//! # noether-symbols
//!
//! Ordered symbol sets for multivariate polynomials.
//!
//! A [`SymbolSet`] is a sorted sequence of distinct symbol names. Its size is
//! the arity of the monomials of any polynomial defined over it, and the
//! position of a symbol is the slot index of the corresponding exponent.
//!
//! Merging two sets produces their union together with one [`InsertionMap`]
//! per operand, describing where the new symbols must be interleaved when a
//! monomial is extended to the merged set.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fmt;

/// An ordered set of distinct symbol names.
///
/// Symbols are kept sorted, so equal sets always agree on the slot index of
/// every symbol.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct SymbolSet {
    names: Vec<String>,
}

impl SymbolSet {
    /// Creates an empty symbol set.
    #[must_use]
    pub fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Creates a symbol set from the given names, sorting and deduplicating.
    pub fn from_names<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();
        Self { names }
    }

    /// Returns the number of symbols (the arity of monomials over this set).
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the set contains no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over the symbol names in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Returns true if the set contains the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Returns the slot index of the given name, if present.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.binary_search_by(|s| s.as_str().cmp(name)).ok()
    }

    /// Returns the indices, in this set, of the symbols also present in
    /// `other`.
    ///
    /// This is the index form of the set intersection, used to restrict a
    /// degree computation to a subset of the symbols.
    #[must_use]
    pub fn intersection_indices(&self, other: &Self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut j = 0;
        for (i, name) in self.names.iter().enumerate() {
            while j < other.names.len() && other.names[j].as_str() < name.as_str() {
                j += 1;
            }
            if j < other.names.len() && other.names[j] == *name {
                out.push(i);
                j += 1;
            }
        }
        out
    }

    /// Merges this set with another, returning the union and the insertion
    /// maps extending each operand to the union.
    ///
    /// Runs in `O(self.len() + other.len())`.
    #[must_use]
    pub fn merge(&self, other: &Self) -> (Self, InsertionMap, InsertionMap) {
        let mut union = Vec::with_capacity(self.names.len() + other.names.len());
        let mut ins_self = InsertionMap::default();
        let mut ins_other = InsertionMap::default();

        let (a, b) = (&self.names, &other.names);
        let (mut i, mut j) = (0, 0);
        while i < a.len() || j < b.len() {
            if j == b.len() || (i < a.len() && a[i] < b[j]) {
                // A symbol of `self` that `other` lacks.
                ins_other.record(j, a[i].clone());
                union.push(a[i].clone());
                i += 1;
            } else if i == a.len() || b[j] < a[i] {
                // A symbol of `other` that `self` lacks.
                ins_self.record(i, b[j].clone());
                union.push(b[j].clone());
                j += 1;
            } else {
                union.push(a[i].clone());
                i += 1;
                j += 1;
            }
        }

        (Self { names: union }, ins_self, ins_other)
    }
}

impl fmt::Display for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{name}'")?;
        }
        write!(f, "}}")
    }
}

impl<'a> IntoIterator for &'a SymbolSet {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter().map(String::as_str)
    }
}

/// Describes how to extend a symbol set to a superset.
///
/// Each entry pairs an index `i` of the original set with the ordered list
/// of symbols to insert immediately before position `i`; the index
/// `original.len()` denotes insertion at the end. Entries are ordered by
/// index, with at most one entry per index.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct InsertionMap {
    entries: Vec<(usize, Vec<String>)>,
}

impl InsertionMap {
    /// Returns true if nothing is inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of inserted symbols.
    #[must_use]
    pub fn inserted(&self) -> usize {
        self.entries.iter().map(|(_, names)| names.len()).sum()
    }

    /// Iterates over `(index, inserted names)` entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.entries.iter().map(|(i, names)| (*i, names.as_slice()))
    }

    fn record(&mut self, index: usize, name: String) {
        match self.entries.last_mut() {
            Some((i, names)) if *i == index => names.push(name),
            _ => self.entries.push((index, vec![name])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_and_dedup() {
        let ss = SymbolSet::from_names(["z", "x", "y", "x"]);
        assert_eq!(ss.len(), 3);
        assert_eq!(ss.iter().collect::<Vec<_>>(), vec!["x", "y", "z"]);
        assert_eq!(ss.index_of("y"), Some(1));
        assert_eq!(ss.index_of("w"), None);
    }

    #[test]
    fn test_display() {
        let ss = SymbolSet::from_names(["x", "y"]);
        assert_eq!(ss.to_string(), "{'x', 'y'}");
        assert_eq!(SymbolSet::new().to_string(), "{}");
    }

    #[test]
    fn test_intersection_indices() {
        let full = SymbolSet::from_names(["t", "u", "x", "y", "z"]);
        let sub = SymbolSet::from_names(["x", "t", "u"]);
        assert_eq!(full.intersection_indices(&sub), vec![0, 1, 2]);

        let sub = SymbolSet::from_names(["z", "y"]);
        assert_eq!(full.intersection_indices(&sub), vec![3, 4]);

        // Symbols absent from `self` are ignored.
        let sub = SymbolSet::from_names(["a", "x", "w"]);
        assert_eq!(full.intersection_indices(&sub), vec![2]);
    }

    #[test]
    fn test_merge_disjoint() {
        let a = SymbolSet::from_names(["b", "d"]);
        let b = SymbolSet::from_names(["a", "c", "e"]);
        let (union, ins_a, ins_b) = a.merge(&b);

        assert_eq!(union, SymbolSet::from_names(["a", "b", "c", "d", "e"]));
        // Extending {b, d}: insert a before 0, c before 1, e at the end.
        assert_eq!(
            ins_a.iter().collect::<Vec<_>>(),
            vec![
                (0, &["a".to_string()][..]),
                (1, &["c".to_string()][..]),
                (2, &["e".to_string()][..]),
            ]
        );
        assert_eq!(ins_a.inserted(), 3);
        // Extending {a, c, e}: insert b before 1, d before 2.
        assert_eq!(
            ins_b.iter().collect::<Vec<_>>(),
            vec![(1, &["b".to_string()][..]), (2, &["d".to_string()][..])]
        );
    }

    #[test]
    fn test_merge_overlapping() {
        let a = SymbolSet::from_names(["x", "y"]);
        let b = SymbolSet::from_names(["y", "z"]);
        let (union, ins_a, ins_b) = a.merge(&b);

        assert_eq!(union, SymbolSet::from_names(["x", "y", "z"]));
        assert_eq!(ins_a.iter().collect::<Vec<_>>(), vec![(2, &["z".to_string()][..])]);
        assert_eq!(ins_b.iter().collect::<Vec<_>>(), vec![(0, &["x".to_string()][..])]);
    }

    #[test]
    fn test_merge_equal_sets() {
        let a = SymbolSet::from_names(["x", "y"]);
        let (union, ins_a, ins_b) = a.merge(&a.clone());
        assert_eq!(union, a);
        assert!(ins_a.is_empty());
        assert!(ins_b.is_empty());
    }

    #[test]
    fn test_merge_with_empty() {
        let a = SymbolSet::from_names(["x", "y"]);
        let empty = SymbolSet::new();
        let (union, ins_a, ins_empty) = a.merge(&empty);
        assert_eq!(union, a);
        assert!(ins_a.is_empty());
        assert_eq!(ins_empty.iter().collect::<Vec<_>>().len(), 1);
        assert_eq!(ins_empty.inserted(), 2);
    }
}
