//! Sparse polynomials over segmented hash storage.
//!
//! A polynomial is an unordered collection of (monomial, coefficient)
//! entries, grouped into `2^n` segments. A monomial lives in the segment
//! selected by its hash word, so the parallel multiplier can hand whole
//! segments to worker threads and stitch the results back without
//! rehashing.

use std::collections::hash_map::Entry;
use std::fmt;

use dashu::integer::IBig;
use rustc_hash::FxHashMap;

use noether_integers::Integer;
use noether_pack::Packable;
use noether_rings::Ring;
use noether_symbols::{InsertionMap, SymbolSet};

use crate::error::PolyError;
use crate::monomial::PackedMonomial;
use crate::multiply::{mul_mt_hm, mul_simple};

/// The largest supported log2 segment count.
pub const MAX_LOG2_SEGMENTS: u32 = 16;

/// Above this many monomial pairs, [`Polynomial::mul`] switches from the
/// single-threaded multiplier to the parallel one.
const SIMPLE_MUL_MAX_PAIRS: usize = 4096;

/// A sparse multivariate polynomial with bit-packed monomial keys.
///
/// Terms are stored in `2^n` hash-map segments, keyed by monomial. The
/// segment count starts at one (`n = 0`, "automatic") and is either chosen
/// by the parallel multiplier or preset with
/// [`set_n_segments`](Polynomial::set_n_segments).
///
/// No two entries share a monomial, and no entry has a zero coefficient:
/// coefficients combining to zero are removed eagerly.
#[derive(Clone, Debug)]
pub struct Polynomial<T: Packable, R: Ring> {
    symbol_set: SymbolSet,
    log2_segments: u32,
    segments: Vec<FxHashMap<PackedMonomial<T>, R>>,
}

impl<T: Packable, R: Ring> Polynomial<T, R> {
    /// Creates an empty polynomial over the given symbol set.
    #[must_use]
    pub fn new(symbol_set: SymbolSet) -> Self {
        Self {
            symbol_set,
            log2_segments: 0,
            segments: vec![FxHashMap::default()],
        }
    }

    /// Creates a constant polynomial.
    ///
    /// A zero constant yields the empty polynomial.
    #[must_use]
    pub fn constant(symbol_set: SymbolSet, value: R) -> Self {
        let mut out = Self::new(symbol_set);
        let arity = out.arity();
        out.insert_or_accumulate(PackedMonomial::unit(arity), value);
        out
    }

    /// Creates the polynomial consisting of the single generator `name`.
    ///
    /// # Errors
    ///
    /// Returns an error when the generator is not in the symbol set, or
    /// when the symbol set is too large for the word type.
    pub fn variable(symbol_set: SymbolSet, name: &str) -> Result<Self, PolyError> {
        let Some(index) = symbol_set.index_of(name) else {
            return Err(PolyError::UnknownGenerator {
                generator: name.to_string(),
                symbol_set: symbol_set.to_string(),
            });
        };
        let mut exponents = vec![T::zero(); symbol_set.len()];
        exponents[index] = T::one();
        let monomial = PackedMonomial::from_exponents(&exponents)?;
        let mut out = Self::new(symbol_set);
        out.insert_or_accumulate(monomial, R::one());
        Ok(out)
    }

    /// Creates one generator polynomial per symbol, in set order.
    ///
    /// # Errors
    ///
    /// Returns an error when the symbol set is too large for the word type.
    pub fn variables(symbol_set: SymbolSet) -> Result<Vec<Self>, PolyError> {
        symbol_set
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>()
            .into_iter()
            .map(|name| Self::variable(symbol_set.clone(), &name))
            .collect()
    }

    /// Returns the symbol set.
    #[must_use]
    pub fn symbol_set(&self) -> &SymbolSet {
        &self.symbol_set
    }

    /// Returns the arity of the monomials, i.e. the symbol set size.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn arity(&self) -> u32 {
        self.symbol_set.len() as u32
    }

    /// Replaces the symbol set.
    ///
    /// # Errors
    ///
    /// Returns an error when the polynomial is not empty.
    pub fn set_symbol_set(&mut self, symbol_set: SymbolSet) -> Result<(), PolyError> {
        if !self.is_empty() {
            return Err(PolyError::NonEmptyMutation {
                operation: "replacing the symbol set",
            });
        }
        self.symbol_set = symbol_set;
        Ok(())
    }

    /// Sets the segment layout to `2^n` segments.
    ///
    /// `n = 0` restores the single-segment "automatic" layout, letting the
    /// next parallel multiplication pick a count by itself; any other value
    /// is honored as-is.
    ///
    /// # Errors
    ///
    /// Returns an error when the polynomial is not empty or `n` exceeds
    /// [`MAX_LOG2_SEGMENTS`].
    pub fn set_n_segments(&mut self, n: u32) -> Result<(), PolyError> {
        if !self.is_empty() {
            return Err(PolyError::NonEmptyMutation {
                operation: "changing the segment count",
            });
        }
        if n > MAX_LOG2_SEGMENTS {
            return Err(PolyError::SegmentCountTooLarge {
                requested: n,
                max: MAX_LOG2_SEGMENTS,
            });
        }
        self.log2_segments = n;
        self.segments = (0..1usize << n).map(|_| FxHashMap::default()).collect();
        Ok(())
    }

    /// Returns the current log2 segment count.
    #[must_use]
    pub fn n_segments(&self) -> u32 {
        self.log2_segments
    }

    /// Drops all terms, keeping the symbol set and segment layout.
    pub fn clear_terms(&mut self) {
        for segment in &mut self.segments {
            segment.clear();
        }
    }

    /// Returns the number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.iter().map(|segment| segment.len()).sum()
    }

    /// Returns true if the polynomial has no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|segment| segment.is_empty())
    }

    /// Iterates over the terms in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&PackedMonomial<T>, &R)> {
        self.segments.iter().flat_map(|segment| segment.iter())
    }

    /// Looks up the coefficient of a monomial.
    #[must_use]
    pub fn get(&self, monomial: &PackedMonomial<T>) -> Option<&R> {
        self.segments[self.segment_index(monomial)].get(monomial)
    }

    /// Inserts a term, combining coefficients on an equal monomial.
    ///
    /// A zero coefficient is never stored: inserting zero is a no-op and a
    /// coefficient sum reaching zero removes the entry.
    pub fn insert_or_accumulate(&mut self, monomial: PackedMonomial<T>, coefficient: R) {
        if coefficient.is_zero() {
            return;
        }
        let index = self.segment_index(&monomial);
        match self.segments[index].entry(monomial) {
            Entry::Occupied(mut entry) => {
                let sum = entry.get().clone() + coefficient;
                if sum.is_zero() {
                    entry.remove();
                } else {
                    *entry.get_mut() = sum;
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(coefficient);
            }
        }
    }

    /// Computes the total degree, or `None` for the empty polynomial.
    #[must_use]
    pub fn degree(&self) -> Option<Integer>
    where
        T: Into<IBig>,
    {
        let arity = self.arity();
        self.iter().map(|(m, _)| m.degree(arity)).max()
    }

    /// Computes the partial degree over the symbols shared with `symbols`,
    /// or `None` for the empty polynomial.
    #[must_use]
    pub fn partial_degree(&self, symbols: &SymbolSet) -> Option<Integer>
    where
        T: Into<IBig>,
    {
        let arity = self.arity();
        let indices = self.symbol_set.intersection_indices(symbols);
        self.iter()
            .map(|(m, _)| m.partial_degree(arity, &indices))
            .max()
    }

    /// Returns the additive inverse.
    #[must_use]
    pub fn neg(&self) -> Self {
        let mut out = self.clone();
        for segment in &mut out.segments {
            for coefficient in segment.values_mut() {
                *coefficient = -coefficient.clone();
            }
        }
        out
    }

    /// Adds two polynomials, merging their symbol sets if they differ.
    ///
    /// # Errors
    ///
    /// Returns an error when a symbol-set merge fails to repack a monomial.
    pub fn add(&self, other: &Self) -> Result<Self, PolyError> {
        if self.symbol_set == other.symbol_set {
            let mut out = self.clone();
            for (monomial, coefficient) in other.iter() {
                out.insert_or_accumulate(*monomial, coefficient.clone());
            }
            Ok(out)
        } else {
            let (a, b) = Self::merged_operands(self, other)?;
            a.add(&b)
        }
    }

    /// Subtracts two polynomials, merging their symbol sets if they differ.
    ///
    /// # Errors
    ///
    /// Returns an error when a symbol-set merge fails to repack a monomial.
    pub fn sub(&self, other: &Self) -> Result<Self, PolyError> {
        self.add(&other.neg())
    }

    /// Multiplies every coefficient by a scalar.
    ///
    /// A zero scalar yields the empty polynomial.
    #[must_use]
    pub fn scale(&self, scalar: &R) -> Self {
        let mut out = Self::new(self.symbol_set.clone());
        for (monomial, coefficient) in self.iter() {
            out.insert_or_accumulate(*monomial, coefficient.clone() * scalar.clone());
        }
        out
    }

    /// Extends every term to a merged symbol set.
    ///
    /// `merged` must be the union produced by the same
    /// [`SymbolSet::merge`] call that produced `ins_map`.
    ///
    /// # Errors
    ///
    /// Returns an error when a monomial cannot be repacked at the merged
    /// arity.
    pub fn merge_symbols(
        &self,
        ins_map: &InsertionMap,
        merged: SymbolSet,
    ) -> Result<Self, PolyError> {
        debug_assert_eq!(merged.len(), self.symbol_set.len() + ins_map.inserted());
        let arity = self.arity();
        let mut out = Self::new(merged);
        for (monomial, coefficient) in self.iter() {
            let extended = monomial.merge_symbols(ins_map, arity)?;
            out.insert_or_accumulate(extended, coefficient.clone());
        }
        Ok(out)
    }

    /// Multiplies two polynomials, merging their symbol sets if they differ
    /// and dispatching to the simple or parallel multiplier by problem
    /// size.
    ///
    /// # Errors
    ///
    /// Returns an error when the product overflows the packed exponent
    /// range.
    pub fn mul(&self, other: &Self) -> Result<Self, PolyError>
    where
        T: Into<IBig>,
        R: Send + Sync,
    {
        if self.symbol_set == other.symbol_set {
            let mut out = Self::new(self.symbol_set.clone());
            if self.len().saturating_mul(other.len()) <= SIMPLE_MUL_MAX_PAIRS {
                mul_simple(&mut out, self, other)?;
            } else {
                mul_mt_hm(&mut out, self, other)?;
            }
            Ok(out)
        } else {
            let (a, b) = Self::merged_operands(self, other)?;
            a.mul(&b)
        }
    }

    /// Raises the polynomial to a non-negative power by repeated squaring.
    ///
    /// An exponent overflow inside any intermediate multiplication
    /// surfaces as an error before any partial result escapes.
    ///
    /// # Errors
    ///
    /// Returns an error when an intermediate product overflows the packed
    /// exponent range.
    pub fn pow(&self, exponent: u64) -> Result<Self, PolyError>
    where
        T: Into<IBig>,
        R: Send + Sync,
    {
        if exponent == 0 {
            return Ok(Self::constant(self.symbol_set.clone(), R::one()));
        }
        if self.is_empty() {
            return Ok(Self::new(self.symbol_set.clone()));
        }

        let mut result = Self::constant(self.symbol_set.clone(), R::one());
        let mut base = self.clone();
        let mut remaining = exponent;
        loop {
            if remaining & 1 == 1 {
                result = result.mul(&base)?;
            }
            remaining >>= 1;
            if remaining == 0 {
                break;
            }
            base = base.mul(&base)?;
        }
        Ok(result)
    }

    /// Builds the symbol-set union of two polynomials and extends both to
    /// it.
    pub(crate) fn merged_operands(a: &Self, b: &Self) -> Result<(Self, Self), PolyError> {
        let (union, ins_a, ins_b) = a.symbol_set.merge(&b.symbol_set);
        Ok((
            a.merge_symbols(&ins_a, union.clone())?,
            b.merge_symbols(&ins_b, union)?,
        ))
    }

    /// Replaces the storage with pre-built segments.
    ///
    /// The caller guarantees that every entry already lives in its correct
    /// segment, so no rehashing happens here.
    pub(crate) fn install_segments(
        &mut self,
        log2_segments: u32,
        segments: Vec<FxHashMap<PackedMonomial<T>, R>>,
    ) {
        debug_assert_eq!(segments.len(), 1 << log2_segments);
        self.log2_segments = log2_segments;
        self.segments = segments;
    }

    fn segment_index(&self, monomial: &PackedMonomial<T>) -> usize {
        segment_of(monomial.hash_word(), self.log2_segments)
    }
}

/// Maps a monomial hash word to its segment under a `2^n` layout.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn segment_of(hash_word: u64, log2_segments: u32) -> usize {
    (hash_word & ((1u64 << log2_segments) - 1)) as usize
}

impl<T: Packable, R: Ring> PartialEq for Polynomial<T, R> {
    /// Set equality of the non-zero terms; the segment layouts of the two
    /// operands play no role.
    fn eq(&self, other: &Self) -> bool {
        self.symbol_set == other.symbol_set
            && self.len() == other.len()
            && self.iter().all(|(m, c)| other.get(m) == Some(c))
    }
}

impl<T: Packable, R: Ring> fmt::Display for Polynomial<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "0");
        }
        // The storage order is unspecified; sort by packed word so the
        // rendering is reproducible.
        let mut terms: Vec<_> = self.iter().collect();
        terms.sort_by_key(|(m, _)| m.word());
        let rendered: Vec<String> = terms
            .into_iter()
            .map(|(m, c)| {
                let monomial = m.to_pretty(&self.symbol_set);
                if monomial == "1" {
                    format!("{c:?}")
                } else {
                    format!("{c:?}*{monomial}")
                }
            })
            .collect();
        write!(f, "{}", rendered.join(" + "))
    }
}
