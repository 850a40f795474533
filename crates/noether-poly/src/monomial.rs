//! Bit-packed monomials.
//!
//! A monomial stores its whole exponent vector in a single machine word,
//! so equality, hashing and (after a range check) multiplication are plain
//! word operations. The arity is not stored: it is carried by the symbol
//! set of the owning polynomial, and every operation that needs it takes
//! it as an argument.

use std::hash::{Hash, Hasher};

use dashu::integer::IBig;
use smallvec::SmallVec;

use noether_integers::Integer;
use noether_pack::{pack_slice, unpack, BitPacker, BitUnpacker, PackError, Packable};
use noether_symbols::{InsertionMap, SymbolSet};

/// A monomial whose exponent vector is packed into one word of type `T`.
///
/// Signed word types yield Laurent-style monomials with possibly negative
/// exponents; unsigned word types yield ordinary monomials.
///
/// Invariant: the word is always a valid packed encoding for the monomial's
/// arity (in particular, an arity-0 monomial has a zero word). All
/// constructors enforce this, which is what lets the accessors unpack
/// without re-validating.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PackedMonomial<T: Packable> {
    word: T,
}

impl<T: Packable> PackedMonomial<T> {
    /// Creates the unit monomial (all exponents zero) for any arity.
    #[must_use]
    pub fn unit(_arity: u32) -> Self {
        Self { word: T::zero() }
    }

    /// Creates a monomial from an exponent vector; the vector length is the
    /// arity.
    ///
    /// # Errors
    ///
    /// Returns an error when the arity exceeds the word capacity or an
    /// exponent lies outside the per-slot range.
    pub fn from_exponents(exponents: &[T]) -> Result<Self, PackError> {
        Ok(Self {
            word: pack_slice(exponents)?,
        })
    }

    /// Creates a monomial from an already packed word.
    ///
    /// # Errors
    ///
    /// Returns an error when the word is not a valid packed encoding for
    /// the given arity.
    pub fn from_word(word: T, arity: u32) -> Result<Self, PackError> {
        // Constructing the unpacker performs the full range validation.
        BitUnpacker::new(word, arity)?;
        Ok(Self { word })
    }

    /// Returns the packed word.
    #[must_use]
    pub fn word(&self) -> T {
        self.word
    }

    /// Projects the packed word onto 64 bits.
    ///
    /// Used both for hashing and for segment routing; the projection is
    /// additive, so the destination segment of a product can be computed
    /// from the operands alone.
    #[must_use]
    pub fn hash_word(&self) -> u64 {
        self.word.hash_word()
    }

    /// Returns true if all exponents are zero.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.word == T::zero()
    }

    /// Unpacks the exponent vector.
    ///
    /// # Panics
    ///
    /// Panics if `arity` is not the arity the monomial was created with.
    #[must_use]
    pub fn exponents(&self, arity: u32) -> SmallVec<[T; 8]> {
        unpack(self.word, arity).expect("packed word is valid for its arity")
    }

    /// Multiplies two monomials by adding their exponent vectors, checking
    /// every slot sum against the per-slot range.
    ///
    /// # Errors
    ///
    /// Returns an error when any slot sum escapes the representable range.
    pub fn checked_mul(&self, other: &Self, arity: u32) -> Result<Self, PackError> {
        let mut packer = BitPacker::new(arity)?;
        let mut lhs = BitUnpacker::new(self.word, arity)?;
        let mut rhs = BitUnpacker::new(other.word, arity)?;
        for _ in 0..arity {
            let a = lhs.pop()?;
            let b = rhs.pop()?;
            match a.checked_add(&b) {
                // The packer re-checks the sum against the slot range.
                Some(sum) => packer.push(sum)?,
                None => {
                    let (lo, hi) = T::slot_bounds(arity);
                    return Err(PackError::SlotOutOfRange {
                        value: format!("{a} + {b}"),
                        min: lo.to_string(),
                        max: hi.to_string(),
                    });
                }
            }
        }
        Ok(Self {
            word: packer.get()?,
        })
    }

    /// Multiplies two monomials by direct word addition.
    ///
    /// Only valid when every slot sum is known to stay in range, e.g. after
    /// the parallel multiplier's pre-check; otherwise slots bleed into their
    /// neighbours.
    #[must_use]
    pub fn mul_unchecked(&self, other: &Self) -> Self {
        Self {
            word: self.word.wrapping_add(&other.word),
        }
    }

    /// Computes the total degree as an arbitrary-precision integer.
    ///
    /// # Panics
    ///
    /// Panics if `arity` is not the arity the monomial was created with.
    #[must_use]
    pub fn degree(&self, arity: u32) -> Integer
    where
        T: Into<IBig>,
    {
        let mut sum = IBig::ZERO;
        for e in self.exponents(arity) {
            let e: IBig = e.into();
            sum += e;
        }
        Integer::from(sum)
    }

    /// Computes the partial degree over the given slot indices.
    ///
    /// # Panics
    ///
    /// Panics if `arity` is not the arity the monomial was created with, or
    /// if an index is out of bounds.
    #[must_use]
    pub fn partial_degree(&self, arity: u32, indices: &[usize]) -> Integer
    where
        T: Into<IBig>,
    {
        let exponents = self.exponents(arity);
        let mut sum = IBig::ZERO;
        for &i in indices {
            let e: IBig = exponents[i].into();
            sum += e;
        }
        Integer::from(sum)
    }

    /// Extends the monomial to a merged symbol set by interleaving zero
    /// exponents at the positions the insertion map dictates.
    ///
    /// Distinct monomials stay distinct under the same insertion map, and a
    /// non-unit monomial stays non-unit, because the original exponents are
    /// preserved in order.
    ///
    /// # Errors
    ///
    /// Returns an error when the merged arity exceeds the word capacity or
    /// an existing exponent no longer fits the narrower slots.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge_symbols(&self, ins_map: &InsertionMap, arity: u32) -> Result<Self, PackError> {
        let exponents = self.exponents(arity);
        let mut packer = BitPacker::new(arity + ins_map.inserted() as u32)?;
        let mut entries = ins_map.iter().peekable();
        for i in 0..=arity as usize {
            if let Some(&(idx, names)) = entries.peek() {
                debug_assert!(idx <= arity as usize, "insertion past the end of the set");
                if idx == i {
                    for _ in names {
                        packer.push(T::zero())?;
                    }
                    entries.next();
                }
            }
            if i < arity as usize {
                packer.push(exponents[i])?;
            }
        }
        Ok(Self {
            word: packer.get()?,
        })
    }

    /// Renders the monomial against its symbol set, e.g. `x^2*z`.
    ///
    /// # Panics
    ///
    /// Panics if the symbol set's size is not the monomial's arity.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_pretty(&self, symbols: &SymbolSet) -> String {
        let exponents = self.exponents(symbols.len() as u32);
        let mut parts = Vec::new();
        for (name, &e) in symbols.iter().zip(exponents.iter()) {
            if e == T::zero() {
                continue;
            }
            if e == T::one() {
                parts.push(name.to_string());
            } else {
                parts.push(format!("{name}^{e}"));
            }
        }
        if parts.is_empty() {
            "1".to_string()
        } else {
            parts.join("*")
        }
    }
}

impl<T: Packable> Hash for PackedMonomial<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_word());
    }
}
