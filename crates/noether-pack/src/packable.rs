//! The [`Packable`] word abstraction.
//!
//! Only full-width machine integers are packable; smaller types would be
//! subject to integral promotion surprises and are not worth supporting.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use num_traits::{CheckedAdd, PrimInt, WrappingAdd, WrappingMul, WrappingSub};

/// A machine integer usable as a packed word.
///
/// Implemented for `i32`, `u32`, `i64`, `u64`, `i128` and `u128`. The trait
/// exposes the per-arity geometry of the packed encoding: how many bits each
/// slot receives, the range a single slot value may take, and the range the
/// packed word itself may take.
///
/// For signed words and arities of two or more, the slot width is reduced so
/// that at least one bit of the word stays unused. This guarantees that the
/// packed words of two valid exponent vectors can be added (in two's
/// complement) without overflowing the word type, which both the packing
/// accumulator and monomial multiplication rely on.
pub trait Packable:
    PrimInt
    + WrappingAdd
    + WrappingSub
    + WrappingMul
    + CheckedAdd
    + Hash
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + 'static
{
    /// The unsigned twin of this word type (`Self` for unsigned types).
    ///
    /// Shifts during packing and unpacking are laundered through this type
    /// so that no signed value is ever shifted directly.
    type Unsigned: PrimInt
        + WrappingAdd
        + WrappingSub
        + Hash
        + Debug
        + Send
        + Sync
        + 'static;

    /// Number of value bits (including the sign bit for signed types).
    const BITS: u32;

    /// Whether this word type is signed.
    const SIGNED: bool;

    /// Reinterprets the bits of this word as its unsigned twin.
    fn to_unsigned(self) -> Self::Unsigned;

    /// Reinterprets the bits of an unsigned twin value as this word type.
    fn from_unsigned(u: Self::Unsigned) -> Self;

    /// Projects the word onto 64 bits for hashing and segment routing.
    ///
    /// The projection is additive modulo 2^64: for words `a`, `b`,
    /// `hash_word(a + b) == hash_word(a).wrapping_add(hash_word(b))`
    /// whenever `a + b` is computed with wrapping word arithmetic.
    fn hash_word(self) -> u64;

    /// The smallest and largest packed word representing a vector of the
    /// given arity.
    ///
    /// These are the packed encodings of `arity` copies of the slot minimum
    /// (resp. maximum); any valid packed word lies between them. For signed
    /// types the values come from a compile-time constant table.
    ///
    /// `arity` must be between 1 and [`max_arity`](Packable::max_arity).
    fn packed_bounds(arity: u32) -> (Self, Self);

    /// The largest arity this word type can hold.
    #[must_use]
    fn max_arity() -> u32 {
        if Self::SIGNED {
            Self::BITS - 1
        } else {
            Self::BITS
        }
    }

    /// Number of bits available to each slot at the given arity.
    ///
    /// `arity` must be between 1 and [`max_arity`](Packable::max_arity).
    #[must_use]
    fn slot_width(arity: u32) -> u32 {
        debug_assert!(arity >= 1 && arity <= Self::max_arity());
        if Self::SIGNED {
            if arity == 1 {
                // A single slot uses the full width of the word.
                Self::BITS
            } else {
                Self::BITS / arity - u32::from(Self::BITS % arity == 0)
            }
        } else {
            Self::BITS / arity
        }
    }

    /// The range a single slot value may take at the given arity.
    ///
    /// `arity` must be between 1 and [`max_arity`](Packable::max_arity).
    #[must_use]
    fn slot_bounds(arity: u32) -> (Self, Self) {
        debug_assert!(arity >= 1 && arity <= Self::max_arity());
        if Self::SIGNED {
            if arity == 1 {
                (Self::min_value(), Self::max_value())
            } else {
                let p = Self::slot_width(arity);
                let half = Self::one() << (p - 1) as usize;
                (Self::zero().wrapping_sub(&half), half - Self::one())
            }
        } else {
            let p = Self::slot_width(arity);
            (Self::zero(), Self::max_value() >> (Self::BITS - p) as usize)
        }
    }
}

macro_rules! packable_unsigned {
    ($t:ty) => {
        impl Packable for $t {
            type Unsigned = $t;

            const BITS: u32 = <$t>::BITS;
            const SIGNED: bool = false;

            #[inline]
            fn to_unsigned(self) -> $t {
                self
            }

            #[inline]
            fn from_unsigned(u: $t) -> Self {
                u
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn hash_word(self) -> u64 {
                self as u64
            }

            fn packed_bounds(arity: u32) -> (Self, Self) {
                debug_assert!(arity >= 1 && arity <= Self::max_arity());
                // The decodable words are exactly those whose bits above
                // slot_width * arity are all zero.
                (0, <$t>::MAX >> (<$t>::BITS % arity))
            }
        }
    };
}

macro_rules! packable_signed {
    ($t:ty, $u:ty) => {
        impl Packable for $t {
            type Unsigned = $u;

            const BITS: u32 = <$t>::BITS;
            const SIGNED: bool = true;

            #[inline]
            #[allow(clippy::cast_sign_loss)]
            fn to_unsigned(self) -> $u {
                self as $u
            }

            #[inline]
            #[allow(clippy::cast_possible_wrap)]
            fn from_unsigned(u: $u) -> Self {
                u as $t
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            fn hash_word(self) -> u64 {
                self as u64
            }

            fn packed_bounds(arity: u32) -> (Self, Self) {
                debug_assert!(arity >= 1 && arity <= Self::max_arity());
                // Packed encodings of `arity` copies of the slot minimum and
                // maximum, for every arity this word type supports.
                const TABLE: [[$t; 2]; (<$t>::BITS - 1) as usize] = {
                    let nbits = <$t>::BITS;
                    let mut table = [[0; 2]; (<$t>::BITS - 1) as usize];
                    table[0] = [<$t>::MIN, <$t>::MAX];
                    let mut k = 2u32;
                    while k < nbits {
                        let pbits = nbits / k - (nbits % k == 0) as u32;
                        let lo: $t = -((1 as $t) << (pbits - 1));
                        let hi: $t = ((1 as $t) << (pbits - 1)) - 1;
                        let mut min_w: $t = 0;
                        let mut max_w: $t = 0;
                        let mut j = 0u32;
                        while j < k {
                            let unit = ((1 as $u) << (j * pbits)) as $t;
                            min_w += lo * unit;
                            max_w += hi * unit;
                            j += 1;
                        }
                        table[(k - 1) as usize] = [min_w, max_w];
                        k += 1;
                    }
                    table
                };
                let [lo, hi] = TABLE[(arity - 1) as usize];
                (lo, hi)
            }
        }
    };
}

packable_unsigned!(u32);
packable_unsigned!(u64);
packable_unsigned!(u128);
packable_signed!(i32, u32);
packable_signed!(i64, u64);
packable_signed!(i128, u128);
