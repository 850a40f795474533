//! Range-checked packing and unpacking of integer vectors.

use num_traits::{One, WrappingAdd, WrappingSub, Zero};
use smallvec::SmallVec;

use crate::error::PackError;
use crate::packable::Packable;

/// Encodes an ordered sequence of integers into a single word.
///
/// A packer is constructed for a fixed arity `k`; exactly `k` values must be
/// pushed before the packed word can be fetched. Every pushed value is
/// checked against the per-slot range for that arity, so a successfully
/// packed word is always decodable.
///
/// ```
/// use noether_pack::BitPacker;
///
/// let mut packer = BitPacker::<i64>::new(3)?;
/// packer.push(-4)?;
/// packer.push(0)?;
/// packer.push(7)?;
/// let word = packer.get()?;
/// assert_eq!(noether_pack::unpack(word, 3)?.as_slice(), &[-4, 0, 7]);
/// # Ok::<(), noether_pack::PackError>(())
/// ```
#[derive(Clone, Debug)]
pub struct BitPacker<T: Packable> {
    value: T,
    min: T,
    max: T,
    index: u32,
    size: u32,
    pbits: u32,
    cur_shift: u32,
}

impl<T: Packable> BitPacker<T> {
    /// Creates a packer for `size` values.
    ///
    /// # Errors
    ///
    /// Returns an error when `size` exceeds the arity limit of the word
    /// type (`BITS` for unsigned words, `BITS - 1` for signed ones).
    pub fn new(size: u32) -> Result<Self, PackError> {
        if size > T::max_arity() {
            return Err(PackError::ArityTooLarge {
                arity: size,
                bits: T::BITS,
                max: T::max_arity(),
            });
        }
        let (min, max, pbits) = if size == 0 {
            (T::zero(), T::zero(), 0)
        } else {
            let (lo, hi) = T::slot_bounds(size);
            (lo, hi, T::slot_width(size))
        };
        Ok(Self {
            value: T::zero(),
            min,
            max,
            index: 0,
            size,
            pbits,
            cur_shift: 0,
        })
    }

    /// Appends the next value, in the least-to-most-significant direction.
    ///
    /// On error the packer state is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error when all `size` slots have already been filled, or
    /// when `n` lies outside the per-slot range.
    pub fn push(&mut self, n: T) -> Result<(), PackError> {
        if self.index == self.size {
            return Err(PackError::PackerFull { arity: self.size });
        }
        if n < self.min || n > self.max {
            return Err(PackError::SlotOutOfRange {
                value: n.to_string(),
                min: self.min.to_string(),
                max: self.max.to_string(),
            });
        }
        // The shift must not touch a signed value directly; build the slot
        // unit in the unsigned twin and multiply in the word type. Wrapping
        // ops keep the two's complement encoding well-defined.
        let unit = T::from_unsigned(T::Unsigned::one() << self.cur_shift as usize);
        self.value = self.value.wrapping_add(&n.wrapping_mul(&unit));
        self.index += 1;
        self.cur_shift += self.pbits;
        Ok(())
    }

    /// Returns the packed word.
    ///
    /// # Errors
    ///
    /// Returns an error when fewer than `size` values have been pushed.
    pub fn get(&self) -> Result<T, PackError> {
        if self.index < self.size {
            return Err(PackError::PackerIncomplete {
                pushed: self.index,
                arity: self.size,
            });
        }
        Ok(self.value)
    }
}

/// Decodes a packed word back into its constituent values.
///
/// The word is validated against the representable range for the requested
/// arity at construction time, so popping cannot produce values that no
/// packer could have encoded.
#[derive(Clone, Debug)]
pub struct BitUnpacker<T: Packable> {
    // Unsigned decoding state: the remaining word and the slot mask.
    value: T,
    mask: T,
    // Signed decoding state: the word shifted into unsigned space and the
    // unsigned view of the slot minimum.
    shifted: T::Unsigned,
    min_u: T::Unsigned,
    index: u32,
    size: u32,
    pbits: u32,
    cur_shift: u32,
}

impl<T: Packable> BitUnpacker<T> {
    /// Creates an unpacker for the word `n` at the given arity.
    ///
    /// # Errors
    ///
    /// Returns an error when `size` exceeds the arity limit of the word
    /// type, when `size` is zero but `n` is not, or when `n` lies outside
    /// the representable packed range for `size`.
    pub fn new(n: T, size: u32) -> Result<Self, PackError> {
        if size > T::max_arity() {
            return Err(PackError::ArityTooLarge {
                arity: size,
                bits: T::BITS,
                max: T::max_arity(),
            });
        }

        let mut state = Self {
            value: T::zero(),
            mask: T::zero(),
            shifted: T::Unsigned::zero(),
            min_u: T::Unsigned::zero(),
            index: 0,
            size,
            pbits: 0,
            cur_shift: 0,
        };

        if size == 0 {
            if n != T::zero() {
                return Err(PackError::NonZeroAtArityZero {
                    value: n.to_string(),
                });
            }
            return Ok(state);
        }

        let (wmin, wmax) = T::packed_bounds(size);
        if n < wmin || n > wmax {
            return Err(PackError::WordOutOfRange {
                value: n.to_string(),
                arity: size,
                min: wmin.to_string(),
                max: wmax.to_string(),
            });
        }

        if T::SIGNED {
            if size == 1 {
                // Leave the shift state zeroed and stash the word itself as
                // the slot minimum: the single pop then returns it without
                // any full-width shifting.
                state.min_u = n.to_unsigned();
            } else {
                let (lo, _) = T::slot_bounds(size);
                state.pbits = T::slot_width(size);
                state.min_u = lo.to_unsigned();
                state.shifted = n.to_unsigned().wrapping_sub(&wmin.to_unsigned());
            }
        } else {
            let pbits = T::slot_width(size);
            state.mask = T::max_value() >> (T::BITS - pbits) as usize;
            state.value = n;
            // For a single slot the pop below would otherwise shift by the
            // full word width, which is undefined; the mask already covers
            // the whole word, so no shift is needed at all.
            if size > 1 {
                state.pbits = pbits;
            }
        }

        Ok(state)
    }

    /// Extracts the next value, in the order they were packed.
    ///
    /// # Errors
    ///
    /// Returns an error when all `size` values have been popped.
    pub fn pop(&mut self) -> Result<T, PackError> {
        if self.index == self.size {
            return Err(PackError::UnpackerExhausted { arity: self.size });
        }

        let out = if T::SIGNED {
            // ((shifted mod 2^(s+p)) / 2^s) + lo, all in unsigned space.
            let one = T::Unsigned::one();
            let window = (one << (self.cur_shift + self.pbits) as usize) - one;
            let slot = (self.shifted & window) >> self.cur_shift as usize;
            T::from_unsigned(slot.wrapping_add(&self.min_u))
        } else {
            let out = self.value & self.mask;
            self.value = self.value >> self.pbits as usize;
            out
        };

        self.index += 1;
        self.cur_shift += self.pbits;
        Ok(out)
    }
}

/// Packs a slice of values into a word, with the slice length as arity.
///
/// # Errors
///
/// Propagates any packer construction or range error.
#[allow(clippy::cast_possible_truncation)]
pub fn pack_slice<T: Packable>(values: &[T]) -> Result<T, PackError> {
    let mut packer = BitPacker::new(values.len() as u32)?;
    for &v in values {
        packer.push(v)?;
    }
    packer.get()
}

/// Unpacks a word into its `arity` values.
///
/// # Errors
///
/// Propagates any unpacker construction or range error.
pub fn unpack<T: Packable>(word: T, arity: u32) -> Result<SmallVec<[T; 8]>, PackError> {
    let mut unpacker = BitUnpacker::new(word, arity)?;
    let mut out = SmallVec::with_capacity(arity as usize);
    for _ in 0..arity {
        out.push(unpacker.pop()?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_round_trip_unsigned() {
        let word = pack_slice::<u64>(&[1, 2, 3]).unwrap();
        assert_eq!(unpack(word, 3).unwrap().as_slice(), &[1, 2, 3]);

        let word = pack_slice::<u32>(&[7]).unwrap();
        assert_eq!(word, 7);
        assert_eq!(unpack(word, 1).unwrap().as_slice(), &[7]);
    }

    #[test]
    fn test_round_trip_signed() {
        let word = pack_slice::<i64>(&[-1, 0, 5]).unwrap();
        assert_eq!(unpack(word, 3).unwrap().as_slice(), &[-1, 0, 5]);

        // A single slot uses the full range.
        for v in [i64::MIN, -1, 0, 1, i64::MAX] {
            let word = pack_slice::<i64>(&[v]).unwrap();
            assert_eq!(unpack(word, 1).unwrap().as_slice(), &[v]);
        }
    }

    #[test]
    fn test_round_trip_extremes() {
        for arity in 1u32..=8 {
            let (lo, hi) = i64::slot_bounds(arity);
            let mins = vec![lo; arity as usize];
            let maxs = vec![hi; arity as usize];
            assert_eq!(
                unpack(pack_slice::<i64>(&mins).unwrap(), arity)
                    .unwrap()
                    .as_slice(),
                mins.as_slice()
            );
            assert_eq!(
                unpack(pack_slice::<i64>(&maxs).unwrap(), arity)
                    .unwrap()
                    .as_slice(),
                maxs.as_slice()
            );
        }
    }

    #[test]
    fn test_round_trip_u128() {
        let values: [u128; 5] = [1, 1 << 20, 3, 0, 42];
        let word = pack_slice::<u128>(&values).unwrap();
        assert_eq!(unpack(word, 5).unwrap().as_slice(), &values);
    }

    #[test]
    fn test_arity_limits() {
        assert!(BitPacker::<u64>::new(64).is_ok());
        assert_eq!(
            BitPacker::<u64>::new(65).unwrap_err().kind(),
            ErrorKind::Overflow
        );
        assert!(BitPacker::<i64>::new(63).is_ok());
        assert_eq!(
            BitPacker::<i64>::new(64).unwrap_err().kind(),
            ErrorKind::Overflow
        );
        assert_eq!(
            BitUnpacker::<i64>::new(0, 64).unwrap_err().kind(),
            ErrorKind::Overflow
        );
    }

    #[test]
    fn test_push_out_of_range_leaves_state_unchanged() {
        let mut packer = BitPacker::<i64>::new(3).unwrap();
        packer.push(5).unwrap();

        let (_, hi) = i64::slot_bounds(3);
        let err = packer.push(hi + 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);

        // The failed push must not have consumed a slot.
        packer.push(6).unwrap();
        packer.push(7).unwrap();
        let word = packer.get().unwrap();
        assert_eq!(unpack(word, 3).unwrap().as_slice(), &[5, 6, 7]);
    }

    #[test]
    fn test_push_past_arity() {
        let mut packer = BitPacker::<u32>::new(1).unwrap();
        packer.push(9).unwrap();
        assert_eq!(packer.push(9).unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_get_before_complete() {
        let mut packer = BitPacker::<u64>::new(2).unwrap();
        packer.push(1).unwrap();
        assert_eq!(packer.get().unwrap_err().kind(), ErrorKind::OutOfRange);
        packer.push(2).unwrap();
        assert!(packer.get().is_ok());
    }

    #[test]
    fn test_zero_arity() {
        // Packing nothing yields the zero word.
        let packer = BitPacker::<i64>::new(0).unwrap();
        assert_eq!(packer.get().unwrap(), 0);

        // Only the zero word can be unpacked at arity 0.
        assert!(BitUnpacker::<i64>::new(0, 0).is_ok());
        assert_eq!(
            BitUnpacker::<i64>::new(1, 0).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_unpacker_word_range() {
        // 3 slots of 21 bits leave the top bit of a u64 unused.
        let err = BitUnpacker::<u64>::new(u64::MAX, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);

        let (wmin, wmax) = i64::packed_bounds(2);
        assert!(BitUnpacker::<i64>::new(wmin, 2).is_ok());
        assert!(BitUnpacker::<i64>::new(wmax, 2).is_ok());
        assert_eq!(
            BitUnpacker::<i64>::new(wmax + 1, 2).unwrap_err().kind(),
            ErrorKind::Overflow
        );
        assert_eq!(
            BitUnpacker::<i64>::new(wmin - 1, 2).unwrap_err().kind(),
            ErrorKind::Overflow
        );
    }

    #[test]
    fn test_pop_past_arity() {
        let word = pack_slice::<u64>(&[3, 4]).unwrap();
        let mut unpacker = BitUnpacker::new(word, 2).unwrap();
        unpacker.pop().unwrap();
        unpacker.pop().unwrap();
        assert_eq!(unpacker.pop().unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_packed_addition_matches_vector_addition() {
        // With all slot sums in range, word addition is exponent addition.
        let a = pack_slice::<i64>(&[1, -2, 3]).unwrap();
        let b = pack_slice::<i64>(&[4, 5, -6]).unwrap();
        let sum = a.wrapping_add(b);
        assert_eq!(unpack(sum, 3).unwrap().as_slice(), &[5, 3, -3]);
    }
}
