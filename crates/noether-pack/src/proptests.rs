//! Property-based tests for the packing codec.

use proptest::prelude::*;

use crate::packable::Packable;
use crate::packer::{pack_slice, unpack, BitPacker};

// Strategy for an arity and a vector of in-range signed slot values.
fn signed_vector() -> impl Strategy<Value = (u32, Vec<i64>)> {
    (1u32..=10).prop_flat_map(|arity| {
        let (lo, hi) = i64::slot_bounds(arity);
        (
            Just(arity),
            proptest::collection::vec(lo..=hi, arity as usize),
        )
    })
}

fn unsigned_vector() -> impl Strategy<Value = (u32, Vec<u64>)> {
    (1u32..=10).prop_flat_map(|arity| {
        let (_, hi) = u64::slot_bounds(arity);
        (
            Just(arity),
            proptest::collection::vec(0..=hi, arity as usize),
        )
    })
}

proptest! {
    #[test]
    fn round_trip_signed((arity, values) in signed_vector()) {
        let word = pack_slice::<i64>(&values).unwrap();
        prop_assert_eq!(unpack(word, arity).unwrap().to_vec(), values);
    }

    #[test]
    fn round_trip_unsigned((arity, values) in unsigned_vector()) {
        let word = pack_slice::<u64>(&values).unwrap();
        prop_assert_eq!(unpack(word, arity).unwrap().to_vec(), values);
    }

    #[test]
    fn out_of_range_push_always_fails((arity, values) in signed_vector()) {
        // Re-pack the vector but smuggle one value past the slot maximum.
        let (_, hi) = i64::slot_bounds(arity);
        prop_assume!(hi < i64::MAX);
        let mut packer = BitPacker::<i64>::new(arity).unwrap();
        for &v in &values[..values.len() - 1] {
            packer.push(v).unwrap();
        }
        prop_assert!(packer.push(hi + 1).is_err());
        // The slot is still usable after the rejected push.
        prop_assert!(packer.push(values[values.len() - 1]).is_ok());
        prop_assert!(packer.get().is_ok());
    }

    #[test]
    fn word_addition_is_vector_addition(
        (arity, a) in signed_vector(),
        seed in proptest::num::u64::ANY,
    ) {
        // Derive a second vector whose element-wise sum with `a` stays in
        // range, then check that adding the packed words adds the vectors.
        // Arity 1 is excluded: its slot range is the full i64 range, so the
        // sums below could not be formed without wrapping.
        prop_assume!(arity >= 2);
        let (lo, hi) = i64::slot_bounds(arity);
        let b: Vec<i64> = a
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let r = (seed.rotate_left(i as u32) % 7) as i64;
                (r - 3).clamp(lo - v.min(0), hi - v.max(0))
            })
            .collect();
        let sums: Vec<i64> = a.iter().zip(&b).map(|(&x, &y)| x + y).collect();
        prop_assume!(sums.iter().all(|s| (lo..=hi).contains(s)));

        let wa = pack_slice::<i64>(&a).unwrap();
        let wb = pack_slice::<i64>(&b).unwrap();
        prop_assert_eq!(unpack(wa.wrapping_add(wb), arity).unwrap().to_vec(), sums);
    }
}
