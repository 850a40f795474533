//! Property-based tests for the multiplication kernels.

use proptest::prelude::*;

use noether_integers::Integer;
use noether_rings::Z;
use noether_symbols::SymbolSet;

use crate::monomial::PackedMonomial;
use crate::multiply::{mul_mt_hm, mul_mt_hm_truncated, mul_simple, mul_simple_truncated};
use crate::polynomial::Polynomial;

type Poly = Polynomial<i64, Z>;

fn symbol_set() -> SymbolSet {
    SymbolSet::from_names(["x", "y", "z"])
}

// Strategy for small random polynomials over Z in three variables.
fn small_poly() -> impl Strategy<Value = Poly> {
    proptest::collection::vec(((0i64..6, 0i64..6, 0i64..6), -10i64..10), 0..12).prop_map(
        |terms| {
            let mut poly = Poly::new(symbol_set());
            for ((a, b, c), coefficient) in terms {
                let monomial = PackedMonomial::from_exponents(&[a, b, c]).unwrap();
                poly.insert_or_accumulate(monomial, Z::new(coefficient));
            }
            poly
        },
    )
}

fn truncation_symbols() -> impl Strategy<Value = SymbolSet> {
    proptest::sample::subsequence(vec!["x", "y", "z"], 1..=3).prop_map(SymbolSet::from_names)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn kernels_agree(f in small_poly(), g in small_poly()) {
        let mut simple = Poly::new(symbol_set());
        mul_simple(&mut simple, &f, &g).unwrap();
        let mut parallel = Poly::new(symbol_set());
        mul_mt_hm(&mut parallel, &f, &g).unwrap();
        prop_assert_eq!(simple, parallel);
    }

    #[test]
    fn kernels_agree_truncated(
        f in small_poly(),
        g in small_poly(),
        d in -2i64..12,
        over in truncation_symbols(),
    ) {
        let bound = Integer::new(d);
        let mut simple = Poly::new(symbol_set());
        mul_simple_truncated(&mut simple, &f, &g, &bound, Some(&over)).unwrap();
        let mut parallel = Poly::new(symbol_set());
        mul_mt_hm_truncated(&mut parallel, &f, &g, &bound, Some(&over)).unwrap();
        prop_assert_eq!(simple, parallel);
    }

    #[test]
    fn truncation_is_a_degree_filter(
        f in small_poly(),
        g in small_poly(),
        d in -2i64..12,
        over in truncation_symbols(),
    ) {
        let bound = Integer::new(d);
        let mut full = Poly::new(symbol_set());
        mul_simple(&mut full, &f, &g).unwrap();
        let mut truncated = Poly::new(symbol_set());
        mul_simple_truncated(&mut truncated, &f, &g, &bound, Some(&over)).unwrap();

        // The truncated product is exactly the bounded subset of the full
        // product.
        let indices = symbol_set().intersection_indices(&over);
        let mut filtered = Poly::new(symbol_set());
        for (monomial, coefficient) in full.iter() {
            if monomial.partial_degree(3, &indices) <= bound {
                filtered.insert_or_accumulate(*monomial, coefficient.clone());
            }
        }
        prop_assert_eq!(truncated, filtered);
    }

    #[test]
    fn truncation_is_monotone(
        f in small_poly(),
        g in small_poly(),
        d in 0i64..10,
        over in truncation_symbols(),
    ) {
        let mut smaller = Poly::new(symbol_set());
        mul_mt_hm_truncated(&mut smaller, &f, &g, &Integer::new(d), Some(&over)).unwrap();
        let mut larger = Poly::new(symbol_set());
        mul_mt_hm_truncated(&mut larger, &f, &g, &Integer::new(d + 1), Some(&over)).unwrap();

        // Every term kept under the tighter bound survives the looser one.
        for (monomial, coefficient) in smaller.iter() {
            prop_assert_eq!(larger.get(monomial), Some(coefficient));
        }
    }

    #[test]
    fn preset_segment_layouts_match_simple(f in small_poly(), g in small_poly()) {
        let mut simple = Poly::new(symbol_set());
        mul_simple(&mut simple, &f, &g).unwrap();

        let mut single = Poly::new(symbol_set());
        single.set_n_segments(1).unwrap();
        mul_mt_hm(&mut single, &f, &g).unwrap();
        prop_assert_eq!(&simple, &single);

        let mut many = Poly::new(symbol_set());
        many.set_n_segments(6).unwrap();
        mul_mt_hm(&mut many, &f, &g).unwrap();
        prop_assert_eq!(&simple, &many);
    }

    #[test]
    fn multiplication_commutes(f in small_poly(), g in small_poly()) {
        let mut fg = Poly::new(symbol_set());
        mul_mt_hm(&mut fg, &f, &g).unwrap();
        let mut gf = Poly::new(symbol_set());
        mul_mt_hm(&mut gf, &g, &f).unwrap();
        prop_assert_eq!(fg, gf);
    }
}
