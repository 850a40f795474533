//! Property-based tests for the arithmetic wrappers.

use proptest::prelude::*;

use crate::{Integer, Rational};

fn small_integer() -> impl Strategy<Value = Integer> {
    any::<i64>().prop_map(Integer::new)
}

fn small_rational() -> impl Strategy<Value = Rational> {
    (-1000i64..1000, 1i64..1000).prop_map(|(n, d)| Rational::from_i64(n, d))
}

proptest! {
    #[test]
    fn integer_add_commutative(a in small_integer(), b in small_integer()) {
        prop_assert_eq!(a.clone() + b.clone(), b + a);
    }

    #[test]
    fn integer_mul_distributes(a in small_integer(), b in small_integer(), c in small_integer()) {
        let left = a.clone() * (b.clone() + c.clone());
        let right = a.clone() * b + a * c;
        prop_assert_eq!(left, right);
    }

    #[test]
    fn integer_neg_is_additive_inverse(a in small_integer()) {
        use num_traits::Zero;
        prop_assert!((a.clone() + (-a)).is_zero());
    }

    #[test]
    fn rational_add_commutative(a in small_rational(), b in small_rational()) {
        prop_assert_eq!(a.clone() + b.clone(), b + a);
    }

    #[test]
    fn rational_recip_involution(a in small_rational()) {
        use num_traits::Zero;
        prop_assume!(!a.is_zero());
        prop_assert_eq!(a.recip().recip(), a);
    }
}
