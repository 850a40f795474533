//! Approximate real coefficients.
//!
//! `f64` qualifies as a coefficient ring with the caveat spelled out on
//! [`Ring`]: terms are only removed when a coefficient sum is exactly zero,
//! so cancellation is not guaranteed to shrink a polynomial.

use crate::traits::Ring;

impl Ring for f64 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn is_one(&self) -> bool {
        *self == 1.0
    }
}
