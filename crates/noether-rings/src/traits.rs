//! Algebraic structure traits.

use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

/// A commutative ring, the coefficient interface of the polynomial engine.
///
/// # Laws
///
/// - Addition is associative and commutative with identity `zero()`
/// - Multiplication is associative and commutative with identity `one()`
/// - Multiplication distributes over addition
/// - Every element has an additive inverse (`neg`)
///
/// Commutativity and associativity of addition matter operationally: the
/// multipliers accumulate coefficient sums in an unspecified order, so any
/// implementation violating them would produce nondeterministic results.
///
/// Approximate types may implement this trait (`f64` does); for them,
/// "combining to zero removes the term" weakens to "combining to exact
/// zero removes the term", which is why equality here is only `PartialEq`.
pub trait Ring:
    Clone + PartialEq + Debug + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Neg<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// Returns true if this is the additive identity.
    fn is_zero(&self) -> bool;

    /// Returns true if this is the multiplicative identity.
    fn is_one(&self) -> bool;
}

#[cfg(test)]
mod tests {
    // Concrete implementations are tested in their own modules.
}
