//! # noether-poly
//!
//! Sparse multivariate polynomials over bit-packed monomials.
//!
//! This crate provides:
//! - [`PackedMonomial`]: an exponent vector packed into one machine word,
//!   with overflow-checked multiplication and symbol-set merging
//! - [`Polynomial`]: an unordered (monomial, coefficient) collection over a
//!   named symbol set, stored in hash-map segments
//! - [`mul_simple`]: the single-threaded reference multiplier
//! - [`mul_mt_hm`]: the parallel segmented multiplier, which proves
//!   overflow-freedom up front and assembles per-segment hash maps on a
//!   rayon pool
//!
//! Both multipliers support truncation by partial degree: a bound `d`
//! together with a symbol subset `S` keeps exactly the product terms whose
//! degree restricted to `S` does not exceed `d`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod monomial;
pub mod multiply;
pub mod polynomial;

#[cfg(test)]
mod proptests;

pub use error::{ErrorKind, PolyError};
pub use monomial::PackedMonomial;
pub use multiply::{mul_mt_hm, mul_mt_hm_truncated, mul_simple, mul_simple_truncated};
pub use polynomial::{Polynomial, MAX_LOG2_SEGMENTS};
