//! # Noether
//!
//! A sparse multivariate polynomial algebra engine.
//!
//! Noether packs whole exponent vectors into single machine words and
//! multiplies polynomials over segmented hash tables, in parallel, with
//! exact overflow accounting.
//!
//! ## Features
//!
//! - **Bit-packed monomials**: range-checked encoding of signed or
//!   unsigned exponent vectors into one word; equality, hashing and
//!   multiplication are word operations
//! - **Segmented polynomials**: hash-map storage partitioned so worker
//!   threads own whole segments, no locks required
//! - **Truncated multiplication**: drop product terms beyond a partial
//!   degree bound before they are ever stored
//! - **Exact arithmetic**: arbitrary-precision integer and rational
//!   coefficients; degrees never overflow
//!
//! ## Quick start
//!
//! ```rust
//! use noether::prelude::*;
//!
//! let ss = SymbolSet::from_names(["x", "y"]);
//! let x = Polynomial::<i64, Z>::variable(ss.clone(), "x")?;
//! let y = Polynomial::<i64, Z>::variable(ss, "y")?;
//!
//! // (x + y)(x - y) = x^2 - y^2
//! let product = x.add(&y)?.mul(&x.sub(&y)?)?;
//! assert_eq!(product.len(), 2);
//! # Ok::<(), noether::poly::PolyError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use noether_integers as integers;
pub use noether_pack as pack;
pub use noether_poly as poly;
pub use noether_rings as rings;
pub use noether_symbols as symbols;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use noether_integers::{Integer, Rational};
    pub use noether_pack::{BitPacker, BitUnpacker, ErrorKind, Packable};
    pub use noether_poly::{
        mul_mt_hm, mul_mt_hm_truncated, mul_simple, mul_simple_truncated, PackedMonomial,
        PolyError, Polynomial,
    };
    pub use noether_rings::{Ring, Q, Z};
    pub use noether_symbols::{InsertionMap, SymbolSet};
}
