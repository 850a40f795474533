//! # noether-pack
//!
//! Bit packing of small integer vectors into single machine words.
//!
//! This crate provides the codec underlying packed monomials:
//! - [`BitPacker`] encodes an ordered sequence of `k` integers, each
//!   range-checked against the per-slot bounds for arity `k`, into one word
//! - [`BitUnpacker`] decodes a packed word back into its `k` values,
//!   validating the word against the per-arity representable range
//!
//! Both signed and unsigned words are supported (`i32`/`u32`, `i64`/`u64`,
//! `i128`/`u128`), abstracted by the [`Packable`] trait. Signed values use
//! two's complement encoding; for arities of two or more, one bit of the
//! word is deliberately left unused so that packed words of valid vectors
//! can be added without overflowing the word type.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod packable;
pub mod packer;

#[cfg(test)]
mod proptests;

pub use error::{ErrorKind, PackError};
pub use packable::Packable;
pub use packer::{pack_slice, unpack, BitPacker, BitUnpacker};
