//! Error types for polynomial operations.

use thiserror::Error;

pub use noether_pack::ErrorKind;
use noether_pack::PackError;

/// An error raised by polynomial construction or multiplication.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum PolyError {
    /// A packing codec error, surfaced unchanged.
    #[error(transparent)]
    Pack(#[from] PackError),

    /// Two polynomials that must share a symbol set do not.
    #[error("the symbol sets {left} and {right} do not match")]
    SymbolSetMismatch {
        /// Symbol set of the first operand.
        left: String,
        /// Symbol set of the second operand.
        right: String,
    },

    /// The destination of a multiplication already contains terms.
    #[error("the destination polynomial of a multiplication must be empty")]
    NonEmptyDestination,

    /// A configuration change was attempted on a non-empty polynomial.
    #[error("{operation} is only allowed on an empty polynomial")]
    NonEmptyMutation {
        /// The rejected operation.
        operation: &'static str,
    },

    /// A generator name was requested that the symbol set does not contain.
    #[error("cannot create a polynomial with symbol set {symbol_set} from the generator '{generator}': the generator is not in the symbol set")]
    UnknownGenerator {
        /// The requested generator.
        generator: String,
        /// The symbol set it was requested from.
        symbol_set: String,
    },

    /// The multiplier pre-check found an exponent slot whose sums cannot be
    /// represented.
    #[error("the product would overflow the exponent range [{min}, {max}] at slot {slot}")]
    ProductOverflow {
        /// Index of the offending slot.
        slot: usize,
        /// Smallest allowed slot value.
        min: String,
        /// Largest allowed slot value.
        max: String,
    },

    /// A segment count beyond the supported maximum was requested.
    #[error("cannot use 2^{requested} segments: the maximum is 2^{max}")]
    SegmentCountTooLarge {
        /// The requested log2 segment count.
        requested: u32,
        /// The largest supported log2 segment count.
        max: u32,
    },
}

impl PolyError {
    /// Returns the coarse kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            PolyError::Pack(e) => e.kind(),
            PolyError::ProductOverflow { .. } => ErrorKind::Overflow,
            PolyError::SymbolSetMismatch { .. }
            | PolyError::NonEmptyDestination
            | PolyError::NonEmptyMutation { .. }
            | PolyError::UnknownGenerator { .. }
            | PolyError::SegmentCountTooLarge { .. } => ErrorKind::InvalidArgument,
        }
    }
}
