//! Error types for the packing codec.

use thiserror::Error;

/// Coarse classification of a [`PackError`].
///
/// Every error variant maps to one of three kinds, which callers can use to
/// react uniformly without matching on the detailed variant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind {
    /// A value or word escaped its representable range.
    Overflow,
    /// An operation was attempted past the configured arity.
    OutOfRange,
    /// A precondition on the arguments was violated.
    InvalidArgument,
}

/// An error raised by [`BitPacker`](crate::BitPacker) or
/// [`BitUnpacker`](crate::BitUnpacker).
///
/// Variants carry the offending values and the allowed ranges as strings so
/// that messages stay diagnosable for any word type.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum PackError {
    /// The requested arity does not fit the word type.
    #[error("a {bits}-bit word cannot hold {arity} packed values (maximum arity is {max})")]
    ArityTooLarge {
        /// The requested arity.
        arity: u32,
        /// Value bits of the word type.
        bits: u32,
        /// Largest arity the word type supports.
        max: u32,
    },

    /// A pushed value lies outside the per-slot range for the current arity.
    #[error("cannot pack {value}: outside the allowed slot range [{min}, {max}]")]
    SlotOutOfRange {
        /// The rejected value.
        value: String,
        /// Smallest allowed slot value.
        min: String,
        /// Largest allowed slot value.
        max: String,
    },

    /// More values were pushed than the packer was sized for.
    #[error("cannot pack any more values: all {arity} slots have been filled")]
    PackerFull {
        /// The configured arity.
        arity: u32,
    },

    /// The packed word was requested before all slots were filled.
    #[error("cannot fetch the packed word: only {pushed} of {arity} values have been pushed")]
    PackerIncomplete {
        /// Number of values pushed so far.
        pushed: u32,
        /// The configured arity.
        arity: u32,
    },

    /// A word outside the decodable range was passed to an unpacker.
    #[error("the word {value} cannot be decoded at arity {arity}: outside the representable range [{min}, {max}]")]
    WordOutOfRange {
        /// The rejected word.
        value: String,
        /// The unpacker arity.
        arity: u32,
        /// Smallest decodable word.
        min: String,
        /// Largest decodable word.
        max: String,
    },

    /// A non-zero word was passed to an arity-0 unpacker.
    #[error("only a zero word can be unpacked at arity 0, but {value} was provided")]
    NonZeroAtArityZero {
        /// The rejected word.
        value: String,
    },

    /// More values were popped than the unpacker holds.
    #[error("cannot unpack any more values: all {arity} slots have been consumed")]
    UnpackerExhausted {
        /// The configured arity.
        arity: u32,
    },
}

impl PackError {
    /// Returns the coarse kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            PackError::ArityTooLarge { .. }
            | PackError::SlotOutOfRange { .. }
            | PackError::WordOutOfRange { .. } => ErrorKind::Overflow,
            PackError::PackerFull { .. }
            | PackError::PackerIncomplete { .. }
            | PackError::UnpackerExhausted { .. } => ErrorKind::OutOfRange,
            PackError::NonZeroAtArityZero { .. } => ErrorKind::InvalidArgument,
        }
    }
}
