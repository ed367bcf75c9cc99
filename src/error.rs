//! Error type shared by the field, polynomial, and codec layers.

use std::fmt;

/// Everything that can go wrong in this crate.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Error {
    /// Encoder input longer than 223 bytes.
    InputTooLong,
    /// Verifier/decoder input that isn't exactly 255 bytes.
    InputLengthInvalid,
    /// An integer outside 0..=255 was narrowed into a field element.
    FieldDomain,
    /// Division by the zero polynomial, or field inverse of zero.
    ZeroDivision,
    /// More than 16 byte positions were corrupted; the codeword could not
    /// be corrected.
    Uncorrectable,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InputTooLong => write!(f, "message is longer than 223 bytes"),
            Error::InputLengthInvalid => write!(f, "codeword is not exactly 255 bytes"),
            Error::FieldDomain => write!(f, "value is outside the range 0..=255"),
            Error::ZeroDivision => write!(f, "division by zero"),
            Error::Uncorrectable => write!(f, "too many errors to correct"),
        }
    }
}

impl std::error::Error for Error {}
