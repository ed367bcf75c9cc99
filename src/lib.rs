//! A Reed-Solomon RS(255, 223) codec over GF(2^8): 223 data bytes in, a
//! 255-byte codeword out, correcting up to 16 corrupted byte positions per
//! codeword.
//!
//! ```
//! use reed_solomon_255_223::reed_solomon::{decode, encode, DecodeOptions};
//!
//! let message = b"a message of up to 223 bytes";
//! let mut codeword = encode(message).unwrap();
//! codeword[3] ^= 0xff; // simulate a corrupted byte
//!
//! let corrected = decode(&codeword, DecodeOptions::default()).unwrap();
//! assert_eq!(corrected, message);
//! ```

pub mod error;
pub mod galois_field;
pub mod polynomial;
pub mod reed_solomon;

pub use error::Error;
