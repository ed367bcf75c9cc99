//! # Reed-Solomon RS(255, 223)
//!
//! Reed-Solomon codes are error-correcting codes that take k data symbols and
//! produce n > k coded symbols, such that the original k can be recovered
//! even if some of the n symbols are corrupted. This module implements the
//! classic RS(255, 223) code over GF(2^8): 223 data bytes in, 255 bytes out,
//! able to correct up to 16 corrupted byte positions per codeword.
//!
//! Encoding is systematic: the message bytes appear unchanged in the
//! codeword, followed by 32 parity bytes computed as the remainder of
//! dividing the (shifted) message polynomial by a fixed generator
//! polynomial whose roots are α^1..α^32. Decoding reverses this: it computes
//! syndromes (the received polynomial evaluated at each root of the
//! generator), runs the Berlekamp-Massey algorithm to find the error
//! locator and error evaluator polynomials, finds the roots of the locator
//! with a Chien search, and recovers the error magnitudes at those
//! positions with Forney's formula.

use std::sync::OnceLock;

use crate::error::Error;
use crate::galois_field::Gf256;
use crate::polynomial::Polynomial;

/// Data bytes per codeword.
pub const MESSAGE_LEN: usize = 223;
/// Parity bytes per codeword.
pub const PARITY_LEN: usize = 32;
/// Total bytes per codeword: `MESSAGE_LEN + PARITY_LEN`.
pub const CODEWORD_LEN: usize = MESSAGE_LEN + PARITY_LEN;
/// The most byte positions a single codeword can have corrupted and still
/// be correctable: `PARITY_LEN / 2`.
pub const MAX_CORRECTABLE_ERRORS: usize = PARITY_LEN / 2;

/// Knobs controlling how [`decode`] packages its result.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// By default, `decode` strips leading zero bytes from the 223-byte
    /// message slice — this is what lets a message shorter than 223 bytes
    /// round-trip back to its original, unpadded length, since `encode`
    /// left-pads it with zeros to fill the codeword. Set `no_strip` to skip
    /// that strip and get back all 223 bytes, leading zeros included: the
    /// only way to recover a message that is genuinely 223 bytes long and
    /// starts with a zero byte, which the default strip can't tell apart
    /// from `encode`'s own padding.
    pub no_strip: bool,
    /// Return the full 255-byte corrected codeword instead of the 223-byte
    /// message. Takes precedence over `no_strip`.
    pub return_full: bool,
}

/// `g(x) = product((x - alpha^i) for i in 1..=32)`, the generator whose
/// roots are the 32 consecutive powers of alpha used for both parity
/// computation and syndrome extraction. Built once and cached: computing it
/// involves 32 GF(2^8) polynomial multiplications, not expensive, but
/// there's no reason to redo it on every encode/decode call.
fn generator() -> &'static Polynomial<Gf256> {
    static GENERATOR: OnceLock<Polynomial<Gf256>> = OnceLock::new();
    GENERATOR.get_or_init(|| {
        let mut g = Polynomial::new([Gf256::ONE]);
        for i in 1..=PARITY_LEN as u8 {
            let root = Polynomial::new([Gf256::ONE, Gf256::GENERATOR.pow(i)]);
            g = g.mul(&root);
        }
        g
    })
}

fn to_polynomial(bytes: &[u8]) -> Polynomial<Gf256> {
    Polynomial::new(bytes.iter().map(|&b| Gf256::new(b)))
}

/// Left-pads a polynomial's coefficients out to `CODEWORD_LEN` bytes, the
/// byte at index 0 being the coefficient of `x^254`. Without this, a
/// codeword whose encoded polynomial happens to have a zero leading
/// coefficient would silently come out shorter than 255 bytes.
fn serialize(p: &Polynomial<Gf256>) -> [u8; CODEWORD_LEN] {
    let mut out = [0u8; CODEWORD_LEN];
    let coefficients = p.coefficients();
    let start = CODEWORD_LEN - coefficients.len();
    for (i, c) in coefficients.iter().enumerate() {
        out[start + i] = c.get();
    }
    out
}

/// Encodes a message of up to 223 bytes into its RS(255, 223) codeword
/// polynomial: `message(x) * x^32 - (message(x) * x^32 mod generator(x))`.
/// Exposed separately from [`encode`] for callers that want to keep working
/// in the polynomial domain (`decode` does, internally).
pub fn encode_polynomial(message: &[u8]) -> Result<Polynomial<Gf256>, Error> {
    if message.len() > MESSAGE_LEN {
        return Err(Error::InputTooLong);
    }
    let shifted = to_polynomial(message).mul(&Polynomial::monomial(Gf256::ONE, PARITY_LEN));
    let (_, remainder) = shifted.divmod(generator())?;
    Ok(shifted.sub(&remainder))
}

/// Encodes a message of up to 223 bytes into a 255-byte codeword.
pub fn encode(message: &[u8]) -> Result<[u8; CODEWORD_LEN], Error> {
    Ok(serialize(&encode_polynomial(message)?))
}

/// Checks whether a 255-byte codeword is free of detectable errors: it's
/// valid exactly when it's evenly divisible by the generator polynomial.
pub fn verify(codeword: &[u8]) -> Result<bool, Error> {
    if codeword.len() != CODEWORD_LEN {
        return Err(Error::InputLengthInvalid);
    }
    let (_, remainder) = to_polynomial(codeword).divmod(generator())?;
    Ok(remainder.is_zero())
}

/// `S_l = R(alpha^l)` for `l` in `1..=32`, returned with `S_1` at index 0.
/// This ascending-by-`l` order, rather than the descending order the
/// encode/verify path's [`Polynomial`] type uses, is the natural shape for
/// feeding the Berlekamp-Massey recurrence below.
fn syndromes(received: &Polynomial<Gf256>) -> Vec<Gf256> {
    (1..=PARITY_LEN as u8)
        .map(|l| received.evaluate(Gf256::GENERATOR.pow(l)))
        .collect()
}

fn ascending_add(a: &[Gf256], b: &[Gf256]) -> Vec<Gf256> {
    let n = a.len().max(b.len());
    (0..n)
        .map(|i| {
            let ai = a.get(i).copied().unwrap_or(Gf256::ZERO);
            let bi = b.get(i).copied().unwrap_or(Gf256::ZERO);
            ai + bi
        })
        .collect()
}

fn ascending_scale(a: &[Gf256], c: Gf256) -> Vec<Gf256> {
    a.iter().map(|&x| x * c).collect()
}

/// Multiplies by `z`: prepend a zero coefficient.
fn shift_up(a: &[Gf256]) -> Vec<Gf256> {
    let mut v = Vec::with_capacity(a.len() + 1);
    v.push(Gf256::ZERO);
    v.extend_from_slice(a);
    v
}

fn trim_trailing_zeros(mut a: Vec<Gf256>) -> Vec<Gf256> {
    while a.len() > 1 && *a.last().unwrap() == Gf256::ZERO {
        a.pop();
    }
    a
}

/// Coefficient of `z^k` in the product of two ascending-order polynomials.
fn conv_coeff(a: &[Gf256], b: &[Gf256], k: usize) -> Gf256 {
    let mut acc = Gf256::ZERO;
    for i in 0..=k {
        let ai = a.get(i).copied().unwrap_or(Gf256::ZERO);
        let bi = b.get(k - i).copied().unwrap_or(Gf256::ZERO);
        acc += ai * bi;
    }
    acc
}

fn ascending_to_polynomial(a: &[Gf256]) -> Polynomial<Gf256> {
    Polynomial::new(a.iter().rev().copied())
}

/// The Peterson-Gorenstein-Zierler form of Berlekamp-Massey: synthesizes
/// the error locator Λ and error evaluator Ω simultaneously from the 32
/// syndromes, via the auxiliary polynomials τ, γ and the discrepancy-based
/// state `(D, B)` that decides whether a given step keeps the current
/// locator (Rule A) or updates it (Rule B). `S_l` is `s[l - 1]`.
fn berlekamp_massey(s: &[Gf256]) -> (Polynomial<Gf256>, Polynomial<Gf256>) {
    let mut a = vec![Gf256::ZERO; PARITY_LEN + 1];
    a[0] = Gf256::ONE;
    a[1..=PARITY_LEN].copy_from_slice(s);

    let mut lambda = vec![Gf256::ONE];
    let mut omega = vec![Gf256::ONE];
    let mut tau = vec![Gf256::ONE];
    let mut gamma = vec![Gf256::ZERO];
    let mut d = 0usize;
    let mut b = false;

    for l in 0..PARITY_LEN {
        let target = l + 1;
        let delta = conv_coeff(&a, &lambda, target);

        let next_lambda = ascending_add(&lambda, &ascending_scale(&shift_up(&tau), delta));
        let next_omega = ascending_add(&omega, &ascending_scale(&shift_up(&gamma), delta));

        let rule_a = delta == Gf256::ZERO || 2 * d > target || (2 * d == target && !b);

        let (next_tau, next_gamma, next_d, next_b) = if rule_a {
            (shift_up(&tau), shift_up(&gamma), d, b)
        } else {
            let inv_delta = delta.inverse();
            (
                ascending_scale(&lambda, inv_delta),
                ascending_scale(&omega, inv_delta),
                target - d,
                !b,
            )
        };

        lambda = trim_trailing_zeros(next_lambda);
        omega = trim_trailing_zeros(next_omega);
        tau = next_tau;
        gamma = next_gamma;
        d = next_d;
        b = next_b;
    }

    (ascending_to_polynomial(&lambda), ascending_to_polynomial(&omega))
}

/// Brute-force search for the roots of the error locator: for each power
/// `l` in `1..=255`, `alpha^l` is a root exactly when byte position
/// `255 - l` (counted from the low-degree end) is in error. Returns the
/// inverse root `X_i = alpha^(-l)` and the corresponding position for each
/// root found.
fn chien_search(lambda: &Polynomial<Gf256>) -> (Vec<Gf256>, Vec<usize>) {
    let mut xs = Vec::new();
    let mut positions = Vec::new();
    for l in 1..=255u16 {
        let alpha_l = Gf256::GENERATOR.pow(l as u8);
        if lambda.evaluate(alpha_l) == Gf256::ZERO {
            xs.push(alpha_l.inverse());
            positions.push(255 - l as usize);
        }
    }
    (xs, positions)
}

/// Forney's formula: the error magnitude at each located position,
/// `Y_l = X_l * Ω(X_l^-1) * (product((X_l - X_i) for i != l))^-1 * X_l^16`.
/// The final `X_l^16` factor normalizes for this code's specific generator
/// (32 consecutive roots starting at alpha^1).
fn forney(xs: &[Gf256], omega: &Polynomial<Gf256>) -> Vec<Gf256> {
    xs.iter()
        .enumerate()
        .map(|(l, &xl)| {
            let numerator = xl * omega.evaluate(xl.inverse());
            let mut denominator = Gf256::ONE;
            for (i, &xi) in xs.iter().enumerate() {
                if i != l {
                    denominator *= xl - xi;
                }
            }
            numerator * denominator.inverse() * xl.pow(16)
        })
        .collect()
}

/// Runs the full syndrome/Berlekamp-Massey/Chien/Forney pipeline against a
/// codeword already known to be invalid, returning the corrected 255 bytes.
fn correct(received: &[u8]) -> Result<Vec<u8>, Error> {
    let r = to_polynomial(received);
    let s = syndromes(&r);

    let (lambda, omega) = berlekamp_massey(&s);
    let error_count = lambda.degree();

    if error_count == 0 || error_count > MAX_CORRECTABLE_ERRORS {
        return Err(Error::Uncorrectable);
    }

    let (xs, positions) = chien_search(&lambda);
    if xs.len() != error_count {
        // Fewer roots than the locator's degree: the error pattern is
        // outside this code's correction radius.
        return Err(Error::Uncorrectable);
    }

    let magnitudes = forney(&xs, &omega);

    let mut corrected = received.to_vec();
    for (&position, &y) in positions.iter().zip(magnitudes.iter()) {
        let idx = CODEWORD_LEN - 1 - position;
        corrected[idx] ^= y.get();
    }

    if !verify(&corrected)? {
        return Err(Error::Uncorrectable);
    }

    Ok(corrected)
}

/// Decodes a 255-byte received codeword, correcting up to 16 errored
/// bytes. By default, strips the 32 parity bytes and any leading zeros
/// `encode` padded the message out with, returning the original message;
/// see [`DecodeOptions`] to keep the padding or get the full 255-byte
/// corrected codeword instead.
pub fn decode(received: &[u8], options: DecodeOptions) -> Result<Vec<u8>, Error> {
    if received.len() != CODEWORD_LEN {
        return Err(Error::InputLengthInvalid);
    }

    let corrected = if verify(received)? {
        received.to_vec()
    } else {
        correct(received)?
    };

    if options.return_full {
        return Ok(corrected);
    }

    let message = &corrected[..MESSAGE_LEN];
    if options.no_strip {
        Ok(message.to_vec())
    } else {
        let first_nonzero = message.iter().position(|&b| b != 0);
        match first_nonzero {
            Some(start) => Ok(message[start..].to_vec()),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn corrupt(codeword: &mut [u8], positions: &[usize]) {
        for &p in positions {
            // XOR with something nonzero so the byte actually changes.
            codeword[p] ^= 0xff;
        }
    }

    /// Builds the 223-byte padded message `decode` hands back for a message
    /// shorter than the codeword's data portion: leading zeros followed by
    /// the message bytes themselves.
    fn padded_message(message: &[u8]) -> Vec<u8> {
        let mut padded = vec![0u8; MESSAGE_LEN - message.len()];
        padded.extend_from_slice(message);
        padded
    }

    #[test]
    fn encode_is_systematic() {
        let message = b"hello, reed-solomon";
        let codeword = encode(message).unwrap();
        let expected = padded_message(message);
        assert_eq!(&codeword[..MESSAGE_LEN], expected.as_slice());
        assert_eq!(codeword.len(), CODEWORD_LEN);
    }

    #[test]
    fn clean_codeword_verifies() {
        let codeword = encode(b"no errors here").unwrap();
        assert!(verify(&codeword).unwrap());
    }

    #[test]
    fn single_bit_flip_fails_verification() {
        let mut codeword = encode(b"no errors here").unwrap();
        codeword[10] ^= 0x01;
        assert!(!verify(&codeword).unwrap());
    }

    // Scenario 1 (spec §8): encode, check the parity tail and verify.
    #[test]
    fn scenario_1_hello_world_verifies() {
        let codeword = encode(b"Hello, world!").unwrap();
        assert_eq!(codeword.len(), CODEWORD_LEN);
        assert!(verify(&codeword).unwrap());
    }

    // Scenario 2 (spec §8): clean round-trip of a longer message. `decode`'s
    // default strips the zero padding `encode` introduced, so the original
    // unpadded message comes back, not the 223-byte padded form.
    #[test]
    fn scenario_2_clean_round_trip() {
        let message = b"Hello, world! This is a long string";
        let codeword = encode(message).unwrap();
        let decoded = decode(&codeword, DecodeOptions::default()).unwrap();
        assert_eq!(decoded, message);
    }

    // Scenario 3 (spec §8): every single byte position, perturbed by +50
    // mod 256, corrects back to the original message.
    #[test]
    fn scenario_3_every_single_position_corrects() {
        let message = b"Hello, world! This is a long string";
        let codeword = encode(message).unwrap();
        for i in 0..codeword.len() {
            let mut corrupted = codeword;
            corrupted[i] = corrupted[i].wrapping_add(50);
            let decoded = decode(&corrupted, DecodeOptions::default()).unwrap();
            assert_eq!(decoded, message, "position {i}");
        }
    }

    // Scenario 4 (spec §8): 16 simultaneous errors still correct.
    #[test]
    fn scenario_4_sixteen_errors_correct() {
        let message = b"Hello, world! This is a long string";
        let mut codeword = encode(message).unwrap();
        let positions = [
            5, 6, 12, 13, 38, 40, 42, 47, 50, 57, 58, 59, 60, 61, 62, 65,
        ];
        for &p in &positions {
            codeword[p] = codeword[p].wrapping_add(50);
        }
        let decoded = decode(&codeword, DecodeOptions::default()).unwrap();
        assert_eq!(decoded, message);
    }

    // Scenario 5 (spec §8): 17 simultaneous errors exceed the correction
    // radius and must not silently return the original message.
    #[test]
    fn scenario_5_seventeen_errors_uncorrectable() {
        let message = b"Hello, world! This is a long string";
        let mut codeword = encode(message).unwrap();
        let positions = [
            5, 6, 12, 13, 22, 38, 40, 42, 47, 50, 57, 58, 59, 60, 61, 62, 65,
        ];
        for &p in &positions {
            codeword[p] = codeword[p].wrapping_add(50);
        }
        match decode(&codeword, DecodeOptions::default()) {
            Err(Error::Uncorrectable) => {}
            Ok(decoded) => assert_ne!(decoded, message),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn corrects_a_single_error() {
        let message = b"the quick brown fox jumps over the lazy dog";
        let mut codeword = encode(message).unwrap();
        corrupt(&mut codeword, &[5]);

        let decoded = decode(&codeword, DecodeOptions::default()).unwrap();
        assert_eq!(decoded, message);
    }

    // The message here starts with a zero byte (element 0 of `0..223`), so
    // the default strip can't distinguish it from `encode`'s own padding;
    // `no_strip` is the option that recovers it unchanged.
    #[test]
    fn corrects_sixteen_errors() {
        let message: Vec<u8> = (0..MESSAGE_LEN as u8).collect();
        let mut codeword = encode(&message).unwrap();
        let positions: Vec<usize> = (0..CODEWORD_LEN).step_by(16).take(16).collect();
        corrupt(&mut codeword, &positions);

        let decoded = decode(
            &codeword,
            DecodeOptions {
                no_strip: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn seventeen_errors_is_uncorrectable() {
        let message: Vec<u8> = (0..MESSAGE_LEN as u8).collect();
        let mut codeword = encode(&message).unwrap();
        let positions: Vec<usize> = (0..CODEWORD_LEN).step_by(15).take(17).collect();
        corrupt(&mut codeword, &positions);

        let result = decode(
            &codeword,
            DecodeOptions {
                no_strip: true,
                ..Default::default()
            },
        );
        // With more corruptions than the code can correct, the decoder
        // must either report failure or, if a rare miscorrection slips
        // through, must not silently return the original message.
        match result {
            Err(Error::Uncorrectable) => {}
            Ok(decoded) => assert_ne!(decoded, message),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn return_full_includes_parity_bytes() {
        let message = b"short";
        let codeword = encode(message).unwrap();
        let decoded = decode(
            &codeword,
            DecodeOptions {
                return_full: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(decoded, codeword.to_vec());
    }

    // A message that is genuinely 223 bytes long and starts with zeros is
    // exactly the case the default strip can't tell apart from `encode`'s
    // own padding: the default strips those leading zeros away too.
    #[test]
    fn default_decode_strips_genuine_leading_zeros_too() {
        let mut message = vec![0u8; MESSAGE_LEN];
        message[MESSAGE_LEN - 1] = 7;
        let codeword = encode(&message).unwrap();
        let decoded = decode(&codeword, DecodeOptions::default()).unwrap();
        assert_eq!(decoded, vec![7u8]);
    }

    // `no_strip` is the way to recover that same message unchanged.
    #[test]
    fn no_strip_preserves_leading_zeros() {
        let mut message = vec![0u8; MESSAGE_LEN];
        message[MESSAGE_LEN - 1] = 7;
        let codeword = encode(&message).unwrap();
        let decoded = decode(
            &codeword,
            DecodeOptions {
                no_strip: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(decoded, message);
    }

    // A short, unpadded message (spec.md §8's literal no_strip contract,
    // cross-checked against `examples/original_source/rstest.py::test_strip`):
    // `encode` pads it out to 223 bytes internally, and `decode`'s default
    // strips that padding back off, returning exactly the original bytes.
    #[test]
    fn default_decode_returns_unpadded_short_message() {
        let message = b"short";
        let codeword = encode(message).unwrap();
        let decoded = decode(&codeword, DecodeOptions::default()).unwrap();
        assert_eq!(decoded, message);

        let full = decode(
            &codeword,
            DecodeOptions {
                no_strip: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(full.len(), MESSAGE_LEN);
        assert_eq!(&full[MESSAGE_LEN - message.len()..], message);
        assert!(full[..MESSAGE_LEN - message.len()].iter().all(|&b| b == 0));
    }

    #[test]
    fn empty_message_round_trips_to_empty() {
        let codeword = encode(b"").unwrap();
        let decoded = decode(&codeword, DecodeOptions::default()).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn message_too_long_is_rejected() {
        let message = vec![0u8; MESSAGE_LEN + 1];
        assert_eq!(encode(&message), Err(Error::InputTooLong));
    }

    #[test]
    fn wrong_length_codeword_is_rejected() {
        assert_eq!(verify(&[0u8; 10]), Err(Error::InputLengthInvalid));
        assert_eq!(
            decode(&[0u8; 10], DecodeOptions::default()),
            Err(Error::InputLengthInvalid)
        );
    }

    /// `no_strip` recovers the full 223-byte padded message unchanged,
    /// regardless of whether `message` happens to start with a zero byte.
    #[quickcheck]
    fn round_trips_with_no_errors_no_strip(message: Vec<u8>) -> bool {
        if message.len() > MESSAGE_LEN {
            return true;
        }
        let mut padded = vec![0u8; MESSAGE_LEN - message.len()];
        padded.extend_from_slice(&message);
        let codeword = encode(&padded).unwrap();
        let options = DecodeOptions {
            no_strip: true,
            ..Default::default()
        };
        decode(&codeword, options).unwrap() == padded
    }

    /// The default strip recovers exactly the original message, as long as
    /// it doesn't itself start with a zero byte (the one case the default
    /// strip can't distinguish from `encode`'s own padding).
    #[quickcheck]
    fn round_trips_with_no_errors_default_strip(message: Vec<u8>) -> bool {
        if message.len() > MESSAGE_LEN || message.first() == Some(&0) {
            return true;
        }
        let codeword = encode(&message).unwrap();
        decode(&codeword, DecodeOptions::default()).unwrap() == message
    }

    #[quickcheck]
    fn single_error_always_corrects(message: Vec<u8>, position: usize, flip: u8) -> bool {
        if message.len() > MESSAGE_LEN || flip == 0 {
            return true;
        }
        let mut padded = vec![0u8; MESSAGE_LEN - message.len()];
        padded.extend_from_slice(&message);
        let mut codeword = encode(&padded).unwrap();
        let position = position % CODEWORD_LEN;
        codeword[position] ^= flip;

        let options = DecodeOptions {
            no_strip: true,
            ..Default::default()
        };
        decode(&codeword, options).unwrap() == padded
    }

    #[quickcheck]
    fn verify_is_idempotent_on_clean_codewords(message: Vec<u8>) -> bool {
        if message.len() > MESSAGE_LEN {
            return true;
        }
        let mut padded = vec![0u8; MESSAGE_LEN - message.len()];
        padded.extend_from_slice(&message);
        let codeword = encode(&padded).unwrap();
        verify(&codeword) == Ok(true) && verify(&codeword) == Ok(true)
    }

    #[quickcheck]
    fn re_encoding_a_decoded_codeword_is_idempotent(message: Vec<u8>, flip: u8) -> bool {
        if message.len() > MESSAGE_LEN || flip == 0 {
            return true;
        }
        let mut padded = vec![0u8; MESSAGE_LEN - message.len()];
        padded.extend_from_slice(&message);
        let mut codeword = encode(&padded).unwrap();
        codeword[0] ^= flip;

        let decoded = decode(&codeword, DecodeOptions::default()).unwrap();
        encode(&decoded).unwrap() == encode(&padded).unwrap()
    }
}
