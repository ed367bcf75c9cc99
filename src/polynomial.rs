//! A dense polynomial over any ring-like coefficient type, stored
//! highest-degree-first and kept canonical (no leading zero coefficients
//! unless the polynomial is the zero polynomial itself).

use std::fmt;
use std::hash::Hash;

use crate::error::Error;
use crate::galois_field::Gf256;

/// The operations a coefficient type needs to support for [`Polynomial`]
/// arithmetic. Implemented for `i64` (used by the polynomial-law tests,
/// matching the integer fixtures the division algorithm was ported from)
/// and for [`Gf256`] (the codec's actual coefficient type).
pub trait RingElement: Copy + Clone + PartialEq + Eq + Hash + fmt::Debug {
    fn zero() -> Self;
    fn one() -> Self;
    fn add(self, other: Self) -> Self;
    fn sub(self, other: Self) -> Self;
    fn neg(self) -> Self;
    fn mul(self, other: Self) -> Self;
    /// Exact division. Errs on division by zero; callers that only ever
    /// divide by a monic leading coefficient (as `Polynomial::divmod` does)
    /// never hit the inexact case.
    fn checked_div(self, other: Self) -> Result<Self, Error>;
}

impl RingElement for i64 {
    fn zero() -> Self {
        0
    }

    fn one() -> Self {
        1
    }

    fn add(self, other: Self) -> Self {
        self + other
    }

    fn sub(self, other: Self) -> Self {
        self - other
    }

    fn neg(self) -> Self {
        -self
    }

    fn mul(self, other: Self) -> Self {
        self * other
    }

    fn checked_div(self, other: Self) -> Result<Self, Error> {
        if other == 0 {
            return Err(Error::ZeroDivision);
        }
        Ok(self / other)
    }
}

impl RingElement for Gf256 {
    fn zero() -> Self {
        Gf256::ZERO
    }

    fn one() -> Self {
        Gf256::ONE
    }

    fn add(self, other: Self) -> Self {
        Gf256::add(self, other)
    }

    fn sub(self, other: Self) -> Self {
        Gf256::sub(self, other)
    }

    fn neg(self) -> Self {
        self
    }

    fn mul(self, other: Self) -> Self {
        Gf256::mul(self, other)
    }

    fn checked_div(self, other: Self) -> Result<Self, Error> {
        Gf256::checked_div(self, other)
    }
}

/// A polynomial with coefficients in `T`, stored highest-degree-first.
/// `coefficient(0)` is always the constant term; `degree()` is always
/// `coefficients.len() - 1`, since a canonical polynomial never carries
/// leading zero coefficients (except the zero polynomial itself, `[0]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Polynomial<T: RingElement> {
    coefficients: Vec<T>,
}

impl<T: RingElement> Polynomial<T> {
    /// Builds a polynomial from coefficients given highest-degree-first,
    /// stripping any leading zeros down to a canonical form.
    pub fn new(coefficients: impl IntoIterator<Item = T>) -> Self {
        let mut c: Vec<T> = coefficients.into_iter().collect();
        while c.len() > 1 && c[0] == T::zero() {
            c.remove(0);
        }
        if c.is_empty() {
            c.push(T::zero());
        }
        Self { coefficients: c }
    }

    /// `coefficient * x^degree`.
    pub fn monomial(coefficient: T, degree: usize) -> Self {
        let mut c = vec![coefficient];
        c.extend(std::iter::repeat(T::zero()).take(degree));
        Self::new(c)
    }

    pub fn zero() -> Self {
        Self::new([T::zero()])
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn is_zero(&self) -> bool {
        self.degree() == 0 && self.coefficients[0] == T::zero()
    }

    /// Coefficient of `x^d`, zero for any `d` beyond the polynomial's degree.
    pub fn coefficient(&self, d: usize) -> T {
        if d > self.degree() {
            return T::zero();
        }
        self.coefficients[self.coefficients.len() - 1 - d]
    }

    /// Coefficients highest-degree-first, the same order [`Polynomial::new`]
    /// takes them in.
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    fn padded_to(&self, n: usize) -> Vec<T> {
        let pad = n - self.coefficients.len();
        let mut v = vec![T::zero(); pad];
        v.extend_from_slice(&self.coefficients);
        v
    }

    pub fn add(&self, other: &Self) -> Self {
        let n = self.coefficients.len().max(other.coefficients.len());
        let a = self.padded_to(n);
        let b = other.padded_to(n);
        Self::new(a.iter().zip(b.iter()).map(|(&x, &y)| x.add(y)))
    }

    pub fn neg(&self) -> Self {
        Self::new(self.coefficients.iter().map(|&c| c.neg()))
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut terms = vec![T::zero(); self.coefficients.len() + other.coefficients.len() - 1];
        let n = terms.len();
        for (i1, &c1) in self.coefficients.iter().rev().enumerate() {
            if c1 == T::zero() {
                continue;
            }
            for (i2, &c2) in other.coefficients.iter().rev().enumerate() {
                let idx = n - 1 - (i1 + i2);
                terms[idx] = terms[idx].add(c1.mul(c2));
            }
        }
        Self::new(terms)
    }

    /// Horner evaluation at `x`.
    pub fn evaluate(&self, x: T) -> T {
        let mut acc = T::zero();
        for &c in &self.coefficients {
            acc = acc.mul(x).add(c);
        }
        acc
    }

    /// Polynomial long division: `self = quotient * divisor + remainder`,
    /// with `remainder.degree() < divisor.degree()` (or `remainder` zero).
    /// Errs if `divisor` is the zero polynomial, or if a leading-coefficient
    /// division along the way isn't exact.
    pub fn divmod(&self, divisor: &Self) -> Result<(Self, Self), Error> {
        if divisor.is_zero() {
            return Err(Error::ZeroDivision);
        }
        if self.is_zero() || self.degree() < divisor.degree() {
            return Ok((Self::zero(), self.clone()));
        }

        let shift = self.degree() - divisor.degree();
        let lead = self.coefficients[0].checked_div(divisor.coefficients[0])?;
        let term = Self::monomial(lead, shift);

        let remainder = self.sub(&term.mul(divisor));
        if remainder.is_zero() || remainder.degree() < divisor.degree() {
            return Ok((term, remainder));
        }

        let (rest_quotient, remainder) = remainder.divmod(divisor)?;
        Ok((term.add(&rest_quotient), remainder))
    }
}
