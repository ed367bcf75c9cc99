//! GF(2^8) arithmetic: the finite field underlying the RS(255, 223) codec.
//!
//! Elements are bytes interpreted as polynomials in Z₂\[x\] modulo the
//! reduction polynomial x^8 + x^4 + x^3 + x + 1 (0x11B). The primitive
//! element α = 3 generates the full multiplicative group of order 255.

use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::sync::OnceLock;

use crate::error::Error;

/// An element of GF(2^8), stored as its 0..=255 byte representation.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Gf256(pub u8);

struct Tables {
    /// exp[i] = α^i for i in 0..510, duplicated past 255 so lookups of
    /// log(a) + log(b) (which can run up to 508) never need a modulo.
    exp: [u8; 512],
    /// log[a] = i such that α^i = a, for a != 0. log[0] is unused.
    log: [u8; 256],
}

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut exp = [0u8; 512];
        let mut log = [0u8; 256];

        let mut x = Gf256::ONE;
        for i in 0..255usize {
            exp[i] = x.0;
            exp[i + 255] = x.0;
            log[x.0 as usize] = i as u8;
            x = x.naive_mul(Gf256::GENERATOR);
        }

        Tables { exp, log }
    })
}

impl Gf256 {
    /// Reduction polynomial x^8 + x^4 + x^3 + x + 1.
    pub const POLYNOMIAL: u16 = 0x11b;

    /// α, the primitive element used throughout the codec.
    pub const GENERATOR: Gf256 = Gf256(0x03);

    pub const ZERO: Gf256 = Gf256(0);
    pub const ONE: Gf256 = Gf256(1);

    pub const fn new(n: u8) -> Self {
        Self(n)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Narrow a wider integer into a field element, failing if it's outside
    /// 0..=255. Only used at the boundary between integer-coefficient test
    /// fixtures and field-coefficient polynomials; the encode/decode path
    /// only ever moves `u8` bytes, which are in-range by construction.
    pub fn from_i64(v: i64) -> Result<Gf256, Error> {
        if !(0..=255).contains(&v) {
            return Err(Error::FieldDomain);
        }
        Ok(Gf256(v as u8))
    }

    pub const fn add(self, other: Gf256) -> Gf256 {
        Gf256(self.0 ^ other.0)
    }

    pub const fn sub(self, other: Gf256) -> Gf256 {
        Gf256(self.0 ^ other.0)
    }

    /// Carryless byte multiplication reduced modulo [`Gf256::POLYNOMIAL`],
    /// the textbook "peasant's algorithm". Used only to bootstrap the
    /// log/antilog tables; `mul` below is the table-driven hot path.
    pub const fn naive_mul(self, other: Gf256) -> Gf256 {
        let mut a = self.0;
        let mut b = other.0;
        let mut r: u8 = 0;
        while b != 0 {
            if b & 1 != 0 {
                r ^= a;
            }
            let carry = a & 0x80 != 0;
            a <<= 1;
            if carry {
                a ^= Self::POLYNOMIAL as u8;
            }
            b >>= 1;
        }
        Gf256(r)
    }

    /// Multiplication via the log/antilog tables: `mul(a,0) = mul(0,b) = 0`,
    /// otherwise `exp[log(a) + log(b)]`.
    pub fn mul(self, other: Gf256) -> Gf256 {
        if self.0 == 0 || other.0 == 0 {
            return Gf256::ZERO;
        }
        let t = tables();
        let i = t.log[self.0 as usize] as usize + t.log[other.0 as usize] as usize;
        Gf256(t.exp[i])
    }

    /// `self^exp`. `pow(0, 0) == 1` by convention; `pow(0, n) == 0` for
    /// `n > 0`.
    pub fn pow(self, exp: u8) -> Gf256 {
        if exp == 0 {
            return Gf256::ONE;
        }
        if self.0 == 0 {
            return Gf256::ZERO;
        }
        let t = tables();
        let i = (t.log[self.0 as usize] as usize * exp as usize) % 255;
        Gf256(t.exp[i])
    }

    /// `self^254`, the multiplicative inverse, since the group has order
    /// 255. Fails for `self == 0`.
    pub fn checked_inverse(self) -> Result<Gf256, Error> {
        if self.0 == 0 {
            return Err(Error::ZeroDivision);
        }
        Ok(self.pow(254))
    }

    pub fn inverse(self) -> Gf256 {
        self.checked_inverse().expect("gf inverse of zero")
    }

    pub fn checked_div(self, other: Gf256) -> Result<Gf256, Error> {
        Ok(self.mul(other.checked_inverse()?))
    }

    pub fn div(self, other: Gf256) -> Gf256 {
        self.checked_div(other).expect("gf division by zero")
    }
}

impl Neg for Gf256 {
    type Output = Gf256;

    fn neg(self) -> Gf256 {
        self
    }
}

impl Add<Gf256> for Gf256 {
    type Output = Gf256;

    fn add(self, other: Gf256) -> Gf256 {
        Gf256::add(self, other)
    }
}

impl Add<&Gf256> for Gf256 {
    type Output = Gf256;

    fn add(self, other: &Gf256) -> Gf256 {
        Gf256::add(self, *other)
    }
}

impl AddAssign<Gf256> for Gf256 {
    fn add_assign(&mut self, other: Gf256) {
        *self = self.add(other)
    }
}

impl Sum<Gf256> for Gf256 {
    fn sum<I>(iter: I) -> Gf256
    where
        I: Iterator<Item = Gf256>,
    {
        iter.fold(Gf256::ZERO, |a, x| a + x)
    }
}

impl Sub for Gf256 {
    type Output = Gf256;

    fn sub(self, other: Gf256) -> Gf256 {
        Gf256::sub(self, other)
    }
}

impl Sub<&Gf256> for Gf256 {
    type Output = Gf256;

    fn sub(self, other: &Gf256) -> Gf256 {
        Gf256::sub(self, *other)
    }
}

impl SubAssign<Gf256> for Gf256 {
    fn sub_assign(&mut self, other: Gf256) {
        *self = self.sub(other)
    }
}

impl Mul for Gf256 {
    type Output = Gf256;

    fn mul(self, other: Gf256) -> Gf256 {
        Gf256::mul(self, other)
    }
}

impl Mul<&Gf256> for Gf256 {
    type Output = Gf256;

    fn mul(self, other: &Gf256) -> Gf256 {
        Gf256::mul(self, *other)
    }
}

impl MulAssign<Gf256> for Gf256 {
    fn mul_assign(&mut self, other: Gf256) {
        *self = self.mul(other)
    }
}

impl Product<Gf256> for Gf256 {
    fn product<I>(iter: I) -> Gf256
    where
        I: Iterator<Item = Gf256>,
    {
        iter.fold(Gf256::ONE, |a, x| a * x)
    }
}

impl Div for Gf256 {
    type Output = Gf256;

    fn div(self, other: Gf256) -> Gf256 {
        Gf256::div(self, other)
    }
}

impl DivAssign<Gf256> for Gf256 {
    fn div_assign(&mut self, other: Gf256) {
        *self = self.div(other)
    }
}
