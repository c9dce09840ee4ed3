//! Arithmetic over GF(2^8) with the AES reduction polynomial
//! x^8 + x^4 + x^3 + x + 1 (0x11B).
//!
//! Multiplication is a branch-free shift-and-add loop and inversion is a
//! fixed exponentiation, so no operation indexes memory by a secret value.

use zeroize::Zeroizing;

/// Low byte of the reduction polynomial.
const REDUCTION: u8 = 0x1B;

/// Add two field elements (XOR).
#[inline]
pub fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Subtract two field elements. Identical to [`add`] in characteristic 2.
#[inline]
pub fn sub(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Multiply two field elements.
#[inline]
pub fn mul(a: u8, b: u8) -> u8 {
    let mut a = a;
    let mut b = b;
    let mut product = 0u8;
    for _ in 0..8 {
        // Mask is 0xFF when the low bit of b is set, 0x00 otherwise.
        product ^= a & (b & 1).wrapping_neg();
        let carry = (a >> 7).wrapping_neg();
        a = (a << 1) ^ (carry & REDUCTION);
        b >>= 1;
    }
    product
}

/// Multiplicative inverse, computed as `a^254`. Maps zero to zero.
pub fn inv(a: u8) -> u8 {
    // 254 = 0b1111_1110: square-and-multiply over a fixed exponent.
    let mut result = 1u8;
    let mut base = a;
    let mut exp = 254u8;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul(result, base);
        }
        base = mul(base, base);
        exp >>= 1;
    }
    result
}

/// Divide `a` by `b`. Returns `None` when `b` is zero.
pub fn div(a: u8, b: u8) -> Option<u8> {
    if b == 0 {
        return None;
    }
    Some(mul(a, inv(b)))
}

/// A polynomial over GF(256), coefficients in increasing degree order.
pub struct Polynomial {
    coefficients: Zeroizing<Vec<u8>>,
}

impl Polynomial {
    /// Build a polynomial with the given constant term followed by the
    /// higher-degree coefficients. The degree is `coefficients.len()`.
    pub fn new(constant: u8, coefficients: &[u8]) -> Self {
        let mut all = Zeroizing::new(Vec::with_capacity(coefficients.len() + 1));
        all.push(constant);
        all.extend_from_slice(coefficients);
        Self { coefficients: all }
    }

    /// Degree of the polynomial (number of non-constant coefficients).
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Evaluate at `x` using Horner's method.
    pub fn evaluate(&self, x: u8) -> u8 {
        self.coefficients
            .iter()
            .rev()
            .fold(0u8, |acc, &c| add(mul(acc, x), c))
    }
}

/// Lagrange-interpolate the polynomial through `points` and evaluate it at `at`.
///
/// Returns `None` if two points share an x-coordinate.
pub fn interpolate(points: &[(u8, u8)], at: u8) -> Option<u8> {
    let mut value = 0u8;
    for (i, &(xi, yi)) in points.iter().enumerate() {
        let mut numerator = 1u8;
        let mut denominator = 1u8;
        for (j, &(xj, _)) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            numerator = mul(numerator, sub(at, xj));
            denominator = mul(denominator, sub(xi, xj));
        }
        let basis = div(numerator, denominator)?;
        value = add(value, mul(yi, basis));
    }
    Some(value)
}
