// src/color/codec.rs

//! Byte-level packing of colors into 8-bit and `f32` buffers, text formatting,
//! and the RGBE shared-exponent encoding.
//!
//! Every codec here is total: out-of-range and non-finite channels saturate
//! instead of failing.

use std::fmt;

use super::{Rgb, Rgba};

/// Quantizes one channel to 8 bits: scale by 255 and floor. The `as` cast
/// saturates out-of-range values and maps NaN to zero.
#[inline]
pub(crate) fn quantize_u8(v: f32) -> u8 {
    (v * 255.0).floor() as u8
}

#[inline]
pub(crate) fn dequantize_u8(v: u8) -> f32 {
    v as f32 / 255.0
}

impl Rgb {
    pub fn to_u8(&self) -> [u8; 3] {
        [quantize_u8(self.r), quantize_u8(self.g), quantize_u8(self.b)]
    }

    pub fn from_u8(data: [u8; 3]) -> Rgb {
        Rgb::new(
            dequantize_u8(data[0]),
            dequantize_u8(data[1]),
            dequantize_u8(data[2]),
        )
    }

    pub fn to_f32(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_f32(data: [f32; 3]) -> Rgb {
        Rgb::new(data[0], data[1], data[2])
    }
}

impl Rgba {
    pub fn to_u8(&self) -> [u8; 4] {
        [
            quantize_u8(self.r),
            quantize_u8(self.g),
            quantize_u8(self.b),
            quantize_u8(self.a),
        ]
    }

    pub fn from_u8(data: [u8; 4]) -> Rgba {
        Rgba::new(
            dequantize_u8(data[0]),
            dequantize_u8(data[1]),
            dequantize_u8(data[2]),
            dequantize_u8(data[3]),
        )
    }

    pub fn to_f32(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_f32(data: [f32; 4]) -> Rgba {
        Rgba::new(data[0], data[1], data[2], data[3])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.r, self.g, self.b, self.a)
    }
}

/// Ward's RGBE format: three 8-bit mantissas sharing one 8-bit exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgbe(pub [u8; 4]);

// Exponent bias plus the 8 mantissa bits.
const RGBE_EXPONENT_BIAS: i32 = 128;
const RGBE_MANTISSA_BITS: i32 = 8;

/// Splits a positive normal `v` into a mantissa in `[0.5, 1)` and a
/// power-of-two exponent, so that `v == mantissa * 2^exponent`.
fn frexp(v: f32) -> (f32, i32) {
    let bits = v.to_bits();
    let exponent = ((bits >> 23) & 0xff) as i32 - 126;
    let mantissa = f32::from_bits((bits & 0x807f_ffff) | (126 << 23));
    (mantissa, exponent)
}

impl From<Rgb> for Rgbe {
    fn from(c: Rgb) -> Self {
        let v = c.maximum();
        if v.is_nan() || v < 1e-32 || v.is_infinite() {
            return Rgbe([0, 0, 0, 0]);
        }
        let (mantissa, exponent) = frexp(v);
        let biased = exponent + RGBE_EXPONENT_BIAS;
        if !(1..=255).contains(&biased) {
            return Rgbe([0, 0, 0, 0]);
        }
        let scale = mantissa * 256.0 / v;
        Rgbe([
            (c.r * scale).max(0.0) as u8,
            (c.g * scale).max(0.0) as u8,
            (c.b * scale).max(0.0) as u8,
            biased as u8,
        ])
    }
}

impl From<Rgbe> for Rgb {
    /// A zero exponent byte decodes to black.
    fn from(e: Rgbe) -> Self {
        let [r, g, b, exp] = e.0;
        if exp == 0 {
            return Rgb::BLACK;
        }
        let f = 2f32.powi(exp as i32 - (RGBE_EXPONENT_BIAS + RGBE_MANTISSA_BITS));
        Rgb::new(r as f32 * f, g as f32 * f, b as f32 * f)
    }
}
