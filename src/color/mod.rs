// src/color/mod.rs

//! Defines the floating-point color value types (`Rgb`, `Rgba`) that flow
//! through the pass accumulators, together with their arithmetic.
//!
//! Both types are plain `Copy` values. Channels are unconstrained while
//! accumulating: they may exceed `[0, 1]` or go negative until an output
//! boundary clamps them. Color-space conversion lives in [`space`], byte-level
//! packing and formatting in [`codec`].

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

pub mod codec;
pub mod space;

pub use codec::Rgbe;
pub use space::ColorSpace;

// ITU-R BT.709 photometric weights.
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// A linear RGB color with unconstrained `f32` channels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// An `Rgb` color plus an independent transparency channel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Rgb { r, g, b }
    }

    /// All three channels set to `v`.
    pub const fn gray(v: f32) -> Self {
        Rgb { r: v, g: v, b: v }
    }

    pub fn is_black(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }

    pub fn is_nan(&self) -> bool {
        self.r.is_nan() || self.g.is_nan() || self.b.is_nan()
    }

    pub fn is_inf(&self) -> bool {
        self.r.is_infinite() || self.g.is_infinite() || self.b.is_infinite()
    }

    /// Average of the three channels.
    pub fn energy(&self) -> f32 {
        (self.r + self.g + self.b) * 0.333_333
    }

    /// Perceptual luminance using fixed BT.709 weights.
    pub fn luminance(&self) -> f32 {
        LUMA_R * self.r + LUMA_G * self.g + LUMA_B * self.b
    }

    /// Luminance of the channel magnitudes.
    pub fn abs_luminance(&self) -> f32 {
        LUMA_R * self.r.abs() + LUMA_G * self.g.abs() + LUMA_B * self.b.abs()
    }

    pub fn minimum(&self) -> f32 {
        self.r.min(self.g.min(self.b))
    }

    pub fn maximum(&self) -> f32 {
        self.r.max(self.g.max(self.b))
    }

    pub fn abs_max(&self) -> f32 {
        self.r.abs().max(self.g.abs().max(self.b.abs()))
    }

    /// Raises every channel to `g`.
    pub fn gamma_adjust(&mut self, g: f32) {
        self.r = self.r.powf(g);
        self.g = self.g.powf(g);
        self.b = self.b.powf(g);
    }

    /// Replaces every non-zero channel by its reciprocal.
    pub fn invert(&mut self) {
        if self.r != 0.0 {
            self.r = 1.0 / self.r;
        }
        if self.g != 0.0 {
            self.g = 1.0 / self.g;
        }
        if self.b != 0.0 {
            self.b = 1.0 / self.b;
        }
    }

    pub fn abs(&mut self) {
        self.r = self.r.abs();
        self.g = self.g.abs();
        self.b = self.b.abs();
    }

    /// Per-channel minimum against `other`.
    pub fn darken(&mut self, other: &Rgb) {
        self.r = self.r.min(other.r);
        self.g = self.g.min(other.g);
        self.b = self.b.min(other.b);
    }

    /// Per-channel maximum against `other`.
    pub fn lighten(&mut self, other: &Rgb) {
        self.r = self.r.max(other.r);
        self.g = self.g.max(other.g);
        self.b = self.b.max(other.b);
    }

    /// Clamps negative channels to zero.
    pub fn clamp0(&mut self) {
        self.r = self.r.max(0.0);
        self.g = self.g.max(0.0);
        self.b = self.b.max(0.0);
    }

    pub fn clamp01(&mut self) {
        self.r = self.r.clamp(0.0, 1.0);
        self.g = self.g.clamp(0.0, 1.0);
        self.b = self.b.clamp(0.0, 1.0);
    }

    /// Clamps the largest channel to `max_value` and rescales the other two by
    /// the same factor, keeping the ratio between channels.
    ///
    /// A non-positive `max_value` disables clamping entirely.
    pub fn clamp_proportional(&mut self, max_value: f32) {
        if max_value <= 0.0 {
            return;
        }
        let max_rgb = self.maximum();
        if max_rgb <= max_value {
            return;
        }
        let factor = max_value / max_rgb;
        if self.r >= max_rgb {
            self.r = max_value;
            self.g *= factor;
            self.b *= factor;
        } else if self.g >= max_rgb {
            self.g = max_value;
            self.r *= factor;
            self.b *= factor;
        } else {
            self.b = max_value;
            self.r *= factor;
            self.g *= factor;
        }
    }

    /// Exposure then gamma adjustment.
    ///
    /// A non-zero `exposure` maps each channel through `1 - exp(-v * exposure)`
    /// and a `gamma` other than 1 raises it to `gamma`; negative channels are
    /// clamped to zero before each step. When both are identities the color is
    /// only clamped to `[0, 1]`, and only if `clamp_first` is set.
    pub fn expgam_adjust(&mut self, exposure: f32, gamma: f32, clamp_first: bool) {
        if exposure == 0.0 && gamma == 1.0 {
            if clamp_first {
                self.clamp01();
            }
            return;
        }
        if exposure != 0.0 {
            self.clamp0();
            self.r = 1.0 - (-self.r * exposure).exp();
            self.g = 1.0 - (-self.g * exposure).exp();
            self.b = 1.0 - (-self.b * exposure).exp();
        }
        if gamma != 1.0 {
            self.clamp0();
            self.gamma_adjust(gamma);
        }
    }
}

impl Rgba {
    /// All channels zero, alpha included.
    pub const ZERO: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    pub const OPAQUE_BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT_BLACK: Rgba = Rgba::ZERO;

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Rgba { r, g, b, a }
    }

    /// All four channels set to `v`, alpha included.
    pub const fn gray(v: f32) -> Self {
        Rgba { r: v, g: v, b: v, a: v }
    }

    pub const fn from_rgb(c: Rgb, a: f32) -> Self {
        Rgba { r: c.r, g: c.g, b: c.b, a }
    }

    /// The chromatic part of this color.
    pub const fn rgb(&self) -> Rgb {
        Rgb { r: self.r, g: self.g, b: self.b }
    }

    pub fn set_rgb(&mut self, c: Rgb) {
        self.r = c.r;
        self.g = c.g;
        self.b = c.b;
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Rgba { a, ..self }
    }

    pub fn is_black(&self) -> bool {
        self.rgb().is_black()
    }

    pub fn is_nan(&self) -> bool {
        self.rgb().is_nan() || self.a.is_nan()
    }

    pub fn is_inf(&self) -> bool {
        self.rgb().is_inf() || self.a.is_infinite()
    }

    pub fn luminance(&self) -> f32 {
        self.rgb().luminance()
    }

    pub fn energy(&self) -> f32 {
        self.rgb().energy()
    }

    /// Scales the chromatic channels by alpha.
    pub fn premultiply(&mut self) {
        self.r *= self.a;
        self.g *= self.a;
        self.b *= self.a;
    }

    pub fn clamp0(&mut self) {
        self.r = self.r.max(0.0);
        self.g = self.g.max(0.0);
        self.b = self.b.max(0.0);
        self.a = self.a.max(0.0);
    }

    pub fn clamp01(&mut self) {
        self.r = self.r.clamp(0.0, 1.0);
        self.g = self.g.clamp(0.0, 1.0);
        self.b = self.b.clamp(0.0, 1.0);
        self.a = self.a.clamp(0.0, 1.0);
    }

    /// See [`Rgb::clamp_proportional`]. Alpha is left alone.
    pub fn clamp_proportional(&mut self, max_value: f32) {
        let mut c = self.rgb();
        c.clamp_proportional(max_value);
        self.set_rgb(c);
    }

    /// Perceptual difference between two colors: the luminance delta, or, when
    /// `use_rgb_components` is set, the largest of the luminance delta and the
    /// per-channel deltas including alpha.
    pub fn color_difference(&self, other: &Rgba, use_rgb_components: bool) -> f32 {
        let mut diff = (other.luminance() - self.luminance()).abs();
        if use_rgb_components {
            diff = diff
                .max((other.r - self.r).abs())
                .max((other.g - self.g).abs())
                .max((other.b - self.b).abs())
                .max((other.a - self.a).abs());
        }
        diff
    }
}

impl From<Rgb> for Rgba {
    /// Opaque conversion.
    fn from(c: Rgb) -> Self {
        Rgba::from_rgb(c, 1.0)
    }
}

impl From<Rgba> for Rgb {
    fn from(c: Rgba) -> Self {
        c.rgb()
    }
}

/// Linear interpolation `a * (1 - t) + b * t`. `t` is not clamped.
pub fn mix(a: Rgb, b: Rgb, t: f32) -> Rgb {
    a * (1.0 - t) + b * t
}

/// Linear interpolation over all four channels. `t` is not clamped.
pub fn mix_rgba(a: Rgba, b: Rgba, t: f32) -> Rgba {
    a * (1.0 - t) + b * t
}

/// Largest absolute per-channel difference between `a` and `b`.
pub fn max_abs_diff(a: Rgb, b: Rgb) -> f32 {
    (a - b).abs_max()
}

// --- Rgb arithmetic ---

impl Add for Rgb {
    type Output = Rgb;
    fn add(self, o: Rgb) -> Rgb {
        Rgb::new(self.r + o.r, self.g + o.g, self.b + o.b)
    }
}

impl Sub for Rgb {
    type Output = Rgb;
    fn sub(self, o: Rgb) -> Rgb {
        Rgb::new(self.r - o.r, self.g - o.g, self.b - o.b)
    }
}

impl Mul for Rgb {
    type Output = Rgb;
    fn mul(self, o: Rgb) -> Rgb {
        Rgb::new(self.r * o.r, self.g * o.g, self.b * o.b)
    }
}

impl Mul<f32> for Rgb {
    type Output = Rgb;
    fn mul(self, f: f32) -> Rgb {
        Rgb::new(self.r * f, self.g * f, self.b * f)
    }
}

impl Mul<Rgb> for f32 {
    type Output = Rgb;
    fn mul(self, c: Rgb) -> Rgb {
        c * self
    }
}

/// Unguarded: dividing by zero yields infinities or NaN.
impl Div<f32> for Rgb {
    type Output = Rgb;
    fn div(self, f: f32) -> Rgb {
        Rgb::new(self.r / f, self.g / f, self.b / f)
    }
}

impl AddAssign for Rgb {
    fn add_assign(&mut self, o: Rgb) {
        *self = *self + o;
    }
}

impl SubAssign for Rgb {
    fn sub_assign(&mut self, o: Rgb) {
        *self = *self - o;
    }
}

impl MulAssign for Rgb {
    fn mul_assign(&mut self, o: Rgb) {
        *self = *self * o;
    }
}

impl MulAssign<f32> for Rgb {
    fn mul_assign(&mut self, f: f32) {
        *self = *self * f;
    }
}

impl DivAssign<f32> for Rgb {
    fn div_assign(&mut self, f: f32) {
        *self = *self / f;
    }
}

// --- Rgba arithmetic ---

impl Add for Rgba {
    type Output = Rgba;
    fn add(self, o: Rgba) -> Rgba {
        Rgba::new(self.r + o.r, self.g + o.g, self.b + o.b, self.a + o.a)
    }
}

impl Sub for Rgba {
    type Output = Rgba;
    fn sub(self, o: Rgba) -> Rgba {
        Rgba::new(self.r - o.r, self.g - o.g, self.b - o.b, self.a - o.a)
    }
}

impl Mul for Rgba {
    type Output = Rgba;
    fn mul(self, o: Rgba) -> Rgba {
        Rgba::new(self.r * o.r, self.g * o.g, self.b * o.b, self.a * o.a)
    }
}

impl Mul<f32> for Rgba {
    type Output = Rgba;
    fn mul(self, f: f32) -> Rgba {
        Rgba::new(self.r * f, self.g * f, self.b * f, self.a * f)
    }
}

impl Mul<Rgba> for f32 {
    type Output = Rgba;
    fn mul(self, c: Rgba) -> Rgba {
        c * self
    }
}

/// Zero-guarded: dividing by exactly zero scales the color to zero.
impl Div<f32> for Rgba {
    type Output = Rgba;
    fn div(self, f: f32) -> Rgba {
        let inv = if f != 0.0 { 1.0 / f } else { f };
        self * inv
    }
}

impl AddAssign for Rgba {
    fn add_assign(&mut self, o: Rgba) {
        *self = *self + o;
    }
}

impl SubAssign for Rgba {
    fn sub_assign(&mut self, o: Rgba) {
        *self = *self - o;
    }
}

impl MulAssign for Rgba {
    fn mul_assign(&mut self, o: Rgba) {
        *self = *self * o;
    }
}

/// Scales the chromatic channels only.
impl MulAssign<Rgb> for Rgba {
    fn mul_assign(&mut self, o: Rgb) {
        self.set_rgb(self.rgb() * o);
    }
}

impl MulAssign<f32> for Rgba {
    fn mul_assign(&mut self, f: f32) {
        *self = *self * f;
    }
}

impl DivAssign<f32> for Rgba {
    fn div_assign(&mut self, f: f32) {
        *self = *self / f;
    }
}

#[cfg(test)]
mod tests;
