// src/color/space.rs

//! Color-space tags and the conversions between them and linear RGB.
//!
//! Conversions only ever touch the chromatic channels; the alpha channel of an
//! `Rgba` passes through unchanged.

use log::warn;
use serde::{Deserialize, Serialize};

use super::{Rgb, Rgba};

/// Lower bound applied to a manual gamma exponent before it is inverted.
pub const MIN_GAMMA: f32 = 1.0e-2;

// sRGB transfer function constants (IEC 61966-2-1).
const SRGB_DECODE_THRESHOLD: f32 = 0.04045;
const SRGB_ENCODE_THRESHOLD: f32 = 0.003_130_8;
const SRGB_LINEAR_SLOPE: f32 = 12.92;
const SRGB_EXPONENT: f32 = 2.4;
const SRGB_SCALE: f32 = 1.055;
const SRGB_OFFSET: f32 = 0.055;

/// XYZ (D65) to linear sRGB primaries.
const LINEAR_RGB_FROM_XYZ_D65: [[f32; 3]; 3] = [
    [3.240_625_5, -1.537_208, -0.498_628_6],
    [-0.968_930_7, 1.875_756_1, 0.041_517_5],
    [0.055_710_1, -0.204_021_1, 1.056_995_9],
];

/// Inverse of [`LINEAR_RGB_FROM_XYZ_D65`].
const XYZ_D65_FROM_LINEAR_RGB: [[f32; 3]; 3] = [
    [0.4124, 0.3576, 0.1805],
    [0.2126, 0.7152, 0.0722],
    [0.0193, 0.1192, 0.9505],
];

/// The color space a value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColorSpace {
    /// Linear values raised to a user-supplied gamma.
    RawManualGamma,
    LinearRgb,
    Srgb,
    /// CIE XYZ with a D65 white point.
    XyzD65,
}

impl ColorSpace {
    /// Canonical configuration name.
    pub fn name(self) -> &'static str {
        match self {
            ColorSpace::RawManualGamma => "Raw_Manual_Gamma",
            ColorSpace::LinearRgb => "LinearRGB",
            ColorSpace::Srgb => "sRGB",
            ColorSpace::XyzD65 => "XYZ",
        }
    }

    pub fn from_name(name: &str) -> Option<ColorSpace> {
        match name {
            "Raw_Manual_Gamma" => Some(ColorSpace::RawManualGamma),
            "LinearRGB" => Some(ColorSpace::LinearRgb),
            "sRGB" => Some(ColorSpace::Srgb),
            "XYZ" => Some(ColorSpace::XyzD65),
            _ => None,
        }
    }
}

impl From<String> for ColorSpace {
    /// Unrecognized names fall back to sRGB.
    fn from(name: String) -> Self {
        ColorSpace::from_name(&name).unwrap_or_else(|| {
            warn!("Unknown color space '{}', falling back to sRGB", name);
            ColorSpace::Srgb
        })
    }
}

impl From<ColorSpace> for String {
    fn from(space: ColorSpace) -> Self {
        space.name().to_string()
    }
}

/// Decodes one sRGB-encoded channel to linear.
pub fn linear_from_srgb(v: f32) -> f32 {
    if v <= SRGB_DECODE_THRESHOLD {
        v / SRGB_LINEAR_SLOPE
    } else {
        ((v + SRGB_OFFSET) / SRGB_SCALE).powf(SRGB_EXPONENT)
    }
}

/// Encodes one linear channel to sRGB.
pub fn srgb_from_linear(v: f32) -> f32 {
    if v <= SRGB_ENCODE_THRESHOLD {
        v * SRGB_LINEAR_SLOPE
    } else {
        SRGB_SCALE * v.powf(1.0 / SRGB_EXPONENT) - SRGB_OFFSET
    }
}

fn apply_matrix(m: &[[f32; 3]; 3], c: Rgb) -> Rgb {
    Rgb::new(
        m[0][0] * c.r + m[0][1] * c.g + m[0][2] * c.b,
        m[1][0] * c.r + m[1][1] * c.g + m[1][2] * c.b,
        m[2][0] * c.r + m[2][1] * c.g + m[2][2] * c.b,
    )
}

fn clamp_gamma(gamma: f32) -> f32 {
    if gamma <= 0.0 {
        MIN_GAMMA
    } else {
        gamma
    }
}

impl Rgb {
    /// Converts a color expressed in `space` to linear RGB.
    ///
    /// `gamma` is only consulted for [`ColorSpace::RawManualGamma`].
    pub fn to_linear(self, space: ColorSpace, gamma: f32) -> Rgb {
        match space {
            ColorSpace::Srgb => Rgb::new(
                linear_from_srgb(self.r),
                linear_from_srgb(self.g),
                linear_from_srgb(self.b),
            ),
            ColorSpace::XyzD65 => apply_matrix(&LINEAR_RGB_FROM_XYZ_D65, self),
            ColorSpace::RawManualGamma if gamma != 1.0 => {
                let mut c = self;
                c.gamma_adjust(clamp_gamma(gamma));
                c
            }
            ColorSpace::RawManualGamma | ColorSpace::LinearRgb => self,
        }
    }

    /// Converts a linear RGB color into `space`. Inverse of [`Rgb::to_linear`].
    pub fn to_space(self, space: ColorSpace, gamma: f32) -> Rgb {
        match space {
            ColorSpace::Srgb => Rgb::new(
                srgb_from_linear(self.r),
                srgb_from_linear(self.g),
                srgb_from_linear(self.b),
            ),
            ColorSpace::XyzD65 => apply_matrix(&XYZ_D65_FROM_LINEAR_RGB, self),
            ColorSpace::RawManualGamma if gamma != 1.0 => {
                let mut c = self;
                c.gamma_adjust(1.0 / clamp_gamma(gamma));
                c
            }
            ColorSpace::RawManualGamma | ColorSpace::LinearRgb => self,
        }
    }
}

impl Rgba {
    /// Chromatic conversion to linear RGB; alpha is kept as is.
    pub fn to_linear(self, space: ColorSpace, gamma: f32) -> Rgba {
        Rgba::from_rgb(self.rgb().to_linear(space, gamma), self.a)
    }

    /// Chromatic conversion from linear RGB; alpha is kept as is.
    pub fn to_space(self, space: ColorSpace, gamma: f32) -> Rgba {
        Rgba::from_rgb(self.rgb().to_space(space, gamma), self.a)
    }
}
