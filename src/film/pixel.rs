// src/film/pixel.rs

//! Packed 8-bit pixel formats for storing developed passes compactly.
//!
//! Quantization multiplies by 255 and floors; values outside `[0, 1]`
//! saturate. `Rgb565` keeps the top 5/6/5 bits of each channel, so it is lossy
//! even for 8-bit exact inputs.

use crate::color::codec::{dequantize_u8, quantize_u8};
use crate::color::{Rgb, Rgba};

/// A pixel format that can be written from and read back as `Rgba`.
pub trait PackedPixel: Copy + Default {
    fn set_color(&mut self, color: Rgba);
    fn color(&self) -> Rgba;
}

/// 32 bits per pixel, alpha included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8888 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Rgba8888 {
    fn default() -> Self {
        Rgba8888 {
            r: 0,
            g: 0,
            b: 0,
            a: u8::MAX,
        }
    }
}

impl PackedPixel for Rgba8888 {
    fn set_color(&mut self, color: Rgba) {
        let [r, g, b, a] = color.to_u8();
        *self = Rgba8888 { r, g, b, a };
    }

    fn color(&self) -> Rgba {
        Rgba::from_u8([self.r, self.g, self.b, self.a])
    }
}

/// 24 bits per pixel; alpha is dropped and reads back as 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb888 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PackedPixel for Rgb888 {
    fn set_color(&mut self, color: Rgba) {
        let [r, g, b] = color.rgb().to_u8();
        *self = Rgb888 { r, g, b };
    }

    fn color(&self) -> Rgba {
        Rgba::from_rgb(Rgb::from_u8([self.r, self.g, self.b]), 1.0)
    }
}

/// 16 bits per pixel laid out as `rrrrrggg gggbbbbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    const R_MASK: u16 = 0xF800;
    const G_MASK: u16 = 0x07E0;
    const B_MASK: u16 = 0x001F;

    pub fn set_r(&mut self, red: u8) {
        self.0 = (self.0 & !Self::R_MASK) | (((red & 0xF8) as u16) << 8);
    }

    pub fn set_g(&mut self, green: u8) {
        self.0 = (self.0 & !Self::G_MASK) | (((green & 0xFC) as u16) << 3);
    }

    pub fn set_b(&mut self, blue: u8) {
        self.0 = (self.0 & !Self::B_MASK) | (((blue & 0xF8) as u16) >> 3);
    }

    pub fn r(self) -> u8 {
        ((self.0 & Self::R_MASK) >> 8) as u8
    }

    pub fn g(self) -> u8 {
        ((self.0 & Self::G_MASK) >> 3) as u8
    }

    pub fn b(self) -> u8 {
        ((self.0 & Self::B_MASK) << 3) as u8
    }
}

impl PackedPixel for Rgb565 {
    fn set_color(&mut self, color: Rgba) {
        self.set_r(quantize_u8(color.r));
        self.set_g(quantize_u8(color.g));
        self.set_b(quantize_u8(color.b));
    }

    fn color(&self) -> Rgba {
        Rgba::new(
            dequantize_u8(self.r()),
            dequantize_u8(self.g()),
            dequantize_u8(self.b()),
            1.0,
        )
    }
}
