// src/color/tests.rs

use super::*;

const EPS: f32 = 1e-5;

fn assert_rgb_close(a: Rgb, b: Rgb, eps: f32, msg: &str) {
    assert!(
        (a.r - b.r).abs() <= eps && (a.g - b.g).abs() <= eps && (a.b - b.b).abs() <= eps,
        "{}: {} vs {}",
        msg,
        a,
        b
    );
}

// --- Arithmetic ---

#[test]
fn test_elementwise_arithmetic() {
    let a = Rgb::new(1.0, 2.0, 3.0);
    let b = Rgb::new(0.5, 0.25, 2.0);
    assert_eq!(a + b, Rgb::new(1.5, 2.25, 5.0));
    assert_eq!(a - b, Rgb::new(0.5, 1.75, 1.0));
    assert_eq!(a * b, Rgb::new(0.5, 0.5, 6.0));
    assert_eq!(a * 2.0, Rgb::new(2.0, 4.0, 6.0));
    assert_eq!(2.0 * a, a * 2.0);
    assert_eq!(a / 2.0, Rgb::new(0.5, 1.0, 1.5));

    let mut c = a;
    c += b;
    c -= b;
    assert_eq!(c, a);
    c *= 2.0;
    c /= 2.0;
    assert_eq!(c, a);
    c *= b;
    assert_eq!(c, a * b);
}

#[test]
fn test_rgb_division_by_zero_is_raw() {
    let c = Rgb::new(1.0, 0.0, -1.0) / 0.0;
    assert!(c.is_inf());
    assert!(c.is_nan());
}

#[test]
fn test_rgba_division_by_zero_is_guarded() {
    let c = Rgba::new(1.0, 2.0, 3.0, 4.0) / 0.0;
    assert_eq!(c, Rgba::ZERO);
    assert!(!c.is_nan() && !c.is_inf());

    let mut d = Rgba::new(2.0, 4.0, 6.0, 8.0);
    d /= 2.0;
    assert_eq!(d, Rgba::new(1.0, 2.0, 3.0, 4.0));
    d /= 0.0;
    assert_eq!(d, Rgba::ZERO);
}

#[test]
fn test_rgba_times_rgb_keeps_alpha() {
    let mut c = Rgba::new(1.0, 1.0, 1.0, 0.5);
    c *= Rgb::new(0.5, 0.25, 2.0);
    assert_eq!(c, Rgba::new(0.5, 0.25, 2.0, 0.5));
}

#[test]
fn test_predicates_are_exact() {
    assert!(Rgb::BLACK.is_black());
    assert!(!Rgb::new(0.0, 1e-30, 0.0).is_black());
    assert!(Rgba::new(0.0, 0.0, 0.0, 1.0).is_black());
    assert!(Rgb::new(f32::NAN, 0.0, 0.0).is_nan());
    assert!(!Rgb::new(f32::INFINITY, 0.0, 0.0).is_nan());
    assert!(Rgb::new(0.0, 0.0, f32::NEG_INFINITY).is_inf());
    assert!(Rgba::new(0.0, 0.0, 0.0, f32::NAN).is_nan());
    assert!(Rgba::new(0.0, 0.0, 0.0, f32::INFINITY).is_inf());
}

#[test]
fn test_measures() {
    let c = Rgb::new(1.0, 0.5, -0.25);
    assert!((c.luminance() - (0.2126 + 0.7152 * 0.5 - 0.0722 * 0.25)).abs() < EPS);
    assert!((c.abs_luminance() - (0.2126 + 0.7152 * 0.5 + 0.0722 * 0.25)).abs() < EPS);
    assert!((c.energy() - 1.25 / 3.0).abs() < EPS);
    assert_eq!(c.minimum(), -0.25);
    assert_eq!(c.maximum(), 1.0);
    assert_eq!(Rgb::new(0.5, -2.0, 1.0).abs_max(), 2.0);
    assert_eq!(max_abs_diff(Rgb::new(1.0, 1.0, 1.0), Rgb::new(0.5, 3.0, 1.0)), 2.0);
    // White has unit luminance.
    assert!((Rgb::gray(1.0).luminance() - 1.0).abs() < EPS);
}

#[test]
fn test_channel_helpers() {
    let mut c = Rgb::new(2.0, 0.0, -4.0);
    c.invert();
    assert_eq!(c, Rgb::new(0.5, 0.0, -0.25));
    c.abs();
    assert_eq!(c, Rgb::new(0.5, 0.0, 0.25));

    let mut d = Rgb::new(0.2, 0.8, 0.5);
    d.darken(&Rgb::gray(0.5));
    assert_eq!(d, Rgb::new(0.2, 0.5, 0.5));
    d.lighten(&Rgb::gray(0.3));
    assert_eq!(d, Rgb::new(0.3, 0.5, 0.5));

    let mut e = Rgb::new(-1.0, 0.5, 2.0);
    e.clamp0();
    assert_eq!(e, Rgb::new(0.0, 0.5, 2.0));
    e.clamp01();
    assert_eq!(e, Rgb::new(0.0, 0.5, 1.0));

    let mut f = Rgba::new(-1.0, 0.5, 2.0, 3.0);
    f.clamp0();
    assert_eq!(f, Rgba::new(0.0, 0.5, 2.0, 3.0));
    f.clamp01();
    assert_eq!(f, Rgba::new(0.0, 0.5, 1.0, 1.0));
}

#[test]
fn test_premultiply() {
    let mut c = Rgba::new(0.5, 1.0, 0.25, 0.5);
    c.premultiply();
    assert_eq!(c, Rgba::new(0.25, 0.5, 0.125, 0.5));
}

#[test]
fn test_conversions_between_rgb_and_rgba() {
    let c = Rgb::new(0.1, 0.2, 0.3);
    assert_eq!(Rgba::from(c), Rgba::new(0.1, 0.2, 0.3, 1.0));
    assert_eq!(Rgb::from(Rgba::new(0.1, 0.2, 0.3, 0.0)), c);
    assert_eq!(Rgba::gray(0.5), Rgba::new(0.5, 0.5, 0.5, 0.5));
    assert_eq!(Rgba::from(c).with_alpha(0.25).a, 0.25);
}

// --- Interpolation ---

#[test]
fn test_mix_endpoints_and_affinity() {
    let a = Rgb::new(0.1, 0.7, -0.3);
    let b = Rgb::new(0.9, 0.2, 2.5);
    assert_eq!(mix(a, b, 0.0), a);
    assert_eq!(mix(a, b, 1.0), b);

    for i in 0..=20 {
        let t = i as f32 / 20.0;
        let expected = a + (b - a) * t;
        assert_rgb_close(mix(a, b, t), expected, EPS, "mix is affine in t");
    }

    // Extrapolation is allowed.
    assert_rgb_close(mix(a, b, 2.0), a + (b - a) * 2.0, EPS, "t outside [0, 1]");
}

#[test]
fn test_mix_rgba_interpolates_alpha() {
    let a = Rgba::new(0.0, 0.0, 0.0, 0.0);
    let b = Rgba::new(1.0, 1.0, 1.0, 1.0);
    assert_eq!(mix_rgba(a, b, 0.25), Rgba::gray(0.25));
}

// --- Clamping ---

#[test]
fn test_clamp_proportional_preserves_ratios() {
    let original = Rgb::new(4.0, 2.0, 1.0);
    let mut c = original;
    c.clamp_proportional(2.0);
    assert_eq!(c.r, 2.0);
    assert!((c.g / c.r - original.g / original.r).abs() < EPS);
    assert!((c.b / c.r - original.b / original.r).abs() < EPS);

    let original = Rgb::new(0.5, 1.0, 3.0);
    let mut c = original;
    c.clamp_proportional(1.5);
    assert_eq!(c.b, 1.5);
    assert!((c.r / c.g - original.r / original.g).abs() < EPS);

    let mut g = Rgb::new(0.5, 6.0, 3.0);
    g.clamp_proportional(3.0);
    assert_eq!(g, Rgb::new(0.25, 3.0, 1.5));
}

#[test]
fn test_clamp_proportional_below_limit_is_noop() {
    let original = Rgb::new(0.3, 0.9, 0.1);
    let mut c = original;
    c.clamp_proportional(1.0);
    assert_eq!(c, original);
}

#[test]
fn test_clamp_proportional_non_positive_max_is_bitwise_noop() {
    let original = Rgb::new(7.5, -3.0, f32::MAX);
    for max in [0.0, -1.0, -0.0] {
        let mut c = original;
        c.clamp_proportional(max);
        assert_eq!(c.r.to_bits(), original.r.to_bits());
        assert_eq!(c.g.to_bits(), original.g.to_bits());
        assert_eq!(c.b.to_bits(), original.b.to_bits());
    }
}

#[test]
fn test_rgba_clamp_proportional_ignores_alpha() {
    let mut c = Rgba::new(4.0, 2.0, 1.0, 9.0);
    c.clamp_proportional(1.0);
    assert_eq!(c, Rgba::new(1.0, 0.5, 0.25, 9.0));
}

// --- Exposure and gamma ---

#[test]
fn test_expgam_identity_optionally_clamps() {
    let mut c = Rgb::new(-0.5, 0.5, 1.5);
    c.expgam_adjust(0.0, 1.0, false);
    assert_eq!(c, Rgb::new(-0.5, 0.5, 1.5));
    c.expgam_adjust(0.0, 1.0, true);
    assert_eq!(c, Rgb::new(0.0, 0.5, 1.0));
}

#[test]
fn test_expgam_exposure_then_gamma() {
    let mut c = Rgb::new(-1.0, 1.0, 2.0);
    c.expgam_adjust(1.0, 1.0, false);
    assert_eq!(c.r, 0.0);
    assert!((c.g - (1.0 - (-1.0f32).exp())).abs() < EPS);
    assert!((c.b - (1.0 - (-2.0f32).exp())).abs() < EPS);

    let mut d = Rgb::new(-1.0, 0.25, 4.0);
    d.expgam_adjust(0.0, 0.5, false);
    assert_rgb_close(d, Rgb::new(0.0, 0.5, 2.0), EPS, "gamma only");
}

// --- Color spaces ---

#[test]
fn test_srgb_round_trip() {
    for i in 0..=1000 {
        let x = i as f32 / 1000.0;
        let c = Rgb::gray(x);
        let back = c.to_space(ColorSpace::Srgb, 1.0).to_linear(ColorSpace::Srgb, 1.0);
        assert_rgb_close(back, c, 1e-5, "sRGB encode/decode");
        let back = c.to_linear(ColorSpace::Srgb, 1.0).to_space(ColorSpace::Srgb, 1.0);
        assert_rgb_close(back, c, 1e-5, "sRGB decode/encode");
    }
}

#[test]
fn test_srgb_known_values() {
    assert!((space::srgb_from_linear(0.0)).abs() < EPS);
    assert!((space::srgb_from_linear(1.0) - 1.0).abs() < 1e-5);
    assert!((space::linear_from_srgb(0.5) - 0.214_041).abs() < 1e-5);
    assert!((space::linear_from_srgb(0.04) - 0.04 / 12.92).abs() < 1e-7);
}

#[test]
fn test_xyz_round_trip() {
    for r in 0..=10 {
        for g in 0..=10 {
            for b in 0..=10 {
                let c = Rgb::new(r as f32 / 10.0, g as f32 / 10.0, b as f32 / 10.0);
                let back = c.to_space(ColorSpace::XyzD65, 1.0).to_linear(ColorSpace::XyzD65, 1.0);
                assert_rgb_close(back, c, 1e-5, "XYZ round trip");
            }
        }
    }
}

#[test]
fn test_xyz_white_point() {
    let xyz = Rgb::gray(1.0).to_space(ColorSpace::XyzD65, 1.0);
    assert!((xyz.r - 0.9505).abs() < 1e-4);
    assert!((xyz.g - 1.0).abs() < 1e-4);
    assert!((xyz.b - 1.089).abs() < 1e-4);
}

#[test]
fn test_manual_gamma_round_trip() {
    for gi in 1..=50 {
        let gamma = gi as f32 / 10.0;
        for i in 0..=100 {
            let c = Rgb::gray(i as f32 / 100.0);
            let back = c
                .to_linear(ColorSpace::RawManualGamma, gamma)
                .to_space(ColorSpace::RawManualGamma, gamma);
            assert_rgb_close(back, c, 1e-4, "manual gamma round trip");
        }
    }
}

#[test]
fn test_manual_gamma_directions() {
    let c = Rgb::gray(0.25);
    assert_rgb_close(
        c.to_linear(ColorSpace::RawManualGamma, 2.0),
        Rgb::gray(0.0625),
        EPS,
        "to_linear raises to gamma",
    );
    assert_rgb_close(
        c.to_space(ColorSpace::RawManualGamma, 2.0),
        Rgb::gray(0.5),
        EPS,
        "to_space raises to 1/gamma",
    );
}

#[test]
fn test_manual_gamma_non_positive_is_clamped() {
    let c = Rgb::gray(0.5);
    let encoded = c.to_space(ColorSpace::RawManualGamma, 0.0);
    assert!(!encoded.is_nan() && !encoded.is_inf());
    assert_rgb_close(encoded, Rgb::gray(0.5f32.powf(100.0)), 1e-6, "gamma 0 -> 1e-2");
    let encoded_neg = c.to_space(ColorSpace::RawManualGamma, -3.0);
    assert_eq!(encoded, encoded_neg);
}

#[test]
fn test_linear_and_unit_gamma_are_identity() {
    let c = Rgb::new(0.3, -0.2, 4.0);
    assert_eq!(c.to_linear(ColorSpace::LinearRgb, 2.2), c);
    assert_eq!(c.to_space(ColorSpace::LinearRgb, 2.2), c);
    assert_eq!(c.to_linear(ColorSpace::RawManualGamma, 1.0), c);
    assert_eq!(c.to_space(ColorSpace::RawManualGamma, 1.0), c);
}

#[test]
fn test_space_conversion_leaves_alpha() {
    let c = Rgba::new(0.5, 0.5, 0.5, 0.3);
    for space in [
        ColorSpace::Srgb,
        ColorSpace::XyzD65,
        ColorSpace::RawManualGamma,
        ColorSpace::LinearRgb,
    ] {
        assert_eq!(c.to_space(space, 2.2).a, 0.3);
        assert_eq!(c.to_linear(space, 2.2).a, 0.3);
    }
}

#[test]
fn test_color_space_names() {
    assert_eq!(ColorSpace::from_name("XYZ"), Some(ColorSpace::XyzD65));
    assert_eq!(ColorSpace::from_name("bogus"), None);
    assert_eq!(ColorSpace::from("bogus".to_string()), ColorSpace::Srgb);
    for space in [
        ColorSpace::Srgb,
        ColorSpace::XyzD65,
        ColorSpace::RawManualGamma,
        ColorSpace::LinearRgb,
    ] {
        assert_eq!(ColorSpace::from_name(space.name()), Some(space));
    }
}

// --- Difference metric ---

#[test]
fn test_color_difference() {
    let a = Rgba::new(1.0, 0.0, 0.0, 1.0);
    let b = Rgba::new(0.0, 0.0, 0.0, 0.0);
    let lum_only = a.color_difference(&b, false);
    assert!((lum_only - 0.2126).abs() < EPS);
    assert_eq!(a.color_difference(&b, true), 1.0);

    // Alpha alone counts only with per-channel comparison.
    let c = Rgba::new(0.5, 0.5, 0.5, 0.0);
    let d = Rgba::new(0.5, 0.5, 0.5, 0.75);
    assert_eq!(c.color_difference(&d, false), 0.0);
    assert_eq!(c.color_difference(&d, true), 0.75);
}

// --- Codecs ---

#[test]
fn test_u8_packing_floors() {
    let c = Rgb::new(1.0, 0.5, 0.0);
    assert_eq!(c.to_u8(), [255, 127, 0]);
    // Out of range and NaN saturate.
    assert_eq!(Rgb::new(2.0, -1.0, f32::NAN).to_u8(), [255, 0, 0]);
    assert_eq!(Rgba::new(0.0, 0.0, 0.0, 1.0).to_u8(), [0, 0, 0, 255]);
}

#[test]
fn test_u8_unpacking_divides() {
    let c = Rgba::from_u8([255, 0, 51, 102]);
    assert_eq!(c, Rgba::new(1.0, 0.0, 0.2, 0.4));
    assert_eq!(Rgb::from_u8([255, 255, 0]), Rgb::new(1.0, 1.0, 0.0));
}

#[test]
fn test_f32_packing_copies() {
    let c = Rgba::new(-1.5, 0.25, 7.0, 0.5);
    assert_eq!(c.to_f32(), [-1.5, 0.25, 7.0, 0.5]);
    assert_eq!(Rgba::from_f32(c.to_f32()), c);
    assert_eq!(Rgb::from_f32([1.0, 2.0, 3.0]), Rgb::new(1.0, 2.0, 3.0));
}

#[test]
fn test_display() {
    assert_eq!(Rgb::new(1.0, 0.5, 0.0).to_string(), "[1, 0.5, 0]");
    assert_eq!(Rgba::new(1.0, 0.5, 0.0, 1.0).to_string(), "[1, 0.5, 0, 1]");
}

#[test]
fn test_rgbe_encoding() {
    assert_eq!(Rgbe::from(Rgb::BLACK), Rgbe([0, 0, 0, 0]));
    assert_eq!(Rgb::from(Rgbe([10, 20, 30, 0])), Rgb::BLACK);

    // 1.0 = 0.5 * 2^1: mantissa byte 128, exponent byte 129.
    assert_eq!(Rgbe::from(Rgb::new(1.0, 0.5, 0.0)), Rgbe([128, 64, 0, 129]));

    let c = Rgb::new(3.7, 0.02, 12.5);
    let back = Rgb::from(Rgbe::from(c));
    // Quantization error is bounded by one mantissa step of the largest channel.
    assert_rgb_close(back, c, 12.5 / 128.0, "RGBE round trip");
    assert!(back.r <= c.r && back.b <= c.b);
}
