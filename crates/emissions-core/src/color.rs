//! Sequential colour scales and value-to-colour mapping.
//!
//! Every scale has nine stops from light to dark. A metric value is
//! normalised against a [`ColorRange`] and linearly interpolated in RGB
//! between the two nearest stops.

use emissions_types::{ColorRange, ColorScale, SequentialScale};

/// An sRGB colour.
type Rgb = (u8, u8, u8);

/// Number of stops per scale.
pub const STOP_COUNT: usize = 9;

const REDS: [Rgb; STOP_COUNT] = [
    (0xff, 0xf5, 0xf0),
    (0xfe, 0xe0, 0xd2),
    (0xfc, 0xbb, 0xa1),
    (0xfc, 0x92, 0x72),
    (0xfb, 0x6a, 0x4a),
    (0xef, 0x3b, 0x2c),
    (0xcb, 0x18, 0x1d),
    (0xa5, 0x0f, 0x15),
    (0x67, 0x00, 0x0d),
];

const BLUES: [Rgb; STOP_COUNT] = [
    (0xf7, 0xfb, 0xff),
    (0xde, 0xeb, 0xf7),
    (0xc6, 0xdb, 0xef),
    (0x9e, 0xca, 0xe1),
    (0x6b, 0xae, 0xd6),
    (0x42, 0x92, 0xc6),
    (0x21, 0x71, 0xb5),
    (0x08, 0x51, 0x9c),
    (0x08, 0x30, 0x6b),
];

const GREENS: [Rgb; STOP_COUNT] = [
    (0xf7, 0xfc, 0xf5),
    (0xe5, 0xf5, 0xe0),
    (0xc7, 0xe9, 0xc0),
    (0xa1, 0xd9, 0x9b),
    (0x74, 0xc4, 0x76),
    (0x41, 0xab, 0x5d),
    (0x23, 0x8b, 0x45),
    (0x00, 0x6d, 0x2c),
    (0x00, 0x44, 0x1b),
];

const GREYS: [Rgb; STOP_COUNT] = [
    (0xff, 0xff, 0xff),
    (0xf0, 0xf0, 0xf0),
    (0xd9, 0xd9, 0xd9),
    (0xbd, 0xbd, 0xbd),
    (0x96, 0x96, 0x96),
    (0x73, 0x73, 0x73),
    (0x52, 0x52, 0x52),
    (0x25, 0x25, 0x25),
    (0x00, 0x00, 0x00),
];

const ORANGES: [Rgb; STOP_COUNT] = [
    (0xff, 0xf5, 0xeb),
    (0xfe, 0xe6, 0xce),
    (0xfd, 0xd0, 0xa2),
    (0xfd, 0xae, 0x6b),
    (0xfd, 0x8d, 0x3c),
    (0xf1, 0x69, 0x13),
    (0xd9, 0x48, 0x01),
    (0xa6, 0x36, 0x03),
    (0x7f, 0x27, 0x04),
];

const PURPLES: [Rgb; STOP_COUNT] = [
    (0xfc, 0xfb, 0xfd),
    (0xef, 0xed, 0xf5),
    (0xda, 0xda, 0xeb),
    (0xbc, 0xbd, 0xdc),
    (0x9e, 0x9a, 0xc8),
    (0x80, 0x7d, 0xba),
    (0x6a, 0x51, 0xa3),
    (0x54, 0x27, 0x8f),
    (0x3f, 0x00, 0x7d),
];

const fn stops(scale: SequentialScale) -> &'static [Rgb; STOP_COUNT] {
    match scale {
        SequentialScale::Reds => &REDS,
        SequentialScale::Blues => &BLUES,
        SequentialScale::Greens => &GREENS,
        SequentialScale::Greys => &GREYS,
        SequentialScale::Oranges => &ORANGES,
        SequentialScale::Purples => &PURPLES,
    }
}

fn to_hex((r, g, b): Rgb) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// The serializable description of `scale`: its name and hex stops.
pub fn color_scale(scale: SequentialScale) -> ColorScale {
    ColorScale {
        name: scale,
        stops: stops(scale).iter().copied().map(to_hex).collect(),
    }
}

/// Position of `value` within `range`, clamped to `[0, 1]`.
///
/// A zero-width range or a non-finite value maps to `0`.
pub fn normalize(value: f64, range: ColorRange) -> f64 {
    let span = range.span();
    if span <= 0.0 || !span.is_finite() {
        return 0.0;
    }
    let t = (value - range.min) / span;
    if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 }
}

/// Fill colour for `value`, as `#rrggbb`.
pub fn color_for(value: f64, range: ColorRange, scale: SequentialScale) -> String {
    to_hex(interpolate(stops(scale), normalize(value, range)))
}

// `t` is clamped to [0, 1] so the scaled position fits the stop indices,
// and every channel blend stays within 0..=255.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn interpolate(stops: &[Rgb; STOP_COUNT], t: f64) -> Rgb {
    let last = STOP_COUNT.saturating_sub(1);
    let position = t * last as f64;
    let lower = (position.floor() as usize).min(last);
    let upper = lower.saturating_add(1).min(last);
    let frac = position - lower as f64;

    let (Some(&a), Some(&b)) = (stops.get(lower), stops.get(upper)) else {
        return (0, 0, 0);
    };
    let blend = |x: u8, y: u8| -> u8 {
        let mixed = f64::from(y).mul_add(frac, f64::from(x) * (1.0 - frac));
        mixed.round().clamp(0.0, 255.0) as u8
    };
    (blend(a.0, b.0), blend(a.1, b.1), blend(a.2, b.2))
}
