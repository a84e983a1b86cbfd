//! Color handling for ZML diagrams
//!
//! This module provides the [`Color`] type which wraps the `AlphaColor<Srgb>`
//! type from the color crate, together with the resolver that turns a color
//! token from the command line or a configuration file into a concrete color.
//!
//! # Accepted Tokens
//!
//! Tokens are tried in the following order, the first form that matches wins:
//!
//! 1. A named color (SVG color keywords plus a few extras such as `platered`),
//!    matched case-sensitively.
//! 2. `rgb(r, g, b)` with integer components.
//! 3. `#rrggbb` with exactly six hexadecimal digits.
//! 4. `hsv(h, s, v)` with the hue in degrees and saturation/value as
//!    percentages.
//!
//! Anything else resolves to black. Resolution never fails.

use std::{collections::HashMap, fmt, sync::OnceLock};

use color::{AlphaColor, Srgb};
use winnow::{
    Parser as _,
    ascii::space0,
    combinator::{delimited, eof, separated},
    error::{ContextError, ErrMode},
    token::take_while,
};

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Wrapper around the `AlphaColor<Srgb>` type from the color crate.
///
/// All colors produced by [`Color::resolve`] are fully opaque.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: AlphaColor<Srgb>,
}

impl Color {
    /// Create a color from 8-bit red, green and blue channels.
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            color: AlphaColor::from_rgb8(red, green, blue),
        }
    }

    /// Resolve a color token into a [`Color`].
    ///
    /// Unrecognized tokens resolve to black.
    ///
    /// # Examples
    ///
    /// ```
    /// use zml_core::color::Color;
    ///
    /// assert_eq!(Color::resolve("#ff0000").rgb8(), (255, 0, 0));
    /// assert_eq!(Color::resolve("rgb(1, 2, 3)").rgb8(), (1, 2, 3));
    /// assert_eq!(Color::resolve("hsv(0, 100, 100)").rgb8(), (255, 0, 0));
    /// assert_eq!(Color::resolve("unknown-color").rgb8(), (0, 0, 0));
    /// ```
    pub fn resolve(token: &str) -> Self {
        if let Some([red, green, blue]) = named_colors().get(token) {
            return Self::from_rgb8(*red, *green, *blue);
        }

        resolve_rgb(token)
            .or_else(|| resolve_hex(token))
            .or_else(|| resolve_hsv(token))
            .map(|[red, green, blue]| Self::from_rgb8(red, green, blue))
            .unwrap_or_default()
    }

    /// Returns the red, green and blue channels as 8-bit values.
    pub fn rgb8(self) -> (u8, u8, u8) {
        let rgba = self.color.to_rgba8();
        (rgba.r, rgba.g, rgba.b)
    }

    /// Returns the wrapped color crate value.
    pub fn to_alpha_color(self) -> AlphaColor<Srgb> {
        self.color
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::from_rgb8(0, 0, 0)
    }
}

/// Formats the color as `#rrggbb`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (red, green, blue) = self.rgb8();
        write!(f, "#{red:02x}{green:02x}{blue:02x}")
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

/// `rgb(r, g, b)`; components are clamped into `0..=255`.
fn resolve_rgb(token: &str) -> Option<[u8; 3]> {
    let components = function_arguments(token, "rgb")?
        .into_iter()
        .map(|arg| arg.parse::<i64>().ok().map(|value| value.clamp(0, 255) as u8))
        .collect::<Option<Vec<_>>>()?;

    components.try_into().ok()
}

/// `#rrggbb`
fn resolve_hex(token: &str) -> Option<[u8; 3]> {
    let digits = token.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

/// `hsv(h, s, v)`
fn resolve_hsv(token: &str) -> Option<[u8; 3]> {
    let components = function_arguments(token, "hsv")?
        .into_iter()
        .map(|arg| arg.parse::<f64>().ok())
        .collect::<Option<Vec<_>>>()?;

    let [hue, saturation, value]: [f64; 3] = components.try_into().ok()?;
    Some(hsv_to_rgb(hue, saturation, value))
}

/// Convert HSV to RGB using the six-sector chroma/match formulation.
///
/// `hue` is in degrees and wraps modulo 360; `saturation` and `value` are
/// percentages. Out-of-range saturation or value yields black.
fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> [u8; 3] {
    let saturation = saturation / 100.0;
    let value = value / 100.0;
    if !(0.0..=1.0).contains(&saturation) || !(0.0..=1.0).contains(&value) {
        return [0, 0, 0];
    }

    let hue = hue.rem_euclid(360.0);
    let chroma = value * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - ((sector % 2.0) - 1.0).abs());

    let (red, green, blue) = match sector {
        s if s <= 1.0 => (chroma, x, 0.0),
        s if s <= 2.0 => (x, chroma, 0.0),
        s if s <= 3.0 => (0.0, chroma, x),
        s if s <= 4.0 => (0.0, x, chroma),
        s if s <= 5.0 => (x, 0.0, chroma),
        s if s <= 6.0 => (chroma, 0.0, x),
        _ => return [0, 0, 0],
    };

    let offset = value - chroma;
    let to_channel = |component: f64| ((component + offset) * 255.0) as u8;
    [to_channel(red), to_channel(green), to_channel(blue)]
}

/// Split `name(a, b, c)` into its raw arguments.
///
/// Returns `None` when the token is not a call of `name`.
fn function_arguments<'s>(token: &'s str, name: &'static str) -> Option<Vec<&'s str>> {
    let mut input = token;
    call(&mut input, name).ok()
}

fn call<'s>(input: &mut &'s str, name: &'static str) -> IResult<Vec<&'s str>> {
    delimited((name, '('), separated(1.., argument, ','), (')', eof)).parse_next(input)
}

fn argument<'s>(input: &mut &'s str) -> IResult<&'s str> {
    delimited(
        space0,
        take_while(1.., |c: char| !matches!(c, ',' | ')' | ' ' | '\t')),
        space0,
    )
    .parse_next(input)
}

fn named_colors() -> &'static HashMap<&'static str, [u8; 3]> {
    static NAMED_COLORS: OnceLock<HashMap<&'static str, [u8; 3]>> = OnceLock::new();
    NAMED_COLORS.get_or_init(|| COLOR_TABLE.iter().copied().collect())
}

/// SVG color keywords plus the extra names accepted by ZML.
const COLOR_TABLE: &[(&str, [u8; 3])] = &[
    ("aliceblue", [240, 248, 255]),
    ("antiquewhite", [250, 235, 215]),
    ("aqua", [0, 255, 255]),
    ("aquamarine", [127, 255, 212]),
    ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]),
    ("bisque", [255, 228, 196]),
    ("black", [0, 0, 0]),
    ("charlestongreen", [35, 43, 43]),
    ("eerieblack", [27, 27, 27]),
    ("jetblack", [52, 52, 52]),
    ("blanchedalmond", [255, 235, 205]),
    ("blue", [0, 0, 255]),
    ("blueviolet", [138, 43, 226]),
    ("brown", [165, 42, 42]),
    ("burlywood", [222, 184, 135]),
    ("cadetblue", [95, 158, 160]),
    ("chartreuse", [127, 255, 0]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("cornsilk", [255, 248, 220]),
    ("crimson", [220, 20, 60]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkcyan", [0, 139, 139]),
    ("darkgoldenrod", [184, 134, 11]),
    ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkgrey", [169, 169, 169]),
    ("darkkhaki", [189, 183, 107]),
    ("darkmagenta", [139, 0, 139]),
    ("darkolivegreen", [85, 107, 47]),
    ("darkorange", [255, 140, 0]),
    ("darkorchid", [153, 50, 204]),
    ("darkred", [139, 0, 0]),
    ("darksalmon", [233, 150, 122]),
    ("darkseagreen", [143, 188, 143]),
    ("darkslateblue", [72, 61, 139]),
    ("darkslategray", [47, 79, 79]),
    ("darkslategrey", [47, 79, 79]),
    ("darkturquoise", [0, 206, 209]),
    ("darkviolet", [148, 0, 211]),
    ("deeppink", [255, 20, 147]),
    ("deepskyblue", [0, 191, 255]),
    ("dimgray", [105, 105, 105]),
    ("dimgrey", [105, 105, 105]),
    ("dodgerblue", [30, 144, 255]),
    ("firebrick", [178, 34, 34]),
    ("floralwhite", [255, 250, 240]),
    ("forestgreen", [34, 139, 34]),
    ("fuchsia", [255, 0, 255]),
    ("gainsboro", [220, 220, 220]),
    ("ghostwhite", [248, 248, 255]),
    ("gold", [255, 215, 0]),
    ("goldenrod", [218, 165, 32]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("greenyellow", [173, 255, 47]),
    ("grey", [128, 128, 128]),
    ("honeydew", [240, 255, 240]),
    ("hotpink", [255, 105, 180]),
    ("indianred", [205, 92, 92]),
    ("indigo", [75, 0, 130]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lavenderblush", [255, 240, 245]),
    ("lawngreen", [124, 252, 0]),
    ("lemonchiffon", [255, 250, 205]),
    ("lightblue", [173, 216, 230]),
    ("lightcoral", [240, 128, 128]),
    ("lightcyan", [224, 255, 255]),
    ("lightgoldenrodyellow", [250, 250, 210]),
    ("lightgray", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]),
    ("lightgrey", [211, 211, 211]),
    ("lightpink", [255, 182, 193]),
    ("lightsalmon", [255, 160, 122]),
    ("lightseagreen", [32, 178, 170]),
    ("lightskyblue", [135, 206, 250]),
    ("lightslategray", [119, 136, 153]),
    ("lightslategrey", [119, 136, 153]),
    ("lightsteelblue", [176, 196, 222]),
    ("lightyellow", [255, 255, 224]),
    ("lime", [0, 255, 0]),
    ("limegreen", [50, 205, 50]),
    ("linen", [250, 240, 230]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("mediumaquamarine", [102, 205, 170]),
    ("mediumblue", [0, 0, 205]),
    ("mediumorchid", [186, 85, 211]),
    ("mediumpurple", [147, 112, 219]),
    ("mediumseagreen", [60, 179, 113]),
    ("mediumslateblue", [123, 104, 238]),
    ("mediumspringgreen", [0, 250, 154]),
    ("mediumturquoise", [72, 209, 204]),
    ("mediumvioletred", [199, 21, 133]),
    ("midnightblue", [25, 25, 112]),
    ("mintcream", [245, 255, 250]),
    ("mistyrose", [255, 228, 225]),
    ("moccasin", [255, 228, 181]),
    ("navajowhite", [255, 222, 173]),
    ("navy", [0, 0, 128]),
    ("oldlace", [253, 245, 230]),
    ("olive", [128, 128, 0]),
    ("olivedrab", [107, 142, 35]),
    ("orange", [255, 165, 0]),
    ("orangered", [255, 69, 0]),
    ("orchid", [218, 112, 214]),
    ("palegoldenrod", [238, 232, 170]),
    ("palegreen", [152, 251, 152]),
    ("paleturquoise", [175, 238, 238]),
    ("palevioletred", [219, 112, 147]),
    ("papayawhip", [255, 239, 213]),
    ("peachpuff", [255, 218, 185]),
    ("peru", [205, 133, 63]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("powderblue", [176, 224, 230]),
    ("purple", [128, 0, 128]),
    ("red", [255, 0, 0]),
    ("platered", [255, 80, 80]),
    ("rosybrown", [188, 143, 143]),
    ("royalblue", [65, 105, 225]),
    ("saddlebrown", [139, 69, 19]),
    ("salmon", [250, 128, 114]),
    ("sandybrown", [244, 164, 96]),
    ("seagreen", [46, 139, 87]),
    ("seashell", [255, 245, 238]),
    ("sienna", [160, 82, 45]),
    ("silver", [192, 192, 192]),
    ("skyblue", [135, 206, 235]),
    ("slateblue", [106, 90, 205]),
    ("slategray", [112, 128, 144]),
    ("slategrey", [112, 128, 144]),
    ("snow", [255, 250, 250]),
    ("springgreen", [0, 255, 127]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("teal", [0, 128, 128]),
    ("thistle", [216, 191, 216]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("wheat", [245, 222, 179]),
    ("white", [255, 255, 255]),
    ("whitesmoke", [245, 245, 245]),
    ("yellow", [255, 255, 0]),
    ("yellowgreen", [154, 205, 50]),
];

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_resolve_named() {
        assert_eq!(Color::resolve("white").rgb8(), (255, 255, 255));
        assert_eq!(Color::resolve("platered").rgb8(), (255, 80, 80));
        assert_eq!(Color::resolve("jetblack").rgb8(), (52, 52, 52));
    }

    #[test]
    fn test_resolve_named_is_case_sensitive() {
        assert_eq!(Color::resolve("White").rgb8(), (0, 0, 0));
    }

    #[test]
    fn test_resolve_hex() {
        assert_eq!(Color::resolve("#ff0000").rgb8(), (255, 0, 0));
        assert_eq!(Color::resolve("#0A0b0C").rgb8(), (10, 11, 12));
    }

    #[test]
    fn test_resolve_hex_rejects_bad_input() {
        assert_eq!(Color::resolve("#fff").rgb8(), (0, 0, 0));
        assert_eq!(Color::resolve("#gg0000").rgb8(), (0, 0, 0));
        assert_eq!(Color::resolve("#ff00000").rgb8(), (0, 0, 0));
    }

    #[test]
    fn test_resolve_rgb() {
        assert_eq!(Color::resolve("rgb(1,2,3)").rgb8(), (1, 2, 3));
        assert_eq!(Color::resolve("rgb( 10 ,\t20, 30 )").rgb8(), (10, 20, 30));
    }

    #[test]
    fn test_resolve_rgb_clamps_components() {
        assert_eq!(Color::resolve("rgb(300, -5, 128)").rgb8(), (255, 0, 128));
    }

    #[test]
    fn test_resolve_rgb_wrong_arity() {
        assert_eq!(Color::resolve("rgb(1,2)").rgb8(), (0, 0, 0));
        assert_eq!(Color::resolve("rgb(1,2,3,4)").rgb8(), (0, 0, 0));
        assert_eq!(Color::resolve("rgb(a,2,3)").rgb8(), (0, 0, 0));
        assert_eq!(Color::resolve("rgb(1,2,3)x").rgb8(), (0, 0, 0));
    }

    #[test]
    fn test_resolve_hsv() {
        assert_eq!(Color::resolve("hsv(0,100,100)").rgb8(), (255, 0, 0));
        assert_eq!(Color::resolve("hsv(120, 100, 100)").rgb8(), (0, 255, 0));
        assert_eq!(Color::resolve("hsv(240, 100, 100)").rgb8(), (0, 0, 255));
        assert_eq!(Color::resolve("hsv(0, 0, 100)").rgb8(), (255, 255, 255));
    }

    #[test]
    fn test_resolve_hsv_out_of_range_is_black() {
        assert_eq!(Color::resolve("hsv(0, 101, 100)").rgb8(), (0, 0, 0));
        assert_eq!(Color::resolve("hsv(0, 100, 150)").rgb8(), (0, 0, 0));
    }

    #[test]
    fn test_resolve_unknown() {
        assert_eq!(Color::resolve("unknown-color").rgb8(), (0, 0, 0));
        assert_eq!(Color::resolve("").rgb8(), (0, 0, 0));
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::resolve("teal").to_string(), "#008080");
        assert_eq!(Color::default().to_string(), "#000000");
    }

    proptest! {
        #[test]
        fn prop_hsv_hue_wraps(hue in 0u32..360, turns in 1u32..4) {
            let base = Color::resolve(&format!("hsv({hue}, 80, 90)"));
            let wrapped = Color::resolve(&format!("hsv({}, 80, 90)", hue + 360 * turns));
            prop_assert_eq!(base.rgb8(), wrapped.rgb8());
        }

        #[test]
        fn prop_rgb_round_trips(red in any::<u8>(), green in any::<u8>(), blue in any::<u8>()) {
            let color = Color::resolve(&format!("rgb({red}, {green}, {blue})"));
            prop_assert_eq!(color.rgb8(), (red, green, blue));
            let hex = Color::resolve(&color.to_string());
            prop_assert_eq!(hex.rgb8(), (red, green, blue));
        }
    }
}
