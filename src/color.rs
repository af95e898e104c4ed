//! Color Helpers
//!
//! Random HSL colors for new records and conversion of CSS color strings to
//! the `#rrggbb` form a native color input accepts.

use rand::Rng;

/// Fixed saturation/lightness pair (percent) for random colors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorProfile {
    pub saturation: u8,
    pub lightness: u8,
}

/// `hsl(H, S%, L%)` with H drawn uniformly from [0, 360)
pub fn random_color(profile: ColorProfile) -> String {
    let hue: u16 = rand::thread_rng().gen_range(0..360);
    format!("hsl({}, {}%, {}%)", hue, profile.saturation, profile.lightness)
}

/// Convert `#rgb`, `#rrggbb`, `rgb(..)`/`rgba(..)` or `hsl(..)`/`hsla(..)` to
/// lowercase `#rrggbb`. Returns `None` for anything else.
pub fn to_hex(color: &str) -> Option<String> {
    let color = color.trim().to_ascii_lowercase();
    let (r, g, b) = if let Some(hex) = color.strip_prefix('#') {
        parse_hex(hex)?
    } else if let Some(args) = function_args(&color, &["rgba", "rgb"]) {
        parse_rgb(&args)?
    } else if let Some(args) = function_args(&color, &["hsla", "hsl"]) {
        parse_hsl(&args)?
    } else {
        return None;
    };
    Some(format!("#{:02x}{:02x}{:02x}", r, g, b))
}

/// Whether the string is a color this module understands
#[cfg(test)]
pub fn is_valid_color(color: &str) -> bool {
    to_hex(color).is_some()
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some((digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some((pair(0)?, pair(2)?, pair(4)?))
        }
        _ => None,
    }
}

/// Split `name(a, b, c)` into its arguments; accepts comma or space separators
fn function_args(color: &str, names: &[&str]) -> Option<Vec<String>> {
    let name = names.iter().find(|name| color.starts_with(**name))?;
    let inner = color[name.len()..].trim().strip_prefix('(')?.strip_suffix(')')?;
    let args: Vec<String> = inner
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();
    if args.len() < 3 {
        return None;
    }
    Some(args)
}

fn parse_rgb(args: &[String]) -> Option<(u8, u8, u8)> {
    let channel = |raw: &str| -> Option<u8> {
        let value = match raw.strip_suffix('%') {
            Some(percent) => percent.parse::<f64>().ok()? * 2.55,
            None => raw.parse::<f64>().ok()?,
        };
        Some(value.round().clamp(0.0, 255.0) as u8)
    };
    Some((channel(&args[0])?, channel(&args[1])?, channel(&args[2])?))
}

fn parse_hsl(args: &[String]) -> Option<(u8, u8, u8)> {
    let hue: f64 = args[0].trim_end_matches("deg").parse().ok()?;
    let saturation: f64 = args[1].strip_suffix('%')?.parse().ok()?;
    let lightness: f64 = args[2].strip_suffix('%')?.parse().ok()?;
    Some(hsl_to_rgb(hue, saturation / 100.0, lightness / 100.0))
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}
