use egui::Color32;
use egui::ecolor::rgb_from_hsv;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hue steps in a full rainbow cycle
pub const HUE_CYCLE: u16 = 360;

/// The color a new segment is painted with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ToolColor {
    /// A fixed, user-picked color
    Solid(Color32),
    /// No color picked: every segment advances the hue by one degree
    Rainbow,
}

impl Default for ToolColor {
    fn default() -> Self {
        Self::Solid(Color32::BLACK)
    }
}

/// Hue counter used while in rainbow mode.
///
/// The counter is global to the session, so consecutive strokes continue
/// the cycle where the previous one left off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RainbowCycle {
    hue: u16,
}

impl RainbowCycle {
    /// Hue the next rainbow segment will use, in degrees
    pub fn hue(&self) -> u16 {
        self.hue
    }

    /// Returns the color for the current hue and advances the counter
    pub fn next_color(&mut self) -> Color32 {
        let color = hsl(self.hue as f32, 1.0, 0.5);
        self.hue = (self.hue + 1) % HUE_CYCLE;
        color
    }
}

/// Converts an HSL triple (hue in degrees, saturation and lightness in `0..=1`)
/// into an opaque color
pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    // CSS hsl() lives in sRGB space, so convert through HSV without gamma.
    let value = lightness + saturation * lightness.min(1.0 - lightness);
    let hsv_saturation = if value <= 0.0 {
        0.0
    } else {
        2.0 * (1.0 - lightness / value)
    };
    let hue = hue.rem_euclid(360.0) / 360.0;
    let [r, g, b] = rgb_from_hsv((hue, hsv_saturation, value));
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgb(channel(r), channel(g), channel(b))
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unrecognized color '{0}'")]
pub struct ParseColorError(pub String);

/// Formats a color the way it is stored in saved drawings
pub fn format_color(color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == u8::MAX {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

/// Parses `#rgb`, `#rrggbb`, `#rrggbbaa`, `hsl(h, s%, l%)` and a handful of
/// CSS color names
pub fn parse_color(text: &str) -> Result<Color32, ParseColorError> {
    let trimmed = text.trim();
    let err = || ParseColorError(text.to_owned());

    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(err);
    }
    if let Some(args) = trimmed
        .strip_prefix("hsl(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_hsl(args).ok_or_else(err);
    }

    let named = match trimmed.to_ascii_lowercase().as_str() {
        "black" => Color32::BLACK,
        "white" => Color32::WHITE,
        "red" => Color32::from_rgb(255, 0, 0),
        "green" => Color32::from_rgb(0, 128, 0),
        "blue" => Color32::from_rgb(0, 0, 255),
        "yellow" => Color32::from_rgb(255, 255, 0),
        "cyan" => Color32::from_rgb(0, 255, 255),
        "magenta" => Color32::from_rgb(255, 0, 255),
        "gray" | "grey" => Color32::from_rgb(128, 128, 128),
        "transparent" => Color32::TRANSPARENT,
        _ => return Err(err()),
    };
    Ok(named)
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    let nibble = |i: usize| {
        let v = u8::from_str_radix(hex.get(i..i + 1)?, 16).ok()?;
        Some(v * 17)
    };

    match hex.len() {
        3 => Some(Color32::from_rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Some(Color32::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color32::from_rgba_unmultiplied(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            byte(6)?,
        )),
        _ => None,
    }
}

fn parse_hsl(args: &str) -> Option<Color32> {
    let mut parts = args.split(',').map(str::trim);
    let hue: f32 = parts.next()?.trim_end_matches("deg").parse().ok()?;
    let saturation: f32 = parts.next()?.strip_suffix('%')?.trim().parse().ok()?;
    let lightness: f32 = parts.next()?.strip_suffix('%')?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(hsl(
        hue,
        (saturation / 100.0).clamp(0.0, 1.0),
        (lightness / 100.0).clamp(0.0, 1.0),
    ))
}
