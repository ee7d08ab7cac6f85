use clap::ValueEnum;
use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub type Rgb = (u8, u8, u8);

/// Colours for one paint pass: ring background, liquid, label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub background: Rgb,
    pub filled: Rgb,
    pub text: Rgb,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Ocean,
    Fire,
    Forest,
    Purple,
    #[value(alias = "mono")]
    #[serde(alias = "mono")]
    Monochrome,
}

impl Theme {
    pub fn colors(&self) -> ThemeColors {
        // (hue, saturation) of the liquid; the ring is a pale tint of the same hue
        let (hue, sat) = match self {
            Theme::Ocean => (200.0, 0.85),
            Theme::Fire => (20.0, 0.95),
            Theme::Forest => (110.0, 0.7),
            Theme::Purple => (285.0, 0.75),
            Theme::Monochrome => (0.0, 0.0),
        };

        ThemeColors {
            background: hsl(hue, sat * 0.35, 0.85),
            filled: hsl(hue, sat, 0.45),
            text: hsl(hue, sat * 0.2, 0.15),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Ocean => "ocean",
            Theme::Fire => "fire",
            Theme::Forest => "forest",
            Theme::Purple => "purple",
            Theme::Monochrome => "monochrome",
        }
    }

    pub fn all() -> &'static [Theme] {
        &[
            Theme::Ocean,
            Theme::Fire,
            Theme::Forest,
            Theme::Purple,
            Theme::Monochrome,
        ]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|t| t == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }
}

fn hsl(h: f32, s: f32, l: f32) -> Rgb {
    let rgb: Srgb = Hsl::new(h, s, l).into_color();
    let rgb: Srgb<u8> = rgb.into_format();
    (rgb.red, rgb.green, rgb.blue)
}

/// Parse "#RRGGBB", "RRGGBB" or the three-digit short form.
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let rgb = Srgb::<u8>::from_str(hex.trim()).ok()?;
    Some((rgb.red, rgb.green, rgb.blue))
}

/// Interpolate between two colors
pub fn lerp_color(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    (
        (a.0 as f32 + (b.0 as f32 - a.0 as f32) * t).round() as u8,
        (a.1 as f32 + (b.1 as f32 - a.1 as f32) * t).round() as u8,
        (a.2 as f32 + (b.2 as f32 - a.2 as f32) * t).round() as u8,
    )
}
