use kintree_data::Gender;
use kintree_layout::EdgeKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque RGB colour, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color(pub u32);

impl Color {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0xff_ffff)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let hex = value
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6)
            .ok_or_else(|| format!("expected a #rrggbb colour, got {value:?}"))?;
        u32::from_str_radix(hex, 16)
            .map(Color)
            .map_err(|e| format!("invalid colour {value:?}: {e}"))
    }
}

/// How a line is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    /// Dash pattern, solid when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dash: Vec<f32>,
}

impl Stroke {
    pub fn new(width: f32, color: Color) -> Self {
        Self {
            color,
            width,
            dash: Vec::new(),
        }
    }

    pub fn dashed(mut self, dash: impl Into<Vec<f32>>) -> Self {
        self.dash = dash.into();
        self
    }
}

/// Path shape of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Curve {
    Straight,
    /// Orthogonal segments with rounded corners
    Smoothstep,
}

pub trait TreeStyle {
    fn card_fill(&self, gender: Option<Gender>) -> Color;
    fn card_stroke(&self) -> Stroke;
    fn edge_stroke(&self, kind: EdgeKind) -> Stroke;
    fn edge_curve(&self, kind: EdgeKind) -> Curve;
}

/// Colours of the tree view, overridable from the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub male: Color,
    pub female: Color,
    pub other: Color,
    pub unknown: Color,
    pub card_border: Color,
    pub descent: Stroke,
    pub spousal: Stroke,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            male: Color::from_rgb(0x93, 0xc5, 0xfd),
            female: Color::from_rgb(0xf9, 0xa8, 0xd4),
            other: Color::from_rgb(0xc4, 0xb5, 0xfd),
            unknown: Color::from_rgb(0xcb, 0xd5, 0xe1),
            card_border: Color::from_rgb(0xd1, 0xd5, 0xdb),
            descent: Stroke::new(2.0, Color::from_rgb(0x64, 0x74, 0x8b)),
            spousal: Stroke::new(2.0, Color::from_rgb(0xf4, 0x72, 0xb6)).dashed([6.0, 4.0]),
        }
    }
}

impl TreeStyle for Palette {
    fn card_fill(&self, gender: Option<Gender>) -> Color {
        match gender {
            Some(Gender::Male) => self.male,
            Some(Gender::Female) => self.female,
            Some(Gender::Other) => self.other,
            None => self.unknown,
        }
    }

    fn card_stroke(&self) -> Stroke {
        Stroke::new(2.0, self.card_border)
    }

    fn edge_stroke(&self, kind: EdgeKind) -> Stroke {
        match kind {
            EdgeKind::Descent => self.descent.clone(),
            EdgeKind::Spousal => self.spousal.clone(),
        }
    }

    fn edge_curve(&self, kind: EdgeKind) -> Curve {
        match kind {
            EdgeKind::Descent => Curve::Smoothstep,
            EdgeKind::Spousal => Curve::Straight,
        }
    }
}
