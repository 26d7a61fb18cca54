use crate::domain::FeatureRole;
use serde::Serialize;

pub const MAIN_COLOR: &str = "#8A2BE2";
pub const CONTEXT_COLOR: &str = "#666666";

/// Outline style for a county polygon (outlines only, never filled)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineStyle {
    pub color: &'static str,
    pub weight: u8,
    pub opacity: f64,
    pub fill: bool,
    pub fill_opacity: f64,
}

impl OutlineStyle {
    pub fn for_role(role: FeatureRole) -> Self {
        match role {
            FeatureRole::Main => Self::outline(MAIN_COLOR, 3, 0.9),
            FeatureRole::Context => Self::outline(CONTEXT_COLOR, 2, 0.7),
        }
    }

    /// Pointer over a context county; the main county keeps its own style
    pub fn hover(role: FeatureRole) -> Self {
        match role {
            FeatureRole::Main => Self::for_role(FeatureRole::Main),
            FeatureRole::Context => Self::outline(MAIN_COLOR, 3, 0.8),
        }
    }

    fn outline(color: &'static str, weight: u8, opacity: f64) -> Self {
        Self {
            color,
            weight,
            opacity,
            fill: false,
            fill_opacity: 0.0,
        }
    }
}

/// Text style for a county name label, anchored on its center
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelStyle {
    pub font_size_px: u8,
    pub bold: bool,
    pub color: &'static str,
}

impl LabelStyle {
    pub fn for_role(role: FeatureRole) -> Self {
        Self {
            font_size_px: match role {
                FeatureRole::Main => 13,
                FeatureRole::Context => 12,
            },
            bold: true,
            color: "#000000",
        }
    }
}
