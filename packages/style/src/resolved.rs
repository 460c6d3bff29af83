//! Output of the container style resolver. Derived on every resolve call
//! and never written back into the layout.

use serde::Serialize;

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleFamily {
    Text,
    Outlined,
    TopBottom,
    Full,
    Primary,
    Tonal,
    Surface,
}

impl StyleFamily {
    pub fn parse(name: &str) -> Option<Self> {
        let family = match name.trim().to_ascii_lowercase().as_str() {
            "text" => StyleFamily::Text,
            "outlined" => StyleFamily::Outlined,
            "topbottom" => StyleFamily::TopBottom,
            "full" => StyleFamily::Full,
            "primary" => StyleFamily::Primary,
            "tonal" => StyleFamily::Tonal,
            "surface" => StyleFamily::Surface,
            _ => return None,
        };
        Some(family)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Shape {
    Rounded { corner_dp: f32 },
    Rectangle,
    Pill,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GradientOrientation {
    Horizontal,
    Vertical,
    Diagonal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Fill {
    None,
    Solid {
        color: Color,
    },
    Gradient {
        start: Color,
        end: Color,
        orientation: GradientOrientation,
    },
}

impl Fill {
    pub fn is_none(&self) -> bool {
        matches!(self, Fill::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BorderMode {
    None,
    Full,
    TopBottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Border {
    None,
    /// Outline on all four sides
    Full { thickness_dp: f32, color: Color },
    /// Horizontal rules above and below
    TopBottom { thickness_dp: f32, color: Color },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HorizontalAlignment {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Alignment {
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum WidthSizing {
    Wrap,
    Fill,
    Fixed { dp: f32 },
    Fraction { fraction: f32 },
}

/// Height is content-driven unless pinned; there is no fractional height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum HeightSizing {
    Wrap,
    Fixed { dp: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentScale {
    Crop,
    Fit,
    FillBounds,
    Inside,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundImage {
    pub source: String,
    pub content_scale: ContentScale,
    pub alpha: f32,
}

/// Fully-defaulted description of a container, ready for painting
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle {
    pub family: StyleFamily,
    pub shape: Shape,
    pub fill: Fill,
    pub border: Border,
    pub elevation_dp: f32,
    pub content_color: Color,
    pub alignment: Alignment,
    pub width: WidthSizing,
    pub height: HeightSizing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<BackgroundImage>,
}
