//! # Container Style Resolver
//!
//! Pure function from a container config record to a [`ResolvedStyle`].
//!
//! Every attribute is defaulted in the same order:
//!
//! ```text
//! explicit config value → style-family default → global default
//! ```
//!
//! Legacy keys resolve exactly like their modern equivalents, with the
//! modern key winning when both are present:
//!
//! | modern                | legacy              |
//! |-----------------------|---------------------|
//! | `customColor`         | `containerColor`    |
//! | `gradient1/gradient2` | `color1/color2`     |
//! | `gradientOrientation` | `gradientDirection` |

use tessera_document::{NodeRef, CONTAINER_KEY};
use tracing::trace;

use crate::color::Color;
use crate::context::ResolveContext;
use crate::resolved::*;

pub const DEFAULT_FAMILY: StyleFamily = StyleFamily::Full;
pub const DEFAULT_CORNER_DP: f32 = 12.0;
pub const DEFAULT_FIXED_WIDTH_DP: f32 = 160.0;
pub const DEFAULT_WIDTH_FRACTION: f32 = 1.0;
pub const DEFAULT_FIXED_HEIGHT_DP: f32 = 160.0;
/// Thickness used when a border mode is chosen explicitly without one
pub const DEFAULT_BORDER_DP: f32 = 1.0;

/// Where a family's default fill or content color comes from
#[derive(Debug, Clone, Copy)]
enum Role {
    Primary,
    OnPrimary,
    SecondaryContainer,
    OnSecondaryContainer,
    Surface,
    OnSurface,
    SurfaceVariant,
    OnSurfaceVariant,
}

impl Role {
    fn color(self, ctx: &ResolveContext) -> Color {
        match self {
            Role::Primary => ctx.primary,
            Role::OnPrimary => ctx.on_primary,
            Role::SecondaryContainer => ctx.secondary_container,
            Role::OnSecondaryContainer => ctx.on_secondary_container,
            Role::Surface => ctx.surface,
            Role::OnSurface => ctx.on_surface,
            Role::SurfaceVariant => ctx.surface_variant,
            Role::OnSurfaceVariant => ctx.on_surface_variant,
        }
    }
}

struct FamilyDefaults {
    fill: Option<Role>,
    content: Role,
    border_mode: BorderMode,
    border_dp: f32,
    elevation_dp: f32,
}

fn family_defaults(family: StyleFamily) -> FamilyDefaults {
    match family {
        StyleFamily::Text => FamilyDefaults {
            fill: None,
            content: Role::OnSurface,
            border_mode: BorderMode::None,
            border_dp: 0.0,
            elevation_dp: 0.0,
        },
        StyleFamily::Outlined => FamilyDefaults {
            fill: None,
            content: Role::OnSurface,
            border_mode: BorderMode::Full,
            border_dp: 1.0,
            elevation_dp: 0.0,
        },
        StyleFamily::TopBottom => FamilyDefaults {
            fill: None,
            content: Role::OnSurface,
            border_mode: BorderMode::TopBottom,
            border_dp: 1.0,
            elevation_dp: 0.0,
        },
        StyleFamily::Full => FamilyDefaults {
            fill: Some(Role::SurfaceVariant),
            content: Role::OnSurfaceVariant,
            border_mode: BorderMode::None,
            border_dp: 0.0,
            elevation_dp: 2.0,
        },
        StyleFamily::Primary => FamilyDefaults {
            fill: Some(Role::Primary),
            content: Role::OnPrimary,
            border_mode: BorderMode::None,
            border_dp: 0.0,
            elevation_dp: 0.0,
        },
        StyleFamily::Tonal => FamilyDefaults {
            fill: Some(Role::SecondaryContainer),
            content: Role::OnSecondaryContainer,
            border_mode: BorderMode::None,
            border_dp: 0.0,
            elevation_dp: 0.0,
        },
        StyleFamily::Surface => FamilyDefaults {
            fill: Some(Role::Surface),
            content: Role::OnSurface,
            border_mode: BorderMode::None,
            border_dp: 0.0,
            elevation_dp: 1.0,
        },
    }
}

/// Resolve a container config. `None` resolves to the global defaults.
pub fn resolve(config: Option<NodeRef<'_>>, ctx: &ResolveContext) -> ResolvedStyle {
    let cfg = Config(config);

    let family = cfg
        .str("style")
        .and_then(StyleFamily::parse)
        .unwrap_or(DEFAULT_FAMILY);
    let defaults = family_defaults(family);

    let (fill, custom_fill) = resolve_fill(&cfg, family, &defaults, ctx);
    let content_color = if custom_fill {
        match fill {
            Fill::Solid { color } => ctx.content_for(color),
            Fill::Gradient { start, end, .. } => ctx.content_for(blend(start, end)),
            Fill::None => defaults.content.color(ctx),
        }
    } else {
        defaults.content.color(ctx)
    };

    let style = ResolvedStyle {
        family,
        shape: resolve_shape(&cfg),
        fill,
        border: resolve_border(&cfg, &defaults, ctx),
        elevation_dp: cfg
            .f32("elevationDp")
            .map(|e| e.max(0.0))
            .unwrap_or(defaults.elevation_dp),
        content_color,
        alignment: resolve_alignment(&cfg),
        width: resolve_width(&cfg),
        height: resolve_height(&cfg),
        image: resolve_image(&cfg),
    };

    trace!(?family, fill = ?style.fill, border = ?style.border, "Resolved container style");
    style
}

/// Resolve the `container` config attached to `node`, if any
pub fn resolve_node(node: NodeRef<'_>, ctx: &ResolveContext) -> ResolvedStyle {
    resolve(node.node_attr(CONTAINER_KEY), ctx)
}

/// Typed reads over an optional config record
struct Config<'a>(Option<NodeRef<'a>>);

impl<'a> Config<'a> {
    fn str(&self, key: &str) -> Option<&'a str> {
        self.0?.str_attr(key).map(str::trim).filter(|s| !s.is_empty())
    }

    fn f32(&self, key: &str) -> Option<f32> {
        self.0?.f64_attr(key).map(|n| n as f32).filter(|n| n.is_finite())
    }

    fn color(&self, key: &str) -> Option<Color> {
        self.str(key).and_then(Color::parse)
    }

    /// Modern key first, then its legacy alias
    fn str_aliased(&self, modern: &str, legacy: &str) -> Option<&'a str> {
        self.str(modern).or_else(|| self.str(legacy))
    }

    fn color_aliased(&self, modern: &str, legacy: &str) -> Option<Color> {
        self.color(modern).or_else(|| self.color(legacy))
    }

    fn node(&self, key: &str) -> Option<NodeRef<'a>> {
        self.0?.node_attr(key)
    }
}

/// Returns the fill and whether it came from config colors
fn resolve_fill(
    cfg: &Config<'_>,
    family: StyleFamily,
    defaults: &FamilyDefaults,
    ctx: &ResolveContext,
) -> (Fill, bool) {
    // Text-only containers never paint a background
    if family == StyleFamily::Text {
        return (Fill::None, false);
    }

    // The modern pair wins as a pair: mixing gradient1 with color2 would
    // combine two different configs.
    let modern = (cfg.color("gradient1"), cfg.color("gradient2"));
    let (first, second) = if modern.0.is_some() || modern.1.is_some() {
        modern
    } else {
        (cfg.color("color1"), cfg.color("color2"))
    };

    if let (Some(start), Some(end)) = (first, second) {
        let orientation = cfg
            .str_aliased("gradientOrientation", "gradientDirection")
            .map(parse_orientation)
            .unwrap_or(GradientOrientation::Horizontal);
        return (
            Fill::Gradient {
                start,
                end,
                orientation,
            },
            true,
        );
    }

    let single = first
        .or(second)
        .or_else(|| cfg.color_aliased("customColor", "containerColor"));
    if let Some(color) = single {
        return (Fill::Solid { color }, true);
    }

    let fill = match defaults.fill {
        Some(role) => Fill::Solid {
            color: role.color(ctx),
        },
        None => Fill::None,
    };
    (fill, false)
}

fn parse_orientation(raw: &str) -> GradientOrientation {
    match raw.to_ascii_lowercase().as_str() {
        "vertical" | "v" | "toptobottom" => GradientOrientation::Vertical,
        "diagonal" | "d" => GradientOrientation::Diagonal,
        _ => GradientOrientation::Horizontal,
    }
}

fn blend(a: Color, b: Color) -> Color {
    let mix = |x: u8, y: u8| ((x as u16 + y as u16) / 2) as u8;
    Color::rgb(mix(a.red(), b.red()), mix(a.green(), b.green()), mix(a.blue(), b.blue()))
}

fn resolve_shape(cfg: &Config<'_>) -> Shape {
    let corner = cfg.f32("corner").map(|c| c.max(0.0));
    match cfg.str("shape").map(str::to_ascii_lowercase).as_deref() {
        Some("rectangle") | Some("rect") | Some("square") => Shape::Rectangle,
        Some("pill") | Some("capsule") => Shape::Pill,
        Some("circle") => Shape::Circle,
        _ => Shape::Rounded {
            corner_dp: corner.unwrap_or(DEFAULT_CORNER_DP),
        },
    }
}

fn resolve_border(cfg: &Config<'_>, defaults: &FamilyDefaults, ctx: &ResolveContext) -> Border {
    let explicit_mode = cfg.str("borderMode").and_then(|raw| {
        match raw.to_ascii_lowercase().as_str() {
            "none" => Some(BorderMode::None),
            "full" | "outline" | "outlined" => Some(BorderMode::Full),
            "topbottom" | "top_bottom" => Some(BorderMode::TopBottom),
            _ => None,
        }
    });
    let explicit_thickness = cfg.f32("borderThicknessDp").map(|t| t.max(0.0));

    let (mode, thickness) = match explicit_mode {
        Some(BorderMode::None) => return Border::None,
        Some(mode) if mode == defaults.border_mode => {
            (mode, explicit_thickness.unwrap_or(defaults.border_dp))
        }
        Some(mode) => (mode, explicit_thickness.unwrap_or(DEFAULT_BORDER_DP)),
        None => match (defaults.border_mode, explicit_thickness) {
            (BorderMode::None, Some(t)) if t > 0.0 => (BorderMode::Full, t),
            (mode, t) => (mode, t.unwrap_or(defaults.border_dp)),
        },
    };

    if thickness <= 0.0 {
        return Border::None;
    }

    let color = cfg.color("borderColor").unwrap_or(ctx.outline);
    match mode {
        BorderMode::None => Border::None,
        BorderMode::Full => Border::Full {
            thickness_dp: thickness,
            color,
        },
        BorderMode::TopBottom => Border::TopBottom {
            thickness_dp: thickness,
            color,
        },
    }
}

fn resolve_alignment(cfg: &Config<'_>) -> Alignment {
    let horizontal = match cfg.str("hAlign").map(str::to_ascii_lowercase).as_deref() {
        Some("center") => HorizontalAlignment::Center,
        Some("end") | Some("right") => HorizontalAlignment::End,
        _ => HorizontalAlignment::Start,
    };
    let vertical = match cfg.str("vAlign").map(str::to_ascii_lowercase).as_deref() {
        Some("center") => VerticalAlignment::Center,
        Some("bottom") => VerticalAlignment::Bottom,
        _ => VerticalAlignment::Top,
    };
    Alignment {
        horizontal,
        vertical,
    }
}

fn resolve_width(cfg: &Config<'_>) -> WidthSizing {
    match cfg.str("widthMode").map(str::to_ascii_lowercase).as_deref() {
        Some("wrap") => WidthSizing::Wrap,
        Some("fixed") => WidthSizing::Fixed {
            dp: cfg
                .f32("widthDp")
                .filter(|dp| *dp > 0.0)
                .unwrap_or(DEFAULT_FIXED_WIDTH_DP),
        },
        Some("fraction") => WidthSizing::Fraction {
            fraction: cfg
                .f32("widthFraction")
                .map(|f| f.clamp(0.0, 1.0))
                .unwrap_or(DEFAULT_WIDTH_FRACTION),
        },
        _ => WidthSizing::Fill,
    }
}

fn resolve_height(cfg: &Config<'_>) -> HeightSizing {
    match cfg.str("heightMode").map(str::to_ascii_lowercase).as_deref() {
        Some("fixed") => HeightSizing::Fixed {
            dp: cfg
                .f32("heightDp")
                .filter(|dp| *dp > 0.0)
                .unwrap_or(DEFAULT_FIXED_HEIGHT_DP),
        },
        _ => HeightSizing::Wrap,
    }
}

fn resolve_image(cfg: &Config<'_>) -> Option<BackgroundImage> {
    let image = Config(cfg.node("image"));
    let source = image.str("source")?;
    let content_scale = match image.str("contentScale").map(str::to_ascii_lowercase).as_deref() {
        Some("fit") => ContentScale::Fit,
        Some("fillbounds") | Some("fill") => ContentScale::FillBounds,
        Some("inside") => ContentScale::Inside,
        Some("none") => ContentScale::None,
        _ => ContentScale::Crop,
    };
    Some(BackgroundImage {
        source: source.to_string(),
        content_scale,
        alpha: image.f32("alpha").map(|a| a.clamp(0.0, 1.0)).unwrap_or(1.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tessera_document::Tree;

    fn resolve_json(config: serde_json::Value) -> ResolvedStyle {
        let tree = Tree::fragment(&config).unwrap();
        resolve(Some(tree.root_ref()), &ResolveContext::light())
    }

    #[test]
    fn test_text_style_suppresses_fill() {
        let style = resolve_json(json!({ "style": "text", "customColor": "#FF0000" }));
        assert_eq!(style.fill, Fill::None);
        let style = resolve_json(json!({ "style": "text", "gradient1": "#000000", "gradient2": "#FFFFFF" }));
        assert_eq!(style.fill, Fill::None);
    }

    #[test]
    fn test_border_mode_none_overrides_thickness() {
        let style = resolve_json(json!({ "borderMode": "none", "borderThicknessDp": 4 }));
        assert_eq!(style.border, Border::None);
    }

    #[test]
    fn test_null_config_uses_global_defaults() {
        let ctx = ResolveContext::light();
        let style = resolve(None, &ctx);
        assert_eq!(style.family, StyleFamily::Full);
        assert_eq!(style.fill, Fill::Solid { color: ctx.surface_variant });
        assert_eq!(style.shape, Shape::Rounded { corner_dp: 12.0 });
        assert_eq!(style.width, WidthSizing::Fill);
        assert_eq!(style.height, HeightSizing::Wrap);
        assert_eq!(style.border, Border::None);
        assert!(style.image.is_none());
    }

    #[test]
    fn test_modern_gradient_keys_win() {
        let style = resolve_json(json!({
            "gradient1": "#000000", "gradient2": "#222222",
            "color1": "#FFFFFF", "color2": "#EEEEEE",
            "gradientOrientation": "vertical"
        }));
        assert_eq!(
            style.fill,
            Fill::Gradient {
                start: Color::rgb(0, 0, 0),
                end: Color::rgb(0x22, 0x22, 0x22),
                orientation: GradientOrientation::Vertical,
            }
        );
        assert_eq!(style.content_color, ResolveContext::light().light_content);
    }

    #[test]
    fn test_legacy_keys_resolve_like_modern() {
        let modern = resolve_json(json!({
            "gradient1": "#FFEB3B", "gradient2": "#FFC107", "gradientOrientation": "diagonal"
        }));
        let legacy = resolve_json(json!({
            "color1": "#FFEB3B", "color2": "#FFC107", "gradientDirection": "diagonal"
        }));
        assert_eq!(modern, legacy);

        let modern = resolve_json(json!({ "customColor": "#123456" }));
        let legacy = resolve_json(json!({ "containerColor": "#123456" }));
        assert_eq!(modern, legacy);
    }

    #[test]
    fn test_single_gradient_color_is_solid() {
        let style = resolve_json(json!({ "gradient1": "#FFFFFF" }));
        assert_eq!(style.fill, Fill::Solid { color: Color::WHITE });
        assert_eq!(style.content_color, ResolveContext::light().dark_content);
    }

    #[test]
    fn test_family_content_color_without_custom_fill() {
        let ctx = ResolveContext::light();
        let style = resolve_json(json!({ "style": "primary" }));
        assert_eq!(style.fill, Fill::Solid { color: ctx.primary });
        assert_eq!(style.content_color, ctx.on_primary);
    }

    #[test]
    fn test_outlined_and_topbottom_default_borders() {
        let ctx = ResolveContext::light();
        assert_eq!(
            resolve_json(json!({ "style": "outlined" })).border,
            Border::Full { thickness_dp: 1.0, color: ctx.outline }
        );
        assert_eq!(
            resolve_json(json!({ "style": "topbottom", "borderColor": "#FF0000" })).border,
            Border::TopBottom { thickness_dp: 1.0, color: Color::rgb(255, 0, 0) }
        );
    }

    #[test]
    fn test_explicit_zero_thickness_removes_border() {
        let style = resolve_json(json!({ "style": "outlined", "borderThicknessDp": 0 }));
        assert_eq!(style.border, Border::None);
    }

    #[test]
    fn test_thickness_without_mode_draws_outline() {
        let style = resolve_json(json!({ "style": "surface", "borderThicknessDp": 3 }));
        assert!(matches!(style.border, Border::Full { thickness_dp, .. } if thickness_dp == 3.0));
    }

    #[test]
    fn test_sizing_modes() {
        assert_eq!(resolve_json(json!({ "widthMode": "fixed" })).width, WidthSizing::Fixed { dp: 160.0 });
        assert_eq!(
            resolve_json(json!({ "widthMode": "fraction", "widthFraction": 1.7 })).width,
            WidthSizing::Fraction { fraction: 1.0 }
        );
        assert_eq!(
            resolve_json(json!({ "widthMode": "fraction", "widthFraction": 0.5 })).width,
            WidthSizing::Fraction { fraction: 0.5 }
        );
        assert_eq!(resolve_json(json!({ "widthMode": "wrap" })).width, WidthSizing::Wrap);
        assert_eq!(
            resolve_json(json!({ "heightMode": "fixed", "heightDp": 80 })).height,
            HeightSizing::Fixed { dp: 80.0 }
        );
        // No fractional height
        assert_eq!(resolve_json(json!({ "heightMode": "fraction" })).height, HeightSizing::Wrap);
    }

    #[test]
    fn test_shape_alignment_image() {
        let style = resolve_json(json!({
            "shape": "pill",
            "hAlign": "center",
            "vAlign": "bottom",
            "elevationDp": -3,
            "image": { "source": "hero.png", "contentScale": "fit", "alpha": 0.4 }
        }));
        assert_eq!(style.shape, Shape::Pill);
        assert_eq!(style.alignment.horizontal, HorizontalAlignment::Center);
        assert_eq!(style.alignment.vertical, VerticalAlignment::Bottom);
        assert_eq!(style.elevation_dp, 0.0);
        let image = style.image.unwrap();
        assert_eq!(image.content_scale, ContentScale::Fit);
        assert!((image.alpha - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_unparseable_colors_are_ignored() {
        let ctx = ResolveContext::light();
        let style = resolve_json(json!({ "style": "tonal", "customColor": "not-a-color" }));
        assert_eq!(style.fill, Fill::Solid { color: ctx.secondary_container });
    }

    #[test]
    fn test_resolve_node_reads_container() {
        let tree = Tree::fragment(&json!({
            "type": "Card",
            "container": { "style": "outlined" }
        }))
        .unwrap();
        let style = resolve_node(tree.root_ref(), &ResolveContext::light());
        assert_eq!(style.family, StyleFamily::Outlined);
    }
}
