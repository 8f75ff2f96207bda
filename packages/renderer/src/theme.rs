//! Builtin themes and their CSS custom properties
//!
//! A layout only stores a theme id. The id is resolved here; anything not in
//! the table renders with `default`.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

use crate::vdom::CssRule;

pub const DEFAULT_THEME_ID: &str = "default";

const BASE_FONT_SIZE: f64 = 16.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Typography {
    pub primary_font: &'static str,
    pub heading_font: &'static str,
    pub font_scale: f64,
    pub line_height_body: f64,
    pub line_height_heading: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Colors {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub text: &'static str,
    pub text_light: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub border: &'static str,
}

impl Colors {
    fn entries(&self) -> [(&'static str, &'static str); 8] {
        [
            ("primary", self.primary),
            ("secondary", self.secondary),
            ("accent", self.accent),
            ("text", self.text),
            ("text_light", self.text_light),
            ("background", self.background),
            ("surface", self.surface),
            ("border", self.border),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spacing {
    pub base_unit: &'static str,
    pub component_gap: &'static str,
    pub section_gap: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Effects {
    pub border_radius: &'static str,
    pub shadow: &'static str,
    pub transitions: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub theme_id: &'static str,
    pub theme_name: &'static str,
    pub typography: Typography,
    pub colors: Colors,
    pub spacing: Spacing,
    pub effects: Effects,
}

pub static THEMES: &[Theme] = &[
    Theme {
        theme_id: "default",
        theme_name: "Default Theme",
        typography: Typography {
            primary_font: r#"-apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif"#,
            heading_font: "inherit",
            font_scale: 1.2,
            line_height_body: 1.6,
            line_height_heading: 1.2,
        },
        colors: Colors {
            primary: "#295cff",
            secondary: "#1c0d5a",
            accent: "#295cff",
            text: "#333333",
            text_light: "#666666",
            background: "#ffffff",
            surface: "#f8f9fa",
            border: "#e1e5e9",
        },
        spacing: Spacing {
            base_unit: "8px",
            component_gap: "40px",
            section_gap: "80px",
        },
        effects: Effects {
            border_radius: "8px",
            shadow: "0 4px 6px rgba(0, 0, 0, 0.1)",
            transitions: "all 0.3s ease",
        },
    },
    Theme {
        theme_id: "professional_clean",
        theme_name: "Professional Clean",
        typography: Typography {
            primary_font: "Inter, sans-serif",
            heading_font: "Montserrat, sans-serif",
            font_scale: 1.25,
            line_height_body: 1.7,
            line_height_heading: 1.3,
        },
        colors: Colors {
            primary: "#2563eb",
            secondary: "#1e40af",
            accent: "#3b82f6",
            text: "#1f2937",
            text_light: "#6b7280",
            background: "#ffffff",
            surface: "#f9fafb",
            border: "#e5e7eb",
        },
        spacing: Spacing {
            base_unit: "8px",
            component_gap: "48px",
            section_gap: "96px",
        },
        effects: Effects {
            border_radius: "12px",
            shadow: "0 10px 15px -3px rgba(0, 0, 0, 0.1)",
            transitions: "all 0.2s ease",
        },
    },
    Theme {
        theme_id: "creative_bold",
        theme_name: "Creative Bold",
        typography: Typography {
            primary_font: "Poppins, sans-serif",
            heading_font: "Bebas Neue, sans-serif",
            font_scale: 1.3,
            line_height_body: 1.8,
            line_height_heading: 1.1,
        },
        colors: Colors {
            primary: "#f97316",
            secondary: "#dc2626",
            accent: "#fbbf24",
            text: "#111827",
            text_light: "#4b5563",
            background: "#fffbeb",
            surface: "#fef3c7",
            border: "#fde68a",
        },
        spacing: Spacing {
            base_unit: "10px",
            component_gap: "60px",
            section_gap: "120px",
        },
        effects: Effects {
            border_radius: "24px",
            shadow: "0 20px 25px -5px rgba(0, 0, 0, 0.15)",
            transitions: "all 0.4s cubic-bezier(0.68, -0.55, 0.265, 1.55)",
        },
    },
    Theme {
        theme_id: "minimal_elegant",
        theme_name: "Minimal Elegant",
        typography: Typography {
            primary_font: "Helvetica Neue, Helvetica, Arial, sans-serif",
            heading_font: "Georgia, serif",
            font_scale: 1.15,
            line_height_body: 1.75,
            line_height_heading: 1.4,
        },
        colors: Colors {
            primary: "#000000",
            secondary: "#333333",
            accent: "#666666",
            text: "#000000",
            text_light: "#666666",
            background: "#ffffff",
            surface: "#fafafa",
            border: "#eeeeee",
        },
        spacing: Spacing {
            base_unit: "8px",
            component_gap: "32px",
            section_gap: "64px",
        },
        effects: Effects {
            border_radius: "0px",
            shadow: "none",
            transitions: "opacity 0.3s ease",
        },
    },
    Theme {
        theme_id: "modern_dark",
        theme_name: "Modern Dark",
        typography: Typography {
            primary_font: "SF Pro Display, -apple-system, sans-serif",
            heading_font: "SF Pro Display, -apple-system, sans-serif",
            font_scale: 1.2,
            line_height_body: 1.6,
            line_height_heading: 1.2,
        },
        colors: Colors {
            primary: "#60a5fa",
            secondary: "#818cf8",
            accent: "#34d399",
            text: "#f3f4f6",
            text_light: "#9ca3af",
            background: "#111827",
            surface: "#1f2937",
            border: "#374151",
        },
        spacing: Spacing {
            base_unit: "8px",
            component_gap: "40px",
            section_gap: "80px",
        },
        effects: Effects {
            border_radius: "16px",
            shadow: "0 10px 40px rgba(0, 0, 0, 0.5)",
            transitions: "all 0.3s ease",
        },
    },
];

pub fn find_theme(id: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.theme_id == id)
}

/// Theme for `id`, or `default` when the id is unknown
pub fn resolve_theme(id: &str) -> &'static Theme {
    match find_theme(id) {
        Some(theme) => theme,
        None => {
            warn!(theme = id, "Theme not found, using default");
            &THEMES[0]
        }
    }
}

fn px(value: f64) -> String {
    format!("{}px", value.round() as i64)
}

/// Leading integer of a CSS length (`"10px"` → 10), 8 when unparsable
fn leading_int(value: &str) -> i64 {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(8)
}

/// Custom properties for a theme, in emission order
pub fn theme_variables(theme: &Theme) -> IndexMap<String, String> {
    let mut vars = IndexMap::new();
    let typo = &theme.typography;
    let scale = typo.font_scale;

    vars.insert("--gmkb-font-primary".to_string(), typo.primary_font.to_string());
    vars.insert("--gmkb-font-heading".to_string(), typo.heading_font.to_string());
    vars.insert("--gmkb-font-scale".to_string(), scale.to_string());
    vars.insert("--gmkb-line-height-body".to_string(), typo.line_height_body.to_string());
    vars.insert(
        "--gmkb-line-height-heading".to_string(),
        typo.line_height_heading.to_string(),
    );

    let sizes = [
        ("xs", BASE_FONT_SIZE * 0.75),
        ("sm", BASE_FONT_SIZE * 0.875),
        ("base", BASE_FONT_SIZE),
        ("lg", BASE_FONT_SIZE * scale),
        ("xl", BASE_FONT_SIZE * scale * 1.25),
        ("2xl", BASE_FONT_SIZE * scale * 1.5),
        ("3xl", BASE_FONT_SIZE * scale * 1.875),
        ("4xl", BASE_FONT_SIZE * scale * 2.25),
    ];
    for (name, size) in sizes {
        vars.insert(format!("--gmkb-font-size-{}", name), px(size));
    }

    for (key, value) in theme.colors.entries() {
        vars.insert(format!("--gmkb-color-{}", key.replace('_', "-")), value.to_string());
    }

    let spacing = &theme.spacing;
    for (key, value) in [
        ("base_unit", spacing.base_unit),
        ("component_gap", spacing.component_gap),
        ("section_gap", spacing.section_gap),
    ] {
        vars.insert(format!("--gmkb-spacing-{}", key.replace('_', "-")), value.to_string());
    }

    let base_unit = leading_int(spacing.base_unit);
    for i in 1..=12 {
        vars.insert(format!("--gmkb-space-{}", i), format!("{}px", base_unit * i));
    }

    let effects = &theme.effects;
    for (key, value) in [
        ("border_radius", effects.border_radius),
        ("shadow", effects.shadow),
        ("transitions", effects.transitions),
    ] {
        vars.insert(format!("--gmkb-{}", key.replace('_', "-")), value.to_string());
    }

    vars
}

/// `:root` rule carrying the theme variables
pub fn theme_rule(theme: &Theme) -> CssRule {
    CssRule {
        selector: ":root".to_string(),
        properties: theme_variables(theme),
    }
}

/// Stylesheet text for a theme:
///
/// ```text
/// :root {
///   --gmkb-font-primary: ...;
///   ...
/// }
/// ```
pub fn generate_theme_css(theme: &Theme) -> String {
    let declarations: Vec<String> = theme_variables(theme)
        .into_iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect();
    format!(":root {{\n  {};\n}}", declarations.join(";\n  "))
}
