//! Built-in themes
//!
//! These themes are always available and cannot be removed or overwritten
//! by custom themes.

use super::{GlobalStyle, Theme, ThemeStyles};

/// Id of the theme used when nothing else is selected.
pub const DEFAULT_THEME_ID: &str = "default";

/// All built-in themes, default first.
pub fn builtin_themes() -> Vec<Theme> {
    vec![default_theme(), tech_blue_theme(), warm_orange_theme()]
}

/// Check whether an id belongs to a built-in theme.
pub fn is_builtin_id(id: &str) -> bool {
    matches!(id, DEFAULT_THEME_ID | "tech-blue" | "warm-orange")
}

/// WeChat green accents on a neutral body.
pub fn default_theme() -> Theme {
    Theme {
        id: DEFAULT_THEME_ID.to_string(),
        name: "Default".to_string(),
        is_custom: false,
        styles: ThemeStyles {
            global: GlobalStyle::default(),
            h1: "font-size: 24px; font-weight: bold; text-align: center; margin: 32px 0 16px; color: #222222".into(),
            h2: "font-size: 20px; font-weight: bold; margin: 28px 0 14px; padding-left: 10px; border-left: 4px solid #07c160".into(),
            h3: "font-size: 18px; font-weight: bold; margin: 24px 0 12px".into(),
            p: "margin: 16px 0; letter-spacing: 0.5px; text-align: justify".into(),
            quote: "margin: 16px 0; padding: 10px 16px; border-left: 4px solid #07c160; background-color: #f6f8fa; color: #666666".into(),
            code: "font-size: 14px; padding: 2px 4px; border-radius: 4px; background-color: #f6f8fa; color: #d14".into(),
            pre: "font-size: 14px; padding: 16px; border-radius: 6px; background-color: #f6f8fa; overflow-x: auto; line-height: 1.5".into(),
            ul: "margin: 16px 0; padding-left: 24px".into(),
            ol: "margin: 16px 0; padding-left: 24px".into(),
            li: "margin: 6px 0".into(),
            a: "color: #576b95; text-decoration: none; border-bottom: 1px solid #576b95".into(),
            img: "max-width: 100%; display: block; margin: 16px auto; border-radius: 4px".into(),
            hr: "border: none; border-top: 1px solid #e5e5e5; margin: 24px 0".into(),
            table: "border-collapse: collapse; margin: 16px 0; font-size: 14px".into(),
            th: "border: 1px solid #dfe2e5; padding: 8px 12px; background-color: #f6f8fa; font-weight: bold".into(),
            td: "border: 1px solid #dfe2e5; padding: 8px 12px".into(),
        },
    }
}

/// Cool blue headings with boxed code blocks.
pub fn tech_blue_theme() -> Theme {
    Theme {
        id: "tech-blue".to_string(),
        name: "Tech Blue".to_string(),
        is_custom: false,
        styles: ThemeStyles {
            global: GlobalStyle {
                font_size: "15px".to_string(),
                line_height: "1.8".to_string(),
                color: "#2c3e50".to_string(),
                ..GlobalStyle::default()
            },
            h1: "font-size: 22px; font-weight: bold; color: #1e6bb8; text-align: center; margin: 30px 0 15px; padding-bottom: 8px; border-bottom: 2px solid #1e6bb8".into(),
            h2: "font-size: 18px; font-weight: bold; color: #ffffff; background-color: #1e6bb8; padding: 4px 12px; border-radius: 4px; display: inline-block; margin: 24px 0 12px".into(),
            h3: "font-size: 16px; font-weight: bold; color: #1e6bb8; margin: 20px 0 10px".into(),
            p: "margin: 14px 0".into(),
            quote: "margin: 16px 0; padding: 12px 16px; border-left: 3px solid #1e6bb8; background-color: #f0f6fc; color: #555555".into(),
            code: "font-size: 13px; padding: 2px 5px; border-radius: 3px; background-color: #eef4fb; color: #1e6bb8".into(),
            pre: "font-size: 13px; padding: 14px; border-radius: 6px; background-color: #282c34; color: #abb2bf; overflow-x: auto; line-height: 1.6; box-shadow: 0 2px 8px rgba(0, 0, 0, 0.15)".into(),
            ul: "margin: 14px 0; padding-left: 22px".into(),
            ol: "margin: 14px 0; padding-left: 22px".into(),
            li: "margin: 5px 0".into(),
            a: "color: #1e6bb8; text-decoration: underline".into(),
            img: "max-width: 100%; display: block; margin: 14px auto; border-radius: 6px".into(),
            hr: "border: none; border-top: 1px dashed #1e6bb8; margin: 24px 0".into(),
            table: "border-collapse: collapse; margin: 14px 0; font-size: 13px".into(),
            th: "border: 1px solid #cfe0f1; padding: 6px 10px; background-color: #eef4fb; color: #1e6bb8".into(),
            td: "border: 1px solid #cfe0f1; padding: 6px 10px".into(),
        },
    }
}

/// Warm orange accents with serif body text.
pub fn warm_orange_theme() -> Theme {
    Theme {
        id: "warm-orange".to_string(),
        name: "Warm Orange".to_string(),
        is_custom: false,
        styles: ThemeStyles {
            global: GlobalStyle {
                color: "#3f3f3f".to_string(),
                background_color: "#fffdf9".to_string(),
                font_family: "Georgia, \"Songti SC\", serif".to_string(),
                ..GlobalStyle::default()
            },
            h1: "font-size: 24px; font-weight: bold; color: #ef7060; text-align: center; margin: 32px 0 16px".into(),
            h2: "font-size: 20px; font-weight: bold; color: #ef7060; margin: 28px 0 14px; padding-bottom: 4px; border-bottom: 2px solid #ef7060".into(),
            h3: "font-size: 17px; font-weight: bold; color: #d35400; margin: 22px 0 11px".into(),
            p: "margin: 15px 0; letter-spacing: 1px".into(),
            quote: "margin: 16px 0; padding: 12px 18px; border-left: 4px solid #ef7060; background-color: #fff5f0; color: #7a5c4f; font-style: italic".into(),
            code: "font-size: 14px; padding: 2px 4px; border-radius: 3px; background-color: #fff0e8; color: #ef7060".into(),
            pre: "font-size: 14px; padding: 16px; border-radius: 8px; background-color: #fdf6e3; color: #586e75; overflow-x: auto; line-height: 1.5".into(),
            ul: "margin: 15px 0; padding-left: 24px; list-style-type: circle".into(),
            ol: "margin: 15px 0; padding-left: 24px".into(),
            li: "margin: 6px 0".into(),
            a: "color: #ef7060; text-decoration: none; border-bottom: 1px dashed #ef7060".into(),
            img: "max-width: 100%; display: block; margin: 16px auto; border-radius: 8px; box-shadow: 0 4px 12px rgba(239, 112, 96, 0.2)".into(),
            hr: "border: none; border-top: 2px dotted #ef7060; margin: 28px 0".into(),
            table: "border-collapse: collapse; margin: 15px 0; font-size: 14px".into(),
            th: "border: 1px solid #f3c7bd; padding: 8px 12px; background-color: #fff0e8; color: #ef7060".into(),
            td: "border: 1px solid #f3c7bd; padding: 8px 12px".into(),
        },
    }
}
