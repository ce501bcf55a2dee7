//! CSS style handling
//!
//! - `properties.rs` - `StyleProperties` maps and CSS string conversion
//! - `oracle.rs` - the computed-style oracle trait used by export
//! - `cascade.rs` - `ThemeCascade`, the theme-driven oracle

pub mod cascade;
pub mod oracle;
pub mod properties;

pub use cascade::ThemeCascade;
pub use oracle::{ComputedStyle, StyleOracle, StyleScope};
pub use properties::{
    declarations, ensure_css_string, ensure_style_properties, parse_css_string, to_camel_case,
    to_css_string, to_kebab_case,
    StyleProperties, StyleValue,
};
