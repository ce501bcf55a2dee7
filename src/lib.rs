//! md2wechat
//!
//! Markdown to WeChat article HTML. Markdown is rendered to an element tree,
//! every element's style is resolved against a theme and written inline, and
//! the result is published to the clipboard as HTML plus plain text.
//!
//! # Modules
//!
//! - `dom` - Owned element tree, HTML parsing and serialization
//! - `style` - Style property conversion and style resolution (`StyleOracle`)
//! - `theme` - Themes, built-ins and the theme manager
//! - `markdown` - Markdown rendering and sanitization
//! - `export` - Style inlining and clipboard publishing
//! - `storage` - Persisted editor state
//! - `error` - Error types

pub mod dom;
pub mod error;
pub mod export;
pub mod markdown;
pub mod storage;
pub mod style;
pub mod theme;

pub use error::{Error, Result};
