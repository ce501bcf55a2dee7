//! HTML Preview Document Generation
//!
//! Wraps an inlined export in a standalone page so it can be checked in a
//! browser before pasting. The article markup is exactly what goes to the
//! clipboard; only the surrounding page reacts to dark mode.

use super::clipboard::ClipboardPayload;

/// Generate a complete HTML document around an export payload.
///
/// # Arguments
///
/// * `payload` - The inlined export
/// * `title` - Optional document title
/// * `dark_mode` - Use a dark page background around the article
pub fn generate_html_document(
    payload: &ClipboardPayload,
    title: Option<&str>,
    dark_mode: bool,
) -> String {
    let (page_background, frame_shadow) = if dark_mode {
        ("#1e1e1e", "0 0 0 1px #333333")
    } else {
        ("#f5f5f5", "0 1px 4px rgba(0, 0, 0, 0.08)")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="md2wechat">
    <title>{title}</title>
    <style>
body {{
    margin: 0;
    padding: 24px 0;
    background: {page_background};
}}

.article-frame {{
    max-width: 677px;
    margin: 0 auto;
    padding: 20px;
    background: #ffffff;
    box-shadow: {frame_shadow};
}}
    </style>
</head>
<body>
    <div class="article-frame">
{body}
    </div>
</body>
</html>"#,
        title = html_escape(title.unwrap_or("Preview")),
        page_background = page_background,
        frame_shadow = frame_shadow,
        body = payload.html,
    )
}

/// Escape text for use in HTML content.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
