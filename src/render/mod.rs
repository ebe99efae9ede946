pub mod assets;
pub mod charts;
pub mod page;
pub mod stat_card;
pub mod ticker;

/// Escapes text for both HTML bodies and SVG/XML attributes.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
