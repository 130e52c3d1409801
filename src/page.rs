//! HTML page assembly
//!
//! Kind-specific stylesheets, the full-page wrapper, and every fixed fallback
//! notice. Keeping the strings in one place lets the error taxonomy map each
//! degradation to exactly one user-visible message.

pub const WORD_STYLE: &str =
    "body { font-family: sans-serif; padding: 16px; line-height: 1.6; } \
     p { margin-bottom: 12px; }";

pub const SHEET_STYLE: &str =
    "table { border-collapse: collapse; width: 100%; } \
     td, th { border: 1px solid #ddd; padding: 8px; }";

pub const SLIDE_STYLE: &str =
    "div.slide { border: 1px solid #ccc; margin: 20px; padding: 20px; \
     min-height: 200px; background-color: #f9f9f9; position: relative; } \
     h3 { border-bottom: 1px solid #eee; } \
     p { margin: 5px 0; } \
     img { max-width: 100%; height: auto; display: block; margin: 10px 0; }";

// Inline notices, rendered inside an otherwise complete page.
pub const MISSING_DOCUMENT: &str = "<p><i>Could not find document content.</i></p>";
pub const INVALID_SHEET_STRUCTURE: &str = "<tr><td><i>Invalid spreadsheet structure.</i></td></tr>";
pub const NO_WORKSHEETS: &str = "<tr><td><i>No worksheets found.</i></td></tr>";
pub const NO_SLIDES: &str = "<p><i>No slides found.</i></p>";

/// Complete page with an embedded stylesheet.
pub fn wrap(style: &str, body: &str) -> String {
    format!("<html><head><style>{style}</style></head><body>{body}</body></html>")
}

/// Fixed page for legacy binary formats (.doc, .xls, .ppt). The content is
/// never inspected.
pub fn legacy_page() -> String {
    "<html><body><h3>Unsupported format</h3>\
     <p>Legacy binary documents (.doc, .xls, .ppt) are not supported.</p></body></html>"
        .to_string()
}

/// Fixed page when the input does not open as a ZIP container.
pub fn structure_failure_page() -> String {
    "<html><body>Failed to read document structure. File might be corrupted.</body></html>"
        .to_string()
}

/// Generic failure page naming the document kind.
pub fn error_page(kind_label: &str, message: &str) -> String {
    format!("<html><body><h3>Error reading {kind_label}</h3><p>{message}</p></body></html>")
}

/// Banner row naming the worksheet that was rendered.
pub fn sheet_banner(file_name: &str) -> String {
    format!("<tr><td colspan='100%' style='background:#f0f0f0'><b>Sheet: {file_name}</b></td></tr>")
}

/// One bordered slide container. `ordinal` is the 1-based position of the
/// slide after sorting by file-name number, not the file-name number itself.
pub fn slide_box(ordinal: usize, fragment: &str) -> String {
    format!("<div class='slide'><h3>Slide {ordinal}</h3>{fragment}</div>")
}
