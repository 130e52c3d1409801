//! Streaming OOXML-to-HTML decoder
//!
//! Turns `.docx`/`.xlsx`/`.pptx` containers into a self-styled HTML page
//! without building a document object model:
//!
//! 1. unpack the ZIP container into a staging area ([`StagingArea`]),
//! 2. locate the relevant part(s) by path convention,
//! 3. stream-parse each part into an HTML fragment ([`translate`]),
//! 4. wrap the fragments in a full page with an embedded stylesheet.
//!
//! The pipeline never fails at the API level: every error is absorbed into a
//! fallback page tagged with a [`Degradation`] kind, so a host view always
//! has something to render. One load is strictly sequential with no internal
//! parallelism; run it off the interactive thread. To cancel a load, drop the
//! [`RenderedDocument`]. The staging directory is removed by its destructor,
//! so an abandoned load cleans up the same way a finished one does.

mod archive;
mod page;
mod rels;
pub mod translate;

pub use archive::{ExtractError, StagingArea};
pub use rels::{image_relationships, RelationshipMap};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Declared kind of the document being loaded. Supplied by the caller, who
/// knows the display name; content bytes are never sniffed for this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Word,
    Spreadsheet,
    Presentation,
    /// Legacy binary formats (.doc, .xls, .ppt). Always rendered as a fixed
    /// unsupported-format notice, never parsed.
    Legacy,
}

impl DocumentKind {
    /// Map a display file name to its kind. Legacy detection happens here,
    /// on the name alone, before any content is read.
    pub fn from_file_name(name: &str) -> DocumentKind {
        let lower = name.to_lowercase();
        if lower.ends_with(".doc") || lower.ends_with(".xls") || lower.ends_with(".ppt") {
            DocumentKind::Legacy
        } else if lower.ends_with(".xlsx") {
            DocumentKind::Spreadsheet
        } else if lower.ends_with(".pptx") {
            DocumentKind::Presentation
        } else {
            DocumentKind::Word
        }
    }

    fn label(self) -> &'static str {
        match self {
            DocumentKind::Spreadsheet => "spreadsheet",
            DocumentKind::Presentation => "presentation",
            _ => "document",
        }
    }
}

/// How the rendered output degraded from a full translation, if it did.
/// Tests (and hosts) can branch on the kind instead of scraping the HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Degradation {
    /// Fixed notice for .doc/.xls/.ppt; content untouched.
    LegacyFormat,
    /// The stream did not open as a ZIP container.
    NotAnArchive,
    /// Extraction aborted (corrupt entry, I/O failure, or path traversal).
    ExtractionFailed,
    /// The archive opened but the expected content part is absent.
    MissingPart,
    /// Spreadsheet archive without an `xl/worksheets` directory.
    InvalidStructure,
    /// Worksheets directory present but no numbered sheet part in it.
    NoWorksheets,
    /// No valid numbered slide part in the archive.
    NoSlides,
    /// The main content part failed to parse as XML.
    MalformedPart,
}

/// Output of one document load.
///
/// Owns the staging area: slide `<img>` URLs are relative paths into it, so
/// the files must outlive the rendering session. Dropping this value deletes
/// the staged files; the HTML string itself stays valid (images just stop
/// resolving), which is why it is fully materialized before any teardown.
#[derive(Debug)]
pub struct RenderedDocument {
    html: String,
    staging: Option<StagingArea>,
    degradation: Option<Degradation>,
}

impl RenderedDocument {
    fn complete(html: String, staging: StagingArea, degradation: Option<Degradation>) -> Self {
        RenderedDocument {
            html,
            staging: Some(staging),
            degradation,
        }
    }

    /// Fallback page; any staging area the pipeline had is dropped here, so
    /// no temporary storage survives a failed load.
    fn fallback(html: String, degradation: Degradation) -> Self {
        RenderedDocument {
            html,
            staging: None,
            degradation: Some(degradation),
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Base directory for relative resource URLs in the HTML. Present only
    /// when the content came from a real archive; `None` on fallback pages.
    pub fn base_resource_path(&self) -> Option<&Path> {
        self.staging.as_ref().map(StagingArea::root)
    }

    pub fn degradation(&self) -> Option<Degradation> {
        self.degradation
    }

    /// Give up the staging area early and keep only the HTML.
    pub fn into_html(self) -> String {
        self.html
    }
}

/// Decode one document into renderable HTML. Never panics, never returns an
/// error: every failure mode maps to a fallback page and a [`Degradation`].
pub fn render_document(source: impl Read, kind: DocumentKind) -> RenderedDocument {
    if kind == DocumentKind::Legacy {
        return RenderedDocument::fallback(page::legacy_page(), Degradation::LegacyFormat);
    }

    let staging = match StagingArea::extract(source) {
        Ok(staging) => staging,
        Err(ExtractError::NotAnArchive) => {
            debug!("input is not an archive, rendering structure-failure page");
            return RenderedDocument::fallback(
                page::structure_failure_page(),
                Degradation::NotAnArchive,
            );
        }
        Err(err) => {
            warn!("extraction aborted: {}", err);
            return RenderedDocument::fallback(
                page::error_page(kind.label(), &err.to_string()),
                Degradation::ExtractionFailed,
            );
        }
    };

    match kind {
        DocumentKind::Spreadsheet => render_spreadsheet(staging),
        DocumentKind::Presentation => render_presentation(staging),
        _ => render_word(staging),
    }
}

fn render_word(staging: StagingArea) -> RenderedDocument {
    let (body, degradation) = match staging.read("word/document.xml") {
        Some(xml) => match translate::word::document_fragment(&xml) {
            Ok(fragment) => (fragment, None),
            Err(err) => {
                warn!("malformed document part: {}", err);
                return RenderedDocument::fallback(
                    page::error_page("document", &err.to_string()),
                    Degradation::MalformedPart,
                );
            }
        },
        None => {
            debug!("word/document.xml not present in archive");
            (page::MISSING_DOCUMENT.to_string(), Some(Degradation::MissingPart))
        }
    };

    RenderedDocument::complete(page::wrap(page::WORD_STYLE, &body), staging, degradation)
}

fn render_spreadsheet(staging: StagingArea) -> RenderedDocument {
    let mut rows = String::new();
    let mut degradation = None;

    let has_worksheets_dir = staging
        .entries()
        .iter()
        .any(|entry| entry.starts_with("xl/worksheets/"));

    // Only the numerically first sheet is rendered; multi-sheet workbooks are
    // reduced to their first sheet by design.
    let first_sheet = staging
        .entries()
        .iter()
        .filter_map(|entry| {
            let name = entry.strip_prefix("xl/worksheets/")?;
            if name.contains('/') {
                return None;
            }
            part_number(name, "sheet").map(|n| (n, entry.as_str(), name))
        })
        .min_by_key(|(n, _, _)| *n);

    match first_sheet {
        Some((_, path, name)) => match staging.read(path) {
            Some(xml) => {
                rows.push_str(&page::sheet_banner(name));
                match translate::sheet::worksheet_fragment(&xml) {
                    Ok(fragment) => rows.push_str(&fragment),
                    Err(err) => {
                        warn!("malformed worksheet part {}: {}", path, err);
                        return RenderedDocument::fallback(
                            page::error_page("spreadsheet", &err.to_string()),
                            Degradation::MalformedPart,
                        );
                    }
                }
            }
            None => {
                rows.push_str(page::NO_WORKSHEETS);
                degradation = Some(Degradation::MissingPart);
            }
        },
        None if !has_worksheets_dir => {
            debug!("archive has no xl/worksheets directory");
            rows.push_str(page::INVALID_SHEET_STRUCTURE);
            degradation = Some(Degradation::InvalidStructure);
        }
        None => {
            rows.push_str(page::NO_WORKSHEETS);
            degradation = Some(Degradation::NoWorksheets);
        }
    }

    let body = format!("<table>{rows}</table>");
    RenderedDocument::complete(page::wrap(page::SHEET_STYLE, &body), staging, degradation)
}

fn render_presentation(staging: StagingArea) -> RenderedDocument {
    // Keyed by the file-name number so iteration yields ascending slide
    // order regardless of archive enumeration order.
    let mut slides: BTreeMap<u32, String> = BTreeMap::new();

    for entry in staging.entries() {
        let Some(name) = entry.strip_prefix("ppt/slides/") else {
            continue;
        };
        if name.is_empty() || name.contains('/') {
            continue;
        }
        let Some(number) = part_number(name, "slide") else {
            debug!("ignoring non-slide part: {}", entry);
            continue;
        };
        let Some(xml) = staging.read(entry) else {
            continue;
        };

        let images = match staging.read(&format!("ppt/slides/_rels/{name}.rels")) {
            Some(rels_xml) => rels::image_relationships(&rels_xml),
            None => RelationshipMap::default(),
        };

        match translate::slide::slide_fragment(&xml, &images) {
            Ok(fragment) => {
                slides.insert(number, fragment);
            }
            Err(err) => {
                warn!("malformed slide part {}: {}", entry, err);
                return RenderedDocument::fallback(
                    page::error_page("presentation", &err.to_string()),
                    Degradation::MalformedPart,
                );
            }
        }
    }

    let mut body = String::new();
    let mut degradation = None;
    if slides.is_empty() {
        body.push_str(page::NO_SLIDES);
        degradation = Some(Degradation::NoSlides);
    } else {
        // Headings show the 1-based position after sorting, not the original
        // file-name number.
        for (ordinal, fragment) in slides.values().enumerate() {
            body.push_str(&page::slide_box(ordinal + 1, fragment));
        }
    }

    RenderedDocument::complete(page::wrap(page::SLIDE_STYLE, &body), staging, degradation)
}

/// Numeric suffix of a part file name, e.g. `slide12.xml` -> 12 for prefix
/// `slide`. Non-numeric and non-positive suffixes are rejected: those are not
/// valid numbered parts.
fn part_number(name: &str, prefix: &str) -> Option<u32> {
    let stem = name.strip_prefix(prefix)?.strip_suffix(".xml")?;
    match stem.parse::<u32>() {
        Ok(n) if n > 0 => Some(n),
        _ => None,
    }
}
