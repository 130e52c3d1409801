//! End-to-end rendering tests over real in-memory archives.

use std::io::{Cursor, Write};
use std::path::PathBuf;

use ooxml2html::{render_document, Degradation, DocumentKind};
use zip::write::FileOptions;
use zip::ZipWriter;

/// Surfaces the library's `debug!`/`warn!` diagnostics when tests run with
/// `RUST_LOG` set. Safe to call from every test; only the first init wins.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    init_logging();
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

#[test]
fn word_paragraph_concatenates_runs_in_order() {
    let bytes = build_zip(&[(
        "word/document.xml",
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>
<w:p><w:r><w:t>Hello, </w:t></w:r><w:r><w:t>world</w:t></w:r></w:p>
<w:p><w:r><w:t>Second paragraph</w:t></w:r></w:p>
</w:body>
</w:document>"#,
    )]);

    let rendered = render_document(Cursor::new(bytes), DocumentKind::Word);
    assert!(rendered.html().contains("<p>Hello, world</p>"));
    assert!(rendered.html().contains("<p>Second paragraph</p>"));
    assert!(
        rendered.html().find("Hello, world").unwrap()
            < rendered.html().find("Second paragraph").unwrap()
    );
    assert!(rendered.degradation().is_none());
    assert!(rendered.base_resource_path().is_some());
}

#[test]
fn word_missing_document_part_degrades_inline() {
    let bytes = build_zip(&[("docProps/core.xml", "<cp:coreProperties/>")]);
    let rendered = render_document(Cursor::new(bytes), DocumentKind::Word);
    assert!(rendered.html().contains("Could not find document content."));
    assert_eq!(rendered.degradation(), Some(Degradation::MissingPart));
    // The archive itself was valid, so relative resources still resolve.
    assert!(rendered.base_resource_path().is_some());
}

#[test]
fn word_malformed_document_part_is_an_error_page() {
    let bytes = build_zip(&[(
        "word/document.xml",
        "<w:body><w:p><w:r><w:t>cut</w:r></w:p></w:body>",
    )]);
    let rendered = render_document(Cursor::new(bytes), DocumentKind::Word);
    assert!(rendered.html().contains("Error reading document"));
    assert_eq!(rendered.degradation(), Some(Degradation::MalformedPart));
    assert!(rendered.base_resource_path().is_none());
}

#[test]
fn spreadsheet_renders_numerically_first_sheet_only() {
    let sheet_two =
        r#"<worksheet><sheetData><row><c t="inlineStr"><is><t>from-two</t></is></c></row></sheetData></worksheet>"#;
    let sheet_ten =
        r#"<worksheet><sheetData><row><c t="inlineStr"><is><t>from-ten</t></is></c></row></sheetData></worksheet>"#;
    let bytes = build_zip(&[
        ("xl/worksheets/sheet10.xml", sheet_ten),
        ("xl/worksheets/sheet2.xml", sheet_two),
    ]);
    let rendered = render_document(Cursor::new(bytes), DocumentKind::Spreadsheet);
    assert!(rendered.html().contains("Sheet: sheet2.xml"));
    assert!(rendered.html().contains("<td>from-two</td>"));
    assert!(!rendered.html().contains("from-ten"));
    assert!(rendered.degradation().is_none());
}

#[test]
fn spreadsheet_rows_stream_in_document_order() {
    let bytes = build_zip(&[(
        "xl/worksheets/sheet1.xml",
        r#"<worksheet><sheetData>
<row><c><v>1</v></c><c><v>2</v></c></row>
<row><c><v>3</v></c></row>
</sheetData></worksheet>"#,
    )]);
    let rendered = render_document(Cursor::new(bytes), DocumentKind::Spreadsheet);
    assert!(rendered
        .html()
        .contains("<tr><td>1</td><td>2</td></tr><tr><td>3</td></tr>"));
}

#[test]
fn spreadsheet_without_worksheets_dir_reports_invalid_structure() {
    let bytes = build_zip(&[("word/document.xml", "<w:document/>")]);
    let rendered = render_document(Cursor::new(bytes), DocumentKind::Spreadsheet);
    assert!(rendered.html().contains("Invalid spreadsheet structure."));
    assert_eq!(rendered.degradation(), Some(Degradation::InvalidStructure));
}

#[test]
fn spreadsheet_with_empty_worksheets_dir_reports_none_found() {
    init_logging();
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .add_directory("xl/worksheets", FileOptions::default())
        .unwrap();
    let bytes = writer.finish().unwrap().into_inner();

    let rendered = render_document(Cursor::new(bytes), DocumentKind::Spreadsheet);
    assert!(rendered.html().contains("No worksheets found."));
    assert_eq!(rendered.degradation(), Some(Degradation::NoWorksheets));
}

#[test]
fn presentation_headings_use_sorted_ordinals() {
    // Only slide3 and slide7 exist; headings must read Slide 1 and Slide 2.
    let bytes = build_zip(&[
        ("ppt/slides/slide7.xml", "<sld><a:t>seventh file</a:t></sld>"),
        ("ppt/slides/slide3.xml", "<sld><a:t>third file</a:t></sld>"),
    ]);
    let rendered = render_document(Cursor::new(bytes), DocumentKind::Presentation);
    let html = rendered.html();

    assert!(html.contains("<h3>Slide 1</h3>"));
    assert!(html.contains("<h3>Slide 2</h3>"));
    assert!(!html.contains("<h3>Slide 3</h3>"));
    assert!(!html.contains("<h3>Slide 7</h3>"));
    // slide3's content comes first despite enumeration order.
    assert!(html.find("third file").unwrap() < html.find("seventh file").unwrap());
}

#[test]
fn presentation_resolves_image_relationships() {
    let bytes = build_zip(&[
        (
            "ppt/slides/slide1.xml",
            r#"<sld xmlns:r="r"><a:blip r:embed="rId2"/><a:blip r:embed="rId9"/></sld>"#,
        ),
        (
            "ppt/slides/_rels/slide1.xml.rels",
            r#"<Relationships>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png"/>
</Relationships>"#,
        ),
    ]);
    let rendered = render_document(Cursor::new(bytes), DocumentKind::Presentation);
    let html = rendered.html();

    assert!(html.contains(r#"<img src="media/image1.png" />"#));
    // rId9 has no relationship entry: omitted, not rendered broken.
    assert_eq!(html.matches("<img").count(), 1);
}

#[test]
fn presentation_blank_runs_are_suppressed() {
    let bytes = build_zip(&[(
        "ppt/slides/slide1.xml",
        "<sld><a:t>   </a:t><a:t>visible</a:t></sld>",
    )]);
    let rendered = render_document(Cursor::new(bytes), DocumentKind::Presentation);
    assert!(rendered.html().contains("<p>visible</p>"));
    assert_eq!(rendered.html().matches("<p>").count(), 1);
}

#[test]
fn presentation_without_slides_reports_none_found() {
    let bytes = build_zip(&[("ppt/presentation.xml", "<p:presentation/>")]);
    let rendered = render_document(Cursor::new(bytes), DocumentKind::Presentation);
    assert!(rendered.html().contains("No slides found."));
    assert_eq!(rendered.degradation(), Some(Degradation::NoSlides));
}

#[test]
fn traversal_entry_fails_closed() {
    let bytes = build_zip(&[
        ("ppt/slides/slide1.xml", "<sld><a:t>ok</a:t></sld>"),
        ("../../etc/passwd", "root:x:0:0"),
    ]);
    let rendered = render_document(Cursor::new(bytes), DocumentKind::Presentation);
    assert_eq!(rendered.degradation(), Some(Degradation::ExtractionFailed));
    assert!(rendered.base_resource_path().is_none());
    assert!(!rendered.html().contains("ok"));
}

#[test]
fn non_zip_stream_renders_structure_failure() {
    init_logging();
    let rendered = render_document(
        Cursor::new(b"this is not a zip".to_vec()),
        DocumentKind::Word,
    );
    assert!(rendered
        .html()
        .contains("Failed to read document structure"));
    assert_eq!(rendered.degradation(), Some(Degradation::NotAnArchive));
    assert!(rendered.base_resource_path().is_none());
}

#[test]
fn legacy_extension_wins_over_valid_zip_content() {
    let bytes = build_zip(&[("word/document.xml", "<w:document/>")]);
    let kind = DocumentKind::from_file_name("report.doc");
    assert_eq!(kind, DocumentKind::Legacy);

    let rendered = render_document(Cursor::new(bytes), kind);
    assert!(rendered.html().contains("not supported"));
    assert_eq!(rendered.degradation(), Some(Degradation::LegacyFormat));
    assert!(rendered.base_resource_path().is_none());
}

#[test]
fn staging_area_torn_down_with_render_result() {
    let bytes = build_zip(&[(
        "word/document.xml",
        "<w:body><w:p><w:r><w:t>x</w:t></w:r></w:p></w:body>",
    )]);
    let rendered = render_document(Cursor::new(bytes), DocumentKind::Word);
    let root: PathBuf = rendered.base_resource_path().unwrap().to_path_buf();
    assert!(root.exists());
    assert!(root.join("word/document.xml").exists());

    let html = rendered.into_html();
    assert!(html.contains("<p>x</p>"));
    assert!(!root.exists(), "staging area must be deleted on teardown");
}
