//! Word-processing document translator
//!
//! The only state is "inside a paragraph": `<w:p>` opens a `<p>`, every run
//! text element (`<w:t>`) contributes its text literally, and the paragraph
//! close emits `</p>`. Formatting, tables, and everything else is skipped.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

pub fn document_fragment(xml: &[u8]) -> Result<String, quick_xml::Error> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::with_capacity(1024);

    let mut html = String::with_capacity(xml.len() / 4);
    let mut in_paragraph = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => {
                    html.push_str("<p>");
                    in_paragraph = true;
                }
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => {
                // Self-closing paragraph, e.g. an empty line.
                if e.local_name().as_ref() == b"p" {
                    html.push_str("<p></p>");
                }
            }
            Event::Text(e) => {
                if in_text {
                    if let Ok(text) = e.unescape() {
                        html.push_str(&text);
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if in_paragraph {
                        html.push_str("</p>");
                        in_paragraph = false;
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(html)
}
