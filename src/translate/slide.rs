//! Slide translator
//!
//! Text runs (`a:t`) become paragraphs, whitespace-only runs are dropped.
//! Image references (`a:blip`) carry a relationship id in an `r:embed`
//! attribute; the id resolves through the slide's relationship map into a
//! `media/<file>` URL. Unresolvable ids are omitted, not rendered broken.

use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::rels::RelationshipMap;

pub fn slide_fragment(xml: &[u8], images: &RelationshipMap) -> Result<String, quick_xml::Error> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::with_capacity(1024);

    let mut html = String::with_capacity(xml.len() / 4);
    let mut in_text = false;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"t" => {
                    in_text = true;
                    text.clear();
                }
                b"blip" => push_image(&e, images, &mut html),
                _ => {}
            },
            Event::Empty(e) => {
                // <a:blip r:embed="rId2"/> is usually self-closing.
                if e.local_name().as_ref() == b"blip" {
                    push_image(&e, images, &mut html);
                }
            }
            Event::Text(e) => {
                if in_text {
                    if let Ok(chunk) = e.unescape() {
                        text.push_str(&chunk);
                    }
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"t" {
                    if in_text && !text.trim().is_empty() {
                        html.push_str("<p>");
                        html.push_str(&text);
                        html.push_str("</p>");
                    }
                    in_text = false;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(html)
}

/// Resolve a `blip` element into an `<img>` tag, if possible.
///
/// The relationship id lives in an attribute whose name contains `embed`
/// (`r:embed`, or any other prefix a producer chose).
fn push_image(e: &BytesStart, images: &RelationshipMap, html: &mut String) {
    for attr in e.attributes().filter_map(|a| a.ok()) {
        let key = String::from_utf8_lossy(attr.key.as_ref());
        if !key.contains("embed") {
            continue;
        }
        if let Ok(id) = attr.unescape_value() {
            match images.get(id.as_ref()) {
                Some(file) => {
                    html.push_str("<img src=\"media/");
                    html.push_str(file);
                    html.push_str("\" />");
                }
                None => debug!("unresolved image relationship id: {}", id),
            }
        }
        return;
    }
}
