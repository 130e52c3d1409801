//! Worksheet translator
//!
//! Emits a table body: `<tr>` per `row` element, `<td>` per cell value (`v`)
//! or inline string (`t`). Cell values pass through raw; shared-string cells
//! therefore render as their integer index into the (unread) string table.
//! That is a documented scope limitation, not a defect.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

pub fn worksheet_fragment(xml: &[u8]) -> Result<String, quick_xml::Error> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::with_capacity(1024);

    let mut html = String::with_capacity(xml.len() / 4);
    let mut in_cell = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => html.push_str("<tr>"),
                b"v" | b"t" => {
                    html.push_str("<td>");
                    in_cell = true;
                }
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => html.push_str("<tr></tr>"),
                b"v" | b"t" => html.push_str("<td></td>"),
                _ => {}
            },
            Event::Text(e) => {
                if in_cell {
                    if let Ok(text) = e.unescape() {
                        html.push_str(&text);
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"v" | b"t" => {
                    if in_cell {
                        html.push_str("</td>");
                        in_cell = false;
                    }
                }
                b"row" => html.push_str("</tr>"),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(html)
}
