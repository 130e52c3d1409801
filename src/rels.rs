//! Relationship resolution
//!
//! Each slide part may carry a sibling `_rels/<part>.rels` file declaring
//! links to other parts. Only image-typed relationships matter here: the map
//! lets the slide translator rewrite `r:embed` ids into `media/<file>` URLs.

use log::debug;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use rustc_hash::FxHashMap;

/// Relationship id -> final path segment of the target (e.g. `image1.png`).
pub type RelationshipMap = FxHashMap<String, String>;

/// Parse a relationship part and collect its image relationships.
///
/// Targets are stored by file name only because emitted image references use
/// a flat `media/<file>` convention. Malformed XML is not an error: whatever
/// was parsed before the failure point is returned.
pub fn image_relationships(xml: &[u8]) -> RelationshipMap {
    let mut map = RelationshipMap::default();
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::with_capacity(512);

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() != b"Relationship" {
                    buf.clear();
                    continue;
                }
                let mut id = None;
                let mut rel_type = None;
                let mut target = None;
                for attr in e.attributes().filter_map(|a| a.ok()) {
                    let value = match attr.unescape_value() {
                        Ok(value) => value.into_owned(),
                        Err(_) => continue,
                    };
                    match attr.key.local_name().as_ref() {
                        b"Id" => id = Some(value),
                        b"Type" => rel_type = Some(value),
                        b"Target" => target = Some(value),
                        _ => {}
                    }
                }
                if let (Some(id), Some(rel_type), Some(target)) = (id, rel_type, target) {
                    if rel_type.contains("image") {
                        // Target is usually "../media/image1.png"
                        let file = target.rsplit('/').next().unwrap_or(&target);
                        map.insert(id, file.to_string());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                // Best effort: keep what we have.
                debug!("relationship part truncated: {}", err);
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    map
}
