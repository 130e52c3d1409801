//! Part translators
//!
//! One streaming state machine per document kind, each turning the raw XML of
//! a single part into an HTML fragment:
//! - `word`: the main document body (`word/document.xml`)
//! - `sheet`: one worksheet (`xl/worksheets/sheet<N>.xml`)
//! - `slide`: one slide (`ppt/slides/slide<N>.xml`)
//!
//! Translators construct a fresh reader per part and hold no state across
//! calls. Tag names are matched by local name so that arbitrary namespace
//! prefixes (`w:p`, `a:t`, unprefixed) are all accepted. Parse errors
//! propagate so the assembler can tag the degradation; nothing here panics.

pub mod sheet;
pub mod slide;
pub mod word;
