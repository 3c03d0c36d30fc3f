use std::io::{Cursor, Read};

use xml::reader::{ParserConfig, XmlEvent};

use crate::error::Error;
use crate::models::Appcast;
use crate::parser_state::ParserState;
use crate::tags;
use crate::utils;

/// Result of one parse pass.
#[derive(Debug)]
pub struct ParseOutcome {
    /// The populated descriptor.
    pub appcast: Appcast,
    /// Version of the last enclosure accepted in this pass or an earlier
    /// one; feed this into the next parse to keep the enclosure filter
    /// monotonic across documents.
    pub last_seen_version: Option<String>,
}

/// Parses an appcast document into a fresh descriptor.
///
/// `last_seen_version` is the version of the last enclosure accepted by any
/// previous parse; pass `None` on the first call. Enclosures that do not
/// improve on it are ignored entirely.
///
/// # Errors
/// Returns [`Error::MalformedDocument`] when the XML engine reports a syntax
/// error; the descriptor accumulated up to that point is discarded.
pub fn parse_appcast<R: Read>(
    reader: R,
    last_seen_version: Option<&str>,
) -> Result<ParseOutcome, Error> {
    parse_appcast_into(reader, Appcast::default(), last_seen_version)
}

/// Like [`parse_appcast`], but continues filling an existing descriptor.
///
/// Rejected enclosures leave previously set fields intact, so a caller that
/// re-parses with a descriptor from an earlier pass keeps the
/// highest-versioned payload seen so far even when the new document only
/// lists older entries.
pub fn parse_appcast_into<R: Read>(
    reader: R,
    appcast: Appcast,
    last_seen_version: Option<&str>,
) -> Result<ParseOutcome, Error> {
    let config = utils::add_html_entities_to_parser_config(ParserConfig::new());
    let parser = config.create_reader(reader);

    let mut state = ParserState {
        appcast,
        last_seen_version: last_seen_version.map(str::to_string),
        ..ParserState::default()
    };

    for event in parser {
        match event {
            Ok(XmlEvent::StartElement {
                name, attributes, ..
            }) => {
                let current = utils::qualified_name(&name);
                tags::dispatch_start(&current, &attributes, &mut state);
            }
            // CDATA and whitespace runs are textual content like any other;
            // appending all three preserves the exact byte content of a
            // logical text run.
            Ok(XmlEvent::Characters(data))
            | Ok(XmlEvent::CData(data))
            | Ok(XmlEvent::Whitespace(data)) => {
                tags::dispatch_text(&data, &mut state);
            }
            Ok(XmlEvent::EndElement { name }) => {
                let current = utils::qualified_name(&name);
                tags::dispatch_end(&current, &mut state);
            }
            Ok(XmlEvent::EndDocument) => break,
            Err(e) => return Err(Error::MalformedDocument(e.to_string())),
            _ => {}
        }
    }

    Ok(ParseOutcome {
        appcast: state.appcast,
        last_seen_version: state.last_seen_version,
    })
}

/// Runs the synchronous parser on a blocking thread.
pub async fn parse_appcast_async(
    bytes: Vec<u8>,
    last_seen_version: Option<String>,
) -> Result<ParseOutcome, Error> {
    tokio::task::spawn_blocking(move || {
        parse_appcast(Cursor::new(bytes), last_seen_version.as_deref())
    })
    .await
    .map_err(|e| Error::ParseTask(e.to_string()))?
}
