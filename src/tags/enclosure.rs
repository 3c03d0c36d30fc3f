use std::cmp::Ordering;

use xml::attribute::OwnedAttribute;

use crate::parser_state::ParserState;
use crate::utils;
use crate::version::compare_versions;

const ATTR_URL: &str = "url";
const ATTR_VERSION: &str = "sparkle:version";
const ATTR_SHORT_VERSION: &str = "sparkle:shortVersionString";

/// Applies the enclosure selection rule: the first enclosure ever seen is
/// accepted unconditionally; after that an enclosure is accepted only if its
/// version compares strictly greater than the last accepted one. Rejected
/// enclosures leave already-set descriptor fields untouched.
pub fn on_start(attributes: &[OwnedAttribute], state: &mut ParserState) {
    if state.in_item == 0 {
        return;
    }

    let mut accept = true;
    if let Some(last_seen) = state.last_seen_version.as_deref() {
        accept = false;
        for attr in attributes {
            if utils::qualified_name(&attr.name) == ATTR_VERSION
                && compare_versions(last_seen, &attr.value) == Ordering::Less
            {
                accept = true;
            }
        }
    }

    if !accept {
        return;
    }

    // Each attribute is copied independently; a missing attribute leaves its
    // target field unchanged.
    for attr in attributes {
        match utils::qualified_name(&attr.name).as_str() {
            ATTR_URL => state.appcast.download_url = attr.value.clone(),
            ATTR_VERSION => {
                state.appcast.version = attr.value.clone();
                state.last_seen_version = Some(attr.value.clone());
            }
            ATTR_SHORT_VERSION => state.appcast.short_version_string = attr.value.clone(),
            _ => {}
        }
    }
}
