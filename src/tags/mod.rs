use xml::attribute::OwnedAttribute;

use crate::parser_state::ParserState;

pub mod channel;
pub mod description;
pub mod enclosure;
pub mod item;
pub mod release_notes_link;
pub mod title;

pub fn dispatch_start(
    current_element: &str,
    attributes: &[OwnedAttribute],
    state: &mut ParserState,
) {
    match current_element {
        "channel" => channel::on_start(state),
        "item" => item::on_start(state),
        "sparkle:releaseNotesLink" => release_notes_link::on_start(state),
        "title" => title::on_start(state),
        "description" => description::on_start(state),
        "enclosure" => enclosure::on_start(attributes, state),
        _ => {}
    }
}

// Text is routed by whichever nesting counter is open rather than by element
// name, so one logical text run split across several events lands in the
// same field in call order.
pub fn dispatch_text(data: &str, state: &mut ParserState) {
    if state.in_release_notes > 0 {
        release_notes_link::on_text(data, state);
    } else if state.in_title > 0 {
        title::on_text(data, state);
    } else if state.in_description > 0 {
        description::on_text(data, state);
    }
}

pub fn dispatch_end(current_element: &str, state: &mut ParserState) {
    match current_element {
        "sparkle:releaseNotesLink" => release_notes_link::on_end(state),
        "title" => title::on_end(state),
        "description" => description::on_end(state),
        "channel" => channel::on_end(state),
        // </item> is not tracked; every item in the channel is inspected,
        // not just the first.
        _ => {}
    }
}
