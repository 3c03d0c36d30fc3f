use crate::parser_state::ParserState;

pub fn on_start(state: &mut ParserState) {
    if state.in_item > 0 {
        state.in_release_notes += 1;
    }
}

pub fn on_text(data: &str, state: &mut ParserState) {
    state.appcast.release_notes_url.push_str(data);
}

pub fn on_end(state: &mut ParserState) {
    if state.in_item > 0 {
        state.in_release_notes = state.in_release_notes.saturating_sub(1);
    }
}
