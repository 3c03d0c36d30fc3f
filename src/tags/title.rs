use crate::parser_state::ParserState;

// Only item titles are collected; the channel's own <title> is ignored.
pub fn on_start(state: &mut ParserState) {
    if state.in_item > 0 {
        state.in_title += 1;
    }
}

pub fn on_text(data: &str, state: &mut ParserState) {
    state.appcast.title.push_str(data);
}

pub fn on_end(state: &mut ParserState) {
    if state.in_item > 0 {
        state.in_title = state.in_title.saturating_sub(1);
    }
}
