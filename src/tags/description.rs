use crate::parser_state::ParserState;

pub fn on_start(state: &mut ParserState) {
    if state.in_item > 0 {
        state.in_description += 1;
    }
}

pub fn on_text(data: &str, state: &mut ParserState) {
    state.appcast.description.push_str(data);
}

pub fn on_end(state: &mut ParserState) {
    if state.in_item > 0 {
        state.in_description = state.in_description.saturating_sub(1);
    }
}
