use crate::parser_state::ParserState;

pub fn on_start(state: &mut ParserState) {
    state.in_channel += 1;
}

pub fn on_end(state: &mut ParserState) {
    state.in_channel = state.in_channel.saturating_sub(1);
}
