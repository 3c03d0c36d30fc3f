use crate::parser_state::ParserState;

pub fn on_start(state: &mut ParserState) {
    if state.in_channel > 0 {
        state.in_item += 1;
    }
}
