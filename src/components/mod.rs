mod automaton;
mod parse_trace;
pub mod visualizer;
