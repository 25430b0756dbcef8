//! Error type shared by the graph, layout and trace subsystems.

use thiserror::Error;

/// Everything that can go wrong while building or replaying a session.
#[derive(Debug, Error)]
pub enum VisualizerError {
	/// The adjacency list names a state that does not exist.
	#[error("state {src} has a transition to state {dst}, but only {node_count} states exist")]
	InvalidIndex {
		/// Source state of the offending transition.
		src: usize,
		/// Destination that is out of range.
		dst: usize,
		/// Number of states in the adjacency list.
		node_count: usize,
	},
	/// All nodes share an x or y coordinate, so the layout cannot be rescaled.
	#[error("layout has a zero-extent bounding box ({width} x {height})")]
	DegenerateLayout {
		/// Width of the current bounding box.
		width: f64,
		/// Height of the current bounding box.
		height: f64,
	},
	/// A shift was replayed after the whole input had been consumed.
	#[error("shift past the end of the input ({consumed} symbols already consumed)")]
	ExhaustedInput {
		/// Number of input symbols consumed before the failing shift.
		consumed: usize,
	},
	/// A reduce asked for more stack entries than exist.
	#[error("reduce needs {requested} stack entries but the stack holds {depth}")]
	StackUnderflow {
		/// Arity of the reduction.
		requested: usize,
		/// Stack depth at the time of the reduction.
		depth: usize,
	},
	/// The trace ended without leaving exactly one parse root.
	#[error("trace finished with {depth} nodes on the stack, expected exactly one")]
	UnbalancedStack {
		/// Stack depth when the trace finished.
		depth: usize,
	},
	/// A new animation batch was started before the previous one settled.
	#[error("cannot start a new animation batch while {in_flight} animations are in flight")]
	BatchInFlight {
		/// Number of commands still animating.
		in_flight: usize,
	},
	/// Trace or adjacency list JSON could not be decoded.
	#[error("malformed input: {0}")]
	MalformedInput(#[from] serde_json::Error),
}
