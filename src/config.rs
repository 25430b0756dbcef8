//! Tunable constants for the automaton layout and the parse tree animation.

use crate::geometry::Vec2;

/// Physics constants for the force-directed layout.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Strength of the inverse-square repulsion between unconnected states.
	pub repulsive_constant: f64,
	/// Strength of the logarithmic spring between connected states.
	pub attractive_constant: f64,
	/// Edge length at which the spring force vanishes.
	pub ideal_length: f64,
	/// Number of relaxation iterations.
	pub iterations: usize,
	/// Stop early once no node moves farther than this in one iteration.
	pub convergence_threshold: Option<f64>,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			repulsive_constant: 1000.0,
			attractive_constant: 1.0,
			ideal_length: 40.0,
			iterations: 1024,
			convergence_threshold: None,
		}
	}
}

/// Geometry and colors of automaton edges and states.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeStyle {
	/// Perpendicular offset of the arc midpoint for mutual edges.
	pub arc_height: f64,
	/// Base width of the arrowhead.
	pub arrow_width: f64,
	/// Distance from the arrowhead apex to its base.
	pub arrow_length: f64,
	/// Radius of the state marker.
	pub node_radius: f64,
	/// Color of edges and arrowheads.
	pub edge_color: String,
	/// Color of the state markers.
	pub node_color: String,
	/// Canvas background.
	pub background: String,
}

impl Default for EdgeStyle {
	fn default() -> Self {
		Self {
			arc_height: 12.0,
			arrow_width: 8.0,
			arrow_length: 8.0,
			node_radius: 4.0,
			edge_color: "#000000".into(),
			node_color: "rgb(255, 0, 0)".into(),
			background: "rgb(190, 190, 190)".into(),
		}
	}
}

/// Typography, spacing and timing of the parse tree animation.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceStyle {
	/// CSS font family of every label.
	pub font_family: String,
	/// Font size in pixels, also the height of one tree row.
	pub font_size: f64,
	/// Horizontal gap between neighbouring labels.
	pub x_spacing: f64,
	/// Vertical gap between tree rows.
	pub y_spacing: f64,
	/// Baseline origin of the first shifted symbol.
	pub origin: Vec2,
	/// Gap between a label and the tree edges touching it.
	pub edge_gap: f64,
	/// Duration of a label reveal.
	pub text_duration_ms: f64,
	/// Duration of a tree edge growing from child to parent.
	pub line_duration_ms: f64,
	/// Width of tree edges.
	pub line_width: f64,
	/// Color of labels and tree edges.
	pub ink: String,
	/// Canvas background.
	pub background: String,
}

impl TraceStyle {
	/// CSS font shorthand, e.g. `40px Ubuntu Mono`.
	pub fn font(&self) -> String {
		format!("{}px {}", self.font_size, self.font_family)
	}
}

impl Default for TraceStyle {
	fn default() -> Self {
		Self {
			font_family: "Ubuntu Mono".into(),
			font_size: 40.0,
			x_spacing: 50.0,
			y_spacing: 38.0,
			origin: Vec2::new(10.0, 40.0),
			edge_gap: 10.0,
			text_duration_ms: 500.0,
			line_duration_ms: 800.0,
			line_width: 2.0,
			ink: "#000000".into(),
			background: "#E6E6E6".into(),
		}
	}
}

/// Everything a session needs besides its input data.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualizerConfig {
	/// Force-directed layout constants.
	pub layout: LayoutConfig,
	/// Automaton drawing style.
	pub edges: EdgeStyle,
	/// Parse tree drawing style.
	pub trace: TraceStyle,
	/// Horizontal and vertical margin kept free around the automaton.
	pub margins: Vec2,
}

impl Default for VisualizerConfig {
	fn default() -> Self {
		Self {
			layout: LayoutConfig::default(),
			edges: EdgeStyle::default(),
			trace: TraceStyle::default(),
			margins: Vec2::new(50.0, 50.0),
		}
	}
}
