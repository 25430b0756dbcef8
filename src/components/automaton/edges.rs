use std::f64::consts::TAU;

use super::graph::Graph;
use crate::config::EdgeStyle;
use crate::geometry::{MAGNITUDE_EPSILON, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
	pub center: Vec2,
	pub radius: f64,
	pub start_angle: f64,
	pub end_angle: f64,
	/// Direction of travel from `start_angle` to `end_angle`, in canvas terms.
	pub counter_clockwise: bool,
}

impl Arc {
	/// Circle through three points, traversed from `a` via `b` to `c`.
	///
	/// `None` when the points are collinear.
	pub fn through(a: Vec2, b: Vec2, c: Vec2) -> Option<Self> {
		let (ab, bc, ac) = (b - a, c - b, c - a);
		let cross = ab.cross(bc);
		if cross.abs() < MAGNITUDE_EPSILON {
			return None;
		}
		// Intersection of the perpendicular bisectors of ab and bc.
		let lambda = ac.dot(ab) / cross;
		let center = Vec2::new(b.x + c.x - lambda * bc.y, b.y + c.y + lambda * bc.x) * 0.5;

		let to_a = a - center;
		let to_c = c - center;
		Some(Self {
			center,
			radius: to_a.length(),
			start_angle: to_a.y.atan2(to_a.x),
			end_angle: to_c.y.atan2(to_c.x),
			counter_clockwise: cross < 0.0,
		})
	}

	/// Angle covered when travelling from start to end in the arc's direction.
	pub fn sweep(&self) -> f64 {
		let span = if self.counter_clockwise {
			self.start_angle - self.end_angle
		} else {
			self.end_angle - self.start_angle
		};
		span.rem_euclid(TAU)
	}

	/// Moves the ends toward each other by the given angles.
	fn trim(&mut self, start: f64, end: f64) {
		let dir = if self.counter_clockwise { -1.0 } else { 1.0 };
		self.start_angle += dir * start;
		self.end_angle -= dir * end;
	}

	pub fn end_point(&self) -> Vec2 {
		self.center + Vec2::from_angle(self.end_angle) * self.radius
	}

	/// Unit tangent at the end, pointing back along the arc.
	pub fn end_backward_tangent(&self) -> Vec2 {
		let forward = Vec2::from_angle(self.end_angle).perp();
		if self.counter_clockwise { forward } else { -forward }
	}
}

/// Filled isosceles triangle; `tip` is the apex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrowhead {
	pub tip: Vec2,
	pub left: Vec2,
	pub right: Vec2,
}

impl Arrowhead {
	/// Arrowhead whose apex sits on `tip`, its body extending along `back`.
	fn new(tip: Vec2, back: Vec2, width: f64, length: f64) -> Self {
		let base = tip + back * length;
		let half = back.perp() * (width / 2.0);
		Self {
			tip,
			left: base + half,
			right: base - half,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeBody {
	Line { start: Vec2, end: Vec2 },
	Arc(Arc),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeShape {
	pub body: EdgeBody,
	pub head: Arrowhead,
}

/// Drawable primitives for the transition `src -> dst`.
///
/// Mutual transitions bend into an arc so the two directions do not overlap.
/// `None` when either index is unknown or both states share a position.
pub fn edge_shape(graph: &Graph, src: usize, dst: usize, style: &EdgeStyle) -> Option<EdgeShape> {
	let (start, end) = (graph.position(src)?, graph.position(dst)?);
	if (end - start).length_or(0.0) == 0.0 {
		return None;
	}
	if graph.is_mutual(src, dst) {
		arc_between(start, end, style)
	} else {
		Some(line_between(start, end, style))
	}
}

fn line_between(start: Vec2, end: Vec2, style: &EdgeStyle) -> EdgeShape {
	let tenth = (end - start) * 0.1;
	let (start, tip) = (start + tenth, end - tenth);
	let back = (start - tip).normalized();
	let head = Arrowhead::new(tip, back, style.arrow_width, style.arrow_length);
	// Short edges collapse the body onto its start rather than reversing it.
	let shortening = style.arrow_length.min((tip - start).length());
	EdgeShape {
		body: EdgeBody::Line {
			start,
			end: tip + back * shortening,
		},
		head,
	}
}

fn arc_between(start: Vec2, end: Vec2, style: &EdgeStyle) -> Option<EdgeShape> {
	let chord = end - start;
	let middle = (start + end) * 0.5 + chord.perp().normalized() * style.arc_height;
	let mut arc = Arc::through(start, middle, end)?;

	let margin = arc.sweep() / 10.0;
	arc.trim(margin, margin);

	let tip = arc.end_point();
	let head = Arrowhead::new(
		tip,
		arc.end_backward_tangent(),
		style.arrow_width,
		style.arrow_length,
	);

	let mut body = arc;
	body.trim(0.0, (style.arrow_length / arc.radius).min(arc.sweep()));
	Some(EdgeShape {
		body: EdgeBody::Arc(body),
		head,
	})
}

#[cfg(test)]
mod tests {
	use std::f64::consts::PI;

	use super::*;
	use crate::geometry::Vec2;

	fn placed(adjacency: &[Vec<usize>], positions: &[Vec2]) -> Graph {
		let mut graph = Graph::from_adjacency_list(adjacency).unwrap();
		for (node, &p) in graph.nodes.iter_mut().zip(positions) {
			node.position = p;
		}
		graph
	}

	fn close(a: Vec2, b: Vec2) -> bool {
		(a - b).length() < 1e-9
	}

	#[test]
	fn circle_through_three_points() {
		let arc = Arc::through(Vec2::new(-1.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0)).unwrap();
		assert!(close(arc.center, Vec2::ZERO));
		assert!((arc.radius - 1.0).abs() < 1e-12);
		assert!((arc.start_angle - PI).abs() < 1e-12);
		assert!(arc.end_angle.abs() < 1e-12);
		// a -> b -> c turns right in y-down space: the arc passes through +y.
		assert!(arc.counter_clockwise);
		assert!((arc.sweep() - PI).abs() < 1e-12);
	}

	#[test]
	fn collinear_points_have_no_arc() {
		assert!(Arc::through(Vec2::ZERO, Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)).is_none());
	}

	#[test]
	fn one_way_edge_is_a_line() {
		let graph = placed(&[vec![1], vec![]], &[Vec2::ZERO, Vec2::new(100.0, 0.0)]);
		let style = EdgeStyle::default();
		let shape = edge_shape(&graph, 0, 1, &style).unwrap();

		let EdgeBody::Line { start, end } = shape.body else {
			panic!("expected a straight edge, got {:?}", shape.body);
		};
		assert!(close(start, Vec2::new(10.0, 0.0)));
		assert!(close(shape.head.tip, Vec2::new(90.0, 0.0)));
		// Body stops at the arrowhead base.
		assert!(close(end, Vec2::new(90.0 - style.arrow_length, 0.0)));
		assert!(close(shape.head.left, Vec2::new(82.0, -4.0)) || close(shape.head.left, Vec2::new(82.0, 4.0)));
		assert!(((shape.head.left - shape.head.right).length() - style.arrow_width).abs() < 1e-9);
	}

	#[test]
	fn mutual_edges_bend_apart() {
		let graph = placed(&[vec![1], vec![0]], &[Vec2::ZERO, Vec2::new(100.0, 0.0)]);
		let style = EdgeStyle::default();
		let forward = edge_shape(&graph, 0, 1, &style).unwrap();
		let backward = edge_shape(&graph, 1, 0, &style).unwrap();

		let (EdgeBody::Arc(a), EdgeBody::Arc(b)) = (forward.body, backward.body) else {
			panic!("mutual edges should be arcs");
		};
		// Centers on opposite sides of the chord.
		assert!(a.center.y * b.center.y < 0.0);
		assert!((a.radius - b.radius).abs() < 1e-9);
		// Trimmed arcs keep clear of the endpoints.
		assert!((forward.head.tip - Vec2::new(100.0, 0.0)).length() > 1.0);
		assert!((forward.head.tip - a.center).length() - a.radius < 1e-9);
	}

	#[test]
	fn short_line_body_never_reverses() {
		let graph = placed(&[vec![1], vec![]], &[Vec2::ZERO, Vec2::new(5.0, 0.0)]);
		let style = EdgeStyle::default();
		let shape = edge_shape(&graph, 0, 1, &style).unwrap();

		let EdgeBody::Line { start, end } = shape.body else {
			panic!("expected a straight edge, got {:?}", shape.body);
		};
		assert!(close(start, Vec2::new(0.5, 0.0)));
		assert!(close(shape.head.tip, Vec2::new(4.5, 0.0)));
		assert!(close(end, start));
	}

	#[test]
	fn arc_ends_are_trimmed_by_a_tenth_of_the_sweep() {
		let (start, end) = (Vec2::new(10.0, 10.0), Vec2::new(60.0, 90.0));
		let graph = placed(&[vec![1], vec![0]], &[start, end]);
		let style = EdgeStyle::default();
		let shape = edge_shape(&graph, 0, 1, &style).unwrap();
		let EdgeBody::Arc(body) = shape.body else {
			panic!("expected an arc");
		};

		let middle = (start + end) * 0.5 + (end - start).perp().normalized() * style.arc_height;
		let full = Arc::through(start, middle, end).unwrap();
		let to_tip = shape.head.tip - body.center;
		let trimmed = Arc {
			end_angle: to_tip.y.atan2(to_tip.x),
			..body
		};
		assert!((trimmed.sweep() - 0.8 * full.sweep()).abs() < 1e-9);
		// The tail end moves by the same tenth.
		let from_tail = Arc {
			end_angle: full.start_angle,
			counter_clockwise: !full.counter_clockwise,
			..body
		};
		assert!((from_tail.sweep() - full.sweep() / 10.0).abs() < 1e-9);
	}

	#[test]
	fn arc_body_stops_short_of_arrowhead() {
		let graph = placed(&[vec![1], vec![0]], &[Vec2::new(10.0, 10.0), Vec2::new(60.0, 90.0)]);
		let style = EdgeStyle::default();
		let shape = edge_shape(&graph, 0, 1, &style).unwrap();
		let EdgeBody::Arc(body) = shape.body else {
			panic!("expected an arc");
		};
		let body_end = body.end_point();
		let gap = (body_end - shape.head.tip).length();
		assert!(gap > style.arrow_length * 0.9 && gap <= style.arrow_length + 1e-9, "gap {gap}");
	}

	#[test]
	fn coincident_states_are_skipped() {
		let graph = placed(&[vec![1], vec![0]], &[Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0)]);
		assert!(edge_shape(&graph, 0, 1, &EdgeStyle::default()).is_none());
		assert!(edge_shape(&graph, 0, 7, &EdgeStyle::default()).is_none());
	}
}
