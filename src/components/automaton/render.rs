use std::f64::consts::PI;

use super::edges::{EdgeBody, EdgeShape, edge_shape};
use super::graph::Graph;
use crate::config::EdgeStyle;
use crate::geometry::Vec2;
use crate::surface::Surface;

/// Top-left anchor of the ideal-length scale bar.
const SCALE_BAR_ORIGIN: Vec2 = Vec2::new(20.0, 20.0);

pub fn render(
	graph: &Graph,
	style: &EdgeStyle,
	ideal_length: f64,
	size: Vec2,
	surface: &impl Surface,
) {
	surface.set_fill_style(&style.background);
	surface.fill_rect(Vec2::ZERO, size);
	draw_scale_bar(ideal_length, style, surface);
	draw_edges(graph, style, surface);
	draw_nodes(graph, style, surface);
}

fn draw_scale_bar(ideal_length: f64, style: &EdgeStyle, surface: &impl Surface) {
	surface.set_stroke_style(&style.edge_color);
	surface.set_line_width(1.0);
	surface.begin_path();
	surface.move_to(SCALE_BAR_ORIGIN);
	surface.line_to(SCALE_BAR_ORIGIN + Vec2::new(ideal_length, 0.0));
	surface.stroke();
}

fn draw_edges(graph: &Graph, style: &EdgeStyle, surface: &impl Surface) {
	surface.set_stroke_style(&style.edge_color);
	surface.set_fill_style(&style.edge_color);
	surface.set_line_width(1.0);
	for (src, dst) in graph.edges() {
		if let Some(shape) = edge_shape(graph, src, dst, style) {
			draw_edge(&shape, surface);
		}
	}
}

fn draw_edge(shape: &EdgeShape, surface: &impl Surface) {
	surface.begin_path();
	match shape.body {
		EdgeBody::Line { start, end } => {
			surface.move_to(start);
			surface.line_to(end);
		}
		EdgeBody::Arc(arc) => surface.arc(
			arc.center,
			arc.radius,
			arc.start_angle,
			arc.end_angle,
			arc.counter_clockwise,
		),
	}
	surface.stroke();

	let head = &shape.head;
	surface.begin_path();
	surface.move_to(head.tip);
	surface.line_to(head.left);
	surface.line_to(head.right);
	surface.close_path();
	surface.fill();
}

fn draw_nodes(graph: &Graph, style: &EdgeStyle, surface: &impl Surface) {
	surface.set_fill_style(&style.node_color);
	for p in graph.positions() {
		surface.begin_path();
		surface.arc(p, style.node_radius, 0.0, 2.0 * PI, false);
		surface.fill();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::surface::recording::{Op, RecordingSurface};

	#[test]
	fn draws_every_edge_and_node() {
		let mut graph = Graph::from_adjacency_list(&[vec![1], vec![0, 2], vec![]]).unwrap();
		let spots = [Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), Vec2::new(100.0, 100.0)];
		for (node, p) in graph.nodes.iter_mut().zip(spots) {
			node.position = p;
		}
		let surface = RecordingSurface::default();
		render(&graph, &EdgeStyle::default(), 40.0, Vec2::new(800.0, 600.0), &surface);
		let ops = surface.take();

		assert_eq!(ops[1], Op::FillRect(Vec2::ZERO, Vec2::new(800.0, 600.0)));
		let arcs = ops.iter().filter(|op| matches!(op, Op::Arc { .. })).count();
		// Two bent edges for the mutual pair plus three node markers.
		assert_eq!(arcs, 5);
		// Three arrowheads plus three node markers.
		assert_eq!(ops.iter().filter(|op| **op == Op::Fill).count(), 6);
		assert!(ops.contains(&Op::LineTo(Vec2::new(60.0, 20.0))));
	}
}
