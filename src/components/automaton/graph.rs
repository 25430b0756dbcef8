use std::collections::HashSet;

use rand::Rng;

use crate::error::VisualizerError;
use crate::geometry::{Bounds, Vec2};

/// For each state, the states it has transitions to.
pub type AdjacencyList = Vec<Vec<usize>>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphNode {
	pub position: Vec2,
	/// Per-iteration accumulator, zero between layout iterations.
	pub force: Vec2,
}

/// Directed graph over positioned automaton states.
///
/// Edge `(src, dst)` is stored as the single key `src * node_count + dst`.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	pub(super) nodes: Vec<GraphNode>,
	edges: HashSet<usize>,
}

impl Graph {
	pub fn from_adjacency_list(adjacency: &[Vec<usize>]) -> Result<Self, VisualizerError> {
		let node_count = adjacency.len();
		let mut edges = HashSet::new();
		for (src, targets) in adjacency.iter().enumerate() {
			for &dst in targets {
				if dst >= node_count {
					return Err(VisualizerError::InvalidIndex {
						src,
						dst,
						node_count,
					});
				}
				edges.insert(src * node_count + dst);
			}
		}
		Ok(Self {
			nodes: vec![GraphNode::default(); node_count],
			edges,
		})
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn position(&self, idx: usize) -> Option<Vec2> {
		self.nodes.get(idx).map(|n| n.position)
	}

	pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
		self.nodes.iter().map(|n| n.position)
	}

	pub fn are_connected(&self, src: usize, dst: usize) -> bool {
		let n = self.nodes.len();
		src < n && dst < n && self.edges.contains(&(src * n + dst))
	}

	/// Transitions exist in both directions.
	pub fn is_mutual(&self, src: usize, dst: usize) -> bool {
		self.are_connected(src, dst) && self.are_connected(dst, src)
	}

	/// Decoded `(src, dst)` pairs in ascending key order.
	pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
		let n = self.nodes.len();
		let mut keys: Vec<usize> = self.edges.iter().copied().collect();
		keys.sort_unstable();
		keys.into_iter().map(move |key| (key / n, key % n))
	}

	/// Places every node uniformly at random inside `bounds`, keeping half
	/// of `margins` free on each side.
	pub fn random_seed<R: Rng>(&mut self, bounds: Vec2, margins: Vec2, rng: &mut R) {
		let area = Bounds::from_size(bounds).inset(margins);
		for node in &mut self.nodes {
			node.position = Vec2::new(
				area.min.x + rng.random::<f64>() * area.width(),
				area.min.y + rng.random::<f64>() * area.height(),
			);
		}
	}

	pub fn bounding_box(&self) -> Option<Bounds> {
		Bounds::enclosing(self.positions())
	}

	/// Maps the current bounding box of the layout onto `target`, keeping
	/// relative positions.
	pub fn resize(&mut self, target: Bounds) -> Result<(), VisualizerError> {
		let Some(current) = self.bounding_box() else {
			return Ok(());
		};
		let (width, height) = (current.width(), current.height());
		if width <= 0.0 || height <= 0.0 {
			return Err(VisualizerError::DegenerateLayout { width, height });
		}

		let scale = Vec2::new(target.width() / width, target.height() / height);
		for node in &mut self.nodes {
			let rel = node.position - current.min;
			node.position = Vec2::new(
				target.min.x + rel.x * scale.x,
				target.min.y + rel.y * scale.y,
			);
		}
		Ok(())
	}
}
