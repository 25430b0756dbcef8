use log::{debug, warn};

use super::graph::Graph;
use crate::config::LayoutConfig;
use crate::geometry::Vec2;

/// Distance used for coincident nodes. Nonzero so the unit displacement
/// collapses to zero instead of NaN.
const COINCIDENT_DISTANCE: f64 = 1.0;

/// Outcome of a [`relax`] run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutReport {
	/// Iterations actually run.
	pub iterations: usize,
	/// Mean per-node force magnitude of the last iteration.
	pub mean_force: f64,
}

/// Runs the force simulation for the configured iteration budget.
///
/// Connected states (in either direction) pull toward `ideal_length` with a
/// logarithmic spring, every other pair repels with an inverse-square force.
/// The step size anneals as `2 * exp(-t / 1000)`.
pub fn relax(graph: &mut Graph, config: &LayoutConfig) -> LayoutReport {
	let mut report = LayoutReport {
		iterations: 0,
		mean_force: 0.0,
	};
	for t in 0..config.iterations {
		let (mean_force, max_step) = iterate(graph, config, t);
		report.iterations = t + 1;
		report.mean_force = mean_force;
		if let Some(threshold) = config.convergence_threshold {
			if max_step < threshold {
				debug!("layout converged after {} iterations", t + 1);
				break;
			}
		}
	}
	if !graph.positions().all(Vec2::is_finite) {
		warn!("layout diverged after {} iterations", report.iterations);
	}
	report
}

/// One simulation step at annealing time `t`.
///
/// Returns the mean force magnitude and the largest displacement applied.
pub fn iterate(graph: &mut Graph, config: &LayoutConfig, t: usize) -> (f64, f64) {
	accumulate_forces(graph, config);

	let delta = 2.0 * (-(t as f64) * 0.001).exp();
	let (mut total, mut max_step) = (0.0, 0.0_f64);
	for node in &mut graph.nodes {
		let step = node.force * delta;
		total += node.force.length();
		max_step = max_step.max(step.length());
		node.position += step;
		node.force = Vec2::ZERO;
	}

	let n = graph.nodes.len();
	(if n == 0 { 0.0 } else { total / n as f64 }, max_step)
}

fn accumulate_forces(graph: &mut Graph, config: &LayoutConfig) {
	let n = graph.nodes.len();
	for i in 0..n {
		for j in (i + 1)..n {
			let disp = graph.nodes[j].position - graph.nodes[i].position;
			let dist = disp.length_or(COINCIDENT_DISTANCE);
			let unit = disp * (1.0 / dist);

			let magnitude = if graph.are_connected(i, j) || graph.are_connected(j, i) {
				config.attractive_constant * (dist / config.ideal_length).ln()
			} else {
				-config.repulsive_constant / (dist * dist)
			};

			let f = unit * magnitude;
			graph.nodes[i].force += f;
			graph.nodes[j].force -= f;
		}
	}
}
