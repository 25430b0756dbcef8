use log::{debug, error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::components::automaton::{self, AdjacencyList, Graph};
use crate::components::parse_trace::{AnimationScheduler, StepperState, Trace, TraceStepper};
use crate::config::VisualizerConfig;
use crate::error::VisualizerError;
use crate::geometry::{Bounds, Vec2};
use crate::surface::Surface;

/// Inputs of one visualization: a parse trace and the automaton that produced it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSource {
	pub trace: Trace,
	pub adjacency: AdjacencyList,
}

impl SessionSource {
	pub fn from_json(trace: &str, adjacency: &str) -> Result<Self, VisualizerError> {
		Ok(Self {
			trace: Trace::from_json(trace)?,
			adjacency: serde_json::from_str(adjacency)?,
		})
	}
}

/// Everything that changes while a trace is replayed.
///
/// A reset builds a fresh `Session` and swaps it in whole; nothing here is
/// patched in place across loads.
pub struct Session {
	graph: Graph,
	stepper: TraceStepper,
	scheduler: AnimationScheduler,
	config: VisualizerConfig,
	viewport: Vec2,
	last_frame: Option<f64>,
	fault: Option<VisualizerError>,
}

impl Session {
	/// Builds the automaton layout and a stepper positioned before the first action.
	pub fn new(
		source: &SessionSource,
		config: VisualizerConfig,
		viewport: Vec2,
		seed: u64,
	) -> Result<Self, VisualizerError> {
		let mut graph = Graph::from_adjacency_list(&source.adjacency)?;
		graph.random_seed(viewport, config.margins, &mut StdRng::seed_from_u64(seed));
		let report = automaton::relax(&mut graph, &config.layout);
		debug!(
			"layout of {} states / {} transitions: {} iterations, mean force {:.4}",
			graph.node_count(),
			graph.edge_count(),
			report.iterations,
			report.mean_force
		);
		fit(&mut graph, viewport, config.margins);

		info!(
			"session reset: {:?} with {} actions",
			source.trace.string,
			source.trace.actions.len()
		);
		Ok(Self {
			graph,
			stepper: TraceStepper::new(source.trace.clone(), config.trace.clone()),
			scheduler: AnimationScheduler::new(config.trace.ink.clone(), config.trace.line_width),
			config,
			viewport,
			last_frame: None,
			fault: None,
		})
	}

	#[cfg(test)]
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	#[cfg(test)]
	pub fn stepper(&self) -> &TraceStepper {
		&self.stepper
	}

	/// Trace error that stopped the replay, if any.
	pub fn fault(&self) -> Option<&VisualizerError> {
		self.fault.as_ref()
	}

	/// Whether nothing will change on screen anymore.
	#[cfg(test)]
	pub fn is_idle(&self) -> bool {
		self.scheduler.is_settled() && (self.fault.is_some() || self.stepper.state() != StepperState::Running)
	}

	/// Frame callback: derives the elapsed time from the clock and ticks.
	pub fn frame(&mut self, timestamp_ms: f64, tree: &impl Surface, states: &impl Surface) {
		let delta = self.last_frame.map_or(0.0, |last| (timestamp_ms - last).max(0.0));
		self.last_frame = Some(timestamp_ms);
		self.tick(delta, tree, states);
	}

	/// Redraws both surfaces and, once the previous batch has settled, feeds
	/// the next trace action to the scheduler.
	pub fn tick(&mut self, delta_ms: f64, tree: &impl Surface, states: &impl Surface) {
		tree.set_fill_style(&self.config.trace.background);
		tree.fill_rect(Vec2::ZERO, self.viewport);
		let settled = self.scheduler.tick(delta_ms, tree);

		automaton::render(
			&self.graph,
			&self.config.edges,
			self.config.layout.ideal_length,
			self.viewport,
			states,
		);

		if settled && self.fault.is_none() {
			self.advance(tree);
		}
	}

	fn advance(&mut self, measure: &impl Surface) {
		if self.stepper.state() != StepperState::Running {
			return;
		}
		let batch = match self.stepper.step(measure) {
			Ok(batch) => batch,
			Err(err) => {
				error!("trace replay halted: {}", err);
				self.fault = Some(err);
				return;
			}
		};
		if let (StepperState::Finished, Some(root)) = (self.stepper.state(), self.stepper.stack().first()) {
			info!("replay finished with {:?} at the root", root.label);
		}
		if batch.is_empty() {
			return;
		}
		debug!("stack depth {}", self.stepper.stack().len());
		if let Err(err) = self.scheduler.begin(batch) {
			warn!("dropping animation batch: {}", err);
		}
	}
}

fn fit(graph: &mut Graph, viewport: Vec2, margins: Vec2) {
	if let Err(err) = graph.resize(Bounds::from_size(viewport).inset(margins)) {
		warn!("keeping unscaled layout: {}", err);
	}
}
