use log::debug;

use super::animation::{AnimationCommand, AnimationPayload};
use super::types::{Action, ActionCursor, ParseTreeNode, Trace};
use crate::config::TraceStyle;
use crate::error::VisualizerError;
use crate::geometry::{GlyphBox, Vec2};
use crate::surface::TextMeasure;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepperState {
	Running,
	Finished,
	/// Stopped on a malformed trace; the error was returned by the failing step.
	Halted,
}

/// Replays a shift-reduce trace one action at a time, laying out the parse
/// tree as it grows downward from the input row.
pub struct TraceStepper {
	input: Vec<char>,
	consumed: usize,
	stack: Vec<ParseTreeNode>,
	cursor: ActionCursor,
	state: StepperState,
	style: TraceStyle,
	font: String,
	/// Baseline origin of the next node to be placed.
	node_start: Vec2,
}

impl TraceStepper {
	pub fn new(trace: Trace, style: TraceStyle) -> Self {
		Self {
			input: trace.string.chars().collect(),
			consumed: 0,
			stack: Vec::new(),
			cursor: ActionCursor::new(trace.actions),
			state: StepperState::Running,
			font: style.font(),
			node_start: style.origin,
			style,
		}
	}

	pub fn state(&self) -> StepperState {
		self.state
	}

	/// Current parser stack, bottom first.
	pub fn stack(&self) -> &[ParseTreeNode] {
		&self.stack
	}

	/// Pulls the next action and returns the animations that visualize it.
	///
	/// Finishing (explicitly or by running out of actions) yields an empty
	/// batch. Any error halts the stepper for good.
	pub fn step(&mut self, measure: &impl TextMeasure) -> Result<Vec<AnimationCommand>, VisualizerError> {
		if self.state != StepperState::Running {
			return Ok(Vec::new());
		}
		let result = self.apply_next(measure);
		if result.is_err() {
			self.state = StepperState::Halted;
		}
		result
	}

	fn apply_next(&mut self, measure: &impl TextMeasure) -> Result<Vec<AnimationCommand>, VisualizerError> {
		let Some(action) = self.cursor.next_action().cloned() else {
			debug!("trace exhausted after {} actions", self.cursor.position());
			return self.finish().map(|()| Vec::new());
		};

		match action {
			Action::Shift => {
				self.shift(measure)?;
				let node = self.top();
				debug!("shift {:?}", node.label);
				Ok(vec![self.reveal(node)])
			}
			Action::Reduce { to } => {
				self.reduce(&to.symbol, to.size, measure)?;
				let node = self.top();
				debug!("reduce {} children into {:?}", node.children.len(), node.label);
				Ok(self.reduction_batch(node))
			}
			Action::Finish { result } => {
				debug!("finish (result {:?})", result);
				self.finish().map(|()| Vec::new())
			}
		}
	}

	/// Moves the next input symbol onto the stack as a leaf.
	pub fn shift(&mut self, measure: &impl TextMeasure) -> Result<(), VisualizerError> {
		let symbol = *self
			.input
			.get(self.consumed)
			.ok_or(VisualizerError::ExhaustedInput {
				consumed: self.consumed,
			})?;
		self.consumed += 1;

		let label = symbol.to_string();
		let glyph = self.place(&label, measure);
		self.stack.push(ParseTreeNode {
			label,
			glyph,
			children: Vec::new(),
		});
		Ok(())
	}

	/// Replaces the top `size` stack entries with a `symbol` node owning them,
	/// centered under its children one row further down.
	pub fn reduce(
		&mut self,
		symbol: &str,
		size: usize,
		measure: &impl TextMeasure,
	) -> Result<(), VisualizerError> {
		let depth = self.stack.len();
		if size > depth {
			return Err(VisualizerError::StackUnderflow {
				requested: size,
				depth,
			});
		}
		let children = self.stack.split_off(depth - size);

		let width = measure.measure_text(symbol, &self.font).width;
		let span = children.iter().fold(None, |span: Option<(f64, f64)>, child| {
			let (lo, hi) = span.unwrap_or((child.glyph.x, child.glyph.right()));
			Some((lo.min(child.glyph.x), hi.max(child.glyph.right())))
		});
		if let Some((lo, hi)) = span {
			self.node_start.x = lo + (hi - lo) / 2.0 - width / 2.0;
		}
		self.node_start.y += self.style.font_size + self.style.y_spacing;

		let glyph = self.place(symbol, measure);
		self.stack.push(ParseTreeNode {
			label: symbol.into(),
			glyph,
			children,
		});
		Ok(())
	}

	fn finish(&mut self) -> Result<(), VisualizerError> {
		if self.stack.len() != 1 {
			return Err(VisualizerError::UnbalancedStack {
				depth: self.stack.len(),
			});
		}
		self.state = StepperState::Finished;
		Ok(())
	}

	/// Glyph box for `label` at the cursor; advances the cursor past it.
	///
	/// Only the width is measured; every box is one row tall.
	fn place(&mut self, label: &str, measure: &impl TextMeasure) -> GlyphBox {
		let metrics = measure.measure_text(label, &self.font);
		let glyph = GlyphBox {
			x: self.node_start.x,
			y: self.node_start.y,
			width: metrics.width,
			height: self.style.font_size,
		};
		self.node_start.x += metrics.width + self.style.x_spacing;
		glyph
	}

	fn top(&self) -> &ParseTreeNode {
		&self.stack[self.stack.len() - 1]
	}

	fn reveal(&self, node: &ParseTreeNode) -> AnimationCommand {
		AnimationCommand::new(
			AnimationPayload::Text {
				label: node.label.clone(),
				glyph: node.glyph,
				font: self.font.clone(),
			},
			self.style.text_duration_ms,
		)
	}

	fn reduction_batch(&self, node: &ParseTreeNode) -> Vec<AnimationCommand> {
		let gap = self.style.edge_gap;
		let parent_top = Vec2::new(node.glyph.center_x(), node.glyph.y - node.glyph.height - gap);

		let mut batch = Vec::with_capacity(node.children.len() + 1);
		batch.push(self.reveal(node));
		batch.extend(node.children.iter().map(|child| {
			AnimationCommand::new(
				AnimationPayload::Line {
					start: Vec2::new(child.glyph.center_x(), child.glyph.y + gap),
					end: parent_top,
				},
				self.style.line_duration_ms,
			)
		}));
		batch
	}
}
