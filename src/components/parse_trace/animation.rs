use crate::error::VisualizerError;
use crate::geometry::{GlyphBox, Vec2};
use crate::surface::Surface;

#[derive(Clone, Debug, PartialEq)]
pub enum AnimationPayload {
	/// Segment growing from `start` toward `end`.
	Line { start: Vec2, end: Vec2 },
	/// Label fading in at its baseline origin.
	Text {
		label: String,
		glyph: GlyphBox,
		font: String,
	},
}

/// Time-boxed drawing whose completion grows from 0 to 1.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationCommand {
	pub payload: AnimationPayload,
	pub duration_ms: f64,
	elapsed_ms: f64,
}

impl AnimationCommand {
	pub fn new(payload: AnimationPayload, duration_ms: f64) -> Self {
		Self {
			payload,
			duration_ms,
			elapsed_ms: 0.0,
		}
	}

	pub fn completion(&self) -> f64 {
		if self.duration_ms <= 0.0 {
			return 1.0;
		}
		(self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
	}

	pub fn is_complete(&self) -> bool {
		self.completion() >= 1.0
	}

	/// Saturates at full completion; negative deltas are ignored.
	fn advance(&mut self, delta_ms: f64) {
		if !self.is_complete() {
			self.elapsed_ms += delta_ms.max(0.0);
		}
	}

	pub fn draw(&self, ink: &str, line_width: f64, surface: &impl Surface) {
		let t = self.completion();
		match &self.payload {
			AnimationPayload::Line { start, end } => {
				surface.set_stroke_style(ink);
				surface.set_line_width(line_width);
				surface.begin_path();
				surface.move_to(*start);
				surface.line_to(start.lerp(*end, t));
				surface.stroke();
			}
			AnimationPayload::Text { label, glyph, font } => {
				surface.set_global_alpha(t);
				surface.set_fill_style(ink);
				surface.set_font(font);
				surface.fill_text(label, glyph.origin());
				surface.set_global_alpha(1.0);
			}
		}
	}
}

/// Advances one batch of animations at a time and keeps finished ones on screen.
#[derive(Clone, Debug, Default)]
pub struct AnimationScheduler {
	active: Vec<AnimationCommand>,
	settled: Vec<AnimationCommand>,
	ink: String,
	line_width: f64,
}

impl AnimationScheduler {
	pub fn new(ink: impl Into<String>, line_width: f64) -> Self {
		Self {
			ink: ink.into(),
			line_width,
			..Self::default()
		}
	}

	/// Starts a new batch. The previous batch must have settled.
	pub fn begin(&mut self, batch: Vec<AnimationCommand>) -> Result<(), VisualizerError> {
		if !self.active.is_empty() {
			return Err(VisualizerError::BatchInFlight {
				in_flight: self.active.len(),
			});
		}
		self.active = batch;
		Ok(())
	}

	/// Advances the active batch by `delta_ms` and draws everything, settled
	/// commands first. Returns whether nothing is left in flight.
	pub fn tick(&mut self, delta_ms: f64, surface: &impl Surface) -> bool {
		for command in &self.settled {
			command.draw(&self.ink, self.line_width, surface);
		}

		let mut all_done = true;
		for command in &mut self.active {
			command.advance(delta_ms);
			command.draw(&self.ink, self.line_width, surface);
			all_done &= command.is_complete();
		}

		if all_done {
			self.settled.append(&mut self.active);
		}
		all_done
	}

	pub fn is_settled(&self) -> bool {
		self.active.is_empty()
	}

	#[cfg(test)]
	pub fn active(&self) -> &[AnimationCommand] {
		&self.active
	}

	#[cfg(test)]
	pub fn settled(&self) -> &[AnimationCommand] {
		&self.settled
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::surface::recording::{Op, RecordingSurface};

	fn line(duration_ms: f64) -> AnimationCommand {
		AnimationCommand::new(
			AnimationPayload::Line {
				start: Vec2::ZERO,
				end: Vec2::new(0.0, 100.0),
			},
			duration_ms,
		)
	}

	#[test]
	fn settles_after_longest_duration() {
		let surface = RecordingSurface::default();
		let mut scheduler = AnimationScheduler::new("#000", 2.0);
		scheduler
			.begin(vec![line(100.0), line(200.0), line(300.0)])
			.unwrap();

		for _ in 0..5 {
			assert!(!scheduler.tick(50.0, &surface));
			assert_eq!(scheduler.active().len(), 3);
		}
		assert!(scheduler.tick(50.0, &surface));
		assert!(scheduler.is_settled());
		assert_eq!(scheduler.settled().len(), 3);
	}

	#[test]
	fn completion_is_clamped_and_monotone() {
		let mut command = line(100.0);
		command.advance(30.0);
		assert!((command.completion() - 0.3).abs() < 1e-12);
		command.advance(-10.0);
		assert!((command.completion() - 0.3).abs() < 1e-12);
		command.advance(500.0);
		assert_eq!(command.completion(), 1.0);
	}

	#[test]
	fn zero_duration_completes_immediately() {
		let surface = RecordingSurface::default();
		let mut scheduler = AnimationScheduler::new("#000", 2.0);
		scheduler.begin(vec![line(0.0)]).unwrap();
		assert!(scheduler.tick(0.0, &surface));
	}

	#[test]
	fn empty_scheduler_is_settled() {
		let surface = RecordingSurface::default();
		let mut scheduler = AnimationScheduler::default();
		assert!(scheduler.tick(16.0, &surface));
		assert!(surface.take().is_empty());
	}

	#[test]
	fn refuses_to_replace_batch_in_flight() {
		let surface = RecordingSurface::default();
		let mut scheduler = AnimationScheduler::new("#000", 2.0);
		scheduler.begin(vec![line(100.0)]).unwrap();
		scheduler.tick(10.0, &surface);
		let err = scheduler.begin(vec![line(100.0)]).unwrap_err();
		assert!(matches!(err, VisualizerError::BatchInFlight { in_flight: 1 }));
		assert_eq!(scheduler.active().len(), 1);

		scheduler.tick(90.0, &surface);
		assert!(scheduler.begin(vec![line(100.0)]).is_ok());
	}

	#[test]
	fn draws_settled_before_active() {
		let surface = RecordingSurface::default();
		let mut scheduler = AnimationScheduler::new("#000", 2.0);
		scheduler.begin(vec![line(10.0)]).unwrap();
		scheduler.tick(10.0, &surface);
		scheduler
			.begin(vec![AnimationCommand::new(
				AnimationPayload::Text {
					label: "a".into(),
					glyph: GlyphBox {
						x: 10.0,
						y: 40.0,
						width: 10.0,
						height: 40.0,
					},
					font: "40px Ubuntu Mono".into(),
				},
				100.0,
			)])
			.unwrap();
		surface.take();

		scheduler.tick(50.0, &surface);
		let ops = surface.take();
		let line_end = ops
			.iter()
			.position(|op| *op == Op::LineTo(Vec2::new(0.0, 100.0)))
			.unwrap();
		let text = ops
			.iter()
			.position(|op| *op == Op::FillText("a".into(), Vec2::new(10.0, 40.0)))
			.unwrap();
		assert!(line_end < text);
		assert!(ops.contains(&Op::GlobalAlpha(0.5)));
	}

	#[test]
	fn line_grows_with_completion() {
		let surface = RecordingSurface::default();
		let mut scheduler = AnimationScheduler::new("#000", 2.0);
		scheduler.begin(vec![line(100.0)]).unwrap();
		scheduler.tick(25.0, &surface);
		assert!(surface.take().contains(&Op::LineTo(Vec2::new(0.0, 25.0))));
	}
}
