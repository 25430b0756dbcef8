use serde::Deserialize;

use crate::error::VisualizerError;
use crate::geometry::GlyphBox;

/// Target of a reduction: the nonterminal and how many stack entries it consumes.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Reduction {
	pub symbol: String,
	pub size: usize,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
	Shift,
	Reduce {
		to: Reduction,
	},
	Finish {
		/// Accept/reject flag reported by the parser; informational only.
		#[serde(default)]
		result: Option<i64>,
	},
}

#[cfg(test)]
impl Action {
	pub fn reduce(symbol: &str, size: usize) -> Self {
		Self::Reduce {
			to: Reduction {
				symbol: symbol.into(),
				size,
			},
		}
	}

	pub fn finish() -> Self {
		Self::Finish { result: None }
	}
}

/// Input string and the actions a shift-reduce parser took on it.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Trace {
	pub string: String,
	pub actions: Vec<Action>,
}

impl Trace {
	pub fn from_json(json: &str) -> Result<Self, VisualizerError> {
		Ok(serde_json::from_str(json)?)
	}
}

/// Pull-based cursor over a trace's actions.
#[derive(Clone, Debug, Default)]
pub struct ActionCursor {
	actions: Vec<Action>,
	next: usize,
}

impl ActionCursor {
	pub fn new(actions: Vec<Action>) -> Self {
		Self { actions, next: 0 }
	}

	pub fn has_next(&self) -> bool {
		self.next < self.actions.len()
	}

	pub fn next_action(&mut self) -> Option<&Action> {
		if !self.has_next() {
			return None;
		}
		self.next += 1;
		Some(&self.actions[self.next - 1])
	}

	/// Number of actions pulled so far.
	pub fn position(&self) -> usize {
		self.next
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParseTreeNode {
	pub label: String,
	pub glyph: GlyphBox,
	pub children: Vec<ParseTreeNode>,
}
