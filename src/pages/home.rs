use leptos::ev::MouseEvent;
use leptos::prelude::*;
use log::warn;

use crate::components::visualizer::{ParseVisualizer, SessionSource};

/// Parse of "aboba" by the sample grammar.
const SAMPLE_TRACE: &str = r#"{
  "string": "aboba",
  "actions": [
    { "type": "shift" },
    { "type": "shift" },
    { "type": "shift" },
    { "type": "reduce", "to": { "symbol": "<B>", "size": 2 } },
    { "type": "shift" },
    { "type": "shift" },
    { "type": "reduce", "to": { "symbol": "<A>", "size": 4 } },
    { "type": "finish", "result": 1 }
  ]
}"#;

/// Transitions of the sample automaton, one list per state.
const SAMPLE_AUTOMATON: &str =
	"[[1, 2], [1, 3, 4], [5, 6], [], [6, 7], [], [1, 8, 9], [], [], [6, 10], []]";

/// Parses the two text areas, reporting failures through `input_error`.
fn parse_inputs(trace: &str, automaton: &str, input_error: RwSignal<Option<String>>) -> Option<SessionSource> {
	match SessionSource::from_json(trace, automaton) {
		Ok(source) => {
			input_error.set(None);
			Some(source)
		}
		Err(err) => {
			warn!("rejected input: {}", err);
			input_error.set(Some(err.to_string()));
			None
		}
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let trace_text = RwSignal::new(SAMPLE_TRACE.to_string());
	let automaton_text = RwSignal::new(SAMPLE_AUTOMATON.to_string());
	let input_error = RwSignal::new(None::<String>);
	let source = RwSignal::new(
		parse_inputs(SAMPLE_TRACE, SAMPLE_AUTOMATON, input_error).unwrap_or_default(),
	);

	// Invalid input leaves the running session alone.
	let on_redraw = move |_: MouseEvent| {
		if let Some(next) = parse_inputs(
			&trace_text.get_untracked(),
			&automaton_text.get_untracked(),
			input_error,
		) {
			source.set(next);
		}
	};

	view! {
		<div class="visualizer-page">
			<h1>"Shift-Reduce Parse"</h1>
			<ParseVisualizer source=source />
			<div class="trace-inputs">
				<label>
					"Trace"
					<textarea
						rows="14"
						cols="60"
						prop:value=move || trace_text.get()
						on:input=move |ev| trace_text.set(event_target_value(&ev))
					/>
				</label>
				<label>
					"Automaton"
					<textarea
						rows="3"
						cols="60"
						prop:value=move || automaton_text.get()
						on:input=move |ev| automaton_text.set(event_target_value(&ev))
					/>
				</label>
				<button on:click=on_redraw>"Redraw"</button>
				{move || input_error.get().map(|msg| view! { <p class="input-error">{msg}</p> })}
			</div>
		</div>
	}
}
