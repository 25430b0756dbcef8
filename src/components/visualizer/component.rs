use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::session::{Session, SessionSource};
use crate::config::VisualizerConfig;
use crate::geometry::Vec2;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn set_size(canvas: &HtmlCanvasElement, size: Vec2) {
	canvas.set_width(size.x as u32);
	canvas.set_height(size.y as u32);
}

fn request_frame(window: &Window, cb: &Closure<dyn FnMut(f64)>) {
	if let Err(err) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
		error!("requestAnimationFrame failed: {:?}", err);
	}
}

/// Animated parse tree next to the automaton that produced it.
///
/// Both canvases are `width` x `height`. Every change of `source` swaps in a
/// brand-new session; the frame loop is started once and keeps drawing
/// whichever session is current.
#[component]
pub fn ParseVisualizer(
	#[prop(into)] source: Signal<SessionSource>,
	#[prop(default = 800.0)] width: f64,
	#[prop(default = 600.0)] height: f64,
	#[prop(optional)] config: Option<VisualizerConfig>,
) -> impl IntoView {
	let tree_ref = NodeRef::<leptos::html::Canvas>::new();
	let states_ref = NodeRef::<leptos::html::Canvas>::new();
	let session: Rc<RefCell<Option<Session>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let fault = RwSignal::new(None::<String>);
	let config = config.unwrap_or_default();

	Effect::new(move |_| {
		let source = source.get();
		let (Some(tree), Some(states)) = (tree_ref.get(), states_ref.get()) else {
			return;
		};
		let (tree, states): (HtmlCanvasElement, HtmlCanvasElement) = (tree.into(), states.into());
		let Some(window) = web_sys::window() else {
			return;
		};

		let size = Vec2::new(width, height);
		set_size(&tree, size);
		set_size(&states, size);

		let next = match Session::new(&source, config.clone(), size, random_seed()) {
			Ok(next) => {
				fault.set(None);
				Some(next)
			}
			Err(err) => {
				error!("cannot start session: {}", err);
				fault.set(Some(err.to_string()));
				None
			}
		};
		*session.borrow_mut() = next;

		if animate.borrow().is_some() {
			return;
		}
		let (Some(tree_ctx), Some(states_ctx)) = (context_2d(&tree), context_2d(&states)) else {
			error!("2d canvas context unavailable");
			return;
		};
		info!("starting frame loop");
		let (session_anim, animate_inner) = (session.clone(), animate.clone());
		*animate.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			if let Some(ref mut s) = *session_anim.borrow_mut() {
				s.frame(timestamp, &tree_ctx, &states_ctx);
				if let Some(err) = s.fault() {
					if fault.with_untracked(Option::is_none) {
						fault.set(Some(err.to_string()));
					}
				}
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				request_frame(&win, cb);
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			request_frame(&window, cb);
		}
	});

	view! {
		<div class="parse-visualizer" style="display: flex;">
			<canvas node_ref=tree_ref class="parse-tree-canvas" style="display: block;" />
			<canvas node_ref=states_ref class="automaton-canvas" style="display: block;" />
		</div>
		{move || fault.get().map(|msg| view! { <p class="trace-fault">{msg}</p> })}
	}
}

fn random_seed() -> u64 {
	(js_sys::Math::random() * u64::MAX as f64) as u64
}
