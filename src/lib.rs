//! particle-field: animated particle background for a personal portfolio site.
//!
//! This crate provides a WASM-based canvas component that renders a moving,
//! glowing, interconnected particle field behind page content, with colors
//! keyed to the active page section and pointer-reactive motion.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Element, HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{FieldConfig, FieldOptions, ParticleFieldCanvas, Section};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load field options from a script element with id="field-config".
/// Expected format: JSON with any subset of [`FieldOptions`] fields.
fn load_field_options() -> Option<FieldOptions> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<FieldOptions>(&json_text) {
		Ok(options) => {
			info!("particle-field: loaded host config overrides");
			Some(options)
		}
		Err(e) => {
			warn!("particle-field: failed to parse field config: {}", e);
			None
		}
	}
}

/// Pick the active section by scanning `section[data-scroll-section]`
/// elements for the one overlapping the upper viewport band.
fn active_section(window: &Window) -> Option<Section> {
	let document = window.document()?;
	let sections = document
		.query_selector_all("section[data-scroll-section]")
		.ok()?;
	let probe = window.inner_height().ok()?.as_f64()? * 0.3;

	let mut current = None;
	for i in 0..sections.length() {
		let Some(node) = sections.item(i) else {
			continue;
		};
		let Ok(element) = node.dyn_into::<Element>() else {
			continue;
		};
		let rect = element.get_bounding_client_rect();
		if rect.top() <= probe && rect.bottom() > probe {
			current = Section::from_id(&element.id());
		}
	}
	current
}

/// Wire a window scroll listener that feeds the active section into the
/// given setter. Lives for the page lifetime; never removed.
fn observe_sections(set_section: WriteSignal<Section>) {
	let Some(window) = web_sys::window() else {
		return;
	};

	let closure: Closure<dyn FnMut()> = Closure::new(move || {
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Some(section) = active_section(&window) {
			set_section.set(section);
		}
	});
	let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
	closure.forget();
}

/// Main application component.
/// Mounts the particle field behind whatever page content the host provides
/// and keeps its palette in sync with the section being scrolled.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_options().unwrap_or_default().into_config();
	let (section, set_section) = signal(Section::Home);
	observe_sections(set_section);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleFieldCanvas section=section config=config />
	}
}
