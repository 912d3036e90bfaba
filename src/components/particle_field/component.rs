//! Leptos component wrapping the particle field canvas.
//!
//! The component creates a full-viewport canvas element and drives the
//! simulation from a `requestAnimationFrame` loop. Pointer, scroll, and
//! resize listeners are attached at the window level (the canvas itself is a
//! non-interactive layer behind page content) and write into shared state the
//! next frame reads. On unmount the pending frame is cancelled and every
//! listener removed.

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::FieldConfig;
use super::render;
use super::state::FieldState;
use super::theme::Section;

/// Page scroll fraction in [0, 1].
fn scroll_fraction(window: &Window) -> f64 {
	let scroll_top = window.scroll_y().unwrap_or(0.0);
	let view_height = window
		.inner_height()
		.ok()
		.and_then(|v| v.as_f64())
		.unwrap_or(0.0);
	let doc_height = window
		.document()
		.and_then(|d| d.document_element())
		.map(|e| e.scroll_height() as f64)
		.unwrap_or(0.0);

	let scrollable = doc_height - view_height;
	if scrollable > 0.0 {
		(scroll_top / scrollable).clamp(0.0, 1.0)
	} else {
		0.0
	}
}

fn viewport_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

/// Renders the animated particle background on a canvas element.
///
/// The active page section arrives via the reactive `section` signal; a
/// section change re-samples particle colors from the new palette without
/// rebuilding the field. By default the canvas fills the viewport as a fixed,
/// non-interactive layer and resizes with the window; explicit
/// `width`/`height` override that for embedded use.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(into)] section: Signal<Section>,
	#[prop(optional)] config: FieldConfig,
	#[prop(default = true)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	// JS closures and the field live in local stored values so the cleanup
	// callback (which must be Send) only captures Copy handles.
	let field = StoredValue::new_local(None::<FieldState>);
	let animate = StoredValue::new_local(None::<Closure<dyn FnMut()>>);
	let frame_id = StoredValue::new_local(None::<i32>);
	let resize_cb = StoredValue::new_local(None::<Closure<dyn FnMut()>>);
	let mousemove_cb = StoredValue::new_local(None::<Closure<dyn FnMut(MouseEvent)>>);
	let mouseleave_cb = StoredValue::new_local(None::<Closure<dyn FnMut(MouseEvent)>>);
	let scroll_cb = StoredValue::new_local(None::<Closure<dyn FnMut()>>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			viewport_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		// Cosmetic layer: if the 2d context is unavailable, render nothing.
		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					warn!("particle-field: 2d context has unexpected type, background disabled");
					return;
				}
			},
			_ => {
				warn!("particle-field: 2d context unavailable, background disabled");
				return;
			}
		};

		let seed = js_sys::Date::now() as u64;
		field.set_value(Some(FieldState::new(
			config.clone(),
			section.get_untracked(),
			w,
			h,
			seed,
		)));

		if fullscreen {
			let canvas_resize = canvas.clone();
			resize_cb.set_value(Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = viewport_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				field.update_value(|f| {
					if let Some(f) = f {
						f.resize(nw, nh);
					}
				});
			})));
			resize_cb.with_value(|cb| {
				if let Some(cb) = cb {
					let _ = window
						.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
			});
		}

		let canvas_mm = canvas.clone();
		mousemove_cb.set_value(Some(Closure::new(move |ev: MouseEvent| {
			let rect = canvas_mm.get_bounding_client_rect();
			let (x, y) = (
				ev.client_x() as f64 - rect.left(),
				ev.client_y() as f64 - rect.top(),
			);
			field.update_value(|f| {
				if let Some(f) = f {
					f.pointer_moved(x, y);
				}
			});
		})));
		mousemove_cb.with_value(|cb| {
			if let Some(cb) = cb {
				let _ = window
					.add_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
			}
		});

		mouseleave_cb.set_value(Some(Closure::new(move |_: MouseEvent| {
			field.update_value(|f| {
				if let Some(f) = f {
					f.pointer_left();
				}
			});
		})));
		mouseleave_cb.with_value(|cb| {
			if let Some(cb) = cb {
				let _ = window
					.add_event_listener_with_callback("mouseleave", cb.as_ref().unchecked_ref());
			}
		});

		scroll_cb.set_value(Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let progress = scroll_fraction(&win);
			field.update_value(|f| {
				if let Some(f) = f {
					f.set_scroll_progress(progress);
				}
			});
		})));
		scroll_cb.with_value(|cb| {
			if let Some(cb) = cb {
				let _ =
					window.add_event_listener_with_callback("scroll", cb.as_ref().unchecked_ref());
			}
		});

		animate.set_value(Some(Closure::new(move || {
			field.update_value(|f| {
				if let Some(f) = f {
					let dt = 0.016;
					f.tick(dt);
					render::render(f, &ctx);
				}
			});
			animate.with_value(|cb| {
				let (Some(cb), Some(win)) = (cb, web_sys::window()) else {
					return;
				};
				if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
					frame_id.set_value(Some(id));
				}
			});
		})));
		animate.with_value(|cb| {
			if let Some(cb) = cb {
				if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
					frame_id.set_value(Some(id));
				}
			}
		});
	});

	// Section changes re-tint in place; the field itself survives.
	Effect::new(move |_| {
		let section = section.get();
		field.update_value(|f| {
			if let Some(f) = f {
				f.set_section(section);
			}
		});
	});

	on_cleanup(move || {
		if let Some(id) = frame_id.try_update_value(|id| id.take()).flatten() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
		resize_cb.try_update_value(|slot| {
			let (Some(cb), Some(window)) = (slot.take(), web_sys::window()) else {
				return;
			};
			let _ =
				window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		});
		mousemove_cb.try_update_value(|slot| {
			let (Some(cb), Some(window)) = (slot.take(), web_sys::window()) else {
				return;
			};
			let _ = window
				.remove_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
		});
		mouseleave_cb.try_update_value(|slot| {
			let (Some(cb), Some(window)) = (slot.take(), web_sys::window()) else {
				return;
			};
			let _ = window
				.remove_event_listener_with_callback("mouseleave", cb.as_ref().unchecked_ref());
		});
		scroll_cb.try_update_value(|slot| {
			let (Some(cb), Some(window)) = (slot.take(), web_sys::window()) else {
				return;
			};
			let _ =
				window.remove_event_listener_with_callback("scroll", cb.as_ref().unchecked_ref());
		});
		animate.try_update_value(|cb| {
			cb.take();
		});
	});

	let style = if fullscreen {
		"display: block; position: fixed; inset: 0; z-index: -1; pointer-events: none;"
	} else {
		"display: block; pointer-events: none;"
	};

	view! { <canvas node_ref=canvas_ref class="particle-field-canvas" style=style /> }
}
