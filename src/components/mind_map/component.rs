//! Leptos host for the editor: canvas, toolbar, hint banner and dialog.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use super::config::MindMapConfig;
use super::controller::{Effect, MindMap};
use super::editor::{EditorFields, node_editor};
use super::input::InputEvent;
use super::persistence::{LocalStorage, Persistence};
use super::prompt::BrowserPrompt;
use super::render;
use super::types::{Category, ConnectionStyle, Point};

/// Handle shared by every DOM callback. Each callback borrows the editor,
/// runs one operation to completion and mirrors the result into signals.
#[derive(Clone)]
struct Ui {
	map: Rc<RefCell<Option<MindMap>>>,
	dirty: Rc<Cell<bool>>,
	hint: RwSignal<Option<&'static str>>,
	connecting: RwSignal<bool>,
	editor: EditorFields,
}

impl Ui {
	fn run(&self, f: impl FnOnce(&mut MindMap) -> Vec<Effect>) {
		let effects = self.map.borrow_mut().as_mut().map(f).unwrap_or_default();
		if let Some(map) = self.map.borrow().as_ref() {
			self.hint.set(map.hint());
			self.connecting.set(map.connection_mode());
		}
		for effect in effects {
			match effect {
				Effect::Redraw => self.dirty.set(true),
				Effect::ShowEditor(draft) => self.editor.show(draft),
				Effect::HideEditor => self.editor.hide(),
				Effect::OpenLink(url) => {
					let opened = web_sys::window()
						.map(|w| w.open_with_url_and_target(&url, "_blank"));
					if !matches!(opened, Some(Ok(_))) {
						warn!("could not open {url}");
					}
				}
			}
		}
	}
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Interactive mind-map canvas with its toolbar. The graph is restored from
/// and saved to browser local storage.
#[component]
pub fn MindMapCanvas(
	/// Storage key and zoom tunables.
	#[prop(optional)]
	config: MindMapConfig,
	/// Fill the window and follow its resizes.
	#[prop(default = false)]
	fullscreen: bool,
	/// Canvas width; defaults to the parent's width.
	#[prop(default = None)]
	width: Option<f64>,
	/// Canvas height; defaults to the parent's height.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let ui = Ui {
		map: Rc::new(RefCell::new(None)),
		dirty: Rc::new(Cell::new(true)),
		hint: RwSignal::new(None),
		connecting: RwSignal::new(false),
		editor: EditorFields::new(),
	};
	let dotted = RwSignal::new(false);
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let keydown_cb: Rc<RefCell<Option<Closure<dyn FnMut(KeyboardEvent)>>>> =
		Rc::new(RefCell::new(None));
	let (ui_init, animate_init, resize_cb_init, keydown_cb_init) = (
		ui.clone(),
		animate.clone(),
		resize_cb.clone(),
		keydown_cb.clone(),
	);

	// `Effect` in this module is the editor's; this is the reactive one.
	leptos::prelude::Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
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

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				warn!("2d canvas context unavailable");
				return;
			}
		};

		let persistence = Persistence::new(LocalStorage::new(config.storage_key.clone()));
		*ui_init.map.borrow_mut() =
			Some(MindMap::new(persistence, BrowserPrompt, config.clone(), w, h));
		ui_init.run(|_| vec![Effect::Redraw]);

		if fullscreen {
			let (ui_resize, canvas_resize) = (ui_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				ui_resize.run(|m| {
					m.resize(nw, nh);
					vec![Effect::Redraw]
				});
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let ui_key = ui_init.clone();
		*keydown_cb_init.borrow_mut() = Some(Closure::new(move |ev: KeyboardEvent| {
			ui_key.run(|m| m.handle(InputEvent::key(ev.key())));
		}));
		if let Some(ref cb) = *keydown_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
		}

		let (ui_anim, animate_inner) = (ui_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if ui_anim.dirty.replace(false) {
				if let Some(ref m) = *ui_anim.map.borrow() {
					render::render(m, &ctx);
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(w) = web_sys::window() {
					let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let ui_md = ui.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some(point) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		ui_md.run(|m| {
			let target = render::hit_test(m.store(), m.viewport(), point);
			m.handle(InputEvent::PointerDown { point, target })
		});
	};

	let ui_mm = ui.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(point) = canvas_point(canvas_ref, &ev) {
			ui_mm.run(|m| m.handle(InputEvent::PointerMove { point }));
		}
	};

	let ui_mu = ui.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let point = canvas_point(canvas_ref, &ev).unwrap_or_default();
		ui_mu.run(|m| m.handle(InputEvent::PointerUp { point }));
	};

	let ui_ml = ui.clone();
	let on_mouseleave = move |_: MouseEvent| {
		ui_ml.run(|m| m.handle(InputEvent::PointerLeave));
	};

	let ui_wh = ui.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(point) = canvas_point(canvas_ref, &ev) {
			let delta_y = ev.delta_y();
			ui_wh.run(|m| m.handle(InputEvent::Wheel { delta_y, point }));
		}
	};

	let (ui_primer, ui_deep, ui_toggle, ui_style) = (ui.clone(), ui.clone(), ui.clone(), ui.clone());
	let (ui_zin, ui_zout, ui_reset, ui_clear) = (ui.clone(), ui.clone(), ui.clone(), ui.clone());
	let (ui_save, ui_cancel) = (ui.clone(), ui.clone());
	let (hint, connecting) = (ui.hint, ui.connecting);

	let editor = node_editor(
		ui.editor,
		move |fields| {
			ui_save.run(|m| match m.submit(fields) {
				Ok(_) => vec![Effect::HideEditor, Effect::Redraw],
				Err(_) => vec![],
			})
		},
		move || {
			ui_cancel.run(|m| {
				m.close_editor();
				vec![Effect::HideEditor]
			})
		},
	);

	view! {
		<div class="mind-map">
			<div class="toolbar">
				<button on:click=move |_| {
					ui_primer.run(|m| vec![Effect::ShowEditor(m.open_create(Category::Primer))])
				}>"Add Primer"</button>
				<button on:click=move |_| {
					ui_deep.run(|m| vec![Effect::ShowEditor(m.open_create(Category::DeepDive))])
				}>"Add Deep Dive"</button>
				<button
					class:active=move || connecting.get()
					on:click=move |_| {
						ui_toggle.run(|m| {
							m.toggle_connection_mode();
							vec![Effect::Redraw]
						})
					}
				>
					{move || if connecting.get() { "Exit Connection" } else { "Connection Mode" }}
				</button>
				<label class="line-type-toggle" class:hidden=move || !connecting.get()>
					<input
						type="checkbox"
						prop:checked=move || dotted.get()
						on:change=move |ev| {
							let checked = event_target_checked(&ev);
							dotted.set(checked);
							let style = if checked {
								ConnectionStyle::Dotted
							} else {
								ConnectionStyle::Solid
							};
							ui_style.run(|m| {
								m.set_line_style(style);
								vec![]
							});
						}
					/>
					<span class="toggle-text">{move || if dotted.get() { "Dotted" } else { "Solid" }}</span>
				</label>
				<button on:click=move |_| {
					ui_zin.run(|m| {
						m.zoom_in();
						vec![Effect::Redraw]
					})
				}>"+"</button>
				<button on:click=move |_| {
					ui_zout.run(|m| {
						m.zoom_out();
						vec![Effect::Redraw]
					})
				}>"−"</button>
				<button on:click=move |_| {
					ui_reset.run(|m| {
						m.reset_view();
						vec![Effect::Redraw]
					})
				}>"Reset View"</button>
				<button on:click=move |_| {
					ui_clear.run(|m| {
						m.request_clear();
						vec![Effect::Redraw]
					})
				}>"Clear"</button>
			</div>
			<canvas
				node_ref=canvas_ref
				class="mind-map-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				on:contextmenu=|ev: MouseEvent| ev.prevent_default()
				style=move || {
					format!(
						"display: block; cursor: {};",
						if connecting.get() { "crosshair" } else { "grab" },
					)
				}
			/>
			<div class="connection-instructions" class:hidden=move || hint.get().is_none()>
				{move || hint.get().unwrap_or_default()}
			</div>
			{editor}
		</div>
	}
}
