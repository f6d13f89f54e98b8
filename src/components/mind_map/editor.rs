//! Node editor dialog.

use leptos::prelude::*;

use super::controller::EditorDraft;
use super::types::NodeFields;

/// Reactive state behind the node dialog. `heading` is `None` while closed.
#[derive(Clone, Copy)]
pub struct EditorFields {
	pub heading: RwSignal<Option<String>>,
	pub title: RwSignal<String>,
	pub description: RwSignal<String>,
	pub author: RwSignal<String>,
	pub link: RwSignal<String>,
}

impl EditorFields {
	pub fn new() -> Self {
		Self {
			heading: RwSignal::new(None),
			title: RwSignal::new(String::new()),
			description: RwSignal::new(String::new()),
			author: RwSignal::new(String::new()),
			link: RwSignal::new(String::new()),
		}
	}

	pub fn show(&self, draft: EditorDraft) {
		let EditorDraft { heading, fields } = draft;
		self.title.set(fields.title);
		self.description.set(fields.description);
		self.author.set(fields.author);
		self.link.set(fields.link);
		self.heading.set(Some(heading));
	}

	pub fn hide(&self) {
		self.heading.set(None);
	}

	pub fn current(&self) -> NodeFields {
		NodeFields {
			title: self.title.get_untracked(),
			description: self.description.get_untracked(),
			author: self.author.get_untracked(),
			link: self.link.get_untracked(),
		}
	}
}

/// Modal form for a node's text fields. Validation is left to `on_save`'s receiver.
pub fn node_editor(
	fields: EditorFields,
	on_save: impl Fn(NodeFields) + 'static,
	on_cancel: impl Fn() + 'static,
) -> impl IntoView {
	view! {
		<div class="modal" class:hidden=move || fields.heading.with(Option::is_none)>
			<div class="modal-content">
				<h2>{move || fields.heading.get().unwrap_or_default()}</h2>
				<input
					type="text"
					placeholder="Title"
					prop:value=move || fields.title.get()
					on:input=move |ev| fields.title.set(event_target_value(&ev))
				/>
				<textarea
					placeholder="Description"
					prop:value=move || fields.description.get()
					on:input=move |ev| fields.description.set(event_target_value(&ev))
				></textarea>
				<input
					type="text"
					placeholder="Author (optional)"
					prop:value=move || fields.author.get()
					on:input=move |ev| fields.author.set(event_target_value(&ev))
				/>
				<input
					type="url"
					placeholder="Link to slides or document (optional)"
					prop:value=move || fields.link.get()
					on:input=move |ev| fields.link.set(event_target_value(&ev))
				/>
				<div class="modal-buttons">
					<button class="primary" on:click=move |_| on_save(fields.current())>
						"Save"
					</button>
					<button on:click=move |_| on_cancel()>"Cancel"</button>
				</div>
			</div>
		</div>
	}
}
