//! Modal confirm and alert dialogs.

/// Blocking user dialogs: confirmation before destructive actions, and
/// validation messages.
pub trait Prompt {
	/// Ask a yes/no question; `true` means go ahead.
	fn confirm(&self, message: &str) -> bool;
	/// Show a message the user has to dismiss.
	fn alert(&self, message: &str);
}

/// `window.confirm` / `window.alert`. A missing window declines.
pub struct BrowserPrompt;

impl Prompt for BrowserPrompt {
	fn confirm(&self, message: &str) -> bool {
		web_sys::window()
			.and_then(|w| w.confirm_with_message(message).ok())
			.unwrap_or(false)
	}

	fn alert(&self, message: &str) {
		if let Some(w) = web_sys::window() {
			let _ = w.alert_with_message(message);
		}
	}
}
