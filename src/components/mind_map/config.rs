//! Per-instance settings for the canvas component.

use super::persistence::DEFAULT_STORAGE_KEY;

/// Tunables for one editor instance.
#[derive(Clone, Debug, PartialEq)]
pub struct MindMapConfig {
	/// Local storage key holding the snapshot.
	pub storage_key: String,
	/// Factor applied by the zoom-in button.
	pub zoom_in_factor: f64,
	/// Factor applied by the zoom-out button.
	pub zoom_out_factor: f64,
	/// Per-tick wheel zoom is `exp(±wheel_intensity)`.
	pub wheel_intensity: f64,
}

impl Default for MindMapConfig {
	fn default() -> Self {
		Self {
			storage_key: DEFAULT_STORAGE_KEY.to_string(),
			zoom_in_factor: 1.2,
			zoom_out_factor: 0.8,
			wheel_intensity: 0.02,
		}
	}
}
