//! Tunable parameters for the particle field.
//!
//! [`FieldConfig`] centralizes every constant the simulation and renderer
//! read, so the behavior of the field can be tuned in one place. The host
//! page can override a subset at mount time through [`FieldOptions`], a JSON
//! document read from the DOM (see `load_field_options` in the crate root).

use log::warn;
use serde::Deserialize;

/// Whether pointer proximity pulls particles in or pushes them away.
///
/// Fixed per deployment; this is a config value, not a runtime toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerMode {
	/// Particles drift toward the pointer.
	Attract,
	/// Particles are pushed away from the pointer.
	Repel,
}

/// Particle population and per-particle attribute ranges.
#[derive(Clone, Debug)]
pub struct ParticleConfig {
	/// Number of particles, fixed for the lifetime of the mount.
	pub count: usize,
	pub size_min: f64,
	pub size_max: f64,
	/// Movement speed range, in pixels per frame.
	pub speed_min: f64,
	pub speed_max: f64,
	pub opacity_min: f64,
	pub opacity_max: f64,
	/// Amplitude of the sinusoidal radius pulse, in pixels.
	pub pulse_amplitude: f64,
}

/// Pointer interaction tuning.
#[derive(Clone, Debug)]
pub struct PointerConfig {
	pub mode: PointerMode,
	/// Interaction radius in pixels; no force applies at or beyond it.
	pub radius: f64,
	/// Peak displacement per frame at zero distance, in pixels.
	pub strength: f64,
	/// Seconds a pointer-trail point stays visible.
	pub trail_life: f64,
}

/// Inter-particle connection line tuning.
#[derive(Clone, Debug)]
pub struct ConnectionConfig {
	/// Pair distance below which a line is drawn.
	pub radius: f64,
	/// Line opacity as pair distance approaches zero.
	pub max_alpha: f64,
	pub line_width: f64,
}

/// Particle position-history trail tuning.
#[derive(Clone, Debug)]
pub struct TrailConfig {
	pub enabled: bool,
	/// Maximum retained positions; the oldest entry is evicted past this.
	pub cap: usize,
}

/// Lightning bolt generation tuning.
#[derive(Clone, Debug)]
pub struct LightningConfig {
	pub enabled: bool,
	/// Seconds between spawn rolls.
	pub interval: f64,
	/// Probability that a spawn roll produces a bolt.
	pub chance: f64,
	/// Seconds a bolt takes to fade out.
	pub life: f64,
}

/// Complete field configuration.
#[derive(Clone, Debug)]
pub struct FieldConfig {
	pub particle: ParticleConfig,
	pub pointer: PointerConfig,
	pub connection: ConnectionConfig,
	pub trail: TrailConfig,
	pub lightning: LightningConfig,
	/// Background repaint alpha. 1.0 clears fully each frame; lower values
	/// leave a trailing smear of previous frames.
	pub background_fade: f64,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			particle: ParticleConfig {
				count: 25,
				size_min: 1.0,
				size_max: 5.0,
				speed_min: 0.1,
				speed_max: 0.4,
				opacity_min: 0.2,
				opacity_max: 1.0,
				pulse_amplitude: 0.5,
			},
			pointer: PointerConfig {
				mode: PointerMode::Repel,
				radius: 100.0,
				strength: 0.5,
				trail_life: 0.5,
			},
			connection: ConnectionConfig {
				radius: 150.0,
				max_alpha: 0.4,
				line_width: 1.0,
			},
			trail: TrailConfig {
				enabled: true,
				cap: 8,
			},
			lightning: LightningConfig {
				enabled: true,
				interval: 2.0,
				chance: 0.1,
				life: 0.15,
			},
			background_fade: 1.0,
		}
	}
}

/// Host-page overrides for [`FieldConfig`], deserialized from the optional
/// `<script id="field-config" type="application/json">` element. Every field
/// is optional; absent fields keep their defaults.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FieldOptions {
	pub particles: Option<usize>,
	/// `"attract"` or `"repel"`.
	pub pointer_mode: Option<String>,
	pub pointer_radius: Option<f64>,
	pub pointer_strength: Option<f64>,
	pub connection_radius: Option<f64>,
	pub trail: Option<bool>,
	pub trail_cap: Option<usize>,
	pub lightning: Option<bool>,
	pub background_fade: Option<f64>,
}

impl FieldOptions {
	/// Overlay these options onto the default configuration.
	pub fn into_config(self) -> FieldConfig {
		let mut config = FieldConfig::default();
		if let Some(count) = self.particles {
			config.particle.count = count;
		}
		if let Some(mode) = self.pointer_mode {
			match mode.as_str() {
				"attract" => config.pointer.mode = PointerMode::Attract,
				"repel" => config.pointer.mode = PointerMode::Repel,
				other => warn!("particle-field: unknown pointer_mode {other:?}, keeping default"),
			}
		}
		if let Some(radius) = self.pointer_radius {
			config.pointer.radius = radius;
		}
		if let Some(strength) = self.pointer_strength {
			config.pointer.strength = strength;
		}
		if let Some(radius) = self.connection_radius {
			config.connection.radius = radius;
		}
		if let Some(enabled) = self.trail {
			config.trail.enabled = enabled;
		}
		if let Some(cap) = self.trail_cap {
			config.trail.cap = cap;
		}
		if let Some(enabled) = self.lightning {
			config.lightning.enabled = enabled;
		}
		if let Some(fade) = self.background_fade {
			config.background_fade = fade.clamp(0.0, 1.0);
		}
		config
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_options_keep_defaults() {
		let config = FieldOptions::default().into_config();
		let defaults = FieldConfig::default();
		assert_eq!(config.particle.count, defaults.particle.count);
		assert_eq!(config.pointer.mode, defaults.pointer.mode);
		assert_eq!(config.trail.cap, defaults.trail.cap);
	}

	#[test]
	fn options_overlay_onto_defaults() {
		let options = FieldOptions {
			particles: Some(40),
			pointer_mode: Some("attract".into()),
			pointer_radius: Some(150.0),
			background_fade: Some(0.2),
			..FieldOptions::default()
		};
		let config = options.into_config();
		assert_eq!(config.particle.count, 40);
		assert_eq!(config.pointer.mode, PointerMode::Attract);
		assert_eq!(config.pointer.radius, 150.0);
		assert_eq!(config.background_fade, 0.2);
		// Untouched fields keep defaults.
		assert_eq!(config.connection.radius, 150.0);
	}

	#[test]
	fn unknown_pointer_mode_is_ignored() {
		let options = FieldOptions {
			pointer_mode: Some("orbit".into()),
			..FieldOptions::default()
		};
		assert_eq!(options.into_config().pointer.mode, PointerMode::Repel);
	}

	#[test]
	fn background_fade_is_clamped() {
		let options = FieldOptions {
			background_fade: Some(3.0),
			..FieldOptions::default()
		};
		assert_eq!(options.into_config().background_fade, 1.0);
	}

	#[test]
	fn options_parse_from_json() {
		let json = r#"{ "particles": 12, "pointer_mode": "attract", "lightning": false }"#;
		let options: FieldOptions = serde_json::from_str(json).unwrap();
		let config = options.into_config();
		assert_eq!(config.particle.count, 12);
		assert_eq!(config.pointer.mode, PointerMode::Attract);
		assert!(!config.lightning.enabled);
	}
}
