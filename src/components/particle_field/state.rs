//! Per-frame state for the particle field.
//!
//! [`FieldState`] owns everything the animation loop mutates: the particle
//! set, pointer bookkeeping, active section, scroll progress, and live
//! lightning bolts. Event closures write into it between frames; `tick`
//! advances the simulation once per animation frame. Created when the canvas
//! mounts, dropped when it unmounts.

use super::config::FieldConfig;
use super::lightning::LightningBolt;
use super::particle::Particle;
use super::rng::Rng;
use super::theme::{Section, Theme};

/// A time-stamped recent pointer position, for the fading pointer trail.
#[derive(Clone, Debug)]
pub struct PointerTrailPoint {
	pub x: f64,
	pub y: f64,
	/// Field time at which this point was recorded.
	pub born: f64,
}

/// Last-known pointer position plus its bounded recent history.
///
/// Written by the mousemove closure, read by the frame callback on its next
/// invocation. Single-threaded host, so last-write-wins with no locking.
#[derive(Clone, Debug, Default)]
pub struct PointerState {
	pub position: Option<(f64, f64)>,
	pub trail: Vec<PointerTrailPoint>,
}

/// Complete simulation state, mutated in place frame over frame.
pub struct FieldState {
	pub particles: Vec<Particle>,
	pub bolts: Vec<LightningBolt>,
	pub pointer: PointerState,
	pub section: Section,
	/// Page scroll fraction in [0, 1], drives scene-theme blending.
	pub scroll_progress: f64,
	pub width: f64,
	pub height: f64,
	/// Seconds since mount, accumulated from frame deltas.
	pub time: f64,
	pub config: FieldConfig,
	rng: Rng,
	bolt_timer: f64,
}

impl FieldState {
	/// Build the field: fixed particle count, randomized attributes, colors
	/// sampled from the starting section's palette.
	pub fn new(config: FieldConfig, section: Section, width: f64, height: f64, seed: u64) -> Self {
		let mut rng = Rng::new(seed);
		let theme = section.theme();
		let particles = (0..config.particle.count)
			.map(|_| Particle::spawn(&mut rng, &theme, &config, width, height))
			.collect();

		Self {
			particles,
			bolts: Vec::new(),
			pointer: PointerState::default(),
			section,
			scroll_progress: 0.0,
			width,
			height,
			time: 0.0,
			config,
			rng,
			bolt_timer: 0.0,
		}
	}

	/// Advance the simulation by one frame of `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		self.time += dt;

		let pointer = self.pointer.position;
		for particle in &mut self.particles {
			particle.step(self.width, self.height, pointer, &self.config);
		}

		let cutoff = self.time - self.config.pointer.trail_life;
		self.pointer.trail.retain(|point| point.born > cutoff);

		if self.config.lightning.enabled {
			self.bolt_timer += dt;
			while self.bolt_timer >= self.config.lightning.interval {
				self.bolt_timer -= self.config.lightning.interval;
				if self.rng.next_f64() < self.config.lightning.chance {
					self.bolts.push(LightningBolt::generate(
						&mut self.rng,
						self.width,
						self.height,
						self.config.lightning.life,
					));
				}
			}
		}
		self.bolts.retain_mut(|bolt| bolt.fade(dt));
	}

	/// Scene-level theme for this frame: the active section's palette blended
	/// toward the next section's as the page scrolls.
	pub fn theme(&self) -> Theme {
		let current = self.section.theme();
		let next = self.section.next().theme();
		let factor = (self.scroll_progress * 2.0).min(1.0);
		current.blend(&next, factor)
	}

	/// Switch the active section, re-sampling every particle's color from the
	/// new palette. A discrete jump, not a blend.
	pub fn set_section(&mut self, section: Section) {
		if self.section == section {
			return;
		}
		self.section = section;
		let theme = section.theme();
		for particle in &mut self.particles {
			particle.color = theme.pick(&mut self.rng);
		}
	}

	/// Record the page scroll fraction.
	pub fn set_scroll_progress(&mut self, progress: f64) {
		self.scroll_progress = progress.clamp(0.0, 1.0);
	}

	/// Record a pointer position from a mousemove notification.
	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		self.pointer.position = Some((x, y));
		self.pointer.trail.push(PointerTrailPoint {
			x,
			y,
			born: self.time,
		});
	}

	/// Forget the pointer after it leaves the window. Forces and the glow
	/// stop immediately; trail points age out on their own.
	pub fn pointer_left(&mut self) {
		self.pointer.position = None;
	}

	/// Adopt new surface dimensions. Particle positions are clamped into the
	/// new bounds rather than rescaled; stale trail points may sit outside
	/// the frame for the few frames it takes them to fade.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		for particle in &mut self.particles {
			particle.x = particle.x.clamp(0.0, width);
			particle.y = particle.y.clamp(0.0, height);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn test_state() -> FieldState {
		FieldState::new(FieldConfig::default(), Section::Home, 800.0, 600.0, 42)
	}

	#[test]
	fn new_spawns_configured_count_in_bounds() {
		let state = test_state();
		assert_eq!(state.particles.len(), 25);
		for p in &state.particles {
			assert!((0.0..=800.0).contains(&p.x));
			assert!((0.0..=600.0).contains(&p.y));
		}
	}

	#[test]
	fn tick_keeps_every_particle_in_bounds() {
		let mut state = test_state();
		state.pointer_moved(400.0, 300.0);
		for _ in 0..1000 {
			state.tick(0.016);
			for p in &state.particles {
				assert!((0.0..=800.0).contains(&p.x));
				assert!((0.0..=600.0).contains(&p.y));
			}
		}
	}

	#[test]
	fn set_section_retints_from_new_palette() {
		let mut state = test_state();
		state.set_section(Section::Projects);
		let palette = Section::Projects.theme().palette();
		for p in &state.particles {
			assert!(palette.contains(&p.color));
		}
	}

	#[test]
	fn set_section_same_value_is_a_no_op() {
		let mut state = test_state();
		let colors: Vec<_> = state.particles.iter().map(|p| p.color).collect();
		state.set_section(Section::Home);
		let after: Vec<_> = state.particles.iter().map(|p| p.color).collect();
		assert_eq!(colors, after);
	}

	#[test]
	fn theme_blends_toward_next_section_with_scroll() {
		let mut state = test_state();
		assert_eq!(state.theme(), Section::Home.theme());
		state.set_scroll_progress(0.5);
		assert_eq!(state.theme(), Section::About.theme());
		state.set_scroll_progress(0.25);
		let blended = state.theme();
		assert_eq!(
			blended,
			Section::Home.theme().blend(&Section::About.theme(), 0.5)
		);
	}

	#[test]
	fn scroll_progress_is_clamped() {
		let mut state = test_state();
		state.set_scroll_progress(4.2);
		assert_eq!(state.scroll_progress, 1.0);
		state.set_scroll_progress(-1.0);
		assert_eq!(state.scroll_progress, 0.0);
	}

	#[test]
	fn pointer_trail_prunes_old_points() {
		let mut state = test_state();
		state.pointer_moved(10.0, 10.0);
		for _ in 0..40 {
			state.tick(0.016);
		}
		// 40 frames at 16ms is past the 0.5s trail life.
		assert!(state.pointer.trail.is_empty());
		assert_eq!(state.pointer.position, Some((10.0, 10.0)));
	}

	#[test]
	fn pointer_left_clears_position_but_not_trail() {
		let mut state = test_state();
		state.pointer_moved(10.0, 10.0);
		state.pointer_left();
		assert_eq!(state.pointer.position, None);
		assert_eq!(state.pointer.trail.len(), 1);
	}

	#[test]
	fn resize_clamps_particles_into_new_bounds() {
		let mut state = test_state();
		state.resize(200.0, 100.0);
		assert_eq!((state.width, state.height), (200.0, 100.0));
		for p in &state.particles {
			assert!((0.0..=200.0).contains(&p.x));
			assert!((0.0..=100.0).contains(&p.y));
		}
	}

	#[test]
	fn bolts_spawn_and_expire() {
		let mut config = FieldConfig::default();
		config.lightning.chance = 1.0;
		config.lightning.interval = 0.1;
		let mut state = FieldState::new(config, Section::Home, 800.0, 600.0, 7);

		state.tick(0.1);
		assert!(!state.bolts.is_empty());

		// Bolt life is 0.15s; a long quiet stretch with spawning disabled
		// must drain them all.
		state.config.lightning.enabled = false;
		for _ in 0..20 {
			state.tick(0.016);
		}
		assert!(state.bolts.is_empty());
	}

	#[test]
	fn lightning_disabled_never_spawns() {
		let mut config = FieldConfig::default();
		config.lightning.enabled = false;
		config.lightning.chance = 1.0;
		let mut state = FieldState::new(config, Section::Home, 800.0, 600.0, 7);
		for _ in 0..500 {
			state.tick(0.016);
		}
		assert!(state.bolts.is_empty());
	}
}
