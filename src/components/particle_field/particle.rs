//! Particle kinematics, boundary reflection, and pointer interaction.

use super::config::{FieldConfig, PointerMode};
use super::rng::Rng;
use super::theme::{Color, Theme};

/// Displacement applied to a particle at `distance` from the pointer.
///
/// Linear falloff: full `strength` at zero distance, zero at or beyond
/// `radius`, monotonically decreasing in between.
pub fn pointer_force(distance: f64, radius: f64, strength: f64) -> f64 {
	if distance >= radius {
		0.0
	} else {
		(radius - distance) / radius * strength
	}
}

/// Opacity of a connection line between particles `distance` apart.
///
/// Same shape as [`pointer_force`]: `max_alpha` at zero distance, zero at or
/// beyond `radius`.
pub fn connection_alpha(distance: f64, radius: f64, max_alpha: f64) -> f64 {
	if distance >= radius {
		0.0
	} else {
		(radius - distance) / radius * max_alpha
	}
}

/// One point of a particle's position-history trail.
#[derive(Clone, Debug)]
pub struct TrailPoint {
	pub x: f64,
	pub y: f64,
	/// Recomputed every frame as `index / len`; oldest points are dimmest.
	pub alpha: f64,
}

/// A single moving point of the field.
#[derive(Clone, Debug)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	/// Pixels advanced per frame along `direction`.
	pub speed: f64,
	/// Heading angle in radians.
	pub direction: f64,
	pub size: f64,
	pub opacity: f64,
	pub color: Color,
	/// Phase offset for the radius pulse, advanced each frame.
	pub phase: f64,
	pub trail: Vec<TrailPoint>,
}

impl Particle {
	/// Spawn a particle with randomized attributes inside the bounds, tinted
	/// from the given theme's palette.
	pub fn spawn(rng: &mut Rng, theme: &Theme, config: &FieldConfig, width: f64, height: f64) -> Self {
		let p = &config.particle;
		Self {
			x: rng.range(0.0, width),
			y: rng.range(0.0, height),
			speed: rng.range(p.speed_min, p.speed_max),
			direction: rng.range(0.0, std::f64::consts::TAU),
			size: rng.range(p.size_min, p.size_max),
			opacity: rng.range(p.opacity_min, p.opacity_max),
			color: theme.pick(rng),
			phase: rng.range(0.0, std::f64::consts::TAU),
			trail: Vec::new(),
		}
	}

	/// Advance one frame: kinematics, boundary reflection, pointer force,
	/// trail bookkeeping. The position is in `[0, width] x [0, height]` when
	/// this returns.
	pub fn step(&mut self, width: f64, height: f64, pointer: Option<(f64, f64)>, config: &FieldConfig) {
		self.x += self.direction.cos() * self.speed;
		self.y += self.direction.sin() * self.speed;

		// Mirror the heading on the crossed axis, then clamp back in-frame.
		if self.x < 0.0 || self.x > width {
			self.direction = std::f64::consts::PI - self.direction;
			self.x = self.x.clamp(0.0, width);
		}
		if self.y < 0.0 || self.y > height {
			self.direction = -self.direction;
			self.y = self.y.clamp(0.0, height);
		}

		if let Some((px, py)) = pointer {
			let (dx, dy) = (px - self.x, py - self.y);
			let distance = (dx * dx + dy * dy).sqrt();
			let force = pointer_force(distance, config.pointer.radius, config.pointer.strength);
			if force > 0.0 && distance > f64::EPSILON {
				let sign = match config.pointer.mode {
					PointerMode::Attract => 1.0,
					PointerMode::Repel => -1.0,
				};
				self.x = (self.x + dx / distance * force * sign).clamp(0.0, width);
				self.y = (self.y + dy / distance * force * sign).clamp(0.0, height);
			}
		}

		if config.trail.enabled {
			self.trail.push(TrailPoint {
				x: self.x,
				y: self.y,
				alpha: 1.0,
			});
			if self.trail.len() > config.trail.cap {
				self.trail.remove(0);
			}
			let len = self.trail.len() as f64;
			for (i, point) in self.trail.iter_mut().enumerate() {
				point.alpha = i as f64 / len;
			}
		}

		self.phase += 0.1;
	}

	/// Radius for this frame, pulsing around the base size.
	pub fn pulse_radius(&self, time: f64, amplitude: f64) -> f64 {
		self.size + (time * 2.0 + self.phase).sin() * amplitude
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::f64::consts::PI;

	fn test_particle(x: f64, y: f64, speed: f64, direction: f64) -> Particle {
		Particle {
			x,
			y,
			speed,
			direction,
			size: 2.0,
			opacity: 0.8,
			color: Color::rgb(0, 212, 255),
			phase: 0.0,
			trail: Vec::new(),
		}
	}

	#[test]
	fn right_edge_mirrors_direction_horizontally() {
		let mut p = test_particle(799.0, 300.0, 2.0, 0.0);
		p.step(800.0, 600.0, None, &FieldConfig::default());
		assert!((p.direction - PI).abs() < 1e-9);
		assert!(p.x <= 800.0);
	}

	#[test]
	fn bottom_edge_negates_direction() {
		let mut p = test_particle(400.0, 599.0, 2.0, PI / 2.0);
		p.step(800.0, 600.0, None, &FieldConfig::default());
		assert!((p.direction + PI / 2.0).abs() < 1e-9);
		assert!(p.y <= 600.0);
	}

	#[test]
	fn position_stays_in_bounds_over_many_frames() {
		let config = FieldConfig::default();
		let mut rng = Rng::new(5);
		let theme = Theme {
			primary: Color::rgb(1, 2, 3),
			secondary: Color::rgb(4, 5, 6),
			accent: Color::rgb(7, 8, 9),
			glow: Color::rgb(10, 11, 12),
		};
		let mut p = Particle::spawn(&mut rng, &theme, &config, 800.0, 600.0);
		for _ in 0..10_000 {
			p.step(800.0, 600.0, Some((400.0, 300.0)), &config);
			assert!((0.0..=800.0).contains(&p.x), "x out of bounds: {}", p.x);
			assert!((0.0..=600.0).contains(&p.y), "y out of bounds: {}", p.y);
		}
	}

	#[test]
	fn trail_never_exceeds_cap() {
		let config = FieldConfig::default();
		let mut p = test_particle(100.0, 100.0, 0.5, 1.0);
		for _ in 0..100 {
			p.step(800.0, 600.0, None, &config);
			assert!(p.trail.len() <= config.trail.cap);
		}
		assert_eq!(p.trail.len(), config.trail.cap);
	}

	#[test]
	fn trail_opacity_increases_with_recency() {
		let config = FieldConfig::default();
		let mut p = test_particle(100.0, 100.0, 0.5, 1.0);
		for _ in 0..20 {
			p.step(800.0, 600.0, None, &config);
		}
		for pair in p.trail.windows(2) {
			assert!(pair[0].alpha < pair[1].alpha);
		}
		assert!((p.trail[0].alpha - 0.0).abs() < 1e-9);
	}

	#[test]
	fn trail_disabled_stays_empty() {
		let mut config = FieldConfig::default();
		config.trail.enabled = false;
		let mut p = test_particle(100.0, 100.0, 0.5, 1.0);
		for _ in 0..20 {
			p.step(800.0, 600.0, None, &config);
		}
		assert!(p.trail.is_empty());
	}

	#[test]
	fn pointer_force_is_zero_at_and_beyond_radius() {
		assert_eq!(pointer_force(100.0, 100.0, 0.5), 0.0);
		assert_eq!(pointer_force(250.0, 100.0, 0.5), 0.0);
	}

	#[test]
	fn pointer_force_increases_as_distance_shrinks() {
		let mut last = 0.0;
		for d in [99.0, 75.0, 50.0, 25.0, 5.0, 0.0] {
			let f = pointer_force(d, 100.0, 0.5);
			assert!(f > last, "force not increasing at distance {d}");
			last = f;
		}
		assert!((pointer_force(0.0, 100.0, 0.5) - 0.5).abs() < 1e-9);
	}

	#[test]
	fn connection_alpha_is_monotone_and_bounded() {
		assert_eq!(connection_alpha(150.0, 150.0, 0.4), 0.0);
		assert_eq!(connection_alpha(400.0, 150.0, 0.4), 0.0);
		let mut last = 0.0;
		for d in [149.0, 100.0, 50.0, 10.0, 0.0] {
			let a = connection_alpha(d, 150.0, 0.4);
			assert!(a > last);
			assert!(a <= 0.4);
			last = a;
		}
		assert!((connection_alpha(0.0, 150.0, 0.4) - 0.4).abs() < 1e-9);
	}

	#[test]
	fn repel_pushes_away_relative_to_unforced_path() {
		let mut config = FieldConfig::default();
		config.pointer.mode = PointerMode::Repel;
		let pointer = (400.0, 300.0);

		let mut forced = test_particle(395.0, 300.0, 0.0, 0.0);
		let mut unforced = forced.clone();
		forced.step(800.0, 600.0, Some(pointer), &config);
		unforced.step(800.0, 600.0, None, &config);

		let dist = |p: &Particle| ((p.x - pointer.0).powi(2) + (p.y - pointer.1).powi(2)).sqrt();
		assert!(dist(&forced) > dist(&unforced) + 0.1);
	}

	#[test]
	fn attract_pulls_toward_pointer() {
		let mut config = FieldConfig::default();
		config.pointer.mode = PointerMode::Attract;
		let pointer = (400.0, 300.0);

		let mut forced = test_particle(395.0, 300.0, 0.0, 0.0);
		let mut unforced = forced.clone();
		forced.step(800.0, 600.0, Some(pointer), &config);
		unforced.step(800.0, 600.0, None, &config);

		let dist = |p: &Particle| ((p.x - pointer.0).powi(2) + (p.y - pointer.1).powi(2)).sqrt();
		assert!(dist(&forced) < dist(&unforced) - 0.1);
	}

	#[test]
	fn spawn_lands_inside_bounds_with_palette_color() {
		let config = FieldConfig::default();
		let mut rng = Rng::new(42);
		let theme = super::super::theme::Section::Home.theme();
		for _ in 0..50 {
			let p = Particle::spawn(&mut rng, &theme, &config, 800.0, 600.0);
			assert!((0.0..=800.0).contains(&p.x));
			assert!((0.0..=600.0).contains(&p.y));
			assert!(theme.palette().contains(&p.color));
			assert!(p.speed >= config.particle.speed_min && p.speed < config.particle.speed_max);
		}
	}
}
