//! Procedural lightning bolts.
//!
//! A bolt is a jittered polyline from a start point in the upper band of the
//! viewport to a point further down, with a handful of short side branches.
//! Geometry is rolled once at spawn from the field's RNG and stays fixed for
//! the bolt's short life; only its opacity animates.

use super::rng::Rng;

/// A short side branch off one of a bolt's segment joints.
#[derive(Clone, Debug)]
pub struct Branch {
	pub from: (f64, f64),
	pub to: (f64, f64),
}

/// One lightning bolt, fading over its configured life.
#[derive(Clone, Debug)]
pub struct LightningBolt {
	pub points: Vec<(f64, f64)>,
	pub branches: Vec<Branch>,
	pub thickness: f64,
	life: f64,
	max_life: f64,
}

impl LightningBolt {
	/// Generate a bolt inside a `width` x `height` viewport.
	pub fn generate(rng: &mut Rng, width: f64, height: f64, life: f64) -> Self {
		let start_x = rng.range(0.0, width);
		let start_y = rng.range(0.0, height * 0.3);
		let end_x = start_x + rng.range(-200.0, 200.0);
		let end_y = start_y + rng.range(100.0, 300.0);

		let segments = 8 + rng.next_int(7) as usize;
		let mut points = Vec::with_capacity(segments + 1);
		for i in 0..=segments {
			let progress = i as f64 / segments as f64;
			points.push((
				start_x + (end_x - start_x) * progress + rng.range(-15.0, 15.0),
				start_y + (end_y - start_y) * progress + rng.range(-10.0, 10.0),
			));
		}

		// Branches fork from joints past the start point.
		let mut branches = Vec::new();
		for &(x, y) in points.iter().skip(1) {
			if rng.next_f64() < 0.3 {
				let length = rng.range(20.0, 50.0);
				let angle = rng.range(
					-std::f64::consts::FRAC_PI_4,
					std::f64::consts::FRAC_PI_4,
				);
				branches.push(Branch {
					from: (x, y),
					to: (x + angle.cos() * length, y + angle.sin() * length),
				});
			}
		}

		Self {
			points,
			branches,
			thickness: rng.range(1.0, 4.0),
			life,
			max_life: life,
		}
	}

	/// Age the bolt by `dt` seconds. Returns false once fully faded.
	pub fn fade(&mut self, dt: f64) -> bool {
		self.life -= dt;
		self.life > 0.0
	}

	/// Current opacity, linear from 1 at spawn to 0 at expiry.
	pub fn opacity(&self) -> f64 {
		(self.life / self.max_life).clamp(0.0, 1.0)
	}
}
