//! Section themes and color math for the particle field.
//!
//! Each page section carries a palette of four colors. Particles are tinted
//! with a randomly sampled palette entry; scene-level accents (connections,
//! glows, bolts) use a theme blended toward the next section as the page
//! scrolls. All interpolation happens on numeric channels, never on the CSS
//! strings handed to the canvas.

use super::rng::Rng;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Linear interpolation between two colors, `t` clamped to [0, 1].
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (other.r as f64 - self.r as f64) * t).round() as u8,
			g: (self.g as f64 + (other.g as f64 - self.g as f64) * t).round() as u8,
			b: (self.b as f64 + (other.b as f64 - self.b as f64) * t).round() as u8,
			a: self.a + (other.a - self.a) * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Page sections of the portfolio, in scroll order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
	Home,
	About,
	Experience,
	Projects,
	Certifications,
	Services,
	Contact,
}

impl Section {
	/// All sections in page order.
	pub const ALL: [Section; 7] = [
		Section::Home,
		Section::About,
		Section::Experience,
		Section::Projects,
		Section::Certifications,
		Section::Services,
		Section::Contact,
	];

	/// Map a section element id to its variant.
	pub fn from_id(id: &str) -> Option<Section> {
		match id {
			"home" => Some(Section::Home),
			"about" => Some(Section::About),
			"experience" => Some(Section::Experience),
			"projects" => Some(Section::Projects),
			"certifications" => Some(Section::Certifications),
			"services" => Some(Section::Services),
			"contact" => Some(Section::Contact),
			_ => None,
		}
	}

	/// The section that follows this one in page order, wrapping at the end.
	/// Scroll-driven blending interpolates toward this section's theme.
	pub fn next(self) -> Section {
		let idx = Section::ALL.iter().position(|s| *s == self).unwrap_or(0);
		Section::ALL[(idx + 1) % Section::ALL.len()]
	}

	/// The four-color palette for this section.
	pub fn theme(self) -> Theme {
		match self {
			Section::Home => Theme {
				primary: Color::rgb(0, 212, 255),
				secondary: Color::rgb(255, 0, 128),
				accent: Color::rgb(112, 0, 255),
				glow: Color::rgb(0, 255, 255),
			},
			Section::About => Theme {
				primary: Color::rgb(255, 107, 53),
				secondary: Color::rgb(247, 147, 30),
				accent: Color::rgb(255, 205, 60),
				glow: Color::rgb(255, 215, 0),
			},
			Section::Experience => Theme {
				primary: Color::rgb(78, 205, 196),
				secondary: Color::rgb(68, 160, 141),
				accent: Color::rgb(9, 109, 111),
				glow: Color::rgb(0, 255, 204),
			},
			Section::Projects => Theme {
				primary: Color::rgb(250, 114, 104),
				secondary: Color::rgb(196, 113, 245),
				accent: Color::rgb(18, 194, 233),
				glow: Color::rgb(255, 105, 180),
			},
			Section::Certifications => Theme {
				primary: Color::rgb(168, 237, 234),
				secondary: Color::rgb(254, 214, 227),
				accent: Color::rgb(255, 154, 158),
				glow: Color::rgb(0, 229, 255),
			},
			Section::Services => Theme {
				primary: Color::rgb(102, 126, 234),
				secondary: Color::rgb(118, 75, 162),
				accent: Color::rgb(240, 147, 251),
				glow: Color::rgb(106, 90, 205),
			},
			Section::Contact => Theme {
				primary: Color::rgb(79, 172, 254),
				secondary: Color::rgb(0, 242, 254),
				accent: Color::rgb(67, 233, 123),
				glow: Color::rgb(56, 249, 215),
			},
		}
	}
}

/// A section's color palette.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
	pub primary: Color,
	pub secondary: Color,
	pub accent: Color,
	pub glow: Color,
}

impl Theme {
	/// The palette as an array, for membership checks and sampling.
	pub fn palette(&self) -> [Color; 4] {
		[self.primary, self.secondary, self.accent, self.glow]
	}

	/// Sample one palette entry uniformly.
	pub fn pick(&self, rng: &mut Rng) -> Color {
		self.palette()[rng.next_int(4) as usize]
	}

	/// Per-channel linear blend toward another theme, `t` clamped to [0, 1].
	pub fn blend(&self, other: &Theme, t: f64) -> Theme {
		Theme {
			primary: self.primary.lerp(other.primary, t),
			secondary: self.secondary.lerp(other.secondary, t),
			accent: self.accent.lerp(other.accent, t),
			glow: self.glow.lerp(other.glow, t),
		}
	}
}
