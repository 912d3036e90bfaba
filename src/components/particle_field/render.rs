//! Canvas rendering for the particle field.
//!
//! All drawing happens here, screen-space, in back-to-front passes:
//! 1. Background repaint (full clear or low-alpha smear)
//! 2. Pointer glow gradient and pointer trail
//! 3. Particle trails, then the particles themselves (glow under disc)
//! 4. Inter-particle connection lines
//! 5. Lightning bolts on top

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particle::connection_alpha;
use super::state::FieldState;
use super::theme::{Color, Theme};

/// Render one frame of the field.
pub fn render(state: &FieldState, ctx: &CanvasRenderingContext2d) {
	let theme = state.theme();

	draw_background(state, ctx);
	draw_pointer_glow(state, ctx, &theme);
	draw_pointer_trail(state, ctx, &theme);
	draw_particles(state, ctx);
	draw_connections(state, ctx, &theme);
	draw_bolts(state, ctx, &theme);
}

fn rgba(color: Color, alpha: f64) -> String {
	format!("rgba({}, {}, {}, {})", color.r, color.g, color.b, alpha)
}

fn draw_background(state: &FieldState, ctx: &CanvasRenderingContext2d) {
	if state.config.background_fade >= 1.0 {
		ctx.set_fill_style_str("#000000");
	} else {
		ctx.set_fill_style_str(&rgba(Color::rgb(0, 0, 0), state.config.background_fade));
	}
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_pointer_glow(state: &FieldState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let Some((px, py)) = state.pointer.position else {
		return;
	};

	let radius = state.config.pointer.radius * 2.0;
	let Ok(gradient) = ctx.create_radial_gradient(px, py, 0.0, px, py, radius) else {
		return;
	};
	let _ = gradient.add_color_stop(0.0, &theme.glow.with_alpha(0.12).to_css());
	let _ = gradient.add_color_stop(0.4, &theme.secondary.with_alpha(0.05).to_css());
	let _ = gradient.add_color_stop(1.0, &theme.secondary.with_alpha(0.0).to_css());

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_pointer_trail(state: &FieldState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	if state.pointer.trail.len() < 2 {
		return;
	}

	ctx.set_stroke_style_str(&theme.glow.to_css());
	ctx.set_line_width(3.0);
	ctx.set_shadow_blur(15.0);
	ctx.set_shadow_color(&theme.glow.to_css());

	let life = state.config.pointer.trail_life;
	for pair in state.pointer.trail.windows(2) {
		let age = state.time - pair[1].born;
		let alpha = (1.0 - age / life).max(0.0);
		ctx.set_global_alpha(alpha * 0.8);
		ctx.begin_path();
		ctx.move_to(pair[0].x, pair[0].y);
		ctx.line_to(pair[1].x, pair[1].y);
		ctx.stroke();
	}

	ctx.set_global_alpha(1.0);
	ctx.set_shadow_blur(0.0);
}

fn draw_particles(state: &FieldState, ctx: &CanvasRenderingContext2d) {
	let amplitude = state.config.particle.pulse_amplitude;

	for particle in &state.particles {
		let css = particle.color.to_css();

		// Trail first, so the particle disc sits on top of it.
		if particle.trail.len() > 1 {
			ctx.set_stroke_style_str(&css);
			ctx.set_line_width(particle.size * 0.5);
			ctx.set_shadow_blur(10.0);
			ctx.set_shadow_color(&css);
			for pair in particle.trail.windows(2) {
				ctx.set_global_alpha(pair[1].alpha * 0.3);
				ctx.begin_path();
				ctx.move_to(pair[0].x, pair[0].y);
				ctx.line_to(pair[1].x, pair[1].y);
				ctx.stroke();
			}
		}

		let radius = particle.pulse_radius(state.time, amplitude);

		ctx.set_fill_style_str(&css);
		ctx.set_shadow_blur(20.0);
		ctx.set_shadow_color(&css);

		ctx.set_global_alpha(particle.opacity);
		ctx.begin_path();
		let _ = ctx.arc(particle.x, particle.y, radius, 0.0, PI * 2.0);
		ctx.fill();

		// Soft glow: a larger, fainter duplicate beneath the solid disc.
		ctx.set_global_alpha(particle.opacity * 0.3);
		ctx.begin_path();
		let _ = ctx.arc(particle.x, particle.y, radius * 2.0, 0.0, PI * 2.0);
		ctx.fill();
	}

	ctx.set_global_alpha(1.0);
	ctx.set_shadow_blur(0.0);
}

fn draw_connections(state: &FieldState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let radius = state.config.connection.radius;
	let max_alpha = state.config.connection.max_alpha;

	ctx.set_line_width(state.config.connection.line_width);
	ctx.set_shadow_blur(5.0);
	ctx.set_shadow_color(&theme.accent.to_css());

	// O(n^2) pairwise scan; the population is small and fixed.
	for (i, a) in state.particles.iter().enumerate() {
		for b in state.particles.iter().skip(i + 1) {
			let distance = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
			let alpha = connection_alpha(distance, radius, max_alpha);
			if alpha <= 0.0 {
				continue;
			}
			ctx.set_stroke_style_str(&rgba(theme.accent, alpha));
			ctx.begin_path();
			ctx.move_to(a.x, a.y);
			ctx.line_to(b.x, b.y);
			ctx.stroke();
		}
	}

	ctx.set_shadow_blur(0.0);
}

fn draw_bolts(state: &FieldState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	for bolt in &state.bolts {
		let opacity = bolt.opacity();
		let css = theme.primary.to_css();

		ctx.set_global_alpha(opacity);
		ctx.set_stroke_style_str(&css);
		ctx.set_line_width(bolt.thickness);
		ctx.set_shadow_blur(25.0);
		ctx.set_shadow_color(&css);
		ctx.set_line_cap("round");
		ctx.set_line_join("round");

		ctx.begin_path();
		for (i, &(x, y)) in bolt.points.iter().enumerate() {
			if i == 0 {
				ctx.move_to(x, y);
			} else {
				ctx.line_to(x, y);
			}
		}
		ctx.stroke();

		ctx.set_global_alpha(opacity * 0.6);
		ctx.set_line_width(bolt.thickness * 0.5);
		for branch in &bolt.branches {
			ctx.begin_path();
			ctx.move_to(branch.from.0, branch.from.1);
			ctx.line_to(branch.to.0, branch.to.1);
			ctx.stroke();
		}
	}

	ctx.set_global_alpha(1.0);
	ctx.set_shadow_blur(0.0);
	ctx.set_line_cap("butt");
	ctx.set_line_join("miter");
}
