//! Animated particle-field background component.
//!
//! Renders a full-viewport, non-interactive canvas layer behind page content:
//! - A fixed set of glowing particles with simple kinematics, boundary
//!   reflection, and fading position trails
//! - Pointer-proximity forces and a fading pointer trail
//! - Proximity-based connection lines between particles
//! - Occasional procedural lightning bolts
//! - Per-section color palettes, blended toward the next section on scroll
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{ParticleFieldCanvas, Section};
//!
//! let (section, _set_section) = signal(Section::Home);
//!
//! view! { <ParticleFieldCanvas section=section /> }
//! ```

mod component;
pub mod config;
mod lightning;
mod particle;
mod render;
mod rng;
mod state;
pub mod theme;

pub use component::ParticleFieldCanvas;
pub use config::{FieldConfig, FieldOptions, PointerMode};
pub use theme::{Color, Section, Theme};
