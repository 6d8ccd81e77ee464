//! Planetaria's Mercury level: seeded procedural terrain with a decorative
//! cratered surface, and an astronaut driven by a six-state movement
//! machine. A `top_down` movement profile reuses the same controller for
//! gravity-free four-direction exploration.
//!
//! Everything runs headlessly against the [`planetaria_core`] capability
//! surface; the scene is driven by a [`planetaria_core::SceneRunner`].

pub mod config;
pub mod player;
pub mod scene;
pub mod surface;
pub mod terrain;

pub use config::{MercuryConfig, MovementProfile};
pub use player::{Player, PlayerState};
pub use scene::MercuryScene;
pub use terrain::{HeightMap, Terrain};
