//! # hand_scene
//!
//! Real-time visual overlay driven by hand-pose landmarks.  Each frame the
//! hand tracker supplies zero or more hands (21 normalised landmarks each);
//! [`SceneRenderer::update`] turns them into:
//!
//! * a glowing skeleton per hand,
//! * mathematical-symbol particles shed from the thumb and index tips,
//!   which drift, spin, shrink, and fade over 100 frames,
//! * a "string" between the two thumbs when exactly two hands are visible.
//!
//! Everything is tinted by a hue that advances one degree per frame.
//!
//! The engine draws through the [`Surface`] trait and never touches a
//! window, camera, or model; those belong to the caller.
//!
//! ```rust,no_run
//! use hand_scene::{Hand, SceneConfig, SceneRenderer, Surface};
//!
//! fn frame<S: Surface>(scene: &mut SceneRenderer, hands: &[Hand], surface: &mut S) {
//!     let stats = scene.update(hands, surface);
//!     log::trace!("{} particles alive", stats.live_particles);
//! }
//!
//! let scene = SceneRenderer::new(SceneConfig::default()).unwrap();
//! ```

pub mod error;
pub mod landmark;
pub mod color;
pub mod surface;
pub mod config;
pub mod particle;
pub mod skeleton;
pub mod thumb_string;
pub mod scene;

pub use config::SceneConfig;
pub use error::SceneError;
pub use landmark::{Hand, Landmark, LANDMARK_COUNT};
pub use scene::{FrameStats, SceneRenderer};
pub use surface::{Glow, Paint, Point, Surface};
pub use thumb_string::ThumbString;
