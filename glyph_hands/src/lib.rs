//! # glyph_hands
//!
//! Windowed front end for [`hand_scene`]: a hand source feeds landmark
//! frames to the scene, which paints skeletons, glyph particles, and the
//! thumb string into a software canvas shown in a `minifb` window.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the mouse drives a synthetic hand.
//! * `leap` — **Hardware mode**: polls a real LeapMotion controller via LeapC.
//!
//! ### Keys
//!
//! | Key | Action |
//! |---|---|
//! | mouse | Move the primary hand (simulation) |
//! | `Space` | Show / hide the partner hand (simulation) |
//! | `H` | Show / hide all hands (simulation) |
//! | `C` | Pause / resume tracking |
//! | `Q` / `Escape` | Quit |

pub mod font;
pub mod canvas;
pub mod config;
pub mod pose;
pub mod tracker;
pub mod visualizer;
pub mod app;
