//! Application configuration, optionally loaded from a JSON file.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! { "window": { "width": 1920, "height": 1080 },
//!   "scene":  { "emission_probability": 0.8 } }
//! ```

use std::path::Path;

use anyhow::Context;
use hand_scene::SceneConfig;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window:   WindowConfig,
    pub tracking: TrackingConfig,
    pub scene:    SceneConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title:      String,
    pub width:      usize,
    pub height:     usize,
    /// ARGB fill used by `clear`; stands in for the live video behind the
    /// overlay.
    pub background: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title:      "Glyph Hands".to_string(),
            width:      1280,
            height:     720,
            background: 0xFF101018,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Hands reported per frame at most.
    pub max_hands:     usize,
    /// Frame rate of the simulated camera.
    pub camera_fps:    u32,
    /// Start the simulator with the partner hand visible.
    pub two_hands:     bool,
    pub interaction_box: InteractionBox,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        TrackingConfig {
            max_hands:       2,
            camera_fps:      30,
            two_hands:       false,
            interaction_box: InteractionBox::default(),
        }
    }
}

/// Region above a LeapMotion (millimetres) that maps onto the full frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionBox {
    /// Left/right extent, device-centred.
    pub x: [f32; 2],
    /// Height above the device, bottom/top.
    pub y: [f32; 2],
}

impl Default for InteractionBox {
    fn default() -> Self {
        InteractionBox { x: [-200.0, 200.0], y: [100.0, 450.0] }
    }
}

impl InteractionBox {
    /// Map a device-space position to normalised detector coordinates.
    ///
    /// The detector frame is un-mirrored, as a camera facing the user sees
    /// it, so the user's right (+x) lands on the left of the frame.  Up
    /// (+y) maps to the top (y = 0).  Values outside the box clamp to the
    /// frame edge.
    pub fn normalize(&self, x_mm: f32, y_mm: f32) -> (f32, f32) {
        let span = |r: [f32; 2], v: f32| ((v - r[0]) / (r[1] - r[0])).clamp(0.0, 1.0);
        (1.0 - span(self.x, x_mm), 1.0 - span(self.y, y_mm))
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: Self = serde_json::from_str(&json)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.scene.validate()?;
        log::info!("Loaded config from {:?}", path);
        Ok(cfg)
    }
}
