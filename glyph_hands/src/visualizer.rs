//! `minifb` window: frame pacing, viewport size, input, and presentation.
//!
//! The window plays the part of the display: it paces frames at ~60 fps,
//! reports viewport resizes, and shows the [`Canvas`].  Mouse and keyboard
//! input for the simulator is forwarded as [`SimInput`] events.
//!
//! | Key | Action |
//! |---|---|
//! | mouse | Move the primary hand |
//! | `Space` | Show / hide the partner hand |
//! | `H` | Show / hide all hands |
//! | `C` | Pause / resume tracking |
//! | `Q` / `Escape` | Quit |

use std::sync::mpsc::Sender;
use std::time::Duration;

use anyhow::Context;
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use crate::canvas::Canvas;
use crate::config::WindowConfig;
use crate::tracker::SimInput;

/// Controls the render loop acts on itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub quit:            bool,
    pub toggle_tracking: bool,
}

pub struct Visualizer {
    window:  Window,
    sim_tx:  Sender<SimInput>,
    size:    (usize, usize),
    pointer: Option<(f32, f32)>,
}

impl Visualizer {
    pub fn new(cfg: &WindowConfig, sim_tx: Sender<SimInput>) -> anyhow::Result<Self> {
        let mut window = Window::new(
            &cfg.title,
            cfg.width, cfg.height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .context("opening window")?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        let size = (cfg.width, cfg.height);
        let _ = sim_tx.send(SimInput::Aspect(aspect(size)));

        Ok(Visualizer { window, sim_tx, size, pointer: None })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    pub fn size(&self) -> (usize, usize) { self.size }

    /// Poll keyboard and mouse; forward simulator input.
    pub fn poll_input(&mut self) -> Controls {
        let mut controls = Controls::default();
        if !self.window.is_open() {
            controls.quit = true;
            return controls;
        }

        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);

        if one_shot(Key::Q) || one_shot(Key::Escape) {
            controls.quit = true;
        }
        if one_shot(Key::C) {
            controls.toggle_tracking = true;
        }
        if one_shot(Key::Space) {
            let _ = self.sim_tx.send(SimInput::TogglePartner);
        }
        if one_shot(Key::H) {
            let _ = self.sim_tx.send(SimInput::ToggleVisible);
        }

        if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let (w, h) = self.size;
            if w > 0 && h > 0 {
                let p = (mx / w as f32, my / h as f32);
                if self.pointer != Some(p) {
                    self.pointer = Some(p);
                    let _ = self.sim_tx.send(SimInput::Pointer { x: p.0, y: p.1 });
                }
            }
        }

        controls
    }

    /// The new viewport size if it changed since the last call.  A
    /// minimised window (zero area) is not reported.
    pub fn poll_resize(&mut self) -> Option<(usize, usize)> {
        let size = self.window.get_size();
        if size == self.size || size.0 == 0 || size.1 == 0 {
            return None;
        }
        self.size = size;
        let _ = self.sim_tx.send(SimInput::Aspect(aspect(size)));
        Some(size)
    }

    pub fn set_status(&mut self, status: &str) {
        self.window.set_title(status);
    }

    pub fn present(&mut self, canvas: &Canvas) -> anyhow::Result<()> {
        let (w, h) = canvas.size();
        self.window
            .update_with_buffer(canvas.buffer(), w, h)
            .context("presenting frame")
    }
}

fn aspect((w, h): (usize, usize)) -> f32 {
    w as f32 / h.max(1) as f32
}
