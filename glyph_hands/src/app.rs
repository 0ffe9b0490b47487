//! Top-level application loop.
//!
//! `AppState` owns the scene renderer and the tracking toggle.  It decides
//! when a hand frame is rendered: only while tracking is on, and only once
//! per detector frame, however fast the display refreshes.

use std::sync::mpsc::{self, TryRecvError};

use anyhow::bail;
use hand_scene::{FrameStats, SceneRenderer};

use crate::canvas::Canvas;
use crate::config::AppConfig;
use crate::tracker::{latest_frame, spawn_hand_source, HandFrame, SimInput};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    scene:    SceneRenderer,
    tracking: bool,
    /// Sequence number of the last frame handed to the scene.
    last_seq: Option<u64>,
    rendered: u64,
    title:    String,
    status:   String,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> anyhow::Result<Self> {
        Ok(AppState {
            scene:    SceneRenderer::new(cfg.scene.clone())?,
            tracking: true,
            last_seq: None,
            rendered: 0,
            title:    cfg.window.title.clone(),
            status:   format!("{} — tracking", cfg.window.title),
        })
    }

    pub fn is_tracking(&self) -> bool { self.tracking }
    pub fn rendered(&self)    -> u64  { self.rendered }
    pub fn scene(&self)       -> &SceneRenderer { &self.scene }
    /// Window title describing the last rendered frame.
    pub fn status(&self)      -> &str { &self.status }

    pub fn toggle_tracking(&mut self) -> bool {
        self.tracking = !self.tracking;
        log::info!("Tracking {}", if self.tracking { "resumed" } else { "paused" });
        self.tracking
    }

    /// Render `frame` unless tracking is paused or the frame was already
    /// drawn.
    pub fn handle_frame(&mut self, frame: &HandFrame, canvas: &mut Canvas) -> Option<FrameStats> {
        if !self.tracking || self.last_seq == Some(frame.seq) {
            return None;
        }
        self.last_seq = Some(frame.seq);
        self.rendered += 1;

        let stats = self.scene.update(&frame.hands, canvas);
        self.status = status_line(&self.title, &stats);
        Some(stats)
    }
}

fn status_line(title: &str, stats: &FrameStats) -> String {
    let mut s = format!(
        "{} — {} hand{}  {} glyphs",
        title,
        stats.hands_drawn,
        if stats.hands_drawn == 1 { "" } else { "s" },
        stats.live_particles,
    );
    if let Some(string) = &stats.thumb_string {
        s.push_str(&format!("  string {:.0}px @ {:.2}", string.length(), string.width));
    }
    if stats.hands_skipped > 0 {
        s.push_str(&format!("  ({} malformed)", stats.hands_skipped));
    }
    s
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// This is the entry point called from `main.rs`.  It creates the
/// visualizer, the hand source (simulation by default, hardware with
/// `--features leap`), and drives the render loop at ~60 fps.
pub fn run(cfg: AppConfig) -> anyhow::Result<()> {
    // ── Sim input channel ─────────────────────────────────────────────────
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();

    #[cfg(not(feature = "leap"))]
    let frames = {
        use crate::tracker::SimHandSource;
        let fps = cfg.tracking.camera_fps.max(1);
        spawn_hand_source(SimHandSource {
            rx:             sim_rx,
            frame_interval: std::time::Duration::from_secs_f64(1.0 / fps as f64),
            max_hands:      cfg.tracking.max_hands,
            partner:        cfg.tracking.two_hands,
        })
    };

    #[cfg(feature = "leap")]
    let frames = {
        use crate::tracker::LeapHandSource;
        drop(sim_rx);
        spawn_hand_source(LeapHandSource {
            max_hands: cfg.tracking.max_hands,
            bounds:    cfg.tracking.interaction_box,
        })
    };

    // ── Visualizer (owns the window and the sim input sender) ────────────
    let mut vis = Visualizer::new(&cfg.window, sim_tx)?;
    let (w, h) = vis.size();
    let mut canvas = Canvas::new(w, h, cfg.window.background);

    // ── App state ─────────────────────────────────────────────────────────
    let mut app = AppState::new(&cfg)?;
    log::info!("Scene ready at {}x{}", w, h);

    // ── Main loop ─────────────────────────────────────────────────────────
    while vis.is_open() {
        // 1. Poll window input
        let controls = vis.poll_input();
        if controls.quit { break; }
        if controls.toggle_tracking {
            app.toggle_tracking();
            if !app.is_tracking() {
                vis.set_status(&format!("{} — paused (C to resume)", cfg.window.title));
            }
        }

        // 2. Viewport resize
        if let Some((w, h)) = vis.poll_resize() {
            canvas.resize(w, h);
            log::info!("Viewport resized to {}x{}", w, h);
        }

        // 3. Newest detector frame, if any
        match latest_frame(&frames) {
            Ok(Some(frame)) => {
                if app.handle_frame(&frame, &mut canvas).is_some() {
                    vis.set_status(app.status());
                }
            }
            Ok(None) => {}
            Err(TryRecvError::Disconnected) => {
                log::warn!("Hand source disconnected after {} frames", app.rendered());
                bail!("hand source stopped");
            }
            Err(TryRecvError::Empty) => {}
        }

        // 4. Present
        vis.present(&canvas)?;
    }

    log::info!("Rendered {} frames", app.rendered());
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
