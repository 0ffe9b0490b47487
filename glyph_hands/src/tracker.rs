//! Hand sources — both LeapMotion hardware and mouse/keyboard simulation.
//!
//! The public interface is [`HandFrame`] delivered over a `mpsc` channel.
//! The render loop doesn't need to know whether frames came from real
//! hardware or the simulator.  Frames are always in detector space
//! (un-mirrored, normalised to `[0, 1]`).

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use hand_scene::Hand;

use crate::pose::{self, Side};

// ════════════════════════════════════════════════════════════════════════════
// HandFrame
// ════════════════════════════════════════════════════════════════════════════

/// One detector result.  `seq` increases by one per frame so the render
/// loop can tell a new frame from one it has already drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct HandFrame {
    pub seq:   u64,
    pub hands: Vec<Hand>,
}

// ════════════════════════════════════════════════════════════════════════════
// HandSource trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`HandFrame`]s over a channel.
pub trait HandSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<HandFrame>);
}

/// Spawn a hand source on its own thread and return the receiving end.
pub fn spawn_hand_source<H: HandSource>(source: H) -> Receiver<HandFrame> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

/// Drain everything queued and keep only the newest frame.
///
/// `Err` means the source has gone away.
pub fn latest_frame(rx: &Receiver<HandFrame>) -> Result<Option<HandFrame>, TryRecvError> {
    let mut latest = None;
    loop {
        match rx.try_recv() {
            Ok(frame)                       => latest = Some(frame),
            Err(TryRecvError::Empty)        => return Ok(latest),
            Err(TryRecvError::Disconnected) => {
                return match latest {
                    Some(frame) => Ok(Some(frame)),
                    None        => Err(TryRecvError::Disconnected),
                };
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapHandSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Hand source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// Each digit contributes four landmarks (proximal base, intermediate base,
/// distal base, tip), thumb first; the wrist is the mean of the finger
/// metacarpal bases.  Millimetre positions go through the configured
/// [`InteractionBox`](crate::config::InteractionBox).
#[cfg(feature = "leap")]
pub struct LeapHandSource {
    pub max_hands: usize,
    pub bounds:    crate::config::InteractionBox,
}

#[cfg(feature = "leap")]
impl HandSource for LeapHandSource {
    fn run(self: Box<Self>, tx: Sender<HandFrame>) {
        use leaprs::{Connection, ConnectionConfig, EventRef};

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c)  => c,
            Err(e) => {
                log::error!("Failed to create LeapC connection: {:?}", e);
                return;
            }
        };
        if let Err(e) = connection.open() {
            log::error!("Failed to open LeapMotion device: {:?}", e);
            return;
        }
        log::info!("LeapMotion connection open");

        let mut seq = 0u64;
        loop {
            let msg = match connection.poll(100) {
                Ok(m)  => m,
                Err(_) => continue,
            };

            if let EventRef::Tracking(frame) = msg.event() {
                let hands: Vec<Hand> = frame
                    .hands()
                    .into_iter()
                    .take(self.max_hands)
                    .map(|h| leap_landmarks(&h, &self.bounds))
                    .collect();
                seq += 1;
                if tx.send(HandFrame { seq, hands }).is_err() { return; }
            }
        }
    }
}

#[cfg(feature = "leap")]
fn leap_landmarks(hand: &leaprs::HandRef, bounds: &crate::config::InteractionBox) -> Hand {
    let digits = hand.digits();

    let mut bases  = [[0.0; 3]; 5];
    let mut joints = [[[0.0; 3]; 4]; 5];
    for (i, digit) in digits.iter().enumerate() {
        bases[i] = digit.metacarpal().prev_joint().array();
        joints[i] = [
            digit.proximal().prev_joint().array(),
            digit.intermediate().prev_joint().array(),
            digit.distal().prev_joint().array(),
            digit.distal().next_joint().array(),
        ];
    }
    landmarks_from_joints(&bases, &joints, bounds)
}

/// Build the 21-point layout from device-space joints (millimetres).
///
/// `bases` are the metacarpal origins of the five digits, thumb first; the
/// wrist is the mean of the four finger bases.  `joints` holds the four
/// joints of each digit from knuckle to tip.
pub fn landmarks_from_joints(
    bases:  &[[f32; 3]; 5],
    joints: &[[[f32; 3]; 4]; 5],
    bounds: &crate::config::InteractionBox,
) -> Hand {
    use hand_scene::Landmark;

    let to_landmark = |[x, y, z]: [f32; 3]| {
        let (nx, ny) = bounds.normalize(x, y);
        Landmark::with_depth(nx, ny, z)
    };

    let mut wrist = [0.0; 3];
    for base in &bases[1..] {
        for (w, b) in wrist.iter_mut().zip(base) {
            *w += b / 4.0;
        }
    }

    std::iter::once(to_landmark(wrist))
        .chain(joints.iter().flatten().map(|&j| to_landmark(j)))
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandSource — mouse/keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Debug, PartialEq)]
pub enum SimInput {
    /// Mouse pointer in normalised display coordinates.
    Pointer { x: f32, y: f32 },
    /// Show or hide the second hand.
    TogglePartner,
    /// Show or hide all hands.
    ToggleVisible,
    /// Frame aspect ratio (width / height) changed.
    Aspect(f32),
}

/// Hand source that synthesises hands from [`SimInput`] events sent by the
/// visualizer's window.
///
/// The primary hand sits under the pointer.  The partner hand, when shown,
/// is placed at the horizontally opposite position with its thumb facing
/// the primary one, so the thumb string stretches as the pointer moves.
pub struct SimHandSource {
    pub rx:             Receiver<SimInput>,
    /// Time between synthesised camera frames.
    pub frame_interval: Duration,
    pub max_hands:      usize,
    pub partner:        bool,
}

/// Simulator state between frames.
#[derive(Clone, Debug, PartialEq)]
pub struct SimState {
    pub pointer: (f32, f32),
    pub partner: bool,
    pub visible: bool,
    pub aspect:  f32,
}

impl SimState {
    pub fn new(partner: bool) -> Self {
        SimState {
            pointer: (0.3, 0.55),
            partner,
            visible: true,
            aspect:  16.0 / 9.0,
        }
    }

    pub fn apply(&mut self, input: SimInput) {
        match input {
            SimInput::Pointer { x, y } => self.pointer = (x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)),
            SimInput::TogglePartner    => self.partner = !self.partner,
            SimInput::ToggleVisible    => self.visible = !self.visible,
            SimInput::Aspect(a)        => self.aspect  = a,
        }
    }

    /// Hands for one frame, in detector (un-mirrored) space.
    pub fn hands(&self, phase: f32, max_hands: usize) -> Vec<Hand> {
        if !self.visible {
            return Vec::new();
        }
        let (px, py) = self.pointer;

        // Thumbs face each other: the hand left of centre is a right hand.
        let side = if px <= 0.5 { Side::Right } else { Side::Left };
        let other = match side {
            Side::Right => Side::Left,
            Side::Left  => Side::Right,
        };

        let mut display = vec![pose::open_hand(px, py, side, self.aspect, phase)];
        if self.partner {
            display.push(pose::open_hand(1.0 - px, py, other, self.aspect, phase + 1.7));
        }

        display.truncate(max_hands);
        // the detector sees the un-mirrored camera frame
        hand_scene::landmark::mirror(&display)
    }
}

impl HandSource for SimHandSource {
    fn run(self: Box<Self>, tx: Sender<HandFrame>) {
        let mut state = SimState::new(self.partner);
        let started = Instant::now();
        let mut next_frame = started;
        let mut seq = 0u64;

        loop {
            let now = Instant::now();
            if now >= next_frame {
                seq += 1;
                let phase = started.elapsed().as_secs_f32() * 2.0;
                let frame = HandFrame { seq, hands: state.hands(phase, self.max_hands) };
                if tx.send(frame).is_err() { return; }
                next_frame += self.frame_interval;
                continue;
            }

            match self.rx.recv_timeout(next_frame - now) {
                Ok(input)                          => state.apply(input),
                Err(RecvTimeoutError::Timeout)      => {}
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_scene::landmark::THUMB_TIP;
    use hand_scene::LANDMARK_COUNT;

    #[test]
    fn hidden_hands_make_empty_frames() {
        let mut s = SimState::new(true);
        s.apply(SimInput::ToggleVisible);
        assert!(s.hands(0.0, 2).is_empty());
    }

    #[test]
    fn partner_toggles_second_hand() {
        let mut s = SimState::new(false);
        assert_eq!(s.hands(0.0, 2).len(), 1);
        s.apply(SimInput::TogglePartner);
        let hands = s.hands(0.0, 2);
        assert_eq!(hands.len(), 2);
        assert!(hands.iter().all(|h| h.len() == LANDMARK_COUNT));
    }

    #[test]
    fn max_hands_caps_the_frame() {
        let s = SimState::new(true);
        assert_eq!(s.hands(0.0, 1).len(), 1);
    }

    #[test]
    fn frames_are_in_detector_space() {
        let mut s = SimState::new(false);
        s.apply(SimInput::Pointer { x: 0.2, y: 0.5 });
        let hands = s.hands(0.0, 2);
        // pointer on the left of the display → right of the camera frame
        let thumb = hands[0].landmark(THUMB_TIP).unwrap();
        assert!(thumb.x > 0.5);
        assert!(thumb.mirrored().x < 0.2);
    }

    #[test]
    fn pointer_is_clamped() {
        let mut s = SimState::new(false);
        s.apply(SimInput::Pointer { x: -3.0, y: 9.0 });
        assert_eq!(s.pointer, (0.0, 1.0));
    }

    #[test]
    fn device_joints_map_onto_the_layout() {
        use crate::config::InteractionBox;
        use hand_scene::landmark::{INDEX_TIP, WRIST};

        // finger bases around (0, 200); each digit's joints climb by 20mm
        let bases = [
            [-60.0, 200.0, 0.0],
            [-30.0, 190.0, 0.0],
            [-10.0, 200.0, 0.0],
            [ 10.0, 210.0, 0.0],
            [ 30.0, 200.0, 0.0],
        ];
        let mut joints = [[[0.0; 3]; 4]; 5];
        for (d, digit) in joints.iter_mut().enumerate() {
            for (j, joint) in digit.iter_mut().enumerate() {
                *joint = [bases[d][0], 220.0 + 20.0 * j as f32, -5.0];
            }
        }

        let bounds = InteractionBox::default();
        let hand = landmarks_from_joints(&bases, &joints, &bounds);
        assert_eq!(hand.len(), LANDMARK_COUNT);
        assert!(hand.check().is_ok());

        // wrist is the mean of the four finger bases
        let (wx, wy) = bounds.normalize(0.0, 200.0);
        let wrist = hand.landmark(WRIST).unwrap();
        assert!((wrist.x - wx).abs() < 1e-6 && (wrist.y - wy).abs() < 1e-6);

        let (tx, ty) = bounds.normalize(-60.0, 280.0);
        let thumb = hand.landmark(THUMB_TIP).unwrap();
        assert_eq!((thumb.x, thumb.y, thumb.z), (tx, ty, -5.0));

        let (ix, _) = bounds.normalize(-30.0, 280.0);
        assert_eq!(hand.landmark(INDEX_TIP).unwrap().x, ix);
    }

    #[test]
    fn latest_frame_keeps_newest() {
        let (tx, rx) = mpsc::channel();
        assert_eq!(latest_frame(&rx), Ok(None));
        for seq in 1..=3 {
            tx.send(HandFrame { seq, hands: Vec::new() }).unwrap();
        }
        assert_eq!(latest_frame(&rx).unwrap().map(|f| f.seq), Some(3));
        drop(tx);
        assert_eq!(latest_frame(&rx), Err(TryRecvError::Disconnected));
    }

    #[test]
    fn sim_source_streams_numbered_frames() {
        let (_sim_tx, sim_rx) = mpsc::channel();
        let rx = spawn_hand_source(SimHandSource {
            rx:             sim_rx,
            frame_interval: Duration::from_millis(5),
            max_hands:      2,
            partner:        true,
        });
        let first  = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        let second = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(first.seq, 1);
        assert_eq!(second.seq, 2);
        assert_eq!(first.hands.len(), 2);
    }
}
