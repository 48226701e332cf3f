//! Headless simulation

use anyhow::{bail, Result};
use serde::Serialize;
use tracing::{info, warn};

use arbor_3d::camera::{CameraFrame, PointerSample};
use arbor_3d::config::ArborConfig;
use arbor_3d::director::Director;
use arbor_3d::draw::DrawPhase;
use arbor_3d::frame::{FrameOutput, RenderInstance};
use arbor_core::ImageHandle;

/// Scripted inputs for one run
#[derive(Clone, Debug)]
pub struct SimulateOptions {
    pub seconds: f32,
    pub fps: u32,
    pub participants: u64,
    pub prizes: u64,
    pub draw_at: Option<f32>,
    pub reveal_at: Option<f32>,
    pub reset_at: Option<f32>,
    pub pointer: Option<(f32, f32)>,
    pub zoom: f32,
    pub seed: u64,
    pub every: Option<u64>,
}

/// Phase change observed during the run
#[derive(Debug, Serialize)]
struct PhaseChange {
    time: f64,
    phase: DrawPhase,
}

/// Printed at the end of a run
#[derive(Debug, Serialize)]
struct Summary {
    frames: u64,
    elapsed: f64,
    phase: DrawPhase,
    winner: Option<usize>,
    prize: Option<u64>,
    control: f32,
    camera: CameraFrame,
    instances: usize,
    timeline: Vec<PhaseChange>,
    winner_card: Option<RenderInstance>,
}

/// One frame in the `--every` stream
#[derive(Debug, Serialize)]
struct FrameLine<'a> {
    frame: u64,
    elapsed: f64,
    phase: DrawPhase,
    control: f32,
    camera: &'a CameraFrame,
}

/// A trigger that fires once when its time is reached
struct Cue {
    at: Option<f32>,
    done: bool,
}

impl Cue {
    fn new(at: Option<f32>) -> Self {
        Self { at, done: false }
    }

    fn due(&mut self, now: f32) -> bool {
        match self.at {
            Some(at) if !self.done && now >= at => {
                self.done = true;
                true
            }
            _ => false,
        }
    }
}

pub fn cmd_simulate(config: ArborConfig, options: &SimulateOptions) -> Result<()> {
    if options.fps == 0 {
        bail!("--fps must be at least 1");
    }
    if !options.seconds.is_finite() || options.seconds < 0.0 {
        bail!("--seconds must be a non-negative number");
    }

    let mut director = Director::with_seed(config, options.seed)?;
    director.set_participants(
        (0..options.participants)
            .map(|id| ImageHandle::with_size(id, 640, 480))
            .collect(),
    );
    director.set_prizes(
        (0..options.prizes)
            .map(|id| ImageHandle::new(1000 + id))
            .collect(),
    );
    if let Some((x, y)) = options.pointer {
        director.set_pointer(PointerSample::new(x, y, true));
    }
    director.zoom(options.zoom);

    let dt = 1.0 / options.fps as f32;
    let total = (options.seconds * options.fps as f32).round() as u64;
    info!(
        "Simulating {} frames at {} fps with {} participants",
        total, options.fps, options.participants
    );

    let mut draw = Cue::new(options.draw_at);
    let mut reveal = Cue::new(options.reveal_at);
    let mut reset = Cue::new(options.reset_at);

    let mut timeline = Vec::new();
    let mut last_phase = director.phase();
    let mut output: Option<FrameOutput> = None;

    for i in 0..total {
        let now = i as f32 * dt;
        if draw.due(now) {
            if let Err(err) = director.start_draw() {
                warn!("Draw at {:.2}s rejected: {}", now, err);
            }
        }
        if reveal.due(now) {
            if let Err(err) = director.reveal() {
                warn!("Reveal at {:.2}s rejected: {}", now, err);
            }
        }
        if reset.due(now) {
            director.reset_draw();
        }

        let out = director.frame(dt);
        if out.phase != last_phase {
            timeline.push(PhaseChange {
                time: out.elapsed,
                phase: out.phase,
            });
            last_phase = out.phase;
        }
        if let Some(every) = options.every.filter(|n| *n > 0) {
            if out.frame % every == 0 {
                let line = FrameLine {
                    frame: out.frame,
                    elapsed: out.elapsed,
                    phase: out.phase,
                    control: out.control,
                    camera: &out.camera,
                };
                println!("{}", serde_json::to_string(&line)?);
            }
        }
        output = Some(out);
    }

    let Some(out) = output else {
        bail!("nothing simulated, --seconds was too short");
    };

    let summary = Summary {
        frames: out.frame,
        elapsed: out.elapsed,
        phase: out.phase,
        winner: out.winner,
        prize: out.prize.map(|p| p.id),
        control: out.control,
        camera: out.camera,
        instances: out.instances.len(),
        timeline,
        winner_card: out.winner.and_then(|w| out.photo(w).copied()),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
