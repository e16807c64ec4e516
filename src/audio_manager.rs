use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use std::time::{Duration, Instant};

const STEP_INTERVAL_WALK: Duration = Duration::from_millis(320);
const STEP_INTERVAL_BACK: Duration = Duration::from_millis(420);

/// Synthesized SFX cues on dedicated sinks: footstep ticks while moving
/// and a short chime when the goal latches. No audio device means no
/// manager, and the game simply runs silent.
pub struct AudioManager {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sfx_sink: Sink,
    foot_sink: Sink,
    last_step: Instant,
}

impl AudioManager {
    pub fn new() -> Option<Self> {
        let (_stream, handle) = OutputStream::try_default().ok()?;
        let sfx_sink = Sink::try_new(&handle).ok()?;
        let foot_sink = Sink::try_new(&handle).ok()?;
        Some(Self {
            _stream,
            handle,
            sfx_sink,
            foot_sink,
            last_step: Instant::now(),
        })
    }

    /// Throttled footstep tick; backward steps land slower.
    pub fn play_footstep(&mut self, backing_up: bool) {
        let interval = if backing_up {
            STEP_INTERVAL_BACK
        } else {
            STEP_INTERVAL_WALK
        };
        if self.last_step.elapsed() < interval {
            return;
        }
        self.last_step = Instant::now();
        let tick = SineWave::new(140.0)
            .take_duration(Duration::from_millis(40))
            .amplify(0.20);
        self.foot_sink.append(tick);
    }

    /// Ascending three-note chime for the win latch. Played on its own
    /// sink so a footstep already queued does not delay it.
    pub fn play_win_chime(&self) {
        for (freq, ms) in [(523.25, 140), (659.25, 140), (783.99, 320)] {
            let note = SineWave::new(freq)
                .take_duration(Duration::from_millis(ms))
                .amplify(0.35);
            self.sfx_sink.append(note);
        }
    }

    /// Cut any queued footsteps, used when movement stops abruptly.
    pub fn stop_footsteps(&mut self) {
        self.foot_sink.stop();
        if let Ok(new_sink) = Sink::try_new(&self.handle) {
            self.foot_sink = new_sink;
        }
    }
}
