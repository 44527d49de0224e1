//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use alloc::{vec, vec::Vec};

use embassy_time::{Duration, Instant};

use crate::{OutputDriver, color::Rgb, effect::Effect};

/// Default target frame rate (60 FPS).
pub const DEFAULT_FPS: u32 = 60;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable frame scheduler that manages timing without async.
///
/// This scheduler:
/// - Tracks frame timing with drift correction
/// - Advances the effect and writes the quantized frame to the output driver
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let handle = registry.load("RainbowSingle")?;
/// let config = EffectConfig::with_defaults(60, &handle.create_parser());
/// let mut scheduler = FrameScheduler::new(handle.instance(config)?, driver);
///
/// loop {
///     let now = get_current_time_ms();
///     let result = scheduler.tick(Instant::from_millis(now));
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis() as u64);
/// }
/// ```
pub struct FrameScheduler<E: Effect, O: OutputDriver> {
    output: O,
    effect: E,
    buffer: Vec<Rgb>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<E: Effect, O: OutputDriver> FrameScheduler<E, O> {
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (60 FPS) for frame timing.
    pub fn new(effect: E, driver: O) -> Self {
        Self::with_frame_duration(effect, driver, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(effect: E, driver: O, frame_duration: Duration) -> Self {
        Self {
            output: driver,
            buffer: vec![Rgb::default(); effect.led_count()],
            effect,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Advances the effect by one step
    /// 3. Writes the quantized frame to the output driver
    /// 4. Returns the deadline for the next frame
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Drift correction: if we've fallen too far behind, reset to now
        let max_drift = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift {
            if self.next_frame.as_millis() > 0 {
                log::warn!(
                    "frame scheduler behind by {}ms, skipping backlog",
                    now.as_millis() - self.next_frame.as_millis()
                );
            }
            self.next_frame = now;
        }

        let frame = self.effect.advance();
        let written = frame.write_rgb8(&mut self.buffer);
        self.output.write(&self.buffer[..written]);

        self.next_frame += self.frame_duration;

        let sleep_duration = if self.next_frame.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_frame.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Get a reference to the effect.
    pub fn effect(&self) -> &E {
        &self.effect
    }

    /// Get a reference to the output driver.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the output driver.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
