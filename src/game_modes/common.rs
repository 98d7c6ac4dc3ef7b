//! Helpers shared by the interactive game mode

use std::time::{Duration, Instant};

/// Duration of one frame at `fps` frames per second (a zero rate is treated as 1)
pub fn frame_duration(fps: u64) -> Duration {
    Duration::from_millis(1000 / fps.max(1))
}

/// Apply frame rate limiting to maintain consistent game speed.
///
/// Call at the end of each loop iteration; sleeps for whatever is left of
/// `frame` since `frame_start`.
///
/// # Example
/// ```rust,no_run
/// use std::time::Instant;
/// # use neat_pong::game_modes::common::{frame_duration, limit_frame_rate};
/// let frame_start = Instant::now();
/// // ... game loop logic ...
/// limit_frame_rate(frame_start, frame_duration(60));
/// ```
pub fn limit_frame_rate(frame_start: Instant, frame: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame {
        std::thread::sleep(frame - elapsed);
    }
}
