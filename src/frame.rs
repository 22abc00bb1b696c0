//! Frames: the discrete visual steps of a flip.
//!
//! A flip from one symbol to the next is split into two half-rotations:
//!
//! ```text
//!            top_delay          bottom_delay             end
//!  ──────────────┼──────────────────┼──────────────────────┼──────▶ t
//!   outgoing     │  top flap falls  │  bottom flap lands   │ incoming
//!   (both)       │  (outgoing)      │  (incoming)          │ (both)
//! ```
//!
//! While the top flap falls both halves still read the outgoing symbol and
//! the top half is marked as moving. Once it has passed the hinge it covers
//! the bottom half with the incoming symbol.
//!
//! Each half lasts `half_timing`, a quarter of the nominal per-symbol
//! timing. The terminal frame of a sequence settles 1.5× slower.

use std::time::Duration;

/// One visual step of a flip, or the static resting display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Symbol leaving the display.
    outgoing: String,
    /// Symbol arriving on the display.
    incoming: String,
    /// Offset from the animation start at which the top flap starts to fall.
    start_delay: Duration,
    /// Duration of one half-rotation.
    half_timing: Duration,
    /// Last frame of its sequence.
    terminal: bool,
    /// Resting display with no transition.
    is_static: bool,
}

/// Which half of a tile a moving flap covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlapHalf {
    /// The top flap is falling; both halves still show the outgoing symbol.
    Top,
    /// The bottom flap is landing, already showing the incoming symbol.
    Bottom,
}

/// What a frame shows at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlapFace<'a> {
    /// Symbol visible in the top half.
    pub top: &'a str,
    /// Symbol visible in the bottom half.
    pub bottom: &'a str,
    /// The moving flap, if a half-rotation is in progress.
    pub moving: Option<FlapHalf>,
}

impl Frame {
    /// Create the static frame showing `symbol`.
    pub fn settled(symbol: impl Into<String>, timing: Duration) -> Self {
        let symbol = symbol.into();
        Self {
            outgoing: symbol.clone(),
            incoming: symbol,
            start_delay: Duration::ZERO,
            half_timing: half_timing(timing),
            terminal: true,
            is_static: true,
        }
    }

    /// Symbol leaving the display.
    #[inline]
    pub fn outgoing(&self) -> &str {
        &self.outgoing
    }

    /// Symbol arriving on the display.
    #[inline]
    pub fn incoming(&self) -> &str {
        &self.incoming
    }

    /// Offset from the animation start at which this frame begins.
    #[inline]
    pub const fn start_delay(&self) -> Duration {
        self.start_delay
    }

    /// Duration of one half-rotation.
    #[inline]
    pub const fn half_timing(&self) -> Duration {
        self.half_timing
    }

    /// Whether this is the settling frame of its sequence.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Whether this frame is a resting display.
    #[inline]
    pub const fn is_static(&self) -> bool {
        self.is_static
    }

    /// Full transition time: both half-rotations.
    #[inline]
    pub fn duration(&self) -> Duration {
        if self.is_static {
            Duration::ZERO
        } else {
            self.half_timing.saturating_mul(2)
        }
    }

    /// Offset at which the transition completes.
    #[inline]
    pub fn end(&self) -> Duration {
        self.start_delay.saturating_add(self.duration())
    }

    /// Offset at which the top flap starts to fall.
    #[inline]
    pub const fn top_delay(&self) -> Duration {
        self.start_delay
    }

    /// Offset at which the bottom flap starts to land.
    #[inline]
    pub fn bottom_delay(&self) -> Duration {
        self.start_delay.saturating_add(self.half_timing)
    }

    /// What the frame shows `elapsed` after the animation start.
    pub fn face_at(&self, elapsed: Duration) -> FlapFace<'_> {
        if self.is_static || elapsed >= self.end() {
            return FlapFace {
                top: &self.incoming,
                bottom: &self.incoming,
                moving: None,
            };
        }
        if elapsed < self.top_delay() {
            return FlapFace {
                top: &self.outgoing,
                bottom: &self.outgoing,
                moving: None,
            };
        }
        if elapsed < self.bottom_delay() {
            FlapFace {
                top: &self.outgoing,
                bottom: &self.outgoing,
                moving: Some(FlapHalf::Top),
            }
        } else {
            FlapFace {
                top: &self.incoming,
                bottom: &self.incoming,
                moving: Some(FlapHalf::Bottom),
            }
        }
    }
}

/// Half-rotation time for a nominal per-symbol `timing`.
#[inline]
pub fn half_timing(timing: Duration) -> Duration {
    timing / 2 / 2
}

/// Half-rotation time of the settling frame: 1.5× the regular one.
#[inline]
pub fn settle_half_timing(timing: Duration) -> Duration {
    half_timing(timing).saturating_mul(3) / 2
}

/// Turn a symbol path into timed frames.
///
/// `path` is the starting symbol followed by the built sequence; each
/// consecutive pair becomes one frame. Frames play back to back, the first
/// one beginning at `group_delay`.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use flapboard::frame::materialize_frames;
///
/// let frames = materialize_frames(&[" ", "A", "Z"], Duration::from_millis(40), Duration::ZERO);
/// assert_eq!(frames.len(), 2);
/// assert_eq!(frames[1].start_delay(), Duration::from_millis(20));
/// assert_eq!(frames[1].half_timing(), Duration::from_millis(15));
/// ```
pub fn materialize_frames<S: AsRef<str>>(
    path: &[S],
    timing: Duration,
    group_delay: Duration,
) -> Vec<Frame> {
    let steps = path.len().saturating_sub(1);
    let mut frames = Vec::with_capacity(steps);
    let mut offset = group_delay;

    for (index, pair) in path.windows(2).enumerate() {
        let terminal = index + 1 == steps;
        let frame = Frame {
            outgoing: pair[0].as_ref().to_string(),
            incoming: pair[1].as_ref().to_string(),
            start_delay: offset,
            half_timing: if terminal {
                settle_half_timing(timing)
            } else {
                half_timing(timing)
            },
            terminal,
            is_static: false,
        };
        offset = frame.end();
        frames.push(frame);
    }

    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_settled_frame() {
        let frame = Frame::settled("Z", ms(120));
        assert!(frame.is_static());
        assert_eq!(frame.outgoing(), "Z");
        assert_eq!(frame.incoming(), "Z");
        assert_eq!(frame.half_timing(), ms(30));
        assert_eq!(frame.duration(), Duration::ZERO);
    }

    #[test]
    fn test_pairs_become_frames() {
        let frames = materialize_frames(&[" ", "A", "Z"], ms(120), Duration::ZERO);
        assert_eq!(frames.len(), 2);
        assert_eq!((frames[0].outgoing(), frames[0].incoming()), (" ", "A"));
        assert_eq!((frames[1].outgoing(), frames[1].incoming()), ("A", "Z"));
        assert!(!frames[0].is_terminal());
        assert!(frames[1].is_terminal());
    }

    #[test]
    fn test_terminal_frame_is_slower() {
        let frames = materialize_frames(&["0", "1", "2", "3"], ms(120), Duration::ZERO);
        assert_eq!(frames[0].half_timing(), ms(30));
        assert_eq!(frames[1].half_timing(), ms(30));
        assert_eq!(frames[2].half_timing(), ms(45));
    }

    #[test]
    fn test_start_delays_accumulate() {
        let frames = materialize_frames(&["0", "1", "2", "3"], ms(120), ms(100));
        assert_eq!(frames[0].start_delay(), ms(100));
        assert_eq!(frames[1].start_delay(), ms(160));
        assert_eq!(frames[2].start_delay(), ms(220));
        assert_eq!(frames[2].end(), ms(310));
    }

    #[test]
    fn test_single_step_is_terminal() {
        let frames = materialize_frames(&["A", "B"], ms(120), Duration::ZERO);
        assert_eq!(frames.len(), 1);
        assert!(frames[0].is_terminal());
        assert_eq!(frames[0].half_timing(), ms(45));
    }

    #[test]
    fn test_empty_path() {
        assert!(materialize_frames::<&str>(&[], ms(120), Duration::ZERO).is_empty());
        assert!(materialize_frames(&["A"], ms(120), Duration::ZERO).is_empty());
    }

    #[test]
    fn test_half_delays() {
        let frames = materialize_frames(&["A", "B", "C"], ms(120), ms(100));
        assert_eq!(frames[0].top_delay(), ms(100));
        assert_eq!(frames[0].bottom_delay(), ms(130));
    }

    #[test]
    fn test_face_phases() {
        let frames = materialize_frames(&["A", "B", "C"], ms(120), ms(10));
        let frame = &frames[0];

        let face = frame.face_at(ms(5));
        assert_eq!((face.top, face.bottom, face.moving), ("A", "A", None));

        let face = frame.face_at(ms(20));
        assert_eq!((face.top, face.bottom, face.moving), ("A", "A", Some(FlapHalf::Top)));

        // Last instant of the falling half still shows the outgoing flap.
        let face = frame.face_at(ms(39));
        assert_eq!((face.top, face.moving), ("A", Some(FlapHalf::Top)));

        let face = frame.face_at(ms(45));
        assert_eq!((face.top, face.bottom, face.moving), ("B", "B", Some(FlapHalf::Bottom)));

        let face = frame.face_at(ms(70));
        assert_eq!((face.top, face.bottom, face.moving), ("B", "B", None));
    }

    #[test]
    fn test_huge_delays_saturate() {
        let frames = materialize_frames(&["A", "B", "C"], Duration::MAX, Duration::MAX);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].end(), Duration::MAX);
        assert_eq!(frames[1].start_delay(), Duration::MAX);
        assert_eq!(frames[1].face_at(Duration::MAX).top, "C");
    }

    #[test]
    fn test_zero_timing_collapses() {
        let frames = materialize_frames(&["A", "B"], Duration::ZERO, Duration::ZERO);
        assert_eq!(frames[0].end(), Duration::ZERO);
        assert_eq!(frames[0].face_at(Duration::ZERO).top, "B");
    }
}
