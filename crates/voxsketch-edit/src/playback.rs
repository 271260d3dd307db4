//! Frame playback — a three-state player over a resizable frame sequence.
//!
//! [`Playback`] owns no clock. The host loop reports elapsed time through
//! [`update`](Playback::update); whole frame periods are consumed from an
//! accumulator, so one large tick can advance several frames and playback
//! stays time-accurate instead of dropping time.

/// Builds a new frame when the sequence grows.
///
/// Implemented for every `FnMut() -> F`.
pub trait FrameFactory<F> {
    fn make_frame(&mut self) -> F;
}

impl<F, C> FrameFactory<F> for C
where
    C: FnMut() -> F,
{
    #[inline]
    fn make_frame(&mut self) -> F {
        self()
    }
}

// ---------------------------------------------------------------------------
// State & configuration
// ---------------------------------------------------------------------------

/// Playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PlayState {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Configuration for creating a [`Playback`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlaybackConfig {
    /// Frames per second. Must be finite and positive.
    pub frame_rate: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { frame_rate: 1.0 }
    }
}

/// Errors returned by [`Playback`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum PlaybackError {
    /// A frame index past the end of the sequence.
    #[error("frame {index} is out of range for {len} frames")]
    IndexOutOfRange { index: usize, len: usize },
    /// The operation needs at least one frame.
    #[error("playback has no frames")]
    Empty,
    /// A frame rate that is zero, negative, or not finite.
    #[error("invalid frame rate {0}")]
    InvalidFrameRate(f64),
}

fn check_frame_rate(fps: f64) -> Result<f64, PlaybackError> {
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err(PlaybackError::InvalidFrameRate(fps))
    }
}

// ---------------------------------------------------------------------------
// Playback
// ---------------------------------------------------------------------------

/// A frame sequence with an idle/playing/paused state machine.
///
/// The current index is always within `[0, len - 1]` while there are
/// frames, and `0` otherwise.
pub struct Playback<F> {
    frames: Vec<F>,
    current: usize,
    frame_rate: f64,
    state: PlayState,
    /// Elapsed seconds not yet consumed by a frame advance.
    accumulator: f64,
    factory: Box<dyn FrameFactory<F>>,
}

impl<F> Playback<F> {
    /// Create an empty, idle playback. `factory` builds frames when the
    /// sequence grows through [`set_len`](Self::set_len).
    pub fn new<C>(config: PlaybackConfig, factory: C) -> Result<Self, PlaybackError>
    where
        C: FrameFactory<F> + 'static,
    {
        let frame_rate = check_frame_rate(config.frame_rate)?;
        Ok(Self::with_rate(frame_rate, Box::new(factory)))
    }

    /// Create an empty, idle playback at the default frame rate.
    pub fn with_factory<C>(factory: C) -> Self
    where
        C: FrameFactory<F> + 'static,
    {
        Self::with_rate(PlaybackConfig::default().frame_rate, Box::new(factory))
    }

    // `frame_rate` must already be validated.
    fn with_rate(frame_rate: f64, factory: Box<dyn FrameFactory<F>>) -> Self {
        Self {
            frames: Vec::new(),
            current: 0,
            frame_rate,
            state: PlayState::Idle,
            accumulator: 0.0,
            factory,
        }
    }

    // --- state machine ---

    /// Start (or resume) playing.
    pub fn play(&mut self) {
        self.transition(PlayState::Playing);
    }

    /// Pause, keeping the current frame and any partial frame time.
    pub fn pause(&mut self) {
        self.transition(PlayState::Paused);
    }

    /// Stop and rewind to the first frame.
    pub fn stop(&mut self) {
        self.transition(PlayState::Idle);
        self.current = 0;
        self.accumulator = 0.0;
    }

    fn transition(&mut self, to: PlayState) {
        if self.state != to {
            log::trace!("playback {:?} -> {:?}", self.state, to);
        }
        self.state = to;
    }

    /// Advance playback by `delta_ms` milliseconds of host time.
    ///
    /// Does nothing unless playing. Every full frame period in the
    /// accumulator advances the current frame by one, wrapping at the end,
    /// and the remainder stays in `[0, 1 / frame_rate)`. Returns the number
    /// of frames advanced, saturating at `usize::MAX`. With no frames this
    /// is a no-op. Negative or non-finite deltas are ignored.
    pub fn update(&mut self, delta_ms: f64) -> usize {
        if self.state != PlayState::Playing || self.frames.is_empty() {
            return 0;
        }
        if !delta_ms.is_finite() || delta_ms < 0.0 {
            log::warn!("ignoring playback delta of {delta_ms} ms");
            return 0;
        }
        self.accumulator += delta_ms / 1000.0;
        let frame_time = 1.0 / self.frame_rate;

        // Whole periods are consumed at once so huge deltas cost O(1).
        let mut periods = (self.accumulator / frame_time).floor();
        let mut rest = self.accumulator - periods * frame_time;
        if rest >= frame_time {
            // Division rounded down by one period.
            periods += 1.0;
            rest -= frame_time;
        }
        self.accumulator = if (0.0..frame_time).contains(&rest) { rest } else { 0.0 };

        let len = self.frames.len();
        let shift = (periods % len as f64) as usize;
        self.current = (self.current + shift) % len;
        periods as usize
    }

    /// Jump to `index`, clamped into the sequence. Works in every state.
    pub fn scrub(&mut self, index: usize) {
        self.current = index.min(self.frames.len().saturating_sub(1));
    }

    /// Move `offset` frames forward (or backward when negative), wrapping
    /// around the sequence. Works in every state.
    pub fn step(&mut self, offset: isize) {
        let len = self.frames.len();
        if len == 0 {
            return;
        }
        let shift = offset.rem_euclid(len as isize) as usize;
        self.current = (self.current + shift) % len;
    }

    /// Grow or shrink the sequence to `n` frames.
    ///
    /// Growing calls the frame factory once per new slot, in order; existing
    /// frames are untouched. Shrinking drops frames from the end. The
    /// current index is clamped afterwards.
    pub fn set_len(&mut self, n: usize) {
        let old = self.frames.len();
        if n > old {
            self.frames.reserve(n - old);
            for _ in old..n {
                self.frames.push(self.factory.make_frame());
            }
        } else {
            self.frames.truncate(n);
        }
        self.scrub(self.current);
        log::debug!("playback resized from {old} to {n} frames");
    }

    // --- frame access ---

    fn check_index(&self, index: usize) -> Result<(), PlaybackError> {
        if index < self.frames.len() {
            Ok(())
        } else {
            Err(PlaybackError::IndexOutOfRange {
                index,
                len: self.frames.len(),
            })
        }
    }

    /// The frame at `index`.
    pub fn frame(&self, index: usize) -> Result<&F, PlaybackError> {
        self.check_index(index)?;
        Ok(&self.frames[index])
    }

    /// Mutable access to the frame at `index`.
    pub fn frame_mut(&mut self, index: usize) -> Result<&mut F, PlaybackError> {
        self.check_index(index)?;
        Ok(&mut self.frames[index])
    }

    /// Replace the frame at `index`, returning the previous one.
    pub fn set_frame(&mut self, index: usize, frame: F) -> Result<F, PlaybackError> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.frames[index], frame))
    }

    /// The frame at the current index.
    pub fn current_frame(&self) -> Result<&F, PlaybackError> {
        self.frames.get(self.current).ok_or(PlaybackError::Empty)
    }

    /// All frames in order.
    #[inline]
    pub fn frames(&self) -> &[F] {
        &self.frames
    }

    // --- accessors ---

    #[inline]
    pub fn state(&self) -> PlayState {
        self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames per second.
    #[inline]
    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Change the frame rate. Partial frame time already accumulated is
    /// kept and measured against the new period on the next update.
    pub fn set_frame_rate(&mut self, fps: f64) -> Result<(), PlaybackError> {
        self.frame_rate = check_frame_rate(fps)?;
        Ok(())
    }

    /// Seconds accumulated towards the next frame advance.
    #[inline]
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }
}

impl<F: std::fmt::Debug> std::fmt::Debug for Playback<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Playback")
            .field("frames", &self.frames)
            .field("current", &self.current)
            .field("frame_rate", &self.frame_rate)
            .field("state", &self.state)
            .field("accumulator", &self.accumulator)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// A playback whose frames are numbered by creation order.
    fn numbered(fps: f64, len: usize) -> Playback<u32> {
        let mut next = 0;
        let mut p = Playback::new(PlaybackConfig { frame_rate: fps }, move || {
            next += 1;
            next - 1
        })
        .unwrap();
        p.set_len(len);
        p
    }

    #[test]
    fn starts_idle_and_empty() {
        let p = Playback::with_factory(|| ());
        assert_eq!(p.state(), PlayState::Idle);
        assert!(p.is_empty());
        assert_eq!(p.current_index(), 0);
        assert_eq!(p.frame_rate(), 1.0);
        assert_eq!(p.current_frame(), Err(PlaybackError::Empty));
    }

    #[test]
    fn constructors_agree_on_defaults() {
        let mut a = Playback::new(PlaybackConfig::default(), || 'x').unwrap();
        let mut b = Playback::with_factory(|| 'x');
        assert_eq!(format!("{a:?}"), format!("{b:?}"));
        a.set_len(2);
        b.set_len(2);
        assert_eq!(a.frames(), b.frames());
    }

    #[test]
    fn large_tick_advances_several_frames() {
        let mut p = numbered(2.0, 4);
        p.play();
        assert_eq!(p.update(1000.0), 2);
        assert_eq!(p.current_index(), 2);
        assert!(p.accumulator().abs() < 1e-9);
    }

    #[test]
    fn partial_ticks_accumulate() {
        let mut p = numbered(4.0, 3);
        p.play();
        assert_eq!(p.update(100.0), 0);
        assert_eq!(p.update(100.0), 0);
        assert_eq!(p.update(100.0), 1);
        assert_eq!(p.current_index(), 1);
        assert!((p.accumulator() - 0.05).abs() < 1e-9);
    }

    #[test]
    fn playback_wraps_around() {
        let mut p = numbered(1.0, 3);
        p.play();
        p.update(4000.0);
        assert_eq!(p.current_index(), 1);
        assert_eq!(p.current_frame(), Ok(&1));
    }

    #[test]
    fn update_ignored_unless_playing() {
        let mut p = numbered(10.0, 4);
        assert_eq!(p.update(1000.0), 0);
        assert_eq!(p.current_index(), 0);
        assert_eq!(p.accumulator(), 0.0);

        p.play();
        p.update(150.0);
        p.pause();
        assert_eq!(p.update(1000.0), 0);
        assert_eq!(p.current_index(), 1);
        // Partial time survives a pause.
        assert!((p.accumulator() - 0.05).abs() < 1e-9);
    }

    #[test]
    fn update_with_no_frames_is_a_no_op() {
        let mut p = numbered(30.0, 0);
        p.play();
        assert_eq!(p.update(5000.0), 0);
        assert_eq!(p.current_index(), 0);
        assert_eq!(p.accumulator(), 0.0);
        assert!(p.is_playing());
    }

    #[test]
    fn bad_deltas_are_ignored() {
        let mut p = numbered(1.0, 2);
        p.play();
        assert_eq!(p.update(-500.0), 0);
        assert_eq!(p.update(f64::NAN), 0);
        assert_eq!(p.update(f64::INFINITY), 0);
        assert_eq!(p.accumulator(), 0.0);
    }

    #[test]
    fn huge_tick_returns_promptly() {
        let mut p = Playback::with_factory(|| 0u8);
        p.set_len(3);
        p.play();
        assert_eq!(p.update(1e30), usize::MAX);
        assert!(p.current_index() < 3);
        let frame_time = 1.0 / p.frame_rate();
        assert!((0.0..frame_time).contains(&p.accumulator()));

        // Still usable afterwards.
        p.scrub(0);
        assert_eq!(p.update(1000.0), 1);
        assert_eq!(p.current_index(), 1);
    }

    #[test]
    fn one_long_tick_matches_many_short_ones() {
        let mut short = numbered(4.0, 7);
        let mut long = numbered(4.0, 7);
        short.play();
        long.play();
        let stepped: usize = (0..40).map(|_| short.update(250.0)).sum();
        assert_eq!(stepped, 40);
        assert_eq!(long.update(10_000.0), 40);
        assert_eq!(long.current_index(), short.current_index());
        assert_eq!(long.current_index(), 5);
        assert_eq!(long.accumulator(), 0.0);
    }

    #[test]
    fn stop_rewinds_from_any_state() {
        let mut p = numbered(1.0, 4);
        p.play();
        p.update(2500.0);
        assert_eq!(p.current_index(), 2);
        p.stop();
        assert_eq!(p.state(), PlayState::Idle);
        assert_eq!(p.current_index(), 0);
        assert_eq!(p.accumulator(), 0.0);

        p.scrub(3);
        p.pause();
        p.stop();
        assert_eq!(p.state(), PlayState::Idle);
        assert_eq!(p.current_index(), 0);
    }

    #[test]
    fn transitions_from_any_state() {
        let mut p = numbered(1.0, 1);
        p.pause();
        assert_eq!(p.state(), PlayState::Paused);
        p.play();
        assert_eq!(p.state(), PlayState::Playing);
        p.play();
        assert_eq!(p.state(), PlayState::Playing);
        p.stop();
        p.play();
        assert!(p.is_playing());
    }

    #[test]
    fn scrub_clamps() {
        let mut p = numbered(1.0, 5);
        p.scrub(3);
        assert_eq!(p.current_index(), 3);
        p.scrub(99);
        assert_eq!(p.current_index(), 4);
        p.play();
        p.scrub(1);
        assert_eq!(p.current_index(), 1);

        let mut empty = numbered(1.0, 0);
        empty.scrub(7);
        assert_eq!(empty.current_index(), 0);
    }

    #[test]
    fn step_wraps_both_ways() {
        let mut p = numbered(1.0, 4);
        p.step(1);
        assert_eq!(p.current_index(), 1);
        p.step(-2);
        assert_eq!(p.current_index(), 3);
        p.step(9);
        assert_eq!(p.current_index(), 0);

        let mut empty = numbered(1.0, 0);
        empty.step(-1);
        assert_eq!(empty.current_index(), 0);
    }

    #[test]
    fn grow_calls_factory_once_per_new_frame() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut p = Playback::with_factory(move || {
            counter.set(counter.get() + 1);
            counter.get()
        });
        p.set_len(2);
        assert_eq!(calls.get(), 2);
        p.set_frame(0, 100).unwrap();

        p.set_len(5);
        assert_eq!(calls.get(), 5);
        assert_eq!(p.frames(), &[100, 2, 3, 4, 5]);
    }

    #[test]
    fn shrink_truncates_and_clamps_index() {
        let mut p = numbered(1.0, 5);
        p.scrub(4);
        p.set_len(2);
        assert_eq!(p.frames(), &[0, 1]);
        assert_eq!(p.current_index(), 1);

        p.set_len(0);
        assert!(p.is_empty());
        assert_eq!(p.current_index(), 0);
        assert_eq!(p.current_frame(), Err(PlaybackError::Empty));
    }

    #[test]
    fn shrink_keeps_index_in_range() {
        let mut p = numbered(1.0, 5);
        p.scrub(1);
        p.set_len(3);
        assert_eq!(p.current_index(), 1);
    }

    #[test]
    fn frame_access_is_bounds_checked() {
        let mut p = numbered(1.0, 3);
        assert_eq!(p.frame(2), Ok(&2));
        assert_eq!(
            p.frame(3),
            Err(PlaybackError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(p.set_frame(1, 42), Ok(1));
        assert_eq!(p.frame(1), Ok(&42));
        assert!(p.set_frame(3, 0).is_err());
        assert_eq!(p.frames(), &[0, 42, 2]);

        *p.frame_mut(0).unwrap() = 7;
        assert_eq!(p.frame(0), Ok(&7));
        assert!(p.frame_mut(10).is_err());
    }

    #[test]
    fn frame_rate_is_validated() {
        assert!(matches!(
            Playback::new(PlaybackConfig { frame_rate: 0.0 }, || 0),
            Err(PlaybackError::InvalidFrameRate(_))
        ));
        let mut p = numbered(12.0, 1);
        assert!(p.set_frame_rate(-1.0).is_err());
        assert!(p.set_frame_rate(f64::NAN).is_err());
        assert_eq!(p.frame_rate(), 12.0);
        p.set_frame_rate(24.0).unwrap();
        assert_eq!(p.frame_rate(), 24.0);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            PlaybackError::IndexOutOfRange { index: 4, len: 2 }.to_string(),
            "frame 4 is out of range for 2 frames"
        );
        assert_eq!(PlaybackError::Empty.to_string(), "playback has no frames");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_state_and_config() {
        assert_eq!(
            serde_json::to_string(&PlayState::Playing).unwrap(),
            r#""playing""#
        );
        let cfg: PlaybackConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, PlaybackConfig::default());
    }
}
