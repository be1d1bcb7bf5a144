use crate::{
    animation::ease::Ease,
    foundation::{
        color::Color,
        core::{Millis, Point},
    },
};

/// Interpolation contract for tweened value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Color {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// When a transition runs, relative to the story clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Clock time the transition was scheduled at.
    pub start: Millis,
    /// Wait before the value starts moving.
    pub delay_ms: u64,
    /// Time from first movement to arrival.
    pub duration_ms: u64,
    /// Progress curve.
    pub ease: Ease,
}

impl Timing {
    /// Transition starting at `start` with no delay and the default ease.
    pub fn new(start: Millis, duration_ms: u64) -> Self {
        Self {
            start,
            delay_ms: 0,
            duration_ms,
            ease: Ease::default(),
        }
    }

    /// Replace the delay.
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Replace the easing curve.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Clock time at which the value has arrived.
    pub fn end(&self) -> Millis {
        self.start.after(self.delay_ms).after(self.duration_ms)
    }

    /// Eased progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Millis) -> f64 {
        let elapsed = now.since(self.start) - self.delay_ms as f64;
        if elapsed <= 0.0 {
            return 0.0;
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        self.ease.apply(elapsed / self.duration_ms as f64)
    }

    /// Return `true` once the value has arrived.
    pub fn is_finished(&self, now: Millis) -> bool {
        now >= self.end()
    }
}

/// Per-element delayed transitions: element `i` starts `i * step_ms` after the first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stagger {
    /// Duration of each element's transition.
    pub duration_ms: u64,
    /// Extra delay per element index.
    pub step_ms: u64,
}

impl Stagger {
    /// Timing for the element at `index`.
    pub fn timing(self, start: Millis, index: usize) -> Timing {
        Timing::new(start, self.duration_ms).with_delay(self.step_ms.saturating_mul(index as u64))
    }
}

/// A property that may be moving between two values.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    timing: Option<Timing>,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    /// A property resting at `value`.
    pub fn fixed(value: T) -> Self {
        Self {
            from: value.clone(),
            to: value,
            timing: None,
        }
    }

    /// A property moving from `from` to `to`.
    pub fn animate(from: T, to: T, timing: Timing) -> Self {
        Self {
            from,
            to,
            timing: Some(timing),
        }
    }

    /// Value at `now`.
    pub fn sample(&self, now: Millis) -> T {
        match self.timing {
            None => self.to.clone(),
            Some(timing) if timing.is_finished(now) => self.to.clone(),
            Some(timing) => T::lerp(&self.from, &self.to, timing.progress(now)),
        }
    }

    /// Start moving from wherever the property is at `now` towards `to`.
    pub fn retarget(&mut self, now: Millis, to: T, timing: Timing) {
        self.from = self.sample(now);
        self.to = to;
        self.timing = Some(timing);
    }

    /// Current transition timing, if any.
    pub fn timing(&self) -> Option<Timing> {
        self.timing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_honours_delay_and_duration() {
        let t = Timing::new(Millis(100), 400)
            .with_delay(10)
            .with_ease(Ease::Linear);
        assert_eq!(t.progress(Millis(50)), 0.0);
        assert_eq!(t.progress(Millis(110)), 0.0);
        assert_eq!(t.progress(Millis(310)), 0.5);
        assert_eq!(t.progress(Millis(510)), 1.0);
        assert_eq!(t.end(), Millis(510));
        assert!(!t.is_finished(Millis(509)));
        assert!(t.is_finished(Millis(510)));
    }

    #[test]
    fn zero_duration_jumps_after_delay() {
        let t = Timing::new(Millis(0), 0).with_delay(5);
        assert_eq!(t.progress(Millis(4)), 0.0);
        assert_eq!(t.progress(Millis(6)), 1.0);
    }

    #[test]
    fn stagger_offsets_by_index() {
        let s = Stagger {
            duration_ms: 400,
            step_ms: 5,
        };
        assert_eq!(s.timing(Millis(0), 0).delay_ms, 0);
        assert_eq!(s.timing(Millis(0), 3).delay_ms, 15);
        assert_eq!(s.timing(Millis(0), 3).end(), Millis(415));
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let mut tw = Tween::animate(
            0.0,
            10.0,
            Timing::new(Millis(0), 100).with_ease(Ease::Linear),
        );
        assert_eq!(tw.sample(Millis(50)), 5.0);

        tw.retarget(
            Millis(50),
            0.0,
            Timing::new(Millis(50), 100).with_ease(Ease::Linear),
        );
        assert_eq!(tw.sample(Millis(50)), 5.0);
        assert_eq!(tw.sample(Millis(100)), 2.5);
        assert_eq!(tw.sample(Millis(1000)), 0.0);
    }

    #[test]
    fn color_lerp_is_channelwise() {
        let c = Color::lerp(&Color::BLACK, &Color::WHITE, 0.5);
        assert_eq!(c, Color::rgb(128, 128, 128));
    }
}
