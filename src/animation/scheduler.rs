//! Per-frame animation scheduler
//!
//! Animations are plain records advanced by one `tick` per frame. Nothing
//! captures state: callers read current values by target, and cancelling is
//! removing the record.

use super::easing::Easing;

/// Handle returned when scheduling
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

/// What an animation drives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationTarget {
    /// Uniform scale multiplier of a follower's tree
    TreeScale(usize),
    /// Glow burst radius at a follower's tree
    Glow(usize),
    /// Glow burst opacity at a follower's tree
    GlowOpacity(usize),
    /// Scale of a tree whose follower was removed, keyed by departure
    Departing(u64),
}

impl AnimationTarget {
    /// Follower index the target refers to, if it tracks a live follower
    pub fn follower_index(self) -> Option<usize> {
        match self {
            AnimationTarget::TreeScale(i)
            | AnimationTarget::Glow(i)
            | AnimationTarget::GlowOpacity(i) => Some(i),
            AnimationTarget::Departing(_) => None,
        }
    }

    fn with_index(self, index: usize) -> Self {
        match self {
            AnimationTarget::TreeScale(_) => AnimationTarget::TreeScale(index),
            AnimationTarget::Glow(_) => AnimationTarget::Glow(index),
            AnimationTarget::GlowOpacity(_) => AnimationTarget::GlowOpacity(index),
            departing @ AnimationTarget::Departing(_) => departing,
        }
    }
}

/// A single tween from `from` to `to`
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub id: AnimationId,
    pub target: AnimationTarget,
    /// Scheduler time at which the tween begins
    pub start_time: f32,
    pub duration: f32,
    pub easing: Easing,
    pub from: f32,
    pub to: f32,
}

impl Animation {
    /// Linear progress in [0, 1] at time `now`
    pub fn progress(&self, now: f32) -> f32 {
        if self.duration <= 0.0 {
            return if now >= self.start_time { 1.0 } else { 0.0 };
        }
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
    }

    /// Eased value at time `now`
    pub fn value(&self, now: f32) -> f32 {
        let t = self.easing.apply(self.progress(now));
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self, now: f32) -> bool {
        now >= self.start_time + self.duration.max(0.0)
    }
}

/// Tween description passed to [`Scheduler::schedule`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub easing: Easing,
    /// Seconds to wait before starting
    pub delay: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self { from, to, duration, easing, delay: 0.0 }
    }

    pub fn after(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }
}

/// Owns active animations and the animation clock
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: f32,
    next_id: u64,
    active: Vec<Animation>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current animation time in seconds
    pub fn now(&self) -> f32 {
        self.now
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn animations(&self) -> &[Animation] {
        &self.active
    }

    /// Add a tween for `target`
    pub fn schedule(&mut self, target: AnimationTarget, tween: Tween) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        self.active.push(Animation {
            id,
            target,
            start_time: self.now + tween.delay.max(0.0),
            duration: tween.duration,
            easing: tween.easing,
            from: tween.from,
            to: tween.to,
        });
        id
    }

    /// Advance the clock and drop finished animations, returning them in
    /// scheduling order.
    pub fn tick(&mut self, dt: f32) -> Vec<Animation> {
        if dt.is_finite() && dt > 0.0 {
            self.now += dt;
        }
        let now = self.now;
        let (finished, active): (Vec<_>, Vec<_>) =
            self.active.drain(..).partition(|a| a.is_finished(now));
        self.active = active;
        finished
    }

    pub fn cancel(&mut self, id: AnimationId) -> bool {
        let before = self.active.len();
        self.active.retain(|a| a.id != id);
        self.active.len() != before
    }

    /// Remove every animation driving `target`
    pub fn cancel_target(&mut self, target: AnimationTarget) -> usize {
        let before = self.active.len();
        self.active.retain(|a| a.target != target);
        before - self.active.len()
    }

    /// Keep only animations for which `keep` returns true
    pub fn retain(&mut self, keep: impl FnMut(&Animation) -> bool) {
        self.active.retain(keep);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Current value for a target. When several animations drive it, the
    /// most recently started one that has begun wins; if none has begun yet,
    /// the earliest pending one reports its `from` value.
    pub fn value(&self, target: AnimationTarget) -> Option<f32> {
        let now = self.now;
        let mut candidates = self.active.iter().filter(|a| a.target == target);
        let first = candidates.next()?;
        let best = std::iter::once(first)
            .chain(candidates)
            .filter(|a| a.start_time <= now)
            .max_by(|a, b| a.start_time.total_cmp(&b.start_time).then(a.id.cmp(&b.id)));
        Some(match best {
            Some(a) => a.value(now),
            None => first.value(now),
        })
    }

    /// Reindex follower targets after the follower at `removed` left the
    /// roster: its animations are dropped and later indices shift down.
    pub fn follower_removed(&mut self, removed: usize) {
        self.active.retain(|a| a.target.follower_index() != Some(removed));
        for a in &mut self.active {
            if let Some(index) = a.target.follower_index().filter(|&i| i > removed) {
                a.target = a.target.with_index(index - 1);
            }
        }
    }
}
