//! # Typewriter
//!
//! The incremental reveal of the latest bot message, one character per tick.
//!
//! Exactly one reveal can be active at a time, and it can only target the
//! current latest bot message; `sync()` retargets (and restarts from zero)
//! whenever that message's identity, content, or loading flag changes, so a
//! stale reveal can never write into a superseded message. A finished
//! target is kept until the latest message changes; otherwise every
//! `sync()` after completion would start the animation over. The reveal is
//! driven by the render loop rather than a detached timer task; dropping the
//! `Typewriter` with its owning `TuiState` is teardown.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use crate::core::chat::MessageId;

/// Fixed interval between revealed characters.
pub const TYPING_TICK: Duration = Duration::from_millis(30);

#[derive(Debug, Clone, Copy, PartialEq)]
struct RevealTarget {
    id: MessageId,
    /// Hash of the content; detects in-place replacement under the same id.
    fingerprint: u64,
    total_chars: usize,
    revealed: usize,
    /// While the message is still loading nothing is revealed; the cell
    /// shows the thinking indicator instead.
    loading: bool,
    last_tick: Instant,
}

impl RevealTarget {
    fn done(&self) -> bool {
        self.revealed >= self.total_chars
    }
}

fn fingerprint(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

#[derive(Debug, Default)]
pub struct Typewriter {
    target: Option<RevealTarget>,
}

impl Typewriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the typewriter at the current latest bot message
    /// (`(id, content, is_loading)`), restarting the reveal from empty if
    /// anything about it changed. Call once per loop iteration before
    /// [`advance`](Self::advance).
    pub fn sync(&mut self, latest: Option<(MessageId, &str, bool)>, now: Instant) {
        let Some((id, content, loading)) = latest else {
            self.target = None;
            return;
        };

        let fp = fingerprint(content);
        if let Some(t) = &self.target
            && t.id == id
            && t.fingerprint == fp
            && t.loading == loading
        {
            return; // same message, same content; keep (or stay done)
        }

        self.target = Some(RevealTarget {
            id,
            fingerprint: fp,
            total_chars: content.chars().count(),
            revealed: 0,
            loading,
            last_tick: now,
        });
    }

    /// Reveal as many characters as full elapsed ticks allow. Returns true
    /// if anything changed (the caller schedules a redraw).
    pub fn advance(&mut self, now: Instant) -> bool {
        let Some(t) = &mut self.target else {
            return false;
        };
        if t.loading || t.done() {
            return false;
        }

        let elapsed = now.duration_since(t.last_tick);
        let ticks = (elapsed.as_millis() / TYPING_TICK.as_millis()) as usize;
        if ticks == 0 {
            return false;
        }

        t.revealed = (t.revealed + ticks).min(t.total_chars);
        t.last_tick += TYPING_TICK * ticks as u32;
        true
    }

    /// How many characters of message `id` to display, or `None` to display
    /// the full content. Only the in-progress target is ever limited.
    pub fn visible_chars(&self, id: MessageId) -> Option<usize> {
        match &self.target {
            Some(t) if t.id == id && !t.loading && !t.done() => Some(t.revealed),
            _ => None,
        }
    }

    /// True while a reveal is mid-flight (the loop polls fast to keep the
    /// animation smooth).
    pub fn is_animating(&self) -> bool {
        self.target.as_ref().is_some_and(|t| !t.loading && !t.done())
    }
}
