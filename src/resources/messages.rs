//! Flavor text shown to the player.
//!
//! [`MessageQueue`] keeps the few most recent lines on screen. It never
//! expires anything by itself: each push is paired with a one-shot
//! [`Timer`](crate::components::timer::Timer) carrying
//! [`TimerAction::ExpireMessage`](crate::components::timer::TimerAction::ExpireMessage),
//! and the session removes the line by value when that timer fires.

use arrayvec::ArrayVec;
use fastrand::Rng;
use serde::Serialize;

/// Maximum number of lines kept on screen.
pub const MESSAGE_CAPACITY: usize = 5;

pub const INTRO_MESSAGE: &str = "Find the exit before they find you...";
pub const FLASHLIGHT_DIED_MESSAGE: &str = "Flashlight died...";
pub const GHOST_APPROACHES_MESSAGE: &str = "Something approaches...";
pub const MIND_SHATTERED_MESSAGE: &str = "Your mind shattered...";

/// Lines picked at random by [`random_ambient_message`].
pub const AMBIENT_MESSAGES: [&str; 8] = [
    "You hear footsteps behind you...",
    "Something moved in the shadows...",
    "A distant scream echoes...",
    "The walls seem to breathe...",
    "You feel watched...",
    "Whispers surround you...",
    "The air grows cold...",
    "Something scratches nearby...",
];

/// Pick one ambient line uniformly at random.
pub fn random_ambient_message(rng: &mut Rng) -> &'static str {
    AMBIENT_MESSAGES[rng.usize(..AMBIENT_MESSAGES.len())]
}

/// Ordered, capped list of on-screen messages. Oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageQueue {
    lines: ArrayVec<String, MESSAGE_CAPACITY>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `msg`, dropping the oldest line when the queue is full.
    pub fn push(&mut self, msg: impl Into<String>) {
        if self.lines.is_full() {
            self.lines.remove(0);
        }
        self.lines.push(msg.into());
    }

    /// Remove the first line equal to `msg`. Returns whether one was removed.
    pub fn remove_first(&mut self, msg: &str) -> bool {
        match self.lines.iter().position(|line| line == msg) {
            Some(index) => {
                self.lines.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, msg: &str) -> bool {
        self.lines.iter().any(|line| line == msg)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_insertion_order() {
        let mut q = MessageQueue::new();
        q.push("a");
        q.push("b");
        q.push("c");
        assert_eq!(q.iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn push_caps_to_five_most_recent() {
        let mut q = MessageQueue::new();
        for i in 0..8 {
            q.push(format!("line {i}"));
        }
        assert_eq!(q.len(), MESSAGE_CAPACITY);
        assert_eq!(
            q.iter().collect::<Vec<_>>(),
            vec!["line 3", "line 4", "line 5", "line 6", "line 7"]
        );
    }

    #[test]
    fn remove_first_matches_by_value() {
        let mut q = MessageQueue::new();
        q.push("dup");
        q.push("other");
        q.push("dup");
        assert!(q.remove_first("dup"));
        assert_eq!(q.iter().collect::<Vec<_>>(), vec!["other", "dup"]);
        assert!(!q.remove_first("missing"));
    }

    #[test]
    fn ambient_message_comes_from_fixed_set() {
        let mut rng = Rng::with_seed(7);
        for _ in 0..64 {
            let msg = random_ambient_message(&mut rng);
            assert!(AMBIENT_MESSAGES.contains(&msg));
        }
    }

    #[test]
    fn snapshot_serializes_as_plain_list() {
        let mut q = MessageQueue::new();
        q.push("hello");
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(json, r#"["hello"]"#);
    }
}
