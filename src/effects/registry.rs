use std::collections::HashMap;
use std::fmt;

use super::interaction::ReducedMotion;
use super::ElementId;

/// Whether time-based animations should advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Running,
    Paused,
}

type Animation<C> = Box<dyn FnMut(&mut C) + Send>;

struct Entry<C> {
    element: ElementId,
    animation: Animation<C>,
}

/// Named animations that can be triggered on demand, plus the page-wide
/// play state. `C` is whatever the callbacks mutate.
pub struct AnimationRegistry<C> {
    entries: HashMap<String, Entry<C>>,
    motion: ReducedMotion,
    state: PlayState,
}

impl<C> AnimationRegistry<C> {
    pub fn new(motion: ReducedMotion) -> Self {
        Self {
            entries: HashMap::new(),
            motion,
            state: PlayState::Running,
        }
    }

    /// Register `animation` under `name`, replacing any previous entry
    pub fn add<F>(&mut self, name: impl Into<String>, element: impl Into<ElementId>, animation: F)
    where
        F: FnMut(&mut C) + Send + 'static,
    {
        self.entries.insert(
            name.into(),
            Entry {
                element: element.into(),
                animation: Box::new(animation),
            },
        );
    }

    /// Run the named animation against `ctx`. Returns false when the name is
    /// unknown or reduced motion is set.
    pub fn play(&mut self, name: &str, ctx: &mut C) -> bool {
        if self.motion.is_reduced() {
            return false;
        }
        match self.entries.get_mut(name) {
            Some(entry) => {
                (entry.animation)(ctx);
                true
            }
            None => false,
        }
    }

    pub fn pause_all(&mut self) {
        self.state = PlayState::Paused;
    }

    pub fn resume_all(&mut self) {
        self.state = PlayState::Running;
    }

    pub fn play_state(&self) -> PlayState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == PlayState::Paused
    }

    pub fn element(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|e| e.element.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C> fmt::Debug for AnimationRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("AnimationRegistry")
            .field("animations", &names)
            .field("motion", &self.motion)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_runs_named_callback() {
        let mut registry = AnimationRegistry::<Vec<&'static str>>::new(ReducedMotion::new(false));
        registry.add("pulse", "cta-button", |log: &mut Vec<&'static str>| log.push("pulse"));

        let mut log = Vec::new();
        assert!(registry.play("pulse", &mut log));
        assert!(registry.play("pulse", &mut log));
        assert_eq!(log, vec!["pulse", "pulse"]);
        assert_eq!(registry.element("pulse"), Some("cta-button"));
    }

    #[test]
    fn unknown_name_is_ignored() {
        let mut registry = AnimationRegistry::<u32>::new(ReducedMotion::new(false));
        let mut count = 0;
        assert!(!registry.play("missing", &mut count));
        assert_eq!(count, 0);
    }

    #[test]
    fn later_add_replaces_earlier() {
        let mut registry = AnimationRegistry::<u32>::new(ReducedMotion::new(false));
        registry.add("grow", "a", |n: &mut u32| *n += 1);
        registry.add("grow", "b", |n: &mut u32| *n += 10);

        let mut n = 0;
        registry.play("grow", &mut n);
        assert_eq!(n, 10);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.element("grow"), Some("b"));
    }

    #[test]
    fn reduced_motion_blocks_play() {
        let mut registry = AnimationRegistry::<u32>::new(ReducedMotion::new(true));
        registry.add("grow", "a", |n: &mut u32| *n += 1);

        let mut n = 0;
        assert!(!registry.play("grow", &mut n));
        assert_eq!(n, 0);
    }

    #[test]
    fn pause_and_resume_toggle_state() {
        let mut registry = AnimationRegistry::<()>::new(ReducedMotion::default());
        assert_eq!(registry.play_state(), PlayState::Running);
        registry.pause_all();
        assert!(registry.is_paused());
        registry.pause_all();
        registry.resume_all();
        assert_eq!(registry.play_state(), PlayState::Running);
    }

    #[test]
    fn callbacks_keep_their_own_state() {
        let mut registry = AnimationRegistry::<Vec<u32>>::new(ReducedMotion::default());
        let mut calls = 0;
        registry.add("count", "stats", move |out: &mut Vec<u32>| {
            calls += 1;
            out.push(calls);
        });

        let mut out = Vec::new();
        registry.play("count", &mut out);
        registry.play("count", &mut out);
        assert_eq!(out, vec![1, 2]);
    }
}
