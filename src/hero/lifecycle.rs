//! Listener subscriptions owned by the hero section.
//!
//! The page only routes an input kind to the hero while a listener for it is
//! registered. The hero section acquires its listeners on mount and releases
//! every one of them on unmount, so a remount never fires handlers twice.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Wheel,
    TouchStart,
    TouchMove,
    TouchEnd,
    Scroll,
}

impl ListenerKind {
    /// Every kind the hero section listens to.
    pub const HERO: [ListenerKind; 5] = [
        ListenerKind::Wheel,
        ListenerKind::TouchStart,
        ListenerKind::TouchMove,
        ListenerKind::TouchEnd,
        ListenerKind::Scroll,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct ListenerRegistry {
    active: Vec<(ListenerId, ListenerKind)>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.active.push((id, kind));
        log::trace!("listener {id} added for {kind:?}");
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.active.len();
        self.active.retain(|(active, _)| *active != id);
        before != self.active.len()
    }

    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.active.iter().any(|(_, k)| *k == kind)
    }

    pub fn count(&self, kind: ListenerKind) -> usize {
        self.active.iter().filter(|(_, k)| *k == kind).count()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// The set of listeners one owner holds. Must be handed back with
/// [`Subscriptions::release`] before it is dropped.
#[derive(Debug, Default)]
pub struct Subscriptions {
    ids: Vec<ListenerId>,
}

impl Subscriptions {
    pub fn acquire(registry: &mut ListenerRegistry, kinds: &[ListenerKind]) -> Self {
        Self {
            ids: kinds.iter().map(|kind| registry.add(*kind)).collect(),
        }
    }

    pub fn release(mut self, registry: &mut ListenerRegistry) {
        for id in self.ids.drain(..) {
            if !registry.remove(id) {
                log::warn!("listener {id} was already removed");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        if !self.ids.is_empty() {
            log::warn!(
                "{} listener(s) dropped without being released",
                self.ids.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_and_release_are_paired() {
        let mut registry = ListenerRegistry::new();
        let subs = Subscriptions::acquire(&mut registry, &ListenerKind::HERO);
        assert_eq!(subs.len(), 5);
        assert!(registry.is_listening(ListenerKind::Wheel));

        subs.release(&mut registry);
        assert!(registry.is_empty());
        assert!(!registry.is_listening(ListenerKind::Scroll));
    }

    #[test]
    fn test_release_leaves_other_owners_alone() {
        let mut registry = ListenerRegistry::new();
        let other = registry.add(ListenerKind::Scroll);
        let subs = Subscriptions::acquire(&mut registry, &ListenerKind::HERO);
        assert_eq!(registry.count(ListenerKind::Scroll), 2);

        subs.release(&mut registry);
        assert_eq!(registry.count(ListenerKind::Scroll), 1);
        assert!(registry.remove(other));
        assert!(!registry.remove(other));
    }
}
