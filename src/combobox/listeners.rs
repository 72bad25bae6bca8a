//! Host-wide listener registry for pointer and keyboard events.
//!
//! Widgets register handlers for events that happen anywhere on screen (a click
//! outside the widget, an escape key press). Each registration is tied to a
//! [`ListenerRegistration`] guard and removed from the registry when the guard
//! is dropped.

use crossterm::event::KeyCode;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};

/// Event delivered to global listeners.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GlobalEvent {
    Key(KeyCode),
    MouseDown { column: u16, row: u16 },
}

impl GlobalEvent {
    pub fn kind(&self) -> ListenerKind {
        match self {
            Self::Key(_) => ListenerKind::KeyDown,
            Self::MouseDown { .. } => ListenerKind::PointerDown,
        }
    }
}

/// Class of events a listener subscribes to.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ListenerKind {
    KeyDown,
    PointerDown,
}

/// Opaque identifier of a registered listener.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ListenerId(u64);

type Handler = Rc<RefCell<dyn FnMut(&GlobalEvent)>>;

struct Entry {
    id: ListenerId,
    kind: ListenerKind,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Registry {
    fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }
}

/// Shared registry of global listeners. Cloning yields another handle to the
/// same registry.
#[derive(Clone, Default)]
pub struct GlobalListeners {
    registry: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for GlobalListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalListeners")
            .field("listeners", &self.len())
            .finish()
    }
}

impl GlobalListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for events of `kind`. The handler stays registered
    /// until the returned guard is dropped.
    #[must_use = "dropping the registration removes the listener immediately"]
    pub fn register<F>(&self, kind: ListenerKind, handler: F) -> ListenerRegistration
    where
        F: FnMut(&GlobalEvent) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;

        let handler: Handler = Rc::new(RefCell::new(handler));
        registry.entries.push(Entry { id, kind, handler });
        debug!(listener = id.0, ?kind, "registered global listener");

        ListenerRegistration {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Delivers `event` to every listener of the matching kind, in registration
    /// order. Returns how many listeners ran.
    ///
    /// Listeners removed by an earlier handler during the same dispatch are
    /// skipped; listeners added during dispatch first see the next event.
    pub fn dispatch(&self, event: &GlobalEvent) -> usize {
        let kind = event.kind();
        let snapshot: Vec<(ListenerId, Handler)> = self
            .registry
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| (entry.id, Rc::clone(&entry.handler)))
            .collect();

        let mut delivered = 0;
        for (id, handler) in snapshot {
            if !self.registry.borrow().contains(id) {
                continue;
            }
            // A handler that re-dispatches must not re-enter itself.
            let Ok(mut handler) = handler.try_borrow_mut() else {
                continue;
            };
            (&mut *handler)(event);
            delivered += 1;
        }
        delivered
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count(&self, kind: ListenerKind) -> usize {
        self.registry
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .count()
    }
}

/// Guard for a registered listener; deregisters on drop.
#[derive(Debug)]
pub struct ListenerRegistration {
    id: ListenerId,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for ListenerRegistration {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // Dispatch releases the registry before invoking handlers, so a guard
        // dropped inside a handler can still borrow it here.
        let removed: Vec<Entry> = {
            let Ok(mut registry) = registry.try_borrow_mut() else {
                warn!(
                    listener = self.id.0,
                    "registry busy, global listener left registered"
                );
                return;
            };
            let (removed, kept): (Vec<Entry>, Vec<Entry>) =
                std::mem::take(&mut registry.entries)
                    .into_iter()
                    .partition(|entry| entry.id == self.id);
            registry.entries = kept;
            removed
        };
        debug!(listener = self.id.0, "deregistered global listener");
        // Handlers may own further guards; release them with the registry unborrowed.
        drop(removed);
    }
}

#[cfg(test)]
mod tests {
    use super::{GlobalEvent, GlobalListeners, ListenerKind};
    use crossterm::event::KeyCode;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn dispatch_reaches_only_matching_kind() {
        let listeners = GlobalListeners::new();
        let keys = Rc::new(RefCell::new(Vec::new()));
        let clicks = Rc::new(RefCell::new(0));

        let keys_sink = Rc::clone(&keys);
        let _key = listeners.register(ListenerKind::KeyDown, move |event| {
            if let GlobalEvent::Key(code) = event {
                keys_sink.borrow_mut().push(*code);
            }
        });
        let clicks_sink = Rc::clone(&clicks);
        let _pointer = listeners.register(ListenerKind::PointerDown, move |_| {
            *clicks_sink.borrow_mut() += 1;
        });

        assert_eq!(listeners.dispatch(&GlobalEvent::Key(KeyCode::Esc)), 1);
        assert_eq!(
            listeners.dispatch(&GlobalEvent::MouseDown { column: 1, row: 2 }),
            1
        );

        assert_eq!(*keys.borrow(), vec![KeyCode::Esc]);
        assert_eq!(*clicks.borrow(), 1);
    }

    #[test]
    fn dropping_registration_removes_listener() {
        let listeners = GlobalListeners::new();
        let hits = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&hits);
        let registration = listeners.register(ListenerKind::KeyDown, move |_| {
            *sink.borrow_mut() += 1;
        });

        assert_eq!(listeners.len(), 1);
        drop(registration);
        assert!(listeners.is_empty());

        assert_eq!(listeners.dispatch(&GlobalEvent::Key(KeyCode::Enter)), 0);
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn registration_outliving_registry_is_harmless() {
        let listeners = GlobalListeners::new();
        let registration = listeners.register(ListenerKind::PointerDown, |_| {});
        drop(listeners);
        drop(registration);
    }

    #[test]
    fn guard_owned_by_handler_is_released_with_it() {
        let listeners = GlobalListeners::new();
        let inner = listeners.register(ListenerKind::KeyDown, |_| {});
        let outer = listeners.register(ListenerKind::PointerDown, move |_| {
            let _owned = &inner;
        });
        assert_eq!(listeners.len(), 2);

        drop(outer);
        assert!(listeners.is_empty());
    }

    #[test]
    fn listener_dropped_mid_dispatch_is_skipped() {
        let listeners = GlobalListeners::new();
        let victim_hits = Rc::new(RefCell::new(0));
        let slot = Rc::new(RefCell::new(None));

        let slot_for_first = Rc::clone(&slot);
        let _first = listeners.register(ListenerKind::KeyDown, move |_| {
            slot_for_first.borrow_mut().take();
        });

        let sink = Rc::clone(&victim_hits);
        *slot.borrow_mut() = Some(listeners.register(ListenerKind::KeyDown, move |_| {
            *sink.borrow_mut() += 1;
        }));

        assert_eq!(listeners.dispatch(&GlobalEvent::Key(KeyCode::Esc)), 1);
        assert_eq!(*victim_hits.borrow(), 0);
        assert_eq!(listeners.count(ListenerKind::KeyDown), 1);
    }
}
