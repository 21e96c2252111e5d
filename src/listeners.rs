//! Document-level keydown listeners
//!
//! The host owns a [`ListenerTable`] and feeds it every keydown. The palette
//! registers its two handlers with [`attach`] and removes them with
//! [`Attachment::detach`], so handlers never outlive the component that
//! installed them.

use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::DispatchEngine;
use crate::keymap::KeyEvent;
use crate::platform::Platform;

/// A registered keydown callback
pub type Listener = Box<dyn FnMut(&mut KeyEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Capture-phase listeners, called in registration order
#[derive(Default)]
pub struct ListenerTable {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

impl ListenerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener
    pub fn add(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver an event until a listener stops propagation
    pub fn dispatch(&mut self, event: &mut KeyEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
            if event.is_propagation_stopped() {
                break;
            }
        }
    }
}

impl std::fmt::Debug for ListenerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerTable")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Handle to the palette's registered listeners
#[derive(Debug)]
#[must_use = "dropping an Attachment leaves its listeners registered"]
pub struct Attachment {
    global: ListenerId,
    overlay: ListenerId,
}

impl Attachment {
    /// Remove both listeners from `table`
    pub fn detach(self, table: &mut ListenerTable) {
        table.remove(self.global);
        table.remove(self.overlay);
        tracing::debug!("Palette listeners detached");
    }
}

/// Register the engine's global and overlay handlers, global first
pub fn attach<P: Platform + 'static>(
    engine: &Rc<RefCell<DispatchEngine<P>>>,
    table: &mut ListenerTable,
) -> Attachment {
    let global_engine = Rc::clone(engine);
    let global = table.add(Box::new(move |event: &mut KeyEvent| {
        global_engine.borrow_mut().handle_global_keydown(event);
    }));

    let overlay_engine = Rc::clone(engine);
    let overlay = table.add(Box::new(move |event: &mut KeyEvent| {
        overlay_engine.borrow_mut().handle_overlay_keydown(event);
    }));

    tracing::debug!("Palette listeners attached");
    Attachment { global, overlay }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::SubstringFilter;
    use crate::keymap::{Chord, Modifiers};
    use crate::platform::{DryRunPlatform, Effect};
    use crate::registry::{Action, Command, Registry};

    fn shared_engine() -> Rc<RefCell<DispatchEngine<DryRunPlatform>>> {
        let registry = Registry::new(vec![Command::new(
            "home",
            "Go to Home",
            "Navigation",
            Action::Navigate("/".into()),
        )
        .with_chord(Chord::new("h", Modifiers::SHIFT))])
        .unwrap();
        Rc::new(RefCell::new(DispatchEngine::new(
            Rc::new(registry),
            DryRunPlatform::default(),
            Box::new(SubstringFilter),
        )))
    }

    #[test]
    fn test_dispatch_stops_at_propagation_stop() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut table = ListenerTable::new();

        let first = Rc::clone(&calls);
        table.add(Box::new(move |event: &mut KeyEvent| {
            first.borrow_mut().push(1);
            event.stop_propagation();
        }));
        let second = Rc::clone(&calls);
        table.add(Box::new(move |_event: &mut KeyEvent| {
            second.borrow_mut().push(2);
        }));

        table.dispatch(&mut KeyEvent::key("a"));
        assert_eq!(*calls.borrow(), vec![1]);
    }

    #[test]
    fn test_remove_unknown_listener() {
        let mut table = ListenerTable::new();
        let id = table.add(Box::new(|_event: &mut KeyEvent| {}));
        assert!(table.remove(id));
        assert!(!table.remove(id));
        assert!(table.is_empty());
    }

    #[test]
    fn test_attach_routes_events_through_engine() {
        let engine = shared_engine();
        let mut table = ListenerTable::new();
        let attachment = attach(&engine, &mut table);
        assert_eq!(table.len(), 2);

        table.dispatch(&mut KeyEvent::new("k", Modifiers::META));
        assert!(engine.borrow().is_open());

        table.dispatch(&mut KeyEvent::new("H", Modifiers::SHIFT));
        assert!(!engine.borrow().is_open());
        assert_eq!(
            engine.borrow().platform().effects(),
            &[Effect::Navigate("/".into())]
        );

        attachment.detach(&mut table);
        assert!(table.is_empty());
    }

    #[test]
    fn test_hotkey_while_open_closes_without_reaching_overlay() {
        let engine = shared_engine();
        let mut table = ListenerTable::new();
        let _attachment = attach(&engine, &mut table);

        table.dispatch(&mut KeyEvent::new("k", Modifiers::CTRL));
        table.dispatch(&mut KeyEvent::new("k", Modifiers::CTRL));
        assert!(!engine.borrow().is_open());
        assert_eq!(table.len(), 2);
    }
}
