use super::Combobox;
use super::listeners::{GlobalEvent, GlobalListeners, ListenerKind, ListenerRegistration};
use ratatui::layout::Position;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use tracing::debug;

/// A combobox attached to a host's global listeners.
///
/// While mounted, pointer presses anywhere on screen and every key press reach
/// the widget. Dropping the handle deregisters both listeners and discards the
/// widget state.
#[derive(Debug)]
pub struct MountedCombobox {
    widget: Rc<RefCell<Combobox>>,
    _pointer: ListenerRegistration,
    _keyboard: ListenerRegistration,
}

impl Combobox {
    /// Mounts the widget, registering its outside-click and keyboard listeners.
    pub fn mount(self, listeners: &GlobalListeners) -> MountedCombobox {
        let widget = Rc::new(RefCell::new(self));

        let pointer_target = Rc::clone(&widget);
        let pointer = listeners.register(ListenerKind::PointerDown, move |event| {
            if let GlobalEvent::MouseDown { column, row } = *event {
                pointer_target
                    .borrow_mut()
                    .handle_pointer_down(Position::new(column, row));
            }
        });

        let keyboard_target = Rc::clone(&widget);
        let keyboard = listeners.register(ListenerKind::KeyDown, move |event| {
            if let GlobalEvent::Key(code) = *event {
                keyboard_target.borrow_mut().handle_key(code);
            }
        });

        debug!("combobox mounted");
        MountedCombobox {
            widget,
            _pointer: pointer,
            _keyboard: keyboard,
        }
    }
}

impl MountedCombobox {
    pub fn state(&self) -> Ref<'_, Combobox> {
        self.widget.borrow()
    }

    pub fn state_mut(&self) -> RefMut<'_, Combobox> {
        self.widget.borrow_mut()
    }
}

impl Drop for MountedCombobox {
    fn drop(&mut self) {
        debug!("combobox unmounted");
    }
}
