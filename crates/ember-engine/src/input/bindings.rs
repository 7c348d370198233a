use super::frame::InputFrame;
use super::state::InputState;
use super::types::{Key, KeyState};

/// Opaque callable captured at bind time.
///
/// Failures are reported, logged at the call site, and never propagate into
/// the frame loop.
pub type KeyCallback = Box<dyn FnMut() -> anyhow::Result<()>>;

struct Binding {
    key: Key,
    repeat: bool,
    callback: KeyCallback,
}

/// Key-bound callbacks for one scene.
///
/// Bindings die with the scene that registered them; the display's input
/// state outlives them.
#[derive(Default)]
pub struct KeyBindings {
    bindings: Vec<Binding>,
}

impl KeyBindings {
    /// Registers `callback` for `key`, replacing any previous binding for it.
    ///
    /// With `repeat` set the callback fires every tick while the key is held;
    /// otherwise it fires once per press.
    pub fn bind(&mut self, key: Key, repeat: bool, callback: KeyCallback) {
        if let Some(existing) = self.bindings.iter_mut().find(|b| b.key == key) {
            log::debug!("rebinding key {key:?}");
            existing.repeat = repeat;
            existing.callback = callback;
            return;
        }
        self.bindings.push(Binding {
            key,
            repeat,
            callback,
        });
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Delivers queued key callbacks for one tick.
    ///
    /// Non-repeat bindings fire once per press transition, in the order the
    /// presses arrived since the previous tick. Repeat bindings then fire for
    /// every currently held key, in registration order. Each callback error
    /// is logged and does not stop delivery of the rest.
    pub fn dispatch(&mut self, frame: &InputFrame, state: &InputState) {
        for &(key, transition) in &frame.key_transitions {
            if transition != KeyState::Pressed {
                continue;
            }
            if let Some(binding) = self
                .bindings
                .iter_mut()
                .find(|b| b.key == key && !b.repeat)
            {
                invoke(key, &mut binding.callback);
            }
        }

        for binding in self.bindings.iter_mut().filter(|b| b.repeat) {
            if state.key_down(binding.key) {
                invoke(binding.key, &mut binding.callback);
            }
        }
    }
}

fn invoke(key: Key, callback: &mut KeyCallback) {
    if let Err(err) = callback() {
        log::error!("key callback for {key:?} failed: {err:#}");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::input::InputEvent;

    fn recorded(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> KeyCallback {
        let log = Rc::clone(log);
        Box::new(move || {
            log.borrow_mut().push(tag);
            Ok(())
        })
    }

    fn tick(state: &mut InputState, frame: &mut InputFrame, events: &[InputEvent]) {
        for &ev in events {
            state.apply_event(frame, ev);
        }
    }

    fn press(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            repeat: false,
        }
    }

    #[test]
    fn press_callbacks_fire_in_arrival_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bindings = KeyBindings::default();
        bindings.bind(Key::A, false, recorded(&log, "a"));
        bindings.bind(Key::B, false, recorded(&log, "b"));

        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        tick(&mut state, &mut frame, &[press(Key::B), press(Key::A)]);

        bindings.dispatch(&frame, &state);
        assert_eq!(*log.borrow(), vec!["b", "a"]);
    }

    #[test]
    fn repeat_binding_fires_while_held() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bindings = KeyBindings::default();
        bindings.bind(Key::W, true, recorded(&log, "w"));

        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        tick(&mut state, &mut frame, &[press(Key::W)]);

        bindings.dispatch(&frame, &state);
        frame.clear();
        // Key still held on the next tick with no new events.
        bindings.dispatch(&frame, &state);

        assert_eq!(*log.borrow(), vec!["w", "w"]);
    }

    #[test]
    fn non_repeat_binding_fires_once_per_press() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bindings = KeyBindings::default();
        bindings.bind(Key::Space, false, recorded(&log, "jump"));

        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        tick(&mut state, &mut frame, &[press(Key::Space)]);

        bindings.dispatch(&frame, &state);
        frame.clear();
        bindings.dispatch(&frame, &state);

        assert_eq!(*log.borrow(), vec!["jump"]);
    }

    #[test]
    fn failing_callback_does_not_stop_delivery() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bindings = KeyBindings::default();
        bindings.bind(Key::A, false, Box::new(|| anyhow::bail!("host error")));
        bindings.bind(Key::B, false, recorded(&log, "b"));

        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        tick(&mut state, &mut frame, &[press(Key::A), press(Key::B)]);

        bindings.dispatch(&frame, &state);
        assert_eq!(*log.borrow(), vec!["b"]);
    }

    #[test]
    fn rebinding_replaces_previous_callback() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bindings = KeyBindings::default();
        bindings.bind(Key::A, false, recorded(&log, "old"));
        bindings.bind(Key::A, false, recorded(&log, "new"));
        assert_eq!(bindings.len(), 1);

        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        tick(&mut state, &mut frame, &[press(Key::A)]);

        bindings.dispatch(&frame, &state);
        assert_eq!(*log.borrow(), vec!["new"]);
    }
}
