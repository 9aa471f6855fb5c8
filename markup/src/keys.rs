//! Scoped keyboard subscription for viewer shortcuts.
//!
//! The viewer's shortcuts (`+`/`-`/`0`, `Delete`, `Escape`, space-pan)
//! listen on the window, not the canvas, so they work regardless of focus.
//! Those listeners are modeled as an owned resource: [`KeyboardHook::attach`]
//! registers them and the guard's `Drop` unregisters them, so closing the
//! viewer, on any exit path, cannot leave a dangling global listener.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::KeyboardEvent;

use crate::input::{Key, Modifiers};

fn to_engine_event(event: &KeyboardEvent) -> (Key, Modifiers) {
    let key = Key(event.key());
    let modifiers = Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        meta: event.meta_key(),
    };
    (key, modifiers)
}

/// RAII guard for window `keydown`/`keyup` listeners. Dropping it detaches
/// both.
pub struct KeyboardHook {
    target: web_sys::EventTarget,
    down: Closure<dyn FnMut(KeyboardEvent)>,
    up: Closure<dyn FnMut(KeyboardEvent)>,
}

impl KeyboardHook {
    /// Attach `keydown` and `keyup` listeners to the window and forward each
    /// event to the matching handler as an engine [`Key`] plus [`Modifiers`].
    /// Held-key state (space panning) depends on seeing the release, which is
    /// why both directions are wired together.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there is no window or a listener cannot be added.
    pub fn attach(
        mut on_down: impl FnMut(Key, Modifiers) + 'static,
        mut on_up: impl FnMut(Key, Modifiers) + 'static,
    ) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let down = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let (key, modifiers) = to_engine_event(&event);
            on_down(key, modifiers);
        });
        let up = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let (key, modifiers) = to_engine_event(&event);
            on_up(key, modifiers);
        });
        let target: web_sys::EventTarget = window.into();
        target.add_event_listener_with_callback("keydown", down.as_ref().unchecked_ref())?;
        target.add_event_listener_with_callback("keyup", up.as_ref().unchecked_ref())?;
        Ok(Self { target, down, up })
    }
}

impl Drop for KeyboardHook {
    fn drop(&mut self) {
        // Detach on every exit path; a failure here leaves nothing to clean.
        let _ = self
            .target
            .remove_event_listener_with_callback("keydown", self.down.as_ref().unchecked_ref());
        let _ = self
            .target
            .remove_event_listener_with_callback("keyup", self.up.as_ref().unchecked_ref());
    }
}
