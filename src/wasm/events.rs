//! Listener wiring. Every registration is returned as a [`Listener`] that
//! detaches itself on drop, so replacing the controller also silences the
//! old one.

use std::any::Any;
use std::rc::Rc;

use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, KeyboardEvent, MouseEvent, TouchEvent, Window,
};

use super::controller::{PageController, LANGUAGE_BUTTON_SELECTOR, TOGGLE_SELECTOR};
use super::dom;
use crate::language::Language;

/// An attached event listener. Dropping it removes the listener and frees
/// the closure.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: js_sys::Function,
    _closure: Box<dyn Any>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, &self.callback);
    }
}

fn register<E, F>(
    target: &EventTarget,
    kind: &'static str,
    options: Option<&AddEventListenerOptions>,
    handler: F,
) -> Result<Listener, JsValue>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let callback = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
    match options {
        Some(options) => target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind, &callback, options,
            )?,
        None => target.add_event_listener_with_callback(kind, &callback)?,
    }
    Ok(Listener {
        target: target.clone(),
        kind,
        callback,
        _closure: Box::new(closure),
    })
}

fn listen<E, F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Listener, JsValue>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    register(target, kind, None, handler)
}

/// First changed touch of a touch event, in client coordinates.
fn touch_point(event: &TouchEvent) -> Option<(f64, f64)> {
    let touch = event.changed_touches().get(0)?;
    Some((touch.client_x() as f64, touch.client_y() as f64))
}

pub fn attach_window(
    controller: &Rc<PageController>,
    window: &Window,
    listeners: &mut Vec<Listener>,
) -> Result<(), JsValue> {
    let c = Rc::clone(controller);
    listeners.push(listen(window, "scroll", move |_: Event| c.on_scroll())?);

    let c = Rc::clone(controller);
    listeners.push(listen(window, "resize", move |_: Event| c.on_resize())?);
    Ok(())
}

pub fn attach_document(
    controller: &Rc<PageController>,
    listeners: &mut Vec<Listener>,
) -> Result<(), JsValue> {
    let document = controller.document().clone();

    let c = Rc::clone(controller);
    listeners.push(listen(&document, "click", move |e: MouseEvent| {
        c.on_pointer_down(dom::target_node(e.target()))
    })?);

    let c = Rc::clone(controller);
    listeners.push(listen(&document, "keydown", move |e: KeyboardEvent| {
        if e.key() == "Escape" {
            c.on_escape();
        }
    })?);

    let c = Rc::clone(controller);
    listeners.push(listen(&document, "touchstart", move |e: TouchEvent| {
        let (x, y) = touch_point(&e).unwrap_or_default();
        c.on_touch_start(dom::target_node(e.target()), x, y);
    })?);

    let c = Rc::clone(controller);
    listeners.push(listen(&document, "touchend", move |e: TouchEvent| {
        if let Some((x, y)) = touch_point(&e) {
            c.on_touch_end(x, y);
        }
    })?);

    // must be non-passive or preventDefault is ignored
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    let c = Rc::clone(controller);
    listeners.push(register(&document, "touchmove", Some(&options), move |e: Event| {
        if c.blocks_touch_move(dom::target_node(e.target())) {
            e.prevent_default();
        }
    })?);

    let c = Rc::clone(controller);
    listeners.push(listen(&document, "visibilitychange", move |_: Event| {
        c.on_visibility_change()
    })?);

    Ok(())
}

/// Wires the drawer toggle and the language buttons. A toggle that already
/// calls `toggleMobileMenu()` from an inline `onclick` is left alone so one
/// click does not toggle twice.
pub fn attach_controls(
    controller: &Rc<PageController>,
    listeners: &mut Vec<Listener>,
) -> Result<(), JsValue> {
    let document = controller.document();

    if let Some(toggle) = dom::query(document, TOGGLE_SELECTOR) {
        if toggle.has_attribute("onclick") {
            log::debug!("drawer toggle has an inline handler, not wiring");
        } else {
            let c = Rc::clone(controller);
            listeners.push(listen(&toggle, "click", move |_: MouseEvent| c.toggle_menu())?);
        }
    }

    for button in dom::query_all(document, LANGUAGE_BUTTON_SELECTOR) {
        if button.has_attribute("onclick") {
            continue;
        }
        let Some(language) = button
            .get_attribute("data-lang")
            .as_deref()
            .and_then(Language::from_code)
        else {
            log::warn!("language button with unsupported data-lang");
            continue;
        };
        let c = Rc::clone(controller);
        listeners.push(listen(&button, "click", move |_: MouseEvent| {
            c.switch_language(language)
        })?);
    }

    Ok(())
}

/// Smooth scrolling for every `a[href^="#"]`.
pub fn attach_anchors(
    controller: &Rc<PageController>,
    listeners: &mut Vec<Listener>,
) -> Result<(), JsValue> {
    for anchor in dom::query_all(controller.document(), "a[href^=\"#\"]") {
        let Some(href) = anchor.get_attribute("href") else {
            continue;
        };
        let fragment = href.strip_prefix('#').unwrap_or(&href).to_string();
        let c = Rc::clone(controller);
        listeners.push(listen(&anchor, "click", move |e: MouseEvent| {
            e.prevent_default();
            c.navigate(&fragment);
        })?);
    }
    Ok(())
}
