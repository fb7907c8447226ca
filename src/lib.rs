//! Behavior layer for the bilingual landing page: particles, scroll-driven
//! nav highlighting, the mobile drawer and the EN/DE toggle.
//!
//! Expected markup:
//!
//! - `#particles`: particle container.
//! - `.navbar` with `.nav-link[href="#<section>"]` links.
//! - `#mobileNav` drawer and a `.mobile-menu-toggle` control.
//! - language buttons carrying `data-lang="en"` / `data-lang="de"`. A
//!   `.navbar-lang-btn` without `data-lang` is neither wired nor marked
//!   active; bootstrap logs a warning for it.
//! - `#en-content` / `#de-content` blocks with class `language-content`,
//!   sections `<name>` / `<name>-de`, and text carrying `data-en` / `data-de`.

pub mod config;
pub mod device;
pub mod language;
pub mod menu;
pub mod navigation;
pub mod particles;
pub mod storage;
pub mod timing;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub use wasm::{
    boot, close_mobile_menu, current_language, is_mobile_menu_open, scroll_to_top,
    switch_language, toggle_mobile_menu, unmount,
};

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use crate::config::{self, PageConfig};
    use crate::language::Language;
    use crate::menu::CloseReason;

    mod controller;
    mod dom;
    mod events;

    use controller::PageController;
    use events::Listener;

    /// The live controller and the listeners feeding it.
    struct Mounted {
        controller: Rc<PageController>,
        _listeners: Vec<Listener>,
    }

    impl Drop for Mounted {
        fn drop(&mut self) {
            // listeners are detached right after, when the fields drop
            self.controller.retire();
        }
    }

    thread_local! {
        static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
    }

    fn controller() -> Option<Rc<PageController>> {
        MOUNTED.with(|slot| slot.borrow().as_ref().map(|m| Rc::clone(&m.controller)))
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(config::log_level()).is_err() {
            web_sys::console::warn_1(&"logger already initialized".into());
        }

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if document.ready_state() == "loading" {
            let on_ready = Closure::once(move || {
                if let Err(err) = boot() {
                    log::error!("bootstrap failed: {err:?}");
                }
            });
            document.add_event_listener_with_callback(
                "DOMContentLoaded",
                on_ready.as_ref().unchecked_ref(),
            )?;
            on_ready.forget();
            Ok(())
        } else {
            boot()
        }
    }

    /// Builds the controller against the current document and wires every
    /// listener. A previously booted controller is unmounted first: its
    /// listeners are removed and its pending deferred work is dropped.
    pub fn boot() -> Result<(), JsValue> {
        unmount();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let controller = PageController::new(window.clone(), document, PageConfig::default());
        log::info!("booting page controller ({:?} viewport)", controller.device());

        let unlabeled = controller.unlabeled_language_buttons();
        if unlabeled > 0 {
            log::warn!("{unlabeled} language button(s) without data-lang will stay inert");
        }

        let mut listeners = Vec::new();
        controller.generate_particles();
        events::attach_window(&controller, &window, &mut listeners)?;
        events::attach_document(&controller, &mut listeners)?;
        events::attach_controls(&controller, &mut listeners)?;
        controller.initialize_language();
        events::attach_anchors(&controller, &mut listeners)?;
        controller.highlight_active_section();

        let mounted = Mounted {
            controller,
            _listeners: listeners,
        };
        MOUNTED.with(|slot| *slot.borrow_mut() = Some(mounted));
        Ok(())
    }

    /// Detaches the current controller, if any. Entry points are no-ops
    /// until the next `boot`.
    pub fn unmount() {
        // take first so the drop runs without the slot borrowed
        let previous = MOUNTED.with(|slot| slot.borrow_mut().take());
        drop(previous);
    }

    #[wasm_bindgen(js_name = scrollToTop)]
    pub fn scroll_to_top() {
        if let Some(c) = controller() {
            c.scroll_to_top();
        }
    }

    #[wasm_bindgen(js_name = toggleMobileMenu)]
    pub fn toggle_mobile_menu() {
        if let Some(c) = controller() {
            c.toggle_menu();
        }
    }

    #[wasm_bindgen(js_name = closeMobileMenu)]
    pub fn close_mobile_menu() {
        if let Some(c) = controller() {
            c.close_menu(CloseReason::Explicit);
        }
    }

    /// Unsupported codes are ignored.
    #[wasm_bindgen(js_name = switchLanguage)]
    pub fn switch_language(code: &str) {
        let Some(language) = Language::from_code(code) else {
            log::debug!("ignoring unsupported language {code:?}");
            return;
        };
        if let Some(c) = controller() {
            c.switch_language(language);
        }
    }

    #[wasm_bindgen(js_name = currentLanguage)]
    pub fn current_language() -> Option<String> {
        controller().map(|c| c.language().code().to_string())
    }

    #[wasm_bindgen(js_name = isMobileMenuOpen)]
    pub fn is_mobile_menu_open() -> bool {
        controller().is_some_and(|c| c.is_menu_open())
    }
}
