#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, EventInit, HtmlElement, KeyboardEvent, KeyboardEventInit};

use landing_wasm::{
    boot, close_mobile_menu, current_language, is_mobile_menu_open, switch_language,
    toggle_mobile_menu, unmount,
};

wasm_bindgen_test_configure!(run_in_browser);

const FIXTURE: &str = r##"
<nav class="navbar">
  <a class="nav-link" href="#vision">Vision</a>
  <a class="nav-link" href="#architecture">Architecture</a>
  <button class="navbar-lang-btn" data-lang="en">EN</button>
  <button class="navbar-lang-btn" data-lang="de">DE</button>
  <button class="mobile-menu-toggle">menu</button>
</nav>
<div id="mobileNav"><a href="#vision">Vision</a></div>
<div id="particles"></div>
<p id="outside">elsewhere</p>
<h1 id="title" data-en="Hello" data-de="Hallo">Hello</h1>
<div id="en-content" class="language-content">
  <section id="vision" style="height: 500px">v</section>
  <section id="architecture" style="height: 400px">a</section>
</div>
<div id="de-content" class="language-content">
  <section id="vision-de" style="height: 500px">v</section>
  <section id="architecture-de" style="height: 400px">a</section>
</div>
"##;

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn set_stored_language(code: &str) {
    let window = web_sys::window().unwrap();
    let storage = window.session_storage().unwrap().unwrap();
    storage.set_item("language-preference", code).unwrap();
}

/// Fixture markup in its own container appended to `<body>`. Dropping it
/// unmounts the controller, removes the container and restores `<html>`.
struct Page {
    root: Element,
    lang: Option<String>,
}

impl Page {
    fn mount(stored_language: &str) -> Self {
        set_stored_language(stored_language);
        let lang = document()
            .document_element()
            .and_then(|el| el.get_attribute("lang"));
        let root = document().create_element("div").unwrap();
        root.set_inner_html(FIXTURE);
        document().body().unwrap().append_child(&root).unwrap();
        boot().expect("boot");
        Self { root, lang }
    }

    fn html(&self) -> String {
        self.root.inner_html()
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        unmount();
        self.root.remove();
        set_stored_language("en");
        let doc = document();
        doc.body().unwrap().style().remove_property("overflow").unwrap();
        let root = doc
            .document_element()
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap();
        root.style().remove_property("overflow").unwrap();
        match &self.lang {
            Some(lang) => root.set_attribute("lang", lang).unwrap(),
            None => root.remove_attribute("lang").unwrap(),
        }
    }
}

fn by_id(id: &str) -> HtmlElement {
    document()
        .get_element_by_id(id)
        .unwrap_or_else(|| panic!("#{id} missing"))
        .dyn_into::<HtmlElement>()
        .unwrap()
}

fn by_selector(selector: &str) -> HtmlElement {
    document()
        .query_selector(selector)
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
}

fn has_class(id: &str, class: &str) -> bool {
    by_id(id).class_list().contains(class)
}

fn body_overflow() -> String {
    document()
        .body()
        .unwrap()
        .style()
        .get_property_value("overflow")
        .unwrap()
}

/// Dispatches a cancelable bubbling `touchmove` at `id`; true when nothing
/// called `preventDefault`.
fn touch_move_allowed(id: &str) -> bool {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict("touchmove", &init).unwrap();
    by_id(id).dispatch_event(&event).unwrap()
}

#[wasm_bindgen_test]
fn boot_applies_stored_language_and_particles() {
    let _page = Page::mount("en");
    assert_eq!(current_language().as_deref(), Some("en"));
    assert!(has_class("en-content", "active"));
    assert!(!has_class("de-content", "active"));
    assert_eq!(by_id("particles").child_element_count(), 30);
    assert!(!is_mobile_menu_open());
}

#[wasm_bindgen_test]
fn stored_german_preference_wins() {
    let _page = Page::mount("de");
    assert_eq!(current_language().as_deref(), Some("de"));
    assert_eq!(by_id("title").text_content().as_deref(), Some("Hallo"));
}

#[wasm_bindgen_test]
fn switching_language_updates_page_and_is_idempotent() {
    let page = Page::mount("en");
    switch_language("de");
    let once = page.html();
    switch_language("de");

    assert_eq!(page.html(), once);
    assert_eq!(current_language().as_deref(), Some("de"));
    assert!(has_class("de-content", "active"));
    assert!(!has_class("en-content", "active"));
    assert_eq!(by_id("title").text_content().as_deref(), Some("Hallo"));
    assert_eq!(
        document().document_element().unwrap().get_attribute("lang").as_deref(),
        Some("de")
    );

    let storage = web_sys::window().unwrap().session_storage().unwrap().unwrap();
    assert_eq!(storage.get_item("language-preference").unwrap().as_deref(), Some("de"));
}

#[wasm_bindgen_test]
fn unsupported_language_changes_nothing() {
    let page = Page::mount("en");
    let before = page.html();
    switch_language("fr");
    assert_eq!(current_language().as_deref(), Some("en"));
    assert_eq!(page.html(), before);
}

#[wasm_bindgen_test]
fn double_toggle_restores_drawer_and_scroll() {
    let _page = Page::mount("en");
    toggle_mobile_menu();
    assert!(is_mobile_menu_open());
    assert!(has_class("mobileNav", "active"));
    assert_eq!(body_overflow(), "hidden");

    toggle_mobile_menu();
    assert!(!is_mobile_menu_open());
    assert!(!has_class("mobileNav", "active"));
    assert_eq!(body_overflow(), "");
}

#[wasm_bindgen_test]
fn closing_a_closed_drawer_is_a_noop() {
    let _page = Page::mount("en");
    close_mobile_menu();
    assert!(!is_mobile_menu_open());
    assert!(by_id("mobileNav").get_attribute("aria-hidden").is_none());
}

#[wasm_bindgen_test]
fn escape_closes_drawer() {
    let _page = Page::mount("en");
    toggle_mobile_menu();

    let init = KeyboardEventInit::new();
    init.set_key("Escape");
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    document().dispatch_event(&event).unwrap();

    assert!(!is_mobile_menu_open());
}

#[wasm_bindgen_test]
fn outside_click_closes_drawer_inside_click_does_not() {
    let _page = Page::mount("en");
    toggle_mobile_menu();

    by_id("mobileNav").click();
    assert!(is_mobile_menu_open());

    by_id("outside").click();
    assert!(!is_mobile_menu_open());
}

#[wasm_bindgen_test]
fn toggle_button_click_toggles_once() {
    let _page = Page::mount("en");
    let toggle = by_selector(".mobile-menu-toggle");
    toggle.click();
    assert!(is_mobile_menu_open());
    toggle.click();
    assert!(!is_mobile_menu_open());
}

#[wasm_bindgen_test]
fn language_button_switches_by_data_attribute() {
    let _page = Page::mount("en");
    let de = by_selector("[data-lang=\"de\"]");
    de.click();
    assert_eq!(current_language().as_deref(), Some("de"));
    assert!(de.class_list().contains("active"));
}

#[wasm_bindgen_test]
fn touch_move_outside_open_drawer_is_blocked() {
    let _page = Page::mount("en");
    assert!(touch_move_allowed("outside"));

    toggle_mobile_menu();
    assert!(!touch_move_allowed("outside"));
    assert!(touch_move_allowed("mobileNav"));

    toggle_mobile_menu();
    assert!(touch_move_allowed("outside"));
}

#[wasm_bindgen_test]
fn reboot_detaches_previous_controller() {
    let _page = Page::mount("en");
    toggle_mobile_menu();
    assert!(!touch_move_allowed("outside"));

    // the first controller still thinks its drawer is open
    boot().unwrap();
    assert!(!is_mobile_menu_open());
    assert!(touch_move_allowed("outside"));
}

#[wasm_bindgen_test]
fn unmounted_entry_points_are_noops() {
    let _page = Page::mount("en");
    unmount();
    toggle_mobile_menu();
    switch_language("de");
    assert!(!is_mobile_menu_open());
    assert_eq!(current_language(), None);
    assert!(touch_move_allowed("outside"));
}

#[wasm_bindgen_test(async)]
async fn language_switch_closes_drawer_after_delay() {
    let _page = Page::mount("en");
    toggle_mobile_menu();
    switch_language("de");
    assert!(is_mobile_menu_open());

    TimeoutFuture::new(400).await;
    assert!(!is_mobile_menu_open());
}
