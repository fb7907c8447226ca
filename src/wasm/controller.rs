use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, Node, ScrollBehavior, ScrollToOptions, Window,
};

use super::dom;
use crate::config::PageConfig;
use crate::device::{self, DeviceClass, ResizeAction};
use crate::language::{self, Language};
use crate::menu::{CloseReason, Drawer, DrawerTransition, SwipeTracker};
use crate::navigation::{self, AnchorTarget, SectionRange, SECTIONS};
use crate::particles;
use crate::storage::{self, SessionStore};
use crate::timing::{CoalescingTimer, RateLimiter, TimeoutScheduler};

pub const DRAWER_ID: &str = "mobileNav";
pub const TOGGLE_SELECTOR: &str = ".mobile-menu-toggle";
const PARTICLES_ID: &str = "particles";
const NAVBAR_SELECTOR: &str = ".navbar";
const NAV_LINK_SELECTOR: &str = ".nav-link";
const LANGUAGE_CONTENT_SELECTOR: &str = ".language-content";
pub const LANGUAGE_BUTTON_SELECTOR: &str = "[data-lang]";
const UNLABELED_LANGUAGE_BUTTON_SELECTOR: &str = ".navbar-lang-btn:not([data-lang])";
const ACTIVE: &str = "active";

struct PageState {
    language: Language,
    drawer: Drawer,
    device: DeviceClass,
}

/// Owns the page-wide state and every DOM reaction to it. Constructed once
/// at bootstrap and shared by the listeners through `Rc`.
pub struct PageController {
    window: Window,
    document: Document,
    config: PageConfig,
    store: SessionStore,
    state: RefCell<PageState>,
    resize_timer: RefCell<CoalescingTimer<TimeoutScheduler>>,
    scroll_trailing: RefCell<CoalescingTimer<TimeoutScheduler>>,
    scroll_limiter: RefCell<RateLimiter>,
    swipe: RefCell<SwipeTracker>,
    particle_generations: Cell<u32>,
    retired: Cell<bool>,
}

impl PageController {
    pub fn new(window: Window, document: Document, config: PageConfig) -> Rc<Self> {
        let device = detect_device(&window, &config);
        let resize_timer = CoalescingTimer::new(TimeoutScheduler, config.resize_debounce_ms);
        let scroll_trailing =
            CoalescingTimer::new(TimeoutScheduler, config.scroll_throttle_ms as u32);
        let scroll_limiter = RateLimiter::new(config.scroll_throttle_ms);
        Rc::new(Self {
            window,
            document,
            config,
            store: SessionStore,
            state: RefCell::new(PageState {
                language: Language::default(),
                drawer: Drawer::default(),
                device,
            }),
            resize_timer: RefCell::new(resize_timer),
            scroll_trailing: RefCell::new(scroll_trailing),
            scroll_limiter: RefCell::new(scroll_limiter),
            swipe: RefCell::new(SwipeTracker::default()),
            particle_generations: Cell::new(0),
            retired: Cell::new(false),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn language(&self) -> Language {
        self.state.borrow().language
    }

    pub fn device(&self) -> DeviceClass {
        self.state.borrow().device
    }

    pub fn is_menu_open(&self) -> bool {
        self.state.borrow().drawer.is_open()
    }

    /// Number of particle batches generated so far.
    pub fn particle_generations(&self) -> u32 {
        self.particle_generations.get()
    }

    /// Stops pending timers and makes already scheduled deferred work a
    /// no-op. Called when the controller is replaced.
    pub fn retire(&self) {
        self.retired.set(true);
        self.resize_timer.borrow_mut().cancel();
        self.scroll_trailing.borrow_mut().cancel();
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    /// Runs `task` after `delay_ms` unless the controller has been retired
    /// by then. Tasks re-check state.
    fn defer(self: &Rc<Self>, delay_ms: u32, task: impl FnOnce(&PageController) + 'static) {
        let this = Rc::clone(self);
        Timeout::new(delay_ms, move || {
            if !this.retired.get() {
                task(&*this)
            }
        })
        .forget();
    }

    /// Count of `.navbar-lang-btn` elements missing `data-lang`; those never
    /// get wired or marked active.
    pub fn unlabeled_language_buttons(&self) -> usize {
        dom::query_all(&self.document, UNLABELED_LANGUAGE_BUTTON_SELECTOR).len()
    }

    // ---------------------------------------------------------------------
    // Language
    // ---------------------------------------------------------------------

    /// Stored preference, then `navigator.language`, then English.
    pub fn initialize_language(&self) {
        let stored = match storage::load_language(&self.store, self.config.storage_key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("ignoring stored language: {err}");
                None
            }
        };
        let locale = self.window.navigator().language();
        let resolved = language::resolve_initial(stored.as_deref(), locale.as_deref());
        log::debug!("initial language {resolved} (stored {stored:?}, locale {locale:?})");
        self.apply_language(resolved);
    }

    pub fn switch_language(self: &Rc<Self>, target: Language) {
        self.apply_language(target);

        if self.is_menu_open() {
            self.defer(self.config.menu_close_delay_ms, |c| {
                c.close_menu(CloseReason::LanguageSwitch)
            });
        }

        if let Err(err) = storage::save_language(&self.store, self.config.storage_key, target) {
            log::warn!("language preference not persisted: {err}");
        }

        self.defer(self.config.highlight_delay_ms, |c| c.highlight_active_section());
        log::info!("language switched to {target}");
    }

    fn apply_language(&self, target: Language) {
        self.state.borrow_mut().language = target;

        for block in dom::query_all(&self.document, LANGUAGE_CONTENT_SELECTOR) {
            dom::set_class(&block, ACTIVE, false);
        }
        if let Some(block) = dom::by_id(&self.document, &target.content_id()) {
            dom::set_class(&block, ACTIVE, true);
        }

        if let Some(root) = self.document.document_element() {
            let _ = root.set_attribute("lang", target.code());
        }

        for button in dom::query_all(&self.document, LANGUAGE_BUTTON_SELECTOR) {
            let selected = button.get_attribute("data-lang").as_deref() == Some(target.code());
            dom::set_class(&button, ACTIVE, selected);
            let pressed = if selected { "true" } else { "false" };
            let _ = button.set_attribute("aria-pressed", pressed);
        }

        let attribute = target.text_attribute();
        for element in dom::query_all(&self.document, &format!("[{attribute}]")) {
            match element.get_attribute(&attribute) {
                Some(text) if !text.is_empty() => element.set_text_content(Some(&text)),
                _ => {}
            }
        }
    }

    // ---------------------------------------------------------------------
    // Scroll
    // ---------------------------------------------------------------------

    fn section_ranges(&self, language: Language, scroll_y: f64) -> Vec<SectionRange> {
        SECTIONS
            .into_iter()
            .filter_map(|name| {
                let element = dom::by_id(&self.document, &language.section_id(name))?;
                let rect = element.get_bounding_client_rect();
                Some(SectionRange {
                    name,
                    top: rect.top() + scroll_y,
                    height: rect.height(),
                })
            })
            .collect()
    }

    pub fn highlight_active_section(&self) {
        self.highlight_at(self.scroll_y());
    }

    /// Highlights the nav link for the section under `target_y` plus bias.
    /// Section ranges are always measured against the real scroll offset.
    fn highlight_at(&self, target_y: f64) {
        let (language, device) = {
            let state = self.state.borrow();
            (state.language, state.device)
        };
        let ranges = self.section_ranges(language, self.scroll_y());
        let bias = self.config.highlight_bias(device);
        let active = navigation::active_section(target_y, bias, &ranges);

        for link in dom::query_all(&self.document, NAV_LINK_SELECTOR) {
            dom::set_class(&link, ACTIVE, false);
        }
        if let Some(section) = active {
            let selector = format!("{NAV_LINK_SELECTOR}[href=\"#{section}\"]");
            for link in dom::query_all(&self.document, &selector) {
                dom::set_class(&link, ACTIVE, true);
            }
        }
    }

    fn update_navbar_at(&self, scroll_y: f64) {
        if let Some(navbar) = dom::query(&self.document, NAVBAR_SELECTOR) {
            let scrolled =
                navigation::navbar_scrolled(scroll_y, self.config.navbar_scrolled_threshold);
            dom::set_class(&navbar, "scrolled", scrolled);
        }
    }

    fn refresh_scroll_state(&self) {
        let scroll_y = self.scroll_y();
        self.update_navbar_at(scroll_y);
        self.highlight_at(scroll_y);
    }

    /// Leading edge through the rate limiter, trailing edge through a
    /// coalescing timer so the resting position is always applied.
    pub fn on_scroll(self: &Rc<Self>) {
        if self.scroll_limiter.borrow_mut().ready(js_sys::Date::now()) {
            self.refresh_scroll_state();
        }
        let this = Rc::clone(self);
        self.scroll_trailing
            .borrow_mut()
            .trigger(move || this.refresh_scroll_state());
    }

    pub fn scroll_to_top(&self) {
        self.smooth_scroll_to(0.0);
    }

    fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    /// In-page anchor navigation for an `href="#fragment"` link.
    pub fn navigate(self: &Rc<Self>, fragment: &str) {
        match self.resolve_fragment(fragment) {
            None => log::debug!("no anchor target for #{fragment}"),
            Some(AnchorTarget::Top) => self.scroll_to_top(),
            Some(AnchorTarget::Element(id)) => {
                let Some(element) = dom::by_id(&self.document, &id) else {
                    return;
                };
                let top = element.get_bounding_client_rect().top();
                self.smooth_scroll_to(navigation::scroll_target(
                    top,
                    self.scroll_y(),
                    self.config.header_offset,
                ));
                if self.is_menu_open() {
                    self.defer(self.config.menu_close_delay_ms, |c| {
                        c.close_menu(CloseReason::Navigation)
                    });
                }
            }
        }
    }

    fn resolve_fragment(&self, fragment: &str) -> Option<AnchorTarget> {
        navigation::resolve_anchor(fragment, self.language(), |id| {
            dom::by_id(&self.document, id).is_some()
        })
    }

    // ---------------------------------------------------------------------
    // Drawer
    // ---------------------------------------------------------------------

    fn drawer_elements(&self) -> Option<(Element, Element)> {
        let drawer = dom::by_id(&self.document, DRAWER_ID)?;
        let toggle = dom::query(&self.document, TOGGLE_SELECTOR)?;
        Some((drawer, toggle))
    }

    pub fn toggle_menu(self: &Rc<Self>) {
        let Some((drawer, toggle)) = self.drawer_elements() else {
            return;
        };
        let transition = self.state.borrow_mut().drawer.toggle();
        self.apply_drawer(transition, &drawer, &toggle);

        if transition == DrawerTransition::Opened {
            self.defer(self.config.focus_delay_ms, |c| {
                if !c.is_menu_open() {
                    return;
                }
                let link = dom::by_id(&c.document, DRAWER_ID)
                    .and_then(|drawer| drawer.query_selector("a").ok().flatten());
                if let Some(link) = link {
                    dom::focus(&link);
                }
            });
        }
    }

    pub fn close_menu(&self, reason: CloseReason) {
        let Some((drawer, toggle)) = self.drawer_elements() else {
            return;
        };
        let Some(transition) = self.state.borrow_mut().drawer.close() else {
            return;
        };
        log::debug!("closing drawer: {reason:?}");
        self.apply_drawer(transition, &drawer, &toggle);
    }

    fn apply_drawer(&self, transition: DrawerTransition, drawer: &Element, toggle: &Element) {
        let open = transition == DrawerTransition::Opened;

        dom::set_class(drawer, ACTIVE, open);
        dom::set_class(toggle, ACTIVE, open);
        let (expanded, hidden) = if open { ("true", "false") } else { ("false", "true") };
        let _ = toggle.set_attribute("aria-expanded", expanded);
        let _ = drawer.set_attribute("aria-hidden", hidden);

        if let Some(body) = self.document.body() {
            dom::set_overflow(&body, open);
        }
        if let Some(root) = self
            .document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            dom::set_overflow(&root, open);
        }

        if !open {
            dom::focus(toggle);
        }
    }

    /// Closes the drawer when a click or touch lands outside both the drawer
    /// and its toggle.
    pub fn on_pointer_down(&self, target: Option<Node>) {
        if !self.is_menu_open() {
            return;
        }
        let (Some((drawer, toggle)), Some(target)) = (self.drawer_elements(), target) else {
            return;
        };
        if !dom::contains(&drawer, &target) && !dom::contains(&toggle, &target) {
            self.close_menu(CloseReason::OutsidePointer);
        }
    }

    pub fn on_escape(&self) {
        if self.is_menu_open() {
            self.close_menu(CloseReason::Escape);
        }
    }

    pub fn on_touch_start(&self, target: Option<Node>, x: f64, y: f64) {
        let inside_drawer = match (&target, dom::by_id(&self.document, DRAWER_ID)) {
            (Some(node), Some(drawer)) => dom::contains(&drawer, node),
            _ => false,
        };
        if inside_drawer && self.is_menu_open() {
            self.swipe.borrow_mut().begin(x, y);
        } else {
            self.swipe.borrow_mut().cancel();
            self.on_pointer_down(target);
        }
    }

    pub fn on_touch_end(&self, x: f64, y: f64) {
        let swiped = self
            .swipe
            .borrow_mut()
            .finish(x, y, self.config.swipe_close_threshold);
        if swiped {
            self.close_menu(CloseReason::Swipe);
        }
    }

    /// True when a touchmove at `target` must be suppressed to keep the page
    /// behind the open drawer from scrolling.
    pub fn blocks_touch_move(&self, target: Option<Node>) -> bool {
        if !self.is_menu_open() {
            return false;
        }
        match (dom::by_id(&self.document, DRAWER_ID), target) {
            (Some(drawer), Some(node)) => !dom::contains(&drawer, &node),
            _ => true,
        }
    }

    // ---------------------------------------------------------------------
    // Viewport and particles
    // ---------------------------------------------------------------------

    pub fn generate_particles(&self) {
        let Some(container) = dom::by_id(&self.document, PARTICLES_ID) else {
            return;
        };
        container.set_inner_html("");
        self.particle_generations.set(self.particle_generations.get() + 1);

        let mut rand = js_sys::Math::random;
        let batch = particles::generate_batch(self.config.particle_count, &mut rand, self.device());
        for style in batch {
            let Ok(particle) = self.document.create_element("div") else {
                continue;
            };
            particle.set_class_name("particle");
            if let Some(el) = particle.dyn_ref::<HtmlElement>() {
                let css = el.style();
                for (property, value) in style.declarations() {
                    let _ = css.set_property(property, &value);
                }
            }
            let _ = container.append_child(&particle);
        }
    }

    pub fn on_resize(self: &Rc<Self>) {
        self.apply_viewport(detect_device(&self.window, &self.config));
    }

    fn apply_viewport(self: &Rc<Self>, detected: DeviceClass) {
        let previous = std::mem::replace(&mut self.state.borrow_mut().device, detected);

        match device::resize_action(previous, detected) {
            ResizeAction::Crossed => {
                log::debug!("viewport class changed to {detected:?}");
                self.close_menu(CloseReason::Breakpoint);
                self.resize_timer.borrow_mut().cancel();
                self.generate_particles();
            }
            ResizeAction::Debounce => {
                let this = Rc::clone(self);
                self.resize_timer
                    .borrow_mut()
                    .trigger(move || this.generate_particles());
            }
        }
    }

    pub fn on_visibility_change(&self) {
        self.apply_visibility(self.document.hidden());
    }

    fn apply_visibility(&self, hidden: bool) {
        if let Some(container) = dom::by_id(&self.document, PARTICLES_ID) {
            dom::set_class(&container, "paused", hidden);
        }
        if !hidden {
            self.highlight_active_section();
        }
    }
}

fn detect_device(window: &Window, config: &PageConfig) -> DeviceClass {
    let width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(f64::INFINITY);
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    DeviceClass::detect(width, &user_agent, config.mobile_breakpoint)
}
