//! Mobile drawer state machine. The DOM side applies whatever transition
//! these methods report; a `None` means nothing must be touched.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawerState {
    #[default]
    Closed,
    Open,
}

/// Side effects the DOM layer has to perform for a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerTransition {
    /// Lock scrolling, expose the drawer, focus its first link.
    Opened,
    /// Unlock scrolling, hide the drawer, focus the toggle.
    Closed,
}

#[derive(Debug, Default)]
pub struct Drawer {
    state: DrawerState,
}

impl Drawer {
    pub fn is_open(&self) -> bool {
        self.state == DrawerState::Open
    }

    pub fn state(&self) -> DrawerState {
        self.state
    }

    pub fn toggle(&mut self) -> DrawerTransition {
        match self.state {
            DrawerState::Closed => {
                self.state = DrawerState::Open;
                DrawerTransition::Opened
            }
            DrawerState::Open => {
                self.state = DrawerState::Closed;
                DrawerTransition::Closed
            }
        }
    }

    pub fn close(&mut self) -> Option<DrawerTransition> {
        if self.is_open() {
            self.state = DrawerState::Closed;
            Some(DrawerTransition::Closed)
        } else {
            None
        }
    }
}

/// Why a forced close was requested; only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    OutsidePointer,
    Escape,
    Breakpoint,
    Navigation,
    LanguageSwitch,
    Swipe,
    Explicit,
}

/// Tracks a single touch gesture started inside the drawer.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    origin: Option<(f64, f64)>,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: f64, y: f64) {
        self.origin = Some((x, y));
    }

    pub fn cancel(&mut self) {
        self.origin = None;
    }

    /// Ends the gesture. True for a mostly horizontal rightward swipe of at
    /// least `threshold` px.
    pub fn finish(&mut self, x: f64, y: f64, threshold: f64) -> bool {
        let Some((x0, y0)) = self.origin.take() else {
            return false;
        };
        let dx = x - x0;
        let dy = y - y0;
        dx >= threshold && dx.abs() > dy.abs()
    }
}
