use crate::models::viewport_types::SizeClass;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

type Subscriber = Box<dyn Fn(SizeClass) + Send + Sync>;

struct ViewportState {
    width: u32,
    class: SizeClass,
}

/// Single process-wide resize observer. Components subscribe to width-class
/// changes instead of each hanging its own listener off the window, and the
/// observer notifies only when the class actually changes, not on every
/// resize pixel.
pub struct ViewportObserver {
    state: Mutex<ViewportState>,
    subscribers: Mutex<HashMap<u64, Subscriber>>,
    next_token: AtomicU64,
}

const DEFAULT_WIDTH: u32 = 1280;

impl ViewportObserver {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ViewportState {
                width: DEFAULT_WIDTH,
                class: SizeClass::from_width(DEFAULT_WIDTH),
            }),
            subscribers: Mutex::new(HashMap::new()),
            next_token: AtomicU64::new(1),
        }
    }

    pub fn subscribe(&self, subscriber: impl Fn(SizeClass) + Send + Sync + 'static) -> u64 {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        self.subscribers
            .lock()
            .unwrap()
            .insert(token, Box::new(subscriber));
        token
    }

    pub fn unsubscribe(&self, token: u64) {
        self.subscribers.lock().unwrap().remove(&token);
    }

    /// Feed the current window width. Subscribers run only on a class
    /// change.
    pub fn update(&self, width: u32) -> SizeClass {
        let (class, changed) = {
            let mut state = self.state.lock().unwrap();
            state.width = width;
            let class = SizeClass::from_width(width);
            let changed = class != state.class;
            state.class = class;
            (class, changed)
        };

        if changed {
            tracing::debug!(width, ?class, "viewport class changed");
            for subscriber in self.subscribers.lock().unwrap().values() {
                subscriber(class);
            }
        }
        class
    }

    pub fn size_class(&self) -> SizeClass {
        self.state.lock().unwrap().class
    }

    pub fn width(&self) -> u32 {
        self.state.lock().unwrap().width
    }
}

impl Default for ViewportObserver {
    fn default() -> Self {
        Self::new()
    }
}
