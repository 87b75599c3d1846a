use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};

type FrameCallback = Rc<dyn Fn(f64)>;

struct TickerState {
    frame: RefCell<Option<AnimationFrame>>,
    running: Cell<bool>,
}

/// Animation-frame loop with an explicit start/stop contract. Dropping the
/// ticker stops it; no frame is ever requested after [`stop`](Self::stop).
pub(crate) struct FrameTicker {
    state: Rc<TickerState>,
}

impl FrameTicker {
    pub(crate) fn new() -> Self {
        Self {
            state: Rc::new(TickerState {
                frame: RefCell::new(None),
                running: Cell::new(false),
            }),
        }
    }

    pub(crate) fn start(&self, on_frame: impl Fn(f64) + 'static) {
        if self.state.running.replace(true) {
            return;
        }
        schedule(Rc::clone(&self.state), Rc::new(on_frame));
    }

    pub(crate) fn stop(&self) {
        self.state.running.set(false);
        self.state.frame.borrow_mut().take();
    }

    #[cfg(all(test, target_arch = "wasm32"))]
    pub(crate) fn is_running(&self) -> bool {
        self.state.running.get()
    }
}

impl Drop for FrameTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn schedule(state: Rc<TickerState>, on_frame: FrameCallback) {
    let next_state = Rc::clone(&state);
    let handle = request_animation_frame(move |timestamp| {
        next_state.frame.borrow_mut().take();
        if !next_state.running.get() {
            return;
        }
        on_frame(timestamp);
        if next_state.running.get() {
            schedule(Rc::clone(&next_state), on_frame);
        }
    });
    *state.frame.borrow_mut() = Some(handle);
}
