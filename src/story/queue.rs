//! Run-to-completion queue for controller actions
//!
//! Effects listeners may call back into the page glue while an outcome is
//! still being dispatched. Those actions are queued and run once the current
//! one has finished, in submission order.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

#[derive(Debug)]
pub struct ActionQueue<A> {
    pending: RefCell<VecDeque<A>>,
    running: Cell<bool>,
}

impl<A> Default for ActionQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> ActionQueue<A> {
    pub const fn new() -> Self {
        Self {
            pending: RefCell::new(VecDeque::new()),
            running: Cell::new(false),
        }
    }

    /// Actions waiting for the current run to finish
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Queue `action`. If nothing is running yet, run it with `run` along with
    /// everything submitted meanwhile, and return how many actions ran.
    /// Nested submissions return 0; their action runs in the outer loop.
    pub fn submit(&self, action: A, mut run: impl FnMut(A)) -> usize {
        self.pending.borrow_mut().push_back(action);
        if self.running.replace(true) {
            log::debug!("Queued action behind the running one");
            return 0;
        }

        let mut ran = 0;
        loop {
            // The pending borrow must end before `run` can submit again
            let next = self.pending.borrow_mut().pop_front();
            let Some(next) = next else { break };
            run(next);
            ran += 1;
        }
        self.running.set(false);
        ran
    }
}
