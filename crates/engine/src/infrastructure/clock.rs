use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

/// Time source for the pipeline.
///
/// The GUI throttle and the persistence writers take a shared
/// `Rc<dyn Clock>` so tests can drive time explicitly.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: RefCell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: RefCell::new(now),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.borrow_mut();
        *now += duration;
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.borrow_mut() = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.borrow()
    }
}

/// Convenience alias for the shared form services hold.
pub type SharedClock = Rc<dyn Clock>;
