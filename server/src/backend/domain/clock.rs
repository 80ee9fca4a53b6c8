//! Source of the local wall-clock time handed to the alert rules.

use chrono::{Local, NaiveDateTime};

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The machine's local time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Settable clock for tests
#[cfg(test)]
#[derive(Debug)]
pub struct FixedClock(std::sync::Mutex<NaiveDateTime>);

#[cfg(test)]
impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self(std::sync::Mutex::new(now))
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.0.lock().unwrap() = now;
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.0.lock().unwrap()
    }
}
