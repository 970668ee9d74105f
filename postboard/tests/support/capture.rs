//! Collects log records per thread.
//!
//! `#[tokio::test]` runs each test on its own current-thread runtime, so
//! records from parallel tests never mix.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct ThreadCapture;

impl Log for ThreadCapture {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: ThreadCapture = ThreadCapture;
static INSTALL: Once = Once::new();

/// Install the capturing logger and forget anything this thread logged so far
pub fn start() {
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
    RECORDS.with(|records| records.borrow_mut().clear());
}

/// Every record logged on this thread since [`start`]
pub fn take() -> Vec<(Level, String)> {
    RECORDS.with(|records| std::mem::take(&mut *records.borrow_mut()))
}

/// Messages logged at `error` level on this thread since [`start`]
pub fn errors() -> Vec<String> {
    take()
        .into_iter()
        .filter(|(level, _)| *level == Level::Error)
        .map(|(_, message)| message)
        .collect()
}
