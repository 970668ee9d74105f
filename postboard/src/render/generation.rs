use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{RenderError, RenderResult};

/// Shared counter of render passes; each dropdown selection opens a new one
#[derive(Debug, Clone, Default)]
pub struct Generations {
    current: Arc<AtomicU64>,
}

impl Generations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new render pass, making every earlier ticket stale
    pub fn issue(&self) -> RenderTicket {
        let issued = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        RenderTicket {
            current: Arc::clone(&self.current),
            issued,
        }
    }
}

/// Proof that a render pass may still write to the page
#[derive(Debug, Clone)]
pub struct RenderTicket {
    current: Arc<AtomicU64>,
    issued: u64,
}

impl RenderTicket {
    pub fn generation(&self) -> u64 {
        self.issued
    }

    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.issued
    }

    pub fn ensure_current(&self) -> RenderResult<()> {
        if self.is_current() {
            Ok(())
        } else {
            Err(RenderError::Superseded)
        }
    }
}
