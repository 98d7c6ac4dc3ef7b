// Cooperative cancellation shared by the training and interactive loops

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::Cancelled;

/// Cloneable quit flag, checked by loops at every step boundary
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled)` once a quit has been requested
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Cancel `token` when the process receives Ctrl+C
///
/// The signal is awaited on a dedicated thread running a current-thread tokio
/// runtime, so the simulation itself stays synchronous.
pub fn install_ctrl_c_handler(token: CancellationToken) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    std::thread::Builder::new()
        .name("ctrl-c".to_string())
        .spawn(move || {
            runtime.block_on(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        info!("Quit requested, stopping at the next step");
                        token.cancel();
                    }
                    Err(e) => warn!("Unable to listen for Ctrl+C: {}", e),
                }
            });
        })?;

    Ok(())
}
