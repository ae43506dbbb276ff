//! Termination flag and the signal listener feeding it.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, OnceLock,
};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::model::TermSignal;

#[derive(Debug, Default)]
struct Inner {
    terminated: AtomicBool,
    signal: OnceLock<TermSignal>,
}

/// Shared termination indicator.
///
/// Set once from the signal listener (or by the application itself), read by
/// the runner between two loop iterations.
#[derive(Debug, Clone, Default)]
pub struct Termination {
    inner: Arc<Inner>,
}

impl Termination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a termination request. Returns `false` if one was already recorded.
    pub fn request(&self, signal: TermSignal) -> bool {
        if self.inner.signal.set(signal).is_err() {
            debug!(signal = signal.name(), "termination already requested");
            return false;
        }
        self.inner.terminated.store(true, Ordering::SeqCst);
        warn!(signal = signal.name(), "termination signal received");
        true
    }

    pub fn is_terminated(&self) -> bool {
        self.inner.terminated.load(Ordering::SeqCst)
    }

    /// The signal that caused termination, if any.
    pub fn signal(&self) -> Option<TermSignal> {
        self.inner.signal.get().copied()
    }
}

/// Listen for SIGINT and SIGTERM and forward them to `termination`.
///
/// Handlers are registered before returning, so a signal received right after
/// this call is not lost. Abort the returned task to stop listening.
#[cfg(unix)]
pub(crate) fn install(termination: Termination) -> std::io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    debug!("termination signal handlers installed");

    Ok(tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                Some(()) = interrupt.recv() => TermSignal::Interrupt,
                Some(()) = terminate.recv() => TermSignal::Terminate,
                else => break,
            };
            termination.request(received);
        }
    }))
}

#[cfg(not(unix))]
pub(crate) fn install(termination: Termination) -> std::io::Result<JoinHandle<()>> {
    debug!("termination signal handlers installed (ctrl-c only)");

    Ok(tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            termination.request(TermSignal::Interrupt);
        }
        futures::future::pending::<()>().await
    }))
}
