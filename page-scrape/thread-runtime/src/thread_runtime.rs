// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use page_scrape_core::WorkerRuntime;
use std::any::Any;
use std::future::Future;
use std::io;
use std::panic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use tokio::runtime::Runtime;
use tracing::error;

static NEXT_THREAD: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, thiserror::Error)]
pub enum ThreadJoinError {
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("worker thread panicked: {0}")]
    Panicked(String),

    #[error("failed to wait for worker thread: {0}")]
    Blocking(#[from] tokio::task::JoinError),
}

/// OS thread per worker, each driving its own single-threaded tokio runtime
pub struct ThreadRuntime;

impl WorkerRuntime for ThreadRuntime {
    type Handle = io::Result<JoinHandle<()>>;
    type Error = ThreadJoinError;

    fn spawn<F, Fut>(f: F) -> Self::Handle
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let name = format!("scrape-worker-{}", NEXT_THREAD.fetch_add(1, Ordering::Relaxed));
        thread::Builder::new().name(name).spawn(move || {
            drive(
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build(),
                f,
            )
        })
    }

    async fn join(handle: Self::Handle) -> Result<(), Self::Error> {
        let handle = handle.map_err(ThreadJoinError::Spawn)?;
        match tokio::task::spawn_blocking(move || handle.join()).await? {
            Ok(()) => Ok(()),
            Err(payload) => Err(ThreadJoinError::Panicked(panic_message(payload.as_ref()))),
        }
    }
}

/// Runs the worker on its runtime, unwinding with the build error if there is none
/// so that `join` reports it like any other crash
fn drive<F, Fut>(runtime: io::Result<Runtime>, f: F)
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    match runtime {
        Ok(runtime) => runtime.block_on(f()),
        Err(e) => {
            error!(error = %e, "Failed to start worker runtime");
            panic::resume_unwind(Box::new(format!("failed to start worker runtime: {}", e)));
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
