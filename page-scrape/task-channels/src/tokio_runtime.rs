// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use page_scrape_core::{ShutdownSignal, WorkerRuntime};
use std::future::Future;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Every worker is a task on the ambient multi-threaded tokio runtime
pub struct TaskRuntime;

impl WorkerRuntime for TaskRuntime {
    type Handle = JoinHandle<()>;
    type Error = tokio::task::JoinError;

    fn spawn<F, Fut>(f: F) -> Self::Handle
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(f())
    }

    async fn join(handle: Self::Handle) -> Result<(), Self::Error> {
        handle.await
    }
}

/// Shutdown raised by cancelling the token (or any of its parents)
#[derive(Clone)]
pub struct TokenSignal(CancellationToken);

impl From<CancellationToken> for TokenSignal {
    fn from(token: CancellationToken) -> Self {
        Self(token)
    }
}

impl ShutdownSignal for TokenSignal {
    fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }
}
