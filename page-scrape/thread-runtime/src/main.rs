// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod atomic_shutdown_signal;
mod thread_runtime;

use atomic_shutdown_signal::AtomicShutdownSignal;
use clap::Parser;
use page_scrape_core::{
    init_tracing, print_config, print_summary, run_scrape_worker, Dispatcher, ScrapeArgs,
};
use std::sync::Arc;
use std::time::Instant;
use thread_runtime::ThreadRuntime;
use tracing::warn;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let start_time = Instant::now();

    let config = Arc::new(ScrapeArgs::parse().resolve()?);
    print_config("PAGE SCRAPE (threads, one runtime each)", &config);

    let shutdown = AtomicShutdownSignal::new();
    let handler_signal = shutdown.clone();
    ctrlc::set_handler(move || {
        warn!("Ctrl+C received, initiating shutdown");
        handler_signal.shutdown();
    })?;

    let dispatcher: Dispatcher<ThreadRuntime, _> =
        Dispatcher::new(config.worker_count(), config.remainder_policy, shutdown);

    let job_config = config.clone();
    let report = dispatcher
        .dispatch(config.num_pages, move |assignment, shutdown| {
            run_scrape_worker(job_config.clone(), assignment, shutdown)
        })
        .await?;

    print_summary(&report, start_time.elapsed());

    let failed = report.failures().count();
    if failed > 0 {
        return Err(format!("{} of {} workers failed", failed, dispatcher.worker_count()).into());
    }
    Ok(())
}
