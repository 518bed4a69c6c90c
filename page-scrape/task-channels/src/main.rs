// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod tokio_runtime;

use clap::Parser;
use page_scrape_core::{
    init_tracing, print_config, print_summary, run_scrape_worker, Dispatcher, ScrapeArgs,
};
use std::sync::Arc;
use std::time::Instant;
use tokio_runtime::{TaskRuntime, TokenSignal};
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let start_time = Instant::now();

    let config = Arc::new(ScrapeArgs::parse().resolve()?);
    print_config("PAGE SCRAPE (tokio tasks)", &config);

    let cancel_token = CancellationToken::new();

    // Setup Ctrl+C handler
    let ctrl_c_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl+C received, initiating shutdown");
            ctrl_c_token.cancel();
        }
    });

    let dispatcher: Dispatcher<TaskRuntime, _> = Dispatcher::new(
        config.worker_count(),
        config.remainder_policy,
        TokenSignal::from(cancel_token),
    );

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
