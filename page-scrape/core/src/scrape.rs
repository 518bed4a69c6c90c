// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{
    extract_title, Config, FileTitleSink, HttpPageSource, PageSource, ScrapeError, ShutdownSignal,
    TitleSink, WorkAssignment,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One worker's job: its own HTTP client, appending to the configured output file
pub async fn run_scrape_worker<S: ShutdownSignal>(
    config: Arc<Config>,
    assignment: WorkAssignment,
    shutdown: S,
) -> Result<usize, ScrapeError> {
    let source = HttpPageSource::from_config(&config)?;
    let sink = FileTitleSink::new(&config.output_file);
    scrape_pages(&assignment, &source, &sink, &shutdown).await
}

/// Scrapes `assignment.units` pages and appends their titles as one line
///
/// Stops early when shutdown is requested or a page fails; titles gathered
/// up to that point are still written. Returns the number of pages scraped.
pub async fn scrape_pages<S: ShutdownSignal>(
    assignment: &WorkAssignment,
    source: &dyn PageSource,
    sink: &dyn TitleSink,
    shutdown: &S,
) -> Result<usize, ScrapeError> {
    let worker_id = assignment.worker_id;
    info!(worker_id, pages = assignment.units, "Worker starting");

    let mut titles = Vec::with_capacity(assignment.units);
    let mut failure = None;

    for _ in 0..assignment.units {
        if shutdown.is_cancelled() {
            warn!(worker_id, scraped = titles.len(), "Worker cancelled");
            break;
        }

        let title = match source.fetch().await {
            Ok(html) => extract_title(&html),
            Err(e) => Err(e),
        };
        match title {
            Ok(title) => {
                debug!(worker_id, %title, "Scraped page");
                titles.push(title);
            }
            Err(e) => {
                warn!(worker_id, error = %e, "Page failed");
                failure = Some(e);
                break;
            }
        }
    }

    let written = sink.append_line(&titles).await;

    match failure {
        Some(e) => {
            if let Err(sink_error) = written {
                warn!(worker_id, error = %sink_error, "Could not save partial titles");
            }
            Err(e)
        }
        None => {
            written?;
            info!(worker_id, scraped = titles.len(), "Worker finished");
            Ok(titles.len())
        }
    }
}
