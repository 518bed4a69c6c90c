// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod partition;
pub use partition::{
    partition, partition_signed, partition_with, Partition, PartitionError, RemainderPolicy,
    WorkAssignment,
};

pub mod worker_runtime;
pub use worker_runtime::WorkerRuntime;

pub mod shutdown_signal;
pub use shutdown_signal::ShutdownSignal;

mod dispatcher;
pub use dispatcher::{DispatchError, DispatchReport, Dispatcher, WorkerFailure, WorkerOutcome};

mod scrape_error;
pub use scrape_error::ScrapeError;

pub mod page_source;
pub use page_source::PageSource;

mod http_page_source;
pub use http_page_source::{HttpPageSource, RetryPolicy};

mod title;
pub use title::extract_title;

pub mod title_sink;
pub use title_sink::{FileTitleSink, TitleSink};

mod scrape;
pub use scrape::{run_scrape_worker, scrape_pages};

mod config;
pub use config::{Config, ConfigError};

mod cli;
pub use cli::{PolicyArg, ScrapeArgs};

mod summary;
pub use summary::{print_config, print_summary};

mod telemetry;
pub use telemetry::init_tracing;
