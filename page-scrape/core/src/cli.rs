// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Config, ConfigError, RemainderPolicy};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    LastWorker,
    Spread,
}

impl From<PolicyArg> for RemainderPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::LastWorker => RemainderPolicy::LastWorker,
            PolicyArg::Spread => RemainderPolicy::Spread,
        }
    }
}

/// Scrape random pages in parallel and append their titles to a file
#[derive(Debug, Parser)]
#[command(version)]
pub struct ScrapeArgs {
    /// JSON configuration file; defaults are used when it does not exist
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Pages to scrape altogether
    #[arg(long)]
    pub pages: Option<usize>,

    /// Parallel workers (defaults to the number of CPUs)
    #[arg(long)]
    pub workers: Option<usize>,

    /// File to append scraped titles to
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Page to request for every unit of work
    #[arg(long)]
    pub url: Option<String>,

    /// Which workers absorb the pages left over by the even split
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,
}

impl ScrapeArgs {
    /// Loads the config file and applies the command-line overrides on top
    pub fn resolve(&self) -> Result<Config, ConfigError> {
        let mut config = Config::load_or_default(&self.config)?;

        if let Some(pages) = self.pages {
            config.num_pages = pages;
        }
        if let Some(workers) = self.workers {
            config.num_workers = Some(workers);
        }
        if let Some(output) = &self.output {
            config.output_file = output.clone();
        }
        if let Some(url) = &self.url {
            config.page_url = url.clone();
        }
        if let Some(policy) = self.policy {
            config.remainder_policy = policy.into();
        }

        config.validate()?;
        Ok(config)
    }
}
