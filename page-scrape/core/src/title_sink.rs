// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::ScrapeError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Trait for storing the titles one worker scraped
#[async_trait]
pub trait TitleSink: Send + Sync {
    /// Append the titles as a single record
    async fn append_line(&self, titles: &[String]) -> Result<(), ScrapeError>;
}

/// Appends one tab-separated line per call to a shared file
///
/// The line is written with a single `write_all` on a handle opened in
/// append mode, so lines from concurrent workers do not interleave.
#[derive(Debug, Clone)]
pub struct FileTitleSink {
    path: PathBuf,
}

impl FileTitleSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sink_error(&self, source: std::io::Error) -> ScrapeError {
        ScrapeError::Sink {
            path: self.path.display().to_string(),
            source,
        }
    }
}

fn format_line(titles: &[String]) -> String {
    let mut line = String::new();
    for title in titles {
        line.push_str(title);
        line.push('\t');
    }
    line.push('\n');
    line
}

#[async_trait]
impl TitleSink for FileTitleSink {
    async fn append_line(&self, titles: &[String]) -> Result<(), ScrapeError> {
        if titles.is_empty() {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.sink_error(e))?;

        file.write_all(format_line(titles).as_bytes())
            .await
            .map_err(|e| self.sink_error(e))?;
        file.flush().await.map_err(|e| self.sink_error(e))
    }
}
