// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::ScrapeError;
use async_trait::async_trait;

/// Trait for fetching one page's HTML
/// Each call may return a different page (e.g. a random-article endpoint)
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self) -> Result<String, ScrapeError>;
}
