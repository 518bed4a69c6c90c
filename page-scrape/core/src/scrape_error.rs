// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// Server answered with a status above 399
    #[error("received a {0} instead of 200")]
    HttpStatus(u16),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("page has no <h1> title")]
    MissingTitle,

    #[error("failed to write titles to {path}: {source}")]
    Sink {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
