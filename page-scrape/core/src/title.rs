// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::ScrapeError;
use scraper::{Html, Selector};

/// Text of the first `<h1>` in the document, whitespace collapsed
pub fn extract_title(html: &str) -> Result<String, ScrapeError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("h1").map_err(|_| ScrapeError::MissingTitle)?;

    let heading = document
        .select(&selector)
        .next()
        .ok_or(ScrapeError::MissingTitle)?;

    let title = heading
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        return Err(ScrapeError::MissingTitle);
    }
    Ok(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_heading_wins() {
        let html = "<html><body><h1>Rust (programming language)</h1><h1>Other</h1></body></html>";
        assert_eq!(extract_title(html).unwrap(), "Rust (programming language)");
    }

    #[test]
    fn test_nested_markup_and_whitespace() {
        let html = "<h1 id=\"firstHeading\">\n  <span class=\"mw-page-title-main\">Tab\tand</span>\n  <i>spaces</i>  </h1>";
        assert_eq!(extract_title(html).unwrap(), "Tab and spaces");
    }

    #[test]
    fn test_missing_or_empty_heading() {
        assert!(matches!(
            extract_title("<html><title>No heading</title></html>"),
            Err(ScrapeError::MissingTitle)
        ));
        assert!(matches!(
            extract_title("<h1>   </h1>"),
            Err(ScrapeError::MissingTitle)
        ));
    }
}
