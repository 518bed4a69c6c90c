// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Config, DispatchReport, ScrapeError};
use std::time::Duration;

pub fn print_config(title: &str, config: &Config) {
    println!("=== {} ===", title);
    println!("Configuration:");
    println!("  - Pages: {}", config.num_pages);
    println!("  - Workers: {}", config.worker_count());
    println!("  - Remainder policy: {:?}", config.remainder_policy);
    println!("  - Page URL: {}", config.page_url);
    println!("  - Output file: {}", config.output_file.display());
}

pub fn print_summary(report: &DispatchReport<ScrapeError>, elapsed: Duration) {
    println!("\n=== RESULTS ===");
    for outcome in report.outcomes() {
        match &outcome.result {
            Ok(scraped) => println!(
                "Worker {}: {}/{} pages",
                outcome.worker_id, scraped, outcome.assigned
            ),
            Err(failure) => println!(
                "Worker {}: failed with {} pages assigned ({})",
                outcome.worker_id, outcome.assigned, failure
            ),
        }
    }

    println!(
        "\nPages scraped: {}/{}",
        report.completed_units(),
        report.partition().total_units()
    );
    println!("Time to complete: {:.2} seconds.", elapsed.as_secs_f64());
}
