//! Build statistics
//!
//! This module summarizes what a build produced and prints it for the
//! operator at the end of a run.

use crate::crawler::{CrawlOutput, FetchStats};
use crate::model::OperationKind;
use std::collections::HashMap;
use std::path::PathBuf;

/// Summary of one build
#[derive(Debug, Clone)]
pub struct BuildSummary {
    /// Number of services on the index page
    pub services_discovered: usize,

    /// Number of services whose identifier was resolved
    pub services_resolved: usize,

    /// Names of services that contributed no documents for lack of an identifier
    pub unresolved_services: Vec<String>,

    /// Total number of documents written
    pub documents: usize,

    /// Document count per operation kind
    pub documents_by_kind: HashMap<OperationKind, usize>,

    /// Titles that appear more than once
    pub duplicate_titles: usize,

    pub fetch_stats: FetchStats,

    pub data_path: PathBuf,
    pub setting_path: PathBuf,
}

impl BuildSummary {
    /// Computes the summary of a finished crawl
    pub fn from_crawl(
        output: &CrawlOutput,
        fetch_stats: FetchStats,
        data_path: PathBuf,
        setting_path: PathBuf,
    ) -> Self {
        let mut documents_by_kind = HashMap::new();
        let mut title_counts: HashMap<&str, usize> = HashMap::new();

        for doc in &output.documents {
            let kind = if doc.order == OperationKind::Client.order() {
                OperationKind::Client
            } else {
                OperationKind::Paginator
            };
            *documents_by_kind.entry(kind).or_insert(0) += 1;
            *title_counts.entry(doc.title.as_str()).or_insert(0) += 1;
        }

        let duplicate_titles = title_counts.values().filter(|&&n| n > 1).count();
        if duplicate_titles > 0 {
            tracing::warn!("{} titles appear more than once", duplicate_titles);
        }

        Self {
            services_discovered: output.services.len(),
            services_resolved: output.resolved_count(),
            unresolved_services: output
                .services
                .iter()
                .filter(|s| !s.is_resolved())
                .map(|s| s.name.clone())
                .collect(),
            documents: output.documents.len(),
            documents_by_kind,
            duplicate_titles,
            fetch_stats,
            data_path,
            setting_path,
        }
    }

    /// Number of documents of the given kind
    pub fn count(&self, kind: OperationKind) -> usize {
        self.documents_by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// Prints a build summary to stdout
pub fn print_summary(summary: &BuildSummary) {
    println!("=== Build Summary ===\n");

    println!("Services:");
    println!("  Discovered: {}", summary.services_discovered);
    println!("  Resolved: {}", summary.services_resolved);
    if !summary.unresolved_services.is_empty() {
        println!("  Skipped: {}", summary.unresolved_services.join(", "));
    }

    println!("\nDocuments: {}", summary.documents);
    println!("  Client operations: {}", summary.count(OperationKind::Client));
    println!("  Paginators: {}", summary.count(OperationKind::Paginator));
    if summary.duplicate_titles > 0 {
        println!("  Duplicate titles: {}", summary.duplicate_titles);
    }

    println!("\nFetches:");
    println!("  Cache hits: {}", summary.fetch_stats.cache_hits);
    println!("  Network: {}", summary.fetch_stats.network_fetches);

    println!("\nOutput:");
    println!("  Data: {}", summary.data_path.display());
    println!("  Settings: {}", summary.setting_path.display());
}
