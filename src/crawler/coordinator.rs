//! Crawler coordinator - main crawl orchestration logic
//!
//! The crawl runs in two phases over a fixed two-level link structure:
//!
//! 1. Index discovery: the services index page becomes a list of
//!    `ServiceDescriptor`s with unresolved identifiers.
//! 2. Resolution: every service page is visited to resolve its identifier,
//!    and only once all identifiers are known are the operation links
//!    turned into `DocumentRecord`s.
//!
//! Pages are fetched one at a time through the page cache, so the second
//! visit to a service page during extraction never hits the network.

use crate::cache::PageCache;
use crate::crawler::fetcher::{CachedFetcher, FetchStats};
use crate::crawler::parser::{parse_service_id, parse_service_index, parse_service_operations};
use crate::model::{DocumentRecord, ServiceDescriptor};
use crate::output::build_documents;
use crate::RefIndexError;
use url::Url;

/// Everything one crawl produced
#[derive(Debug, Clone, Default)]
pub struct CrawlOutput {
    /// All discovered services, resolved or not
    pub services: Vec<ServiceDescriptor>,

    /// Documents for every resolved service, in discovery order
    pub documents: Vec<DocumentRecord>,
}

impl CrawlOutput {
    pub fn resolved_count(&self) -> usize {
        self.services.iter().filter(|s| s.is_resolved()).count()
    }
}

/// Main crawler coordinator structure
pub struct Coordinator<C: PageCache> {
    index_url: Url,
    fetcher: CachedFetcher<C>,
}

impl<C: PageCache> Coordinator<C> {
    /// Creates a coordinator that crawls from `index_url`
    pub fn new(index_url: Url, fetcher: CachedFetcher<C>) -> Self {
        Self { index_url, fetcher }
    }

    /// Runs both crawl phases
    pub async fn run(&mut self) -> Result<CrawlOutput, RefIndexError> {
        let mut services = self.discover_services().await?;
        self.resolve_service_ids(&mut services).await?;
        let documents = self.extract_documents(&services).await?;

        Ok(CrawlOutput {
            services,
            documents,
        })
    }

    /// Phase 1: fetches the index page and lists the services on it
    pub async fn discover_services(&mut self) -> Result<Vec<ServiceDescriptor>, RefIndexError> {
        tracing::info!("Discovering services from {}", self.index_url);
        let html = self.fetcher.fetch(self.index_url.as_str()).await?;
        let services = parse_service_index(&html, &self.index_url);
        tracing::info!("Found {} services", services.len());
        Ok(services)
    }

    /// Phase 2a: visits each service page and fills in its identifier
    ///
    /// Services without a recognizable client snippet stay unresolved.
    pub async fn resolve_service_ids(
        &mut self,
        services: &mut [ServiceDescriptor],
    ) -> Result<(), RefIndexError> {
        let total = services.len();

        for (i, service) in services.iter_mut().enumerate() {
            tracing::info!("[{}/{}] working on {} ...", i + 1, total, service.url);
            let html = self.fetcher.fetch(&service.url).await?;

            service.service_id = parse_service_id(&html);
            match &service.service_id {
                Some(id) => tracing::debug!("{} resolves to '{}'", service.name, id),
                None => tracing::warn!(
                    "No client snippet on {}, skipping service {}",
                    service.url,
                    service.name
                ),
            }
        }

        Ok(())
    }

    /// Phase 2b: turns the operation links of resolved services into documents
    pub async fn extract_documents(
        &mut self,
        services: &[ServiceDescriptor],
    ) -> Result<Vec<DocumentRecord>, RefIndexError> {
        let mut documents = Vec::new();

        for service in services.iter().filter(|s| s.is_resolved()) {
            let page_url = match Url::parse(&service.url) {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!("Skipping {}: {}", service.url, e);
                    continue;
                }
            };

            let html = self.fetcher.fetch(&service.url).await?;
            let links = parse_service_operations(&html, &page_url);
            let docs = build_documents(service, &links);
            tracing::debug!("{}: {} documents", service.name, docs.len());
            documents.extend(docs);
        }

        tracing::info!("Extracted {} documents", documents.len());
        Ok(documents)
    }

    pub fn fetch_stats(&self) -> FetchStats {
        self.fetcher.stats()
    }
}
