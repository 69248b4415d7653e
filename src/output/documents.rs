//! Document building and the JSON files built from it

use crate::crawler::OperationLink;
use crate::model::{DocumentRecord, ServiceDescriptor};
use crate::output::write_json;
use crate::RefIndexError;
use std::path::Path;

/// Converts the operation links of one service into search documents
///
/// Unresolved services produce no documents, so every record's
/// `service_id` matches some resolved descriptor.
pub fn build_documents(service: &ServiceDescriptor, links: &[OperationLink]) -> Vec<DocumentRecord> {
    let Some(service_id) = service.service_id.as_deref() else {
        return Vec::new();
    };

    links
        .iter()
        .map(|link| {
            DocumentRecord::new(
                link.kind,
                &service.name,
                service_id,
                &link.method,
                link.url.clone(),
            )
        })
        .collect()
}

/// Writes the full document corpus as one JSON array
pub fn write_documents(documents: &[DocumentRecord], path: &Path) -> Result<(), RefIndexError> {
    write_json(documents, path)
}

/// Reads a document corpus written by `write_documents`
pub fn read_documents(path: &Path) -> Result<Vec<DocumentRecord>, RefIndexError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Writes the intermediate list of services
pub fn write_services(services: &[ServiceDescriptor], path: &Path) -> Result<(), RefIndexError> {
    write_json(services, path)
}
