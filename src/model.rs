//! Records produced by the crawl and consumed by the search plugin
//!
//! `ServiceDescriptor` is the intermediate record for one documented AWS
//! service, `DocumentRecord` is one searchable operation, and `IndexSettings`
//! describes how the plugin should index and render those documents.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One documented API group, discovered on the services index page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Display name, taken from the anchor text (e.g. "EC2")
    pub name: String,

    /// Link target relative to the index page (e.g. "ec2.html")
    pub href: String,

    /// Absolute documentation URL of the service page
    pub url: String,

    /// Identifier passed to `boto3.client(...)`; unknown until the service
    /// page has been visited
    pub service_id: Option<String>,
}

impl ServiceDescriptor {
    /// Creates a descriptor with an unresolved identifier
    pub fn new(name: impl Into<String>, href: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
            url: url.into(),
            service_id: None,
        }
    }

    /// Returns true once the service identifier is known
    pub fn is_resolved(&self) -> bool {
        self.service_id.is_some()
    }
}

/// Which documentation section an operation was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// A direct client method
    Client,

    /// An iteration-oriented variant of a client method
    Paginator,
}

impl OperationKind {
    /// Lowercase tag used in titles and search fields
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Paginator => "paginator",
        }
    }

    /// Sort order used to rank direct operations above paginators
    pub fn order(&self) -> u32 {
        match self {
            Self::Client => 1,
            Self::Paginator => 2,
        }
    }

    /// Id of the page section that lists operations of this kind
    pub fn section_id(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Paginator => "paginators",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One searchable API operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Human readable title, `"<kind> | <service_id>.<method>"`
    pub title: String,

    /// Canonical URL of the operation's documentation
    pub url: String,

    /// Lowercase kind tag ("client" or "paginator")
    pub kind: String,

    /// Lowercase service display name
    pub service_name: String,

    /// Lowercase service identifier
    pub service_id: String,

    /// Lowercase method name
    pub method: String,

    /// 1 for client operations, 2 for paginators
    pub order: u32,
}

impl DocumentRecord {
    /// Builds a record for an operation of a resolved service
    ///
    /// The title keeps the method name as written in the docs, the search
    /// fields are lowercased.
    pub fn new(
        kind: OperationKind,
        service_name: &str,
        service_id: &str,
        method: &str,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: format!("{} | {}.{}", kind.tag(), service_id, method),
            url: url.into(),
            kind: kind.tag().to_string(),
            service_name: service_name.to_lowercase(),
            service_id: service_id.to_lowercase(),
            method: method.to_lowercase(),
            order: kind.order(),
        }
    }
}

/// Field definition for the external indexer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,

    /// Stored verbatim and returned with results
    #[serde(default)]
    pub type_is_store: bool,

    /// Tokenized into n-grams for partial matching
    #[serde(default)]
    pub type_is_ngram: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ngram_minsize: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ngram_maxsize: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,

    #[serde(default)]
    pub type_is_numeric: bool,

    #[serde(default)]
    pub is_sortable: bool,
}

impl Column {
    /// A field that is stored but not searched
    pub fn stored(name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_is_store: true,
            type_is_ngram: false,
            ngram_minsize: None,
            ngram_maxsize: None,
            weight: None,
            type_is_numeric: false,
            is_sortable: false,
        }
    }

    /// A stored field searched through n-grams of the given size range
    pub fn ngram(name: &str, min: u32, max: u32, weight: f32) -> Self {
        Self {
            type_is_ngram: true,
            ngram_minsize: Some(min),
            ngram_maxsize: Some(max),
            weight: Some(weight),
            ..Self::stored(name)
        }
    }

    /// A stored numeric field that results can be sorted by
    pub fn sortable_number(name: &str) -> Self {
        Self {
            type_is_numeric: true,
            is_sortable: true,
            ..Self::stored(name)
        }
    }
}

/// Field configuration and result templates for the external indexer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSettings {
    pub columns: Vec<Column>,

    /// Template for the result title
    pub title_field: String,

    /// Template for the result subtitle
    pub subtitle_field: String,

    /// Template for the value passed on when a result is actioned
    pub arg_field: String,

    /// Template for the text used for incremental autocomplete
    pub autocomplete_field: String,

    /// Field used to break ties between equally scored results
    ///
    /// The engine sorts it ascending, so client operations (`order` 1)
    /// come before paginators (`order` 2).
    pub sort_field: String,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            columns: vec![
                Column::stored("title"),
                Column::stored("url"),
                Column::ngram("kind", 2, 9, 0.5),
                Column::ngram("service_name", 2, 10, 1.0),
                Column::ngram("service_id", 2, 10, 1.0),
                Column::ngram("method", 2, 10, 2.0),
                Column::sortable_number("order"),
            ],
            title_field: "{title}".to_string(),
            subtitle_field: "open {url}".to_string(),
            arg_field: "{url}".to_string(),
            autocomplete_field: "{kind} {service_id}.{method}".to_string(),
            sort_field: "order".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_record() {
        let doc = DocumentRecord::new(
            OperationKind::Client,
            "S3",
            "s3",
            "list_buckets",
            "https://example.com/s3/client/list_buckets.html",
        );
        assert_eq!(doc.title, "client | s3.list_buckets");
        assert_eq!(doc.kind, "client");
        assert_eq!(doc.service_name, "s3");
        assert_eq!(doc.order, 1);
    }

    #[test]
    fn test_paginator_record_keeps_title_case() {
        let doc = DocumentRecord::new(
            OperationKind::Paginator,
            "EC2",
            "ec2",
            "DescribeInstances",
            "https://example.com/ec2/paginator/DescribeInstances.html",
        );
        assert_eq!(doc.title, "paginator | ec2.DescribeInstances");
        assert_eq!(doc.method, "describeinstances");
        assert_eq!(doc.service_name, "ec2");
        assert_eq!(doc.order, 2);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&OperationKind::Paginator).unwrap();
        assert_eq!(json, "\"paginator\"");
    }

    #[test]
    fn test_unresolved_descriptor() {
        let svc = ServiceDescriptor::new("EC2", "ec2.html", "https://example.com/ec2.html");
        assert!(!svc.is_resolved());
        let json = serde_json::to_value(&svc).unwrap();
        assert!(json["service_id"].is_null());
    }

    #[test]
    fn test_default_settings_templates() {
        let settings = IndexSettings::default();
        assert_eq!(settings.title_field, "{title}");
        assert_eq!(settings.arg_field, "{url}");
        assert!(settings.columns.iter().any(|c| c.name == "method" && c.type_is_ngram));

        let json = serde_json::to_value(&settings).unwrap();
        assert!(json["columns"][0].get("ngram_minsize").is_none());
        assert_eq!(json["columns"][5]["ngram_maxsize"], 10);
    }

    #[test]
    fn test_sort_field_is_sortable_order() {
        let settings = IndexSettings::default();
        assert_eq!(settings.sort_field, "order");
        let order = settings.columns.iter().find(|c| c.name == "order").unwrap();
        assert!(order.is_sortable && order.type_is_numeric);
        assert!(OperationKind::Client.order() < OperationKind::Paginator.order());
    }
}
