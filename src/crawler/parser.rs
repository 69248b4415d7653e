//! HTML parser for the boto3 reference pages
//!
//! This module handles parsing documentation markup to extract:
//! - Service links from the services index page
//! - The service identifier from a service page's client snippet
//! - Operation links from a service page's client and paginator sections
//!
//! Extraction is best effort: anything that does not look the way the docs
//! normally look is skipped, never reported as an error.

use crate::model::{OperationKind, ServiceDescriptor};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Matches `boto3.client('ec2')`, `session.client("s3")` and similar
static CLIENT_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\.client\(\s*['"]([A-Za-z0-9_.-]+)['"]\s*[,)]"#)
        .expect("client call pattern is valid")
});

/// An operation link found in a service page section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationLink {
    pub kind: OperationKind,

    /// Method or paginator name as written in the docs
    pub method: String,

    /// Absolute URL of the operation's documentation, possibly with a fragment
    pub url: String,
}

/// Extracts the service list from the services index page
///
/// # Link Extraction Rules
///
/// **Include:** `<a class="reference internal" href="...">` inside
/// `#available-services`.
///
/// **Exclude:**
/// - hrefs containing `#` (links to a section of some page)
/// - anchors with empty text or no href
/// - hrefs that cannot be joined onto the index URL
/// - repeated hrefs (the first one wins)
///
/// # Example
///
/// ```
/// use boto3_ref_index::crawler::parse_service_index;
/// use url::Url;
///
/// let html = r#"<div id="available-services">
///     <a class="reference internal" href="ec2.html">EC2</a>
/// </div>"#;
/// let index = Url::parse("https://docs.example.com/services/index.html").unwrap();
/// let services = parse_service_index(html, &index);
/// assert_eq!(services[0].url, "https://docs.example.com/services/ec2.html");
/// ```
pub fn parse_service_index(html: &str, index_url: &Url) -> Vec<ServiceDescriptor> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("#available-services a.reference.internal[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut services = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() || href.contains('#') {
            continue;
        }

        let name = element.text().collect::<String>().trim().to_string();
        if name.is_empty() {
            tracing::debug!("Skipping service link without text: {}", href);
            continue;
        }

        let Ok(url) = index_url.join(href) else {
            tracing::debug!("Skipping unresolvable service link: {}", href);
            continue;
        };

        if seen.insert(href.to_string()) {
            services.push(ServiceDescriptor::new(name, href, url.to_string()));
        }
    }

    services
}

/// Extracts the service identifier from a service page
///
/// The identifier is the quoted argument of the first `.client(...)` call in
/// any `<pre>` block. Returns `None` if the page has no such snippet.
pub fn parse_service_id(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("pre").ok()?;

    document.select(&selector).find_map(|pre| {
        let code = pre.text().collect::<String>();
        CLIENT_CALL
            .captures(&code)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// Extracts the operation links of one kind from a service page
///
/// Looks for `a.reference.internal` links inside the element whose id is
/// `kind.section_id()`. A page without that section yields nothing.
pub fn parse_operation_links(html: &str, page_url: &Url, kind: OperationKind) -> Vec<OperationLink> {
    let document = Html::parse_document(html);
    extract_section_links(&document, page_url, kind)
}

/// Extracts client operations followed by paginators from a service page
pub fn parse_service_operations(html: &str, page_url: &Url) -> Vec<OperationLink> {
    let document = Html::parse_document(html);
    let mut links = extract_section_links(&document, page_url, OperationKind::Client);
    links.extend(extract_section_links(
        &document,
        page_url,
        OperationKind::Paginator,
    ));
    links
}

fn extract_section_links(document: &Html, page_url: &Url, kind: OperationKind) -> Vec<OperationLink> {
    let css = format!("#{} a.reference.internal[href]", kind.section_id());
    let Ok(selector) = Selector::parse(&css) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() {
            continue;
        }

        let text = element.text().collect::<String>();
        let title = element.value().attr("title");
        let Some(method) = operation_name(href, title, &text, kind.section_id()) else {
            tracing::debug!("Skipping {} link without a method name: {}", kind, href);
            continue;
        };

        let Ok(url) = page_url.join(href) else {
            tracing::debug!("Skipping unresolvable {} link: {}", kind, href);
            continue;
        };

        let url = url.to_string();
        if seen.insert(url.clone()) {
            links.push(OperationLink { kind, method, url });
        }
    }

    links
}

/// Works out the method name an operation link refers to
///
/// Fragment links such as `#S3.Client.list_buckets` name the method in the
/// last dotted segment of the fragment. That segment must agree with the
/// tail of the `title` attribute, or with the link text when there is no
/// title. Links to separate pages are named by their text. A trailing `()`
/// on the text is dropped in both cases.
fn operation_name(href: &str, title: Option<&str>, text: &str, section_id: &str) -> Option<String> {
    let text = text.trim();
    let label = text.strip_suffix("()").unwrap_or(text).trim();

    let name = match href.split_once('#') {
        Some((_, fragment)) if !fragment.is_empty() => {
            if href.starts_with('#') && fragment == section_id {
                return None;
            }
            let method = last_segment(fragment);
            let expected = title.map(last_segment).unwrap_or(label);
            if method != expected {
                return None;
            }
            method
        }
        _ => label,
    };

    (!name.is_empty()).then(|| name.to_string())
}

fn last_segment(path: &str) -> &str {
    path.trim().rsplit('.').next().unwrap_or_default()
}
