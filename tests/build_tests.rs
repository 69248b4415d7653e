//! Integration tests for the build pipeline
//!
//! These tests use wiremock to serve a small copy of the documentation site
//! and run the fetcher, coordinator and full build against it.

use boto3_ref_index::cache::SqlitePageCache;
use boto3_ref_index::config::Config;
use boto3_ref_index::crawler::{
    build_http_client, run_build, BuildOptions, CachedFetcher, Coordinator,
};
use boto3_ref_index::output::{read_documents, read_settings};
use boto3_ref_index::{IndexSettings, RefIndexError, ServiceDescriptor};
use chrono::Duration;
use std::path::Path;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INDEX_PAGE: &str = r##"<html><body>
<section id="available-services">
  <h1>Available services<a class="headerlink" href="#available-services">¶</a></h1>
  <div class="toctree-wrapper compound"><ul>
    <li class="toctree-l1"><a class="reference internal" href="ec2.html">EC2</a></li>
    <li class="toctree-l2"><a class="reference internal" href="ec2.html#client">Client</a></li>
    <li class="toctree-l1"><a class="reference internal" href="s3.html">S3</a></li>
    <li class="toctree-l1"><a class="reference internal" href="broken.html">Broken</a></li>
  </ul></div>
</section>
</body></html>"##;

const EC2_PAGE: &str = r##"<html><body>
<h1>EC2</h1>
<section id="client">
  <h2>Client<a class="headerlink" href="#client">¶</a></h2>
  <div class="highlight"><pre><span class="n">client</span> <span class="o">=</span> <span class="n">boto3</span><span class="o">.</span><span class="n">client</span><span class="p">(</span><span class="s1">&#39;ec2&#39;</span><span class="p">)</span></pre></div>
  <ul>
    <li><a class="reference internal" href="ec2/client/describe_instances.html">describe_instances</a></li>
    <li><a class="reference internal" href="ec2/client/run_instances.html">run_instances</a></li>
  </ul>
</section>
<section id="paginators">
  <ul><li><a class="reference internal" href="ec2/paginator/DescribeInstances.html">DescribeInstances</a></li></ul>
</section>
</body></html>"##;

const S3_PAGE: &str = r#"<html><body>
<section id="client">
  <pre>client = boto3.client('s3')</pre>
  <ul><li><a class="reference internal" href="s3/client/list_buckets.html">list_buckets</a></li></ul>
</section>
</body></html>"#;

const BROKEN_PAGE: &str = r#"<html><body>
<section id="client">
  <ul><li><a class="reference internal" href="broken/client/do_thing.html">do_thing</a></li></ul>
</section>
</body></html>"#;

const FRAGMENT_INDEX_PAGE: &str = r#"<html><body>
<div class="section" id="available-services">
  <ul><li><a class="reference internal" href="s3.html">S3</a></li></ul>
</div>
</body></html>"#;

const FRAGMENT_S3_PAGE: &str = r##"<html><body>
<h1>S3<a class="headerlink" href="#s3">¶</a></h1>
<div class="section" id="client">
  <h2>Client<a class="headerlink" href="#client">¶</a></h2>
  <div class="highlight"><pre>client = boto3.client(&#39;s3&#39;)</pre></div>
  <ul class="simple">
    <li><a class="reference internal" href="#S3.Client.list_buckets" title="S3.Client.list_buckets"><code class="xref py py-meth docutils literal notranslate"><span class="pre">list_buckets()</span></code></a></li>
    <li><a class="reference internal" href="#S3.Client.get_object" title="S3.Client.get_object"><code class="xref py py-meth docutils literal notranslate"><span class="pre">get_object()</span></code></a></li>
  </ul>
</div>
<div class="section" id="paginators">
  <ul class="simple">
    <li><a class="reference internal" href="#S3.Paginator.ListObjects" title="S3.Paginator.ListObjects"><code class="xref py py-class docutils literal notranslate"><span class="pre">S3.Paginator.ListObjects</span></code></a></li>
  </ul>
</div>
</body></html>"##;

async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_site(server: &MockServer) {
    mount_page(server, "/reference/services/index.html", INDEX_PAGE).await;
    mount_page(server, "/reference/services/ec2.html", EC2_PAGE).await;
    mount_page(server, "/reference/services/s3.html", S3_PAGE).await;
    mount_page(server, "/reference/services/broken.html", BROKEN_PAGE).await;
}

fn create_test_config(server: &MockServer, root: &Path) -> Config {
    let mut config = Config::default();
    config.source.index_url = format!("{}/reference/services/index.html", server.uri());
    config.source.user_agent = "TestBot/1.0".to_string();
    config.cache.directory = root.join("cache").display().to_string();
    config.output.services_path = root.join("build").join("services.json").display().to_string();
    config.output.directory = Some(root.join("fts").display().to_string());
    config
}

fn create_fetcher(dir: &TempDir) -> CachedFetcher<SqlitePageCache> {
    let cache = SqlitePageCache::new(&dir.path().join("cache.sqlite3")).unwrap();
    let client = build_http_client("TestBot/1.0").unwrap();
    CachedFetcher::new(client, cache, Duration::hours(24))
}

#[tokio::test]
async fn test_second_fetch_served_from_cache() {
    let server = MockServer::start().await;
    mount_page(&server, "/page.html", "<html>cached body</html>").await;

    let dir = tempfile::tempdir().unwrap();
    let mut fetcher = create_fetcher(&dir);
    let url = format!("{}/page.html", server.uri());

    let first = fetcher.fetch(&url).await.unwrap();
    let second = fetcher.fetch(&url).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(fetcher.stats().network_fetches, 1);
    assert_eq!(fetcher.stats().cache_hits, 1);
}

#[tokio::test]
async fn test_cache_survives_new_fetcher() {
    let server = MockServer::start().await;
    mount_page(&server, "/page.html", "<html>persisted</html>").await;

    let dir = tempfile::tempdir().unwrap();
    let url = format!("{}/page.html", server.uri());

    let first = create_fetcher(&dir).fetch(&url).await.unwrap();
    let second = create_fetcher(&dir).fetch(&url).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_error_status_is_fatal_and_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.html"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut fetcher = create_fetcher(&dir);
    let url = format!("{}/missing.html", server.uri());

    for _ in 0..2 {
        match fetcher.fetch(&url).await {
            Err(RefIndexError::HttpStatus { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected HttpStatus, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_coordinator_phases() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let index_url = Url::parse(&format!("{}/reference/services/index.html", server.uri())).unwrap();
    let mut coordinator = Coordinator::new(index_url, create_fetcher(&dir));

    let output = coordinator.run().await.unwrap();

    let names: Vec<&str> = output.services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["EC2", "S3", "Broken"]);
    assert_eq!(output.resolved_count(), 2);
    assert_eq!(output.services[2].service_id, None);

    let titles: Vec<&str> = output.documents.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "client | ec2.describe_instances",
            "client | ec2.run_instances",
            "paginator | ec2.DescribeInstances",
            "client | s3.list_buckets",
        ]
    );

    // Each service page is visited twice but downloaded once
    let stats = coordinator.fetch_stats();
    assert_eq!(stats.network_fetches, 4);
    assert_eq!(stats.cache_hits, 2);
}

#[tokio::test]
async fn test_fragment_method_links_become_documents() {
    let server = MockServer::start().await;
    mount_page(&server, "/reference/services/index.html", FRAGMENT_INDEX_PAGE).await;
    mount_page(&server, "/reference/services/s3.html", FRAGMENT_S3_PAGE).await;

    let dir = tempfile::tempdir().unwrap();
    let index_url = Url::parse(&format!("{}/reference/services/index.html", server.uri())).unwrap();
    let mut coordinator = Coordinator::new(index_url, create_fetcher(&dir));

    let output = coordinator.run().await.unwrap();

    let titles: Vec<&str> = output.documents.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "client | s3.list_buckets",
            "client | s3.get_object",
            "paginator | s3.ListObjects",
        ]
    );
    let page = format!("{}/reference/services/s3.html", server.uri());
    assert_eq!(output.documents[0].url, format!("{}#S3.Client.list_buckets", page));
    assert_eq!(output.documents[0].method, "list_buckets");
    assert_eq!(output.documents[2].url, format!("{}#S3.Paginator.ListObjects", page));
    assert_eq!(output.documents[2].order, 2);
}

#[tokio::test]
async fn test_full_build_writes_output_files() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server, dir.path());
    let fts_dir = dir.path().join("fts");
    let stale_index = fts_dir.join("boto3-whoosh_index");
    std::fs::create_dir_all(&stale_index).unwrap();

    let summary = run_build(&config, BuildOptions::default()).await.unwrap();

    assert_eq!(summary.services_discovered, 3);
    assert_eq!(summary.services_resolved, 2);
    assert_eq!(summary.documents, 4);
    assert!(!stale_index.exists());

    let services: Vec<ServiceDescriptor> = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("build").join("services.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(services.len(), 3);
    assert!(services.iter().all(|s| !s.href.contains('#')));
    assert_eq!(services[0].service_id.as_deref(), Some("ec2"));

    let documents = read_documents(&fts_dir.join("boto3-data.json")).unwrap();
    assert_eq!(documents.len(), 4);
    for doc in &documents {
        let expected = if doc.kind == "client" { 1 } else { 2 };
        assert_eq!(doc.order, expected, "{}", doc.title);
        assert!(services
            .iter()
            .any(|s| s.service_id.as_deref() == Some(doc.service_id.as_str())));
    }
    let list_buckets = documents
        .iter()
        .find(|d| d.title.contains("list_buckets"))
        .unwrap();
    assert_eq!(list_buckets.order, 1);
    assert_eq!(
        list_buckets.url,
        format!("{}/reference/services/s3/client/list_buckets.html", server.uri())
    );

    let settings = read_settings(&fts_dir.join("boto3-setting.json")).unwrap();
    assert_eq!(settings, IndexSettings::default());
}

#[tokio::test]
async fn test_rebuild_uses_cache() {
    let server = MockServer::start().await;
    // Every page may be downloaded exactly once across both builds
    mount_site(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server, dir.path());

    let first = run_build(&config, BuildOptions::default()).await.unwrap();
    let second = run_build(&config, BuildOptions::default()).await.unwrap();

    assert_eq!(first.documents, second.documents);
    assert_eq!(second.fetch_stats.network_fetches, 0);
}

#[tokio::test]
async fn test_unreachable_index_fails_build() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reference/services/index.html"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server, dir.path());

    let result = run_build(&config, BuildOptions::default()).await;
    assert!(matches!(
        result,
        Err(RefIndexError::HttpStatus { status: 503, .. })
    ));
    assert!(!dir.path().join("fts").join("boto3-data.json").exists());
}
