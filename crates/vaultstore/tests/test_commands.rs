//! End-to-end command dispatch against a temporary vault

use clap::Parser;
use serde_json::Value;
use tempfile::TempDir;
use vaultstore::{Command, ErrorKind, ErrorResponse, StoreConfig, VaultStore, execute};

#[derive(Parser)]
struct TestCli {
    #[command(subcommand)]
    command: Command,
}

fn setup_store() -> (TempDir, VaultStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(
        temp_dir.path().join("alpha.md"),
        "---\ntitle: Project Alpha\ntags: [project, ai]\n---\nKickoff notes.\n",
    )
    .unwrap();
    std::fs::write(
        temp_dir.path().join("beta.md"),
        "Beta builds on alpha.\nSee alpha again, and [[alpha]].\n",
    )
    .unwrap();

    let config = StoreConfig::builder(temp_dir.path())
        .build()
        .expect("Failed to create config");
    let store = VaultStore::open(config).expect("Failed to open store");
    (temp_dir, store)
}

async fn run(store: &VaultStore, args: &[&str]) -> vaultstore::Result<Value> {
    let cli = TestCli::try_parse_from(std::iter::once("vaultstore").chain(args.iter().copied()))
        .expect("arguments should parse");
    execute(store, cli.command).await
}

#[tokio::test]
async fn test_search_ranks_filename_match_first() {
    let (_temp_dir, store) = setup_store();

    let response = run(&store, &["search", "alpha"]).await.unwrap();

    assert_eq!(response["operation"], "search");
    assert_eq!(response["count"], 2);
    assert_eq!(response["data"][0]["relative_path"], "alpha.md");
    assert_eq!(response["data"][1]["relative_path"], "beta.md");
    assert!(
        response["data"][0]["score"].as_u64().unwrap()
            > response["data"][1]["score"].as_u64().unwrap()
    );
    assert!(response["took_ms"].is_u64());
}

#[tokio::test]
async fn test_filter_by_tag() {
    let (_temp_dir, store) = setup_store();

    let response = run(&store, &["filter", "--tag", "project"]).await.unwrap();
    assert_eq!(response["count"], 1);
    assert_eq!(response["data"][0]["relative_path"], "alpha.md");

    run(
        &store,
        &["update", "beta.md", "--content", "Beta.\n", "--meta", r#"{"tags": ["project"]}"#],
    )
    .await
    .unwrap();

    let response = run(&store, &["filter", "--tag", "project"]).await.unwrap();
    assert_eq!(response["count"], 2);
}

#[tokio::test]
async fn test_write_twice_requires_overwrite() {
    let (temp_dir, store) = setup_store();

    let response = run(&store, &["write", "new.md", "--content", "body"]).await.unwrap();
    assert_eq!(response["data"], "new.md");

    let err = run(&store, &["write", "new.md", "--content", "again"])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);

    run(&store, &["write", "new.md", "--content", "replaced", "--overwrite"])
        .await
        .unwrap();
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("new.md")).unwrap(),
        "replaced"
    );
}

#[tokio::test]
async fn test_rmdir_refuses_non_empty_until_recursive() {
    let (temp_dir, store) = setup_store();
    run(&store, &["mkdir", "docs"]).await.unwrap();
    run(&store, &["write", "docs/page.md", "--content", "x"])
        .await
        .unwrap();

    let err = run(&store, &["rmdir", "docs"]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotEmpty);
    assert!(temp_dir.path().join("docs/page.md").exists());

    run(&store, &["rmdir", "docs", "--recursive"]).await.unwrap();
    assert!(!temp_dir.path().join("docs").exists());
}

#[tokio::test]
async fn test_bulk_tag_reports_partial_success() {
    let (_temp_dir, store) = setup_store();

    let response = run(
        &store,
        &["bulk-tag", "--tag", "review", "alpha.md", "missing.md", "beta.md"],
    )
    .await
    .unwrap();

    let outcome = &response["data"];
    assert_eq!(outcome["succeeded"], serde_json::json!(["alpha.md", "beta.md"]));
    assert_eq!(outcome["failed"][0]["target"], "missing.md");
    assert_eq!(outcome["failed"][0]["kind"], "not_found");
    assert_eq!(outcome["partial_success"], true);

    let alpha = store.files.read("alpha.md").await.unwrap();
    assert_eq!(alpha.tags(), ["project", "ai", "review"]);
}

#[tokio::test]
async fn test_read_with_backlinks() {
    let (_temp_dir, store) = setup_store();

    let response = run(&store, &["read", "alpha.md", "--with-backlinks"])
        .await
        .unwrap();

    assert_eq!(response["data"]["primary"]["title"], "Project Alpha");
    assert_eq!(response["data"]["backlinks"][0]["source_path"], "beta.md");

    let err = run(&store, &["read", "alpha.md", "beta.md", "--with-backlinks"])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[tokio::test]
async fn test_escaping_path_rejected() {
    let (_temp_dir, store) = setup_store();

    let err = run(&store, &["delete", "../outside.md"]).await.unwrap_err();
    assert!(err.kind().is_security_rejection());

    let body = serde_json::to_value(ErrorResponse::from(&err)).unwrap();
    assert_eq!(body["error"], "invalid_path");
}

#[tokio::test]
async fn test_bad_metadata_json_is_config_error() {
    let (_temp_dir, store) = setup_store();

    let err = run(
        &store,
        &["bulk-meta", "--meta", r#"{"nested": {"x": 1}}"#, "alpha.md"],
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[tokio::test]
async fn test_search_summary_format() {
    let (_temp_dir, store) = setup_store();

    let response = run(&store, &["search", "alpha", "--limit", "1", "--format", "concise"])
        .await
        .unwrap();

    let result = &response["data"];
    assert_eq!(result["results"][0]["path"], "alpha.md");
    assert_eq!(result["results"][0]["relevance"], 1.0);
    assert!(result["results"][0].get("excerpt").is_none());
    assert_eq!(result["truncated"], true);
    assert!(result["suggestion"].is_string());
}

#[tokio::test]
async fn test_filter_with_unbounded_day_window() {
    let (_temp_dir, store) = setup_store();

    let response = run(&store, &["filter", "--days", "4294967295"]).await.unwrap();
    assert_eq!(response["count"], 2);
}
