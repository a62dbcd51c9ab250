//! FileTools over a temporary vault

use std::collections::BTreeMap;
use std::sync::Arc;
use tempfile::TempDir;
use vaultstore_core::{Error, ErrorKind, MetadataValue, StoreConfig};
use vaultstore_tools::{FileTools, VaultManager};

fn setup_test_vault() -> (TempDir, Arc<VaultManager>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = StoreConfig::builder(temp_dir.path())
        .build()
        .expect("Failed to create config");
    let manager = VaultManager::new(config).expect("Failed to create vault manager");
    (temp_dir, Arc::new(manager))
}

#[tokio::test]
async fn test_write_read_roundtrip() {
    let (_temp_dir, manager) = setup_test_vault();
    let tools = FileTools::new(manager);

    let metadata = BTreeMap::from([(
        "title".to_string(),
        MetadataValue::String("Hello".to_string()),
    )]);
    let written = tools
        .write("notes/hello.md", "Hello World", Some(metadata), false)
        .await
        .unwrap();
    assert_eq!(written, "notes/hello.md");

    let doc = tools.read("notes/hello.md").await.unwrap();
    assert_eq!(doc.title, "Hello");
    assert_eq!(doc.content, "Hello World");
    assert_eq!(doc.word_count, 2);
}

#[tokio::test]
async fn test_write_twice_collides_unless_overwrite() {
    let (_temp_dir, manager) = setup_test_vault();
    let tools = FileTools::new(manager);

    tools.write("new.md", "body", None, false).await.unwrap();
    let err = tools.write("new.md", "body", None, false).await.unwrap_err();
    assert!(matches!(err, Error::AlreadyExists { .. }));

    tools.write("new.md", "second", None, true).await.unwrap();
    assert_eq!(tools.read("new.md").await.unwrap().content, "second");
}

#[tokio::test]
async fn test_read_file_not_found() {
    let (_temp_dir, manager) = setup_test_vault();
    let tools = FileTools::new(manager);

    let err = tools.read("nonexistent.md").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_append_and_update() {
    let (_temp_dir, manager) = setup_test_vault();
    let tools = FileTools::new(manager);

    tools.write("log.md", "first", None, false).await.unwrap();
    tools.append("log.md", "second").await.unwrap();
    assert_eq!(tools.read("log.md").await.unwrap().content, "first\nsecond");

    tools.update("log.md", "replaced", None).await.unwrap();
    assert_eq!(tools.read("log.md").await.unwrap().content, "replaced");
}

#[tokio::test]
async fn test_move_delete_and_list() {
    let (_temp_dir, manager) = setup_test_vault();
    let tools = FileTools::new(manager);

    tools.write("a.md", "a", None, false).await.unwrap();
    tools.write("b.md", "b", None, false).await.unwrap();

    let moved = tools.move_document("a.md", "archive/a.md", true).await.unwrap();
    assert_eq!(moved, "archive/a.md");
    tools.delete("b.md").await.unwrap();

    assert_eq!(tools.list("", true).await.unwrap(), vec!["archive/a.md"]);
    assert!(tools.list("", false).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_folder_operations() {
    let (temp_dir, manager) = setup_test_vault();
    let tools = FileTools::new(manager);

    tools.create_folder("docs", false).await.unwrap();
    tools.write("docs/one.md", "1", None, false).await.unwrap();

    let err = tools.delete_folder("docs", false).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotEmpty);

    tools.move_folder("docs", "old/docs").await.unwrap();
    assert!(temp_dir.path().join("old/docs/one.md").is_file());

    tools.delete_folder("old", true).await.unwrap();
    assert!(!temp_dir.path().join("old").exists());
}

#[tokio::test]
async fn test_path_traversal_rejected_before_io() {
    let outside = TempDir::new().unwrap();
    let (_temp_dir, manager) = setup_test_vault();
    let tools = FileTools::new(manager);

    let escape = format!("../{}/x.md", outside.path().file_name().unwrap().to_string_lossy());
    let err = tools.write(&escape, "x", None, true).await.unwrap_err();
    assert!(err.kind().is_security_rejection());
    assert!(!outside.path().join("x.md").exists());
}

#[tokio::test]
async fn test_recent() {
    let (_temp_dir, manager) = setup_test_vault();
    let tools = FileTools::new(manager);

    tools.write("one.md", "1", None, false).await.unwrap();
    tools.write("two.md", "2", None, false).await.unwrap();

    assert_eq!(tools.recent(1).await.unwrap().len(), 1);
    assert_eq!(tools.recent(10).await.unwrap().len(), 2);
}
