//! ContextTools over a temporary vault

use chrono::NaiveDate;
use std::sync::Arc;
use tempfile::TempDir;
use vaultstore_core::{ErrorKind, StoreConfig};
use vaultstore_tools::{ContextTools, VaultManager};

fn setup_test_vault() -> (TempDir, Arc<VaultManager>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let vault_path = temp_dir.path();

    std::fs::create_dir_all(vault_path.join("Journal")).unwrap();
    std::fs::write(vault_path.join("Journal/2024-01-15.md"), "Daily entry text").unwrap();
    std::fs::write(vault_path.join("hub.md"), "# Hub\nCentral note").unwrap();
    std::fs::write(vault_path.join("spoke.md"), "Points to [[hub]] from here").unwrap();
    std::fs::write(vault_path.join("other.md"), "Unrelated words").unwrap();

    let config = StoreConfig::builder(vault_path)
        .build()
        .expect("Failed to create config");
    let manager = VaultManager::new(config).expect("Failed to create vault manager");
    (temp_dir, Arc::new(manager))
}

#[tokio::test]
async fn test_read_note_token_estimate() {
    let (_temp_dir, manager) = setup_test_vault();
    let tools = ContextTools::new(manager);

    let context = tools.read_note("hub.md").await.unwrap();
    assert_eq!(context.primary.title, "hub");
    assert_eq!(context.token_estimate, "# Hub\nCentral note".len() / 4);
    assert!(context.related.is_empty());
}

#[tokio::test]
async fn test_read_multiple_skips_missing() {
    let (_temp_dir, manager) = setup_test_vault();
    let tools = ContextTools::new(manager);

    let context = tools
        .read_multiple(vec!["missing.md".into(), "hub.md".into(), "other.md".into()])
        .await
        .unwrap();
    assert_eq!(context.primary.relative_path, "hub.md");
    assert_eq!(context.related.len(), 1);

    let err = tools
        .read_multiple(vec!["missing.md".into()])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_daily_note_lookup() {
    let (_temp_dir, manager) = setup_test_vault();
    let tools = ContextTools::new(manager);

    let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let context = tools.daily_note(Some(date)).await.unwrap();
    assert_eq!(context.primary.relative_path, "Journal/2024-01-15.md");

    let missing = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
    let err = tools.daily_note(Some(missing)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("Daily/2024-01-16.md"));
}

#[tokio::test]
async fn test_note_with_backlinks() {
    let (_temp_dir, manager) = setup_test_vault();
    let tools = ContextTools::new(manager);

    let context = tools.note_with_backlinks("hub.md").await.unwrap();
    assert_eq!(context.backlinks.len(), 1);
    assert_eq!(context.backlinks[0].source_path, "spoke.md");
    assert_eq!(context.related[0].relative_path, "spoke.md");
    assert!(context.token_estimate > 0);
}

#[tokio::test]
async fn test_gather_related() {
    let (temp_dir, manager) = setup_test_vault();
    std::fs::write(temp_dir.path().join("twin.md"), "Unrelated words and more").unwrap();
    let tools = ContextTools::new(manager);

    let context = tools.gather_related("other.md", 3).await.unwrap();
    assert_eq!(context.primary.relative_path, "other.md");
    assert_eq!(context.related.len(), 1);
    assert_eq!(context.related[0].relative_path, "twin.md");
}
