//! Integration tests for document persistence

use boardkit_core::config::ConfigManager;
use boardkit_core::document::{DocumentError, DocumentFormat, ValidationError};
use boardkit_core::layout::{BlockSpec, LayoutStore, SaveStatus, SplitLimits};
use boardkit_core::persistence::{
    FileRepository, LayoutRepository, MemoryRepository, PersistenceError, load_store, save_store,
};
use tempfile::TempDir;

/// Creates a store with a split root and a couple of blocks
fn populated_store() -> LayoutStore {
    let mut store = LayoutStore::new("Landing page");
    let root = store.roots()[0].id;
    let [left, right] = store.split_container(root).unwrap();
    store.add_block(BlockSpec::heading(1, "Welcome"), left).unwrap();
    store.add_block(BlockSpec::paragraph("Body text"), right).unwrap();
    store.set_description(Some("Home".to_string()));
    store
}

#[tokio::test]
async fn file_repository_round_trip_through_config_dir() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_config_dir(dir.path().to_path_buf());
    let repository = FileRepository::new(manager.documents_dir());

    let mut store = populated_store();
    save_store(&repository, &mut store).await.unwrap();
    assert_eq!(store.meta().save_status, SaveStatus::Saved);

    let project_id = store.meta().project_id;
    assert_eq!(repository.list().await.unwrap(), vec![project_id]);

    let loaded = load_store(&repository, project_id, SplitLimits::default())
        .await
        .unwrap();
    assert_eq!(loaded.roots(), store.roots());
    assert_eq!(loaded.meta().title, "Landing page");
    assert_eq!(loaded.meta().description.as_deref(), Some("Home"));
    assert!(!loaded.is_dirty());
}

#[tokio::test]
async fn yaml_and_json_repositories_hold_the_same_document() {
    let dir = TempDir::new().unwrap();
    let json = FileRepository::new(dir.path().join("json"));
    let yaml = FileRepository::new(dir.path().join("yaml")).with_format(DocumentFormat::Yaml);
    let document = populated_store().to_document();

    json.save(document.project_id, &document).await.unwrap();
    yaml.save(document.project_id, &document).await.unwrap();

    assert_eq!(
        json.load(document.project_id).await.unwrap(),
        yaml.load(document.project_id).await.unwrap()
    );
}

#[tokio::test]
async fn edited_file_with_bad_tree_is_rejected() {
    let dir = TempDir::new().unwrap();
    let repository = FileRepository::new(dir.path());
    let mut store = populated_store();
    save_store(&repository, &mut store).await.unwrap();

    let path = repository.path_for(store.meta().project_id);
    let mut value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    value["containers"][0]["splitAreas"]
        .as_array_mut()
        .unwrap()
        .truncate(1);
    std::fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();

    let result = load_store(&repository, store.meta().project_id, SplitLimits::default()).await;
    assert!(matches!(
        result,
        Err(PersistenceError::Document(DocumentError::Invalid(
            ValidationError::SplitArity { found: 1, .. }
        )))
    ));
}

#[tokio::test]
async fn edits_during_save_keep_store_dirty() {
    let repository = MemoryRepository::new();
    let mut store = populated_store();

    let ticket = store.begin_save();
    assert_eq!(store.meta().save_status, SaveStatus::Saving);
    let root = store.roots()[0].id;
    store.add_root_container();
    assert!(store.find_container(root).is_some());

    repository
        .save(ticket.document.project_id, &ticket.document)
        .await
        .unwrap();
    store.finish_save(ticket.revision, Ok(()));
    assert!(store.is_dirty());

    save_store(&repository, &mut store).await.unwrap();
    assert!(!store.is_dirty());
    let loaded = load_store(&repository, store.meta().project_id, store.limits())
        .await
        .unwrap();
    assert_eq!(loaded.roots().len(), 2);
}
