//! End-to-end test: the desk over real stores.
//!
//! Load from a JSON file, authenticate through the directory, mutate through
//! the desk, save, and read the same state back in a fresh desk.

use srat_engine::{Action, ReimbursementDesk};
use srat_storage::seed::demo_dataset;
use srat_storage::*;
use srat_tests::*;
use srat_types::*;

async fn open(store: &JsonFileStore) -> ReimbursementDesk {
    let mut desk = ReimbursementDesk::new(store.load_all().await.unwrap());
    if desk.seed_if_empty(demo_dataset()) {
        store.save_all(desk.dataset()).await.unwrap();
    }
    desk
}

#[tokio::test]
async fn state_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("db.json"));

    let mut desk = open(&store).await;
    let directory = AccountDirectory::from_dataset(desk.dataset());
    let staff = directory.authenticate("field1", "field123").await.unwrap();
    let fac = directory.authenticate("fac", "fac123").await.unwrap();

    let request = desk
        .submit(&staff, sample_drafts(), RequestMeta::new("FunderA", "General"))
        .unwrap();
    desk.act(&request.id, Some(0), &fac, Action::Forward).unwrap();
    store.save_all(desk.dataset()).await.unwrap();

    let reloaded = open(&store).await;
    assert_eq!(reloaded.dataset(), desk.dataset());
    let stored = reloaded.dataset().request(&request.id).unwrap();
    assert_eq!(stored.status, RequestStatus::PendingCoordinator);
    assert_eq!(stored.history.actions(), vec!["Submitted", "Forwarded"]);
    assert_eq!(stored.version, 1);
}

#[tokio::test]
async fn seeding_happens_once_per_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("db.json"));

    let mut desk = open(&store).await;
    let created = desk
        .create_user(
            &actor(Role::Admin),
            NewUser {
                username: "field2".into(),
                national_id: Some("NID-1".into()),
                ..Default::default()
            },
        )
        .unwrap();
    store.save_all(desk.dataset()).await.unwrap();

    let reloaded = open(&store).await;
    assert_eq!(reloaded.dataset().users.len(), 7);

    let directory = AccountDirectory::from_dataset(reloaded.dataset());
    let field2 = directory
        .authenticate("field2", DEFAULT_PASSWORD)
        .await
        .unwrap();
    assert_eq!(field2.id, created.id);
    assert_eq!(field2.role, Role::FieldStaff);
}

#[tokio::test]
async fn receipts_and_signatures_attach_without_history() {
    let dir = tempfile::tempdir().unwrap();
    let attachments = FsAttachmentStore::new(dir.path().join("files"));
    let mut desk = demo_desk();
    let staff = actor(Role::FieldStaff);

    let request = desk
        .submit(&staff, sample_drafts(), RequestMeta::new("FunderA", "General"))
        .unwrap();

    let receipt = attachments
        .put("fuel-receipt.pdf", b"%PDF-1.4 receipt".to_vec())
        .await
        .unwrap();
    desk.attach(&request.id, &staff, receipt.clone()).unwrap();

    let mut pad = SignaturePad::new();
    pad.add_stroke(vec![Point::new(10.0, 100.0), Point::new(150.0, 20.0), Point::new(290.0, 100.0)]);
    let signed = desk
        .sign(&request.id, &actor(Role::Facilitator), pad.capture().unwrap())
        .unwrap();

    assert_eq!(signed.status, RequestStatus::PendingFacilitator);
    assert_eq!(signed.history.len(), 1);
    assert_eq!(signed.version, 2);
    assert_eq!(signed.attachments, vec![receipt.clone()]);
    assert!(signed.signatures.contains_key("Facilitator"));
    assert_eq!(
        attachments.get(&signed.attachments[0]).await.unwrap(),
        b"%PDF-1.4 receipt"
    );

    let json = serde_json::to_value(&signed).unwrap();
    assert_eq!(json["attachments"][0]["digest"], receipt.digest.as_str());
}
