use busters_model::{Constraints, FeedbackRecord, Mood, Rating, SuggestionItem, Verdict};
use busters_state::{catalog_path, load_catalog_or_builtin, seed_catalog, UserStore};
use busters_test_utils::{env_guard, TestFixture};
use serial_test::serial;
use time::OffsetDateTime;

fn suggestion(name: &str) -> SuggestionItem {
    SuggestionItem {
        name: name.into(),
        duration: 45,
        cost: 12.5,
        people: 2,
        mood: "social".into(),
        description: format!("{name} together."),
    }
}

/// Given: a data dir pointed at by BUSTERS_DATA_DIR
/// When: preferences and feedback are saved, then the store is reopened
/// Then: the reloaded record equals what was written
#[test]
#[serial]
fn given_saved_user_when_store_reopened_then_record_round_trips() {
    let _g = env_guard();
    let fixture = TestFixture::new().unwrap();
    let _data = fixture.data_dir_guard();

    let store = UserStore::open_default().unwrap();
    assert_eq!(store.path(), fixture.data_dir.join("user_preferences.json"));

    store
        .save_preferences("alice", Mood::Social, Constraints::new(40.0, 120, 2))
        .unwrap();
    let record = FeedbackRecord {
        suggestions: vec![suggestion("Board games"), suggestion("Cooking class")],
        rating: Rating::new(4).unwrap(),
        uf: 0.8,
        rs: 0.75,
        aes: 0.78,
        result: Verdict::Bad,
        recorded_at: Some(OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()),
    };
    store.append_feedback("alice", record.clone()).unwrap();
    let before = store.get("alice").unwrap();

    let reopened = UserStore::open_default().unwrap();
    let after = reopened.get("alice").unwrap();
    assert_eq!(after, before);
    assert_eq!(after.history, vec![record]);
}

/// Given: a document written by an older version without timestamps
/// When: it is loaded and a new round is appended
/// Then: old entries keep loading and are preserved on rewrite
#[test]
#[serial]
fn given_legacy_document_when_appending_then_history_is_preserved() {
    let _g = env_guard();
    let fixture = TestFixture::new().unwrap();
    fixture
        .write_data_file(
            "user_preferences.json",
            r#"{
    "user_1": {
        "mood": "tired",
        "time": 60,
        "budget": 10.0,
        "people": 1,
        "history": [
            {
                "suggestions": [{"name": "Nap", "duration": 30, "cost": 0, "people": 1, "mood": "tired", "description": "Rest."}],
                "rating": 5,
                "uf": 1.0,
                "rs": 1.0,
                "aes": 1.0,
                "result": "Just OK"
            }
        ]
    }
}"#,
        )
        .unwrap();
    let store = UserStore::new(fixture.data_dir.join("user_preferences.json"));

    let prefs = store.get("user_1").unwrap();
    assert_eq!(prefs.history.len(), 1);
    assert_eq!(prefs.history[0].result, Verdict::JustOk);

    let mut next = prefs.history[0].clone();
    next.rating = Rating::new(2).unwrap();
    assert_eq!(store.append_feedback("user_1", next).unwrap(), 2);
    assert_eq!(store.history("user_1", None).unwrap()[1].rating.get(), 5);
}

#[test]
#[serial]
fn seeded_catalog_is_found_at_default_path() {
    let _g = env_guard();
    let fixture = TestFixture::new().unwrap();
    let _data = fixture.data_dir_guard();

    let path = catalog_path().unwrap();
    assert!(seed_catalog(&path, false).unwrap());
    let catalog = load_catalog_or_builtin(&path);
    assert_eq!(catalog.len(), 30);
    assert!(catalog.values().all(|a| a.people >= 1));
}
