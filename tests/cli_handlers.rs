use pretty_assertions::assert_eq;

use tend::cli::commands::*;
use tend::cli::handlers::{CommandError, run_command};
use tend::io::memory_store::MemoryStore;
use tend::model::{Filter, Item, ItemId, OwnerId};

const OWNER: OwnerId = OwnerId(1139);

fn item(id: u64, title: &str, completed: bool) -> Item {
    Item {
        id: ItemId(id),
        title: title.to_string(),
        owner_id: OWNER,
        completed,
    }
}

fn store_with(items: Vec<Item>) -> MemoryStore {
    MemoryStore::with_items(OWNER, items)
}

/// Run one command and return its stdout, or the error message.
fn run(store: &MemoryStore, command: Commands) -> Result<String, String> {
    run_json(store, command, false)
}

fn run_json(store: &MemoryStore, command: Commands, json: bool) -> Result<String, String> {
    let mut out = Vec::new();
    match run_command(command, store, json, &mut out) {
        Ok(()) => Ok(String::from_utf8(out).unwrap()),
        Err(e) => Err(e.to_string()),
    }
}

fn list(filter: Filter) -> Commands {
    Commands::List(ListArgs { filter })
}

#[test]
fn list_prints_items_and_count() {
    let store = store_with(vec![item(1, "Buy milk", false), item(2, "Walk dog", true)]);
    let out = run(&store, list(Filter::All)).unwrap();
    assert_eq!(out, "[ ] 1 Buy milk\n[x] 2 Walk dog\n1 items left\n");
    assert_eq!(store.calls(), vec!["list"]);
}

#[test]
fn list_filters() {
    let store = store_with(vec![item(1, "a", false), item(2, "b", true)]);
    assert_eq!(run(&store, list(Filter::Active)).unwrap(), "[ ] 1 a\n1 items left\n");
    assert_eq!(run(&store, list(Filter::Completed)).unwrap(), "[x] 2 b\n1 items left\n");
}

#[test]
fn list_only_shows_owner_items() {
    let mut other = item(9, "not mine", false);
    other.owner_id = OwnerId(2);
    let store = store_with(vec![item(1, "mine", false), other]);
    let out = run(&store, list(Filter::All)).unwrap();
    assert!(!out.contains("not mine"));
}

#[test]
fn list_json() {
    let store = store_with(vec![item(1, "a", false)]);
    let out = run_json(&store, list(Filter::All), true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["active"], 1);
    assert_eq!(value["items"][0]["userId"], 1139);
}

#[test]
fn add_creates_trimmed_title() {
    let store = store_with(vec![]);
    let out = run(
        &store,
        Commands::Add(AddArgs {
            title: "  Buy milk  ".into(),
        }),
    )
    .unwrap();
    assert_eq!(out, "[ ] 1 Buy milk\n1 items left\n");
    assert_eq!(store.calls(), vec!["list", "create"]);
    assert_eq!(store.items(), vec![item(1, "Buy milk", false)]);
}

#[test]
fn add_blank_title_fails_without_request() {
    let store = store_with(vec![]);
    let err = run(&store, Commands::Add(AddArgs { title: "   ".into() })).unwrap_err();
    assert_eq!(err, "Title should not be empty");
    assert_eq!(store.calls(), vec!["list"]);
}

#[test]
fn add_failure_reports_error() {
    let store = store_with(vec![]);
    store.fail_op("create");
    let err = run(&store, Commands::Add(AddArgs { title: "x".into() })).unwrap_err();
    assert_eq!(err, "Unable to add a todo");
    assert!(store.items().is_empty());
}

#[test]
fn load_failure_stops_before_command() {
    let store = store_with(vec![item(1, "a", false)]);
    store.fail_op("list");
    let err = run(&store, Commands::Rm(IdArgs { id: ItemId(1) })).unwrap_err();
    assert_eq!(err, "Unable to load todos");
    assert_eq!(store.calls(), vec!["list"]);
}

#[test]
fn toggle_flips_completed() {
    let store = store_with(vec![item(1, "a", false)]);
    let out = run(&store, Commands::Toggle(IdArgs { id: ItemId(1) })).unwrap();
    assert_eq!(out, "[x] 1 a\n0 items left\n");
    assert_eq!(store.items(), vec![item(1, "a", true)]);
}

#[test]
fn toggle_unknown_id() {
    let store = store_with(vec![item(1, "a", false)]);
    let err = run(&store, Commands::Toggle(IdArgs { id: ItemId(4) })).unwrap_err();
    assert_eq!(err, CommandError::NotFound(ItemId(4)).to_string());
    assert_eq!(store.calls(), vec!["list"]);
}

#[test]
fn toggle_all_completes_only_incomplete() {
    let store = store_with(vec![item(1, "a", false), item(2, "b", true), item(3, "c", false)]);
    run(&store, Commands::ToggleAll).unwrap();
    assert_eq!(store.calls(), vec!["list", "update 1", "update 3"]);
    assert!(store.items().iter().all(|i| i.completed));
}

#[test]
fn toggle_all_reopens_when_all_completed() {
    let store = store_with(vec![item(1, "a", true), item(2, "b", true)]);
    run(&store, Commands::ToggleAll).unwrap();
    assert_eq!(store.calls(), vec!["list", "update 1", "update 2"]);
    assert!(store.items().iter().all(|i| !i.completed));
}

#[test]
fn rename_sends_trimmed_title() {
    let store = store_with(vec![item(1, "old", false)]);
    let out = run(
        &store,
        Commands::Rename(RenameArgs {
            id: ItemId(1),
            title: " new ".into(),
        }),
    )
    .unwrap();
    assert_eq!(out, "[ ] 1 new\n1 items left\n");
    assert_eq!(store.calls(), vec!["list", "update 1"]);
}

#[test]
fn rename_unchanged_makes_no_request() {
    let store = store_with(vec![item(1, "same", false)]);
    run(
        &store,
        Commands::Rename(RenameArgs {
            id: ItemId(1),
            title: "same ".into(),
        }),
    )
    .unwrap();
    assert_eq!(store.calls(), vec!["list"]);
}

#[test]
fn rename_to_empty_deletes() {
    let store = store_with(vec![item(1, "a", false), item(2, "b", false)]);
    let out = run(
        &store,
        Commands::Rename(RenameArgs {
            id: ItemId(1),
            title: "  ".into(),
        }),
    )
    .unwrap();
    assert_eq!(out, "[ ] 2 b\n1 items left\n");
    assert_eq!(store.calls(), vec!["list", "delete 1"]);
}

#[test]
fn rename_failure_reports_update_error() {
    let store = store_with(vec![item(1, "a", false)]);
    store.fail_id(ItemId(1));
    let err = run(
        &store,
        Commands::Rename(RenameArgs {
            id: ItemId(1),
            title: "b".into(),
        }),
    )
    .unwrap_err();
    assert_eq!(err, "Unable to update a todo");
    assert_eq!(store.items(), vec![item(1, "a", false)]);
}

#[test]
fn rm_deletes() {
    let store = store_with(vec![item(1, "a", false)]);
    let out = run(&store, Commands::Rm(IdArgs { id: ItemId(1) })).unwrap();
    assert_eq!(out, "Nothing to do\n0 items left\n");
    assert!(store.items().is_empty());
}

#[test]
fn rm_failure_keeps_item() {
    let store = store_with(vec![item(1, "a", false)]);
    store.fail_op("delete");
    let err = run(&store, Commands::Rm(IdArgs { id: ItemId(1) })).unwrap_err();
    assert_eq!(err, "Unable to delete a todo");
    assert_eq!(store.items().len(), 1);
}

#[test]
fn clear_completed_deletes_each_completed_item() {
    let store = store_with(vec![item(1, "a", true), item(2, "b", false), item(3, "c", true)]);
    let out = run(&store, Commands::ClearCompleted).unwrap();
    assert_eq!(store.calls(), vec!["list", "delete 1", "delete 3"]);
    assert_eq!(out, "[ ] 2 b\n1 items left\n");
}

#[test]
fn clear_completed_partial_failure() {
    let store = store_with(vec![item(1, "a", true), item(2, "b", true)]);
    store.fail_id(ItemId(2));
    let err = run(&store, Commands::ClearCompleted).unwrap_err();
    assert_eq!(err, "Unable to delete a todo");
    assert_eq!(store.items(), vec![item(2, "b", true)]);
}
