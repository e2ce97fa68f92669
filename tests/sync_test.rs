#![allow(clippy::indexing_slicing)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use chrono::{DateTime, Utc};
use common::{long_ago, set_mtime, TestSite};
use docs_map::sync::{synchronize, SyncError, SyncMode, SyncOptions, SyncOutcome};
use std::time::Duration;

fn flat_options(site: &TestSite) -> SyncOptions {
    SyncOptions::new(site.docs(), site.manifest())
}

fn nested_options(site: &TestSite) -> SyncOptions {
    flat_options(site).with_mode(SyncMode::Nested)
}

fn written(outcome: SyncOutcome) -> docs_map::SyncReport {
    match outcome {
        SyncOutcome::Written(report) => report,
        SyncOutcome::NothingToDo => panic!("Expected the manifest to be written"),
    }
}

// ============ Flat Mode Tests ============

#[test]
fn test_new_file_gets_entry_with_current_time() {
    let site = TestSite::new();
    std::fs::create_dir_all(site.docs()).unwrap();
    site.write_doc("hello.mdx", "# Hello");

    let before = Utc::now() - chrono::Duration::seconds(1);
    let report = written(synchronize(&flat_options(&site)).expect("Should sync"));
    let after = Utc::now() + chrono::Duration::seconds(1);

    assert_eq!(report.added, 1);
    let json = site.manifest_json();
    let entries = json.as_array().expect("Manifest should be an array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["main"], "hello");
    assert!(entries[0].get("sub").is_none());
    assert!(entries[0].get("date").is_none());

    let updated = DateTime::parse_from_rfc3339(entries[0]["updated"].as_str().unwrap())
        .expect("updated should be ISO-8601")
        .with_timezone(&Utc);
    assert!(updated >= before && updated <= after, "updated should be ~now");
}

#[test]
fn test_touched_file_moves_updated_forward() {
    let site = TestSite::new();
    let doc = site.write_doc("hello.mdx", "# Hello");
    std::fs::write(
        site.manifest(),
        r#"[{"main": "hello", "updated": "2020-09-13T12:26:40.000Z"}]"#,
    )
    .unwrap();

    // T1 is one day after the stored T0
    set_mtime(&doc, long_ago() + Duration::from_secs(86_400));
    let report = written(synchronize(&flat_options(&site)).expect("Should sync"));

    assert_eq!(report.updated, 1);
    assert_eq!(site.manifest_json()[0]["updated"], "2020-09-14T12:26:40.000Z");
}

#[test]
fn test_older_file_does_not_move_updated_backwards() {
    let site = TestSite::new();
    let doc = site.write_doc("hello.mdx", "# Hello");
    std::fs::write(
        site.manifest(),
        r#"[{"main": "hello", "updated": "2030-01-01T00:00:00.000Z"}]"#,
    )
    .unwrap();
    set_mtime(&doc, long_ago());

    let report = written(synchronize(&flat_options(&site)).expect("Should sync"));

    assert_eq!(report.unchanged, 1);
    assert_eq!(site.manifest_json()[0]["updated"], "2030-01-01T00:00:00.000Z");
}

#[test]
fn test_second_run_is_byte_identical() {
    let site = TestSite::new();
    site.write_doc("alpha.mdx", "a");
    site.write_doc("beta.mdx", "b");
    site.write_doc("guide/intro.mdx", "ignored in flat mode");

    synchronize(&flat_options(&site)).expect("First sync");
    let first = site.manifest_text();
    let report = written(synchronize(&flat_options(&site)).expect("Second sync"));
    let second = site.manifest_text();

    assert_eq!(first, second);
    assert!(!report.has_changes());
    assert_eq!(report.unchanged, 2);
}

#[test]
fn test_every_content_file_has_exactly_one_entry() {
    let site = TestSite::new();
    let names = ["a", "b", "c", "d", "e"];
    for name in names {
        site.write_doc(&format!("{name}.mdx"), name);
    }
    site.write_doc("readme.txt", "not content");

    synchronize(&flat_options(&site)).expect("First sync");
    site.write_doc("f.mdx", "f");
    synchronize(&flat_options(&site)).expect("Second sync");

    let json = site.manifest_json();
    let mains: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["main"].as_str().unwrap())
        .collect();
    assert_eq!(mains, vec!["a", "b", "c", "d", "e", "f"]);
}

#[test]
fn test_manifest_is_indented_json() {
    let site = TestSite::new();
    site.write_doc("hello.mdx", "# Hello");

    synchronize(&flat_options(&site)).expect("Should sync");

    let text = site.manifest_text();
    assert!(text.starts_with("[\n  {\n    \"main\": \"hello\",\n    \"updated\": "));
    assert!(text.ends_with("]\n"));
}

// ============ Nested Mode Tests ============

#[test]
fn test_nested_directory_becomes_one_entry() {
    let site = TestSite::new();
    site.write_doc("guide/intro.mdx", "intro");
    site.write_doc("guide/setup.mdx", "setup");

    let report = written(synchronize(&nested_options(&site)).expect("Should sync"));

    assert_eq!(report.added, 1);
    let json = site.manifest_json();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["main"], "guide");
    assert_eq!(entries[0]["sub"], serde_json::json!(["intro", "setup"]));
    assert!(entries[0]["date"].is_string());
    assert!(entries[0]["updated"].is_string());
}

#[test]
fn test_nested_new_sub_is_appended_never_removed() {
    let site = TestSite::new();
    let intro = site.write_doc("guide/intro.mdx", "intro");
    synchronize(&nested_options(&site)).expect("First sync");

    std::fs::remove_file(&intro).unwrap();
    site.write_doc("guide/setup.mdx", "setup");
    let report = written(synchronize(&nested_options(&site)).expect("Second sync"));

    assert_eq!(report.sub_added, 1);
    assert_eq!(
        site.manifest_json()[0]["sub"],
        serde_json::json!(["intro", "setup"])
    );
}

#[test]
fn test_nested_second_run_is_byte_identical() {
    let site = TestSite::new();
    site.write_doc("guide/intro.mdx", "intro");
    site.write_doc("guide/setup.mdx", "setup");

    synchronize(&nested_options(&site)).expect("First sync");
    let first = site.manifest_text();
    let report = written(synchronize(&nested_options(&site)).expect("Second sync"));
    let second = site.manifest_text();

    assert_eq!(first, second);
    assert!(!report.has_changes());
    assert_eq!(report.unchanged, 1);
    assert_eq!(report.sub_added, 0);
}

#[test]
fn test_nested_ignores_top_level_files() {
    let site = TestSite::new();
    site.write_doc("loose.mdx", "not in a directory");

    let outcome = synchronize(&nested_options(&site)).expect("Should sync");

    assert_eq!(outcome, SyncOutcome::NothingToDo);
    assert!(!site.manifest().exists());
}

// ============ No-op and Setup Tests ============

#[test]
fn test_missing_docs_directory_is_created() {
    let site = TestSite::new();
    assert!(!site.docs().exists());

    let outcome = synchronize(&flat_options(&site)).expect("Should sync");

    assert_eq!(outcome, SyncOutcome::NothingToDo);
    assert!(site.docs().is_dir());
}

#[test]
fn test_empty_docs_directory_leaves_manifest_untouched() {
    let site = TestSite::new();
    std::fs::create_dir_all(site.docs()).unwrap();
    site.write_doc("draft.txt", "not content");
    let existing = r#"[{"main":"kept","updated":"2020-01-01T00:00:00.000Z"}]"#;
    std::fs::write(site.manifest(), existing).unwrap();

    let outcome = synchronize(&flat_options(&site)).expect("Should sync");

    assert_eq!(outcome, SyncOutcome::NothingToDo);
    assert_eq!(site.manifest_text(), existing);
}

// ============ Retention Tests ============

#[test]
fn test_entries_for_deleted_files_are_kept_by_default() {
    let site = TestSite::new();
    let old = site.write_doc("old.mdx", "old");
    site.write_doc("new.mdx", "new");
    synchronize(&flat_options(&site)).expect("First sync");

    std::fs::remove_file(old).unwrap();
    let report = written(synchronize(&flat_options(&site)).expect("Second sync"));

    assert_eq!(report.pruned, 0);
    assert_eq!(report.total, 2);
}

#[test]
fn test_entries_for_deleted_files_are_pruned_when_enabled() {
    let site = TestSite::new();
    let old = site.write_doc("old.mdx", "old");
    site.write_doc("new.mdx", "new");
    synchronize(&flat_options(&site)).expect("First sync");

    std::fs::remove_file(old).unwrap();
    let options = flat_options(&site).with_prune_missing(true);
    let report = written(synchronize(&options).expect("Second sync"));

    assert_eq!(report.pruned, 1);
    let json = site.manifest_json();
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["main"], "new");
}

// ============ Error Tests ============

#[test]
fn test_malformed_manifest_is_parse_error_and_untouched() {
    let site = TestSite::new();
    site.write_doc("hello.mdx", "# Hello");
    std::fs::write(site.manifest(), "[{\"main\": ").unwrap();

    let err = synchronize(&flat_options(&site)).expect_err("Should fail");

    assert!(matches!(err, SyncError::ManifestParse { .. }));
    assert_eq!(site.manifest_text(), "[{\"main\": ");
}

#[cfg(unix)]
#[test]
fn test_dangling_link_beside_content_is_skipped() {
    let site = TestSite::new();
    site.write_doc("hello.mdx", "# Hello");
    std::os::unix::fs::symlink(
        site.docs().join("gone.txt"),
        site.docs().join("stale-link.txt"),
    )
    .unwrap();

    let report = written(synchronize(&flat_options(&site)).expect("Should sync"));

    assert_eq!(report.added, 1);
    assert_eq!(site.manifest_json()[0]["main"], "hello");
}

#[test]
fn test_content_root_that_is_a_file_is_directory_error() {
    let site = TestSite::new();
    std::fs::create_dir_all(site.dir.path().join("blogs")).unwrap();
    std::fs::write(site.docs(), "not a directory").unwrap();

    let err = synchronize(&flat_options(&site)).expect_err("Should fail");

    assert!(matches!(err, SyncError::DirectoryAccess { .. }));
}

#[test]
fn test_custom_extension() {
    let site = TestSite::new();
    site.write_doc("post.md", "md");
    site.write_doc("other.mdx", "mdx");

    let options = flat_options(&site).with_extension("md");
    written(synchronize(&options).expect("Should sync"));

    let json = site.manifest_json();
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["main"], "post");
}
