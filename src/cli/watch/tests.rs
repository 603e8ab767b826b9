use std::path::PathBuf;
use std::time::{Duration, Instant};

use tempfile::TempDir;

use super::debouncer::{ChangeKind, Debouncer};
use super::is_content_change;
use crate::config::LibraryConfig;
use crate::utils::path::normalize_path;

const DEBOUNCE: Duration = Duration::from_millis(300);
const COOLDOWN: Duration = Duration::from_millis(800);

fn make_debouncer() -> Debouncer {
    Debouncer::new(DEBOUNCE, COOLDOWN)
}

fn make_event(paths: Vec<&str>, kind: notify::EventKind) -> notify::Event {
    notify::Event {
        kind,
        paths: paths.into_iter().map(PathBuf::from).collect(),
        attrs: Default::default(),
    }
}

fn modify_kind() -> notify::EventKind {
    notify::EventKind::Modify(notify::event::ModifyKind::Data(
        notify::event::DataChange::Any,
    ))
}

fn create_kind() -> notify::EventKind {
    notify::EventKind::Create(notify::event::CreateKind::File)
}

fn remove_kind() -> notify::EventKind {
    notify::EventKind::Remove(notify::event::RemoveKind::File)
}

#[test]
fn test_fresh_debouncer_not_ready() {
    let debouncer = make_debouncer();
    assert!(!debouncer.is_ready());
}

#[test]
fn test_each_kind_lands_on_its_path() {
    let mut debouncer = make_debouncer();

    debouncer.add_event(&make_event(vec!["/tmp/a.md"], create_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/b.md"], modify_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/c.md"], remove_kind()));

    assert_eq!(debouncer.changes.len(), 3);
    assert_eq!(
        debouncer.changes[&PathBuf::from("/tmp/a.md")],
        ChangeKind::Created
    );
    assert_eq!(
        debouncer.changes[&PathBuf::from("/tmp/b.md")],
        ChangeKind::Modified
    );
    assert_eq!(
        debouncer.changes[&PathBuf::from("/tmp/c.md")],
        ChangeKind::Removed
    );
}

#[test]
fn test_editor_droppings_skipped() {
    let mut debouncer = make_debouncer();

    debouncer.add_event(&make_event(vec!["/tmp/real.md"], modify_kind()));
    assert!(debouncer.last_event.is_some());
    let first_time = debouncer.last_event.unwrap();

    std::thread::sleep(Duration::from_millis(5));

    // Swap and backup files must not touch the window clock or the set
    debouncer.add_event(&make_event(vec!["/tmp/.dragon.md.swp"], modify_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/dragon.md~"], modify_kind()));
    assert_eq!(debouncer.last_event.unwrap(), first_time);
    assert_eq!(debouncer.changes.len(), 1);
}

#[test]
fn test_metadata_only_modify_ignored() {
    let mut debouncer = make_debouncer();

    debouncer.add_event(&make_event(
        vec!["/tmp/a.md"],
        notify::EventKind::Modify(notify::event::ModifyKind::Metadata(
            notify::event::MetadataKind::Any,
        )),
    ));

    assert!(debouncer.changes.is_empty());
    assert!(debouncer.last_event.is_none());
}

#[test]
fn test_earlier_kind_stands() {
    let mut debouncer = make_debouncer();

    // A create followed by saves still reports as created
    debouncer.add_event(&make_event(vec!["/tmp/a.md"], create_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/a.md"], modify_kind()));

    assert_eq!(debouncer.changes.len(), 1);
    assert_eq!(
        debouncer.changes[&PathBuf::from("/tmp/a.md")],
        ChangeKind::Created
    );
}

#[test]
fn test_duplicate_paths_collapse() {
    let mut debouncer = make_debouncer();
    debouncer.add_event(&make_event(vec!["/tmp/a.md", "/tmp/a.md"], modify_kind()));
    assert_eq!(debouncer.changes.len(), 1);
}

#[test]
fn test_restore_after_remove_reports_created() {
    let mut debouncer = make_debouncer();

    // Delete then rewrite within one window: the restore is what counts
    debouncer.add_event(&make_event(vec!["/tmp/a.md"], remove_kind()));
    assert_eq!(
        debouncer.changes[&PathBuf::from("/tmp/a.md")],
        ChangeKind::Removed
    );

    debouncer.add_event(&make_event(vec!["/tmp/a.md"], create_kind()));
    assert_eq!(debouncer.changes.len(), 1);
    assert_eq!(
        debouncer.changes[&PathBuf::from("/tmp/a.md")],
        ChangeKind::Created
    );
}

#[test]
fn test_create_remove_cancels_out() {
    let mut debouncer = make_debouncer();

    // Appeared and vanished inside the window: nothing to rebuild
    debouncer.add_event(&make_event(vec!["/tmp/a.md"], create_kind()));
    assert_eq!(
        debouncer.changes[&PathBuf::from("/tmp/a.md")],
        ChangeKind::Created
    );

    debouncer.add_event(&make_event(vec!["/tmp/a.md"], remove_kind()));
    assert!(
        debouncer.changes.is_empty(),
        "create then remove should cancel out"
    );
}

#[test]
fn test_modify_remove_reports_removed() {
    let mut debouncer = make_debouncer();

    // An edit that ends in deletion reports the deletion
    debouncer.add_event(&make_event(vec!["/tmp/a.md"], modify_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/a.md"], remove_kind()));
    assert_eq!(debouncer.changes.len(), 1);
    assert_eq!(
        debouncer.changes[&PathBuf::from("/tmp/a.md")],
        ChangeKind::Removed
    );
}

#[test]
fn test_sleep_duration_no_events() {
    let debouncer = make_debouncer();
    assert!(debouncer.sleep_duration() >= Duration::from_secs(3600));
}

#[test]
fn test_sleep_duration_after_event() {
    let mut debouncer = make_debouncer();
    debouncer.last_event = Some(Instant::now());

    let dur = debouncer.sleep_duration();
    assert!(dur >= DEBOUNCE - Duration::from_millis(10));
    assert!(dur <= DEBOUNCE + Duration::from_millis(10));
}

#[test]
fn test_sleep_duration_respects_cooldown() {
    let mut debouncer = make_debouncer();
    debouncer.last_event = Some(Instant::now());
    debouncer.last_rebuild = Some(Instant::now());

    let dur = debouncer.sleep_duration();
    assert!(dur >= COOLDOWN - Duration::from_millis(10));
    assert!(dur <= COOLDOWN + Duration::from_millis(10));
}

#[test]
fn test_set_timing_applies_to_pending_events() {
    let mut debouncer = make_debouncer();
    debouncer.last_event = Some(Instant::now());

    debouncer.set_timing(Duration::from_millis(50), Duration::from_millis(50));
    assert!(debouncer.sleep_duration() <= Duration::from_millis(60));
}

#[test]
fn test_take_if_ready_drains_after_quiet_period() {
    let mut debouncer = Debouncer::new(Duration::from_millis(1), Duration::from_millis(1));

    debouncer.add_event(&make_event(vec!["/tmp/a.md"], modify_kind()));
    std::thread::sleep(Duration::from_millis(5));

    let changes = debouncer.take_if_ready().expect("should be ready");
    assert_eq!(changes.len(), 1);

    // Drained; nothing left to take
    assert!(debouncer.take_if_ready().is_none());
}

#[test]
fn test_is_content_change_matches_extension_and_dir() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("content/activities");
    std::fs::create_dir_all(&content).unwrap();

    let mut config = LibraryConfig::default();
    config.set_root(tmp.path());
    config.content.dir = content.clone();
    config.config_path = normalize_path(&tmp.path().join("huodong.toml"));

    let content = normalize_path(&content);
    assert!(is_content_change(&content.join("dragon.md"), &config));
    assert!(is_content_change(&content.join("festivals/moon.md"), &config));
    assert!(!is_content_change(&content.join("notes.txt"), &config));
    assert!(!is_content_change(&config.config_path, &config));
    assert!(!is_content_change(
        &normalize_path(&tmp.path().join("public/index.json")),
        &config
    ));
}
