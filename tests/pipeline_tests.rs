//! Pipeline and CLI integration tests.
//!
//! These tests exercise the full load → filter → sort → paginate path and
//! the command handlers against the JSON fixture. The fixture mixes current
//! and legacy field names.

use trackboard::cli::{run_delete, run_list, DeleteConfig, ListConfig, ListFormat};
use trackboard::config::AppConfig;
use trackboard::model::{parse_date_bound, Record, RecordId, DONE, PENDING, UNKNOWN_STATUS};
use trackboard::pipeline::{
    exit_codes, status_counts, DateDimension, FilterDimension, FilterState, SortDirection,
    SortKey, SortState,
};
use trackboard::store::{FileStore, RecordStore, Session};
use trackboard::Dashboard;
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn loaded() -> Dashboard {
    let store = FileStore::new(fixture_path("records.json"));
    let mut dashboard = Dashboard::new();
    let outcome = dashboard.load(&store, &Session::new("local").unwrap());
    assert!(!outcome.is_degraded(), "fixture should load");
    dashboard
}

fn ids(view: &[&Record]) -> Vec<i64> {
    view.iter().map(|r| r.id.0).collect()
}

fn date(s: &str) -> Option<chrono::NaiveDate> {
    Some(parse_date_bound(s).unwrap())
}

/// Copy the fixture somewhere writable.
fn scratch_fixture() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    std::fs::copy(fixture_path("records.json"), &path).unwrap();
    (dir, path)
}

// ============================================================================
// Loading
// ============================================================================

mod load {
    use super::*;

    #[test]
    fn fixture_loads_newest_first() {
        let dashboard = loaded();
        assert_eq!(dashboard.records().len(), 20);
        assert_eq!(dashboard.records()[0].id, RecordId(20));
        assert_eq!(dashboard.records()[19].id, RecordId(1));
    }

    #[test]
    fn legacy_field_names_are_accepted() {
        let dashboard = loaded();
        let legacy = dashboard.find(RecordId(2)).unwrap();
        assert_eq!(legacy.owner.as_deref(), Some("Carla"));
        assert_eq!(legacy.project.as_deref(), Some("Project 2"));
        assert_eq!(legacy.entry_date.as_deref(), Some("2024-01-11T09:30:00"));
        assert_eq!(legacy.status_label(), DONE);
    }

    #[test]
    fn missing_file_degrades_to_empty() {
        let store = FileStore::new(fixture_path("does-not-exist.json"));
        let mut dashboard = Dashboard::new();
        let outcome = dashboard.load(&store, &Session::new("local").unwrap());
        assert!(outcome.is_degraded());
        assert!(dashboard.view().is_empty());
        assert_eq!(dashboard.page_count(), 1);
    }
}

// ============================================================================
// Filtering
// ============================================================================

mod filtering {
    use super::*;

    #[test]
    fn status_filter_uses_canonical_labels() {
        let mut dashboard = loaded();
        dashboard.update_filter(|f| {
            f.toggle_status(PENDING);
        });
        let mut found = ids(&dashboard.view());
        found.sort_unstable();
        assert_eq!(found, vec![1, 6, 11, 16]);
    }

    #[test]
    fn dimensions_combine_with_and() {
        let mut dashboard = loaded();
        dashboard.update_filter(|f| {
            f.toggle_owner("Ana");
            f.toggle_status(PENDING);
        });
        assert_eq!(ids(&dashboard.view()), vec![16]);
    }

    #[test]
    fn values_within_a_dimension_combine_with_or() {
        let mut dashboard = loaded();
        dashboard.update_filter(|f| {
            f.toggle_owner("Ana");
            f.toggle_owner("Bruno");
        });
        assert_eq!(dashboard.view().len(), 10);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let mut dashboard = loaded();
        dashboard.update_filter(|f| {
            let range = f.range_mut(DateDimension::Entry);
            range.from = date("2024-02-10");
            range.to = date("2024-02-12");
        });
        let mut found = ids(&dashboard.view());
        found.sort_unstable();
        assert_eq!(found, vec![11, 12, 13]);
    }

    #[test]
    fn bounded_range_excludes_missing_dates() {
        let mut dashboard = loaded();
        dashboard.update_filter(|f| {
            f.range_mut(DateDimension::Completed).to = date("2024-02-10");
        });
        let mut found = ids(&dashboard.view());
        found.sort_unstable();
        assert_eq!(found, vec![5, 10]);
    }

    #[test]
    fn filter_options_are_distinct_and_sorted() {
        let dashboard = loaded();
        let options = dashboard.filter_options();
        assert_eq!(
            options.values(FilterDimension::Owner),
            ["Ana", "Bruno", "Carla"]
        );
        assert_eq!(
            options.values(FilterDimension::Department),
            ["Finance", "IT", "Legal"]
        );
    }

    #[test]
    fn filter_change_returns_to_first_page() {
        let mut dashboard = loaded();
        dashboard.next_page();
        assert_eq!(dashboard.page_index(), 1);
        dashboard.update_filter(|f| {
            f.toggle_department("IT");
        });
        assert_eq!(dashboard.page_index(), 0);
    }

    #[test]
    fn clear_filters_restores_everything() {
        let mut dashboard = loaded();
        let mut filter = FilterState::new();
        filter.toggle_requester("Diego");
        dashboard.set_filter(filter);
        assert_eq!(dashboard.view().len(), 10);
        dashboard.clear_filters();
        assert_eq!(dashboard.view().len(), 20);
    }
}

// ============================================================================
// Sorting and pagination
// ============================================================================

mod sorting {
    use super::*;

    #[test]
    fn three_activations_restore_filtered_order() {
        let mut dashboard = loaded();
        let before = ids(&dashboard.view());
        dashboard.toggle_sort(SortKey::Project);
        dashboard.toggle_sort(SortKey::Project);
        assert_ne!(ids(&dashboard.view()), before);
        dashboard.toggle_sort(SortKey::Project);
        assert_eq!(ids(&dashboard.view()), before);
    }

    #[test]
    fn due_date_sorts_as_text() {
        let mut dashboard = loaded();
        dashboard.set_sort(SortState::new(SortKey::Due, SortDirection::Ascending));
        let view = dashboard.view();
        assert_eq!(view[0].id, RecordId(1));
        assert_eq!(view[19].id, RecordId(20));
    }

    #[test]
    fn pages_hold_fifteen_rows() {
        let mut dashboard = loaded();
        assert_eq!(dashboard.page_count(), 2);

        let view = dashboard.view();
        let first = dashboard.current_page(&view);
        assert_eq!(first.rows.len(), 15);
        assert_eq!(first.label(), "Page 1 of 2");

        dashboard.last_page();
        let view = dashboard.view();
        let last = dashboard.current_page(&view);
        assert_eq!(last.rows.len(), 5);
        assert!(last.is_last());
    }

    #[test]
    fn status_counts_follow_weight_order() {
        let dashboard = loaded();
        let view = dashboard.view();
        let counts: Vec<(String, usize)> = status_counts(&view).into_iter().collect();
        assert_eq!(counts[0], (DONE.to_string(), 4));
        assert_eq!(counts.len(), 5);
        assert!(counts.contains(&(UNKNOWN_STATUS.to_string(), 4)));
        assert!(counts.contains(&("BLOCKED".to_string(), 4)));
    }
}

// ============================================================================
// Command handlers
// ============================================================================

mod commands {
    use super::*;

    #[test]
    fn list_writes_json_page() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("page.json");
        let app = AppConfig::builder()
            .source_file(Some(fixture_path("records.json")))
            .build();

        let code = run_list(
            &app,
            ListConfig {
                page: Some(2),
                format: ListFormat::Json,
                output_file: Some(out.clone()),
                quiet: true,
                ..ListConfig::default()
            },
        )
        .unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(json["records"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn list_degraded_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let app = AppConfig::builder()
            .source_file(Some(dir.path().join("missing.json")))
            .build();
        let code = run_list(
            &app,
            ListConfig {
                output_file: Some(dir.path().join("out.txt")),
                quiet: true,
                ..ListConfig::default()
            },
        )
        .unwrap();
        assert_eq!(code, exit_codes::DEGRADED);
    }

    #[test]
    fn delete_persists_to_file_store() {
        let (_dir, path) = scratch_fixture();
        let app = AppConfig::builder().source_file(Some(path.clone())).build();

        let code = run_delete(
            &app,
            DeleteConfig {
                id: RecordId(7),
                yes: true,
                quiet: true,
            },
        )
        .unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let left = FileStore::new(&path)
            .fetch_all(&Session::new("local").unwrap())
            .unwrap();
        assert_eq!(left.len(), 19);
        assert!(left.iter().all(|r| r.id != RecordId(7)));
    }
}
