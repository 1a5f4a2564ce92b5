//! Report emitter tests against the JSON fixture.

use trackboard::config::ExportConfig;
use trackboard::model::{Record, RecordId, UNASSIGNED_OWNER};
use trackboard::reports::{
    create_reporter, group_for_report, order_for_report, ReportContext, ReportFormat, ReportRow,
};
use trackboard::store::{FileAssetSource, FileStore, Session};
use trackboard::{Dashboard, SortKey};
use std::path::Path;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn loaded() -> Dashboard {
    let store = FileStore::new(Path::new(FIXTURES_DIR).join("records.json"));
    let mut dashboard = Dashboard::new();
    dashboard.load(&store, &Session::new("local").unwrap());
    dashboard
}

fn export_config(dir: &Path) -> ExportConfig {
    ExportConfig {
        output_dir: dir.to_path_buf(),
        logo_path: None,
        ..ExportConfig::default()
    }
}

// ============================================================================
// Grouping
// ============================================================================

#[test]
fn grouped_rows_have_one_header_per_owner() {
    let dashboard = loaded();
    let view = dashboard.view();
    let rows = group_for_report(&view);

    let headers: Vec<&str> = rows
        .iter()
        .filter_map(|r| match r {
            ReportRow::GroupHeader(owner) => Some(*owner),
            ReportRow::Record(_) => None,
        })
        .collect();
    assert_eq!(headers, vec!["Ana", "Bruno", "Carla", UNASSIGNED_OWNER]);
    assert_eq!(rows.len(), 24);
}

#[test]
fn single_owner_report_has_no_headers() {
    let mut dashboard = loaded();
    dashboard.update_filter(|f| {
        f.toggle_owner("Bruno");
    });
    let view = dashboard.view();
    let rows = group_for_report(&view);
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r.as_record().is_some()));
}

/// Records that tie on owner, status and entry time.
fn tied_records() -> Vec<Record> {
    (1..=3)
        .map(|i| {
            let mut r = Record::new(i);
            r.owner = Some("Ana".to_string());
            r.status = Some("active".to_string());
            r.entry_date = Some("2024-01-10T09:30:00".to_string());
            r.requester = Some(format!("req{i}"));
            r
        })
        .collect()
}

fn pdf_order(dashboard: &Dashboard) -> Vec<i64> {
    let rows = dashboard.export_rows(ReportFormat::Pdf);
    group_for_report(&rows)
        .iter()
        .filter_map(ReportRow::as_record)
        .map(|r| r.id.0)
        .collect()
}

#[test]
fn report_order_ignores_screen_sort() {
    let mut dashboard = Dashboard::with_records(tied_records());
    assert_eq!(pdf_order(&dashboard), vec![1, 2, 3]);

    dashboard.toggle_sort(SortKey::Requester);
    dashboard.toggle_sort(SortKey::Requester);
    let screen: Vec<i64> = dashboard.view().iter().map(|r| r.id.0).collect();
    assert_eq!(screen, vec![3, 2, 1]);
    assert_eq!(pdf_order(&dashboard), vec![1, 2, 3]);
}

#[test]
fn fixture_report_order_ignores_screen_sort() {
    let mut dashboard = loaded();
    let unsorted: Vec<RecordId> = order_for_report(&dashboard.export_rows(ReportFormat::Pdf))
        .iter()
        .map(|r| r.id)
        .collect();
    dashboard.toggle_sort(SortKey::Project);
    dashboard.toggle_sort(SortKey::Project);
    let sorted: Vec<RecordId> = order_for_report(&dashboard.export_rows(ReportFormat::Pdf))
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(unsorted, sorted);
}

#[test]
fn owner_group_orders_by_status_weight() {
    let dashboard = loaded();
    let view = dashboard.view();
    let ana: Vec<&Record> = order_for_report(&view)
        .into_iter()
        .filter(|r| r.owner.as_deref() == Some("Ana"))
        .collect();
    // Ana holds ids 4, 8, 12, 16, 20: statuses —, BLOCKED, DONE, PENDING, IN PROGRESS
    let labels: Vec<String> = ana.iter().map(|r| r.status_label()).collect();
    assert_eq!(labels[..3], ["DONE", "IN PROGRESS", "PENDING"]);
    // Unrecognized labels share a weight; entry time breaks the tie
    let order: Vec<RecordId> = ana.iter().map(|r| r.id).collect();
    assert_eq!(
        order,
        vec![RecordId(12), RecordId(20), RecordId(16), RecordId(4), RecordId(8)]
    );
}

// ============================================================================
// Emitters
// ============================================================================

#[test]
fn pdf_export_writes_document() {
    let dir = tempfile::tempdir().unwrap();
    let dashboard = loaded();
    let config = export_config(dir.path());

    let path = dashboard
        .export(ReportFormat::Pdf, &FileAssetSource::new(dir.path()), &config)
        .unwrap();
    assert_eq!(path, dir.path().join("tracking_report.pdf"));
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn pdf_export_fails_without_logo_file() {
    let dir = tempfile::tempdir().unwrap();
    let dashboard = loaded();
    let config = ExportConfig {
        logo_path: Some("missing.png".to_string()),
        ..export_config(dir.path())
    };

    let result = dashboard.export(ReportFormat::Pdf, &FileAssetSource::new(dir.path()), &config);
    assert!(result.is_err());
    assert!(!dir.path().join("tracking_report.pdf").exists());
}

#[test]
fn pdf_export_skips_undecodable_logo() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("logo.png"), b"definitely not a png").unwrap();
    let dashboard = loaded();
    let config = ExportConfig {
        logo_path: Some("logo.png".to_string()),
        ..export_config(dir.path())
    };

    let bytes = dashboard
        .render(ReportFormat::Pdf, &FileAssetSource::new(dir.path()), &config)
        .unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn exports_embed_fixture_logo() {
    let dir = tempfile::tempdir().unwrap();
    let dashboard = loaded();
    let config = ExportConfig {
        logo_path: Some("logo.png".to_string()),
        ..export_config(dir.path())
    };
    let assets = FileAssetSource::new(FIXTURES_DIR);

    let pdf = dashboard.render(ReportFormat::Pdf, &assets, &config).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    let xlsx = dashboard.render(ReportFormat::Xlsx, &assets, &config).unwrap();
    assert!(xlsx.starts_with(b"PK"));
}

#[test]
fn xlsx_export_is_a_zip_container() {
    let dir = tempfile::tempdir().unwrap();
    let dashboard = loaded();
    let config = export_config(dir.path());

    let path = dashboard
        .export(ReportFormat::Xlsx, &FileAssetSource::new(dir.path()), &config)
        .unwrap();
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn csv_keeps_filtered_order() {
    let mut dashboard = loaded();
    dashboard.update_filter(|f| {
        f.toggle_owner("Ana");
    });
    dashboard.toggle_sort(SortKey::Project);

    let rows = dashboard.export_rows(ReportFormat::Csv);
    let order: Vec<i64> = rows.iter().map(|r| r.id.0).collect();
    assert_eq!(order, vec![20, 16, 12, 8, 4]);

    let bytes = create_reporter(ReportFormat::Csv)
        .generate(&rows, &ReportContext::default())
        .unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text.lines().count(), 6);
    assert!(text.lines().nth(1).unwrap().starts_with("20,"));
}

#[test]
fn empty_view_still_renders() {
    let dashboard = Dashboard::new();
    let dir = tempfile::tempdir().unwrap();
    let config = export_config(dir.path());
    let assets = FileAssetSource::new(dir.path());

    let pdf = dashboard.render(ReportFormat::Pdf, &assets, &config).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    let xlsx = dashboard.render(ReportFormat::Xlsx, &assets, &config).unwrap();
    assert!(xlsx.starts_with(b"PK"));
}
