#![no_main]
use libfuzzer_sys::fuzz_target;
use trackboard::model::Record;
use trackboard::pipeline::{derive_view, FilterState, SortKey, SortState};
use trackboard::reports::group_for_report;

/// Fuzz record decoding and the view pipeline.
///
/// Anything the store hands back must survive normalization, every sort key
/// and report grouping without panicking.
fuzz_target!(|data: &[u8]| {
    let Ok(records) = serde_json::from_slice::<Vec<Record>>(data) else {
        return;
    };
    for key in SortKey::ALL {
        let state = SortState::NONE.activate(key);
        let view = derive_view(&records, &FilterState::new(), state);
        let _ = group_for_report(&view);
    }
    for record in &records {
        let _ = record.status_label();
        let _ = record.entry_timestamp();
    }
});
