#![no_main]
use libfuzzer_sys::fuzz_target;
use trackboard::model::{format_display_date, parse_date_bound, parse_timestamp};

/// Fuzz the timestamp helpers with arbitrary stored text.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = format_display_date(Some(s));
        let _ = parse_timestamp(s);
        let _ = parse_date_bound(s);
    }
});
