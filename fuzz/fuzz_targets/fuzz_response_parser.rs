//! Fuzz target: `parse_response` (inference server answer)
//!
//! Invariants checked:
//! - No panics under any UTF-8 input
//! - Only the empty body is a miss
//! - A hit's coordinates are whole numbers
//!
//! cargo fuzz run fuzz_response_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use pestlaser::adapters::inference::parse_response;

fuzz_target!(|data: &[u8]| {
    let Ok(body) = std::str::from_utf8(data) else {
        return;
    };

    match parse_response(body) {
        Ok(None) => assert!(body.is_empty(), "non-empty body {:?} parsed as a miss", body),
        Ok(Some(c)) => {
            assert_eq!(c.x.fract(), 0.0);
            assert_eq!(c.y.fract(), 0.0);
        }
        Err(e) => assert_eq!(e.body, body),
    }
});
