//! Fuzz target for the dashboard filter parameter decoder.
//!
//! Arbitrary query strings must either decode or return an error, and
//! anything that decodes must encode and decode again without losing rules.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_param_decode
//! ```

#![no_main]

use dashfilter_core::ParamCodec;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let codec = ParamCodec::new();
    if let Ok(Some(filters)) = codec.from_query(input) {
        let pair = codec.to_query_pair(&filters).expect("decoded filters must encode");
        let again = codec
            .from_query(&pair)
            .expect("encoded filters must decode")
            .expect("parameter must be present");

        assert_eq!(filters.rule_count(), again.rule_count());
        for (before, after) in filters.rules().zip(again.rules()) {
            assert_eq!(before.id, after.id);
            // Redundant overrides may be dropped, never exclusions
            for (tile_id, target) in &before.tile_targets {
                if target.is_disabled() {
                    assert!(after.tile_targets[tile_id].is_disabled());
                }
            }
        }
    }
});
