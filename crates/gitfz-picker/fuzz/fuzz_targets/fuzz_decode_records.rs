#![no_main]

use gitfz_picker::codec::{decode_records, encode_records};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let records = decode_records(data);
    // adjacent NULs decode to an empty record, which does not re-encode
    if let Ok(encoded) = encode_records(&records) {
        assert_eq!(decode_records(&encoded), records);
    }
});
