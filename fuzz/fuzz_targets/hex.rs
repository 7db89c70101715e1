#![no_main]

use libfuzzer_sys::fuzz_target;
use methodscope::hex;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Some(bytes) = hex::parse(text) {
            let dump = hex::format(&bytes);
            assert_eq!(hex::parse(&dump), Some(bytes));
        }
    }
});
