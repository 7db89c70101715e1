#![no_main]

use libfuzzer_sys::fuzz_target;
use methodscope::{formatter, metadata::method::MethodData};

fuzz_target!(|data: &[u8]| {
    if let Some(method) = MethodData::from_body(data) {
        let _ = formatter::format(&method);
        let _ = formatter::format_structured(&method);
    }

    let _ = formatter::format(&MethodData::from_il(data));
});
