#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(parts) = bastion_envelope::wire::unframe(data) {
        let _ = bastion_envelope::wire::parse_header(parts.header);
    }
});
