#![no_main]

use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

use bastion_envelope::Bastion;

static BASTION: Lazy<Bastion> = Lazy::new(|| {
    let bastion = Bastion::new();
    bastion.initialize(&mut rand_core::OsRng).unwrap();
    bastion
});

fuzz_target!(|data: &[u8]| {
    let _ = BASTION.decrypt(data);
});
