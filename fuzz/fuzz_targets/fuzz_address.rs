#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = mcm_crypto::addr::WotsAddress::from_bytes(data);
});
