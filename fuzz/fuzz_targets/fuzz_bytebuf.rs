#![no_main]
use libfuzzer_sys::fuzz_target;
use mcm_utils::bytebuf::ByteBuffer;

fuzz_target!(|data: &[u8]| {
    let mut buf = ByteBuffer::allocate(64);
    for &op in data {
        match op % 4 {
            0 => {
                let _ = buf.put(op);
            }
            1 => {
                let _ = buf.get_one();
            }
            2 => {
                let _ = buf.set_position((op / 4) as usize);
            }
            _ => {
                let _ = buf.put_int(op as i32);
            }
        }
    }
});
