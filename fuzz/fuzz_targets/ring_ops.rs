#![no_main]

use cbuffer::RingBuffer;
use libfuzzer_sys::fuzz_target;

// First byte picks the capacity; each following byte is one operation.
// High bit set = read (low bits = count), otherwise write that many bytes.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = cap as usize;
    let mut buf = RingBuffer::<u8>::new(capacity).unwrap();
    let mut next: u8 = 0;
    let mut expected: u8 = 0;

    for &op in ops {
        let n = (op & 0x7f) as usize;
        if op & 0x80 != 0 {
            let before = buf.occupancy();
            match buf.read(n) {
                Ok(samples) => {
                    for s in samples {
                        assert_eq!(s, expected);
                        expected = expected.wrapping_add(1);
                    }
                }
                Err(_) => assert_eq!(buf.occupancy(), before),
            }
        } else {
            let chunk: Vec<u8> = (0..n as u8).map(|i| next.wrapping_add(i)).collect();
            if buf.write(&chunk).is_ok() {
                next = next.wrapping_add(n as u8);
            }
        }
        assert_eq!(buf.occupancy() + buf.free_space(), capacity);
    }
});
