#![no_main]

use std::collections::VecDeque;

use bitwindow::window::ExponentialHistogram;
use libfuzzer_sys::fuzz_target;

// Fuzz the histogram with arbitrary bit streams
//
// The first four bytes pick the window size and k; every following byte
// contributes eight bits. After each step the estimate is checked against an
// exact count of the trailing window and every structural invariant is
// re-derived from a scan.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let window_size = 1 + u32::from(u16::from_le_bytes([data[0], data[1]]) % 2048);
    let k = 1 + u32::from(data[2] % 16);
    let reset_every = usize::from(data[3]);

    let mut histogram = ExponentialHistogram::new(window_size, k);
    let mut recent: VecDeque<bool> = VecDeque::new();
    let mut exact = 0u64;
    let mut step = 0usize;

    for &byte in &data[4..] {
        for shift in 0..8 {
            let bit = (byte >> shift) & 1 == 1;
            step += 1;

            recent.push_back(bit);
            exact += u64::from(bit);
            if recent.len() > window_size as usize && recent.pop_front() == Some(true) {
                exact -= 1;
            }

            let estimate = histogram.advance(bit);
            assert!(estimate <= exact);
            assert!(exact - estimate <= exact.div_ceil(u64::from(k)));
            histogram.debug_validate_invariants();

            if reset_every > 0 && step % (reset_every * 8) == 0 {
                histogram.reset();
                recent.clear();
                exact = 0;
            }
        }
    }
});
