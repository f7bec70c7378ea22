// ==============================================
// SLIDING-WINDOW SCENARIOS (integration)
// ==============================================
//
// Hand-checked streams exercised through the public API only. Every expected
// value below is derived from the bucket lifecycle: expiry at age >= W, merge
// when a size class reaches k + 2, answer = total_sum - tail.size + 1.

use bitwindow::builder::HistogramBuilder;
use bitwindow::window::ExponentialHistogram;

fn run(histogram: &mut ExponentialHistogram, bits: &[bool]) -> Vec<u64> {
    bits.iter().map(|&bit| histogram.advance(bit)).collect()
}

mod basic_streams {
    use super::*;

    #[test]
    fn all_zero_stream_returns_zero() {
        for window_size in [1, 2, 7, 64] {
            let mut histogram = ExponentialHistogram::new(window_size, 1);
            let answers = run(&mut histogram, &vec![false; window_size as usize]);
            assert!(answers.iter().all(|&a| a == 0), "window {window_size}: {answers:?}");
        }
    }

    #[test]
    fn all_ones_with_large_k_is_exact() {
        let mut histogram = ExponentialHistogram::new(4, 10);
        assert_eq!(run(&mut histogram, &[true; 4]), vec![1, 2, 3, 4]);
        // Sliding further keeps exactly W ones in view.
        assert_eq!(run(&mut histogram, &[true; 4]), vec![4, 4, 4, 4]);
        assert_eq!(histogram.merges(), 0);
    }

    #[test]
    fn three_ones_merge_with_k_one() {
        let mut histogram = ExponentialHistogram::new(16, 1);
        let answers = run(&mut histogram, &[true, true, true]);
        assert_eq!(answers, vec![1, 2, 2]);
        assert_eq!(histogram.describe(), vec![(1, 3), (2, 2)]);
        assert_eq!(histogram.merges(), 1);
        // exact count 3, allowed deviation ceil(3 / 1) = 3
        assert!(3 - answers[2] <= 3);
    }

    #[test]
    fn old_bits_expire() {
        let mut histogram = ExponentialHistogram::new(3, 1);
        let answers = run(&mut histogram, &[true, true, false, false, false]);
        assert_eq!(answers, vec![1, 2, 2, 1, 0]);
        assert!(histogram.describe().is_empty());
    }

    #[test]
    fn isolated_ones_are_counted_exactly() {
        // No two ones share a class long enough to merge.
        let mut histogram = ExponentialHistogram::new(5, 1);
        let answers = run(
            &mut histogram,
            &[true, false, false, false, false, true, false, false],
        );
        assert_eq!(answers, vec![1, 1, 1, 1, 1, 1, 1, 1]);
        assert_eq!(histogram.len(), 1);
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn describe_is_newest_first_with_non_decreasing_sizes() {
        let mut histogram = ExponentialHistogram::new(100, 2);
        run(&mut histogram, &[true; 37]);
        let buckets = histogram.describe();
        assert!(!buckets.is_empty());
        for pair in buckets.windows(2) {
            let (newer_size, newer_ts) = pair[0];
            let (older_size, older_ts) = pair[1];
            assert!(newer_size <= older_size);
            assert!(newer_ts > older_ts);
        }
        assert_eq!(buckets[0], (1, 37));
        let sum: u64 = buckets.iter().map(|&(size, _)| size).sum();
        assert_eq!(sum, histogram.total_sum());
    }

    #[test]
    fn merged_bucket_expires_as_a_whole() {
        let mut histogram = ExponentialHistogram::new(4, 1);
        // t1..t3 ones: t1 merges into t2 -> [(1,3), (2,2)]
        run(&mut histogram, &[true, true, true]);
        assert_eq!(histogram.describe(), vec![(1, 3), (2, 2)]);
        // t6: the size-2 bucket stamped t2 is 4 ticks old and leaves.
        assert_eq!(run(&mut histogram, &[false, false, false]), vec![2, 2, 1]);
        assert_eq!(histogram.describe(), vec![(1, 3)]);
    }

    #[test]
    fn reset_behaves_like_a_fresh_counter() {
        let bits = [true, false, true, true, false, true, true, true, false, true];
        let mut fresh = ExponentialHistogram::new(6, 2);
        let expected = run(&mut fresh, &bits);

        let mut reused = ExponentialHistogram::new(6, 2);
        run(&mut reused, &[true; 20]);
        reused.reset();
        assert_eq!(run(&mut reused, &bits), expected);
        assert_eq!(reused.describe(), fresh.describe());
    }

    #[test]
    fn builder_and_constructor_agree() {
        let bits: Vec<bool> = (0..200).map(|i| i % 3 != 0).collect();
        let mut built = HistogramBuilder::new(50).relative_error(0.25).build();
        let mut direct = ExponentialHistogram::new(50, 4);
        assert_eq!(run(&mut built, &bits), run(&mut direct, &bits));
        assert_eq!(built.capacity(), direct.capacity());
    }

    #[test]
    fn memory_is_committed_up_front() {
        let mut histogram = ExponentialHistogram::new(1 << 20, 8);
        let bytes = histogram.memory_bytes();
        let capacity = histogram.capacity();
        assert_eq!(capacity, 21 * 10);
        run(&mut histogram, &vec![true; 10_000]);
        assert_eq!(histogram.memory_bytes(), bytes);
        assert_eq!(histogram.capacity(), capacity);
    }
}

mod diagnostics {
    use super::*;

    #[test]
    fn display_dump_matches_describe() {
        let mut histogram = ExponentialHistogram::new(16, 1);
        run(&mut histogram, &[true; 5]);
        let dump = histogram.to_string();
        assert!(dump.starts_with(
            "ExponentialHistogram (window_size=16, k=1, current_time=5, total_sum=5):"
        ));
        for (idx, (size, timestamp)) in histogram.describe().into_iter().enumerate() {
            assert!(dump.contains(&format!(
                "Bucket {idx}: size={size}, timestamp={timestamp}"
            )));
        }
        assert!(dump.ends_with(&format!("Total buckets: {}", histogram.len())));
    }

    #[test]
    fn check_invariants_passes_on_public_usage() {
        let mut histogram = ExponentialHistogram::new(33, 3);
        for i in 0..500u32 {
            histogram.advance(i.count_ones() % 2 == 0);
            assert_eq!(histogram.check_invariants(), Ok(()));
        }
    }
}
