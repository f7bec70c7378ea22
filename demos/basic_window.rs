use bitwindow::builder::HistogramBuilder;

fn main() {
    // Count set bits in the last 1000 events with at most 10% relative error.
    let mut counter = HistogramBuilder::new(1000).relative_error(0.1).build();
    println!(
        "window=1000 k={} capacity={} bytes={}",
        counter.k(),
        counter.capacity(),
        counter.memory_bytes()
    );

    // Every third event is set.
    let mut estimate = 0;
    for i in 0..5000u32 {
        estimate = counter.advance(i % 3 == 0);
    }
    println!("estimate={} exact=333 buckets={}", estimate, counter.len());

    // A burst of ones followed by silence.
    counter.reset();
    for _ in 0..40 {
        counter.advance(true);
    }
    for _ in 0..5 {
        counter.advance(false);
    }
    println!("{counter}");
}
