//! Basic usage example of Refbuf shared byte buffers

use refbuf::{global_stats, DataBuffer, Result};
use std::thread;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    println!("Refbuf Shared Byte Buffer Example");
    println!("=================================");

    // A producer creates a buffer and fills it before sharing.
    let mut payload = DataBuffer::new(1024)?;
    println!("Created buffer: {} bytes, count {}", payload.size(), payload.ref_count());

    let message = b"sensor frame 0042";
    payload.as_mut_slice()[..message.len()].copy_from_slice(message);

    // Hand clones to consumers; nobody copies the payload.
    let consumer_count = 4;
    let mut consumers = Vec::new();
    for id in 0..consumer_count {
        let view = payload.clone();
        consumers.push(thread::spawn(move || {
            let header = &view.as_slice()[..message.len()];
            println!("  consumer {} sees: {}", id, String::from_utf8_lossy(header));
        }));
    }

    println!("Handles outstanding: {}", payload.ref_count());

    for consumer in consumers {
        consumer.join().expect("consumer panicked");
    }

    // A deep clone gets its own allocation and lifecycle.
    let snapshot = payload.deep_clone()?;
    println!("Snapshot is independent: {:?}", snapshot);

    drop(payload);
    println!("Snapshot still readable after original dropped: {}",
        String::from_utf8_lossy(&snapshot.as_slice()[..message.len()]));
    drop(snapshot);

    let stats = global_stats();
    println!("\nBuffer accounting:");
    println!("  created:   {}", stats.buffers_created);
    println!("  destroyed: {}", stats.buffers_destroyed);
    println!("  live:      {}", stats.live_buffers());

    println!("\nExample completed successfully!");
    Ok(())
}
