//! Synthetic export generator for stress testing chatlens.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [messages] [output] [seed]
//! Example: cargo run --features gen-test --bin gen_test -- 100000 messages/heavy.html

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const SENDERS: &[&str] = &[
    "Jane Doe",
    "Łukasz Żółkiewski",
    "Bob",
    "Zoë O'Brien",
    "Anna Maria Śliwińska",
];

const WORDS: &[&str] = &[
    "hello",
    "cześć",
    "dzięki",
    "jutro",
    "okay",
    "really?",
    "where",
    "kiedy",
    "będziesz",
    "sure,",
    "later.",
    "zażółć",
    "gęślą",
    "jaźń",
    "&amp;",
    "&lt;3",
    "<b>bold</b>",
    "😂",
    "🔥",
    "👨‍👩‍👧‍👦",
];

/// Zone suffixes. The last three only parse after the three-character trim,
/// as UTC wall-clock time.
const ZONES: &[&str] = &["UTC", "GMT", "CET", "CEST", "UTC+01", "GMTxyz", "UTCabc"];

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map(|s| s.as_str()).unwrap_or("heavy_test.html");
    let seed: u64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(42);

    println!("🧪 Export Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!("   Seed:     {}", seed);
    println!();

    let start = std::time::Instant::now();
    let bytes = generate(count, output, seed)?;
    let elapsed = start.elapsed().as_secs_f64();

    println!(
        "✅ Wrote {} messages ({:.1} MB) in {:.2}s",
        count,
        bytes as f64 / 1024.0 / 1024.0,
        elapsed
    );
    Ok(())
}

fn generate(count: usize, output: &str, seed: u64) -> io::Result<usize> {
    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut bytes = 0;
    let head = "<!DOCTYPE html>\n<html><head><meta charset=\"UTF-8\"><title>Conversation with Jane Doe</title>\
                <style>.message { color: #333; } p > b { x: \"</div>\"; }</style></head>\n\
                <body><div class=\"thread\">Conversation with Jane Doe\n";
    writer.write_all(head.as_bytes())?;
    bytes += head.len();

    // Newest first, walking back in time.
    let mut ts: DateTime<Utc> = Utc
        .with_ymd_and_hms(2024, 6, 30, 23, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);

    for i in 0..count {
        let block = message_block(&mut rng, ts);
        writer.write_all(block.as_bytes())?;
        bytes += block.len();

        ts -= random_gap(&mut rng);

        if (i + 1) % 10_000 == 0 {
            print!("\r   {} / {}", i + 1, count);
            io::stdout().flush()?;
        }
    }
    if count >= 10_000 {
        println!();
    }

    let tail = "</div></body></html>\n";
    writer.write_all(tail.as_bytes())?;
    writer.flush()?;
    Ok(bytes + tail.len())
}

fn message_block(rng: &mut StdRng, ts: DateTime<Utc>) -> String {
    // One in fifty senders is a removed account with an empty user span.
    let sender = if rng.gen_ratio(1, 50) {
        ""
    } else {
        SENDERS.choose(rng).copied().unwrap_or("Bob")
    };
    let zone = ZONES.choose(rng).copied().unwrap_or("UTC");
    let offset_hours = match zone {
        "CET" => 1,
        "CEST" => 2,
        _ => 0,
    };
    let local = ts + Duration::hours(offset_hours);
    let stamp = format!("{} {}", local.format("%A, %d %B %Y at %H:%M"), zone);

    let words = rng.gen_range(1..=12);
    let body: Vec<&str> = (0..words)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect();
    let body = body.join(" ").replace("<b>bold</b>", "&lt;b&gt;bold&lt;/b&gt;");

    format!(
        "<div class=\"message\"><div class=\"message_header\"><span class=\"user\">{sender}</span>\
         <span class=\"meta\">{stamp}</span></div></div><p>{body}</p>\n"
    )
}

fn random_gap(rng: &mut StdRng) -> Duration {
    match rng.gen_range(0..100) {
        0..=79 => Duration::seconds(rng.gen_range(5..600)),
        80..=94 => Duration::minutes(rng.gen_range(10..600)),
        _ => Duration::hours(rng.gen_range(11..24 * 14)),
    }
}
