use colored::*;
use governor::{Quota, RateLimiter};
use hdrhistogram::Histogram;
use reqwest::Client;
use serde_json::{json, Value};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use uuid::Uuid;

const DURATION_SECS: u64 = 20;
const DEFAULT_BASE_URL: &str = "http://localhost:5000";

struct Target {
    name: &'static str,
    method: &'static str,
    url: String,
    body: Option<serde_json::Value>,
}

#[tokio::main]
async fn main() {
    let base_url = std::env::var("BENCH_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    println!("{}", "🚀 Starting Benchmark Suite".bold().green());
    println!("Target URL: {}", base_url);

    let client = Client::builder()
        .pool_max_idle_per_host(1000)
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    if client.get(format!("{}/health", base_url)).send().await.is_err() {
        eprintln!("{}", format!("❌ Server is NOT reachable at {}. Please start it first.", base_url).red().bold());
        return;
    }

    println!("\n{}", "⚙️  Setting up benchmark data...".yellow());
    let camping_id = find_catalog_id(&client, &base_url, "accommodations", "camping").await;
    let kayak_id = find_catalog_id(&client, &base_url, "activities", "water").await;
    let guest_email = format!("bench-{}@example.com", Uuid::new_v4());

    let booking_payload = json!({
        "guestName": "Benchmark Bot",
        "guestEmail": guest_email,
        "guestPhone": "000-0000",
        "accommodationId": camping_id,
        "checkIn": "2030-07-01",
        "checkOut": "2030-07-04",
        "guests": 2,
        "activities": [{"activityId": kayak_id, "quantity": 2}]
    });
    setup_booking(&client, &base_url, &booking_payload).await;

    println!("{}", "✅ Data created successfully.".green());
    println!("   Accommodation ID: {}", camping_id);
    println!("   Guest Email:      {}", guest_email);

    let targets = vec![
        Target {
            name: "Health Check",
            method: "GET",
            url: format!("{}/health", base_url),
            body: None,
        },
        Target {
            name: "List Accommodations (Catalog Read)",
            method: "GET",
            url: format!("{}/api/accommodations", base_url),
            body: None,
        },
        Target {
            name: "Bookings By Email (Hydrated Read)",
            method: "GET",
            url: format!("{}/api/bookings?email={}", base_url, guest_email),
            body: None,
        },
        Target {
            name: "Guest Dashboard",
            method: "GET",
            url: format!("{}/api/bookings/dashboard?email={}", base_url, guest_email),
            body: None,
        },
        Target {
            name: "Create Booking (Transactional Write)",
            method: "POST",
            url: format!("{}/api/bookings", base_url),
            body: Some(booking_payload),
        },
    ];

    let rps_stages = vec![10, 50, 200, 1000];

    for target in targets {
        println!("\n{}", "=".repeat(60));
        println!("Benchmarking Endpoint: {}", target.name.cyan().bold());
        println!("URL: {}", target.url);
        println!("{}", "=".repeat(60));

        println!("{:<10} | {:<15} | {:<15} | {:<15}", "RPS", "Mean (ms)", "P99 (ms)", "Success Rate");
        println!("{:-<10}-+-{:-<15}-+-{:-<15}-+-{:-<15}", "", "", "", "");

        for &rps in &rps_stages {
            run_stage(&client, &target, rps).await;
        }
    }
}

/// Picks the first catalog entry whose `type` (accommodations) or `category` (activities) matches.
async fn find_catalog_id(client: &Client, base_url: &str, collection: &str, kind: &str) -> i64 {
    let res = client.get(format!("{}/api/{}", base_url, collection))
        .send()
        .await
        .expect("Failed to fetch catalog");

    if !res.status().is_success() {
        panic!("Failed to list {}: status {}", collection, res.status());
    }

    let items: Value = res.json().await.expect("Failed to parse catalog response");
    items.as_array()
        .expect("Catalog response is not a list")
        .iter()
        .find(|item| item["type"] == kind || item["category"] == kind)
        .and_then(|item| item["id"].as_i64())
        .unwrap_or_else(|| panic!("No {} entry of kind {} found. Is the catalog seeded?", collection, kind))
}

async fn setup_booking(client: &Client, base_url: &str, payload: &Value) {
    let res = client.post(format!("{}/api/bookings", base_url))
        .json(payload)
        .send()
        .await
        .expect("Failed to create booking");

    if !res.status().is_success() {
        let status = res.status();
        let txt = res.text().await.unwrap_or_default();
        panic!("Failed to create booking data. Status: {}. Body: {}", status, txt);
    }
}

async fn run_stage(client: &Client, target: &Target, rps: u32) {
    let limiter = Arc::new(RateLimiter::direct(
        Quota::per_second(NonZeroU32::new(rps).unwrap())
    ));

    let (tx, mut rx) = mpsc::channel(50000);
    let start_time = Instant::now();
    let duration = Duration::from_secs(DURATION_SECS);

    loop {
        if start_time.elapsed() > duration {
            break;
        }

        if limiter.check().is_ok() {
            let client = client.clone();
            let url = target.url.clone();
            let body = target.body.clone();
            let method = target.method;
            let tx = tx.clone();

            tokio::spawn(async move {
                let req_start = Instant::now();
                let res = match method {
                    "GET" => client.get(&url).send().await,
                    "POST" => {
                        let mut req = client.post(&url);
                        if let Some(b) = body {
                            req = req.json(&b);
                        }
                        req.send().await
                    },
                    _ => client.get(&url).send().await,
                };
                let latency = req_start.elapsed();

                let success = match res {
                    Ok(r) => r.status().is_success(),
                    Err(_) => false,
                };

                let _ = tx.send((latency, success)).await;
            });
        } else {
            tokio::task::yield_now().await;
        }
    }

    drop(tx);

    let mut histogram = Histogram::<u64>::new(3).unwrap();
    let mut successes = 0;
    let mut total = 0;

    while let Some((latency, success)) = rx.recv().await {
        total += 1;
        if success { successes += 1; }
        histogram.record(latency.as_micros() as u64).unwrap();
    }

    let mean_ms = histogram.mean() / 1000.0;
    let p99_ms = histogram.value_at_quantile(0.99) as f64 / 1000.0;
    let success_rate = if total > 0 { (successes as f64 / total as f64) * 100.0 } else { 0.0 };

    println!(
        "{:<10} | {:<15.2} | {:<15.2} | {:<14.1}%",
        rps,
        mean_ms,
        p99_ms,
        success_rate
    );

    tokio::time::sleep(Duration::from_millis(500)).await;
}