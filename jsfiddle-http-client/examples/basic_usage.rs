//! Basic usage example for the JSFiddle HTTP client
//!
//! This example demonstrates how to:
//! - Create a client with default settings
//! - Create a client with a custom base URL and HTTP configuration
//! - Fetch an existing fiddle
//! - Fetch through the callback-style API
//! - Publish a new fiddle
//!
//! Pass a fiddle identifier (`id` or `id/version`) as the first argument.

use jsfiddle_http_client::{FetchRequest, Fiddle, FiddleClient, FiddleError, PublishRequest};
use serde_json::json;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "zfkgt0vr".to_string());

    // Example 1: Create a client with default settings
    println!("=== Example 1: Default Client ===");
    let client = FiddleClient::new()?;
    println!("✓ Client created with default base URL ({})", client.base_url());

    // Example 2: Create a client with custom endpoints and timeout
    println!("\n=== Example 2: Custom Configuration ===");
    let _configured_client = FiddleClient::builder()
        .base_url("https://jsfiddle.net")? // Could be a mock server URL for testing
        .framework("React", "18.2.0")
        .client_builder(
            reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(10))
                .use_rustls_tls(),
        )
        .build()?;
    println!("✓ Client created with React publish endpoint and 10s timeout");

    // Example 3: Fetch a fiddle
    println!("\n=== Example 3: Fetch {} ===", id);
    match client.fetch(&FetchRequest::id(id.as_str())?) {
        Ok(fiddle) => {
            println!("JS ({} bytes)", fiddle.js.len());
            println!("HTML ({} bytes)", fiddle.html.len());
            println!("CSS ({} bytes)", fiddle.css.len());
            for resource in &fiddle.resources {
                println!("Resource: {}", resource);
            }
        }
        Err(e) => println!("✗ Failed to fetch fiddle: {}", e),
    }

    // Example 4: Callback-style fetch, including the unsupported descriptor form
    println!("\n=== Example 4: Callback API ===");
    client.get_fiddle(
        json!({ "id": id }),
        Some(Box::new(|result: Result<Fiddle, FiddleError>| match result {
            Ok(_) => println!("✓ Descriptor fetched"),
            Err(e) => println!("✗ Descriptor fetch: {}", e),
        })),
    );

    // Example 5: Publish a new fiddle
    println!("\n=== Example 5: Publish ===");
    let payload = PublishRequest {
        title: Some("Hello from Rust".to_string()),
        html: Some("<p id=\"out\"></p>".to_string()),
        js: Some("document.getElementById('out').textContent = 'hi';".to_string()),
        css: Some("p { color: teal; }".to_string()),
    };
    match client.publish(&payload) {
        Ok(body) => println!("✓ Published ({} bytes of response)", body.len()),
        Err(e) => println!("✗ Failed to publish: {}", e),
    }

    Ok(())
}
