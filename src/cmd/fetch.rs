use std::time::Instant;

use anyhow::Result;
use serde_json::json;

use guise::{ClientOptions, GenerationOptions, GuiseClient};

use super::headers::print_profile;
use crate::OutputFormat;

pub async fn cmd_fetch(
    url: &str,
    transport: &ClientOptions,
    generation: GenerationOptions,
    show_headers: bool,
    format: OutputFormat,
) -> Result<()> {
    let client = GuiseClient::with_options(transport, generation)?;

    let start = Instant::now();
    let (profile, response) = client.fetch(url).await?;
    let elapsed = start.elapsed();

    let status = response.status();
    let response_headers: Vec<(String, String)> = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                value.to_str().unwrap_or("<binary>").to_string(),
            )
        })
        .collect();
    let body = response.bytes().await?;

    match format {
        OutputFormat::Json => {
            let mut out = json!({
                "url": url,
                "status": status.as_u16(),
                "elapsed_ms": elapsed.as_secs_f64() * 1000.0,
                "body_bytes": body.len(),
                "request_headers": profile,
            });
            if show_headers {
                out["response_headers"] = json!(response_headers);
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!("Fetching: {url}");
            println!("\nRequest headers:");
            print_profile(&profile);

            println!("\nResponse:");
            println!("   Status: {status}");
            println!("   Time: {:.2}ms", elapsed.as_secs_f64() * 1000.0);
            println!("   Body: {} bytes", body.len());

            if show_headers {
                println!("\nResponse headers:");
                for (name, value) in &response_headers {
                    println!("   {name}: {value}");
                }
            }
        }
    }

    Ok(())
}
