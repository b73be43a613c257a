//! One-shot text completion with retries, followed by a tokenizer round trip.
//!
//! ```
//! TABBY_API_ENDPOINT=http://localhost:5000 cargo run --example completions
//! ```

use color_eyre::Result;
use tabby_client::models::{CompletionRequest, TokenDecodeRequest, TokenEncodeRequest};
use tabby_client::{default_retry_policy, ClientBuilder};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = ClientBuilder::from_env()
        .with_retry_policy(default_retry_policy())
        .build()?;

    let health = client.health().check().await?;
    info!("server status: {}", health.status);

    let model = client.models().get().await?;
    info!("current model: {}", model.id);

    let mut request = CompletionRequest::new("The three laws of robotics are");
    request.max_tokens = Some(128);
    request.temperature = Some(0.7);

    let response = client.completions().create(&request).await?;
    for choice in &response.choices {
        println!("{}", choice.text);
    }
    if let Some(usage) = response.usage {
        info!(
            "usage: {} prompt + {} completion tokens",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    let encoded = client
        .tokens()
        .encode(&TokenEncodeRequest::new("Hello, TabbyAPI!"))
        .await?;
    let decoded = client
        .tokens()
        .decode(&TokenDecodeRequest::new(encoded.tokens.clone()))
        .await?;
    info!("{} tokens decode back to {:?}", encoded.length, decoded.text);

    Ok(())
}
