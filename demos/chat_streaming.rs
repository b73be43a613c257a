//! Stream a chat completion to stdout.
//!
//! ```
//! TABBY_API_KEY=... cargo run --example chat_streaming -- "Tell me a joke"
//! ```

use std::io::Write;

use color_eyre::Result;
use tabby_client::models::{ChatCompletionRequest, ChatMessage};
use tabby_client::Client;
use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Write a haiku about GPUs.".to_string());

    let client = Client::from_env()?;
    let mut request = ChatCompletionRequest::new(vec![
        ChatMessage::system("You are a concise assistant."),
        ChatMessage::user(prompt),
    ]);
    request.max_tokens = Some(256);

    let stream = client.chat().create_stream(&request).await?;

    // Ctrl-C cancels the stream.
    let cancel = stream.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let mut stdout = std::io::stdout();
    loop {
        match stream.recv().await {
            Ok(Some(chunk)) => {
                for choice in &chunk.choices {
                    let content = choice.delta.as_ref().and_then(|d| d.content.as_deref());
                    if let Some(content) = content {
                        write!(stdout, "{}", content)?;
                        stdout.flush()?;
                    }
                }
            }
            Ok(None) => break,
            Err(err) if err.is(tabby_client::ErrorKind::Cancelled) => {
                eprintln!("\n[cancelled]");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    println!();

    stream.close().await?;
    Ok(())
}
