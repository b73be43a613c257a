//! Load a model and print per-module progress. Requires an admin key.
//!
//! ```
//! TABBY_ADMIN_KEY=... cargo run --example model_load_stream -- Llama-3-8B-exl2
//! ```

use color_eyre::eyre::eyre;
use color_eyre::Result;
use futures::StreamExt;
use tabby_client::models::ModelLoadRequest;
use tabby_client::Client;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let model_name = std::env::args()
        .nth(1)
        .ok_or_else(|| eyre!("usage: model_load_stream <model name>"))?;

    let client = Client::from_env()?;

    let permission = client.auth().permission().await?;
    if !permission.is_admin() {
        return Err(eyre!(
            "loading models needs an admin key (current permission: {})",
            permission.permission
        ));
    }

    let mut request = ModelLoadRequest::new(model_name);
    request.max_seq_len = Some(8192);

    let mut progress = Box::pin(client.models().load_stream(&request).await?.into_items());
    while let Some(update) = progress.next().await {
        let update = update?;
        println!(
            "[{}] {}/{} modules ({})",
            update.model_type, update.module, update.modules, update.status
        );
        if update.is_finished() {
            break;
        }
    }

    let loaded = client.models().get().await?;
    println!("loaded {}", loaded.id);
    Ok(())
}
