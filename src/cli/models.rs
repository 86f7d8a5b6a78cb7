//! Model catalog listing command

use anyhow::Result;
use clap::Args;

use super::output::Output;
use crate::github::{self, fetch_models, GithubClient};
use crate::storage::ModelsCache;

#[derive(Args)]
pub struct ListModelsArgs {
    /// GitHub token for API requests (or set GH_TOKEN / GITHUB_TOKEN)
    #[arg(long)]
    pub github_token: Option<String>,

    /// Skip the cache and fetch fresh data from the API
    #[arg(long)]
    pub no_cache: bool,

    /// Clear the models cache and exit
    #[arg(long)]
    pub clear_cache: bool,
}

pub fn run(output: &Output, args: ListModelsArgs) -> Result<()> {
    if args.clear_cache {
        return clear_cache(output);
    }

    let token = github::resolve_token(args.github_token.as_deref());
    let client = GithubClient::new(token, false)?;

    output.verbose_ctx("list-models", "Contacting GitHub Models API");
    let catalog = fetch_models(&client, !args.no_cache);

    if output.is_json() {
        output.data(&serde_json::json!({
            "models": catalog.models,
            "source": catalog.source.as_str(),
            "cached_at": catalog.cached_at,
        }));
        return Ok(());
    }

    println!("Found {} available models:", catalog.models.len());
    println!();
    println!("{:<32} NAME", "MODEL ID");
    println!("{}", "-".repeat(70));

    // Sorted by display name for readability.
    let mut entries: Vec<_> = catalog.models.iter().collect();
    entries.sort_by(|a, b| a.1.cmp(b.1));
    for (id, name) in entries {
        println!("{:<32} {}", id, name);
    }

    if output.is_verbose() {
        println!();
        println!("Endpoint: https://models.inference.ai.azure.com/models");
        println!("Source: {}", catalog.source.as_str());
        if let Some(cached_at) = &catalog.cached_at {
            println!("Cached at: {}", cached_at);
        }
        println!(
            "Auth: {}",
            if client.is_authenticated() {
                "token provided"
            } else {
                "no token (may have limited access)"
            }
        );
    }

    Ok(())
}

/// Best-effort cache removal; a cache error is reported, not fatal.
fn clear_cache(output: &Output) -> Result<()> {
    let cleared = ModelsCache::open_default()
        .and_then(|cache| cache.clear())
        .unwrap_or(false);
    if cleared {
        output.success("Models cache cleared");
    } else {
        output.success("No cache file found");
    }
    Ok(())
}
