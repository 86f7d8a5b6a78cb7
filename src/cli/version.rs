//! Version information command

use anyhow::Result;

use super::output::Output;
use crate::storage::ModelsCache;

pub fn run(output: &Output) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let platform = format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH);
    let cache_state = cache_state();

    if output.is_json() {
        output.data(&serde_json::json!({
            "version": version,
            "platform": platform,
            "models_cache": cache_state,
        }));
        return Ok(());
    }

    println!("Specify CLI version: {}", version);
    println!("Platform: {}", platform);
    println!("Models cache: {}", cache_state);
    Ok(())
}

/// Cache freshness summary; any cache error reads as "none".
fn cache_state() -> String {
    let Ok(cache) = ModelsCache::open_default() else {
        return "none".to_string();
    };
    match cache.age() {
        Ok(age) if age < crate::storage::CACHE_TTL => {
            format!("fresh ({} minutes old)", age.as_secs() / 60)
        }
        Ok(age) => format!("stale ({} hours old)", age.as_secs() / 3600),
        Err(_) => "none".to_string(),
    }
}
