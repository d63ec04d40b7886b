use super::prompts::prompt_string;
use super::AppContext;
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use flicklog_config::CredentialStore;
use serde_json::json;

pub fn run_show(output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let mut credentials = CredentialStore::new(ctx.paths.credentials_file());
    credentials.load().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let key_status = match credentials.catalog_api_key() {
        Some(key) => mask(&key),
        None => "(not set)".to_string(),
    };

    match output.format() {
        OutputFormat::Human => {
            output.println(format!("Config file:     {}", ctx.paths.config_file().display()));
            output.println(format!("Library dir:     {}", ctx.paths.library_dir().display()));
            output.println(format!("Catalog URL:     {}", ctx.config.catalog.base_url));
            output.println(format!("Catalog API key: {}", key_status));
        }
        _ => {
            output.json(&json!({
                "type": "config",
                "config_file": ctx.paths.config_file().display().to_string(),
                "library_dir": ctx.paths.library_dir().display().to_string(),
                "catalog_base_url": ctx.config.catalog.base_url,
                "api_key_configured": credentials.catalog_api_key().is_some(),
            }));
        }
    }
    Ok(())
}

pub fn run_set_key(api_key: Option<String>, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;

    let api_key = match api_key {
        Some(key) => key,
        None => prompt_string("TMDB API key", None)?,
    };
    if api_key.trim().is_empty() {
        output.error("API key cannot be empty");
        return Ok(());
    }

    let mut credentials = CredentialStore::new(ctx.paths.credentials_file());
    credentials.load().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    credentials.set_catalog_api_key(api_key.trim().to_string());
    credentials.save().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    output.success("Catalog API key saved");
    Ok(())
}

fn mask(key: &str) -> String {
    if key.chars().count() <= 4 {
        return "****".to_string();
    }
    let prefix: String = key.chars().take(4).collect();
    format!("{}****", prefix)
}

#[cfg(test)]
mod tests {
    use super::mask;

    #[test]
    fn mask_shows_at_most_four_leading_chars() {
        assert_eq!(mask("abc"), "****");
        assert_eq!(mask("abcd1234"), "abcd****");
    }

    #[test]
    fn mask_handles_multibyte_keys() {
        assert_eq!(mask("замок1234"), "замо****");
    }
}
