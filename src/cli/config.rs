use anyhow::Result;

use crate::config::{mask_api_key, Config};

/// Handle config show command
pub fn handle_show_command() -> Result<()> {
    let config = Config::load()?;
    let effective = config.to_client_config();

    println!("Config file: {}", Config::get_config_path()?.display());
    println!();

    let api_key = if effective.api_key.is_empty() {
        "(not set)".to_string()
    } else {
        mask_api_key(&effective.api_key)
    };

    println!("  api key:           {api_key}");
    println!("  model:             {}", effective.model);
    println!("  base url:          {}", effective.base_url);
    println!("  temperature:       {}", effective.defaults.temperature);
    println!("  max output tokens: {}", effective.defaults.max_output_tokens);
    println!("  top p:             {}", effective.defaults.top_p);
    println!("  top k:             {}", effective.defaults.top_k);

    Ok(())
}

/// Handle config list command
pub fn handle_list_command() -> Result<()> {
    let config = Config::load()?;
    print!("{}", format_list(&config.list()));
    Ok(())
}

fn format_list(items: &[(String, String)]) -> String {
    let width = items.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    items
        .iter()
        .map(|(key, value)| format!("{key:<width$}  {value}\n"))
        .collect()
}

/// Handle config get command
pub fn handle_get_command(key: String) -> Result<()> {
    let config = Config::load()?;

    match config.get(&key) {
        Some(value) if key.contains("api") => println!("{}", mask_api_key(&value)),
        Some(value) => println!("{value}"),
        None => println!("(not set)"),
    }

    Ok(())
}

/// Handle config set command
pub fn handle_set_command(key: String, value: String) -> Result<()> {
    let mut config = Config::load()?;
    config.set(&key, value)?;
    config.save()?;

    println!("✓ Saved {key}");
    Ok(())
}

/// Handle config unset command
pub fn handle_unset_command(key: String) -> Result<()> {
    let mut config = Config::load()?;
    config.unset(&key)?;
    config.save()?;

    println!("✓ Removed {key}");
    Ok(())
}

/// Handle config path command
pub fn handle_path_command() -> Result<()> {
    println!("{}", Config::get_config_path()?.display());
    Ok(())
}
