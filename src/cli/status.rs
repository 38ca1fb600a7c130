//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::client::signer::redact;
use crate::config::{Config, ENV_PRIVATE_KEY, ENV_PUBLIC_KEY};
use crate::error::{ConfigError, Error, Result};

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "heroscope Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    let file_found = match Config::load_at(opts.config_ref()) {
        Ok(_) => true,
        Err(Error::Config(ConfigError::NotFound)) => false,
        Err(e) => return Err(e),
    };

    if file_found {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!(
            "{} Config file not found: {}",
            "○".dimmed(),
            config_path.display()
        );
    }
    println!();

    let mut config = Config::load_effective(opts.config_ref())?;
    if let Some(host) = opts.api_host_ref() {
        config.api_host = Some(host.to_string());
    }

    print_key("Public key", config.public_key.as_deref(), ENV_PUBLIC_KEY, true);
    print_key("Private key", config.private_key.as_deref(), ENV_PRIVATE_KEY, false);

    if let Some(ref host) = config.api_host {
        println!("{} Custom API host: {}", "○".dimmed(), host.cyan());
    }

    println!(
        "{} Default page size: {}",
        "○".dimmed(),
        config.preferences.page_size
    );

    if config.validate_auth().is_err() {
        println!();
        println!("Run {} to configure your keys.", "heroscope init".cyan());
    }

    println!();
    Ok(())
}

fn print_key(label: &str, value: Option<&str>, env_var: &str, show_prefix: bool) {
    let from_env = std::env::var(env_var).is_ok_and(|v| !v.trim().is_empty());
    let source = if from_env {
        format!(" (from {})", env_var).dimmed().to_string()
    } else {
        String::new()
    };

    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(key) if show_prefix => {
            println!("{} {} configured: {}{}", "✓".green(), label, redact(key), source)
        }
        Some(_) => println!("{} {} configured{}", "✓".green(), label, source),
        None => println!("{} {} not configured", "✗".red(), label),
    }
}
