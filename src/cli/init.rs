//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for the key pair from the Marvel developer portal and saves it.
/// Existing settings are kept, and existing keys are offered as defaults.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to heroscope!".bold().green());
    println!("Keys are available at https://developer.marvel.com/account\n");

    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();
    let theme = ColorfulTheme::default();

    let mut public_prompt = Input::<String>::with_theme(&theme).with_prompt("Marvel public key");
    if let Some(ref existing) = config.public_key {
        public_prompt = public_prompt.default(existing.clone());
    }
    let public_key = public_prompt.interact_text()?;

    let private_key: String = Password::with_theme(&theme)
        .with_prompt("Marvel private key")
        .allow_empty_password(config.private_key.is_some())
        .interact()?;

    config.public_key = Some(public_key.trim().to_string());
    if !private_key.trim().is_empty() {
        config.private_key = Some(private_key.trim().to_string());
    }
    if let Some(host) = opts.api_host_ref() {
        config.api_host = Some(host.to_string());
    }

    config.validate_auth()?;
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "heroscope status".cyan());
    println!("  {} - Browse characters", "heroscope hero list".cyan());

    Ok(())
}
