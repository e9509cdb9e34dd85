mod server;

use anyhow::Result;
use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser, Subcommand};
use tracing::info;

use playlistio_core::addon::{import_manifest, install_urls, UserConfig};
use playlistio_core::{bootstrap::load_config, logging, Config};
use playlistio_providers::AddonClient;

use server::PlaylistioServer;

#[derive(Parser, Debug)]
#[command(name = "playlistio", version)]
#[command(about = "Stremio addon that turns catalogs into auto-playable series", long_about = None)]
struct Cli {
    /// Configuration file (YAML or TOML)
    #[arg(long, short, global = true)]
    config: Option<String>,

    /// HTTP listen port
    #[arg(long, env = "PORT", global = true)]
    port: Option<u16>,

    /// Public hostname; links are served as https://<host>
    #[arg(long, env = "SPACE_HOST", global = true)]
    public_host: Option<String>,

    /// Development mode: debug logging and icon from the main branch
    #[arg(
        long = "dev",
        env = "DEV_LOGGING",
        global = true,
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    dev_mode: bool,

    /// HTML snippet embedded in the configuration page
    #[arg(long, env = "EMBED", global = true)]
    embed: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the addon server (default)
    Serve,
    /// Import remote manifests and print install links
    Encode {
        /// Remote addon manifest URL, may be repeated
        #[arg(long = "manifest", required = true)]
        manifests: Vec<String>,
    },
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.public_host {
            config.server.public_url = Some(format!("https://{host}"));
        }
        if self.dev_mode {
            config.addon.dev_mode = true;
            config.logging.level = "debug".to_string();
        }
        if let Some(embed) = &self.embed {
            config.addon.embed_html = Some(embed.clone());
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load configuration, then let flags and their env vars win
    let mut config = load_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    if let Err(errors) = config.validate() {
        for e in &errors {
            eprintln!("Config validation error: {e}");
        }
        return Err(anyhow::anyhow!(
            "Configuration validation failed with {} error(s)",
            errors.len()
        ));
    }

    // 2. Initialize logging
    logging::init_logging(&config.logging)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => PlaylistioServer::new(config)?.start().await,
        Command::Encode { manifests } => encode(&config, &manifests).await,
    }
}

/// Build a configuration from remote manifests and print its install links
async fn encode(config: &Config, manifests: &[String]) -> Result<()> {
    let client = AddonClient::new(config.remote.client_options())?;

    let mut user_config = UserConfig::default();
    for url in manifests {
        let added = import_manifest(&client, url).await?.merge_into(&mut user_config);
        info!(url = %url, added, "Added catalogs from manifest");
    }

    let urls = install_urls(&config.public_url(), &user_config)?;
    println!("Manifest:    {}", urls.manifest);
    println!("Stremio:     {}", urls.stremio);
    println!("Stremio Web: {}", urls.web);
    println!("Configure:   {}", urls.configure);

    Ok(())
}
