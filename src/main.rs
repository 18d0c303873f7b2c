mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use hlshost_core::config::Config;
use std::path::{Path, PathBuf};

async fn start_server(
    config_path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
    master: Option<PathBuf>,
) -> Result<()> {
    let mut config = Config::load_or_default(config_path);

    // CLI flags win over the config file.
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(master) = master {
        config.source.master_playlist = master;
    }

    tracing::info!("Starting hlshost");
    tracing::info!(
        "Serving {} on {}:{}",
        config.source.master_playlist.display(),
        config.server.host,
        config.server.port
    );

    hlshost_server::start(config).await?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "hlshost=trace,hlshost_server=trace,hlshost_media=trace,tower_http=debug".to_string()
        } else {
            "hlshost=debug,hlshost_server=debug,hlshost_media=debug,tower_http=info".to_string()
        }
    });

    // stdout is reserved for command output.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start { host, port, master } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(cli.config.as_deref(), host, port, master))
        }
        Commands::Inspect { path, json } => inspect(&path, json),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("hlshost {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn inspect(path: &Path, json: bool) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("File does not exist: {:?}", path);
    }

    let master = hlshost_media::Parser::new()
        .parse(path)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&master)?);
        return Ok(());
    }

    println!("Master: {}", master.path.display());
    println!("Tags: {}", master.tags.len());
    println!("\nMedia Playlists: {}", master.media_playlists.len());
    for (i, media) in master.media_playlists.iter().enumerate() {
        println!("  [{}] {}", i, media.path.display());
        println!(
            "      {} segments, {:.3}s, {} discontinuities",
            media.segments.len(),
            media.total_duration_ms / 1000.0,
            media.total_discontinuity_count
        );
        if let Some(first) = media.segments.first() {
            println!("      container: {}", first.container_format);
        }
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let contents = std::fs::read_to_string(p)
                .with_context(|| format!("failed to read {}", p.display()))?;
            Config::from_json(&contents)?
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("✓ Configuration is valid");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Master playlist: {}", config.source.master_playlist.display());
    let modes: Vec<&str> = config.modes.iter().map(|m| m.as_str()).collect();
    println!("  Modes: {}", modes.join(", "));
    println!("  Live window: {} segments", config.live.window_segments);
    match config.reload.interval() {
        Some(interval) => println!("  Reload: every {}s", interval.as_secs()),
        None => println!("  Reload: disabled"),
    }

    for warning in config.validate() {
        println!("  warning: {warning}");
    }

    Ok(())
}
