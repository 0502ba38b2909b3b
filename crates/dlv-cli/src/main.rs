use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dlv_config::{report_unused_keys, DaemonSettings, UnusedKeyPolicy};

#[derive(Parser)]
#[command(name = "dlv")]
#[command(about = "dlv daemon operator CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> env -> local...)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Validate layered config the way the daemon reads it
    ConfigCheck {
        /// Fail when the config has keys the daemon does not read.
        #[arg(long, default_value_t = false)]
        strict: bool,

        /// Paths in merge order (base -> env -> local...)
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = dlv_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }

        Commands::ConfigCheck { strict, paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = dlv_config::load_layered_yaml(&path_refs)?;
            let settings = DaemonSettings::from_config_json(&loaded.config_json)?;

            let policy = if strict {
                UnusedKeyPolicy::Fail
            } else {
                UnusedKeyPolicy::Warn
            };
            let report = report_unused_keys(&loaded.config_json, policy)?;

            println!("config_hash={}", loaded.config_hash);
            println!("bind_addr={}", settings.bind_addr);
            println!("body_limit_bytes={}", settings.body_limit_bytes);
            println!("cors_origins={}", settings.cors_origins.join(","));
            println!("log_filter={}", settings.log_filter);
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("report serialize failed")?
            );
        }
    }

    Ok(())
}
