//! Command line front end for the channel logger.
//!
//! ```text
//! enhanced-logger check    --config logger.toml
//! enhanced-logger channels --config logger.toml [--json]
//! enhanced-logger emit     --config logger.toml --channel Physics [--priority warning] "count={0}" 3
//! enhanced-logger generate --config logger.toml --out-dir src/generated [--template-dir templates]
//! enhanced-logger watch    --config logger.toml
//! ```

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use enhanced_logger::codegen::{self, Templates};
use enhanced_logger::config::watcher::ConfigWatcher;
use enhanced_logger::config::{load_config, LoggerConfig};
use enhanced_logger::lifecycle::{signals, Shutdown};
use enhanced_logger::observability::logging;
use enhanced_logger::{
    Channel, ConsoleSink, LogEvent, Logger, MemorySink, Outcome, Priority, TracingSink,
};

#[derive(Parser)]
#[command(name = "enhanced-logger")]
#[command(about = "Channel-based logger: configuration, code generation and live reload", long_about = None)]
struct Cli {
    /// Channel configuration file (TOML).
    #[arg(short, long, global = true, default_value = "logger.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration file
    Check,
    /// Print the effective channel table
    Channels {
        #[arg(long)]
        json: bool,
    },
    /// Dispatch one message through a configured logger
    Emit {
        #[arg(long)]
        channel: Channel,
        #[arg(long, default_value = "info")]
        priority: Priority,
        /// Print the emitted event as JSON instead of console output
        #[arg(long)]
        json: bool,
        /// Message template; `{N}` is replaced by the N-th argument
        message: String,
        args: Vec<String>,
    },
    /// Generate channel source files from the channel table
    Generate {
        #[arg(long)]
        out_dir: PathBuf,
        /// Directory holding channel.rs.tmpl and channel_colors.rs.tmpl
        #[arg(long)]
        template_dir: Option<PathBuf>,
    },
    /// Apply the configuration and reload it whenever the file changes
    Watch,
}

/// Exit code used when a fatal handler asks the host to halt.
const HALT_EXIT_CODE: u8 = 3;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", cli.config.display(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Err(e) = logging::init(&config.observability) {
        eprintln!("Could not install log subscriber: {}", e);
    }

    match cli.command {
        Commands::Check => {
            check(&cli.config, &config);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Channels { json } => {
            print_channels(&config, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Emit {
            channel,
            priority,
            json,
            message,
            args,
        } => emit(&config, channel, priority, json, &message, &args),
        Commands::Generate {
            out_dir,
            template_dir,
        } => {
            let templates = match template_dir {
                Some(dir) => codegen::load_templates(&dir)?,
                None => Templates::builtin(),
            };
            let sources = codegen::generate(&config.channels, &templates)?;
            for path in codegen::write_sources(&out_dir, &sources)? {
                println!("{}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Watch => {
            watch(&cli.config, &config).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn check(path: &Path, config: &LoggerConfig) {
    let enabled = config.channels.iter().filter(|c| c.enabled).count();
    println!(
        "{}: OK ({} channels, {} enabled, theme {:?}, fatal handler {:?})",
        path.display(),
        config.channels.len(),
        enabled,
        config.theme,
        config.fatal.handler,
    );
}

fn print_channels(config: &LoggerConfig, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(&config.channels)?);
        return Ok(());
    }

    println!("{:<16} {:>4}  {:<8} {}", "CHANNEL", "ID", "ENABLED", "COLOR");
    for row in &config.channels {
        println!(
            "{:<16} {:>4}  {:<8} {}",
            row.name,
            row.resolved_id().map(|id| id.to_string()).unwrap_or_default(),
            row.enabled,
            row.color.as_ref().map(|c| c.as_str()).unwrap_or("-"),
        );
    }
    Ok(())
}

fn emit(
    config: &LoggerConfig,
    channel: Channel,
    priority: Priority,
    json: bool,
    message: &str,
    args: &[String],
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let logger = if json {
        let logger = Logger::from_config(config, MemorySink::new());
        logger.subscribe(|event: &LogEvent| match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::error!(error = %e, "Could not serialize event"),
        });
        logger
    } else {
        Logger::from_config(config, ConsoleSink)
    };

    let args: Vec<&dyn Display> = args.iter().map(|a| a as &dyn Display).collect();
    match logger.log_fmt(channel, priority, message, &args)? {
        Outcome::Suppressed => {
            eprintln!("channel {} is disabled, nothing emitted", channel);
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Emitted | Outcome::Skipped => Ok(ExitCode::SUCCESS),
        Outcome::HaltRequested => Ok(ExitCode::from(HALT_EXIT_CODE)),
    }
}

async fn watch(path: &Path, config: &LoggerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let logger = Logger::from_config(config, TracingSink);

    let shutdown = Shutdown::new();
    let mut stop = shutdown.subscribe();
    let _signals = signals::spawn_signal_listener(&shutdown);

    let (watcher, mut updates) = ConfigWatcher::new(path);
    // Dropping the watcher stops file notifications.
    let _watcher = watcher.run()?;

    logger.info(Channel::Loading, &format!("Watching {}", path.display()));

    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(new_config) = update else { break };
                let before = logger.registry().snapshot();
                logger.apply_config(&new_config);
                report_changes(&logger, &before, &logger.registry().snapshot())?;
            }
            _ = stop.recv() => break,
        }
    }

    tracing::info!("Watch stopped");
    Ok(())
}

fn report_changes(
    logger: &Logger,
    before: &HashMap<Channel, bool>,
    after: &HashMap<Channel, bool>,
) -> Result<(), enhanced_logger::LogError> {
    let label = |state: Option<&bool>| match state {
        Some(true) => "enabled",
        Some(false) => "disabled",
        None => "absent",
    };

    let mut changed = 0;
    for channel in Channel::ALL {
        let (old, new) = (before.get(&channel), after.get(&channel));
        if old != new {
            changed += 1;
            logger.log_fmt(
                Channel::Loading,
                Priority::Info,
                "Channel {0}: {1} -> {2}",
                &[&channel, &label(old), &label(new)],
            )?;
        }
    }
    logger.log_fmt(
        Channel::Loading,
        Priority::Info,
        "Configuration reloaded, {0} channel(s) changed",
        &[&changed],
    )?;
    Ok(())
}
