//! Application Startup
//!
//! The config file is read first so its `[log]` section can feed the logger;
//! CLI flags win over config values for every logging setting. The registry
//! is then assembled from the builtin plugin set, loaded with the config
//! file's overrides, and the requested slot is rendered to stdout.

use std::io::IsTerminal;

use crate::app::cli::CliArgs;
use crate::app::config::{LogSection, PreviewConfig};
use crate::app::{cli, display};
use crate::core::logging::init_logging;
use crate::plugin::api::{all_builtin_plugins, Registry};
use crate::render::renderer::SlotRenderer;

/// Effective logging settings after merging CLI flags over the config file.
#[derive(Debug, PartialEq)]
struct LogSettings {
    level: String,
    format: String,
    file: Option<String>,
    color: bool,
}

fn resolve_log_settings(args: &CliArgs, log: &LogSection, stdout_is_tty: bool) -> LogSettings {
    let color = if args.no_color {
        false
    } else if args.color {
        true
    } else {
        log.color.unwrap_or(stdout_is_tty)
    };
    LogSettings {
        level: args
            .log_level
            .clone()
            .or_else(|| log.level.clone())
            .unwrap_or_else(|| "info".to_string()),
        format: args
            .log_format
            .clone()
            .or_else(|| log.format.clone())
            .unwrap_or_else(|| "text".to_string()),
        file: args.log_file.clone().or_else(|| log.file.clone()),
        color,
    }
}

pub fn startup() {
    let args = cli::parse();

    // Config is loaded before the logger starts; load failures go to stderr.
    let config = match PreviewConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let settings = resolve_log_settings(&args, &config.log, std::io::stdout().is_terminal());
    if let Err(e) = init_logging(
        Some(&settings.level),
        Some(&settings.format),
        settings.file.as_deref(),
        settings.color,
    ) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    log::info!(
        "vitrine {} starting (ui api {})",
        env!("CARGO_PKG_VERSION"),
        crate::UI_API_VERSION
    );

    let mut registry = Registry::new();
    for spec in all_builtin_plugins() {
        let name = spec.name().to_string();
        if let Err(e) = registry.register(spec) {
            log::error!("Failed to register builtin plugin '{}': {}", name, e);
            std::process::exit(1);
        }
    }

    if let Err(e) = registry.load(config.load_overrides()) {
        log::error!("Failed to load registry: {}", e);
        std::process::exit(1);
    }

    if args.list_plugins {
        println!("Registered plugins ({}):", registry.plugin_count());
        for name in registry.plugin_names() {
            println!("  {}", name);
        }
        return;
    }

    let slot = args
        .slot
        .or(config.preview.root_slot)
        .unwrap_or_else(|| "root".to_string());

    match SlotRenderer::new(&registry).render_slot(&slot) {
        Ok(fragments) => {
            if fragments.is_empty() {
                log::warn!("No plugin contributed to slot '{}'", slot);
            }
            print!("{}", display::render_tree(&fragments, settings.color));
        }
        Err(e) => {
            log::error!("Failed to render slot '{}': {}", slot, e);
            std::process::exit(1);
        }
    }
}
