// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod app;
mod commands;
mod locale;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use disruptivo_admin_state::Theme;
use disruptivo_cli_config::{
	load_config_with_cli, runtime::LoggingConfig, CliOverrides, LogFormat, LogLevel,
};
use disruptivo_common_i18n::Locale;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app::App;
use crate::commands::ThemeAction;

#[derive(Parser, Debug)]
#[command(name = "disruptivo")]
#[command(about = "Translations and admin preferences for Disruptivo", long_about = None)]
#[command(version)]
struct Args {
	/// Path to a configuration file (TOML)
	#[arg(short, long, global = true)]
	config: Option<PathBuf>,

	/// Directory holding translation bundles
	#[arg(long, global = true)]
	locales_dir: Option<PathBuf>,

	/// Log level (error, warn, info, debug, trace)
	#[arg(long, global = true)]
	log_level: Option<String>,

	/// Log format (pretty, json, compact)
	#[arg(long, global = true)]
	log_format: Option<String>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Translate a key from a namespace
	T {
		/// Namespace, dotted or slashed (`admin.sidebar`, `admin/sidebar`)
		namespace: String,

		/// Dotted key path inside the namespace
		key: String,

		/// Use this locale for the lookup without changing the saved preference
		#[arg(short, long)]
		locale: Option<Locale>,

		/// Interpolation variable, repeatable
		#[arg(long = "var", value_name = "KEY=VALUE", value_parser = commands::parse_var)]
		vars: Vec<(String, String)>,
	},

	/// Inspect or change the active locale
	Locale {
		#[command(subcommand)]
		command: LocaleCommand,
	},

	/// Compare key structure across locales
	Audit {
		/// Namespaces to audit; all on-disk namespaces when omitted
		namespaces: Vec<String>,

		/// Print reports as JSON
		#[arg(long)]
		json: bool,
	},

	/// Inspect or change the admin theme
	Theme {
		#[command(subcommand)]
		command: Option<ThemeCommand>,
	},

	/// Show what the admin guard does for a route
	Route {
		/// Route to evaluate, e.g. /admin/posts
		route: String,

		/// Evaluate as a signed-in admin with this email
		#[arg(long = "as", value_name = "EMAIL")]
		signed_in_as: Option<String>,
	},
}

#[derive(Subcommand, Debug)]
enum LocaleCommand {
	/// Print the active locale and how it was chosen
	Show,
	/// List supported locales
	List,
	/// Save a locale preference
	Set { locale: Locale },
}

#[derive(Subcommand, Debug)]
enum ThemeCommand {
	Show,
	Toggle,
	Set { theme: Theme },
}

impl From<&Args> for CliOverrides {
	fn from(args: &Args) -> Self {
		CliOverrides {
			config_file: args.config.clone(),
			locales_dir: args.locales_dir.clone(),
			log_level: args.log_level.clone(),
			log_format: args.log_format.clone(),
		}
	}
}

fn log_level_to_tracing(level: LogLevel) -> tracing::Level {
	match level {
		LogLevel::Error => tracing::Level::ERROR,
		LogLevel::Warn => tracing::Level::WARN,
		LogLevel::Info => tracing::Level::INFO,
		LogLevel::Debug => tracing::Level::DEBUG,
		LogLevel::Trace => tracing::Level::TRACE,
	}
}

/// Logs go to stderr so command output stays clean on stdout.
fn init_tracing(logging: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		EnvFilter::new(format!(
			"disruptivo={level},disruptivo_common_i18n={level},disruptivo_admin_state={level},disruptivo_cli_config={level}",
			level = log_level_to_tracing(logging.level)
		))
	});

	match logging.format {
		LogFormat::Json => tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().json().with_writer(io::stderr))
			.init(),
		LogFormat::Compact => tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().compact().with_writer(io::stderr))
			.init(),
		LogFormat::Pretty => tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().with_writer(io::stderr))
			.init(),
	}
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
	let args = Args::parse();

	let config =
		load_config_with_cli(CliOverrides::from(&args)).context("failed to load configuration")?;
	init_tracing(&config.logging);

	let detected = locale::detect_language();
	debug!(detected = ?detected, "system language");

	let app = App::new(config, detected)?;
	let stdout = io::stdout();
	let mut out = stdout.lock();

	let code = match args.command {
		Command::T {
			namespace,
			key,
			locale,
			vars,
		} => {
			commands::translate(&app, &namespace, &key, locale, &vars, &mut out).await?;
			ExitCode::SUCCESS
		}
		Command::Locale { command } => {
			match command {
				LocaleCommand::Show => commands::locale_show(&app, &mut out)?,
				LocaleCommand::List => commands::locale_list(&app, &mut out)?,
				LocaleCommand::Set { locale } => commands::locale_set(&app, locale, &mut out).await?,
			}
			ExitCode::SUCCESS
		}
		Command::Audit { namespaces, json } => {
			if commands::audit(&app, &namespaces, json, &mut out).await? {
				ExitCode::SUCCESS
			} else {
				ExitCode::FAILURE
			}
		}
		Command::Theme { command } => {
			let action = match command.unwrap_or(ThemeCommand::Show) {
				ThemeCommand::Show => ThemeAction::Show,
				ThemeCommand::Toggle => ThemeAction::Toggle,
				ThemeCommand::Set { theme } => ThemeAction::Set(theme),
			};
			commands::theme(&app, action, &mut out)?;
			ExitCode::SUCCESS
		}
		Command::Route {
			route,
			signed_in_as,
		} => {
			commands::route(&app, &route, signed_in_as.as_deref(), &mut out).await?;
			ExitCode::SUCCESS
		}
	};

	out.flush()?;
	Ok(code)
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn test_args_are_well_formed() {
		Args::command().debug_assert();
	}

	#[test]
	fn test_t_command_parses_vars_and_locale() {
		let args = Args::parse_from([
			"disruptivo",
			"t",
			"home",
			"hero.title",
			"--locale",
			"en",
			"--var",
			"name=Ana",
		]);
		match args.command {
			Command::T {
				namespace,
				locale,
				vars,
				..
			} => {
				assert_eq!(namespace, "home");
				assert_eq!(locale, Some(Locale::En));
				assert_eq!(vars, vec![("name".to_string(), "Ana".to_string())]);
			}
			other => panic!("unexpected command {other:?}"),
		}
	}

	#[test]
	fn test_unsupported_locale_is_rejected() {
		assert!(Args::try_parse_from(["disruptivo", "locale", "set", "de"]).is_err());
	}

	#[test]
	fn test_global_flags_become_overrides() {
		let args = Args::parse_from([
			"disruptivo",
			"audit",
			"--locales-dir",
			"/srv/locales",
			"--log-level",
			"debug",
		]);
		let overrides = CliOverrides::from(&args);
		assert_eq!(overrides.locales_dir, Some(PathBuf::from("/srv/locales")));
		assert_eq!(overrides.log_level.as_deref(), Some("debug"));
		assert_eq!(overrides.config_file, None);
	}

	#[test]
	fn test_log_level_mapping() {
		assert_eq!(log_level_to_tracing(LogLevel::Warn), tracing::Level::WARN);
		assert_eq!(log_level_to_tracing(LogLevel::Trace), tracing::Level::TRACE);
	}
}
