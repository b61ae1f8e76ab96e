// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Command implementations. Output goes to the writer passed in.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use disruptivo_admin_state::{
	AdminGuard, AdminUser, AuthState, GuardDecision, MemorySessionProvider, RootClassList, Theme,
	ThemeState,
};
use disruptivo_common_i18n::{
	AuditReport, Locale, LocaleResolution, LOCALES, LOCALE_STORAGE_KEY,
};
use disruptivo_common_storage::{ClientStorage, MemoryStorage};
use tracing::{info, warn};

use crate::app::App;

/// Parse a `KEY=VALUE` interpolation argument.
pub fn parse_var(arg: &str) -> Result<(String, String), String> {
	let (key, value) = arg
		.split_once('=')
		.ok_or_else(|| format!("expected KEY=VALUE, got {arg:?}"))?;
	let key = key.trim();
	if key.is_empty() {
		return Err(format!("empty variable name in {arg:?}"));
	}
	Ok((key.to_string(), value.to_string()))
}

/// Print one translated string.
///
/// `locale` overrides the active locale for this lookup only; the saved
/// preference is left alone.
pub async fn translate(
	app: &App,
	namespace: &str,
	key_path: &str,
	locale: Option<Locale>,
	vars: &[(String, String)],
	out: &mut dyn Write,
) -> Result<()> {
	let (translations, _) = match locale {
		Some(locale) => {
			let scratch = MemoryStorage::new();
			scratch.set(LOCALE_STORAGE_KEY, locale.code());
			app.translations_with(Arc::new(scratch))
		}
		None => app.translations(),
	};

	translations.load_modular_translation(namespace).await;

	let vars: Vec<(&str, &str)> = vars
		.iter()
		.map(|(key, value)| (key.as_str(), value.as_str()))
		.collect();
	let text = translations.t_fmt(namespace, key_path, &vars);
	if text == key_path {
		warn!(namespace, key_path, locale = %translations.locale(), "no translation found");
	}
	writeln!(out, "{text}")?;
	Ok(())
}

pub fn locale_show(app: &App, out: &mut dyn Write) -> Result<()> {
	let (_, resolution) = app.translations();
	let locale = resolution.locale();
	let origin = match resolution {
		LocaleResolution::Persisted(_) => "saved preference",
		LocaleResolution::Detected(_) => "detected from the system",
		LocaleResolution::Default(_) => "default",
	};
	writeln!(out, "{} ({}), {origin}", locale.code(), locale.info().native_name)?;
	Ok(())
}

pub fn locale_list(app: &App, out: &mut dyn Write) -> Result<()> {
	let (translations, _) = app.translations();
	let active = translations.locale();
	for info in LOCALES {
		let marker = if info.locale == active { "*" } else { " " };
		writeln!(
			out,
			"{marker} {:<3}{:<12}{}",
			info.locale.code(),
			info.native_name,
			info.name
		)?;
	}
	Ok(())
}

pub async fn locale_set(app: &App, locale: Locale, out: &mut dyn Write) -> Result<()> {
	let (translations, _) = app.translations();
	translations.change_locale(locale).await;

	if !app.storage.is_persistent() {
		warn!(%locale, "preference could not be saved and applies to this run only");
	}
	info!(%locale, "locale preference updated");
	writeln!(out, "{} ({})", locale.code(), locale.info().native_name)?;
	Ok(())
}

/// Audit key structure across locales. Returns whether every namespace is clean.
pub async fn audit(
	app: &App,
	namespaces: &[String],
	json: bool,
	out: &mut dyn Write,
) -> Result<bool> {
	let namespaces = if namespaces.is_empty() {
		app.bundles.namespaces().await?
	} else {
		namespaces.to_vec()
	};

	let (translations, _) = app.translations();
	let mut reports = Vec::with_capacity(namespaces.len());
	for namespace in &namespaces {
		reports.push(translations.audit(namespace).await);
	}

	if json {
		serde_json::to_writer_pretty(&mut *out, &reports).context("failed to write audit report")?;
		writeln!(out)?;
	} else {
		for report in &reports {
			write_report(report, out)?;
		}
	}

	Ok(reports.iter().all(AuditReport::is_clean))
}

fn write_report(report: &AuditReport, out: &mut dyn Write) -> Result<()> {
	if report.is_clean() {
		writeln!(out, "{}: ok (reference {})", report.namespace, report.reference)?;
		return Ok(());
	}

	writeln!(
		out,
		"{}: drift from {} ({} differing, {} empty)",
		report.namespace,
		report.reference,
		report.diffs.len(),
		report.empty_locales.len()
	)?;
	for diff in &report.diffs {
		for key in &diff.missing {
			writeln!(out, "  {} missing {key}", diff.locale)?;
		}
		for key in &diff.extra {
			writeln!(out, "  {} extra {key}", diff.locale)?;
		}
	}
	for locale in &report.empty_locales {
		writeln!(out, "  {locale} empty")?;
	}
	Ok(())
}

pub enum ThemeAction {
	Show,
	Toggle,
	Set(Theme),
}

pub fn theme(app: &App, action: ThemeAction, out: &mut dyn Write) -> Result<()> {
	let state = ThemeState::new(app.storage.clone());
	match action {
		ThemeAction::Show => {}
		ThemeAction::Toggle => {
			state.toggle();
		}
		ThemeAction::Set(theme) => state.set(theme),
	}

	let mut root = RootClassList::new();
	state.apply(&mut root);
	writeln!(out, "{} (root classes: {root})", state.theme())?;
	Ok(())
}

/// Evaluate the admin guard for `route`, optionally as a signed-in user.
pub async fn route(
	app: &App,
	route: &str,
	signed_in_as: Option<&str>,
	out: &mut dyn Write,
) -> Result<()> {
	let provider = match signed_in_as {
		Some(email) => MemorySessionProvider::signed_in(AdminUser {
			id: email.to_string(),
			email: email.to_string(),
			display_name: None,
			last_sign_in_at: None,
		}),
		None => MemorySessionProvider::new(),
	};
	let auth = AuthState::new(Arc::new(provider));
	auth.check_session().await;

	let guard = AdminGuard::new(app.config.admin.login_route.clone());
	match guard.evaluate(&auth.snapshot(), route) {
		GuardDecision::Render => writeln!(out, "render {route}")?,
		GuardDecision::Redirect(target) => writeln!(out, "redirect {target}")?,
		GuardDecision::Pending => writeln!(out, "pending")?,
	}
	Ok(())
}
