// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wiring from loaded configuration to the runtime objects commands use.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use disruptivo_cli_config::{DisruptivoConfig, SourceKind};
use disruptivo_common_i18n::{
	BundleSource, FsBundleSource, HttpBundleSource, LocaleResolution, ModularTranslations,
};
use disruptivo_common_storage::{ClientStorage, FileStorage};
use tracing::debug;

/// Where bundles are read from for this invocation.
pub enum Bundles {
	Fs(Arc<FsBundleSource>),
	Http(Arc<HttpBundleSource>),
}

impl Bundles {
	pub fn from_config(config: &DisruptivoConfig) -> Result<Self> {
		match config.i18n.source {
			SourceKind::Fs => {
				let source = FsBundleSource::new(&config.i18n.locales_dir);
				debug!(root = %source.root().display(), "using filesystem bundle source");
				Ok(Self::Fs(Arc::new(source)))
			}
			SourceKind::Http => {
				let base_url = config
					.i18n
					.base_url
					.clone()
					.ok_or_else(|| anyhow!("i18n.base_url is required for the http source"))?;
				debug!(%base_url, "using http bundle source");
				Ok(Self::Http(Arc::new(HttpBundleSource::new(base_url))))
			}
		}
	}

	pub fn source(&self) -> Arc<dyn BundleSource> {
		match self {
			Self::Fs(source) => source.clone(),
			Self::Http(source) => source.clone(),
		}
	}

	/// Every namespace the source can enumerate. Only the filesystem can.
	///
	/// Finding none is an error.
	pub async fn namespaces(&self) -> Result<Vec<String>> {
		match self {
			Self::Fs(source) => {
				let namespaces = source.namespaces().await?;
				if namespaces.is_empty() {
					return Err(anyhow!(
						"no namespaces found under {}",
						source.root().display()
					));
				}
				Ok(namespaces)
			}
			Self::Http(_) => Err(anyhow!(
				"the http source cannot list namespaces; name them explicitly"
			)),
		}
	}
}

pub struct App {
	pub config: DisruptivoConfig,
	pub bundles: Bundles,
	pub storage: Arc<dyn ClientStorage>,
	pub detected_language: Option<String>,
}

impl App {
	pub fn new(config: DisruptivoConfig, detected_language: Option<String>) -> Result<Self> {
		let bundles = Bundles::from_config(&config)?;
		let storage: Arc<dyn ClientStorage> = Arc::new(FileStorage::open(&config.storage.file));
		Ok(Self {
			config,
			bundles,
			storage,
			detected_language,
		})
	}

	/// A translation context over `storage`, mounted with the detected language.
	pub fn translations_with(
		&self,
		storage: Arc<dyn ClientStorage>,
	) -> (ModularTranslations, LocaleResolution) {
		let translations = ModularTranslations::with_default_locale(
			self.bundles.source(),
			storage,
			self.config.i18n.default_locale,
		);
		let resolution = translations.mount(self.detected_language.as_deref());
		(translations, resolution)
	}

	pub fn translations(&self) -> (ModularTranslations, LocaleResolution) {
		self.translations_with(self.storage.clone())
	}
}
