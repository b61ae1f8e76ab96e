// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Admin session state.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::error::AuthError;

/// A signed-in administrator.
///
/// `email` and `display_name` are PII and should not be logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
	pub id: String,
	pub email: String,
	pub display_name: Option<String>,
	pub last_sign_in_at: Option<DateTime<Utc>>,
}

/// Looks up and ends the current admin session.
#[async_trait]
pub trait SessionProvider: Send + Sync {
	/// The user of the existing session, or `None` when signed out.
	async fn current_user(&self) -> Result<Option<AdminUser>, AuthError>;

	async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Point-in-time view of [`AuthState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
	pub user: Option<AdminUser>,
	pub is_loading: bool,
}

impl AuthSnapshot {
	pub fn is_authenticated(&self) -> bool {
		self.user.is_some()
	}
}

impl Default for AuthSnapshot {
	fn default() -> Self {
		Self {
			user: None,
			is_loading: true,
		}
	}
}

/// Holds the current admin user and publishes changes.
///
/// Starts in the loading state until [`AuthState::check_session`] completes.
pub struct AuthState {
	provider: Arc<dyn SessionProvider>,
	tx: watch::Sender<AuthSnapshot>,
}

impl AuthState {
	pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
		let (tx, _) = watch::channel(AuthSnapshot::default());
		Self { provider, tx }
	}

	pub fn snapshot(&self) -> AuthSnapshot {
		self.tx.borrow().clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
		self.tx.subscribe()
	}

	/// Ask the provider for an existing session.
	///
	/// A provider error is treated as having no session.
	#[instrument(skip(self))]
	pub async fn check_session(&self) -> Option<AdminUser> {
		self.tx.send_if_modified(|snapshot| {
			let was_loading = snapshot.is_loading;
			snapshot.is_loading = true;
			!was_loading
		});

		let user = match self.provider.current_user().await {
			Ok(user) => user,
			Err(e) => {
				warn!(error = %e, "session lookup failed, treating as signed out");
				None
			}
		};

		match &user {
			Some(user) => debug!(user_id = %user.id, "admin session found"),
			None => debug!("no admin session"),
		}

		self.tx.send_replace(AuthSnapshot {
			user: user.clone(),
			is_loading: false,
		});
		user
	}

	/// End the session with the provider and clear the local user.
	///
	/// The local user is cleared even when the provider fails.
	#[instrument(skip(self))]
	pub async fn sign_out(&self) -> Result<(), AuthError> {
		let result = self.provider.sign_out().await;
		if let Err(e) = &result {
			warn!(error = %e, "provider sign-out failed");
		} else {
			info!("admin signed out");
		}

		self.tx.send_replace(AuthSnapshot {
			user: None,
			is_loading: false,
		});
		result
	}
}

/// Session provider holding a single user in memory.
#[derive(Debug, Default)]
pub struct MemorySessionProvider {
	user: RwLock<Option<AdminUser>>,
}

impl MemorySessionProvider {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn signed_in(user: AdminUser) -> Self {
		Self {
			user: RwLock::new(Some(user)),
		}
	}

	pub fn sign_in(&self, user: AdminUser) {
		*self.user.write() = Some(user);
	}
}

#[async_trait]
impl SessionProvider for MemorySessionProvider {
	async fn current_user(&self) -> Result<Option<AdminUser>, AuthError> {
		Ok(self.user.read().clone())
	}

	async fn sign_out(&self) -> Result<(), AuthError> {
		*self.user.write() = None;
		Ok(())
	}
}
