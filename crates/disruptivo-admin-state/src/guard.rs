// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layout-level access control for admin routes.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::auth::AuthSnapshot;

/// Default route unauthenticated visitors are sent to.
pub const DEFAULT_LOGIN_ROUTE: &str = "/admin/login";

/// What the admin layout should do for the current route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
	/// Session is still being checked, or a redirect is already under way
	Pending,
	/// Render the requested route
	Render,
	/// Navigate to the login route
	Redirect(String),
}

/// Redirects unauthenticated visitors to the login route, once per episode.
///
/// An episode starts when the session resolves with no user on a non-login
/// route and ends when the login route is reached or a user appears.
#[derive(Debug)]
pub struct AdminGuard {
	login_route: String,
	redirected: AtomicBool,
}

impl AdminGuard {
	pub fn new(login_route: impl Into<String>) -> Self {
		Self {
			login_route: login_route.into(),
			redirected: AtomicBool::new(false),
		}
	}

	pub fn login_route(&self) -> &str {
		&self.login_route
	}

	pub fn is_login_route(&self, route: &str) -> bool {
		normalize_route(route) == normalize_route(&self.login_route)
	}

	pub fn evaluate(&self, snapshot: &AuthSnapshot, current_route: &str) -> GuardDecision {
		if snapshot.is_loading {
			return GuardDecision::Pending;
		}

		if snapshot.user.is_some() || self.is_login_route(current_route) {
			self.redirected.store(false, Ordering::Release);
			return GuardDecision::Render;
		}

		if self.redirected.swap(true, Ordering::AcqRel) {
			debug!(route = current_route, "redirect to login already issued");
			return GuardDecision::Pending;
		}

		info!(
			route = current_route,
			login_route = %self.login_route,
			"no admin session, redirecting to login"
		);
		GuardDecision::Redirect(self.login_route.clone())
	}
}

impl Default for AdminGuard {
	fn default() -> Self {
		Self::new(DEFAULT_LOGIN_ROUTE)
	}
}

/// Strip the query string, fragment and trailing slash from a route.
fn normalize_route(route: &str) -> &str {
	let end = route.find(['?', '#']).unwrap_or(route.len());
	let path = &route[..end];
	match path.trim_end_matches('/') {
		"" => "/",
		trimmed => trimmed,
	}
}
