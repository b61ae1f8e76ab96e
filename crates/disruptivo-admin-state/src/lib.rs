// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! State shared by the Disruptivo admin section.
//!
//! Each piece is independent and takes its collaborators through its
//! constructor. Changes are published on a [`tokio::sync::watch`] channel so
//! views can re-render when a snapshot changes.
//!
//! - [`AuthState`]: the signed-in [`AdminUser`], checked through a [`SessionProvider`]
//! - [`AdminGuard`]: redirects unauthenticated visitors to the login route
//! - [`SidebarState`]: pinned/hovered flags, pin kept in session storage
//! - [`ThemeState`]: light/dark preference kept in durable storage
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use disruptivo_admin_state::{AdminGuard, AuthState, GuardDecision, MemorySessionProvider};
//!
//! # tokio_test::block_on(async {
//! let auth = AuthState::new(Arc::new(MemorySessionProvider::new()));
//! let guard = AdminGuard::default();
//!
//! assert_eq!(guard.evaluate(&auth.snapshot(), "/admin/posts"), GuardDecision::Pending);
//!
//! auth.check_session().await;
//! assert_eq!(
//! 	guard.evaluate(&auth.snapshot(), "/admin/posts"),
//! 	GuardDecision::Redirect("/admin/login".to_string())
//! );
//! # });
//! ```

mod auth;
mod error;
mod guard;
mod sidebar;
mod theme;

pub use auth::{AdminUser, AuthSnapshot, AuthState, MemorySessionProvider, SessionProvider};
pub use error::{AuthError, UnknownTheme};
pub use guard::{AdminGuard, GuardDecision, DEFAULT_LOGIN_ROUTE};
pub use sidebar::{SidebarSnapshot, SidebarState, SIDEBAR_PINNED_KEY};
pub use theme::{RootClassList, Theme, ThemeState, THEME_STORAGE_KEY};
