//! Client session state and the dashboard route guard.
//!
//! The browser client keeps three pieces of session state: the bearer token,
//! the account role and the display name. They are populated together at
//! login and cleared together at logout. The guard decides what a navigation
//! attempt to a protected destination should do, using only this local state;
//! it performs no signature or expiry verification, since an expired token
//! is detected when a later API call fails.

use crate::model::user::UserRole;

/// Where a guarded navigation attempt should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Authenticated and authorized for the destination.
    Render,
    /// No session at all: go authenticate first.
    RedirectToLogin,
    /// Authenticated but not authorized for this view: fall back to the
    /// dashboard landing rather than the login screen.
    RedirectToDashboard,
}

/// Explicit session object with a single init/teardown lifecycle, passed to
/// the routing layer instead of being read from ambient global storage.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    role: Option<UserRole>,
    first_name: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Populate the session after a successful login. All three fields are
    /// set together.
    pub fn begin(&mut self, token: String, role: UserRole, first_name: String) {
        self.token = Some(token);
        self.role = Some(role);
        self.first_name = Some(first_name);
    }

    /// Clear the session at logout. All three fields are cleared together.
    pub fn end(&mut self) {
        self.token = None;
        self.role = None;
        self.first_name = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.role
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Guard decision for a destination requiring one of `required` roles.
    /// An empty `required` slice means any authenticated session may enter.
    pub fn guard(&self, required: &[UserRole]) -> GuardDecision {
        if self.token.is_none() {
            return GuardDecision::RedirectToLogin;
        }
        if !required.is_empty() {
            match self.role {
                Some(role) if required.contains(&role) => {}
                _ => return GuardDecision::RedirectToDashboard,
            }
        }
        GuardDecision::Render
    }
}
