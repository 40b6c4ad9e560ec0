//! Debug (no-cache) mode
//!
//! In debug mode every load evicts the cached entry first, so edits on disk
//! show up on the next request. The toggle is normally read from the
//! environment on every load.

use std::env;

/// Preferred environment variable enabling debug mode
pub const DEBUG_ENV_VAR: &str = "LOCALE_TEMPLATES_DEBUG";

/// Legacy environment variable, consulted when [`DEBUG_ENV_VAR`] is unset
pub const LEGACY_DEBUG_ENV_VAR: &str = "KKAPP_DEBUG";

/// Environment variables consulted by default, in order of preference
pub fn default_debug_env_vars() -> Vec<String> {
	vec![DEBUG_ENV_VAR.to_string(), LEGACY_DEBUG_ENV_VAR.to_string()]
}

/// How an engine decides whether debug mode is active
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugMode {
	/// Read the first non-empty variable of the list on every check
	Env(Vec<String>),
	/// Fixed value, independent of the environment
	Forced(bool),
}

impl DebugMode {
	/// Whether debug mode is active right now
	///
	/// # Examples
	///
	/// ```
	/// use locale_templates::DebugMode;
	///
	/// assert!(DebugMode::Forced(true).is_enabled());
	/// assert!(!DebugMode::Env(vec!["SURELY_UNSET_DEBUG_VARIABLE".to_string()]).is_enabled());
	/// ```
	pub fn is_enabled(&self) -> bool {
		match self {
			DebugMode::Forced(enabled) => *enabled,
			DebugMode::Env(names) => first_non_empty(names).is_some_and(|value| is_true(&value)),
		}
	}
}

impl Default for DebugMode {
	fn default() -> Self {
		DebugMode::Env(default_debug_env_vars())
	}
}

fn first_non_empty(names: &[String]) -> Option<String> {
	names
		.iter()
		.filter_map(|name| env::var(name).ok())
		.find(|value| !value.is_empty())
}

fn is_true(value: &str) -> bool {
	value.eq_ignore_ascii_case("TRUE")
}
