//! Engine settings
//!
//! Settings can be built in code or read from a TOML file:
//!
//! ```toml
//! root_path = "./resources/template"
//! frames = ["_main", "_header_content", "_header_claim", "_footer_content", "_footer_claim"]
//! debug_env_vars = ["LOCALE_TEMPLATES_DEBUG", "KKAPP_DEBUG"]
//! # debug = true
//! ```

use crate::debug::{DebugMode, default_debug_env_vars};
use crate::frames::default_frames;
use crate::{TemplateError, TemplateResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Template root used when none is configured
pub const DEFAULT_ROOT_PATH: &str = "./resources/template";

/// Configuration of an [`Engine`](crate::Engine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateSettings {
	/// Base directory of all template lookups
	pub root_path: PathBuf,
	/// Frame templates composed into every frame page
	pub frames: Vec<String>,
	/// Environment variables enabling debug mode, most preferred first
	pub debug_env_vars: Vec<String>,
	/// Force debug mode on or off, ignoring the environment
	pub debug: Option<bool>,
}

impl Default for TemplateSettings {
	fn default() -> Self {
		Self {
			root_path: PathBuf::from(DEFAULT_ROOT_PATH),
			frames: default_frames(),
			debug_env_vars: default_debug_env_vars(),
			debug: None,
		}
	}
}

impl TemplateSettings {
	/// Parse settings from TOML; missing keys take their defaults
	///
	/// # Examples
	///
	/// ```
	/// use locale_templates::TemplateSettings;
	/// use std::path::Path;
	///
	/// let settings = TemplateSettings::from_toml_str("root_path = \"/srv/templates\"").unwrap();
	/// assert_eq!(settings.root_path, Path::new("/srv/templates"));
	/// assert_eq!(settings.frames.len(), 5);
	/// ```
	pub fn from_toml_str(source: &str) -> TemplateResult<Self> {
		toml::from_str(source).map_err(|e| TemplateError::Settings(e.to_string()))
	}

	/// Read settings from a TOML file
	pub fn from_file(path: impl AsRef<Path>) -> TemplateResult<Self> {
		let path = path.as_ref();
		let source = fs::read_to_string(path).map_err(|e| {
			TemplateError::Settings(format!("Cannot read {}: {}", path.display(), e))
		})?;
		Self::from_toml_str(&source)
	}

	/// Debug mode described by these settings
	pub fn debug_mode(&self) -> DebugMode {
		match self.debug {
			Some(enabled) => DebugMode::Forced(enabled),
			None => DebugMode::Env(self.debug_env_vars.clone()),
		}
	}
}
