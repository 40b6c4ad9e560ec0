//! Error types for template loading and rendering

use std::path::PathBuf;

/// Errors returned by template loading and rendering
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
	/// No file exists anywhere along the language fallback chain, or the
	/// shared frame set is incomplete
	#[error("template file not found: {name} (lang: {lang:?})")]
	NotFound { name: String, lang: String },

	/// The located source failed to compile
	#[error("failed to parse template {name}")]
	Parse {
		name: String,
		#[source]
		source: tera::Error,
	},

	/// Executing a compiled template failed
	#[error("failed to render template {name}")]
	Render {
		name: String,
		#[source]
		source: tera::Error,
	},

	/// The template file exists but could not be read
	#[error("cannot read template file {}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// A template name or language tag would escape the template root
	#[error("invalid template name: {0}")]
	InvalidName(String),

	/// The engine configuration cannot be used for loading
	#[error("invalid template engine: {0}")]
	InvalidEngine(String),

	/// A settings file is unreadable or malformed
	#[error("invalid template settings: {0}")]
	Settings(String),
}

impl TemplateError {
	pub(crate) fn not_found(name: &str, lang: &str) -> Self {
		Self::NotFound {
			name: name.to_string(),
			lang: lang.to_string(),
		}
	}

	/// Whether this is the "template not found" sentinel
	///
	/// # Examples
	///
	/// ```
	/// use locale_templates::TemplateError;
	///
	/// let err = TemplateError::NotFound {
	///     name: "hello".to_string(),
	///     lang: "en-US".to_string(),
	/// };
	/// assert!(err.is_not_found());
	/// assert!(!TemplateError::InvalidName("..".to_string()).is_not_found());
	/// ```
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound { .. })
	}
}

/// Result type used throughout this crate
pub type TemplateResult<T> = std::result::Result<T, TemplateError>;
