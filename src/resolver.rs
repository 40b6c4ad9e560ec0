//! Language fallback path resolution
//!
//! Templates live under `{root}/{lang}/{name}.tmpl`. A lookup for a region
//! tag such as `zh-TW` tries, in order:
//!
//! 1. `{root}/zh-TW/{name}.tmpl`
//! 2. `{root}/zh/{name}.tmpl`
//! 3. `{root}/default/{name}.tmpl`
//!
//! The first candidate that is an existing file wins. Nothing found is not an
//! error at this level: [`PathResolver::resolve`] returns `Ok(None)`.

use crate::{TemplateError, TemplateResult};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// File extension of every template file
pub const TEMPLATE_EXTENSION: &str = "tmpl";

/// Directory holding the language-independent fallback templates
pub const DEFAULT_LANGUAGE_DIR: &str = "default";

/// Separator between the base language and the region in a language tag
pub const REGION_SEPARATOR: char = '-';

/// Resolves logical template names against a template root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
	root: PathBuf,
}

impl PathResolver {
	/// Create a resolver for the given template root
	///
	/// # Examples
	///
	/// ```
	/// use locale_templates::PathResolver;
	/// use std::path::Path;
	///
	/// let resolver = PathResolver::new("./resources/template");
	/// assert_eq!(resolver.root(), Path::new("./resources/template"));
	/// ```
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	/// Template root directory
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Find the first existing template file along the fallback chain
	///
	/// # Errors
	///
	/// Returns [`TemplateError::InvalidName`] when `name` or `lang` would
	/// leave the template root. A template that simply does not exist is
	/// reported as `Ok(None)`.
	///
	/// # Examples
	///
	/// ```
	/// use locale_templates::PathResolver;
	///
	/// let dir = tempfile::tempdir().unwrap();
	/// std::fs::create_dir_all(dir.path().join("zh")).unwrap();
	/// std::fs::write(dir.path().join("zh/hello.tmpl"), "Z").unwrap();
	///
	/// let resolver = PathResolver::new(dir.path());
	/// let path = resolver.resolve("hello", "zh-TW").unwrap().unwrap();
	/// assert!(path.ends_with("zh/hello.tmpl"));
	/// assert!(resolver.resolve("missing", "zh-TW").unwrap().is_none());
	/// ```
	pub fn resolve(&self, name: &str, lang: &str) -> TemplateResult<Option<PathBuf>> {
		Ok(self
			.candidates(name, lang)?
			.into_iter()
			.find(|path| is_file(path)))
	}

	/// Candidate paths for `(name, lang)` in lookup order
	///
	/// An empty `lang` yields only the default candidate; a tag without a
	/// region separator yields no base language candidate.
	pub fn candidates(&self, name: &str, lang: &str) -> TemplateResult<Vec<PathBuf>> {
		validate_name(name)?;
		validate_lang(lang)?;

		let mut candidates = Vec::with_capacity(3);
		if !lang.is_empty() {
			candidates.push(self.path_in(lang, name));
			if let Some(base) = base_language(lang) {
				candidates.push(self.path_in(base, name));
			}
		}
		candidates.push(self.path_in(DEFAULT_LANGUAGE_DIR, name));
		Ok(candidates)
	}

	/// Path of `name` in the default language directory, whether or not it exists
	pub fn default_path(&self, name: &str) -> PathBuf {
		self.path_in(DEFAULT_LANGUAGE_DIR, name)
	}

	fn path_in(&self, dir: &str, name: &str) -> PathBuf {
		self.root
			.join(dir)
			.join(format!("{}.{}", name, TEMPLATE_EXTENSION))
	}
}

/// Base language of a region tag, e.g. `zh` for `zh-TW`
///
/// Returns `None` for tags without a region separator, since those are
/// already base languages.
///
/// # Examples
///
/// ```
/// use locale_templates::resolver::base_language;
///
/// assert_eq!(base_language("zh-TW"), Some("zh"));
/// assert_eq!(base_language("sr-Latn-RS"), Some("sr"));
/// assert_eq!(base_language("fr"), None);
/// ```
pub fn base_language(lang: &str) -> Option<&str> {
	let (base, _) = lang.split_once(REGION_SEPARATOR)?;
	(!base.is_empty()).then_some(base)
}

fn is_file(path: &Path) -> bool {
	fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Reject names that would resolve outside the template root
///
/// Names may contain sub directories (`emails/welcome`) but no parent,
/// root or prefix components.
pub(crate) fn validate_name(name: &str) -> TemplateResult<()> {
	if name.trim().is_empty() {
		return Err(TemplateError::InvalidName(
			"template name is empty".to_string(),
		));
	}

	for component in Path::new(name).components() {
		match component {
			Component::ParentDir => {
				return Err(TemplateError::InvalidName(format!(
					"Directory traversal attempt detected in: {}",
					name
				)));
			}
			Component::RootDir | Component::Prefix(_) => {
				return Err(TemplateError::InvalidName(format!(
					"Absolute path not allowed: {}",
					name
				)));
			}
			Component::CurDir | Component::Normal(_) => {}
		}
	}
	Ok(())
}

/// Language tags name exactly one directory below the root
fn validate_lang(lang: &str) -> TemplateResult<()> {
	if lang.contains(['/', '\\']) || lang == "." || lang == ".." {
		return Err(TemplateError::InvalidName(format!(
			"Invalid language tag: {}",
			lang
		)));
	}
	Ok(())
}
