//! Template engine façade
//!
//! An [`Engine`] owns its configuration, three independent caches (markup,
//! frame composed markup, text) and the frame validator. Instances share
//! nothing, so tests and tenants can each build their own.
//!
//! # Examples
//!
//! ```
//! use locale_templates::{DebugMode, Engine};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::create_dir_all(dir.path().join("default")).unwrap();
//! std::fs::write(dir.path().join("default/hello.tmpl"), "Hello {{ name }}").unwrap();
//!
//! let engine = Engine::new()
//!     .with_root_path(dir.path())
//!     .with_debug_mode(DebugMode::Forced(false));
//!
//! let template = engine.load_markup_template("hello", "fr-FR").unwrap();
//! let html = template
//!     .render_serialize(&serde_json::json!({ "name": "World" }))
//!     .unwrap();
//! assert_eq!(html, "Hello World");
//! ```

use crate::cache::{CacheKey, CacheStatistics, TemplateCache};
use crate::compiled::{CompiledTemplate, Flavor};
use crate::debug::DebugMode;
use crate::frames::{FrameStatus, FrameValidator};
use crate::functions::{
	FuncTable, IdentityTranslator, TemplateFunction, Translator, build_func_table,
};
use crate::resolver::validate_name;
use crate::settings::TemplateSettings;
use crate::{PathResolver, TemplateError, TemplateResult};
use parking_lot::RwLock;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tera::Function;

/// Selects one of the engine caches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
	/// Single markup templates
	Markup,
	/// Markup pages composed with the frame set
	Frame,
	/// Single text templates
	Text,
}

/// Language aware template loader with per-instance caches
pub struct Engine {
	root_path: RwLock<PathBuf>,
	frames: RwLock<Vec<String>>,
	functions: RwLock<FuncTable>,
	translator: RwLock<Arc<dyn Translator>>,
	debug_mode: RwLock<DebugMode>,
	markup_cache: TemplateCache<CompiledTemplate>,
	frame_cache: TemplateCache<CompiledTemplate>,
	text_cache: TemplateCache<CompiledTemplate>,
	frame_validator: FrameValidator,
}

impl Engine {
	/// Create an engine with default settings
	pub fn new() -> Self {
		Self::from_settings(&TemplateSettings::default())
	}

	/// Create an engine from settings
	pub fn from_settings(settings: &TemplateSettings) -> Self {
		Self {
			root_path: RwLock::new(settings.root_path.clone()),
			frames: RwLock::new(settings.frames.clone()),
			functions: RwLock::new(FuncTable::new()),
			translator: RwLock::new(Arc::new(IdentityTranslator)),
			debug_mode: RwLock::new(settings.debug_mode()),
			markup_cache: TemplateCache::new(),
			frame_cache: TemplateCache::new(),
			text_cache: TemplateCache::new(),
			frame_validator: FrameValidator::new(),
		}
	}

	/// Set the template root
	pub fn with_root_path(self, root_path: impl Into<PathBuf>) -> Self {
		self.set_root_path(root_path);
		self
	}

	/// Set the frame set
	pub fn with_frames<I, S>(self, frames: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.set_frames(frames);
		self
	}

	/// Register a template function
	pub fn with_function<F>(self, name: impl Into<String>, function: F) -> Self
	where
		F: Function + 'static,
	{
		self.register_function(name, function);
		self
	}

	/// Set the translation service
	pub fn with_translator<T>(self, translator: T) -> Self
	where
		T: Translator + 'static,
	{
		self.set_translator(translator);
		self
	}

	/// Set how debug mode is decided
	pub fn with_debug_mode(self, debug_mode: DebugMode) -> Self {
		self.set_debug_mode(debug_mode);
		self
	}

	/// Load a markup template, HTML escaping every expression
	///
	/// # Errors
	///
	/// [`TemplateError::NotFound`] when no fallback tier exists,
	/// [`TemplateError::Parse`] when the located file does not compile.
	pub fn load_markup_template(
		&self,
		name: &str,
		lang: &str,
	) -> TemplateResult<Arc<CompiledTemplate>> {
		let key = CacheKey::new(name, lang);
		self.markup_cache
			.get_or_load(&key, self.debug_enabled(), || {
				self.compile_single(Flavor::Markup, &key)
			})
	}

	/// Load a plain text template
	pub fn load_text_template(
		&self,
		name: &str,
		lang: &str,
	) -> TemplateResult<Arc<CompiledTemplate>> {
		let key = CacheKey::new(name, lang);
		self.text_cache
			.get_or_load(&key, self.debug_enabled(), || {
				self.compile_single(Flavor::Text, &key)
			})
	}

	/// Load a markup page composed with every frame of the frame set
	///
	/// The page and the frames are resolved with the requested language's
	/// fallback chain and parsed into one unit; frames are available to the
	/// page by name (`{% include "_main" %}`) and rendering the unit renders
	/// the page.
	///
	/// # Errors
	///
	/// [`TemplateError::NotFound`] when any frame is missing from the default
	/// directory, even if the page itself exists.
	pub fn load_frame_template(
		&self,
		name: &str,
		lang: &str,
	) -> TemplateResult<Arc<CompiledTemplate>> {
		let key = CacheKey::new(name, lang);
		self.frame_cache
			.get_or_load(&key, self.debug_enabled(), || self.compile_frame(&key))
	}

	/// Replace the template root
	pub fn set_root_path(&self, root_path: impl Into<PathBuf>) {
		*self.root_path.write() = root_path.into();
	}

	/// Replace the frame set
	pub fn set_frames<I, S>(&self, frames: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		*self.frames.write() = frames.into_iter().map(Into::into).collect();
	}

	/// Replace every caller supplied template function
	pub fn set_functions(&self, functions: FuncTable) {
		*self.functions.write() = functions;
	}

	/// Add or replace one caller supplied template function
	pub fn register_function<F>(&self, name: impl Into<String>, function: F)
	where
		F: Function + 'static,
	{
		self.functions
			.write()
			.insert(name.into(), TemplateFunction::new(function));
	}

	/// Replace the translation service behind `translate`
	pub fn set_translator<T>(&self, translator: T)
	where
		T: Translator + 'static,
	{
		*self.translator.write() = Arc::new(translator);
	}

	/// Replace the debug mode source
	pub fn set_debug_mode(&self, debug_mode: DebugMode) {
		*self.debug_mode.write() = debug_mode;
	}

	/// Current template root
	pub fn root_path(&self) -> PathBuf {
		self.root_path.read().clone()
	}

	/// Current frame set
	pub fn frames(&self) -> Vec<String> {
		self.frames.read().clone()
	}

	/// Whether loads currently bypass cached entries
	pub fn debug_enabled(&self) -> bool {
		self.debug_mode.read().is_enabled()
	}

	/// State of the frame existence memo
	pub fn frame_status(&self) -> FrameStatus {
		self.frame_validator.status()
	}

	/// Drop the cached entry of `(name, lang)` from one cache
	pub fn invalidate(&self, kind: CacheKind, name: &str, lang: &str) -> bool {
		self.cache(kind)
			.invalidate(&CacheKey::new(name, lang))
			.is_some()
	}

	/// Drop every cached template
	pub fn clear_caches(&self) {
		self.markup_cache.clear();
		self.frame_cache.clear();
		self.text_cache.clear();
	}

	/// Statistics of one cache
	pub fn cache_statistics(&self, kind: CacheKind) -> CacheStatistics {
		self.cache(kind).statistics()
	}

	fn cache(&self, kind: CacheKind) -> &TemplateCache<CompiledTemplate> {
		match kind {
			CacheKind::Markup => &self.markup_cache,
			CacheKind::Frame => &self.frame_cache,
			CacheKind::Text => &self.text_cache,
		}
	}

	fn resolver(&self) -> TemplateResult<PathResolver> {
		let root = self.root_path();
		if root.as_os_str().is_empty() {
			return Err(TemplateError::InvalidEngine(
				"template root path is empty".to_string(),
			));
		}
		Ok(PathResolver::new(root))
	}

	fn func_table(&self, lang: &str) -> FuncTable {
		let translator = Arc::clone(&*self.translator.read());
		build_func_table(translator, lang, &self.functions.read())
	}

	fn compile_single(&self, flavor: Flavor, key: &CacheKey) -> TemplateResult<CompiledTemplate> {
		let resolver = self.resolver()?;
		let path = resolver
			.resolve(key.name(), key.lang())?
			.ok_or_else(|| TemplateError::not_found(key.name(), key.lang()))?;
		let source = read_source(&path, key)?;

		tracing::debug!(key = %key, path = %path.display(), ?flavor, "parsing template");
		CompiledTemplate::parse(flavor, &key.to_string(), &source, self.func_table(key.lang()))
	}

	fn compile_frame(&self, key: &CacheKey) -> TemplateResult<CompiledTemplate> {
		let resolver = self.resolver()?;
		let frames = self.frames();
		if frames.iter().any(|frame| frame.trim().is_empty()) {
			return Err(TemplateError::InvalidEngine(
				"frame set contains an empty frame name".to_string(),
			));
		}
		for frame in &frames {
			validate_name(frame)?;
		}

		if !self.frame_validator.ensure_frames_exist(&resolver, &frames) {
			return Err(TemplateError::not_found(key.name(), key.lang()));
		}

		let page_path = resolver
			.resolve(key.name(), key.lang())?
			.ok_or_else(|| TemplateError::not_found(key.name(), key.lang()))?;

		let mut sources = Vec::with_capacity(frames.len() + 1);
		sources.push((key.name().to_string(), read_source(&page_path, key)?));
		for frame in frames.iter().filter(|frame| frame.as_str() != key.name()) {
			let frame_key = CacheKey::new(frame.as_str(), key.lang());
			let frame_path = resolver
				.resolve(frame, key.lang())?
				.ok_or_else(|| TemplateError::not_found(frame, key.lang()))?;
			sources.push((frame.clone(), read_source(&frame_path, &frame_key)?));
		}

		tracing::debug!(
			key = %key,
			path = %page_path.display(),
			frames = frames.len(),
			"parsing frame template"
		);
		CompiledTemplate::parse_multi(
			Flavor::Markup,
			key.name(),
			sources,
			self.func_table(key.lang()),
		)
	}
}

/// Read a resolved template; a file vanishing after resolution is a miss
fn read_source(path: &Path, key: &CacheKey) -> TemplateResult<String> {
	fs::read_to_string(path).map_err(|source| match source.kind() {
		ErrorKind::NotFound => TemplateError::not_found(key.name(), key.lang()),
		_ => TemplateError::Io {
			path: path.to_path_buf(),
			source,
		},
	})
}

impl Default for Engine {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Engine {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Engine")
			.field("root_path", &*self.root_path.read())
			.field("frames", &*self.frames.read())
			.field("functions", &self.functions.read().keys().collect::<Vec<_>>())
			.field("debug_mode", &*self.debug_mode.read())
			.field("markup_cache", &self.markup_cache)
			.field("frame_cache", &self.frame_cache)
			.field("text_cache", &self.text_cache)
			.field("frame_status", &self.frame_validator.status())
			.finish()
	}
}
