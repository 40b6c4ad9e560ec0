//! Shared fixtures for integration tests

#![allow(dead_code)]

use locale_templates::{DEFAULT_FRAMES, DebugMode, Engine};
use rstest::fixture;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated template tree at `<temp>/resources/template`
pub struct TemplateRoot {
	_temp_dir: TempDir,
	root: PathBuf,
}

impl TemplateRoot {
	pub fn new() -> Self {
		let temp_dir = TempDir::new().unwrap();
		let root = temp_dir.path().join("resources").join("template");
		fs::create_dir_all(&root).unwrap();
		Self {
			_temp_dir: temp_dir,
			root,
		}
	}

	pub fn path(&self) -> &Path {
		&self.root
	}

	/// Write `<root>/<lang>/<name>.tmpl` and return its path
	pub fn write(&self, lang: &str, name: &str, content: &str) -> PathBuf {
		let path = self.root.join(lang).join(format!("{}.tmpl", name));
		fs::create_dir_all(path.parent().unwrap()).unwrap();
		fs::write(&path, content).unwrap();
		path
	}

	/// Write every default frame, each rendering its own name
	pub fn write_default_frames(&self) {
		for frame in DEFAULT_FRAMES {
			self.write("default", frame, frame);
		}
	}

	/// Engine rooted here with caching always on
	pub fn engine(&self) -> Engine {
		Engine::new()
			.with_root_path(self.path())
			.with_debug_mode(DebugMode::Forced(false))
	}

	/// Engine rooted here with debug mode always on
	pub fn debug_engine(&self) -> Engine {
		self.engine().with_debug_mode(DebugMode::Forced(true))
	}
}

#[fixture]
pub fn template_root() -> TemplateRoot {
	TemplateRoot::new()
}

/// Scoped environment changes, restored on drop
///
/// Use only from tests marked `#[serial(env_change)]`.
#[derive(Default)]
pub struct EnvGuard {
	original: Vec<(String, Option<String>)>,
}

impl EnvGuard {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_var(&mut self, key: &str, value: &str) {
		self.remember(key);
		// SAFETY: callers run under #[serial(env_change)], so no other test
		// thread touches the environment
		unsafe {
			std::env::set_var(key, value);
		}
	}

	pub fn remove_var(&mut self, key: &str) {
		self.remember(key);
		// SAFETY: callers run under #[serial(env_change)], so no other test
		// thread touches the environment
		unsafe {
			std::env::remove_var(key);
		}
	}

	fn remember(&mut self, key: &str) {
		if !self.original.iter().any(|(k, _)| k == key) {
			self.original.push((key.to_string(), std::env::var(key).ok()));
		}
	}
}

impl Drop for EnvGuard {
	fn drop(&mut self) {
		for (key, value) in self.original.drain(..) {
			// SAFETY: see set_var
			unsafe {
				match value {
					Some(value) => std::env::set_var(&key, value),
					None => std::env::remove_var(&key),
				}
			}
		}
	}
}
