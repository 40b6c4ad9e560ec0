//! Process-wide default engine
//!
//! The functions in this module forward to one lazily created [`Engine`]
//! built from default settings. Configure it before serving concurrent
//! traffic; code that needs isolation should construct its own engine.

use crate::functions::{FuncTable, Translator};
use crate::{CompiledTemplate, Engine, TemplateResult};
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::Arc;
use tera::Function;

static DEFAULT_ENGINE: Lazy<Engine> = Lazy::new(Engine::new);

/// The process-wide default engine
pub fn default_engine() -> &'static Engine {
	&DEFAULT_ENGINE
}

/// Load a markup template with the default engine
pub fn load_markup_template(name: &str, lang: &str) -> TemplateResult<Arc<CompiledTemplate>> {
	DEFAULT_ENGINE.load_markup_template(name, lang)
}

/// Load a frame composed markup page with the default engine
pub fn load_frame_template(name: &str, lang: &str) -> TemplateResult<Arc<CompiledTemplate>> {
	DEFAULT_ENGINE.load_frame_template(name, lang)
}

/// Load a text template with the default engine
pub fn load_text_template(name: &str, lang: &str) -> TemplateResult<Arc<CompiledTemplate>> {
	DEFAULT_ENGINE.load_text_template(name, lang)
}

/// Replace the template root of the default engine
pub fn set_root_path(root_path: impl Into<PathBuf>) {
	DEFAULT_ENGINE.set_root_path(root_path);
}

/// Replace the frame set of the default engine
pub fn set_frames<I, S>(frames: I)
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	DEFAULT_ENGINE.set_frames(frames);
}

/// Replace the caller supplied functions of the default engine
pub fn set_functions(functions: FuncTable) {
	DEFAULT_ENGINE.set_functions(functions);
}

/// Register one function on the default engine
pub fn register_function<F>(name: impl Into<String>, function: F)
where
	F: Function + 'static,
{
	DEFAULT_ENGINE.register_function(name, function);
}

/// Replace the translation service of the default engine
pub fn set_translator<T>(translator: T)
where
	T: Translator + 'static,
{
	DEFAULT_ENGINE.set_translator(translator);
}
