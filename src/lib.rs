//! # Locale Templates
//!
//! Language aware template loading and caching on top of Tera.
//!
//! Templates are looked up as `{root}/{lang}/{name}.tmpl`, falling back from
//! a region tag to its base language and finally to `{root}/default`. Parsed
//! templates are cached per `(name, language)` and shared between callers.
//!
//! ## Features
//!
//! - Three tier language fallback: `zh-TW` → `zh` → `default`
//! - Markup (HTML escaped) and text flavors with independent caches
//! - Frame composed pages: a page plus the shared `_main`, header and
//!   footer frames parsed into one unit
//! - Built-in `translate` function plus caller registered functions
//! - Debug mode (`LOCALE_TEMPLATES_DEBUG=true`) reparsing on every load
//! - Isolated [`Engine`] instances and a process-wide default engine
//!
//! ## Example
//!
//! ```rust,no_run
//! use locale_templates::{Engine, TemplateError};
//! use tera::Context;
//!
//! let engine = Engine::new().with_root_path("./resources/template");
//!
//! match engine.load_frame_template("index", "zh-TW") {
//!     Ok(page) => println!("{}", page.render(&Context::new()).unwrap()),
//!     Err(TemplateError::NotFound { .. }) => println!("fallback page"),
//!     Err(e) => eprintln!("template error: {}", e),
//! }
//! ```

pub mod cache;
pub mod compiled;
pub mod debug;
pub mod engine;
pub mod error;
pub mod frames;
pub mod functions;
pub mod global;
pub mod resolver;
pub mod settings;

pub use cache::{CacheKey, CacheStatistics, TemplateCache};
pub use compiled::{CompiledTemplate, Flavor};
pub use debug::{DEBUG_ENV_VAR, DebugMode, LEGACY_DEBUG_ENV_VAR};
pub use engine::{CacheKind, Engine};
pub use error::{TemplateError, TemplateResult};
pub use frames::{DEFAULT_FRAMES, FrameStatus, FrameValidator};
pub use functions::{
	FuncTable, IdentityTranslator, TRANSLATE_FUNCTION, TemplateFunction, Translator,
	build_func_table,
};
pub use global::{
	default_engine, load_frame_template, load_markup_template, load_text_template,
	register_function, set_frames, set_functions, set_root_path, set_translator,
};
pub use resolver::{DEFAULT_LANGUAGE_DIR, PathResolver, TEMPLATE_EXTENSION};
pub use settings::TemplateSettings;

// Re-exported so callers can build contexts and functions without a direct dependency
pub use tera;
