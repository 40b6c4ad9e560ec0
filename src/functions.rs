//! Template function registry
//!
//! Every parsed template receives a function table made of the built-in
//! `translate` function, bound to the requested language, merged with the
//! caller supplied overrides. Overrides win on name clashes, so a caller may
//! replace `translate` itself.
//!
//! ```text
//! {{ translate(key="greeting") }}
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tera::{Function, Tera, Value};

/// Name of the built-in translation function
pub const TRANSLATE_FUNCTION: &str = "translate";

/// Argument carrying the message key of `translate`
pub const TRANSLATE_KEY_ARG: &str = "key";

/// External translation service
///
/// Any `Fn(&str, &str) -> String` closure taking `(lang, key)` is a
/// translator.
pub trait Translator: Send + Sync {
	/// Translate `key` into `lang`
	fn translate(&self, lang: &str, key: &str) -> String;
}

impl<F> Translator for F
where
	F: Fn(&str, &str) -> String + Send + Sync,
{
	fn translate(&self, lang: &str, key: &str) -> String {
		self(lang, key)
	}
}

/// Translator that returns every key untranslated
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
	fn translate(&self, _lang: &str, key: &str) -> String {
		key.to_string()
	}
}

/// A callable exposed inside templates
///
/// Cheap to clone; the same function can be registered in any number of
/// markup and text templates.
#[derive(Clone)]
pub struct TemplateFunction(Arc<dyn Function>);

impl TemplateFunction {
	/// Wrap a Tera function or closure
	///
	/// # Examples
	///
	/// ```
	/// use locale_templates::TemplateFunction;
	/// use std::collections::HashMap;
	/// use tera::Value;
	///
	/// let shout = TemplateFunction::new(|_: &HashMap<String, Value>| -> tera::Result<Value> {
	///     Ok(Value::String("OK".to_string()))
	/// });
	/// ```
	pub fn new<F>(function: F) -> Self
	where
		F: Function + 'static,
	{
		Self(Arc::new(function))
	}
}

impl Function for TemplateFunction {
	fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
		self.0.call(args)
	}

	fn is_safe(&self) -> bool {
		self.0.is_safe()
	}
}

impl fmt::Debug for TemplateFunction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("TemplateFunction")
	}
}

/// Named template functions
pub type FuncTable = HashMap<String, TemplateFunction>;

/// Build the function table for one parse
///
/// Rebuilt on every parse, never cached, so changes to `overrides` reach the
/// next template that is parsed.
pub fn build_func_table(
	translator: Arc<dyn Translator>,
	lang: &str,
	overrides: &FuncTable,
) -> FuncTable {
	let mut table = FuncTable::with_capacity(overrides.len() + 1);
	table.insert(
		TRANSLATE_FUNCTION.to_string(),
		translate_function(translator, lang),
	);
	for (name, function) in overrides {
		table.insert(name.clone(), function.clone());
	}
	table
}

/// Register every function of `table` on a Tera instance
pub(crate) fn register_all(tera: &mut Tera, table: FuncTable) {
	for (name, function) in table {
		tera.register_function(&name, function);
	}
}

fn translate_function(translator: Arc<dyn Translator>, lang: &str) -> TemplateFunction {
	let lang = lang.to_string();
	TemplateFunction::new(move |args: &HashMap<String, Value>| -> tera::Result<Value> {
		let key = args
			.get(TRANSLATE_KEY_ARG)
			.and_then(Value::as_str)
			.ok_or_else(|| {
				tera::Error::msg(format!(
					"`{}` requires a string `{}` argument",
					TRANSLATE_FUNCTION, TRANSLATE_KEY_ARG
				))
			})?;
		Ok(Value::String(translator.translate(&lang, key)))
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use tera::Context;

	fn constant(value: &'static str) -> TemplateFunction {
		TemplateFunction::new(move |_: &HashMap<String, Value>| -> tera::Result<Value> {
			Ok(Value::String(value.to_string()))
		})
	}

	fn render_with(table: FuncTable, source: &str) -> tera::Result<String> {
		let mut tera = Tera::default();
		register_all(&mut tera, table);
		tera.add_raw_template("t", source)?;
		tera.render("t", &Context::new())
	}

	#[rstest]
	fn test_translate_is_bound_to_lang() {
		let translator: Arc<dyn Translator> =
			Arc::new(|lang: &str, key: &str| format!("{}:{}", lang, key));
		let table = build_func_table(translator, "zh-TW", &FuncTable::new());

		let output = render_with(table, "{{ translate(key=\"hello\") }}").unwrap();
		assert_eq!(output, "zh-TW:hello");
	}

	#[rstest]
	fn test_identity_translator() {
		let table = build_func_table(Arc::new(IdentityTranslator), "fr", &FuncTable::new());

		let output = render_with(table, "{{ translate(key=\"Bonjour\") }}").unwrap();
		assert_eq!(output, "Bonjour");
	}

	#[rstest]
	fn test_translate_without_key_fails() {
		let table = build_func_table(Arc::new(IdentityTranslator), "fr", &FuncTable::new());

		assert!(render_with(table, "{{ translate() }}").is_err());
	}

	#[rstest]
	fn test_overrides_are_merged() {
		let mut overrides = FuncTable::new();
		overrides.insert("x".to_string(), constant("OK"));
		let table = build_func_table(Arc::new(IdentityTranslator), "en", &overrides);

		assert_eq!(table.len(), 2);
		assert_eq!(
			render_with(table, "{{ x() }}-{{ translate(key=\"k\") }}").unwrap(),
			"OK-k"
		);
	}

	#[rstest]
	fn test_override_replaces_translate() {
		let mut overrides = FuncTable::new();
		overrides.insert(TRANSLATE_FUNCTION.to_string(), constant("custom"));
		let table = build_func_table(Arc::new(IdentityTranslator), "en", &overrides);

		assert_eq!(
			render_with(table, "{{ translate(key=\"k\") }}").unwrap(),
			"custom"
		);
	}
}
