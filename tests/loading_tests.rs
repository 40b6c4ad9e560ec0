//! Markup and text template loading through an isolated engine

mod helpers;

use helpers::{TemplateRoot, template_root};
use locale_templates::{CompiledTemplate, FuncTable, TemplateError, TemplateFunction};
use rstest::rstest;
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use tera::{Context, Value};

fn render(template: &CompiledTemplate) -> String {
	template.render(&Context::new()).unwrap()
}

fn constant(
	value: &'static str,
) -> impl Fn(&HashMap<String, Value>) -> tera::Result<Value> + Send + Sync {
	move |_: &HashMap<String, Value>| -> tera::Result<Value> { Ok(Value::from(value)) }
}

#[rstest]
fn test_markup_falls_back_to_base_language(template_root: TemplateRoot) {
	template_root.write("zh", "hello", "Z");

	let template = template_root
		.engine()
		.load_markup_template("hello", "zh-TW")
		.unwrap();
	assert_eq!(render(&template), "Z");
}

#[rstest]
fn test_markup_falls_back_to_default(template_root: TemplateRoot) {
	template_root.write("default", "hello", "D");

	let template = template_root
		.engine()
		.load_markup_template("hello", "fr-FR")
		.unwrap();
	assert_eq!(render(&template), "D");
}

#[rstest]
fn test_exact_language_preferred(template_root: TemplateRoot) {
	template_root.write("default", "hello", "D");
	template_root.write("zh", "hello", "Z");
	template_root.write("zh-TW", "hello", "TW");
	let engine = template_root.engine();

	assert_eq!(render(&engine.load_markup_template("hello", "zh-TW").unwrap()), "TW");
	assert_eq!(render(&engine.load_markup_template("hello", "zh-CN").unwrap()), "Z");
	assert_eq!(render(&engine.load_markup_template("hello", "zh").unwrap()), "Z");
	assert_eq!(render(&engine.load_markup_template("hello", "ko").unwrap()), "D");
}

#[rstest]
#[case("en-US")]
#[case("en")]
#[case("")]
fn test_markup_not_found(template_root: TemplateRoot, #[case] lang: &str) {
	let result = template_root.engine().load_markup_template("missing", lang);

	match result {
		Err(TemplateError::NotFound { name, lang: got }) => {
			assert_eq!(name, "missing");
			assert_eq!(got, lang);
		}
		other => panic!("expected NotFound, got {:?}", other),
	}
}

#[rstest]
fn test_text_not_found(template_root: TemplateRoot) {
	let err = template_root
		.engine()
		.load_text_template("missing", "en-US")
		.unwrap_err();

	assert!(err.is_not_found());
}

#[rstest]
fn test_markup_cache_ignores_file_changes(template_root: TemplateRoot) {
	let path = template_root.write("default", "hello", "v1");
	let engine = template_root.engine();

	let first = engine.load_markup_template("hello", "en-US").unwrap();
	assert_eq!(render(&first), "v1");

	fs::write(&path, "v2").unwrap();
	let second = engine.load_markup_template("hello", "en-US").unwrap();

	assert!(Arc::ptr_eq(&first, &second));
	assert_eq!(render(&second), "v1");
}

#[rstest]
fn test_text_basic(template_root: TemplateRoot) {
	template_root.write("default", "hello", "hi");

	let template = template_root
		.engine()
		.load_text_template("hello", "en-US")
		.unwrap();
	assert_eq!(render(&template), "hi");
}

#[rstest]
fn test_markup_function_table(template_root: TemplateRoot) {
	template_root.write("default", "hello", "{{ x() }}");
	let engine = template_root.engine().with_function("x", constant("OK"));

	let template = engine.load_markup_template("hello", "en-US").unwrap();
	assert_eq!(render(&template), "OK");
}

#[rstest]
fn test_text_function_table(template_root: TemplateRoot) {
	template_root.write("default", "hello", "{{ x() }}");
	let engine = template_root.engine();
	let mut functions = FuncTable::new();
	functions.insert("x".to_string(), TemplateFunction::new(constant("OK")));
	engine.set_functions(functions);

	let template = engine.load_text_template("hello", "en-US").unwrap();
	assert_eq!(render(&template), "OK");
}

#[rstest]
fn test_translate_builtin(template_root: TemplateRoot) {
	template_root.write("default", "greeting", "{{ translate(key=\"Hello\") }}, {{ name }}");
	let engine = template_root.engine().with_translator(|lang: &str, key: &str| {
		match (lang, key) {
			("fr-FR", "Hello") => "Bonjour".to_string(),
			_ => key.to_string(),
		}
	});
	let mut context = Context::new();
	context.insert("name", "Alice");

	let fr = engine.load_markup_template("greeting", "fr-FR").unwrap();
	let de = engine.load_markup_template("greeting", "de-DE").unwrap();

	assert_eq!(fr.render(&context).unwrap(), "Bonjour, Alice");
	assert_eq!(de.render(&context).unwrap(), "Hello, Alice");
}

#[rstest]
fn test_isolated_engines(template_root: TemplateRoot) {
	let path = template_root.write("default", "hello", "v1");
	let first_engine = template_root.engine();
	let first = first_engine.load_text_template("hello", "en").unwrap();

	fs::write(&path, "v2").unwrap();
	let second_engine = template_root.engine();
	let second = second_engine.load_text_template("hello", "en").unwrap();

	assert_eq!(render(&first), "v1");
	assert_eq!(render(&second), "v2");
}

#[rstest]
fn test_root_path_change_applies_to_uncached_loads(template_root: TemplateRoot) {
	let other = TemplateRoot::new();
	template_root.write("default", "a", "first root");
	other.write("default", "b", "second root");
	let engine = template_root.engine();

	assert_eq!(render(&engine.load_text_template("a", "en").unwrap()), "first root");
	engine.set_root_path(other.path());
	assert_eq!(render(&engine.load_text_template("b", "en").unwrap()), "second root");
	assert!(engine.load_text_template("c", "en").unwrap_err().is_not_found());
}
