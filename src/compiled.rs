//! Compiled template handles

use crate::functions::{FuncTable, register_all};
use crate::{TemplateError, TemplateResult};
use serde::Serialize;
use std::fmt;
use tera::{Context, Tera};

/// Output flavor of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
	/// HTML output; every expression is HTML escaped unless marked safe
	Markup,
	/// Plain text output; nothing is escaped
	Text,
}

impl Flavor {
	fn engine(self) -> Tera {
		let mut tera = Tera::default();
		match self {
			// Every template name ends with "", so escaping applies to all of them
			Flavor::Markup => tera.autoescape_on(vec![""]),
			Flavor::Text => tera.autoescape_on(vec![]),
		}
		tera
	}
}

/// A parsed template unit, shared read-only by every caller
///
/// A unit holds one template, or for frame composed pages the page plus its
/// frames. Rendering without naming a target renders the entry template.
pub struct CompiledTemplate {
	tera: Tera,
	entry: String,
	flavor: Flavor,
}

impl CompiledTemplate {
	/// Parse a single template source
	///
	/// # Examples
	///
	/// ```
	/// use locale_templates::{CompiledTemplate, Flavor, FuncTable};
	/// use tera::Context;
	///
	/// let template =
	///     CompiledTemplate::parse(Flavor::Markup, "hello", "<b>{{ name }}</b>", FuncTable::new())
	///         .unwrap();
	///
	/// let mut context = Context::new();
	/// context.insert("name", "a&b");
	/// assert_eq!(template.render(&context).unwrap(), "<b>a&amp;b</b>");
	/// ```
	pub fn parse(
		flavor: Flavor,
		identifier: &str,
		source: &str,
		functions: FuncTable,
	) -> TemplateResult<Self> {
		let mut tera = flavor.engine();
		register_all(&mut tera, functions);
		tera.add_raw_template(identifier, source)
			.map_err(|source| TemplateError::Parse {
				name: identifier.to_string(),
				source,
			})?;

		Ok(Self {
			tera,
			entry: identifier.to_string(),
			flavor,
		})
	}

	/// Parse several named sources into one unit whose entry is `entry`
	///
	/// Sources may reference each other by name, e.g. `{% include "_main" %}`.
	pub fn parse_multi<N, C>(
		flavor: Flavor,
		entry: &str,
		sources: impl IntoIterator<Item = (N, C)>,
		functions: FuncTable,
	) -> TemplateResult<Self>
	where
		N: AsRef<str>,
		C: AsRef<str>,
	{
		let mut tera = flavor.engine();
		register_all(&mut tera, functions);
		tera.add_raw_templates(sources)
			.map_err(|source| TemplateError::Parse {
				name: entry.to_string(),
				source,
			})?;

		if !tera.get_template_names().any(|name| name == entry) {
			return Err(TemplateError::InvalidEngine(format!(
				"entry template {} missing from compiled unit",
				entry
			)));
		}

		Ok(Self {
			tera,
			entry: entry.to_string(),
			flavor,
		})
	}

	/// Render the entry template
	pub fn render(&self, context: &Context) -> TemplateResult<String> {
		self.render_target(&self.entry, context)
	}

	/// Render a named template of this unit
	pub fn render_target(&self, target: &str, context: &Context) -> TemplateResult<String> {
		self.tera
			.render(target, context)
			.map_err(|source| TemplateError::Render {
				name: target.to_string(),
				source,
			})
	}

	/// Render the entry template with any serializable data as context
	pub fn render_serialize<S: Serialize>(&self, data: &S) -> TemplateResult<String> {
		let context = Context::from_serialize(data).map_err(|source| TemplateError::Render {
			name: self.entry.clone(),
			source,
		})?;
		self.render(&context)
	}

	/// Name of the entry template
	pub fn name(&self) -> &str {
		&self.entry
	}

	/// Output flavor
	pub fn flavor(&self) -> Flavor {
		self.flavor
	}

	/// Names of every template in this unit
	pub fn template_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.tera.get_template_names().collect();
		names.sort_unstable();
		names
	}
}

impl fmt::Debug for CompiledTemplate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CompiledTemplate")
			.field("entry", &self.entry)
			.field("flavor", &self.flavor)
			.field("templates", &self.template_names())
			.finish()
	}
}
