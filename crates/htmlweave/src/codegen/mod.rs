//! JavaScript module generation.
//!
//! The generated module has three parts, concatenated by [`generate`]:
//!
//! ```text
//! // Imports
//! import ___HTML_LOADER_GET_SOURCE_FROM_IMPORT___ from "htmlweave/runtime/get-source.js";
//! import ___HTML_LOADER_IMPORT_0___ from "./logo.png";
//! // Module
//! var ___HTML_LOADER_REPLACEMENT_0___ = ___HTML_LOADER_GET_SOURCE_FROM_IMPORT___(___HTML_LOADER_IMPORT_0___);
//! var code = "<img src=\"" + ___HTML_LOADER_REPLACEMENT_0___ + "\">";
//! // Exports
//! export default code;
//! ```

mod escape;

use std::collections::{HashMap, HashSet};

use htmlweave_plugins::{Import, ImportKind, Replacement, ReplacementValue};
use thiserror::Error;

pub use self::escape::js_string_literal;

/// Binding name of the runtime source helper.
pub const SOURCE_HELPER: &str = "___HTML_LOADER_GET_SOURCE_FROM_IMPORT___";

/// Request of the runtime source helper module.
pub const DEFAULT_RUNTIME_HELPER: &str = "htmlweave/runtime/get-source.js";

/// Output flavour of the generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Emit `import`/`export default` rather than `require`/`module.exports`.
    pub es_module: bool,
    /// Export a function returning the markup instead of the markup itself.
    pub export_as_function: bool,
    /// Request used to import the runtime source helper.
    pub runtime_helper: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            es_module: true,
            export_as_function: false,
            runtime_helper: DEFAULT_RUNTIME_HELPER.to_owned(),
        }
    }
}

/// Errors raised while generating module code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GenerationError {
    /// A replacement's placeholder does not occur in the markup.
    #[error("placeholder '{id}' does not occur in the markup")]
    DanglingReplacement {
        /// The missing placeholder.
        id: String,
    },

    /// Two replacements share a placeholder.
    #[error("placeholder '{id}' is replaced more than once")]
    DuplicateReplacement {
        /// The repeated placeholder.
        id: String,
    },

    /// A replacement refers to an import binding no import declares.
    #[error("replacement '{id}' refers to undeclared import '{import_name}'")]
    UnknownImport {
        /// The replacement's placeholder.
        id: String,
        /// The missing binding.
        import_name: String,
    },

    /// A string could not be encoded as a JavaScript literal.
    #[error("failed to encode string literal: {message}")]
    Encode {
        /// Encoder failure detail.
        message: String,
    },
}

/// One piece of markup split at placeholder boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal markup.
    Text(&'a str),
    /// An exact placeholder occurrence.
    Placeholder(&'a str),
}

/// Splits `markup` at every exact occurrence of every id in `ids`.
///
/// Occurrences are taken left to right; an occurrence overlapping an earlier
/// one is treated as text. Empty text segments are omitted.
#[must_use]
pub fn split_markup<'a>(markup: &'a str, ids: &[&str]) -> Vec<Segment<'a>> {
    let mut occurrences: Vec<(usize, usize)> = ids
        .iter()
        .filter(|id| !id.is_empty())
        .flat_map(move |id| {
            markup
                .match_indices(*id)
                .map(|(start, matched)| (start, start + matched.len()))
        })
        .collect();
    occurrences.sort_unstable();

    let mut segments = Vec::new();
    let mut cursor = 0;
    for (start, end) in occurrences {
        if start < cursor {
            continue;
        }
        let (Some(text), Some(token)) = (markup.get(cursor..start), markup.get(start..end)) else {
            continue;
        };
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        segments.push(Segment::Placeholder(token));
        cursor = end;
    }
    if let Some(rest) = markup.get(cursor..).filter(|rest| !rest.is_empty()) {
        segments.push(Segment::Text(rest));
    }
    segments
}

/// Generates the import section.
///
/// Returns an empty string when there are no imports. The source helper is
/// imported only when at least one import resolves to a URL.
///
/// # Errors
///
/// Returns [`GenerationError::Encode`] if a request cannot be encoded.
pub fn import_code(imports: &[Import], options: &CodegenOptions) -> Result<String, GenerationError> {
    if imports.is_empty() {
        return Ok(String::new());
    }
    let mut code = String::from("// Imports\n");
    if imports
        .iter()
        .any(|import| import.options().kind == ImportKind::Url)
    {
        push_import(&mut code, SOURCE_HELPER, &options.runtime_helper, options)?;
    }
    for import in imports {
        push_import(&mut code, import.import_name(), import.url(), options)?;
    }
    Ok(code)
}

fn push_import(
    code: &mut String,
    binding: &str,
    request: &str,
    options: &CodegenOptions,
) -> Result<(), GenerationError> {
    let literal = js_string_literal(request)?;
    if options.es_module {
        code.push_str(&format!("import {binding} from {literal};\n"));
    } else {
        code.push_str(&format!("var {binding} = require({literal});\n"));
    }
    Ok(())
}

/// Generates the module section: one variable per replacement followed by the
/// `code` variable holding the markup with placeholders spliced out.
///
/// Import-valued replacements go through the source helper unless their
/// import is [`ImportKind::RawText`], in which case the binding is used as is.
///
/// # Errors
///
/// Returns [`GenerationError::DuplicateReplacement`] when two replacements
/// share an id, [`GenerationError::DanglingReplacement`] when an id does
/// not occur in `markup` and [`GenerationError::UnknownImport`] when a
/// replacement names a binding absent from `imports`.
pub fn module_code(
    markup: &str,
    imports: &[Import],
    replacements: &[Replacement],
) -> Result<String, GenerationError> {
    let kinds: HashMap<&str, ImportKind> = imports
        .iter()
        .map(|import| (import.import_name(), import.options().kind))
        .collect();
    let mut seen = HashSet::new();
    for replacement in replacements {
        if !seen.insert(replacement.id()) {
            return Err(GenerationError::DuplicateReplacement {
                id: replacement.id().to_owned(),
            });
        }
        if !markup.contains(replacement.id()) {
            return Err(GenerationError::DanglingReplacement {
                id: replacement.id().to_owned(),
            });
        }
    }

    let mut code = String::from("// Module\n");
    for replacement in replacements {
        let value = replacement_value(replacement, &kinds)?;
        code.push_str(&format!("var {} = {value};\n", replacement.id()));
    }

    let ids: Vec<&str> = replacements.iter().map(Replacement::id).collect();
    let mut parts = Vec::new();
    for segment in split_markup(markup, &ids) {
        match segment {
            Segment::Text(text) => parts.push(js_string_literal(text)?),
            Segment::Placeholder(id) => parts.push(id.to_owned()),
        }
    }
    let literal = if parts.is_empty() {
        String::from("\"\"")
    } else {
        parts.join(" + ")
    };
    code.push_str(&format!("var code = {literal};\n"));
    Ok(code)
}

fn replacement_value(
    replacement: &Replacement,
    kinds: &HashMap<&str, ImportKind>,
) -> Result<String, GenerationError> {
    let options = replacement.options();
    match replacement.value() {
        ReplacementValue::Expression(expression) => Ok(expression.clone()),
        ReplacementValue::Import(import_name) => {
            let Some(kind) = kinds.get(import_name.as_str()) else {
                return Err(GenerationError::UnknownImport {
                    id: replacement.id().to_owned(),
                    import_name: import_name.clone(),
                });
            };
            if *kind == ImportKind::RawText {
                return Ok(import_name.clone());
            }
            let mut fields = Vec::new();
            if let Some(hash) = &options.hash {
                fields.push(format!("hash: {}", js_string_literal(hash)?));
            }
            if options.needs_quotes {
                fields.push("maybeNeedQuotes: true".to_owned());
            }
            if fields.is_empty() {
                Ok(format!("{SOURCE_HELPER}({import_name})"))
            } else {
                Ok(format!(
                    "{SOURCE_HELPER}({import_name}, {{ {} }})",
                    fields.join(", ")
                ))
            }
        }
    }
}

/// Generates the export section.
#[must_use]
pub fn export_code(options: &CodegenOptions) -> String {
    let value = if options.export_as_function {
        "function () { return code; }"
    } else {
        "code"
    };
    if options.es_module {
        format!("// Exports\nexport default {value};")
    } else {
        format!("// Exports\nmodule.exports = {value};")
    }
}

/// Generates the complete module.
///
/// # Errors
///
/// Propagates any [`GenerationError`] from [`import_code`] or
/// [`module_code`].
pub fn generate(
    markup: &str,
    imports: &[Import],
    replacements: &[Replacement],
    options: &CodegenOptions,
) -> Result<String, GenerationError> {
    let imports_section = import_code(imports, options)?;
    let module_section = module_code(markup, imports, replacements)?;
    let exports_section = export_code(options);
    Ok(format!("{imports_section}{module_section}{exports_section}"))
}
