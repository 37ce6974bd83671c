//! Shared test support and behaviour tests for the loader.


use std::collections::HashMap;

use htmlweave_plugins::{ResolveError, TransformError};

use crate::LoaderContext;

/// Loader context that records emitted errors and refuses requests ending
/// with any of `missing`.
#[derive(Debug, Default)]
pub(crate) struct RecordingContext {
    pub(crate) resource_path: String,
    pub(crate) missing: Vec<String>,
    pub(crate) production: bool,
    pub(crate) errors: Vec<TransformError>,
}

impl RecordingContext {
    pub(crate) fn new(resource_path: &str) -> Self {
        Self {
            resource_path: resource_path.to_owned(),
            ..Self::default()
        }
    }

    pub(crate) fn production(mut self) -> Self {
        self.production = true;
        self
    }

    pub(crate) fn with_missing(mut self, request: &str) -> Self {
        self.missing.push(request.to_owned());
        self
    }
}

impl LoaderContext for RecordingContext {
    fn resource_path(&self) -> &str {
        &self.resource_path
    }

    fn resolve(&self, request: &str) -> Result<String, ResolveError> {
        if self.missing.iter().any(|missing| request.ends_with(missing.as_str())) {
            Err(ResolveError::not_found(request))
        } else {
            Ok(request.to_owned())
        }
    }

    fn emit_error(&mut self, error: &TransformError) {
        self.errors.push(error.clone());
    }

    fn is_production(&self) -> bool {
        self.production
    }
}

/// Evaluates the `var code = ...;` statement of a generated module, binding
/// each placeholder variable to the given value.
///
/// Panics when the module has no such statement or references an unbound
/// variable.
pub(crate) fn evaluate_code(module: &str, bindings: &HashMap<&str, &str>) -> String {
    let line = module
        .lines()
        .find_map(|line| line.strip_prefix("var code = "))
        .expect("module declares code");
    let mut rest = line.strip_suffix(';').expect("statement terminator");
    let mut out = String::new();
    loop {
        rest = rest.trim_start();
        if rest.starts_with('"') {
            let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<String>();
            let text = stream
                .next()
                .expect("string literal")
                .expect("valid string literal");
            out.push_str(&text);
            rest = rest.get(stream.byte_offset()..).expect("offset in bounds");
        } else {
            let end = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            let (name, tail) = rest.split_at(end);
            let value = bindings
                .get(name)
                .unwrap_or_else(|| panic!("unbound variable {name}"));
            out.push_str(value);
            rest = tail;
        }
        match rest.trim_start().strip_prefix('+') {
            Some(tail) => rest = tail,
            None => break,
        }
    }
    out
}
