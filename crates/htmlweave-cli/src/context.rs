//! Filesystem-backed loader context.

use std::path::{Path, PathBuf};

use htmlweave::{LoaderContext, ResolveError, TransformError};
use tracing::trace;

/// Resolves requests against files next to the input document and collects
/// transform errors for reporting once the load finishes.
#[derive(Debug)]
pub(crate) struct FsContext {
    resource_path: String,
    base_dir: PathBuf,
    production: bool,
    errors: Vec<TransformError>,
}

impl FsContext {
    pub(crate) fn new(input: &Path, production: bool) -> Self {
        let base_dir = input
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Self {
            resource_path: input.display().to_string(),
            base_dir,
            production,
            errors: Vec::new(),
        }
    }

    pub(crate) fn errors(&self) -> &[TransformError] {
        &self.errors
    }

    fn locate(&self, request: &str) -> PathBuf {
        let target = request
            .rsplit_once('!')
            .map_or(request, |(_, target)| target);
        let path = target
            .split_once(['?', '#'])
            .map_or(target, |(path, _)| path);
        if path.starts_with('/') {
            PathBuf::from(path)
        } else {
            self.base_dir.join(path)
        }
    }
}

impl LoaderContext for FsContext {
    fn resource_path(&self) -> &str {
        &self.resource_path
    }

    fn resolve(&self, request: &str) -> Result<String, ResolveError> {
        let candidate = self.locate(request);
        trace!(
            target: "htmlweave::cli",
            request,
            candidate = %candidate.display(),
            "resolving request"
        );
        if candidate.is_file() {
            Ok(request.to_owned())
        } else {
            Err(ResolveError::not_found(request))
        }
    }

    fn emit_error(&mut self, error: &TransformError) {
        self.errors.push(error.clone());
    }

    fn is_production(&self) -> bool {
        self.production
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    #[case("./logo.png")]
    #[case("./logo.png?size=2")]
    #[case("./logo.png#frag")]
    #[case("raw!./logo.png")]
    fn existing_files_resolve_to_the_request(#[case] request: &str) {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("logo.png"), b"png").expect("write");
        let context = FsContext::new(&dir.path().join("index.html"), false);

        assert_eq!(context.resolve(request).as_deref(), Ok(request));
    }

    #[test]
    fn missing_files_are_not_found() {
        let dir = TempDir::new().expect("temp dir");
        let context = FsContext::new(&dir.path().join("index.html"), false);

        let error = context.resolve("./gone.png").expect_err("missing");

        assert_eq!(error, ResolveError::not_found("./gone.png"));
    }

    #[test]
    fn bare_file_names_resolve_from_the_working_directory() {
        let context = FsContext::new(Path::new("index.html"), true);
        assert_eq!(context.base_dir, PathBuf::from("."));
        assert!(context.is_production());
    }
}
