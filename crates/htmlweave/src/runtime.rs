//! JavaScript runtime support shipped alongside generated modules.

/// Source of the helper module imported as
/// [`DEFAULT_RUNTIME_HELPER`](crate::codegen::DEFAULT_RUNTIME_HELPER).
///
/// The helper unwraps ES module interop objects, re-appends the URL fragment
/// and quotes values that would break an unquoted attribute.
pub const GET_SOURCE_RUNTIME: &str = r#"module.exports = function (url, options) {
  if (!options) {
    options = {};
  }
  if (!url) {
    return url;
  }
  url = String(url.__esModule ? url.default : url);
  if (options.hash) {
    url += options.hash;
  }
  if (options.maybeNeedQuotes && /[\t\n\f\r "'=<>`]/.test(url)) {
    return '"' + url + '"';
  }
  return url;
};
"#;
