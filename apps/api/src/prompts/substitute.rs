//! Placeholder substitution for prompt templates.

/// Placeholder names understood by the analysis prompt.
pub const CUSTOMER_REVIEW: &str = "customerReview";
pub const PRODUCT_SERVICE_GROUP: &str = "productServiceGroup";
pub const PRODUCT_SERVICE_NAME: &str = "productServiceName";

/// Replaces every `{name}` token in `content` with the value bound to `name` in `vars`.
///
/// Matching is exact and case-sensitive. Tokens without a binding are kept verbatim and
/// bindings that never appear are ignored. The scan is single-pass: substituted values are
/// not re-scanned, so a review that happens to contain `{productServiceName}` is inserted
/// as-is.
pub fn substitute(content: &str, vars: &[(&str, &str)]) -> String {
    let tokens: Vec<(String, &str)> = vars
        .iter()
        .map(|(name, value)| (format!("{{{name}}}"), *value))
        .collect();

    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match tokens
            .iter()
            .find(|(token, _)| tail.starts_with(token.as_str()))
        {
            Some((token, value)) => {
                out.push_str(value);
                rest = &tail[token.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
