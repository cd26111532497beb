//! Browser script generation
//!
//! Emits the page script that performs the filter client side: the mapping
//! as an object literal plus a `DOMContentLoaded` handler that hides, by
//! element id, every post whose own tag list lacks the requested tag. The
//! script always uses element-id lookup regardless of the configured locator.

use crate::config::FilterConfig;
use crate::mapping::TagMapping;
use thiserror::Error;

const TEMPLATE: &str = include_str!("../res/tags.js");
const MAPPING_PLACEHOLDER: &str = "__TAG_MAPPING__";
const PARAM_PLACEHOLDER: &str = "__TAG_PARAM__";

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to encode tag mapping: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Script template is missing placeholder {0}")]
    Template(&'static str),
}

/// Render the filter script for `mapping`
pub fn render_script(mapping: &TagMapping, config: &FilterConfig) -> Result<String, ScriptError> {
    let literal = script_safe(serde_json::to_string_pretty(mapping)?);
    let param = script_safe(serde_json::to_string(&config.param)?);
    // Split once per placeholder so inserted values are never rescanned
    let (head, rest) = TEMPLATE
        .split_once(MAPPING_PLACEHOLDER)
        .ok_or(ScriptError::Template(MAPPING_PLACEHOLDER))?;
    let (middle, tail) = rest
        .split_once(PARAM_PLACEHOLDER)
        .ok_or(ScriptError::Template(PARAM_PLACEHOLDER))?;
    Ok([head, literal.as_str(), middle, param.as_str(), tail].concat())
}

/// Keep JSON from closing an enclosing `<script>` element when inlined
fn script_safe(json: String) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_embeds_mapping_and_param() {
        let mapping = TagMapping::new(vec![("posts/black_mamba.html", vec!["venomous snakes"])]).unwrap();
        let script = render_script(&mapping, &FilterConfig::default()).unwrap();
        assert!(script.contains(r#""posts/black_mamba.html": ["#));
        assert!(script.contains(r#"urlParams.get("tag")"#));
        assert!(script.contains("DOMContentLoaded"));
        assert!(!script.contains(MAPPING_PLACEHOLDER));
        assert!(!script.contains(PARAM_PLACEHOLDER));
    }

    #[test]
    fn test_placeholder_text_in_values_is_kept() {
        let mapping = TagMapping::new(vec![("posts/a.html", vec![PARAM_PLACEHOLDER])]).unwrap();
        let config = FilterConfig {
            param: MAPPING_PLACEHOLDER.to_string(),
            ..FilterConfig::default()
        };
        let script = render_script(&mapping, &config).unwrap();
        assert!(script.contains(r#""__TAG_PARAM__""#));
        assert!(script.contains(r#"urlParams.get("__TAG_MAPPING__")"#));
        assert!(script.starts_with("const tag_mapping = {"));
    }

    #[test]
    fn test_script_escapes_tags() {
        let mapping = TagMapping::new(vec![("a.html", vec![r#"say "hi" </script>"#])]).unwrap();
        let script = render_script(&mapping, &FilterConfig::default()).unwrap();
        assert!(script.contains(r#"say \"hi\" <\/script>"#));
        assert!(!script.contains("</script>"));
    }
}
