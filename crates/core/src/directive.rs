//! Form placement directives embedded in page content.
//!
//! A page author places the public form with `[leads-form]`, optionally
//! carrying form options as attributes:
//!
//! ```text
//! [leads-form label-name="Your name" max-name="100" rows-message='8']
//! ```

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::form::{render_public_form, FormAttributes, FormConfig};

/// Name of the directive tag.
pub const DIRECTIVE_TAG: &str = "leads-form";

static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\[{DIRECTIVE_TAG}(?P<attrs>(?:\s[^\]]*)?)\]")).expect("valid regex")
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?P<key>[\w-]+)\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^\s"']+))"#)
        .expect("valid regex")
});

/// Parse the attribute list of one directive.
pub fn parse_attributes(raw: &str) -> FormAttributes {
    let pairs: Vec<(&str, &str)> = ATTR_RE
        .captures_iter(raw)
        .filter_map(|caps| {
            let key = caps.name("key")?.as_str();
            let value = caps
                .name("dq")
                .or_else(|| caps.name("sq"))
                .or_else(|| caps.name("bare"))?
                .as_str();
            Some((key, value))
        })
        .collect();
    FormAttributes::from_pairs(pairs)
}

/// Replace every form directive in `content` with the rendered public form.
///
/// Content without directives is returned unchanged.
pub fn expand_directives(content: &str, token: &str) -> String {
    DIRECTIVE_RE
        .replace_all(content, |caps: &Captures<'_>| {
            let attrs = parse_attributes(caps.name("attrs").map_or("", |m| m.as_str()));
            render_public_form(&FormConfig::from(attrs), token)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_quoting_styles() {
        let attrs = parse_attributes(r#" label-name="Your name" max-name='100' rows-message=8"#);
        assert_eq!(attrs.label_name.as_deref(), Some("Your name"));
        assert_eq!(attrs.max_name.as_deref(), Some("100"));
        assert_eq!(attrs.rows_message.as_deref(), Some("8"));
    }

    #[test]
    fn bare_directive_expands_to_default_form() {
        let html = expand_directives("<p>Contact us</p>[leads-form]<p>bye</p>", "tok");
        assert!(html.starts_with("<p>Contact us</p><!-- leads-form start -->"));
        assert!(html.ends_with("<!-- leads-form end -->\n<p>bye</p>"));
        assert!(html.contains(r#"maxlength="70""#));
        assert!(html.contains(r#"value="tok""#));
    }

    #[test]
    fn directive_attributes_configure_form() {
        let html = expand_directives(r#"[leads-form label-email="Work email" max-email="abc"]"#, "t");
        assert!(html.contains(">Work email</label>"));
        assert!(html.contains(r#"maxlength="50""#));
    }

    #[test]
    fn content_without_directive_is_unchanged() {
        let content = "[leads-formx] and [other-form] stay put";
        assert_eq!(expand_directives(content, "t"), content);
    }

    #[test]
    fn directive_is_recognised_by_its_tag_name() {
        let content = format!("[{DIRECTIVE_TAG} label-name=\"Who\"]");
        let html = expand_directives(&content, "t");
        assert!(html.contains(">Who</label>"));
        assert!(!html.contains(&content));
    }

    #[test]
    fn every_directive_is_expanded() {
        let html = expand_directives("[leads-form][leads-form]", "t");
        assert_eq!(html.matches("<!-- leads-form start -->").count(), 2);
    }
}
