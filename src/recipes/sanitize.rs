use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use pulldown_cmark::{html, Options, Parser};

/// Render markdown to HTML and strip everything outside the allow-list.
///
/// Starts from ammonia's default tag set plus `img`. Attributes are limited
/// to `href`/`name`/`target` on `a` and `src`/`alt` on `img`; no other tag
/// keeps any attribute, and no `rel` is added to links. Script and style
/// contents are dropped entirely.
pub fn to_safe_html(markdown: &str) -> String {
    if markdown.trim().is_empty() {
        return String::new();
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut raw_html = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut raw_html, parser);

    SANITIZER.clean(&raw_html).to_string()
}

static SANITIZER: LazyLock<ammonia::Builder<'static>> = LazyLock::new(|| {
    let tag_attributes: HashMap<&str, HashSet<&str>> = HashMap::from([
        ("a", HashSet::from(["href", "name", "target"])),
        ("img", HashSet::from(["src", "alt"])),
    ]);

    let mut builder = ammonia::Builder::default();
    builder
        .add_tags(["img"])
        .tag_attributes(tag_attributes)
        .generic_attributes(HashSet::new())
        .link_rel(None);
    builder
});
