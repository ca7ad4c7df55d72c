//! Tag directives: `{% gist collection_id [selector] %}` and its variants.

use regex::Regex;
use std::sync::LazyLock;

use super::html;
use super::resolver::{ResolveOptions, SnippetReference, SnippetResolver};

/// Collection id is the first alphanumeric run; everything after the next
/// whitespace is the selector.
static DIRECTIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9]+)(?:\s+(.+))?").expect("DIRECTIVE_REGEX must compile")
});

/// The registered tag names, each a fixed cache policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TagKind {
    /// Normal cached render.
    #[default]
    #[value(name = "gist")]
    Gist,
    /// One-off render that neither reads nor writes the cache.
    #[value(name = "gistnocache")]
    GistNoCache,
    /// Ignore the cached copy but store the fresh one.
    #[value(name = "gistbust")]
    GistBust,
}

impl TagKind {
    pub const ALL: [TagKind; 3] = [TagKind::Gist, TagKind::GistNoCache, TagKind::GistBust];

    /// Name the tag is registered under.
    pub fn name(&self) -> &'static str {
        match self {
            TagKind::Gist => "gist",
            TagKind::GistNoCache => "gistnocache",
            TagKind::GistBust => "gistbust",
        }
    }

    /// Look a tag up by its registered name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Resolution options for this tag under the site's revalidation setting.
    pub fn options(&self, revalidate: bool) -> ResolveOptions {
        ResolveOptions {
            revalidate,
            bypass_cache: matches!(self, TagKind::GistNoCache),
            force_refresh: matches!(self, TagKind::GistBust),
        }
    }
}

/// Parse directive text into a reference. `None` when there is no id.
pub fn parse_directive(text: &str) -> Option<SnippetReference> {
    let caps = DIRECTIVE_REGEX.captures(text)?;
    let collection_id = caps.get(1)?.as_str();
    let selector = caps.get(2).map_or("", |m| m.as_str().trim());
    Some(SnippetReference::new(collection_id, selector))
}

/// Renders tag directives to HTML for a site build.
pub struct TagRenderer<'a> {
    resolver: SnippetResolver<'a>,
    revalidate: bool,
}

impl<'a> TagRenderer<'a> {
    /// `revalidate` is the site-wide "check for remote updates" setting.
    pub fn new(resolver: SnippetResolver<'a>, revalidate: bool) -> Self {
        Self {
            resolver,
            revalidate,
        }
    }

    /// Render one directive.
    ///
    /// Never fails: unparseable text renders as nothing, and a failed
    /// resolution renders as an inline error marker (the cause is logged).
    pub fn render(&self, kind: TagKind, text: &str) -> String {
        let Some(reference) = parse_directive(text) else {
            return String::new();
        };

        match self.resolver.resolve(&reference, kind.options(self.revalidate)) {
            Ok(snippet) => html::figure(&snippet),
            Err(e) => {
                tracing::error!("{} ({} tag): {}", e, kind.name(), e.source);
                html::error_marker(&e.collection_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_id_only() {
        let r = parse_directive("d9719a4f53ec3ffd62ebb89359058529").unwrap();
        assert_eq!(r.collection_id, "d9719a4f53ec3ffd62ebb89359058529");
        assert_eq!(r.selector, "");
    }

    #[test]
    fn parses_id_and_selector() {
        let r = parse_directive(" abc123 fish_prompt.fish  ").unwrap();
        assert_eq!(r.collection_id, "abc123");
        assert_eq!(r.selector, "fish_prompt.fish");
    }

    #[test]
    fn selector_keeps_inner_spaces() {
        let r = parse_directive("abc123 my file.txt").unwrap();
        assert_eq!(r.selector, "my file.txt");
    }

    #[test]
    fn no_id_parses_to_none() {
        assert!(parse_directive("   ").is_none());
        assert!(parse_directive("--- ???").is_none());
    }

    #[test]
    fn tag_names_round_trip() {
        for kind in TagKind::ALL {
            assert_eq!(TagKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(TagKind::from_name("gistify"), None);
    }

    #[test]
    fn tag_options() {
        assert_eq!(TagKind::Gist.options(false), ResolveOptions::default());

        let nocache = TagKind::GistNoCache.options(true);
        assert!(nocache.bypass_cache && !nocache.force_refresh && nocache.revalidate);

        let bust = TagKind::GistBust.options(false);
        assert!(bust.force_refresh && !bust.bypass_cache && !bust.revalidate);
    }
}
