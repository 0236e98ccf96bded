// ABOUTME: Compiler-wide environment threaded through every DOM post-processor.
// ABOUTME: EnvBuilder provides a fluent API for overriding the tag width table and debug dumps.

use serde_json::{Map, Value};

use crate::consts::{TagWidth, TagWidths};

/// Per-pass options, passed through the pipeline unchanged.
pub type ProcessorOptions = Map<String, Value>;

/// Configuration shared by all passes of one pipeline run.
#[derive(Debug, Clone)]
pub struct Env {
    pub tag_widths: TagWidths,
    /// Log the serialized tree after every pass (at trace level).
    pub dump_dom: bool,
}

impl Default for Env {
    fn default() -> Self {
        Self {
            tag_widths: TagWidths::wikitext(),
            dump_dom: false,
        }
    }
}

impl Env {
    pub fn builder() -> EnvBuilder {
        EnvBuilder::new()
    }

    /// Width of `name`'s start/end tags, if the table knows the tag.
    pub fn tag_width(&self, name: &str) -> Option<TagWidth> {
        self.tag_widths.get(name)
    }
}

/// Builder for [`Env`].
#[derive(Debug, Clone, Default)]
pub struct EnvBuilder {
    env: Env,
}

impl EnvBuilder {
    /// Start from the default environment (built-in wikitext widths).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole tag width table.
    pub fn tag_widths(mut self, widths: TagWidths) -> Self {
        self.env.tag_widths = widths;
        self
    }

    /// Add or replace the widths of a single tag.
    pub fn tag_width(mut self, name: &str, width: TagWidth) -> Self {
        self.env.tag_widths.insert(name, width);
        self
    }

    /// Merge overrides into the current table.
    pub fn merge_tag_widths(mut self, overrides: &TagWidths) -> Self {
        self.env.tag_widths.merge(overrides);
        self
    }

    pub fn dump_dom(mut self, dump: bool) -> Self {
        self.env.dump_dom = dump;
        self
    }

    pub fn build(self) -> Env {
        self.env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_env_uses_wikitext_widths() {
        let env = Env::default();
        assert_eq!(env.tag_width("p"), Some(TagWidth::new(Some(0), Some(0))));
        assert!(!env.dump_dom);
    }

    #[test]
    fn test_builder_overrides() {
        let env = Env::builder()
            .tag_width("span", TagWidth::new(Some(0), Some(0)))
            .dump_dom(true)
            .build();
        assert_eq!(env.tag_width("span"), Some(TagWidth::new(Some(0), Some(0))));
        assert_eq!(env.tag_width("b"), Some(TagWidth::new(Some(3), Some(3))));
        assert!(env.dump_dom);
    }

    #[test]
    fn test_builder_replaces_table() {
        let env = Env::builder().tag_widths(TagWidths::empty()).build();
        assert_eq!(env.tag_width("p"), None);
    }
}
