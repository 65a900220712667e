//! Stage pipeline for Markdown to HTML rendering.

mod builtin;
mod stage;

pub use builtin::{
    block_stages, inline_stages, EMPHASIS, FENCED_CODE, INLINE_CODE, LINK, LIST, PARAGRAPH,
    STRONG,
};
pub use stage::{rewrite, Stage, StageFn};

use indexmap::IndexMap;

/// Ordered collection of render stages
pub struct Stages {
    /// Built-in stages that run before user stages
    inline_stages: Vec<Stage>,
    /// User stages, keyed by name, in insertion order
    custom_stages: IndexMap<String, Stage>,
    /// Built-in stages that run after user stages
    block_stages: Vec<Stage>,
    /// Names of stages that are skipped
    disabled: Vec<String>,
}

impl Stages {
    /// Create a new Stages instance with the built-in stages
    pub fn new() -> Self {
        Self {
            inline_stages: inline_stages(),
            custom_stages: IndexMap::new(),
            block_stages: block_stages(),
            disabled: Vec::new(),
        }
    }

    /// Add a user stage
    ///
    /// A stage registered under a built-in name replaces that built-in in
    /// place. Any other stage runs after the built-in inline stages.
    pub fn add(&mut self, key: &str, stage: Stage) {
        self.custom_stages.insert(key.to_string(), stage);
    }

    /// Skip the stage with the given name
    pub fn disable(&mut self, name: &str) {
        if !self.is_disabled(name) {
            self.disabled.push(name.to_string());
        }
    }

    /// Run a previously disabled stage again
    pub fn enable(&mut self, name: &str) {
        self.disabled.retain(|n| n != name);
    }

    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.iter().any(|n| n == name)
    }

    /// Stages in execution order, with replacements applied and disabled
    /// stages left out
    pub fn iter(&self) -> impl Iterator<Item = &Stage> + '_ {
        let inline = self
            .inline_stages
            .iter()
            .map(move |s| (s.name.as_str(), self.resolve(s)));
        let custom = self
            .custom_stages
            .iter()
            .filter(move |(key, _)| !self.is_builtin(key))
            .map(|(key, stage)| (key.as_str(), stage));
        let block = self
            .block_stages
            .iter()
            .map(move |s| (s.name.as_str(), self.resolve(s)));

        inline
            .chain(custom)
            .chain(block)
            .filter(move |(key, _)| !self.is_disabled(key))
            .map(|(_, stage)| stage)
    }

    /// Names of the stages in execution order
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|s| s.name.as_str()).collect()
    }

    fn resolve<'a>(&'a self, builtin: &'a Stage) -> &'a Stage {
        self.custom_stages.get(&builtin.name).unwrap_or(builtin)
    }

    fn is_builtin(&self, name: &str) -> bool {
        self.inline_stages
            .iter()
            .chain(self.block_stages.iter())
            .any(|s| s.name == name)
    }
}

impl Default for Stages {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn noop(name: &str) -> Stage {
        Stage::new(name, |fragment, _| fragment)
    }

    #[test]
    fn test_builtin_order() {
        let stages = Stages::new();
        assert_eq!(
            stages.names(),
            vec![FENCED_CODE, INLINE_CODE, STRONG, EMPHASIS, LINK, LIST, PARAGRAPH]
        );
    }

    #[test]
    fn test_custom_stage_runs_before_block_stages() {
        let mut stages = Stages::new();
        stages.add("strike", noop("strike"));
        assert_eq!(
            stages.names(),
            vec![FENCED_CODE, INLINE_CODE, STRONG, EMPHASIS, LINK, "strike", LIST, PARAGRAPH]
        );
    }

    #[test]
    fn test_custom_stage_replaces_builtin_in_place() {
        let mut stages = Stages::new();
        stages.add(LINK, noop("plain_links"));
        let names = stages.names();
        assert_eq!(names[4], "plain_links");
        assert_eq!(names.len(), 7);
    }

    #[test]
    fn test_disable_and_enable() {
        let mut stages = Stages::new();
        stages.disable(PARAGRAPH);
        stages.disable(PARAGRAPH);
        assert!(!stages.names().contains(&PARAGRAPH));
        stages.enable(PARAGRAPH);
        assert_eq!(stages.names().last(), Some(&PARAGRAPH));
    }
}
