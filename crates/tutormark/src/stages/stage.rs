//! Stage type for the render pipeline.

use regex::{Captures, Regex};
use tutormark_core::{Fragment, RenderOptions};

/// Type alias for stage functions
pub type StageFn = Box<dyn Fn(Fragment, &RenderOptions) -> Fragment + Send + Sync>;

/// A named step of the render pipeline
pub struct Stage {
    /// Name used to replace or disable the stage
    pub name: String,
    /// Function that transforms the fragment
    pub apply: StageFn,
}

impl Stage {
    /// Create a new stage
    pub fn new<F>(name: &str, apply: F) -> Self
    where
        F: Fn(Fragment, &RenderOptions) -> Fragment + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            apply: Box::new(apply),
        }
    }

    /// Create a stage that rewrites every match of `pattern`
    ///
    /// The replacement closure receives the fragment so it can store the
    /// markup it produces and return tokens in its place.
    pub fn for_pattern<F>(name: &str, pattern: &'static Regex, replace: F) -> Self
    where
        F: Fn(&Captures<'_>, &mut Fragment, &RenderOptions) -> String + Send + Sync + 'static,
    {
        Self::new(name, move |fragment, options| {
            rewrite(fragment, pattern, |caps, fragment| replace(caps, fragment, options))
        })
    }

    /// Apply this stage
    pub fn run(&self, fragment: Fragment, options: &RenderOptions) -> Fragment {
        (self.apply)(fragment, options)
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage").field("name", &self.name).finish()
    }
}

/// Replace every non-overlapping match of `pattern` in the fragment text
pub fn rewrite<F>(fragment: Fragment, pattern: &Regex, mut replace: F) -> Fragment
where
    F: FnMut(&Captures<'_>, &mut Fragment) -> String,
{
    let text = fragment.text().to_string();
    let mut fragment = fragment;
    let replaced = pattern
        .replace_all(&text, |caps: &Captures<'_>| replace(caps, &mut fragment))
        .into_owned();
    fragment.with_text(replaced)
}
