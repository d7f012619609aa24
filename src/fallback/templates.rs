//! Generic answer templates used when no topic matches.

use crate::types::ResponseType;

/// Interpolation point replaced by the caller's raw input.
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Per-type template sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenericTemplatePool {
    explain: &'static [&'static str],
    joke: &'static [&'static str],
    riddle: &'static [&'static str],
    solve: &'static [&'static str],
}

impl GenericTemplatePool {
    pub const fn new(
        explain: &'static [&'static str],
        joke: &'static [&'static str],
        riddle: &'static [&'static str],
        solve: &'static [&'static str],
    ) -> Self {
        Self {
            explain,
            joke,
            riddle,
            solve,
        }
    }

    /// Templates for `kind`, or the `explain` templates when `kind` has none.
    pub fn templates_for(&self, kind: ResponseType) -> &'static [&'static str] {
        let templates = match kind {
            ResponseType::Explain => self.explain,
            ResponseType::Joke => self.joke,
            ResponseType::Riddle => self.riddle,
            ResponseType::Solve => self.solve,
        };
        if templates.is_empty() {
            self.explain
        } else {
            templates
        }
    }
}

/// Substitute every placeholder in `template` with `input`, verbatim.
///
/// The input is not re-scanned, so an input that itself contains
/// `{input}` is embedded as-is.
pub fn render(template: &str, input: &str) -> String {
    template.replace(INPUT_PLACEHOLDER, input)
}

const EXPLAIN: &[&str] = &[
    "🌟 Hi! I'm Dobby! Let me think about \"{input}\"... This is something that works in a special way! Imagine you're building something amazing - every part has to work together perfectly! That's exactly how \"{input}\" works - it has different pieces that all help each other to create something wonderful! It's like magic, but it follows rules that make sense! ✨",
    "Hello friend! 🎭 \"{input}\" is fascinating! Think of it like your favorite story - it has a beginning, middle, and end, and everything connects together! The cool thing about \"{input}\" is that once you understand how it works, you can use that knowledge to understand other things too! It's like learning a secret code! 🗝️",
];

const JOKE: &[&str] = &[
    "😄 Here's a Dobby special! What makes \"{input}\" so great? It's always there when you need it most! Just like how socks always disappear when you need them - but \"{input}\" is the opposite, it appears when you're curious about it! *giggles* I love curious minds! 🧦✨",
    "🎭 Knock knock! Who's there? Someone who wants to learn about \"{input}\"! And you know what? That's the best kind of person - curious and ready to discover new things! Just like how I discovered that helping others makes me happy! 😊🌟",
];

const RIDDLE: &[&str] = &[
    "🧩 Here's a riddle for you! I'm something you can learn about, something you can think about, and something that becomes clearer the more you explore me. I'm related to \"{input}\" and I grow stronger in your mind the more attention you give me! What am I? *Answer: Understanding!* When you truly understand \"{input}\", you unlock a new superpower! 🌟",
    "🎯 Riddle time! I start as a question in your curious mind, I grow when you seek and search to find. I'm all about \"{input}\" and I shine so bright, when you discover me, everything feels right! What am I? *Answer: Knowledge!* The most magical treasure of all! ✨📚",
];

const SOLVE: &[&str] = &[
    "🔧 Let's solve this together! First, let's break \"{input}\" down into smaller, easier pieces - like sorting toys into different boxes! Step 1: What do we already know? Step 2: What do we want to find out? Step 3: How can we connect what we know to what we want to learn? It's like being a detective, but for knowledge! 🕵️✨",
    "💡 Problem-solving time! \"{input}\" might seem big and complicated, but every expert was once a beginner! Let's start simple: What's the most important thing about \"{input}\"? Then we'll build on that, like stacking blocks to make a tower! Each new thing we learn makes us stronger! 🏗️🌟",
];

/// The template pool Dobby ships with.
pub static GENERIC_TEMPLATES: GenericTemplatePool =
    GenericTemplatePool::new(EXPLAIN, JOKE, RIDDLE, SOLVE);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_interpolates_input() {
        for kind in ResponseType::ALL {
            let templates = GENERIC_TEMPLATES.templates_for(kind);
            assert!(templates.len() >= 2, "{} pool too small", kind);
            for template in templates {
                assert!(template.contains(INPUT_PLACEHOLDER));
            }
        }
    }

    #[test]
    fn test_render_replaces_every_placeholder() {
        let out = render("a {input} b {input}", "X");
        assert_eq!(out, "a X b X");
    }

    #[test]
    fn test_render_keeps_input_verbatim() {
        let out = render("<{input}>", "  <b>{input}</b> ");
        assert_eq!(out, "<  <b>{input}</b> >");
    }

    #[test]
    fn test_empty_sequence_uses_explain() {
        let pool = GenericTemplatePool::new(&["e {input}"], &[], &["r {input}"], &[]);
        assert_eq!(pool.templates_for(ResponseType::Joke), &["e {input}"]);
        assert_eq!(pool.templates_for(ResponseType::Solve), &["e {input}"]);
        assert_eq!(pool.templates_for(ResponseType::Riddle), &["r {input}"]);
    }
}
