//! Reply cleanup.
//!
//! Some hosted instruct models leak their prompt-format markers into the
//! completion text (`<s>[OUT]`, `s<out>`, `[/OUT]`). The gateway strips them
//! with an ordered list of rules, then trims surrounding whitespace.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// What a rule removes.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Every occurrence of this exact, case-sensitive text.
    Literal(&'static str),
    /// Every match of this pattern.
    Pattern(Regex),
}

#[derive(Debug, Clone)]
pub struct SanitizeRule {
    pub name: &'static str,
    pub matcher: Matcher,
}

impl SanitizeRule {
    pub fn literal(name: &'static str, text: &'static str) -> Self {
        Self {
            name,
            matcher: Matcher::Literal(text),
        }
    }

    pub fn pattern(name: &'static str, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            matcher: Matcher::Pattern(Regex::new(pattern)?),
        })
    }

    /// Remove every occurrence of this rule's target from `text`.
    ///
    /// Removal repeats until the target no longer appears, so a marker split
    /// around another (`[[OUT]OUT]`) is removed too.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut current = match self.apply_once(text) {
            Cow::Borrowed(_) => return Cow::Borrowed(text),
            Cow::Owned(once) => once,
        };
        loop {
            let next = self.apply_once(&current).into_owned();
            if next == current {
                return Cow::Owned(current);
            }
            current = next;
        }
    }

    fn apply_once<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match &self.matcher {
            Matcher::Literal(needle) if text.contains(needle) => {
                Cow::Owned(text.replace(needle, ""))
            }
            Matcher::Literal(_) => Cow::Borrowed(text),
            Matcher::Pattern(re) => re.replace_all(text, ""),
        }
    }
}

/// An ordered rule list. Rules run first to last, each on the previous output.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    rules: Vec<SanitizeRule>,
}

impl Sanitizer {
    pub fn new(rules: Vec<SanitizeRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[SanitizeRule] {
        &self.rules
    }

    pub fn clean(&self, raw: &str) -> String {
        let mut text = raw.to_string();
        for rule in &self.rules {
            text = rule.apply(&text).into_owned();
        }
        text.trim().to_string()
    }
}

static REPLY_SANITIZER: LazyLock<Sanitizer> = LazyLock::new(|| {
    let rule = |name: &'static str, pattern: &'static str| {
        SanitizeRule::pattern(name, pattern).unwrap_or_else(|e| panic!("rule {name}: {e}"))
    };
    Sanitizer::new(vec![
        rule("bos_out_prefix", r"<s>\s*\[OUT\]\s*"),
        SanitizeRule::literal("s_out_tag", "s<out>"),
        rule("closing_out", r"\[?/OUT\]"),
        SanitizeRule::literal("bare_out", "[OUT]"),
    ])
});

/// The rule list applied to every model reply.
pub fn reply_sanitizer() -> &'static Sanitizer {
    &REPLY_SANITIZER
}

/// Strip format-leakage markers from a model reply.
pub fn clean_reply(raw: &str) -> String {
    REPLY_SANITIZER.clean(raw)
}
