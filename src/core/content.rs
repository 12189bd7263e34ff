use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How dataset text is interpolated into popup and table markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentPolicy {
    #[default]
    Escape,
    /// Dataset text is inserted as markup, unchanged.
    Raw,
}

impl ContentPolicy {
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            ContentPolicy::Raw => Cow::Borrowed(text),
            ContentPolicy::Escape => escape_html(text),
        }
    }
}

pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
