//! Recognized labels: which elements count as textual.
//!
//! A label is either a plain token, matched against an element's tag name
//! and class tokens, or a compound selector (`tag.class`, `.class`, `*`)
//! taken from a user-supplied selector string.

use isle_dom::ElementData;

/// Labels recognized when the configuration names none.
///
/// Entries may group several labels with commas; they are flattened.
pub const DEFAULT_LABELS: &[&str] = &[
    "p",
    "h1, h2, h3, h4, h5, h6, h7, h8",
    "article, section, aside",
    "figcaption",
    "pre",
    "div",
];

/// One recognized label and how it matches elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelMatcher {
    /// Matches when the element's tag or any of its class tokens equals it.
    Plain(String),
    /// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    ///
    /// A compound of an optional type selector and class selectors.
    Compound {
        /// The compound as written (lower-cased), used as the bucket label.
        text: String,
        /// Required tag, or `None` for `*` / class-only compounds.
        tag: Option<String>,
        /// Required class tokens.
        classes: Vec<String>,
    },
}

impl LabelMatcher {
    /// The label elements matched by this are bucketed under.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Plain(label) => label,
            Self::Compound { text, .. } => text,
        }
    }

    /// Whether `element` carries this label.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Plain(label) => element.has_label(label),
            Self::Compound { tag, classes, .. } => {
                if tag.as_ref().is_some_and(|tag| *tag != element.tag_label()) {
                    return false;
                }
                let labels = element.class_labels();
                classes.iter().all(|class| labels.contains(class))
            }
        }
    }

    /// Parse one compound selector. Returns `None` for anything beyond
    /// type, universal and class selectors (combinators, ids, attributes,
    /// pseudo-classes).
    fn compound(text: &str) -> Option<Self> {
        let text = text.trim().to_ascii_lowercase();
        if text == "*" {
            return Some(Self::Compound {
                text,
                tag: None,
                classes: Vec::new(),
            });
        }

        let mut parts = text.split('.');
        let head = parts.next().unwrap_or_default();
        let tag = match head {
            "" | "*" => None,
            name if is_ident(name) => Some(name.to_string()),
            _ => return None,
        };

        let mut classes = Vec::new();
        for class in parts {
            if !is_ident(class) {
                return None;
            }
            classes.push(class.to_string());
        }

        if tag.is_none() && classes.is_empty() {
            return None;
        }

        Some(Self::Compound { text, tag, classes })
    }
}

/// [§ 4.3.9 Check if three code points would start an identifier](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
///
/// Simplified: ASCII letters, digits, `-` and `_`.
fn is_ident(text: &str) -> bool {
    !text.is_empty()
        && text
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// The ordered, duplicate-free set of labels a computation buckets by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognizedLabels {
    matchers: Vec<LabelMatcher>,
    rejected: Vec<String>,
}

impl RecognizedLabels {
    /// Plain labels from possibly comma-joined groups. Entries are trimmed
    /// and lower-cased; empty entries and repeats are dropped.
    #[must_use]
    pub fn new<S: AsRef<str>>(groups: &[S]) -> Self {
        let mut labels = Self::default();
        for label in flatten(groups) {
            labels.push(LabelMatcher::Plain(label));
        }
        labels
    }

    /// The default textual labels.
    #[must_use]
    pub fn defaults() -> Self {
        Self::new(DEFAULT_LABELS)
    }

    /// Labels from a user-supplied selector list (`"p, .content, div.post"`),
    /// one per comma-separated compound. Compounds that cannot be matched are
    /// kept in [`rejected`](Self::rejected).
    #[must_use]
    pub fn from_selector(text: &str) -> Self {
        let mut labels = Self::default();
        for compound in flatten(&[text]) {
            match LabelMatcher::compound(&compound) {
                Some(matcher) => labels.push(matcher),
                None => labels.rejected.push(compound),
            }
        }
        labels
    }

    fn push(&mut self, matcher: LabelMatcher) {
        if !self.matchers.iter().any(|m| m.label() == matcher.label()) {
            self.matchers.push(matcher);
        }
    }

    /// Number of recognized labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Whether no label is recognized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// The labels in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &LabelMatcher> {
        self.matchers.iter()
    }

    /// The label strings in configuration order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.matchers.iter().map(LabelMatcher::label).collect()
    }

    /// Selector compounds that were dropped as unsupported.
    #[must_use]
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }
}

/// Split comma-joined groups into trimmed, lower-cased, non-empty entries.
fn flatten<S: AsRef<str>>(groups: &[S]) -> Vec<String> {
    groups
        .iter()
        .flat_map(|group| group.as_ref().split(','))
        .map(|entry| entry.trim().to_ascii_lowercase())
        .filter(|entry| !entry.is_empty())
        .collect()
}
