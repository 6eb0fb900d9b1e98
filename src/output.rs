//! Styled output blocks produced by command actions.
//!
//! Blocks carry semantic classes, never colors. The UI resolves each class
//! against the active theme at draw time, so switching themes restyles the
//! whole scroll log.

/// Semantic style class of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Class {
    #[default]
    Plain,
    Strong,
    Italic,
    Accent,
    Heading,
    Muted,
    Link,
    Error,
    Success,
    PromptUser,
    PromptDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub class: Class,
}

impl Span {
    pub fn new(text: impl Into<String>, class: Class) -> Self {
        Self {
            text: text.into(),
            class,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Class::Plain)
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Self::new(text, Class::Strong)
    }

    pub fn accent(text: impl Into<String>) -> Self {
        Self::new(text, Class::Accent)
    }

    pub fn muted(text: impl Into<String>) -> Self {
        Self::new(text, Class::Muted)
    }

    pub fn link(text: impl Into<String>) -> Self {
        Self::new(text, Class::Link)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Class::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn styled(text: impl Into<String>, class: Class) -> Self {
        Self::new(vec![Span::new(text, class)])
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Class::Plain)
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

impl From<Vec<Span>> for Line {
    fn from(spans: Vec<Span>) -> Self {
        Self::new(spans)
    }
}

/// A multi-line unit of output appended to the scroll log or shown in a modal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    pub lines: Vec<Line>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// One line per `\n`-separated segment of `text`, all in `class`.
    pub fn styled(text: &str, class: Class) -> Self {
        Self {
            lines: text.lines().map(|l| Line::styled(l, class)).collect(),
        }
    }

    pub fn plain(text: &str) -> Self {
        Self::styled(text, Class::Plain)
    }

    /// Single-line error block.
    pub fn error(message: impl Into<String>) -> Self {
        Self::from_lines(vec![Line::styled(message, Class::Error)])
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::from_lines(vec![Line::styled(message, Class::Success)])
    }

    pub fn push(&mut self, line: impl Into<Line>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub fn with(mut self, line: impl Into<Line>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.spans.iter().all(|s| s.text.is_empty()))
    }

    /// Plain-text rendering used by headless mode and tests.
    pub fn to_plain_text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.text().contains(needle))
    }

    /// True if any span carries the given class.
    pub fn has_class(&self, class: Class) -> bool {
        self.lines
            .iter()
            .any(|l| l.spans.iter().any(|s| s.class == class))
    }
}
