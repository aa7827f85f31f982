//! The style writer all printers emit into, plus the render options and
//! the closed keyword vocabulary.
//!
//! Regenerated fragments are assembled from heterogeneous sources -
//! verbatim slices of the original text interleaved with freshly printed
//! tokens - so the writer tracks the last emitted character and offers
//! idempotent "if needed" separators that never double up.

use serde::{Deserialize, Serialize};

/// Newline sequence used by freshly printed text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewlineStyle {
    /// `\n`
    #[default]
    Unix,
    /// `\r\n`
    Windows,
}

impl NewlineStyle {
    /// The newline sequence itself.
    pub fn as_str(&self) -> &'static str {
        match self {
            NewlineStyle::Unix => "\n",
            NewlineStyle::Windows => "\r\n",
        }
    }
}

/// The flat render-options record shared by every printer of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Columns per indent level.
    pub indent_width: usize,
    /// Newline sequence for freshly printed lines.
    pub newline: NewlineStyle,
    /// Keep the original text before the first declaration (license
    /// banners and file comments) when the unit is re-printed.
    pub preserve_header: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            indent_width: 4,
            newline: NewlineStyle::Unix,
            preserve_header: true,
        }
    }
}

/// Closed vocabulary of Java keywords the printers emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Class,
    Enum,
    Extends,
    Implements,
    Import,
    Interface,
    Module,
    Package,
    Permits,
    Record,
    Static,
    Synchronized,
}

impl Keyword {
    /// The keyword's source token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Enum => "enum",
            Keyword::Extends => "extends",
            Keyword::Implements => "implements",
            Keyword::Import => "import",
            Keyword::Interface => "interface",
            Keyword::Module => "module",
            Keyword::Package => "package",
            Keyword::Permits => "permits",
            Keyword::Record => "record",
            Keyword::Static => "static",
            Keyword::Synchronized => "synchronized",
        }
    }
}

/// Append/indent/separator abstraction the printers write into.
///
/// All methods return `&mut Self` so emission sites read as chains, the
/// way the printers are written.
#[derive(Debug)]
pub struct StyleWriter {
    buf: String,
    options: RenderOptions,
}

impl StyleWriter {
    /// Create an empty writer with the given options.
    pub fn new(options: RenderOptions) -> Self {
        StyleWriter {
            buf: String::new(),
            options,
        }
    }

    /// The options this writer renders with.
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// The text emitted so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consume the writer, returning the emitted text.
    pub fn into_string(self) -> String {
        self.buf
    }

    fn last_char(&self) -> Option<char> {
        self.buf.chars().next_back()
    }

    /// Append raw text.
    pub fn append(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(text);
        self
    }

    /// Append a keyword token.
    pub fn append_keyword(&mut self, keyword: Keyword) -> &mut Self {
        self.append(keyword.as_str())
    }

    /// Append one space.
    pub fn append_space(&mut self) -> &mut Self {
        self.append(" ")
    }

    /// Append one space unless the buffer is empty or already ends in
    /// whitespace. Idempotent: never double-spaces.
    pub fn append_space_if_needed(&mut self) -> &mut Self {
        match self.last_char() {
            Some(c) if !c.is_whitespace() => self.append(" "),
            _ => self,
        }
    }

    /// Append `columns` spaces of indentation.
    pub fn append_indent(&mut self, columns: usize) -> &mut Self {
        for _ in 0..columns {
            self.buf.push(' ');
        }
        self
    }

    /// Append the configured newline sequence.
    pub fn append_line_separator(&mut self) -> &mut Self {
        self.append(self.options.newline.as_str())
    }

    /// Append a newline unless the buffer is empty or already ends with
    /// one. Idempotent, like [`StyleWriter::append_space_if_needed`].
    pub fn append_line_if_needed(&mut self) -> &mut Self {
        match self.last_char() {
            Some(c) if c != '\n' => self.append_line_separator(),
            _ => self,
        }
    }

    /// Append `,`.
    pub fn append_comma(&mut self) -> &mut Self {
        self.append(",")
    }

    /// Append `;`.
    pub fn append_semicolon(&mut self) -> &mut Self {
        self.append(";")
    }

    /// Append `.`.
    pub fn append_dot(&mut self) -> &mut Self {
        self.append(".")
    }

    /// Append `@`.
    pub fn append_at(&mut self) -> &mut Self {
        self.append("@")
    }

    /// Append `|`.
    pub fn append_pipe(&mut self) -> &mut Self {
        self.append("|")
    }

    /// Append `<`.
    pub fn append_left_arrow(&mut self) -> &mut Self {
        self.append("<")
    }

    /// Append `>`.
    pub fn append_right_arrow(&mut self) -> &mut Self {
        self.append(">")
    }

    /// Append `(`.
    pub fn append_left_parenthesis(&mut self) -> &mut Self {
        self.append("(")
    }

    /// Append `)`.
    pub fn append_right_parenthesis(&mut self) -> &mut Self {
        self.append(")")
    }

    /// Append `{`.
    pub fn append_left_curly_bracket(&mut self) -> &mut Self {
        self.append("{")
    }

    /// Append `}`.
    pub fn append_right_curly_bracket(&mut self) -> &mut Self {
        self.append("}")
    }
}
