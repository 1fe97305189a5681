//! Line-oriented output buffer with indentation

/// Accumulates emitted lines; one space per indentation level
#[derive(Debug, Default)]
pub struct CodeWriter {
    out: String,
    indent: usize,
    lines: usize,
}

impl CodeWriter {
    /// Creates an empty writer at indentation level 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one line at the current indentation. Empty lines carry no indent.
    pub fn emit_line(&mut self, line: &str) {
        if !line.is_empty() {
            self.out.extend(std::iter::repeat(' ').take(self.indent));
            self.out.push_str(line);
        }
        self.out.push('\n');
        self.lines += 1;
    }

    /// Writes pre-formatted text verbatim (each line counted)
    pub fn emit_raw(&mut self, text: &str) {
        self.out.push_str(text);
        self.lines += text.matches('\n').count();
    }

    /// Increases indentation by one level
    pub fn inc_indent(&mut self) {
        self.indent += 1;
    }

    /// Decreases indentation by one level, stopping at 0
    pub fn dec_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Current indentation level
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Number of lines written so far
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Text written so far
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consumes the writer and returns its text
    pub fn finish(self) -> String {
        self.out
    }
}
