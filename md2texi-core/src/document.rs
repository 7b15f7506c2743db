// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::fmt;

const FENCE: &str = "```";
const EXAMPLE_OPEN: &str = "@example";
const EXAMPLE_CLOSE: &str = "@end example";

/// A line opening or closing a fenced Markdown code block.
pub fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with(FENCE)
}

/// A Markdown or Texinfo text held as lines.
///
/// Passes may return entries with embedded newlines (a close marker prefixed
/// to a line, a node line followed by its sectioning line). Building a
/// document always re-splits those entries, so the next pass sees one entry
/// per physical line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.split('\n'))
    }

    pub fn from_lines<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines = Vec::new();
        for entry in entries {
            for line in entry.as_ref().split('\n') {
                lines.push(line.strip_suffix('\r').unwrap_or(line).to_string());
            }
        }
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn map_lines(self, mut f: impl FnMut(&str) -> String) -> Self {
        Self::from_lines(self.lines.iter().map(|line| f(line)))
    }

    /// Skips the lines flagged in `fenced`; every other line goes through `f`.
    pub fn map_lines_outside(self, fenced: &[bool], mut f: impl FnMut(&str) -> String) -> Self {
        Self::from_lines(self.lines.iter().enumerate().map(|(index, line)| {
            if fenced.get(index).copied().unwrap_or(false) {
                line.clone()
            } else {
                f(line)
            }
        }))
    }

    /// Flags the lines strictly inside a fenced Markdown code block.
    ///
    /// A block left open runs to the end of the document.
    pub fn code_block_lines(&self) -> Vec<bool> {
        self.fenced_lines(is_fence, is_fence)
    }

    /// Flags the lines strictly inside an `@example` block.
    pub fn example_lines(&self) -> Vec<bool> {
        self.fenced_lines(|line| line == EXAMPLE_OPEN, |line| line == EXAMPLE_CLOSE)
    }

    fn fenced_lines(
        &self,
        opens: impl Fn(&str) -> bool,
        closes: impl Fn(&str) -> bool,
    ) -> Vec<bool> {
        let mut inside = false;
        self.lines
            .iter()
            .map(|line| {
                if inside {
                    inside = !closes(line);
                    inside
                } else {
                    inside = opens(line);
                    false
                }
            })
            .collect()
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::Document;

    // 行为：按行拆分后再拼接应得到原文。
    #[test]
    fn parse_then_render_keeps_text() {
        let text = "# Title\n\n- a\n- b\n";
        assert_eq!(Document::parse(text).render(), text);
    }

    // 行为：条目中嵌入的换行会被拆成独立的行。
    #[test]
    fn embedded_newlines_become_lines() {
        let doc = Document::from_lines(["@end itemize\ntext", "tail"]);
        assert_eq!(doc.lines(), ["@end itemize", "text", "tail"]);
    }

    // 行为：CRLF 行尾的回车会被去掉。
    #[test]
    fn carriage_returns_are_dropped() {
        let doc = Document::parse("a\r\nb\r\n");
        assert_eq!(doc.lines(), ["a", "b", ""]);
    }

    // 行为：map_lines 产生的多行条目也会被重新拆分。
    #[test]
    fn map_lines_resplits() {
        let doc = Document::parse("x\ny").map_lines(|line| format!("{line}\n{line}"));
        assert_eq!(doc.len(), 4);
    }

    // 行为：围栏内部的行被标记，围栏行本身不标记，未关闭的围栏延续到文末。
    #[test]
    fn code_block_lines_flag_fence_contents() {
        let doc = Document::parse("a\n```sh\n# x\n```\nb\n```\nc");
        assert_eq!(
            doc.code_block_lines(),
            [false, false, true, false, false, false, true]
        );
    }

    // 行为：@example 与 @end example 之间的行被标记。
    #[test]
    fn example_lines_flag_example_contents() {
        let doc = Document::parse("@example\n[a](b)\n@end example\n[c](d)");
        assert_eq!(doc.example_lines(), [false, true, false, false]);
    }

    // 行为：被标记的行不经过映射函数。
    #[test]
    fn map_lines_outside_skips_flagged_lines() {
        let doc = Document::parse("a\nb\nc")
            .map_lines_outside(&[false, true], |line| line.to_uppercase());
        assert_eq!(doc.lines(), ["A", "b", "C"]);
    }
}
