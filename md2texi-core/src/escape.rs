// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use crate::document::Document;
use crate::pipeline::ConversionContext;
use crate::spans;

/// Markdown punctuation whose backslash escape resolves to the bare character.
pub const LITERAL_ESCAPES: [char; 16] = [
    '\\', '`', '*', '_', '[', ']', '<', '>', '(', ')', '#', '+', '-', '.', '!', '|',
];

/// Markdown punctuation whose backslash escape resolves to a Texinfo `@` escape.
pub const TEXINFO_ESCAPES: [char; 2] = ['{', '}'];

pub fn double_at_signs(text: &str) -> String {
    text.replace('@', "@@")
}

pub(crate) fn escape_at_signs(document: Document, _: &mut ConversionContext<'_>) -> Document {
    document.map_lines(double_at_signs)
}

pub(crate) fn break_trailing_backslashes(
    document: Document,
    _: &mut ConversionContext<'_>,
) -> Document {
    let fenced = document.code_block_lines();
    document.map_lines_outside(&fenced, |line| match strip_hard_break(line) {
        Some(content) => format!("{content}\n"),
        None => line.to_string(),
    })
}

fn strip_hard_break(line: &str) -> Option<&str> {
    let content = line.strip_suffix('\\')?;
    let preceding = content.chars().rev().take_while(|ch| *ch == '\\').count();
    preceding.is_multiple_of(2).then_some(content)
}

pub(crate) fn resolve_escapes(document: Document, context: &mut ConversionContext<'_>) -> Document {
    let sentinels = &context.sentinels;
    let fenced = document.code_block_lines();
    document.map_lines_outside(&fenced, |line| resolve_line_escapes(line, sentinels))
}

pub(crate) fn restore_protected(
    document: Document,
    context: &mut ConversionContext<'_>,
) -> Document {
    let sentinels = &context.sentinels;
    document.map_lines(|line| sentinels.restore(line))
}

pub(crate) fn resolve_line_escapes(line: &str, sentinels: &Sentinels) -> String {
    if !line.contains('\\') {
        return line.to_string();
    }

    let verbatim = spans::verbatim_spans(line);
    let mut out = String::with_capacity(line.len());
    let mut chars = line.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        if ch != '\\' || spans::contains(&verbatim, index) {
            out.push(ch);
            continue;
        }

        let Some(&(_, next)) = chars.peek() else {
            out.push(ch);
            continue;
        };
        if TEXINFO_ESCAPES.contains(&next) {
            out.push('@');
            out.push(next);
            chars.next();
        } else if let Some(sentinel) = sentinels.protect(next) {
            out.push(sentinel);
            chars.next();
        } else {
            out.push(ch);
        }
    }
    out
}

/// Stand-ins for resolved escapes.
///
/// A resolved `\*` must not be read back as emphasis by a later pass, so it is
/// written as a private-use character that does not occur in the input and
/// turned back into `*` by the final pass.
#[derive(Clone, Debug)]
pub(crate) struct Sentinels {
    pairs: Vec<(char, char)>,
}

impl Sentinels {
    pub(crate) fn for_text(text: &str) -> Self {
        let mut unused = (0xE000..=0xF8FF)
            .filter_map(char::from_u32)
            .filter(|ch| !text.contains(*ch));
        let pairs = LITERAL_ESCAPES
            .iter()
            .map(|&literal| (literal, unused.next().unwrap_or(literal)))
            .collect();
        Self { pairs }
    }

    pub(crate) fn protect(&self, literal: char) -> Option<char> {
        self.pairs
            .iter()
            .find(|(candidate, _)| *candidate == literal)
            .map(|(_, sentinel)| *sentinel)
    }

    pub(crate) fn restore(&self, text: &str) -> String {
        text.chars()
            .map(|ch| {
                self.pairs
                    .iter()
                    .find(|(_, sentinel)| *sentinel == ch)
                    .map_or(ch, |(literal, _)| *literal)
            })
            .collect()
    }
}

/// Escapes Texinfo braces that are not already part of an `@` pair.
pub(crate) fn escape_braces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '@' => {
                out.push('@');
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '{' | '}' => {
                out.push('@');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(line: &str) -> String {
        let sentinels = Sentinels::for_text(line);
        sentinels.restore(&resolve_line_escapes(line, &sentinels))
    }

    // 行为：所有 @ 都会被双写。
    #[test]
    fn at_signs_are_doubled() {
        assert_eq!(double_at_signs("@foo a@b"), "@@foo a@@b");
    }

    // 行为：行尾单个反斜杠变为段落分隔，偶数个反斜杠保持不变。
    #[test]
    fn trailing_backslash_breaks_paragraph() {
        assert_eq!(strip_hard_break("first\\"), Some("first"));
        assert_eq!(strip_hard_break("literal\\\\"), None);
        assert_eq!(strip_hard_break("plain"), None);
    }

    // 行为：常见标点的转义解析为字符本身。
    #[test]
    fn punctuation_escapes_resolve_to_themselves() {
        assert_eq!(resolve(r"\*not emphasis\* \_ \# \\ \!"), r"*not emphasis* _ # \ !");
    }

    // 行为：花括号转义为 Texinfo 的 @{ 与 @}。
    #[test]
    fn braces_become_texinfo_escapes() {
        assert_eq!(resolve(r"\{x\}"), "@{x@}");
    }

    // 行为：未知转义保持原样。
    #[test]
    fn unknown_escapes_are_kept() {
        assert_eq!(resolve(r"C:\path\to"), r"C:\path\to");
    }

    // 行为：没有转义的文本保持不变。
    #[test]
    fn clean_text_is_unchanged() {
        let line = "plain *text* with `code` and [a](b)";
        assert_eq!(resolve(line), line);
    }

    // 行为：代码区间内的转义不解析，区间外的同一转义会解析。
    #[test]
    fn escapes_inside_code_spans_are_verbatim() {
        assert_eq!(resolve(r"`a\*b` and \*"), r"`a\*b` and *");
    }

    // 行为：链接内的转义不解析。
    #[test]
    fn escapes_inside_links_are_verbatim() {
        assert_eq!(resolve(r"[a\_b](x\_y) \_"), r"[a\_b](x\_y) _");
    }

    // 行为：解析后的字符在恢复前以哨兵字符存在，不会再被当作标记。
    #[test]
    fn resolved_characters_are_protected_until_restore() {
        let line = r"\*x\*";
        let sentinels = Sentinels::for_text(line);
        let resolved = resolve_line_escapes(line, &sentinels);
        assert!(!resolved.contains('*'));
        assert_eq!(sentinels.restore(&resolved), "*x*");
    }

    // 行为：围栏代码块内的行尾反斜杠与转义保持原样。
    #[test]
    fn code_blocks_keep_backslashes() {
        let options = crate::config::Options::default();
        let text = "```sh\nmake \\\n  \\*all\n```\nend\\";
        let mut context = ConversionContext::new(&options, text);
        let document = break_trailing_backslashes(Document::parse(text), &mut context);
        let document = resolve_escapes(document, &mut context);
        assert_eq!(
            document.render(),
            "```sh\nmake \\\n  \\*all\n```\nend\n"
        );
    }

    // 行为：已有的 @ 转义对保持不变，裸花括号被转义。
    #[test]
    fn escape_braces_respects_at_pairs() {
        assert_eq!(escape_braces("fn f() { @{ @@ }"), "fn f() @{ @{ @@ @}");
    }
}
