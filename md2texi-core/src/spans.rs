// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

//! Verbatim spans: inline code and link/image references whose contents must
//! survive the escape and emphasis passes untouched, and the `@code{}` spans
//! that the image and link passes must leave alone.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const CODE_COMMAND: &str = "@code{";

static LINK_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!?\[[^\[\]]*\] *\((?P<destination>[^)]*)\)").expect("valid link span pattern")
});

pub(crate) struct LinkSpan {
    pub(crate) whole: Range<usize>,
    pub(crate) destination: Range<usize>,
}

pub(crate) fn code_spans(line: &str) -> Vec<Range<usize>> {
    let bytes = line.as_bytes();
    let mut spans = Vec::new();
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'\\' => index += 2,
            b'`' => match line[index + 1..].find('`') {
                Some(length) if length > 0 => {
                    let end = index + 1 + length + 1;
                    spans.push(index..end);
                    index = end;
                }
                _ => index += 1,
            },
            _ => index += 1,
        }
    }
    spans
}

pub(crate) fn link_spans(line: &str) -> Vec<LinkSpan> {
    let mut spans = Vec::new();
    for caps in LINK_SPAN.captures_iter(line) {
        let (Some(whole), Some(destination)) = (caps.get(0), caps.name("destination")) else {
            continue;
        };
        let mut start = whole.start();
        if is_escaped_at(line, start) {
            if !line[start..].starts_with('!') {
                continue;
            }
            start += '!'.len_utf8();
        }
        spans.push(LinkSpan {
            whole: start..whole.end(),
            destination: destination.range(),
        });
    }
    spans
}

/// Ranges inside which backslash escapes are kept verbatim.
pub(crate) fn verbatim_spans(line: &str) -> Vec<Range<usize>> {
    let mut spans = code_spans(line);
    spans.extend(link_spans(line).into_iter().map(|span| span.whole));
    spans
}

/// Ranges that inline markup (emphasis) must not start or end inside.
pub(crate) fn markup_protected_spans(line: &str) -> Vec<Range<usize>> {
    let mut spans = code_spans(line);
    spans.extend(link_spans(line).into_iter().map(|span| span.destination));
    spans
}

/// Ranges of `@code{...}` commands in converted text.
///
/// Braces inside are `@{`/`@}` pairs, so the first bare `}` closes the span.
pub(crate) fn texinfo_code_spans(line: &str) -> Vec<Range<usize>> {
    let bytes = line.as_bytes();
    let mut spans = Vec::new();
    let mut search = 0;
    while let Some(offset) = line[search..].find(CODE_COMMAND) {
        let start = search + offset;
        let mut index = start + CODE_COMMAND.len();
        if odd_run_before(line, start, '@') {
            search = index;
            continue;
        }
        let end = loop {
            match bytes.get(index) {
                None => break line.len(),
                Some(b'@') => index += 2,
                Some(b'}') => break index + 1,
                Some(_) => index += 1,
            }
        };
        spans.push(start..end);
        search = end;
    }
    spans
}

pub(crate) fn contains(spans: &[Range<usize>], index: usize) -> bool {
    spans.iter().any(|span| span.contains(&index))
}

pub(crate) fn is_escaped_at(text: &str, index: usize) -> bool {
    odd_run_before(text, index, '\\')
}

fn odd_run_before(text: &str, index: usize, marker: char) -> bool {
    let run = text[..index]
        .chars()
        .rev()
        .take_while(|ch| *ch == marker)
        .count();
    !run.is_multiple_of(2)
}

/// Replaces every match of `pattern` whose delimiters lie outside `protected`.
///
/// A match that opens or closes inside a protected span is skipped and the
/// search resumes one character later, so a later valid match on the same line
/// is still found.
pub(crate) fn replace_outside(
    line: &str,
    pattern: &Regex,
    protected: &[Range<usize>],
    mut render: impl FnMut(&Captures<'_>) -> String,
) -> String {
    let mut out = String::with_capacity(line.len());
    let mut copied = 0;
    let mut search = 0;
    while search <= line.len() {
        let Some(caps) = pattern.captures_at(line, search) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };
        if whole.is_empty()
            || contains(protected, whole.start())
            || contains(protected, whole.end() - 1)
        {
            search = next_char_boundary(line, whole.start());
            continue;
        }
        out.push_str(&line[copied..whole.start()]);
        out.push_str(&render(&caps));
        copied = whole.end();
        search = whole.end();
    }
    out.push_str(&line[copied..]);
    out
}

fn next_char_boundary(text: &str, index: usize) -> usize {
    text[index..]
        .chars()
        .next()
        .map_or(text.len() + 1, |ch| index + ch.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 行为：反引号包围的片段被识别为代码区间。
    #[test]
    fn finds_code_spans() {
        let line = "a `b` c `d\\e` f";
        let spans = code_spans(line);
        assert_eq!(spans.len(), 2);
        assert_eq!(&line[spans[0].clone()], "`b`");
        assert_eq!(&line[spans[1].clone()], "`d\\e`");
    }

    // 行为：被转义的反引号不会开启代码区间。
    #[test]
    fn escaped_backtick_does_not_open_span() {
        let line = "\\`a` b`";
        let spans = code_spans(line);
        assert_eq!(spans.len(), 1);
        assert_eq!(&line[spans[0].clone()], "` b`");
    }

    // 行为：链接与图片都被识别，并记录目标区间。
    #[test]
    fn finds_link_spans() {
        let line = "see [text](a_b) and ![alt](c.png)";
        let spans = link_spans(line);
        assert_eq!(spans.len(), 2);
        assert_eq!(&line[spans[0].whole.clone()], "[text](a_b)");
        assert_eq!(&line[spans[0].destination.clone()], "a_b");
        assert_eq!(&line[spans[1].whole.clone()], "![alt](c.png)");
    }

    // 行为：以被转义的 [ 开头的片段不是链接。
    #[test]
    fn escaped_bracket_is_not_a_link() {
        assert!(link_spans("\\[text](url)").is_empty());
    }

    // 行为：识别 @code 区间，内部的 @} 不会提前结束区间，双写的 @ 不开启区间。
    #[test]
    fn finds_texinfo_code_spans() {
        let line = "a @code{x@}y} b @@code{z} @code{[c](d)}";
        let spans = texinfo_code_spans(line);
        assert_eq!(spans.len(), 2);
        assert_eq!(&line[spans[0].clone()], "@code{x@}y}");
        assert_eq!(&line[spans[1].clone()], "@code{[c](d)}");
    }

    // 行为：未闭合的 @code 区间延续到行尾。
    #[test]
    fn unterminated_texinfo_code_runs_to_end() {
        let line = "@code{open [a](b)";
        assert_eq!(texinfo_code_spans(line), [0..line.len()]);
    }

    // 行为：在受保护区间内开闭的匹配被跳过，之后的匹配仍会替换。
    #[test]
    fn replace_outside_skips_protected_matches() {
        let pattern = Regex::new(r"\*(?P<text>[^*]+)\*").unwrap();
        let line = "`a*b` and *c*";
        let protected = code_spans(line);
        let out = replace_outside(line, &pattern, &protected, |caps| {
            format!("<{}>", &caps["text"])
        });
        assert_eq!(out, "`a*b` and <c>");
    }
}
