// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use log::warn;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::document::{Document, is_fence};
use crate::escape::escape_braces;
use crate::pipeline::ConversionContext;
use crate::spans;

static BOLD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*(?P<star>[^*\s](?:.*?\S)??)\*\*|__(?P<under>[^_\s](?:.*?\S)??)__")
        .expect("valid bold pattern")
});

static ITALIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*(?P<text>[^*\s](?:[^*]*?[^*\s])?)\*").expect("valid italic pattern")
});

static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`(?P<code>[^`]+)`").expect("valid inline code pattern"));

static IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[(?P<alt>[^\[\]]*)\] *\((?P<url>[^)]*)\)").expect("valid image pattern")
});

static LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(?P<text>[^\[\]]+)\] *\((?P<url>[^)]+)\)").expect("valid link pattern")
});

pub(crate) fn convert_bold(document: Document, _: &mut ConversionContext<'_>) -> Document {
    let fenced = document.code_block_lines();
    document.map_lines_outside(&fenced, bold)
}

pub(crate) fn convert_italic(document: Document, _: &mut ConversionContext<'_>) -> Document {
    let fenced = document.code_block_lines();
    document.map_lines_outside(&fenced, italic)
}

pub(crate) fn convert_code(document: Document, _: &mut ConversionContext<'_>) -> Document {
    let mut in_example = false;
    let mut lines = Vec::with_capacity(document.len());
    for line in document.lines() {
        if is_fence(line) {
            lines.push(if in_example { "@end example" } else { "@example" }.to_string());
            in_example = !in_example;
        } else if in_example {
            lines.push(escape_braces(line));
        } else {
            lines.push(inline_code(line));
        }
    }
    if in_example {
        lines.push("@end example".to_string());
    }
    Document::from_lines(lines)
}

pub(crate) fn convert_images(document: Document, _: &mut ConversionContext<'_>) -> Document {
    let examples = document.example_lines();
    document.map_lines_outside(&examples, images)
}

pub(crate) fn convert_links(document: Document, context: &mut ConversionContext<'_>) -> Document {
    let context = &*context;
    let examples = document.example_lines();
    document.map_lines_outside(&examples, |line| {
        links(line, |target| {
            if !context.knows_target(target) {
                warn!("reference to #{target} matches no anchor or node");
            }
        })
    })
}

pub fn bold(line: &str) -> String {
    let protected = spans::markup_protected_spans(line);
    spans::replace_outside(line, &BOLD, &protected, |caps| {
        let text = caps
            .name("star")
            .or_else(|| caps.name("under"))
            .map_or("", |text| text.as_str());
        format!("@strong{{{text}}}")
    })
}

pub fn italic(line: &str) -> String {
    let protected = spans::markup_protected_spans(line);
    spans::replace_outside(line, &ITALIC, &protected, |caps| {
        format!("@emph{{{}}}", &caps["text"])
    })
}

pub fn inline_code(line: &str) -> String {
    INLINE_CODE
        .replace_all(line, |caps: &Captures<'_>| {
            format!("@code{{{}}}", escape_braces(&caps["code"]))
        })
        .into_owned()
}

/// Converts images outside `@code{}` spans.
pub fn images(line: &str) -> String {
    let protected = spans::texinfo_code_spans(line);
    spans::replace_outside(line, &IMAGE, &protected, |caps| {
        render_image(&caps["alt"], &caps["url"])
    })
}

/// Converts links outside `@code{}` spans, reporting each `#target` to `on_target`.
pub fn links(line: &str, mut on_target: impl FnMut(&str)) -> String {
    let protected = spans::texinfo_code_spans(line);
    spans::replace_outside(line, &LINK, &protected, |caps| {
        let (text, url) = (&caps["text"], &caps["url"]);
        if let Some(target) = url.strip_prefix('#') {
            on_target(target);
        }
        render_link(text, url)
    })
}

/// `@image` takes the file name and its extension separately.
pub fn render_image(alt: &str, url: &str) -> String {
    match url.rsplit_once('.') {
        Some((file, extension)) => format!("@image{{{file},,,{alt},{extension}}}"),
        None => format!("@image{{{url},,,{alt},}}"),
    }
}

pub fn render_link(text: &str, url: &str) -> String {
    let text = escape_commas(text);
    match url.strip_prefix('#') {
        Some(target) => format!("@ref{{{target},,{text}}}"),
        None => format!("@url{{{}, {text}}}", escape_commas(url)),
    }
}

fn escape_commas(text: &str) -> String {
    text.replace(',', "@comma{}")
}
