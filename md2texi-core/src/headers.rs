// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::cmp::Ordering;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::Document;
use crate::pipeline::ConversionContext;

pub const MAX_HEADER_HASHES: usize = 6;
pub const MAX_NEST_LEVEL: usize = 4;

static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<hashes>#+)[ \t]+(?P<text>.*?)(?:[ \t]+#+)?[ \t]*$")
        .expect("valid header pattern")
});

static TABLE_OF_CONTENTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\btable[\s-]+of[\s-]+contents\b").expect("valid table of contents pattern")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header<'a> {
    pub hashes: usize,
    pub text: &'a str,
}

/// Recognises `#` to `######` followed by whitespace and some text.
///
/// Longer runs of `#` are ordinary paragraph text.
pub fn parse_header(line: &str) -> Option<Header<'_>> {
    let caps = HEADER.captures(line)?;
    let hashes = caps.name("hashes")?.as_str().len();
    let text = caps.name("text")?.as_str();
    if hashes > MAX_HEADER_HASHES || text.is_empty() {
        return None;
    }
    Some(Header { hashes, text })
}

/// Running header depth.
///
/// The depth moves relative to the previous header: one level deeper however
/// many `#` were added, as many levels shallower as `#` were removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NestingState {
    previous_hashes: usize,
    level: usize,
}

impl NestingState {
    pub fn advance(&mut self, hashes: usize) -> usize {
        let level = match hashes.cmp(&self.previous_hashes) {
            Ordering::Greater => self.level + 1,
            Ordering::Less => self.level.saturating_sub(self.previous_hashes - hashes),
            Ordering::Equal => self.level,
        };
        self.level = level.clamp(1, MAX_NEST_LEVEL);
        self.previous_hashes = hashes;
        self.level
    }
}

pub fn sectioning_command(level: usize) -> &'static str {
    match level {
        1 => "@chapter",
        2 => "@section",
        3 => "@subsection",
        _ => "@subsubsection",
    }
}

/// Texinfo node names cannot contain `.`, `,` or `:` and cannot open with `(`.
pub fn node_name(text: &str) -> String {
    let mut name = text
        .chars()
        .filter(|ch| !matches!(ch, '.' | ',' | ':'))
        .collect::<String>();
    if name.starts_with('(') {
        name.replace_range(..'('.len_utf8(), " ");
    }
    name
}

pub fn emits_node(level: usize, inline_sections: bool) -> bool {
    level == 1 || !inline_sections
}

pub fn is_table_of_contents(text: &str) -> bool {
    TABLE_OF_CONTENTS.is_match(text)
}

pub(crate) fn convert_headers(document: Document, context: &mut ConversionContext<'_>) -> Document {
    let mut nesting = NestingState::default();
    let mut within_toc = false;
    let mut lines = Vec::with_capacity(document.len());
    let fenced = document.code_block_lines();

    for (index, line) in document.lines().iter().enumerate() {
        let header = if fenced[index] { None } else { parse_header(line) };
        let Some(header) = header else {
            if !within_toc {
                lines.push(line.clone());
            }
            continue;
        };
        within_toc = false;

        if index == 0 && header.hashes == 1 {
            debug!("taking manual title from first line: {:?}", header.text);
            context.extracted_title = Some(header.text.to_string());
            continue;
        }

        if context.options.hide_toc && is_table_of_contents(header.text) {
            debug!("hiding table of contents under {:?}", header.text);
            within_toc = true;
            continue;
        }

        let level = nesting.advance(header.hashes);
        let command = sectioning_command(level);
        if emits_node(level, context.options.inline_sections) {
            let name = node_name(header.text);
            lines.push(format!("@node {name}\n{command} {}", header.text));
            context.nodes.push(name);
        } else {
            lines.push(format!("{command} {}", header.text));
        }
    }
    Document::from_lines(lines)
}
