// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::anchors;
use crate::document::Document;
use crate::pipeline::ConversionContext;

// Flagged, not converted: `10. ` is not an enumerated item.
static MULTI_DIGIT_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2,}\. ").expect("valid multi-digit item pattern"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    Bulleted,
    Enumerated,
}

impl ListKind {
    fn environment(self) -> &'static str {
        match self {
            ListKind::Bulleted => "itemize",
            ListKind::Enumerated => "enumerate",
        }
    }
}

pub fn bulleted_item<'a>(line: &'a str, prefixes: &[String]) -> Option<&'a str> {
    prefixes
        .iter()
        .filter(|prefix| !prefix.is_empty())
        .find_map(|prefix| line.strip_prefix(prefix.as_str()))
}

/// A single digit, a period and a space.
pub fn enumerated_item(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();
    let is_item = bytes.len() >= 3 && bytes[0].is_ascii_digit() && &bytes[1..3] == b". ";
    is_item.then(|| &line[3..])
}

struct ListRegion {
    kind: ListKind,
    open: bool,
}

impl ListRegion {
    fn new(kind: ListKind) -> Self {
        Self { kind, open: false }
    }

    fn step(&mut self, line: &str, item: Option<&str>) -> String {
        let environment = self.kind.environment();
        if self.open && item.is_none() && anchors::is_anchor_line(line) {
            return line.to_string();
        }
        match (self.open, item) {
            (false, Some(content)) => {
                self.open = true;
                format!("@{environment}\n@item\n{content}")
            }
            (true, Some(content)) => format!("@item\n{content}"),
            (true, None) => {
                self.open = false;
                format!("@end {environment}\n{line}")
            }
            (false, None) => line.to_string(),
        }
    }

    fn finish(self) -> Option<String> {
        self.open
            .then(|| format!("@end {}", self.kind.environment()))
    }
}

fn convert_list_region<'a>(
    document: &'a Document,
    kind: ListKind,
    matcher: impl Fn(&'a str) -> Option<&'a str>,
) -> Document {
    let mut region = ListRegion::new(kind);
    let fenced = document.code_block_lines();
    let mut lines = document
        .lines()
        .iter()
        .zip(fenced)
        .map(|(line, in_code)| {
            let item = if in_code { None } else { matcher(line) };
            region.step(line, item)
        })
        .collect::<Vec<_>>();
    lines.extend(region.finish());
    Document::from_lines(lines)
}

pub(crate) fn convert_bulleted_lists(
    document: Document,
    context: &mut ConversionContext<'_>,
) -> Document {
    let prefixes = &context.options.bullet_prefixes;
    convert_list_region(&document, ListKind::Bulleted, |line| {
        bulleted_item(line, prefixes)
    })
}

pub(crate) fn convert_enumerated_lists(
    document: Document,
    _: &mut ConversionContext<'_>,
) -> Document {
    let fenced = document.code_block_lines();
    for (index, line) in document.lines().iter().enumerate() {
        if !fenced[index] && MULTI_DIGIT_ITEM.is_match(line) {
            warn!(
                "line {}: only single-digit ordinals start a list item: {line:?}",
                index + 1
            );
        }
    }
    convert_list_region(&document, ListKind::Enumerated, enumerated_item)
}
