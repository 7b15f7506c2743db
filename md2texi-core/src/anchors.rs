// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::collections::HashSet;

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::document::Document;
use crate::pipeline::ConversionContext;

static ANCHOR_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<a\s+(?:name|id)\s*=\s*(?:"(?P<double>[^"]*)"|'(?P<single>[^']*)')\s*(?:/>|>(?P<inner>.*?)</a\s*>)"#,
    )
    .expect("valid anchor tag pattern")
});

/// Anchor names already emitted by one conversion.
#[derive(Clone, Debug, Default)]
pub struct AnchorRegistry {
    names: HashSet<String>,
}

impl AnchorRegistry {
    /// Records `name` and reports whether it was new.
    pub fn register(&mut self, name: &str) -> bool {
        self.names.insert(name.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

const ANCHOR_COMMAND: &str = "@anchor{";

/// Replaces anchor tags with their inner text and puts an `@anchor` line after.
///
/// Repeated names are left for [`dedupe_anchors`], which runs once the header
/// pass has dropped any hidden table of contents.
pub(crate) fn extract_anchors(document: Document, _: &mut ConversionContext<'_>) -> Document {
    let fenced = document.code_block_lines();
    let mut lines = Vec::with_capacity(document.len());
    for (line, in_code) in document.lines().iter().zip(fenced) {
        if in_code || !ANCHOR_TAG.is_match(line) {
            lines.push(line.clone());
            continue;
        }

        let mut emitted = Vec::new();
        let body = ANCHOR_TAG.replace_all(line, |caps: &Captures<'_>| {
            emitted.push(format!("{ANCHOR_COMMAND}{}}}", anchor_name(caps)));
            caps.name("inner")
                .map_or(String::new(), |inner| inner.as_str().to_string())
        });

        if !body.trim().is_empty() {
            lines.push(body.into_owned());
        }
        lines.extend(emitted);
    }
    Document::from_lines(lines)
}

/// Keeps the first `@anchor` line for each name and records it.
pub(crate) fn dedupe_anchors(document: Document, context: &mut ConversionContext<'_>) -> Document {
    let mut lines = Vec::with_capacity(document.len());
    for line in document.lines() {
        if let Some(name) = anchor_line_name(line)
            && !context.anchors.register(name)
        {
            debug!("dropping repeated anchor {name:?}");
            continue;
        }
        lines.push(line.clone());
    }
    Document::from_lines(lines)
}

/// The name in a line emitted by [`extract_anchors`].
///
/// Input `@` signs are doubled before this pass, so no source line matches.
pub fn anchor_line_name(line: &str) -> Option<&str> {
    line.strip_prefix(ANCHOR_COMMAND)?.strip_suffix('}')
}

pub fn is_anchor_line(line: &str) -> bool {
    anchor_line_name(line).is_some()
}

fn anchor_name<'h>(caps: &Captures<'h>) -> &'h str {
    caps.name("double")
        .or_else(|| caps.name("single"))
        .map_or("", |name| name.as_str())
}
