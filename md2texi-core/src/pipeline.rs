// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

//! The ordered list of conversion passes.
//!
//! Passes are not commutative. Each one assumes the output shape of the ones
//! before it: headers and lists are recognised before escapes are resolved so
//! that `\#` and `\-` cannot start a header or an item, escapes are resolved
//! before emphasis, and images are converted before links because an image
//! contains a link pattern. Anchors are de-duplicated only after the header
//! pass, so an anchor inside a hidden table of contents never claims a name.
//!
//! Lines inside fenced code blocks are left alone by every pass except `code`,
//! which turns them into an `@example` block, and `escape-prep`.

use log::debug;

use crate::anchors::{self, AnchorRegistry};
use crate::config::Options;
use crate::document::Document;
use crate::escape::{self, Sentinels};
use crate::{comments, headers, inline, lists};

pub struct ConversionContext<'a> {
    pub(crate) options: &'a Options,
    pub(crate) extracted_title: Option<String>,
    pub(crate) anchors: AnchorRegistry,
    pub(crate) nodes: Vec<String>,
    pub(crate) sentinels: Sentinels,
}

impl<'a> ConversionContext<'a> {
    pub(crate) fn new(options: &'a Options, markdown: &str) -> Self {
        Self {
            options,
            extracted_title: None,
            anchors: AnchorRegistry::default(),
            nodes: Vec::new(),
            sentinels: Sentinels::for_text(markdown),
        }
    }

    pub(crate) fn knows_target(&self, target: &str) -> bool {
        self.anchors.contains(target) || self.nodes.iter().any(|node| node.trim() == target)
    }
}

type Pass = fn(Document, &mut ConversionContext<'_>) -> Document;

pub struct Stage {
    name: &'static str,
    pass: Pass,
}

impl Stage {
    const fn new(name: &'static str, pass: Pass) -> Self {
        Self { name, pass }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

pub static STAGES: [Stage; 15] = [
    Stage::new("escape-prep", escape::escape_at_signs),
    Stage::new("trailing-backslash", escape::break_trailing_backslashes),
    Stage::new("comments", comments::strip_comments),
    Stage::new("anchors", anchors::extract_anchors),
    Stage::new("headers", headers::convert_headers),
    Stage::new("anchor-dedup", anchors::dedupe_anchors),
    Stage::new("bulleted-lists", lists::convert_bulleted_lists),
    Stage::new("enumerated-lists", lists::convert_enumerated_lists),
    Stage::new("escapes", escape::resolve_escapes),
    Stage::new("bold", inline::convert_bold),
    Stage::new("italic", inline::convert_italic),
    Stage::new("code", inline::convert_code),
    Stage::new("images", inline::convert_images),
    Stage::new("links", inline::convert_links),
    Stage::new("restore", escape::restore_protected),
];

pub fn stage_names() -> impl Iterator<Item = &'static str> {
    STAGES.iter().map(Stage::name)
}

pub(crate) fn run(document: Document, context: &mut ConversionContext<'_>) -> Document {
    STAGES.iter().fold(document, |document, stage| {
        debug!("running {} pass over {} lines", stage.name, document.len());
        (stage.pass)(document, context)
    })
}
