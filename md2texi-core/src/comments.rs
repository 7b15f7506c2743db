// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use crate::document::Document;
use crate::pipeline::ConversionContext;

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

pub(crate) fn strip_comments(document: Document, _: &mut ConversionContext<'_>) -> Document {
    let mut state = CommentState::default();
    let fenced = document.code_block_lines();
    let lines = document
        .lines()
        .iter()
        .zip(fenced)
        .filter_map(|(line, in_code)| {
            if in_code {
                Some(line.clone())
            } else {
                state.strip(line)
            }
        })
        .collect::<Vec<_>>();
    Document::from_lines(lines)
}

#[derive(Default)]
struct CommentState {
    open: bool,
}

impl CommentState {
    /// Returns `None` when the line held nothing but comment text.
    fn strip(&mut self, line: &str) -> Option<String> {
        let mut out = String::with_capacity(line.len());
        let mut rest = line;
        let mut touched = false;
        loop {
            if self.open {
                touched = true;
                match rest.find(COMMENT_CLOSE) {
                    Some(end) => {
                        rest = &rest[end + COMMENT_CLOSE.len()..];
                        self.open = false;
                    }
                    None => break,
                }
            } else {
                match rest.find(COMMENT_OPEN) {
                    Some(start) => {
                        out.push_str(&rest[..start]);
                        rest = &rest[start + COMMENT_OPEN.len()..];
                        self.open = true;
                    }
                    None => {
                        out.push_str(rest);
                        break;
                    }
                }
            }
        }

        if touched && out.trim().is_empty() {
            None
        } else {
            Some(out)
        }
    }
}
