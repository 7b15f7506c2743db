// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

pub mod anchors;
mod comments;
pub mod config;
pub mod document;
mod error;
pub mod escape;
pub mod headers;
pub mod inline;
pub mod lists;
pub mod pipeline;
mod spans;
pub mod template;

pub use config::Options;
pub use document::Document;
pub use error::{Error, Result};
pub use template::{DEFAULT_TEMPLATE, render_template};

use pipeline::ConversionContext;

/// The converted body and the manual title, if one is known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversion {
    pub title: Option<String>,
    pub body: String,
}

pub fn convert_str(markdown: &str) -> Conversion {
    convert_str_with_options(markdown, &Options::default())
}

pub fn convert_str_with_options(markdown: &str, options: &Options) -> Conversion {
    let mut context = ConversionContext::new(options, markdown);
    let body = pipeline::run(Document::parse(markdown), &mut context).render();

    let title = match context.extracted_title.take() {
        Some(extracted) => {
            let resolved = escape::resolve_line_escapes(&extracted, &context.sentinels);
            Some(context.sentinels.restore(&resolved))
        }
        None => options.title.as_deref().map(escape::double_at_signs),
    };

    Conversion { title, body }
}
