// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

pub mod cli;
pub mod config;

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use md2texi_core::Error;

/// Converts `input` and writes the manual, returning where it was written.
pub fn run(args: &cli::CliArgs, input: &Path) -> md2texi_core::Result<PathBuf> {
    let options = config::resolve_options(args)?;
    let markdown = read_file(input)?;
    let template = match &args.template {
        Some(path) => Cow::Owned(read_file(path)?),
        None => Cow::Borrowed(md2texi_core::DEFAULT_TEMPLATE),
    };

    let conversion = md2texi_core::convert_str_with_options(&markdown, &options);
    let title = conversion.title.unwrap_or_else(|| {
        md2texi_core::escape::double_at_signs(&config::fallback_title(input))
    });
    debug!("manual title: {title:?}");

    let texinfo = md2texi_core::render_template(&template, &title, &conversion.body)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config::default_output_path(&title));
    fs::write(&output, texinfo).map_err(|source| Error::Write {
        path: output.clone(),
        source,
    })?;
    Ok(output)
}

fn read_file(path: &Path) -> md2texi_core::Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}
