// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::path::{Path, PathBuf};

use crate::cli::CliArgs;

pub fn load_options(path: Option<&Path>) -> md2texi_core::Result<md2texi_core::Options> {
    match path {
        Some(path) => md2texi_core::config::load_options_from_yaml_file(path),
        None => Ok(md2texi_core::Options::default()),
    }
}

/// Options file first, then command-line flags on top.
pub fn resolve_options(args: &CliArgs) -> md2texi_core::Result<md2texi_core::Options> {
    let mut options = load_options(args.config.as_deref())?;
    options.inline_sections |= args.inline;
    options.hide_toc |= args.hide_toc;
    if let Some(title) = &args.title {
        options.title = Some(title.clone());
    }
    Ok(options)
}

pub fn fallback_title(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn default_output_path(title: &str) -> PathBuf {
    let stem = title
        .replace("@@", "@")
        .trim_start()
        .to_lowercase()
        .replace(' ', "_");
    PathBuf::from(format!("{stem}.texi"))
}
