// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::path::{Path, PathBuf};

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Convert a Markdown document into a GNU Texinfo manual")]
pub struct CliArgs {
    #[arg(value_name = "INPUT", value_parser = parse_markdown_path)]
    pub input: Option<PathBuf>,

    /// Manual title, unless the document opens with a `# Title` line.
    #[arg(short, long, value_name = "TITLE")]
    pub title: Option<String>,

    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Do not give sections within chapters their own nodes.
    #[arg(short, long)]
    pub inline: bool,

    /// Drop a "Table of Contents" section and everything up to the next header.
    #[arg(long)]
    pub hide_toc: bool,

    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,
}

pub fn parse_markdown_path(value: &str) -> Result<PathBuf, String> {
    let path = Path::new(value);
    if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
    {
        Ok(path.to_path_buf())
    } else {
        Err(format!("{value} is not a Markdown file (expected a .md extension)"))
    }
}
