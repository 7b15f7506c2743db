// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid options file: {0}")]
    Options(#[from] serde_yaml::Error),

    #[error("template does not contain the {0} placeholder")]
    MissingPlaceholder(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
