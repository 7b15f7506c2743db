// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_BULLET_PREFIXES: [&str; 3] = ["- ", "+ ", "* "];

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Only chapters get their own `@node`; deeper headers stay inside it.
    pub inline_sections: bool,
    pub hide_toc: bool,
    pub title: Option<String>,
    pub bullet_prefixes: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            inline_sections: false,
            hide_toc: false,
            title: None,
            bullet_prefixes: DEFAULT_BULLET_PREFIXES
                .iter()
                .map(|prefix| prefix.to_string())
                .collect(),
        }
    }
}

pub fn load_options_from_yaml_file(path: &Path) -> crate::Result<Options> {
    let content = std::fs::read_to_string(path).map_err(|source| crate::Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let options = serde_yaml::from_str::<Options>(&content)?;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 行为：空 YAML 映射应得到默认选项。
    #[test]
    fn empty_mapping_is_default() {
        let options = serde_yaml::from_str::<Options>("{}").unwrap();
        assert_eq!(options, Options::default());
    }

    // 行为：可以覆盖列表前缀集合，其余字段保持默认。
    #[test]
    fn bullet_prefixes_can_be_overridden() {
        let options = serde_yaml::from_str::<Options>("bullet_prefixes: [\"- \"]\n").unwrap();
        assert_eq!(options.bullet_prefixes, vec!["- ".to_string()]);
        assert!(!options.hide_toc);
    }

    // 行为：未知字段会被拒绝。
    #[test]
    fn unknown_field_is_rejected() {
        assert!(serde_yaml::from_str::<Options>("hide_tok: true\n").is_err());
    }
}
