// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

pub const TITLE_PLACEHOLDER: &str = "$${{TITLE}}$$";
pub const CONTENTS_PLACEHOLDER: &str = "$${{CONTENTS}}$$";

pub const DEFAULT_TEMPLATE: &str = include_str!("../template.texi");

/// Fills the first occurrence of each placeholder, title first.
pub fn render_template(template: &str, title: &str, contents: &str) -> crate::Result<String> {
    for placeholder in [TITLE_PLACEHOLDER, CONTENTS_PLACEHOLDER] {
        if !template.contains(placeholder) {
            return Err(crate::Error::MissingPlaceholder(placeholder));
        }
    }

    Ok(template
        .replacen(TITLE_PLACEHOLDER, title, 1)
        .replacen(CONTENTS_PLACEHOLDER, contents, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 行为：两个占位符各替换一次。
    #[test]
    fn fills_placeholders_once() {
        let template = "T=$${{TITLE}}$$ $${{TITLE}}$$\n$${{CONTENTS}}$$";
        let out = render_template(template, "Guide", "body").unwrap();
        assert_eq!(out, "T=Guide $${{TITLE}}$$\nbody");
    }

    // 行为：正文中出现的标题占位符不会被替换。
    #[test]
    fn body_is_not_rescanned_for_title() {
        let out = render_template("$${{TITLE}}$$|$${{CONTENTS}}$$", "t", "$${{TITLE}}$$").unwrap();
        assert_eq!(out, "t|$${{TITLE}}$$");
    }

    // 行为：缺少占位符的模板报错。
    #[test]
    fn missing_placeholder_is_an_error() {
        let err = render_template("no contents $${{TITLE}}$$", "t", "b").unwrap_err();
        assert!(matches!(
            err,
            crate::Error::MissingPlaceholder(CONTENTS_PLACEHOLDER)
        ));
    }

    // 行为：内置模板包含两个占位符。
    #[test]
    fn default_template_is_complete() {
        let out = render_template(DEFAULT_TEMPLATE, "Guide", "@node A").unwrap();
        assert!(out.starts_with("\\input texinfo"));
        assert!(out.contains("@set MANUALTITLE Guide"));
        assert!(out.contains("@node A"));
        assert!(out.trim_end().ends_with("@bye"));
    }
}
