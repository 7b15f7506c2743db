// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::NamedTempFile;

fn read_expected_texi(fixture_dir: &Path) -> datatest_stable::Result<String> {
    let mut texi_files = fixture_dir
        .read_dir()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "texi"))
        .collect::<Vec<_>>();
    texi_files.sort();

    let answer_path = match texi_files.as_slice() {
        [only] => only,
        _ => return Err("fixture directory must contain exactly one .texi answer file".into()),
    };

    Ok(fs::read_to_string(answer_path)?)
}

fn append_optional_config_arg(cmd: &mut Command, fixture_dir: &Path) {
    let config_path = fixture_dir.join("config.yaml");
    if config_path.exists() {
        cmd.arg("--config").arg(config_path);
    }
}

// 对每个 fixture：写出的手册应在可选配置下包含答案正文，并由模板包裹。
fn golden_cli_case(path: &Path) -> datatest_stable::Result<()> {
    let fixture_dir = path
        .parent()
        .ok_or("fixture input path should have a parent directory")?;
    let expected = read_expected_texi(fixture_dir)?;

    let output = NamedTempFile::new()?;
    let mut convert_cmd = cargo_bin_cmd!("md2texi");
    convert_cmd.arg("-o").arg(output.path());
    append_optional_config_arg(&mut convert_cmd, fixture_dir);
    convert_cmd.arg(path).assert().success();

    let actual = fs::read_to_string(output.path())?;
    assert!(actual.starts_with("\\input texinfo"));
    assert!(
        actual.contains(&expected),
        "converted body missing from manual:\n{actual}"
    );
    assert!(actual.trim_end().ends_with("@bye"));
    Ok(())
}

datatest_stable::harness!({
    test = golden_cli_case,
    root = concat!(env!("CARGO_MANIFEST_DIR"), "/../md2texi-core/tests/fixtures"),
    pattern = r"^[^/]+/input\.md$",
});
