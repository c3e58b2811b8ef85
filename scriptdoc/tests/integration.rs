use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_scriptdoc")));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_script(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

const INSTALL_SH: &str = "\
#!/bin/bash
# @doc
# @name: Install Python
# @description: Installs Python via Miniforge
# @category: Python
# @usage: bash install.sh
# @requires: macOS, curl
# @/doc
echo installing
";

/// Run `scriptdoc` from `dir` with `in` as input and `out` as output.
fn generate(dir: &TempDir) -> assert_cmd::assert::Assert {
    cmd()
        .current_dir(dir.path())
        .args(["-i", "in", "-o", "out"])
        .assert()
}

fn read(dir: &TempDir, name: &str) -> String {
    fs::read_to_string(dir.path().join("out").join(name)).unwrap()
}

// -- generation --

#[test]
fn python_install_scenario() {
    let dir = TempDir::new().unwrap();
    write_script(&dir.path().join("in"), "Python/install.sh", INSTALL_SH);

    generate(&dir)
        .success()
        .stdout(predicate::str::contains("Documentation generated in out"));

    let components = read(&dir, "components.md");
    assert!(components.contains("- [Python](#python)"));
    assert!(components.contains("## Python"));
    assert!(components.contains("### Install Python"));
    assert!(components.contains("**File:** `Python/install.sh`"));
    assert!(components.contains("**Usage:**\n```bash\nbash install.sh\n```"));

    let python = read(&dir, "python.md");
    assert!(python.contains("**Requirements:** macOS, curl"));
    assert!(python.contains("main/MacOS/Components/Python/install.sh)\"\n"));

    let index = read(&dir, "index.md");
    assert!(index.contains("**Total Scripts:** 1"));
    assert!(index.contains("- Python: 1 script\n"));
}

#[test]
fn every_output_file_is_written() {
    let dir = TempDir::new().unwrap();
    write_script(&dir.path().join("in"), "Python/install.sh", INSTALL_SH);

    generate(&dir).success();

    for name in ["index.md", "components.md", "python.md", "mkdocs_nav.yml"] {
        assert!(dir.path().join("out").join(name).is_file(), "{name} missing");
    }
    let nav = read(&dir, "mkdocs_nav.yml");
    assert!(nav.contains("python.md"));
}

#[test]
fn no_documented_scripts_fails() {
    let dir = TempDir::new().unwrap();
    write_script(&dir.path().join("in"), "plain.sh", "#!/bin/bash\necho hi\n");

    generate(&dir)
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No documented scripts found!"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn missing_input_dir_fails() {
    let dir = TempDir::new().unwrap();

    generate(&dir)
        .failure()
        .stderr(predicate::str::contains("input directory not found: in"));
}

#[test]
fn shared_scripts_become_utilities() {
    let dir = TempDir::new().unwrap();
    write_script(
        &dir.path().join("in"),
        "Shared/helpers.sh",
        "# @doc\n# @name: Helpers\n# @/doc\n",
    );

    generate(&dir).success();

    assert!(dir.path().join("out/utilities.md").is_file());
    assert!(!dir.path().join("out/shared.md").exists());
}

#[test]
fn categories_are_sorted() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in");
    write_script(&input, "Python/install.sh", INSTALL_SH);
    write_script(
        &input,
        "LaTeX/install.sh",
        "# @doc\n# @name: Install LaTeX\n# @category: LaTeX\n# @/doc\n",
    );

    generate(&dir).success();

    let components = read(&dir, "components.md");
    let latex = components.find("- [LaTeX](#latex)").unwrap();
    let python = components.find("- [Python](#python)").unwrap();
    assert!(latex < python);
}

#[test]
fn verbose_lists_scripts() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in");
    write_script(&input, "Python/install.sh", INSTALL_SH);
    write_script(&input, "Shared/helpers.sh", "# @doc\n# @name: Helpers\n# @/doc\n");

    generate_verbose(&dir)
        .success()
        .stdout(predicate::str::contains("Found 2 documented scripts:"))
        .stdout(predicate::str::contains("  Python/install.sh"))
        .stdout(predicate::str::contains("  Shared/helpers.sh"));
}

fn generate_verbose(dir: &TempDir) -> assert_cmd::assert::Assert {
    cmd()
        .current_dir(dir.path())
        .args(["-i", "in", "-o", "out", "--verbose"])
        .assert()
}

#[test]
fn regenerating_is_stable() {
    let dir = TempDir::new().unwrap();
    write_script(&dir.path().join("in"), "Python/install.sh", INSTALL_SH);

    generate(&dir).success();
    let first = read(&dir, "components.md");
    generate(&dir).success();
    assert_eq!(read(&dir, "components.md"), first);
}

// -- configuration --

#[test]
fn config_file_sets_title_and_paths() {
    let dir = TempDir::new().unwrap();
    write_script(&dir.path().join("scripts"), "Python/install.sh", INSTALL_SH);
    fs::write(
        dir.path().join("scriptdoc.toml"),
        "input = \"scripts\"\noutput = \"site\"\ntitle = \"Lab Scripts\"\n",
    )
    .unwrap();

    cmd().current_dir(dir.path()).assert().success();

    let index = fs::read_to_string(dir.path().join("site/index.md")).unwrap();
    assert!(index.starts_with("# Lab Scripts\n"));
}

#[test]
fn flags_override_config_file() {
    let dir = TempDir::new().unwrap();
    write_script(&dir.path().join("in"), "Python/install.sh", INSTALL_SH);
    fs::write(dir.path().join("scriptdoc.toml"), "output = \"site\"\n").unwrap();

    generate(&dir).success();

    assert!(dir.path().join("out/index.md").is_file());
    assert!(!dir.path().join("site").exists());
}

#[test]
fn broken_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("custom.toml"), "input = [").unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["--config", "custom.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("custom.toml"));
}
