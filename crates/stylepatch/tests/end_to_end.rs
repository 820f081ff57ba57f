//! End-to-end tests: JSON report in, patched files on disk out.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use stylepatch::{Config, FileViolations, LineEnding, Violation, ViolationReport};
use tempfile::TempDir;

fn lf_config() -> Config {
    Config::parse("[patcher]\nline_ending = \"lf\"\n").unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn report_from_json_is_applied() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "App.java",
        "package p;\n\nimport java.util.List;\nimport java.util.Map;\nimport java.util.Set;\n\nclass App {\n    List<Set<String>> all;\n    void f(int a,int b) { }\n}\n",
    );

    let json = serde_json::json!({
        "files": [{
            "path": path,
            "violations": [
                { "line": 4, "column": 8, "key": "import.unused", "message": "Unused import - java.util.Map." },
                { "line": 9, "column": 17, "key": "ws.notFollowed", "message": "',' is not followed by whitespace." }
            ]
        }]
    });
    let report: ViolationReport = serde_json::from_value(json).unwrap();

    let result = stylepatch::apply(&report, &lf_config()).unwrap();

    assert!(!result.has_failures());
    assert_eq!(result.applied_count(), 2);
    assert_eq!(
        read(&path),
        "package p;\n\nimport java.util.List;\nimport java.util.Set;\n\nclass App {\n    List<Set<String>> all;\n    void f(int a, int b) { }\n}\n"
    );
}

#[test]
fn unknown_keys_round_trip_the_file() {
    let dir = TempDir::new().unwrap();
    let content = "class A {\n    int x = 42;\n}\n";
    let path = write(&dir, "A.java", content);
    let report = ViolationReport::new().with_file(FileViolations::new(
        &path,
        vec![Violation::new(2, 13, "magic.number", "'42' is a magic number.")],
    ));

    let result = stylepatch::apply(&report, &lf_config()).unwrap();

    assert_eq!(read(&path), content);
    assert_eq!(result.unresolved_keys(), vec!["magic.number"]);
    // First write in this invocation counts as a change.
    assert_eq!(result.changed_count(), 1);
}

#[test]
fn cr_terminated_output_can_be_patched_again() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "A.java", "import a.A;\nimport b.B;\nclass X { int i; }  \n");
    let config = Config::parse("[patcher]\nline_ending = \"cr\"\n").unwrap();

    let trailing = ViolationReport::new().with_file(FileViolations::new(
        &path,
        vec![Violation::new(3, 19, "Line has trailing spaces.", "")],
    ));
    stylepatch::apply(&trailing, &config).unwrap();
    assert_eq!(read(&path), "import a.A;\rimport b.B;\rclass X { int i; }\r");

    let unused = ViolationReport::new().with_file(FileViolations::new(
        &path,
        vec![Violation::new(2, 8, "import.unused", "Unused import - b.B.")],
    ));
    let result = stylepatch::apply(&unused, &config).unwrap();

    assert!(!result.has_failures());
    assert_eq!(read(&path), "import a.A;\rclass X { int i; }\r");
}

#[test]
fn cr_input_is_normalized_on_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "A.java", "a\rb\r");
    let report = ViolationReport::new().with_file(FileViolations::new(
        &path,
        vec![Violation::new(1, 1, "magic.number", "")],
    ));

    stylepatch::apply(&report, &lf_config()).unwrap();
    assert_eq!(read(&path), "a\nb\n");
}

#[test]
fn files_without_violations_are_not_rewritten() {
    let dir = TempDir::new().unwrap();
    let content = "class A {}\r\n";
    let path = write(&dir, "A.java", content);
    let report = ViolationReport::new().with_file(FileViolations::new(&path, Vec::new()));

    let result = stylepatch::apply(&report, &lf_config()).unwrap();

    assert_eq!(result.skipped, 1);
    assert_eq!(read(&path), content);
}

#[test]
fn line_endings_are_normalized() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "A.java", "class A {\r\n  int a;   \r\n}");
    let report = ViolationReport::new().with_file(FileViolations::new(
        &path,
        vec![Violation::new(2, 9, "Line has trailing spaces.", "Line has trailing spaces.")],
    ));

    let config = Config::parse("[patcher]\nline_ending = \"crlf\"\n").unwrap();
    assert_eq!(config.line_ending(), LineEnding::Crlf);
    stylepatch::apply(&report, &config).unwrap();

    assert_eq!(read(&path), "class A {\r\n  int a;\r\n}\r\n");
}

#[test]
fn failing_file_does_not_stop_the_batch() {
    let dir = TempDir::new().unwrap();
    let broken = write(&dir, "Broken.java", "import a.A;\n/* never closed\n");
    let good = write(&dir, "Good.java", "int a;  \n");
    let report = ViolationReport::new()
        .with_file(FileViolations::new(
            &broken,
            vec![Violation::new(1, 8, "import.unused", "")],
        ))
        .with_file(FileViolations::new(
            &good,
            vec![Violation::new(1, 7, "Line has trailing spaces.", "")],
        ));

    let result = stylepatch::apply(&report, &lf_config()).unwrap();

    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].path, broken);
    assert_eq!(read(&broken), "import a.A;\n/* never closed\n");
    assert_eq!(read(&good), "int a;\n");
}

#[test]
fn listener_sees_changed_files_once() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "A.java", "int a ;\n");
    let report = ViolationReport::new().with_file(FileViolations::new(
        &path,
        vec![Violation::new(1, 7, "ws.preceded", "';' is preceded with whitespace.")],
    ));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    stylepatch::apply_with_listener(&report, &lf_config(), move |p: &Path| {
        sink.lock().unwrap().push(p.to_path_buf());
    })
    .unwrap();

    assert_eq!(read(&path), "int a;\n");
    assert_eq!(*seen.lock().unwrap(), vec![path]);
}

#[test]
fn excluded_paths_are_left_alone() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("generated")).unwrap();
    let path = write(&dir, "generated/A.java", "int a;  \n");
    let report = ViolationReport::new().with_file(FileViolations::new(
        &path,
        vec![Violation::new(1, 7, "Line has trailing spaces.", "")],
    ));

    let config =
        Config::parse("[patcher]\nline_ending = \"lf\"\nexclude = [\"**/generated/**\"]\n").unwrap();
    let result = stylepatch::apply(&report, &config).unwrap();

    assert_eq!(result.skipped, 1);
    assert_eq!(read(&path), "int a;  \n");
}

#[test]
fn disabled_formatter_leaves_violation_unresolved() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "A.java", "int a;  \n");
    let report = ViolationReport::new().with_file(FileViolations::new(
        &path,
        vec![Violation::new(1, 7, "Line has trailing spaces.", "")],
    ));

    let config = Config::parse(
        "[patcher]\nline_ending = \"lf\"\n\n[formatters.\"Line has trailing spaces.\"]\nenabled = false\n",
    )
    .unwrap();
    let result = stylepatch::apply(&report, &config).unwrap();

    assert_eq!(read(&path), "int a;  \n");
    assert_eq!(result.unresolved_keys(), vec!["Line has trailing spaces."]);
}
