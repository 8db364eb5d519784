use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use pirebind_core::Registry;
use pirebind_renderer::{pipeline, FaultKind, PipelineError, RenderError, RenderJob, TemplateEngine};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

fn registry() -> Registry {
    Registry::build().expect("registry")
}

fn render_fixture() -> String {
    let dir = TempDir::new().expect("tempdir");
    let job = RenderJob {
        input: fixture("scanners.pyx.tera"),
        output: dir.path().join("scanners.pyx"),
    };
    pipeline::run(&job, &registry()).expect("fixture renders");
    fs::read_to_string(&job.output).expect("read output")
}

/// Body of `cdef class <name>:` up to the next class.
fn class_section<'a>(output: &'a str, name: &str) -> &'a str {
    output
        .split("cdef class ")
        .find(|section| section.starts_with(&format!("{name}:")))
        .unwrap_or_else(|| panic!("class {name} missing from output:\n{output}"))
}

// ---------------------------------------------------------------------------
// 1. Binding template fixture
// ---------------------------------------------------------------------------

#[test]
fn fixture_emits_every_scanner_class() {
    let output = render_fixture();
    for name in registry().scanners().keys() {
        class_section(&output, name);
    }
}

#[test]
fn fixture_skips_ignored_methods() {
    let output = render_fixture();

    let slow = class_section(&output, "SlowScanner");
    assert!(slow.contains("cdef yvector[size_t] state"));
    assert!(slow.contains("def AcceptedRegexps"));
    for ignored in ["def Glue", "def Size", "def LettersCount"] {
        assert!(!slow.contains(ignored), "SlowScanner must not emit {ignored}:\n{slow}");
    }

    let plain = class_section(&output, "Scanner");
    for method in ["def Size", "def LettersCount", "def Glue", "def AcceptedRegexps"] {
        assert!(plain.contains(method), "Scanner must emit {method}:\n{plain}");
    }

    let counting = class_section(&output, "CountingScanner");
    assert!(counting.contains("# nontrivial"));
    assert!(!counting.contains("def AcceptedRegexps"));
    assert!(counting.contains("def Glue"));
}

#[test]
fn fixture_emits_operators_options_and_special_chars() {
    let output = render_fixture();
    assert!(output.contains("Fsm operator+(const Fsm&)"));
    assert!(output.contains("size_t operator*(size_t)"));
    assert!(output.contains("Fsm& Minimize()"));
    assert!(output.contains("MaxChar = 4"));
    assert!(output.contains("\"UTF8\": \"Pire::Encodings::Utf8()\""));
    assert!(output.contains("\"i\": \"I\""));
}

#[test]
fn fixture_output_is_byte_identical_across_runs() {
    assert_eq!(render_fixture(), render_fixture());
}

// ---------------------------------------------------------------------------
// 2. Binding contract
// ---------------------------------------------------------------------------

#[test]
fn slow_scanner_ignored_methods_enumerate_exactly() {
    let reg = registry();
    let out = TemplateEngine::new(&reg)
        .render_str(
            "enumerate",
            "{% for m in SCANNERS.SlowScanner.ignored_methods %}{{ m }}\n{% endfor %}",
        )
        .expect("render");
    let methods: BTreeSet<&str> = out.lines().collect();
    assert_eq!(methods, BTreeSet::from(["Glue", "Size", "LettersCount"]));
}

#[test]
fn extra_methods_are_bound_even_when_empty() {
    let reg = registry();
    let out = TemplateEngine::new(&reg)
        .render_str("extra", "{{ SCANNERS.Scanner.extra_methods | length }}")
        .expect("render");
    assert_eq!(out, "0");
}

// ---------------------------------------------------------------------------
// 3. Failures
// ---------------------------------------------------------------------------

#[test]
fn undefined_top_level_name_reports_frames_and_final_line() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("broken.tera");
    fs::write(&input, "{% for s in SCANNERS %}{% endfor %}\n{{ OPTION }}\n").unwrap();
    let job = RenderJob { input, output: dir.path().join("broken.out") };

    let diag = match pipeline::run(&job, &registry()) {
        Err(PipelineError::Template(diag)) => diag,
        other => panic!("expected template failure, got {other:?}"),
    };
    assert!(!diag.frames.is_empty());
    assert_eq!(diag.kind, FaultKind::UndefinedName);

    let report = diag.to_string();
    let last = report.lines().last().expect("final line");
    assert_eq!(last, format!("{}: {}", diag.kind, diag.message));
    assert!(last.starts_with("UndefinedError: "));
    assert_eq!(report.lines().count(), diag.frames.len() * 2 + 1);
    assert!(!job.output.exists());
}

#[test]
fn engine_never_leaks_raw_tera_errors() {
    let reg = registry();
    let err = TemplateEngine::new(&reg)
        .render_str("bad", "{{ 1 + }}")
        .unwrap_err();
    assert!(matches!(err, RenderError::Template(_)), "got: {err}");
}
