//! Fixture tests for the whole pipeline.
//!
//! Each `fixtures/<name>.pmd` is compiled and compared against
//! `fixtures/<name>.snap`, after the output invariants in [`invariants`] are
//! checked.

mod invariants;

use crate::parse;

#[test]
fn fixture_title_table() {
    assert_fixture("title_table");
}

#[test]
fn fixture_notifications() {
    assert_fixture("notifications");
}

#[test]
fn fixture_raw_and_code() {
    assert_fixture("raw_and_code");
}

#[test]
fn fixture_lists() {
    assert_fixture("lists");
}

#[test]
fn fixture_collapse_breaks() {
    assert_fixture("collapse_breaks");
}

fn assert_fixture(name: &str) {
    let fixtures_dir = format!("{}/src/parsing/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let source = std::fs::read_to_string(format!("{fixtures_dir}/{name}.pmd")).unwrap();

    let html = parse(&source);
    invariants::check(&source, &html);

    insta::with_settings!({
        snapshot_path => fixtures_dir.as_str(),
        prepend_module_to_snapshot => false,
    }, {
        insta::assert_snapshot!(name, html);
    });
}

#[test]
fn invariants_hold_for_awkward_input() {
    let inputs = [
        "",
        "\n\n\n",
        "<!",
        "!>",
        "(::",
        "::)",
        "(a)[",
        "]^",
        "```",
        "| --- |",
        "lang[",
        "`",
        "_",
        "***",
        "#",
        "1.",
        "- [",
        "(:: [:: ::] ::)",
        "(a)[(b)[(c)[x]^]^]^",
        "<!a!> <!b!> <!c\nd!>",
        "\u{E000}PMDRAW0:0\u{E001} <!a!>",
        "\u{E002}0\u{E003} `x`",
        "lang[en=\"<!a!>\"]",
        "- [x]\n    - deep\n1.1.1.1 x",
    ];
    for input in inputs {
        invariants::check(input, &parse(input));
    }
}
