//! End-to-end tests for the file-reading path `jscrc` drives: write a
//! `.jscr` source file to a temp directory and exercise the same
//! `jscr_parser::parse_file` entry point the `check`/`ast` subcommands call.

use std::path::Path;

fn write_source(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write source file");
    path.to_str().unwrap().to_string()
}

#[test]
fn well_formed_file_parses_successfully() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = write_source(dir.path(), "main.jscr", "int x = 1 + 2;\nexport const string name = \"jscr\";\n");

    let program = jscr_parser::parse_file(&path).expect("expected successful parse");
    assert_eq!(program.body.len(), 2);
    assert_eq!(program.file_path, path);
}

#[test]
fn file_with_a_syntax_error_reports_position() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = write_source(dir.path(), "broken.jscr", "int x = ;\n");

    let err = jscr_parser::parse_file(&path).expect_err("expected a syntax error");
    match err {
        jscr_parser::FrontendError::Syntax(e) => assert_eq!(e.position.line, 1),
        other => panic!("expected FrontendError::Syntax, got {other:?}"),
    }
}

#[test]
fn file_with_an_unrecognized_character_reports_a_lex_error() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = write_source(dir.path(), "broken.jscr", "int x = 1 # 2;\n");

    let err = jscr_parser::parse_file(&path).expect_err("expected a lex error");
    assert!(matches!(err, jscr_parser::FrontendError::Lex(_)));
}

#[test]
fn missing_file_is_reported_as_an_io_error() {
    let err = jscr_parser::parse_file("/nonexistent/path/not-there.jscr").expect_err("expected an io error");
    match err {
        jscr_parser::FrontendError::Lex(jscr_common::LexError::Io { .. }) => {}
        other => panic!("expected FrontendError::Lex(LexError::Io), got {other:?}"),
    }
}

#[test]
fn object_and_enum_declarations_round_trip_through_the_full_file_pipeline() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = write_source(
        dir.path(),
        "shapes.jscr",
        "object Point { int x, int y }\nenum Color { Red, Green, Blue }\n",
    );

    let program = jscr_parser::parse_file(&path).expect("expected successful parse");
    assert_eq!(program.body.len(), 2);
    assert!(matches!(program.body[0], jscr_parser::Node::ObjectDecl(_)));
    assert!(matches!(program.body[1], jscr_parser::Node::EnumDecl(_)));
}
