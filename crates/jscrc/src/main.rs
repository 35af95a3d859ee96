//! The JScr frontend CLI.
//!
//! Provides the `jscrc` command with two subcommands:
//!
//! - `jscrc check <FILE>` — lex + parse, report success or a diagnostic.
//! - `jscrc ast <FILE> [--json]` — lex + parse, dump the resulting AST.

use std::path::PathBuf;
use std::process;

use ariadne::{Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand};

use jscr_common::{LexError, Position, SyntaxError};
use jscr_parser::FrontendError;

#[derive(Parser)]
#[command(name = "jscrc", version, about = "The JScr frontend: lexer + parser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lex and parse a file, reporting success or the first diagnostic.
    Check {
        /// Path to a .jscr source file.
        file: PathBuf,
    },
    /// Lex and parse a file, then print the resulting AST.
    Ast {
        /// Path to a .jscr source file.
        file: PathBuf,

        /// Serialize the AST as JSON instead of Rust debug output.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { file } => check(&file),
        Commands::Ast { file, json } => dump_ast(&file, json),
    };

    if let Err(()) = result {
        process::exit(1);
    }
}

fn check(file: &PathBuf) -> Result<(), ()> {
    let path = file.display().to_string();
    match jscr_parser::parse_file(&path) {
        Ok(program) => {
            println!("ok: {} top-level statement(s)", program.body.len());
            Ok(())
        }
        Err(err) => {
            let source = std::fs::read_to_string(file).unwrap_or_default();
            report_error(&path, &source, &err);
            Err(())
        }
    }
}

fn dump_ast(file: &PathBuf, json: bool) -> Result<(), ()> {
    let path = file.display().to_string();
    match jscr_parser::parse_file(&path) {
        Ok(program) => {
            if json {
                match serde_json::to_string_pretty(&program) {
                    Ok(rendered) => println!("{rendered}"),
                    Err(e) => {
                        eprintln!("error: failed to serialize AST: {e}");
                        return Err(());
                    }
                }
            } else {
                println!("{program:#?}");
            }
            Ok(())
        }
        Err(err) => {
            let source = std::fs::read_to_string(file).unwrap_or_default();
            report_error(&path, &source, &err);
            Err(())
        }
    }
}

/// Renders a [`FrontendError`] as an `ariadne` report. Positions carried by
/// both error kinds are `(line, col)`; `ariadne` wants a byte span, so it is
/// recomputed by walking the source text.
fn report_error(path: &str, source: &str, err: &FrontendError) {
    match err {
        FrontendError::Lex(LexError::UnexpectedChar { position, found, .. }) => {
            report_at(path, source, *position, &format!("unexpected character '{found}'"));
        }
        FrontendError::Lex(LexError::Io { file_path, source: io_err }) => {
            eprintln!("error: failed to read \"{file_path}\": {io_err}");
        }
        FrontendError::Syntax(SyntaxError { position, description, error_code, .. }) => {
            report_at(path, source, *position, &format!("{description} (code {error_code})"));
        }
    }
}

fn report_at(path: &str, source: &str, position: Position, message: &str) {
    let start = byte_offset_of(source, position);
    let end = (start + 1).max(start);
    let _ = Report::<std::ops::Range<usize>>::build(ReportKind::Error, start..end)
        .with_message(format!("{path}: {message}"))
        .with_label(Label::new(start..end).with_message(message))
        .finish()
        .eprint(Source::from(source));
}

/// Walks `source` character-by-character, converting a `(line, col)`
/// [`Position`] into the byte offset `ariadne` needs for its span model.
fn byte_offset_of(source: &str, position: Position) -> usize {
    let mut offset = 0;
    let mut line = 1u32;
    let mut col = 0u32;
    for c in source.chars() {
        if line == position.line && col == position.col {
            return offset;
        }
        if c == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
        offset += c.len_utf8();
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_offset_at_start_is_zero() {
        assert_eq!(byte_offset_of("int x;", Position::new(1, 0)), 0);
    }

    #[test]
    fn byte_offset_after_newline_accounts_for_the_first_line() {
        assert_eq!(byte_offset_of("ab\ncd", Position::new(2, 1)), 4);
    }

    #[test]
    fn byte_offset_past_end_of_source_clamps_to_len() {
        assert_eq!(byte_offset_of("abc", Position::new(5, 0)), 3);
    }
}
