// -------------------------------------------------------------------------
// SPDX-FileCopyrightText: Copyright © 2026 The pylex Project
// SPDX-FileName: crates/pylex-cli/src/main.rs
// SPDX-FileType: SOURCE
// SPDX-License-Identifier: Apache-2.0
// -------------------------------------------------------------------------
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
// -------------------------------------------------------------------------
//! pylex CLI
//!
//! Reads a single source file, drives the tokenizer to `ENDMARKER`, and
//! prints each token using the reference rendering convention.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pylex_scanner::{Scanner, Token, TokenKind};

/// A tokenizer for an indentation-sensitive, Python-like language.
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Args {
    /// Source file to tokenize.
    #[clap(value_parser)]
    input: PathBuf,

    /// Raise logging verbosity and print a token/error summary afterward.
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("could not read file \"{}\"", args.input.display()))?;

    let mut token_count = 0usize;
    let mut error_count = 0usize;

    for token in Scanner::new(&source) {
        print_token(&token);
        token_count += 1;
        if token.kind == TokenKind::Error {
            error_count += 1;
        }
    }

    if args.verbose {
        println!("{token_count} tokens, {error_count} errors");
    }

    Ok(())
}

/// Renders a token as `LL, CC: \t KIND-NAME 'LEXEME'`, omitting the lexeme
/// field for structural tokens (`NEWLINE`, `INDENT`, `DEDENT`, `ENDMARKER`).
fn print_token(token: &Token<'_>) {
    if token.kind.is_structural() {
        println!("{:02}, {:02}: \t {:<16}", token.line(), token.column(), token.kind);
    } else {
        println!("{:02}, {:02}: \t {:<16} '{}'", token.line(), token.column(), token.kind, token.lexeme);
    }
}
