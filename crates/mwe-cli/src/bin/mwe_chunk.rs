// mwe-chunk: Extract multi-word expressions from POS-tagged text.
//
// With two file arguments, reads one sentence of tokens and its tags and
// prints the noun compounds, verb-particle constructions and light verb
// constructions found in it:
//   {nc1,nc2,},{vpc1,},{lvc1,}
//
// Without file arguments, reads stdin as alternating lines (tokens, then
// tags) and prints one result line per sentence.
//
// Usage:
//   mwe-chunk [OPTIONS] [TOKEN_FILE TAG_FILE]
//
// Options:
//   -c, --config FILE      Chunker options (JSON)
//   -t, --table FILE       Noun compound transition table
//   -m, --model ID=FILE    Linear model for a classifier id (repeatable)
//   --learning             Gate candidates with the loaded models
//   --json                 Print results as JSON
//   -h, --help             Print help

use std::io::{self, BufRead, Write};
use std::path::Path;

use mwe_en::{EnglishChunker, ResultSet};

fn print_result(out: &mut impl Write, result: &ResultSet, json: bool) {
    if json {
        match serde_json::to_string(result) {
            Ok(text) => {
                let _ = writeln!(out, "{text}");
            }
            Err(e) => mwe_cli::fatal(&format!("failed to serialize result: {e}")),
        }
    } else {
        let _ = writeln!(out, "{result}");
    }
}

fn chunk_or_report(chunker: &EnglishChunker, tags: &str, tokens: &str) -> Option<ResultSet> {
    match chunker.chunk(tags, tokens) {
        Ok(result) => Some(result),
        Err(e) => {
            tracing::warn!(error = %e, "skipping sentence");
            None
        }
    }
}

fn main() {
    mwe_cli::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if mwe_cli::wants_help(&args) {
        println!("mwe-chunk: Extract multi-word expressions from POS-tagged text.");
        println!();
        println!("Usage: mwe-chunk [OPTIONS] [TOKEN_FILE TAG_FILE]");
        println!();
        println!("Without files, reads stdin as alternating token and tag lines.");
        println!("Prints {{noun compounds}},{{VPCs}},{{LVCs}} per sentence.");
        println!();
        println!("Options:");
        println!("  -c, --config FILE      Chunker options (JSON)");
        println!("  -t, --table FILE       Noun compound transition table");
        println!("  -m, --model ID=FILE    Linear model for a classifier id (repeatable)");
        println!("  --learning             Gate candidates with the loaded models");
        println!("  --json                 Print results as JSON");
        println!("  -h, --help             Print this help");
        return;
    }

    let (config, args) = mwe_cli::parse_option(&args, "--config", Some("-c"))
        .unwrap_or_else(|e| mwe_cli::fatal(&e));
    let (table, args) = mwe_cli::parse_option(&args, "--table", Some("-t"))
        .unwrap_or_else(|e| mwe_cli::fatal(&e));
    let (models, args) = mwe_cli::parse_option(&args, "--model", Some("-m"))
        .unwrap_or_else(|e| mwe_cli::fatal(&e));

    let json = args.iter().any(|a| a == "--json");
    let learning = args.iter().any(|a| a == "--learning");
    let files: Vec<&String> = args.iter().filter(|a| !a.starts_with('-')).collect();
    if let Some(unknown) = args
        .iter()
        .find(|a| a.starts_with('-') && *a != "--json" && *a != "--learning")
    {
        mwe_cli::fatal(&format!("unknown option: {unknown}"));
    }

    let mut chunker = mwe_cli::build_chunker(
        config.last().map(Path::new),
        table.last().map(Path::new),
        &models,
    )
    .unwrap_or_else(|e| mwe_cli::fatal(&e));
    if learning {
        chunker.set_learning_mode(true);
    }

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    match files.as_slice() {
        [token_file, tag_file] => {
            let tokens = mwe_cli::read_token_file(Path::new(token_file.as_str()))
                .unwrap_or_else(|e| mwe_cli::fatal(&e));
            let tags = mwe_cli::read_tag_file(Path::new(tag_file.as_str()))
                .unwrap_or_else(|e| mwe_cli::fatal(&e));
            let result = chunker
                .chunk(&tags, &tokens)
                .unwrap_or_else(|e| mwe_cli::fatal(&e.to_string()));
            print_result(&mut out, &result, json);
        }
        [] => {
            let stdin = io::stdin();
            let mut lines = stdin.lock().lines();
            while let Some(line) = lines.next() {
                let tokens = line.unwrap_or_else(|e| mwe_cli::fatal(&e.to_string()));
                if tokens.trim().is_empty() {
                    continue;
                }
                let tags = match lines.next() {
                    Some(line) => line.unwrap_or_else(|e| mwe_cli::fatal(&e.to_string())),
                    None => mwe_cli::fatal("token line without a tag line"),
                };
                let tags = mwe_cli::normalize_tag_text(&tags);
                if let Some(result) = chunk_or_report(&chunker, &tags, &tokens) {
                    print_result(&mut out, &result, json);
                }
            }
        }
        _ => mwe_cli::fatal("expected TOKEN_FILE and TAG_FILE, or no files to read stdin"),
    }
}
