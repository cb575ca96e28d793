// mwe-cli: shared utilities for CLI tools.

use std::path::Path;
use std::process;

use mwe_en::gate::{LinearModel, ModelRegistry};
use mwe_en::{ChunkerOptions, EnglishChunker};
use mwe_fsm::table::TransitionTable;
use tracing_subscriber::EnvFilter;

/// Log filter built from `RUST_LOG`-style directives, or `warn` when none
/// are given or they do not parse.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

/// Install the stderr log subscriber. The level defaults to `warn` and can be
/// changed through `RUST_LOG`.
pub fn init_logging() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

// ---------------------------------------------------------------------------
// Argument handling
// ---------------------------------------------------------------------------

/// Extract every `--name=VALUE` or `--name VALUE` (or `-s VALUE`) occurrence
/// of one option from the argument list.
///
/// Returns `(values, remaining_args)`.
pub fn parse_option(
    args: &[String],
    long: &str,
    short: Option<&str>,
) -> Result<(Vec<String>, Vec<String>), String> {
    let prefix = format!("{long}=");
    let mut values = Vec::new();
    let mut remaining = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix(&prefix) {
            values.push(val.to_string());
        } else if arg == long || Some(arg.as_str()) == short {
            match iter.next() {
                Some(val) => values.push(val.clone()),
                None => return Err(format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    Ok((values, remaining))
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

// ---------------------------------------------------------------------------
// Input files
// ---------------------------------------------------------------------------

fn read_nonempty(path: &Path) -> Result<String, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    if text.is_empty() {
        return Err(format!("{} is empty", path.display()));
    }
    Ok(text)
}

/// Turn bracketed tag notation (`[DT][NN]`) into a whitespace-separated tag
/// string. Brackets and carriage returns become single spaces.
pub fn normalize_tag_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last_space = false;
    for c in raw.chars() {
        if matches!(c, '[' | ']' | '\r') {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(c);
            last_space = false;
        }
    }
    out
}

/// Read a tag file. Brackets, carriage returns, spaces and newlines all
/// delimit tags.
pub fn read_tag_file(path: &Path) -> Result<String, String> {
    read_nonempty(path).map(|raw| normalize_tag_text(&raw))
}

/// Read a file of whitespace-delimited tokens.
pub fn read_token_file(path: &Path) -> Result<String, String> {
    read_nonempty(path)
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Load chunker options from a JSON file, or the defaults when no file is given.
pub fn load_options(path: Option<&Path>) -> Result<ChunkerOptions, String> {
    let Some(path) = path else {
        return Ok(ChunkerOptions::default());
    };
    let text = read_nonempty(path)?;
    serde_json::from_str(&text)
        .map_err(|e| format!("invalid options in {}: {e}", path.display()))
}

/// Load a transition table from its text form.
pub fn load_table(path: &Path) -> Result<TransitionTable, String> {
    let text = read_nonempty(path)?;
    TransitionTable::parse(&text).map_err(|e| format!("{}: {e}", path.display()))
}

/// Build a model registry from `MODEL_ID=FILE.json` entries, each
/// file holding a serialized [`LinearModel`].
pub fn load_models(entries: &[String]) -> Result<ModelRegistry, String> {
    let mut registry = ModelRegistry::new();
    for entry in entries {
        let (model_id, file) = entry
            .split_once('=')
            .ok_or_else(|| format!("model must be given as MODEL_ID=FILE, got {entry:?}"))?;
        let path = Path::new(file);
        let text = read_nonempty(path)?;
        let model: LinearModel = serde_json::from_str(&text)
            .map_err(|e| format!("invalid model in {}: {e}", path.display()))?;
        tracing::debug!(model_id, path = %path.display(), "loaded model");
        registry.insert(model_id, Box::new(model));
    }
    Ok(registry)
}

/// Build a chunker from optional option, table and model files.
pub fn build_chunker(
    options: Option<&Path>,
    table: Option<&Path>,
    models: &[String],
) -> Result<EnglishChunker, String> {
    let options = load_options(options)?;
    let mut chunker = EnglishChunker::with_options(options).map_err(|e| e.to_string())?;
    if let Some(path) = table {
        let table = load_table(path)?;
        chunker = chunker.with_noun_table(&table).map_err(|e| e.to_string())?;
    }
    if !models.is_empty() {
        chunker = chunker.with_classifier(Box::new(load_models(models)?));
    }
    Ok(chunker)
}

#[cfg(test)]
mod tests {
    use tracing::level_filters::LevelFilter;

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("mwe-cli-{}-{name}", process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parse_option_forms() {
        let (values, rest) = parse_option(
            &args(&["--table", "t.txt", "a", "--table=u.txt", "b"]),
            "--table",
            Some("-t"),
        )
        .unwrap();
        assert_eq!(values, vec!["t.txt", "u.txt"]);
        assert_eq!(rest, vec!["a", "b"]);
    }

    #[test]
    fn parse_option_short_form() {
        let (values, rest) =
            parse_option(&args(&["-t", "x", "y"]), "--table", Some("-t")).unwrap();
        assert_eq!(values, vec!["x"]);
        assert_eq!(rest, vec!["y"]);
    }

    #[test]
    fn parse_option_missing_value() {
        let err = parse_option(&args(&["a", "--config"]), "--config", None).unwrap_err();
        assert!(err.contains("--config requires a value"));
    }

    #[test]
    fn log_filter_defaults_to_warn() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(Some("")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn log_filter_follows_directives() {
        assert_eq!(
            log_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(Some("mwe_en=trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn wants_help_flags() {
        assert!(wants_help(&args(&["x", "-h"])));
        assert!(!wants_help(&args(&["x"])));
    }

    #[test]
    fn bracket_tags() {
        let tags = normalize_tag_text("[DT][NN]\r\n[VB]");
        assert_eq!(
            tags.split_whitespace().collect::<Vec<_>>(),
            vec!["DT", "NN", "VB"]
        );
        assert_eq!(normalize_tag_text("[DT][NN]"), " DT NN ");
    }

    #[test]
    fn plain_tags_pass_through() {
        assert_eq!(normalize_tag_text("DT NN\nVB"), "DT NN\nVB");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_token_file(Path::new("/nonexistent/mwe-tokens.txt")).unwrap_err();
        assert!(err.starts_with("failed to read"));
    }

    #[test]
    fn empty_file_is_an_error() {
        let path = temp_file("empty.txt", "");
        let err = read_tag_file(&path).unwrap_err();
        assert!(err.ends_with("is empty"));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn options_default_without_file() {
        assert_eq!(load_options(None).unwrap(), ChunkerOptions::default());
    }

    #[test]
    fn options_from_file() {
        let path = temp_file("options.json", r#"{"learning": true}"#);
        let options = load_options(Some(&path)).unwrap();
        assert!(options.learning);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn model_spec_needs_id() {
        let err = load_models(&args(&["model.json"])).unwrap_err();
        assert!(err.contains("MODEL_ID=FILE"));
    }

    #[test]
    fn models_from_files() {
        let path = temp_file("npc.json", r#"{"bias": -3.0}"#);
        let registry = load_models(&[format!("npcModel={}", path.display())]).unwrap();
        assert_eq!(registry.model_ids(), vec!["npcModel"]);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn chunker_with_table_file() {
        let path = temp_file(
            "table.txt",
            "s NN ADD_TOKEN n\ns ** CLEAR_CHUNK s\nn NN ADD_TOKEN n\nn ** SET_MWE_CLEAR s\n",
        );
        let chunker = build_chunker(None, Some(&path), &[]).unwrap();
        let result = chunker.chunk("JJ NN NN", "big dog house").unwrap();
        assert_eq!(result.noun_compounds[0].text, "dog house");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn bad_table_file_is_reported() {
        let path = temp_file("bad-table.txt", "s NN ADD_TOKEN\n");
        let err = build_chunker(None, Some(&path), &[]).unwrap_err();
        assert!(err.contains("not a multiple of 4"));
        std::fs::remove_file(path).ok();
    }
}
