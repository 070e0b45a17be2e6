//! YAML and JSON file loading functionality.
//!
//! Every loader returns the documents of its input as a list of [`Value`]
//! trees. JSON input always yields exactly one document.

use crate::config::Config;
use crate::document::node::Value;
use crate::document::parser::{parse_json, parse_yaml_documents};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads and parses a YAML or JSON file from the filesystem.
///
/// Files named `*.json` (optionally followed by `.gz`) are decoded as JSON,
/// honouring `config.ordered_json`; anything else is read as a YAML stream.
/// Files ending in `.gz` are decompressed first.
///
/// # Examples
///
/// ```no_run
/// use yamlgrab::config::Config;
/// use yamlgrab::file::loader::load_file;
///
/// let documents = load_file("deployment.yml", &Config::default()).unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - A gzipped file is corrupted
/// - The file contents are not valid YAML or JSON
pub fn load_file<P: AsRef<Path>>(path: P, config: &Config) -> Result<Vec<Value>> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };

    let documents = parse_content(&content, is_json_file(path_ref), config)
        .with_context(|| format!("Failed to parse {}", path_ref.display()))?;

    debug!(
        path = %path_ref.display(),
        documents = documents.len(),
        "loaded file"
    );
    Ok(documents)
}

/// Loads and parses YAML or JSON from standard input.
///
/// Gzip-compressed input is detected by its magic bytes. Input whose first
/// non-blank character opens a JSON object or array is decoded as JSON.
pub fn load_stdin(config: &Config) -> Result<Vec<Value>> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")?
    };

    parse_content(&content, looks_like_json(&content), config).context("Failed to parse stdin")
}

/// Parses already-read content as JSON or as a YAML stream.
pub fn parse_content(content: &str, is_json: bool, config: &Config) -> Result<Vec<Value>> {
    if is_json {
        Ok(vec![parse_json(content, config.ordered_json)?])
    } else {
        parse_yaml_documents(content)
    }
}

/// Determines if a file is JSON based on its name, ignoring a `.gz` suffix.
///
/// - `data.json` → true
/// - `data.json.gz` → true
/// - `data.yml.gz` → false
fn is_json_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);
    base.ends_with(".json")
}

fn looks_like_json(content: &str) -> bool {
    matches!(content.trim_start().chars().next(), Some('{') | Some('['))
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file(path: &Path) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open gzipped file {}", path.display()))?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped stdin")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_json_file() {
        assert!(is_json_file(Path::new("data.json")));
        assert!(is_json_file(Path::new("data.json.gz")));
        assert!(!is_json_file(Path::new("data.yml.gz")));
        assert!(!is_json_file(Path::new("data.yaml")));
    }

    #[test]
    fn test_looks_like_json() {
        assert!(looks_like_json("  {\"a\": 1}"));
        assert!(looks_like_json("\n[1, 2]"));
        assert!(!looks_like_json("a: 1"));
        assert!(!looks_like_json("- 1"));
    }

    #[test]
    fn test_parse_content_json_respects_order_setting() {
        let unordered = Config {
            ordered_json: false,
            ..Config::default()
        };
        let docs = parse_content(r#"{"b": 1, "a": 2}"#, true, &unordered).unwrap();
        assert!(matches!(docs[0], Value::Unordered(_)));

        let docs = parse_content(r#"{"b": 1, "a": 2}"#, true, &Config::default()).unwrap();
        assert_eq!(docs[0].keys(), vec!["b", "a"]);
    }

    #[test]
    fn test_decompress_gzip_bytes() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"a: 1\n").unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(decompress_gzip_bytes(&compressed).unwrap(), "a: 1\n");
    }
}
