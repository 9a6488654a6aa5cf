//! Textual encodings of weight matrices.
//!
//! * text: one row per line, or rows separated by `;` for inline literals.
//!   Entries are separated by commas and/or whitespace. Blank lines and lines
//!   starting with `#` are skipped.
//! * json: an array of arrays of numbers.
//! * gml: a directed graph whose edges carry a `weight` attribute. Ordered
//!   pairs without an edge receive the absent weight and parallel edges
//!   accumulate (see [`GraphBuilder`](crate::GraphBuilder)).

use crate::{graph, EdgeWeight, Error, Result, WeightMatrix};
use asexp::sexp::Sexp;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    /// Decide by file extension, then by content.
    Auto,
    Text,
    Json,
    Gml,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Format, String> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Format::Auto),
            "text" | "txt" | "csv" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            "gml" => Ok(Format::Gml),
            _ => Err(format!("unknown matrix format `{}`", s)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Auto => "auto",
            Format::Text => "text",
            Format::Json => "json",
            Format::Gml => "gml",
        };
        f.write_str(name)
    }
}

impl Format {
    /// Guesses the format of `content`, preferring the extension of `path`.
    pub fn detect(path: Option<&Path>, content: &str) -> Format {
        let by_extension = path
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .and_then(|e| match e.to_ascii_lowercase().as_str() {
                "json" => Some(Format::Json),
                "gml" => Some(Format::Gml),
                "txt" | "csv" | "tsv" => Some(Format::Text),
                _ => None,
            });
        by_extension.unwrap_or_else(|| {
            let head = content.trim_start();
            if head.starts_with('[') {
                Format::Json
            } else if head.starts_with("graph") {
                Format::Gml
            } else {
                Format::Text
            }
        })
    }
}

/// Options for decoding a weight matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InputOptions {
    pub format: Format,

    /// Weight of node pairs without an edge (GML only).
    pub absent_weight: EdgeWeight,
}

impl Default for InputOptions {
    fn default() -> Self {
        InputOptions {
            format: Format::Auto,
            absent_weight: 0.0,
        }
    }
}

pub fn parse_text(s: &str) -> Result<WeightMatrix> {
    let mut rows = Vec::new();
    for (idx, line) in s.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim_start().starts_with('#') {
            continue;
        }
        for segment in line.split(';') {
            let row = segment
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|tok| !tok.is_empty())
                .map(|tok| {
                    tok.parse::<EdgeWeight>()
                        .map_err(|_| Error::parse(line_no, format!("invalid number `{}`", tok)))
                })
                .collect::<Result<Vec<_>>>()?;
            if !row.is_empty() {
                rows.push(row);
            }
        }
    }
    WeightMatrix::from_rows(rows)
}

pub fn parse_json(s: &str) -> Result<WeightMatrix> {
    let rows: Vec<Vec<EdgeWeight>> =
        serde_json::from_str(s).map_err(|err| Error::parse(err.line(), err.to_string()))?;
    WeightMatrix::from_rows(rows)
}

fn convert_weight(w: Option<&Sexp>) -> Option<EdgeWeight> {
    w.and_then(|s| s.get_float())
}

pub fn parse_gml(s: &str, absent_weight: EdgeWeight) -> Result<WeightMatrix> {
    let pg = graph_io_gml::parse_gml(s, &|_| -> Option<()> { Some(()) }, &convert_weight)
        .map_err(|err| Error::Gml(format!("{:?}", err)))?;
    graph::from_petgraph(&pg, absent_weight)
}

/// Decodes `s` in the given format; `Format::Auto` decides by content.
pub fn parse_matrix(s: &str, options: InputOptions) -> Result<WeightMatrix> {
    let format = match options.format {
        Format::Auto => Format::detect(None, s),
        format => format,
    };
    match format {
        Format::Json => parse_json(s),
        Format::Gml => parse_gml(s, options.absent_weight),
        Format::Text | Format::Auto => parse_text(s),
    }
}

/// Reads and decodes the file at `path`; `Format::Auto` decides by extension,
/// then by content.
pub fn load_matrix<P: AsRef<Path>>(path: P, options: InputOptions) -> Result<WeightMatrix> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let format = match options.format {
        Format::Auto => Format::detect(Some(path), &content),
        format => format,
    };
    parse_matrix(&content, InputOptions { format, ..options })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use ndarray::array;
    use std::io::Write;

    const GML: &str = r#"
graph [
  directed 1
  node [ id 0 ]
  node [ id 1 ]
  edge [ source 0 target 1 weight 4.5 ]
  edge [ source 1 target 0 weight 2.0 ]
  edge [ source 1 target 1 weight 1.0 ]
]
"#;

    #[test]
    fn test_text() {
        let w = parse_text("# weights\n1, 2\n\n3 4\n").unwrap();
        assert_eq!(&array![[1.0, 2.0], [3.0, 4.0]], w.as_array());
    }

    #[test]
    fn test_text_inline() {
        let w = parse_text("1,2;3,4").unwrap();
        assert_eq!(&array![[1.0, 2.0], [3.0, 4.0]], w.as_array());
    }

    #[test]
    fn test_text_errors() {
        let err = parse_text("1 2\n3 x\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
        assert_eq!(ErrorKind::MalformedInput, err.kind());

        let err = parse_text("1 2 3\n4 5 6\n").unwrap_err();
        assert_eq!(ErrorKind::InvalidDimension, err.kind());

        let err = parse_text("1 2\n3\n").unwrap_err();
        assert!(matches!(err, Error::RaggedRows { row: 1, .. }));
    }

    #[test]
    fn test_json() {
        let w = parse_json("[[1, 2.5], [3, 4]]").unwrap();
        assert_eq!(&array![[1.0, 2.5], [3.0, 4.0]], w.as_array());
        assert_eq!(
            ErrorKind::MalformedInput,
            parse_json("[[1, 2], [3,").unwrap_err().kind()
        );
    }

    #[test]
    fn test_gml() {
        let w = parse_gml(GML, 0.5).unwrap();
        assert_eq!(&array![[0.5, 4.5], [2.0, 1.0]], w.as_array());
        assert_eq!(ErrorKind::MalformedInput, parse_gml("graph [", 0.0).unwrap_err().kind());
    }

    #[test]
    fn test_detect() {
        assert_eq!(Format::Json, Format::detect(None, "  [[1]]"));
        assert_eq!(Format::Gml, Format::detect(None, GML));
        assert_eq!(Format::Text, Format::detect(None, "1 2\n3 4"));
        assert_eq!(Format::Gml, Format::detect(Some(Path::new("a.GML")), "1"));
        assert_eq!(Format::Text, Format::detect(Some(Path::new("a.csv")), "[[1]]"));
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(Ok(Format::Json), "JSON".parse());
        assert_eq!(Ok(Format::Text), "csv".parse());
        assert!("xml".parse::<Format>().is_err());
        assert_eq!("gml", Format::Gml.to_string());
    }

    #[test]
    fn test_load_matrix() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "[[1, 2], [3, 4]]").unwrap();
        let w = load_matrix(file.path(), InputOptions::default()).unwrap();
        assert_eq!(&array![[1.0, 2.0], [3.0, 4.0]], w.as_array());

        let err = load_matrix("does/not/exist.txt", InputOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
