//! Reader and writer for the tab-separated "bytespan" annotation format.
//!
//! Each line holds one annotation:
//!
//! ```text
//! id<TAB>start,end<TAB>datatype<TAB>type<TAB>key1="val1" key2="val2"
//! ```
//!
//! Lines starting with `#` are comments. Values are double-quoted; embedded
//! quotes and backslashes are backslash-escaped, as are tabs and line breaks
//! (`\t`, `\n`, `\r`) in values and types. A line whose id does not
//! parse gets an id assigned on load. Other malformed lines are logged and
//! skipped.

use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{AnnotationError, AnnotationResult};
use crate::{Annotation, AnnotationId, AnnotationSet, Features};

/// Datatype column written for every annotation.
pub const DATATYPE: &str = "string";

/// One successfully parsed line.
#[derive(Debug, Clone, PartialEq)]
pub struct BytespanLine {
    /// `None` when the id column did not parse.
    pub id: Option<AnnotationId>,
    pub start: usize,
    pub end: usize,
    pub datatype: String,
    pub kind: String,
    pub features: Features,
}

/// Parse a single non-comment line.
pub fn parse_line(line: &str) -> Result<BytespanLine, String> {
    let line = line.trim_end_matches(|c| c == '\n' || c == '\r');
    let mut columns = line.splitn(5, '\t');

    let id = columns
        .next()
        .ok_or_else(|| "missing id column".to_string())?
        .trim()
        .parse::<AnnotationId>()
        .ok();

    let offsets = columns
        .next()
        .ok_or_else(|| "missing span column".to_string())?;
    let (start, end) = offsets
        .split_once(',')
        .ok_or_else(|| format!("span column '{}' is not 'start,end'", offsets))?;
    let start: usize = start
        .trim()
        .parse()
        .map_err(|_| format!("bad start offset '{}'", start))?;
    let end: usize = end
        .trim()
        .parse()
        .map_err(|_| format!("bad end offset '{}'", end))?;
    if start > end {
        return Err(format!("start {} is after end {}", start, end));
    }

    let datatype = columns
        .next()
        .ok_or_else(|| "missing datatype column".to_string())?
        .to_string();
    let kind = unescape(
        columns
            .next()
            .ok_or_else(|| "missing type column".to_string())?,
    )?;
    let features = match columns.next() {
        Some(rest) => parse_features(rest)?,
        None => Features::new(),
    };

    Ok(BytespanLine {
        id,
        start,
        end,
        datatype,
        kind,
        features,
    })
}

/// Parse `key1="val1" key2="val2"` into an attribute map.
pub fn parse_features(input: &str) -> Result<Features, String> {
    let mut features = Features::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.peek().map_or(false, |c| c.is_whitespace()) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        loop {
            match chars.next() {
                Some('=') => break,
                Some(c) if c.is_whitespace() => {
                    return Err(format!("attribute '{}' has no value", key));
                }
                Some(c) => key.push(c),
                None => return Err(format!("attribute '{}' has no value", key)),
            }
        }
        if key.is_empty() {
            return Err("empty attribute name".to_string());
        }

        if chars.next() != Some('"') {
            return Err(format!("value of '{}' is not quoted", key));
        }
        let mut value = String::new();
        loop {
            match chars.next() {
                Some('\\') => match chars.next() {
                    Some(escaped) => value.push(unescaped(escaped)),
                    None => return Err(format!("dangling escape in value of '{}'", key)),
                },
                Some('"') => break,
                Some(c) => value.push(c),
                None => return Err(format!("unterminated value of '{}'", key)),
            }
        }

        features.insert(key, value);
    }

    Ok(features)
}

fn unescaped(c: char) -> char {
    match c {
        't' => '\t',
        'n' => '\n',
        'r' => '\r',
        other => other,
    }
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            let escaped = chars
                .next()
                .ok_or_else(|| format!("dangling escape in '{}'", raw))?;
            out.push(unescaped(escaped));
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

/// Backslash-escape characters that would break a line, a column or a quoted value.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Format one annotation as a bytespan line (without the newline).
pub fn format_line(annotation: &Annotation) -> String {
    let features = annotation
        .features()
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape(v)))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{}\t{},{}\t{}\t{}\t{}",
        annotation.id(),
        annotation.start(),
        annotation.end(),
        DATATYPE,
        escape(annotation.kind()),
        features
    )
}

/// Read a set from bytespan text.
///
/// Annotations carrying an id are inserted first so that ids assigned to
/// unnumbered lines never displace them.
pub fn read_set<R: BufRead>(name: &str, reader: R) -> AnnotationResult<AnnotationSet> {
    let mut numbered = Vec::new();
    let mut unnumbered = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| AnnotationError::Io {
            path: name.to_string(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match parse_line(&line) {
            Ok(parsed) if parsed.id.is_some() => numbered.push(parsed),
            Ok(parsed) => unnumbered.push(parsed),
            Err(reason) => {
                warn!(set = name, line = line_no + 1, %reason, "skipping malformed annotation line");
            }
        }
    }

    let mut set = AnnotationSet::new(name);
    for parsed in numbered {
        let id = parsed.id.unwrap_or_default();
        let annotation =
            Annotation::with_features(id, parsed.start, parsed.end, parsed.kind, parsed.features)?;
        set.add(&annotation)?;
    }
    for parsed in unnumbered {
        set.add_span_with_features(parsed.start, parsed.end, parsed.kind, parsed.features)?;
    }
    Ok(set)
}

/// Read a set from a string.
pub fn parse_set(name: &str, input: &str) -> AnnotationResult<AnnotationSet> {
    read_set(name, input.as_bytes())
}

/// Write a set in bytespan format, one line per annotation in set order.
pub fn write_set<W: Write>(mut writer: W, set: &AnnotationSet) -> io::Result<()> {
    for annotation in set.iter() {
        writeln!(writer, "{}", format_line(annotation))?;
    }
    writer.flush()
}

/// Read a set from a file; the set is named `name`.
pub fn read_file(name: &str, path: &Path) -> AnnotationResult<AnnotationSet> {
    let file = fs::File::open(path).map_err(|source| AnnotationError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let set = read_set(name, BufReader::new(file))?;
    debug!(set = name, path = %path.display(), count = set.len(), "read annotation set");
    Ok(set)
}

/// Write a set to a file, creating parent directories.
pub fn write_file(path: &Path, set: &AnnotationSet) -> AnnotationResult<()> {
    let io_err = |source: io::Error| AnnotationError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = fs::File::create(path).map_err(io_err)?;
    write_set(io::BufWriter::new(file), set).map_err(io_err)?;
    debug!(set = set.name(), path = %path.display(), count = set.len(), "wrote annotation set");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_scenario() {
        let parsed = parse_line("1\t0,5\tstring\tNP\tCE_ID=\"3\"\n").unwrap();
        assert_eq!(parsed.id, Some(1));
        assert_eq!(parsed.start, 0);
        assert_eq!(parsed.end, 5);
        assert_eq!(parsed.kind, "NP");
        assert_eq!(parsed.features.get("CE_ID").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_parse_escaped_values() {
        let features = parse_features(r#"TEXT="say \"hi\"" PATH="a\\b" EMPTY="""#).unwrap();
        assert_eq!(features["TEXT"], "say \"hi\"");
        assert_eq!(features["PATH"], "a\\b");
        assert_eq!(features["EMPTY"], "");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_line("1\t0-5\tstring\tNP").is_err());
        assert!(parse_line("1\t9,5\tstring\tNP").is_err());
        assert!(parse_line("1\t0,5").is_err());
        assert!(parse_features("A=unquoted").is_err());
        assert!(parse_features("A=\"open").is_err());
    }

    #[test]
    fn test_unparsable_id_is_assigned() {
        let input = "x\t0,3\tstring\tNP\t\n1\t4,9\tstring\tNP\t\n";
        let set = parse_set("nps", input).unwrap();
        assert_eq!(set.len(), 2);
        // Numbered lines keep their id, the other line takes the next free id
        assert_eq!(set.by_id(1).unwrap().start(), 4);
        assert_eq!(set.by_id(2).unwrap().start(), 0);
    }

    #[test]
    fn test_skips_comments_and_malformed_lines() {
        let input = "# header\n\n1\t0,3\tstring\tNP\n2\tbroken\n3\t5,9\tstring\tPP\tA=\"b\"\n";
        let set = parse_set("nps", input).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.kind_count("PP"), 1);
    }

    #[test]
    fn test_round_trip_preserves_spans() {
        let mut set = AnnotationSet::new("nps");
        let mut features = Features::new();
        features.insert("CE_ID".into(), "3".into());
        features.insert("QUOTE".into(), "he said \"no\"".into());
        features.insert("LINES".into(), "first\tcell\nsecond\r\n".into());
        set.add_span_with_features(0, 5, "NP", features).unwrap();
        set.add_span(6, 6, "NP").unwrap();
        set.add_span(2, 9, "PP").unwrap();
        set.add_span(3, 4, "odd\tkind\n").unwrap();

        let mut buf = Vec::new();
        write_set(&mut buf, &set).unwrap();
        let written = std::str::from_utf8(&buf).unwrap();
        assert_eq!(written.lines().count(), set.len());
        let reread = parse_set("nps", written).unwrap();

        let shape = |s: &AnnotationSet| -> Vec<(String, usize, usize, Features)> {
            s.iter()
                .map(|a| (a.kind().to_string(), a.start(), a.end(), a.features().clone()))
                .collect()
        };
        assert_eq!(shape(&reread), shape(&set));
    }

    #[test]
    fn test_format_line() {
        let mut annotation = Annotation::new(4, 10, 14, "NE").unwrap();
        annotation.set_attribute("NE", "PERSON");
        assert_eq!(format_line(&annotation), "4\t10,14\tstring\tNE\tNE=\"PERSON\"");
    }

    #[test]
    fn test_control_characters_are_escaped() {
        let mut annotation = Annotation::new(1, 0, 3, "A\tB").unwrap();
        annotation.set_attribute("V", "x\ny");
        let line = format_line(&annotation);
        assert_eq!(line, "1\t0,3\tstring\tA\\tB\tV=\"x\\ny\"");

        let parsed = parse_line(&line).unwrap();
        assert_eq!(parsed.kind, "A\tB");
        assert_eq!(parsed.features["V"], "x\ny");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("annotations").join("nps");
        let mut set = AnnotationSet::new("nps");
        set.add_span(0, 4, "NP").unwrap();

        write_file(&path, &set).unwrap();
        let reread = read_file("nps", &path).unwrap();
        assert_eq!(reread.to_vec(), set.to_vec());

        let missing = read_file("nps", &dir.path().join("nope"));
        assert!(matches!(missing, Err(AnnotationError::Io { .. })));
    }
}
