use std::borrow::Cow;

use super::types::{Metadata, MetadataValue};

/// Line that opens and closes a metadata block
pub const BLOCK_SENTINEL: &str = "+++";

/// A line of text without its terminator, plus the terminator itself
struct Line<'a> {
    body: &'a str,
    terminator: &'a str,
}

fn split_line(raw: &str) -> Line<'_> {
    let body_len = if raw.ends_with("\r\n") {
        raw.len() - 2
    } else if raw.ends_with('\n') {
        raw.len() - 1
    } else {
        raw.len()
    };
    Line {
        body: &raw[..body_len],
        terminator: &raw[body_len..],
    }
}

/// Locate the metadata block at the start of `text`.
///
/// Returns the lines of the block, sentinels included, when the first line is
/// exactly the sentinel and a closing sentinel line follows. A missing closing
/// sentinel means there is no block.
fn find_block(text: &str) -> Option<Vec<Line<'_>>> {
    if !text.starts_with(BLOCK_SENTINEL) {
        return None;
    }

    let mut lines = text.split_inclusive('\n').map(split_line);
    let opening = lines.next()?;
    if opening.body != BLOCK_SENTINEL {
        return None;
    }

    let mut block = vec![opening];
    for line in lines {
        let closing = line.body == BLOCK_SENTINEL;
        block.push(line);
        if closing {
            return Some(block);
        }
    }

    None
}

/// Read the metadata block at the head of `text`.
///
/// A block starts with a `+++` line and ends with the next `+++` line. Body lines
/// are `key: value` pairs; blank lines and lines without a colon are skipped.
/// Values are coerced with [`MetadataValue::coerce`]. When a key repeats, the
/// last occurrence wins. Returns `None` if there is no complete block.
pub fn read_metadata_block(text: &str) -> Option<Metadata> {
    let block = find_block(text)?;

    let mut metadata = Metadata::new();
    for line in &block[1..block.len() - 1] {
        let line = line.body.trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        metadata.insert(key.to_string(), MetadataValue::coerce(value.trim()));
    }

    Some(metadata)
}

/// Blank out the metadata block at the head of `text`.
///
/// Every line of the block, sentinels included, is replaced by an empty line
/// with the same terminator, so the remaining content keeps its line numbers.
/// The rest of the text is copied verbatim. Text without a complete block is
/// returned unchanged.
pub fn strip_metadata_block(text: &str) -> Cow<'_, str> {
    let Some(block) = find_block(text) else {
        return Cow::Borrowed(text);
    };

    let block_len: usize = block
        .iter()
        .map(|line| line.body.len() + line.terminator.len())
        .sum();

    let mut stripped = String::with_capacity(text.len() - block_len + block.len() * 2);
    for line in &block {
        stripped.push_str(line.terminator);
    }
    stripped.push_str(&text[block_len..]);

    Cow::Owned(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_read_metadata_block() {
        let text = "+++\ntitle: Home\ndraft: false\norder: 3\nweight: 0.5\ndate: 2024/01/05\n+++\n<h1>Hi</h1>\n";
        let metadata = read_metadata_block(text).unwrap();

        assert_eq!(metadata.len(), 5);
        assert_eq!(metadata["title"], MetadataValue::String("Home".to_string()));
        assert_eq!(metadata["draft"], MetadataValue::Bool(false));
        assert_eq!(metadata["order"], MetadataValue::Integer(3));
        assert_eq!(metadata["weight"], MetadataValue::Float(0.5));
        assert_eq!(
            metadata["date"],
            MetadataValue::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
        );
    }

    #[test]
    fn test_read_metadata_block_absent() {
        assert!(read_metadata_block("").is_none());
        assert!(read_metadata_block("<html></html>").is_none());
        assert!(read_metadata_block(" +++\ntitle: x\n+++\n").is_none());
        assert!(read_metadata_block("+++ title\ntitle: x\n+++\n").is_none());
    }

    #[test]
    fn test_read_metadata_block_without_closing_sentinel() {
        assert!(read_metadata_block("+++\ntitle: Home\nbody text\n").is_none());
        assert!(read_metadata_block("+++").is_none());
        assert!(read_metadata_block("+++\n").is_none());
    }

    #[test]
    fn test_read_metadata_block_skips_malformed_lines() {
        let text = "+++\n\n  \nno colon here\ntitle :  Spaced Out  \n: orphan\n+++\n";
        let metadata = read_metadata_block(text).unwrap();

        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata["title"], MetadataValue::String("Spaced Out".to_string()));
    }

    #[test]
    fn test_read_metadata_block_last_duplicate_wins() {
        let text = "+++\ntitle: First\ntitle: Second\n+++\n";
        let metadata = read_metadata_block(text).unwrap();
        assert_eq!(metadata["title"], MetadataValue::String("Second".to_string()));
    }

    #[test]
    fn test_read_metadata_block_value_may_contain_colons() {
        let text = "+++\nlink: https://example.com/a\ntime: 2024/02/03 10:15\n+++\n";
        let metadata = read_metadata_block(text).unwrap();
        assert_eq!(metadata["link"], MetadataValue::String("https://example.com/a".to_string()));
        assert!(matches!(metadata["time"], MetadataValue::DateTime(_)));
    }

    #[test]
    fn test_read_metadata_block_empty_block() {
        let metadata = read_metadata_block("+++\n+++\nbody").unwrap();
        assert!(metadata.is_empty());
    }

    #[test]
    fn test_read_metadata_block_crlf() {
        let text = "+++\r\ntitle: Home\r\n+++\r\nbody\r\n";
        let metadata = read_metadata_block(text).unwrap();
        assert_eq!(metadata["title"], MetadataValue::String("Home".to_string()));
    }

    #[test]
    fn test_strip_preserves_line_numbers() {
        let text = "+++\ntitle: Home\ntags: a\n+++\nline five\nline six\n";
        let stripped = strip_metadata_block(text);

        assert_eq!(stripped, "\n\n\n\nline five\nline six\n");
        let lines: Vec<&str> = stripped.lines().collect();
        assert_eq!(lines[4], "line five");
        assert_eq!(lines.len(), text.lines().count());
    }

    #[test]
    fn test_strip_keeps_crlf_terminators() {
        let text = "+++\r\ntitle: Home\r\n+++\r\nbody\r\nmore";
        assert_eq!(strip_metadata_block(text), "\r\n\r\n\r\nbody\r\nmore");
    }

    #[test]
    fn test_strip_block_only_file() {
        let text = "+++\ntitle: Home\n+++";
        let stripped = strip_metadata_block(text);
        assert_eq!(stripped, "\n\n");
        assert_eq!(stripped.split('\n').count(), text.split('\n').count());
    }

    #[test]
    fn test_strip_without_block_is_unchanged() {
        assert!(matches!(strip_metadata_block(""), Cow::Borrowed("")));
        let text = "plain\ncontent\n";
        assert!(matches!(strip_metadata_block(text), Cow::Borrowed(_)));

        let unterminated = "+++\ntitle: Home\nbody\n";
        assert_eq!(strip_metadata_block(unterminated), unterminated);
    }

    #[test]
    fn test_strip_is_idempotent() {
        let text = "+++\ntitle: Home\n+++\n+++\nnot: metadata\n+++\n";
        let once = strip_metadata_block(text).into_owned();
        let twice = strip_metadata_block(&once).into_owned();

        assert_eq!(once, "\n\n\n+++\nnot: metadata\n+++\n");
        assert_eq!(once, twice);
        assert!(read_metadata_block(&once).is_none());
    }

    #[test]
    fn test_strip_does_not_touch_later_sentinels() {
        let text = "+++\na: 1\n+++\nbody\n+++\n";
        assert_eq!(strip_metadata_block(text), "\n\n\nbody\n+++\n");
    }
}
