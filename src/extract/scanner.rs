//! Brace- and quote-aware scanning of raw dump text.
//!
//! The scanner never parses the whole document. It finds the `"cars":[`
//! marker and then walks the array byte by byte, handing each complete
//! top-level object to the caller as the exact substring it occupied.
//! Every structurally significant character is ASCII, so a multi-byte
//! UTF-8 sequence can never alias a brace, quote, backslash, or bracket,
//! and byte-wise stepping stays on character boundaries at every point
//! where a span is cut.

/// Literal marker that opens the target array.
pub const ARRAY_MARKER: &str = "\"cars\":[";

/// Byte offset just past the first occurrence of [`ARRAY_MARKER`], or
/// `None` when the document has no target array.
///
/// Only the first occurrence is used; a document is assumed to carry one
/// listing array.
pub fn find_array_start(document: &str) -> Option<usize> {
    document
        .find(ARRAY_MARKER)
        .map(|idx| idx + ARRAY_MARKER.len())
}

/// Pull-based iterator over the object spans of the target array.
///
/// Each item is the text of one brace-balanced object, outer braces
/// included. Spans are balanced but not necessarily valid JSON; a span
/// cut from garbled input can still balance accidentally, and deciding
/// validity is the decoder's job.
///
/// The scan ends at the first unescaped `]` read outside a string at
/// object depth 0, or when the document runs out. A document that ends
/// mid-object yields nothing for that final fragment. Stopping at the
/// first top-level `]` assumes the dump holds a single listing array and
/// no stray top-level brackets, which holds for the feeds this tool
/// ingests.
#[derive(Debug)]
pub struct ObjectSpans {
    document: String,
    pos: usize,
    depth: usize,
    in_string: bool,
    escaped: bool,
    span_start: usize,
    done: bool,
}

impl ObjectSpans {
    /// Start a scan over `document`. When the marker is absent the
    /// iterator is empty, which is not an error.
    pub fn new(document: String) -> Self {
        let (pos, done) = match find_array_start(&document) {
            Some(offset) => (offset, false),
            None => (0, true),
        };
        ObjectSpans {
            document,
            pos,
            depth: 0,
            in_string: false,
            escaped: false,
            span_start: 0,
            done,
        }
    }
}

impl Iterator for ObjectSpans {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let bytes = self.document.as_bytes();
        while self.pos < bytes.len() {
            let byte = bytes[self.pos];
            self.pos += 1;

            if self.in_string {
                if self.escaped {
                    // The escape covers exactly one character.
                    self.escaped = false;
                } else if byte == b'\\' {
                    self.escaped = true;
                } else if byte == b'"' {
                    self.in_string = false;
                }
                continue;
            }

            match byte {
                b'"' => self.in_string = true,
                b'{' => {
                    if self.depth == 0 {
                        self.span_start = self.pos - 1;
                    }
                    self.depth += 1;
                }
                b'}' if self.depth > 0 => {
                    self.depth -= 1;
                    if self.depth == 0 {
                        return Some(self.document[self.span_start..self.pos].to_string());
                    }
                }
                b']' if self.depth == 0 => {
                    // End of the listing array.
                    self.done = true;
                    return None;
                }
                // Commas, whitespace, and any stray bytes between spans.
                _ => {}
            }
        }

        self.done = true;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(document: &str) -> Vec<String> {
        ObjectSpans::new(document.to_string()).collect()
    }

    #[test]
    fn test_yields_each_object_in_order() {
        let doc = r#"{"total":3,"cars":[{"_id":"1"},{"_id":"2"},{"_id":"3"}]}"#;
        assert_eq!(
            spans(doc),
            vec![r#"{"_id":"1"}"#, r#"{"_id":"2"}"#, r#"{"_id":"3"}"#]
        );
    }

    #[test]
    fn test_missing_marker_yields_nothing() {
        assert_eq!(spans(r#"{"trucks":[{"_id":"1"}]}"#), Vec::<String>::new());
        assert_eq!(spans(""), Vec::<String>::new());
    }

    #[test]
    fn test_empty_array_yields_nothing() {
        assert_eq!(spans(r#"{"cars":[]}"#), Vec::<String>::new());
    }

    #[test]
    fn test_braces_inside_strings_are_inert() {
        let doc = r#"{"cars":[{"_id":"1","note":"{weird}"},{"_id":"2","note":"]}"}]}"#;
        assert_eq!(
            spans(doc),
            vec![
                r#"{"_id":"1","note":"{weird}"}"#,
                r#"{"_id":"2","note":"]}"}"#
            ]
        );
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        let doc = r#"{"cars":[{"note":"say \"hi\" {"}]}"#;
        assert_eq!(spans(doc), vec![r#"{"note":"say \"hi\" {"}"#]);
    }

    #[test]
    fn test_escaped_backslash_before_closing_quote() {
        // The second backslash is itself escaped, so the quote closes the
        // string and the brace after it counts.
        let doc = r#"{"cars":[{"path":"C:\\"}]}"#;
        assert_eq!(spans(doc), vec![r#"{"path":"C:\\"}"#]);
    }

    #[test]
    fn test_nested_objects_stay_one_span() {
        let doc = r#"{"cars":[{"_id":"1","dealer":{"name":"Oto","loc":{"city":"Ankara"}}}]}"#;
        assert_eq!(
            spans(doc),
            vec![r#"{"_id":"1","dealer":{"name":"Oto","loc":{"city":"Ankara"}}}"#]
        );
    }

    #[test]
    fn test_scan_stops_at_array_close() {
        let doc = r#"{"cars":[{"_id":"1"}],"archived":[{"_id":"9"}]}"#;
        assert_eq!(spans(doc), vec![r#"{"_id":"1"}"#]);
    }

    #[test]
    fn test_truncated_trailing_object_is_dropped() {
        let doc = r#"{"cars":[{"_id":"1"},{"_id":"2","brand":"Fi"#;
        assert_eq!(spans(doc), vec![r#"{"_id":"1"}"#]);
    }

    #[test]
    fn test_whitespace_and_commas_between_objects() {
        let doc = "{\"cars\":[ {\"_id\":\"1\"} ,\n\t{\"_id\":\"2\"} ]}";
        assert_eq!(spans(doc), vec![r#"{"_id":"1"}"#, r#"{"_id":"2"}"#]);
    }

    #[test]
    fn test_multibyte_text_in_strings() {
        let doc = r#"{"cars":[{"brand":"Tofaş","series":"Şahin {"},{"brand":"Doğan"}]}"#;
        assert_eq!(
            spans(doc),
            vec![r#"{"brand":"Tofaş","series":"Şahin {"}"#, r#"{"brand":"Doğan"}"#]
        );
    }

    #[test]
    fn test_only_first_marker_is_used() {
        let doc = r#"{"cars":[{"_id":"1"}],"more":{"cars":[{"_id":"2"}]}}"#;
        assert_eq!(spans(doc), vec![r#"{"_id":"1"}"#]);
    }

    #[test]
    fn test_find_array_start_offsets() {
        assert_eq!(find_array_start(r#"{"cars":[]}"#), Some(9));
        assert_eq!(find_array_start(r#"{"bikes":[]}"#), None);
    }
}
