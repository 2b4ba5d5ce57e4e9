//! Key/value extraction from KML description tables.
//!
//! Regional-rail placemarks exported from KML carry their attributes as an
//! HTML table in the `Description` field, one `<td>Key</td><td>Value</td>`
//! pair per row. The value is whatever cell follows the key.

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesText, Event};

/// Errors from [`get_next_after_match`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("target {0} not found in the array")]
    NotFound(String),

    #[error("target {0} is the last element in the array")]
    IsLast(String),
}

/// Return the element that follows the first occurrence of `target`.
///
/// Matching is exact and case-sensitive.
///
/// ```
/// use next_train_server::stations::get_next_after_match;
///
/// let cells = ["a", "b", "c", "d"];
/// assert_eq!(get_next_after_match(&cells, "b"), Ok("c"));
/// assert!(get_next_after_match(&cells, "d").is_err());
/// ```
pub fn get_next_after_match<'a, S: AsRef<str>>(
    items: &'a [S],
    target: &str,
) -> Result<&'a str, MatchError> {
    let idx = items
        .iter()
        .position(|item| item.as_ref() == target)
        .ok_or_else(|| MatchError::NotFound(target.to_string()))?;

    items
        .get(idx + 1)
        .map(AsRef::as_ref)
        .ok_or_else(|| MatchError::IsLast(target.to_string()))
}

/// Text of every non-empty `<td>` cell inside a `<tr>` row, in order.
///
/// The fragment is read leniently: end tags need not match, comments and
/// attributes are skipped, and character references are decoded. Text from
/// markup nested inside a cell is kept. Cells that are empty after trimming
/// are skipped.
pub fn description_cells(html: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut cells = Vec::new();
    let mut open_rows = 0usize;
    let mut cell: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) if is_tag(e.name().as_ref(), b"tr") => open_rows += 1,
            Event::End(e) if is_tag(e.name().as_ref(), b"tr") => {
                open_rows = open_rows.saturating_sub(1);
                push_cell(&mut cells, cell.take());
            }
            Event::Start(e) if open_rows > 0 && is_tag(e.name().as_ref(), b"td") => {
                push_cell(&mut cells, cell.replace(String::new()));
            }
            Event::End(e) if is_tag(e.name().as_ref(), b"td") => {
                push_cell(&mut cells, cell.take());
            }
            Event::Text(text) => {
                if let Some(cell) = cell.as_mut() {
                    cell.push_str(&cell_text(&text));
                }
            }
            Event::CData(data) => {
                if let Some(cell) = cell.as_mut() {
                    cell.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    push_cell(&mut cells, cell.take());
    Ok(cells)
}

fn is_tag(name: &[u8], tag: &[u8]) -> bool {
    name.eq_ignore_ascii_case(tag)
}

fn push_cell(cells: &mut Vec<String>, cell: Option<String>) {
    if let Some(text) = cell {
        let text = text.trim();
        if !text.is_empty() {
            cells.push(text.to_string());
        }
    }
}

/// Decoded text; a stray `&` leaves the text as written.
fn cell_text(text: &BytesText<'_>) -> String {
    match text.unescape_with(html_entity) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(text).into_owned(),
    }
}

/// XML's predefined entities plus the HTML ones seen in exported tables.
fn html_entity(name: &str) -> Option<&'static str> {
    resolve_predefined_entity(name).or(match name {
        "nbsp" => Some(" "),
        "ndash" => Some("\u{2013}"),
        "mdash" => Some("\u{2014}"),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARR: [&str; 4] = ["a", "b", "c", "d"];

    #[test]
    fn basic() {
        assert_eq!(get_next_after_match(&ARR, "b"), Ok("c"));
    }

    #[test]
    fn target_not_found() {
        let err = get_next_after_match(&ARR, "x").unwrap_err();
        assert_eq!(err, MatchError::NotFound("x".into()));
        assert_eq!(err.to_string(), "target x not found in the array");
    }

    #[test]
    fn target_is_last() {
        let err = get_next_after_match(&ARR, "d").unwrap_err();
        assert_eq!(err, MatchError::IsLast("d".into()));
        assert_eq!(err.to_string(), "target d is the last element in the array");
    }

    #[test]
    fn target_is_second_last() {
        assert_eq!(get_next_after_match(&ARR, "c"), Ok("d"));
    }

    #[test]
    fn empty_array() {
        let empty: [&str; 0] = [];
        assert_eq!(
            get_next_after_match(&empty, "x"),
            Err(MatchError::NotFound("x".into()))
        );
    }

    #[test]
    fn single_element() {
        assert_eq!(
            get_next_after_match(&["a"], "a"),
            Err(MatchError::IsLast("a".into()))
        );
    }

    #[test]
    fn duplicate_targets_use_first() {
        assert_eq!(get_next_after_match(&["a", "b", "c", "b", "d"], "b"), Ok("c"));
    }

    #[test]
    fn numeric_and_special_characters() {
        assert_eq!(get_next_after_match(&["1", "2", "3", "4"], "2"), Ok("3"));
        assert_eq!(get_next_after_match(&["@", "#", "$", "%"], "#"), Ok("$"));
    }

    #[test]
    fn case_sensitive() {
        let arr = ["a", "B", "c", "D"];
        assert_eq!(
            get_next_after_match(&arr, "b"),
            Err(MatchError::NotFound("b".into()))
        );
        assert_eq!(get_next_after_match(&arr, "B"), Ok("c"));
    }

    #[test]
    fn works_with_owned_strings() {
        let arr: Vec<String> = vec!["Stop_ID".into(), "90004".into()];
        assert_eq!(get_next_after_match(&arr, "Stop_ID"), Ok("90004"));
    }

    #[test]
    fn cells_from_kml_description() {
        let html = r##"<html><body><table border="1">
            <tr bgcolor="#E3E3F3"><th>Field</th><th>Value</th></tr>
            <tr><td>Stop_ID</td><td>90004</td></tr>
            <tr bgcolor="#E3E3F3"><td>Station_Na</td><td>30th Street Station</td></tr>
            <tr><td>Line</td><td></td></tr>
        </table></body></html>"##;

        let cells = description_cells(html).unwrap();
        assert_eq!(
            cells,
            ["Stop_ID", "90004", "Station_Na", "30th Street Station", "Line"]
        );
        assert_eq!(get_next_after_match(&cells, "Stop_ID"), Ok("90004"));
        assert_eq!(
            get_next_after_match(&cells, "Station_Na"),
            Ok("30th Street Station")
        );
    }

    #[test]
    fn cells_decode_entities_and_nested_markup() {
        let html = "<TR><TD>Name</TD><TD><b>Fox&nbsp;Chase</b> &amp; more</TD></TR>";
        assert_eq!(description_cells(html).unwrap(), ["Name", "Fox Chase & more"]);
    }

    #[test]
    fn cells_decode_numeric_references() {
        let html = "<tr><td>Stop&#95;ID</td><td>&#x39;0004</td></tr>";
        assert_eq!(description_cells(html).unwrap(), ["Stop_ID", "90004"]);
    }

    #[test]
    fn attribute_values_may_contain_angle_brackets() {
        let html = r#"<tr><td title="a>b">Stop_ID</td><td>90004</td></tr>"#;
        let cells = description_cells(html).unwrap();
        assert_eq!(cells, ["Stop_ID", "90004"]);
    }

    #[test]
    fn commented_out_cells_are_ignored() {
        let html = "<!-- <tr><td>Stop_ID</td><td>00000</td></tr> -->\
                    <tr><td>Stop&#95;ID</td><td>90004</td></tr>";
        let cells = description_cells(html).unwrap();
        assert_eq!(get_next_after_match(&cells, "Stop_ID"), Ok("90004"));
    }

    #[test]
    fn cells_outside_rows_are_ignored() {
        assert!(description_cells("<td>Stop_ID</td><td>1</td>").unwrap().is_empty());
    }

    #[test]
    fn stray_ampersand_kept_verbatim() {
        let html = "<tr><td>Name</td><td>Fox & Hounds</td></tr>";
        assert_eq!(description_cells(html).unwrap(), ["Name", "Fox & Hounds"]);
    }

    #[test]
    fn unclosed_row_still_yields_cells() {
        let html = "<table><tr><td>a</td><td>b<br>c</td></table>";
        assert_eq!(description_cells(html).unwrap(), ["a", "bc"]);
    }

    #[test]
    fn cells_without_table() {
        assert!(description_cells("no table here").unwrap().is_empty());
        assert!(description_cells("").unwrap().is_empty());
    }

    #[test]
    fn truncated_tag_is_error() {
        assert!(description_cells("<tr><td>a</td><td").is_err());
    }
}
