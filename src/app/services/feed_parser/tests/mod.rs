//! Tests for the feed parser module


/// Header line used by feed fixtures
pub const TEST_HEADER: &str = "segment,object_code,object_name,country,parameter,date,value,source_file";

/// Build one feed row from its columns
pub fn feed_row(object_code: &str, country: &str, date: &str, value: &str, source_file: &str) -> String {
    format!(
        "Upper,{},Test canal {},{},discharge,{},{},{}",
        object_code, object_code, country, date, value, source_file
    )
}

/// Build a full feed text with header from rows
pub fn feed_text(rows: &[String]) -> String {
    let mut text = String::from(TEST_HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text
}

/// Split a row the way the parser does, as owned fields
pub fn fields_of(row: &str) -> Vec<String> {
    super::line_parser::split_line(row)
}
