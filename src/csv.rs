// src/csv.rs
use std::io::{self, Write};

use crate::record::PostRecord;

/// Fixed export column order.
pub const HEADERS: &[&str] = &[
    "URN",
    "Author",
    "Author Profile",
    "Author Headline",
    "Connection",
    "Company Post",
    "Posted",
    "Post URL",
    "Text",
    "Has Image",
    "Image URL",
    "Has Video",
    "Reactions",
    "Comments",
];

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer (RFC4180-style quoting).
pub fn write_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, ",")?; } else { first = false; }
        if needs_quotes(cell) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

fn opt(field: &Option<String>) -> String {
    field.clone().unwrap_or_default()
}

fn yes_no(b: bool) -> String {
    if b { s!("Yes") } else { s!("No") }
}

/// One record → one row, in `HEADERS` order.
pub fn record_row(rec: &PostRecord) -> Vec<String> {
    vec![
        rec.urn.clone(),
        opt(&rec.author_name),
        opt(&rec.author_profile_url),
        opt(&rec.author_headline),
        opt(&rec.connection_degree),
        yes_no(rec.is_company_post),
        opt(&rec.posted_time),
        opt(&rec.post_url),
        opt(&rec.post_text),
        yes_no(rec.has_image),
        opt(&rec.post_image_url),
        yes_no(rec.has_video),
        opt(&rec.reactions),
        opt(&rec.comments),
    ]
}

/// Full export string (Copy/Export) for a set of records.
pub fn to_export_string(records: &[PostRecord], include_headers: bool) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if include_headers {
        let h: Vec<String> = HEADERS.iter().map(|s| s.to_string()).collect();
        let _ = write_row(&mut buf, &h);
    }
    for rec in records {
        let _ = write_row(&mut buf, &record_row(rec));
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commas_and_quotes_are_escaped() {
        let mut rec = PostRecord::with_urn("urn:1");
        rec.post_text = Some(s!(r#"Hello, "world"
second line"#));

        let out = to_export_string(&[rec], false);
        assert!(out.contains(r#""Hello, ""world""
second line""#));
    }

    #[test]
    fn header_row_matches_record_row_width() {
        let rec = PostRecord::with_urn("urn:1");
        assert_eq!(record_row(&rec).len(), HEADERS.len());
    }

    #[test]
    fn booleans_export_as_yes_no() {
        let mut rec = PostRecord::with_urn("urn:1");
        rec.has_image = true;
        let row = record_row(&rec);
        assert!(row.contains(&s!("Yes")));
        assert!(row.contains(&s!("No")));
    }

    #[test]
    fn plain_fields_stay_unquoted() {
        let mut rec = PostRecord::with_urn("urn:1");
        rec.author_name = Some(s!("Jane Doe"));
        let out = to_export_string(&[rec], true);
        let mut lines = out.lines();
        assert!(lines.next().unwrap().starts_with("URN,Author,"));
        assert!(lines.next().unwrap().starts_with("urn:1,Jane Doe,"));
    }
}
