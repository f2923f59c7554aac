use crate::model::attendance::AttendanceRecord;
use crate::utils::flash::FlashMessage;
use std::fmt::Write;

/// Escape text for use inside HTML elements and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, notices: &[FlashMessage], body: &str) -> String {
    let mut flashes = String::new();
    for notice in notices {
        let _ = write!(
            flashes,
            r#"<div class="flash {}">{}</div>"#,
            notice.level,
            escape(&notice.message)
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<h1>{title}</h1>
{flashes}
{body}
</body>
</html>
"#,
        title = escape(title),
    )
}

pub fn index_page(notices: &[FlashMessage]) -> String {
    layout(
        "Mark Attendance",
        notices,
        r#"<form method="post" action="/submit">
<label for="name">Name</label>
<input type="text" id="name" name="name" required>
<button type="submit">Submit</button>
</form>
<p><a href="/dashboard">View dashboard</a></p>"#,
    )
}

pub fn dashboard_page(notices: &[FlashMessage], records: &[AttendanceRecord]) -> String {
    let mut rows = String::new();
    for record in records {
        let _ = writeln!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&record.name),
            escape(&record.date),
            escape(&record.time)
        );
    }

    let body = format!(
        r#"<table>
<thead><tr><th>Name</th><th>Date</th><th>Time</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
<p>{count} record(s)</p>
<p><a href="/">Mark attendance</a></p>"#,
        count = records.len(),
    );

    layout("Attendance Dashboard", notices, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("Bob, Jr."), "Bob, Jr.");
    }

    #[test]
    fn test_dashboard_lists_rows_in_order() {
        let records = vec![
            AttendanceRecord {
                name: "Alice".into(),
                date: "2024-01-01".into(),
                time: "09:00:00".into(),
            },
            AttendanceRecord {
                name: "Bob".into(),
                date: "2024-01-01".into(),
                time: "09:05:00".into(),
            },
        ];

        let page = dashboard_page(&[], &records);
        let alice = page.find("<td>Alice</td>").unwrap();
        let bob = page.find("<td>Bob</td>").unwrap();
        assert!(alice < bob);
        assert!(page.contains("2 record(s)"));
    }

    #[test]
    fn test_notices_rendered_with_level() {
        let page = index_page(&[FlashMessage::error("Name cannot be empty!")]);
        assert!(page.contains(r#"<div class="flash error">Name cannot be empty!</div>"#));
    }
}
