use super::VizSession;
use crate::comparator::lcs_str;
use std::fmt::Write;

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; margin: 20px; }
    .container { max-width: 900px; margin: 0 auto; }
    .dp-table { border-collapse: collapse; margin: 20px 0; }
    .dp-table td { width: 40px; height: 40px; text-align: center; border: 1px solid #999; font-weight: bold; }
    .dp-table .header { background: #eee; font-style: italic; }
    .dp-table .empty { background: #f8f8f8; }
    .dp-table .current { background: #ff9999; }
    .dp-table .lcs-path { background: #ffff99; }
    .controls { margin: 20px 0; }
    .controls a { padding: 5px 15px; margin: 0 5px; border: 1px solid #999; text-decoration: none; color: #000; }
    .controls a.disabled { color: #aaa; pointer-events: none; }
    .step-info { margin: 10px 0; padding: 10px; background: #f5f5f5; border-radius: 4px; }
    input[type="text"] { padding: 5px; width: 240px; }
"#;

/// Escapes text for HTML bodies and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

/// Percent-encodes one query component (RFC 3986 unreserved set kept).
pub fn encode_query_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(b as char),
            _ => {
                let _ = write!(out, "%{:02X}", b);
            }
        }
    }
    out
}

pub fn step_href(str1: &str, str2: &str, step: usize) -> String {
    format!(
        "/?str1={}&str2={}&step={}",
        encode_query_component(str1),
        encode_query_component(str2),
        step
    )
}

/// The grid for the session's current step: a header row with S2, a column
/// index row, then one row per table row labelled with its S1 symbol.
pub fn render_table(session: &VizSession) -> String {
    let step = session.current();
    let s1: Vec<char> = session.str1().chars().collect();
    let s2: Vec<char> = session.str2().chars().collect();
    let mut out = String::new();

    out.push_str("<tr><td class='empty'></td><td class='empty'></td>");
    for c in &s2 {
        let _ = write!(out, "<td class='header'>{}</td>", escape_html(&c.to_string()));
    }
    out.push_str("</tr>\n");

    out.push_str("<tr><td class='empty'></td>");
    for j in 0..=s2.len() {
        let _ = write!(out, "<td class='header'>{}</td>", j);
    }
    out.push_str("</tr>\n");

    for i in 0..=s1.len() {
        out.push_str("<tr>");
        if i == 0 {
            out.push_str("<td class='header'>0</td>");
        } else {
            let _ = write!(
                out,
                "<td class='header'>{}{}</td>",
                escape_html(&s1[i - 1].to_string()),
                i
            );
        }
        for j in 0..=s2.len() {
            let class = if step.cell == Some((i, j)) {
                "current"
            } else if step.path.contains(&(i, j)) {
                "lcs-path"
            } else {
                ""
            };
            let _ = write!(out, "<td class='{}'>{}</td>", class, step.table.get(i, j));
        }
        out.push_str("</tr>\n");
    }
    out
}

/// A complete page for the session's current step.
pub fn render_page(session: &VizSession) -> String {
    let step = session.current();
    let (str1, str2) = (session.str1(), session.str2());
    let (prev, next) = session.neighbours();

    let result = if session.is_first() {
        let (lcs, length) = lcs_str(str1, str2);
        format!(
            "<div><b>Longest Common Subsequence:</b> '{}' (length: {})</div>",
            escape_html(&lcs),
            length
        )
    } else {
        String::new()
    };

    let mut info = escape_html(&step.description);
    if let Some(summary) = &step.summary {
        let _ = write!(info, "<br><b>{}</b>", escape_html(summary));
    }

    let disabled = |yes: bool| if yes { " class='disabled'" } else { "" };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>LCS Visualizer</title>
<style>{style}</style>
</head>
<body>
<div class="container">
<h1>Longest Common Subsequence Visualizer</h1>
<form method="post" action="/">
  <div><label for="str1">String 1:</label> <input type="text" id="str1" name="str1" value="{v1}"></div>
  <div style="margin-top: 10px;"><label for="str2">String 2:</label> <input type="text" id="str2" name="str2" value="{v2}"></div>
  <button type="submit" style="margin-top: 10px;">Visualize</button>
</form>
{result}
<div class="step-info">{info}</div>
<table class="dp-table">
{table}</table>
<div class="controls">
  <a href="{prev_href}"{prev_disabled}>Previous</a>
  <span>Step {current} of {total}</span>
  <a href="{next_href}"{next_disabled}>Next</a>
</div>
</div>
</body>
</html>
"#,
        style = STYLE,
        v1 = escape_html(str1),
        v2 = escape_html(str2),
        result = result,
        info = info,
        table = render_table(session),
        prev_href = escape_html(&step_href(str1, str2, prev)),
        prev_disabled = disabled(session.is_first()),
        current = session.cursor() + 1,
        total = session.total_steps(),
        next_href = escape_html(&step_href(str1, str2, next)),
        next_disabled = disabled(session.is_last()),
    )
}
