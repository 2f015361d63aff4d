//! Minimal HTML table extraction, tailored to the basketball-reference page
//! structure. Deliberately naive: no DOM and no nesting awareness, just
//! ASCII case-insensitive tag scanning. Secondary tables on the site are
//! wrapped in HTML comments, so comments are stripped before locating the
//! table.

// ---------------------------------------------------------------------------
// Document-level helpers
// ---------------------------------------------------------------------------

/// Remove every `<!-- ... -->` block. An unterminated comment swallows the
/// rest of the document, mirroring how lxml-based parsers treat it.
pub fn strip_comments(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find("<!--") {
        out.push_str(&rest[..start]);
        match rest[start + 4..].find("-->") {
            Some(end) => rest = &rest[start + 4 + end + 3..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Inner HTML of the first `<table ...>` element, or None if the document
/// has no table.
pub fn first_table(html: &str) -> Option<&str> {
    let lc = to_lower(html);
    let open = find_tag_open(&lc, "table", 0)?;
    let after_open = html[open..].find('>')? + open + 1;
    let close = lc[after_open..].find("</table")?;
    Some(&html[after_open..after_open + close])
}

// ---------------------------------------------------------------------------
// Row and cell walking
// ---------------------------------------------------------------------------

/// Every `<tr>` block inside table markup, as cleaned cell texts. Header
/// and data cells (`<th>` and `<td>`) are taken in document order; the
/// stats rows render their rank cell as `<th scope="row">`.
pub fn table_rows(table: &str) -> Vec<Vec<String>> {
    let lc = to_lower(table);
    let mut rows = Vec::new();
    let mut pos = 0usize;
    while let Some(start) = find_tag_open(&lc, "tr", pos) {
        let Some(open_end) = table[start..].find('>') else {
            break;
        };
        let content_start = start + open_end + 1;
        let content_end = match lc[content_start..].find("</tr") {
            Some(rel) => content_start + rel,
            None => table.len(),
        };
        let cells = row_cells(&table[content_start..content_end]);
        if !cells.is_empty() {
            rows.push(cells);
        }
        pos = content_end.max(start + 1);
    }
    rows
}

/// Cleaned text of every `<th>`/`<td>` cell in one row, in document order.
fn row_cells(tr: &str) -> Vec<String> {
    let lc = to_lower(tr);
    let mut cells = Vec::new();
    let mut pos = 0usize;
    loop {
        let th = find_tag_open(&lc, "th", pos);
        let td = find_tag_open(&lc, "td", pos);
        let (tag, start) = match (th, td) {
            (Some(a), Some(b)) if a < b => ("th", a),
            (Some(a), None) => ("th", a),
            (_, Some(b)) => ("td", b),
            (None, None) => break,
        };
        let Some(open_end) = tr[start..].find('>') else {
            break;
        };
        let content_start = start + open_end + 1;
        let close_pat = format!("</{tag}");
        let content_end = match lc[content_start..].find(&close_pat) {
            Some(rel) => content_start + rel,
            None => tr.len(),
        };
        cells.push(clean_text(&tr[content_start..content_end]));
        pos = content_end.max(start + 1);
    }
    cells
}

// ---------------------------------------------------------------------------
// Text cleanup
// ---------------------------------------------------------------------------

/// Strip nested tags, then decode the common entities and collapse
/// whitespace. Tags are stripped first so a decoded `&lt;` cannot be
/// mistaken for markup.
pub fn clean_text(s: &str) -> String {
    let mut text = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    normalize_ws(&decode_entities(&text))
}

// `&amp;` must decode last, or `&amp;lt;` would turn into `<`.
fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Collapse whitespace runs into single spaces and trim.
fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Position of `<tag` at or after `from`, requiring a tag-name boundary so
/// "th" does not match `<thead>`. Indices are valid for the original string
/// because ASCII lowercasing preserves byte offsets.
fn find_tag_open(lc: &str, tag: &str, from: usize) -> Option<usize> {
    let pat = format!("<{tag}");
    let mut at = from;
    while let Some(rel) = lc.get(at..)?.find(&pat) {
        let start = at + rel;
        match lc.as_bytes().get(start + pat.len()) {
            Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b'>') | Some(b'/') => {
                return Some(start);
            }
            None => return None,
            _ => at = start + 1,
        }
    }
    None
}

fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_comments_removes_hidden_tables() {
        let html = "before <!-- <table><tr><td>hidden</td></tr></table> --> after";
        assert_eq!(strip_comments(html), "before  after");
        // Unterminated comment swallows the tail.
        assert_eq!(strip_comments("keep <!-- lost"), "keep ");
    }

    #[test]
    fn first_table_returns_inner_of_first_only() {
        let html = r#"<p>x</p><TABLE id="a"><tr><td>1</td></tr></TABLE><table><tr><td>2</td></tr></table>"#;
        let inner = first_table(html).expect("table present");
        assert_eq!(inner, "<tr><td>1</td></tr>");
        assert!(first_table("<p>no tables here</p>").is_none());
    }

    #[test]
    fn table_rows_reads_th_and_td_in_order() {
        let table = r#"
            <thead><tr><th>Rk</th><th>Player</th><th>PTS</th></tr></thead>
            <tbody>
              <tr><th scope="row">1</th><td><a href="/x.html">Luka Don&#39;cic</a></td><td>33.9</td></tr>
            </tbody>
        "#;
        let rows = table_rows(table);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["Rk", "Player", "PTS"]);
        assert_eq!(rows[1], vec!["1", "Luka Don'cic", "33.9"]);
    }

    #[test]
    fn thead_is_not_mistaken_for_a_header_cell() {
        let rows = table_rows("<thead><tr><td>only</td></tr></thead>");
        assert_eq!(rows, vec![vec!["only".to_string()]]);
    }

    #[test]
    fn clean_text_strips_tags_and_decodes_entities() {
        assert_eq!(clean_text("<strong>AT&amp;L</strong>"), "AT&L");
        assert_eq!(clean_text("  a \n  b&nbsp;c "), "a b c");
        assert_eq!(clean_text("x &lt;sup&gt; y"), "x <sup> y");
        // An escaped entity decodes one level, not two.
        assert_eq!(clean_text("a &amp;lt; b"), "a &lt; b");
    }
}
