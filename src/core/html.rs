// src/core/html.rs
// Low-level HTML string scanning.
// Deliberately naive: no DOM, no implied end tags. Tag and attribute names
// match case-insensitively on ASCII; byte offsets into the lowercased copy
// line up with the original.

use super::sanitize::{decode_entities, normalize_ws};

/// One element found by [`elements`]: the opening tag and the markup between
/// the tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Element<'a> {
    pub open_tag: &'a str,
    pub inner: &'a str,
}

impl<'a> Element<'a> {
    pub fn attr(&self, name: &str) -> Option<String> {
        attr_value(self.open_tag, name)
    }

    pub fn text(&self) -> String {
        text_content(self.inner)
    }
}

/// Fast ASCII-only lowercasing for tag/attribute matching.
pub fn to_lowercase_fast(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

fn is_name_boundary(b: Option<&u8>) -> bool {
    match b {
        None => true,
        Some(c) => c.is_ascii_whitespace() || *c == b'>' || *c == b'/',
    }
}

/// Byte just past the `>` closing the tag that opens at `start`. A `>` inside a
/// quoted attribute value does not end the tag.
fn tag_end(s: &str, start: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    let mut after_eq = false;
    for (i, &b) in s.as_bytes().iter().enumerate().skip(start + 1) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => continue,
            None => match b {
                b'>' => return Some(i + 1),
                b'"' | b'\'' if after_eq => {
                    quote = Some(b);
                    continue;
                }
                _ => {}
            },
        }
        if !b.is_ascii_whitespace() {
            after_eq = b == b'=';
        }
    }
    None
}

/// Lowercased copy of `s` with comments and `script`/`style` bodies blanked to
/// spaces, so markup inside them is never matched. Offsets still line up with `s`.
fn scan_copy(s: &str) -> String {
    let lc = to_lowercase_fast(s);
    let mut hidden: Vec<(usize, usize)> = Vec::new();
    let mut pos = 0usize;

    while let Some(rel) = lc[pos..].find('<') {
        let at = pos + rel;
        let rest = &lc[at..];
        if rest.starts_with("<!--") {
            let end = rest[4..].find("-->").map_or(lc.len(), |j| at + 4 + j + 3);
            hidden.push((at, end));
            pos = end;
            continue;
        }
        let raw = ["script", "style"].into_iter().find(|&name| {
            rest[1..].starts_with(name) && is_name_boundary(rest.as_bytes().get(1 + name.len()))
        });
        match raw {
            Some(name) => {
                let body = tag_end(&lc, at).unwrap_or(lc.len());
                let close = find_close(&lc, name, body).unwrap_or(lc.len());
                hidden.push((body, close));
                pos = close.max(at + 1);
            }
            None => pos = at + 1,
        }
    }

    if hidden.is_empty() {
        return lc;
    }
    let mut out = String::with_capacity(lc.len());
    let mut last = 0usize;
    for (from, to) in hidden {
        out.push_str(&lc[last..from]);
        out.extend(std::iter::repeat_n(' ', to - from));
        last = to;
    }
    out.push_str(&lc[last..]);
    out
}

/// Position of the next `<tag` (not `<tagfoo`) at or after `from`. `lc` must be lowercase.
fn find_open(lc: &str, tag: &str, from: usize) -> Option<usize> {
    let pat = format!("<{tag}");
    let mut pos = from;
    while let Some(rel) = lc.get(pos..)?.find(&pat) {
        let at = pos + rel;
        if is_name_boundary(lc.as_bytes().get(at + pat.len())) {
            return Some(at);
        }
        pos = at + 1;
    }
    None
}

/// Position of the next `</tag` at or after `from`. `lc` must be lowercase.
fn find_close(lc: &str, tag: &str, from: usize) -> Option<usize> {
    let pat = format!("</{tag}");
    let mut pos = from;
    while let Some(rel) = lc.get(pos..)?.find(&pat) {
        let at = pos + rel;
        if is_name_boundary(lc.as_bytes().get(at + pat.len())) {
            return Some(at);
        }
        pos = at + 1;
    }
    None
}

/// Every `<tag>` element in `s`, nested ones included, in document order.
///
/// Closing tags are matched by depth. An element with no closing tag runs to
/// the end of `s`. Markup inside comments and `script`/`style` bodies is skipped.
pub fn elements<'a>(s: &'a str, tag: &str) -> Vec<Element<'a>> {
    let lc = scan_copy(s);
    let tag = to_lowercase_fast(tag);
    let mut out = Vec::new();
    let mut from = 0usize;

    while let Some(start) = find_open(&lc, &tag, from) {
        from = start + 1;
        let Some(open_end) = tag_end(&lc, start) else { break };
        let open_tag = &s[start..open_end];

        if open_tag.ends_with("/>") {
            out.push(Element { open_tag, inner: "" });
            continue;
        }

        let mut depth = 1usize;
        let mut pos = open_end;
        let inner_end = loop {
            let next_open = find_open(&lc, &tag, pos);
            match (next_open, find_close(&lc, &tag, pos)) {
                (Some(o), Some(c)) if o < c => {
                    depth += 1;
                    pos = o + 1;
                }
                (_, Some(c)) => {
                    depth -= 1;
                    if depth == 0 {
                        break c;
                    }
                    pos = c + 1;
                }
                (_, None) => break s.len(),
            }
        };

        out.push(Element { open_tag, inner: &s[open_end..inner_end] });
    }
    out
}

/// First `<tag>` element in `s`, if any.
pub fn first_element<'a>(s: &'a str, tag: &str) -> Option<Element<'a>> {
    elements(s, tag).into_iter().next()
}

/// Value of attribute `name` on an opening tag such as `<table class="a b" id=t>`.
/// Returns `Some("")` for a bare attribute (`<td nowrap>`).
pub fn attr_value(open_tag: &str, name: &str) -> Option<String> {
    let body = open_tag
        .strip_prefix('<')?
        .trim_end_matches('>')
        .trim_end_matches('/');
    // Skip the tag name.
    let mut rest = body.trim_start_matches(|c: char| !c.is_whitespace());

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return None;
        }
        let key_len = rest
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let key = &rest[..key_len];
        rest = rest[key_len..].trim_start();

        let value = if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let (v, remaining) = match after_eq.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    let close = body.find(q).unwrap_or(body.len());
                    (&body[..close], body.get(close + 1..).unwrap_or(""))
                }
                _ => {
                    let stop = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                    (&after_eq[..stop], &after_eq[stop..])
                }
            };
            rest = remaining;
            v
        } else {
            ""
        };

        if key.eq_ignore_ascii_case(name) {
            return Some(decode_entities(value));
        }
    }
}

/// Text of a fragment: tags and comments dropped, entities decoded, whitespace
/// collapsed.
pub fn text_content(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut rest = inner;
    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tail = &rest[lt..];
        let skip = if let Some(comment) = tail.strip_prefix("<!--") {
            comment.find("-->").map_or(tail.len(), |j| 4 + j + 3)
        } else {
            tag_end(tail, 0).unwrap_or(tail.len())
        };
        rest = &tail[skip..];
    }
    out.push_str(rest);
    normalize_ws(&decode_entities(&out))
}
