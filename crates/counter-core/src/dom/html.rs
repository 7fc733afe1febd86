//! Markup loader for the simulated DOM
//!
//! Covers the subset static pages use: comments, doctype, quoted and bare
//! attributes, void and self-closing elements, raw `<script>`/`<style>`
//! bodies. Entities are not decoded. Only `id` and `class` attributes are kept.

use super::{DomError, Element};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Parse `markup` into its top-level elements. Whitespace-only text between
/// tags is dropped; a stray end tag with no open match is ignored.
pub(super) fn parse(markup: &str) -> Result<Vec<Element>, DomError> {
    let mut parser = Parser {
        src: markup,
        pos: 0,
        roots: Vec::new(),
        open: Vec::new(),
    };
    parser.run()?;
    Ok(parser.roots)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    roots: Vec<Element>,
    open: Vec<Element>,
}

impl Parser<'_> {
    fn run(&mut self) -> Result<(), DomError> {
        while self.pos < self.src.len() {
            let rest = &self.src[self.pos..];
            if rest.starts_with("<!--") {
                self.pos = self.find_from(self.pos + 4, "-->", "unterminated comment")? + 3;
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.pos = self.find_from(self.pos, ">", "unterminated declaration")? + 1;
            } else if rest.starts_with("</") {
                self.end_tag()?;
            } else if rest.starts_with('<') && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
                self.start_tag()?;
            } else {
                let skip = rest.chars().next().map_or(1, char::len_utf8);
                let end = rest[skip..]
                    .find('<')
                    .map_or(self.src.len(), |i| self.pos + skip + i);
                self.text(&self.src[self.pos..end]);
                self.pos = end;
            }
        }
        Ok(())
    }

    fn find_from(&self, from: usize, needle: &str, message: &str) -> Result<usize, DomError> {
        self.src[from..]
            .find(needle)
            .map(|i| from + i)
            .ok_or_else(|| DomError::Parse {
                offset: self.pos,
                message: message.to_string(),
            })
    }

    fn text(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        if let Some(parent) = self.open.last() {
            parent.append_text(text);
        }
    }

    fn attach(&mut self, element: Element) {
        match self.open.last() {
            Some(parent) => parent.append_child(element),
            None => self.roots.push(element),
        }
    }

    fn end_tag(&mut self) -> Result<(), DomError> {
        let close = self.find_from(self.pos, ">", "unterminated end tag")?;
        let name = self.src[self.pos + 2..close].trim().to_ascii_lowercase();
        self.pos = close + 1;

        if let Some(depth) = self.open.iter().rposition(|e| e.tag_name() == name) {
            self.open.truncate(depth);
        }
        Ok(())
    }

    fn start_tag(&mut self) -> Result<(), DomError> {
        let start = self.pos;
        let close = self.tag_end(start)?;
        let inner = &self.src[start + 1..close];
        let self_closing = inner.ends_with('/');
        let inner = inner.trim_end_matches('/');

        let name_len = inner
            .find(|c: char| c.is_ascii_whitespace())
            .unwrap_or(inner.len());
        let tag = inner[..name_len].to_ascii_lowercase();
        let attrs = parse_attributes(&inner[name_len..]);

        let id = attribute(&attrs, "id").unwrap_or_default();
        let mut element = Element::new(&tag, id);
        if let Some(classes) = attribute(&attrs, "class") {
            for class in classes.split_ascii_whitespace() {
                element = element.with_class(class);
            }
        }
        self.pos = close + 1;
        self.attach(element.clone());

        if self_closing || VOID_ELEMENTS.contains(&tag.as_str()) {
            return Ok(());
        }

        if RAW_TEXT_ELEMENTS.contains(&tag.as_str()) {
            let end_tag = format!("</{tag}");
            let body_end = self.src[self.pos..]
                .to_ascii_lowercase()
                .find(&end_tag)
                .map(|i| self.pos + i)
                .ok_or_else(|| DomError::Parse {
                    offset: start,
                    message: format!("<{tag}> is never closed"),
                })?;
            let body = &self.src[self.pos..body_end];
            if !body.is_empty() {
                element.append_text(body);
            }
            self.pos = body_end;
            return Ok(());
        }

        self.open.push(element);
        Ok(())
    }

    /// Offset of the `>` closing the tag at `start`, skipping quoted values
    fn tag_end(&self, start: usize) -> Result<usize, DomError> {
        let mut quote = None;
        for (i, c) in self.src[start..].char_indices() {
            match (quote, c) {
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(c),
                (None, '>') => return Ok(start + i),
                _ => {}
            }
        }
        Err(DomError::Parse {
            offset: start,
            message: "unterminated tag".to_string(),
        })
    }
}

fn parse_attributes(mut s: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    loop {
        s = s.trim_start();
        if s.is_empty() {
            return attrs;
        }
        let name_len = s
            .find(|c: char| c.is_ascii_whitespace() || c == '=')
            .unwrap_or(s.len());
        let name = s[..name_len].to_ascii_lowercase();
        s = s[name_len..].trim_start();

        let value = match s.strip_prefix('=') {
            Some(after) => {
                let after = after.trim_start();
                match after.chars().next() {
                    Some(q @ ('"' | '\'')) => {
                        let body = &after[1..];
                        let len = body.find(q).unwrap_or(body.len());
                        s = body.get(len + 1..).unwrap_or("");
                        body[..len].to_string()
                    }
                    _ => {
                        let len = after
                            .find(|c: char| c.is_ascii_whitespace())
                            .unwrap_or(after.len());
                        s = &after[len..];
                        after[..len].to_string()
                    }
                }
            }
            None => String::new(),
        };
        attrs.push((name, value));
    }
}

fn attribute<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}
