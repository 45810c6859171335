// src/story/teaser.rs
//! Teaser for curated stories: first non-empty body paragraph, re-serialized
//! as balanced, one-node-per-line markup.

use html_escape::encode_double_quoted_attribute;
use scraper::{ElementRef, Html, Node};

use crate::story::nprml::{StoryNode, TextNode};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Returns `""` when the story has no `<text>`, no paragraphs, or only empty ones.
pub fn extract_teaser(story: &StoryNode) -> String {
    let Some(body) = story.text.as_ref() else {
        return String::new();
    };
    body.paragraphs
        .iter()
        .find_map(TextNode::text)
        .map(prettify_markup)
        .unwrap_or_default()
}

/// Parse `markup` as an HTML fragment and print it back one node per line,
/// children indented by one space per level. Text is emitted as-is, attribute
/// values are re-escaped inside double quotes.
pub fn prettify_markup(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    let mut out = String::with_capacity(markup.len() * 2);
    write_children(fragment.root_element(), 0, &mut out);
    out
}

fn write_children(parent: ElementRef<'_>, depth: usize, out: &mut String) {
    for child in parent.children() {
        match child.value() {
            Node::Text(text) => {
                let t = text.trim();
                if !t.is_empty() {
                    push_line(out, depth, t);
                }
            }
            Node::Comment(comment) => {
                push_line(out, depth, &format!("<!--{}-->", &**comment));
            }
            Node::Element(el) => {
                let name = el.name();
                let mut open = format!("<{name}");
                for (key, value) in el.attrs() {
                    open.push_str(&format!(
                        " {key}=\"{}\"",
                        encode_double_quoted_attribute(value)
                    ));
                }
                if VOID_ELEMENTS.contains(&name) {
                    open.push_str("/>");
                    push_line(out, depth, &open);
                    continue;
                }
                open.push('>');
                push_line(out, depth, &open);
                if let Some(child_el) = ElementRef::wrap(child) {
                    write_children(child_el, depth + 1, out);
                }
                push_line(out, depth, &format!("</{name}>"));
            }
            _ => {}
        }
    }
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    for _ in 0..depth {
        out.push(' ');
    }
    out.push_str(line);
    out.push('\n');
}
