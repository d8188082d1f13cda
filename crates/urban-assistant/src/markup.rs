//! Lightweight markup used in assistant replies.
//!
//! Replies are split into blocks on blank lines. A block whose first line
//! starts with `- ` is a bullet list, one starting with `<number>.` is a
//! numbered list, anything else is a paragraph. A paragraph ends at the first
//! line that opens a list item, so an intro line directly above a list stays
//! separate from it. Inside a list, a line that does not open a new item
//! continues the current one. `**text**` marks emphasis anywhere inline.
//!
//! The result is a tree of plain values; front ends build their own elements
//! from it and never see raw markup.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Emphasis(String),
    LineBreak,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "children", rename_all = "snake_case")]
pub enum Block {
    Paragraph(Vec<Inline>),
    BulletList(Vec<Vec<Inline>>),
    NumberedList(Vec<Vec<Inline>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Paragraph,
    Bullet,
    Numbered,
}

/// Parse assistant text into blocks.
pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    for lines in split_blocks(text) {
        let (intro, list) = lines.split_at(list_start(&lines));
        if !intro.is_empty() {
            blocks.push(parse_block(intro));
        }
        if !list.is_empty() {
            blocks.push(parse_block(list));
        }
    }
    blocks
}

/// Index of the first line opening a list item, or the block length.
fn list_start(lines: &[&str]) -> usize {
    lines
        .iter()
        .position(|line| bullet_item(line).is_some() || numbered_item(line).is_some())
        .unwrap_or(lines.len())
}

fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn parse_block(lines: &[&str]) -> Block {
    let kind = match lines.first() {
        Some(first) if bullet_item(first).is_some() => BlockKind::Bullet,
        Some(first) if numbered_item(first).is_some() => BlockKind::Numbered,
        _ => BlockKind::Paragraph,
    };

    if kind == BlockKind::Paragraph {
        let mut inlines = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                inlines.push(Inline::LineBreak);
            }
            inlines.extend(parse_inline(line));
        }
        return Block::Paragraph(inlines);
    }

    let mut items: Vec<String> = Vec::new();
    for line in lines {
        let opened = match kind {
            BlockKind::Bullet => bullet_item(line),
            _ => numbered_item(line),
        };
        match opened {
            Some(rest) => items.push(rest.to_string()),
            None => match items.last_mut() {
                Some(item) => {
                    if !item.is_empty() {
                        item.push(' ');
                    }
                    item.push_str(line);
                }
                None => items.push(line.to_string()),
            },
        }
    }

    let items = items.iter().map(|item| parse_inline(item)).collect();
    match kind {
        BlockKind::Bullet => Block::BulletList(items),
        _ => Block::NumberedList(items),
    }
}

fn bullet_item(line: &str) -> Option<&str> {
    line.strip_prefix("- ").map(str::trim_start)
}

fn numbered_item(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

/// Parse `**emphasis**` spans. Unbalanced markers are kept as text.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        match after.find("**") {
            Some(end) if end > 0 => {
                push_text(&mut out, &rest[..start]);
                out.push(Inline::Emphasis(after[..end].to_string()));
                rest = &after[end + 2..];
            }
            _ => break,
        }
    }
    push_text(&mut out, rest);

    out
}

fn push_text(out: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(prev)) = out.last_mut() {
        prev.push_str(text);
    } else {
        out.push(Inline::Text(text.to_string()));
    }
}

/// Flatten inlines to plain text.
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(t) | Inline::Emphasis(t) => out.push_str(t),
            Inline::LineBreak => out.push('\n'),
        }
    }
    out
}

/// Render blocks as terminal-friendly text.
pub fn render_text(blocks: &[Block]) -> String {
    let rendered: Vec<String> = blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph(inlines) => plain_text(inlines),
            Block::BulletList(items) => items
                .iter()
                .map(|item| format!("• {}", plain_text(item)))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::NumberedList(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}. {}", i + 1, plain_text(item)))
                .collect::<Vec<_>>()
                .join("\n"),
        })
        .collect();

    rendered.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    fn em(s: &str) -> Inline {
        Inline::Emphasis(s.to_string())
    }

    #[test]
    fn test_paragraph_then_bullets() {
        let blocks = parse("**Bold** text\n\n- item one\n- item two");

        assert_eq!(
            blocks,
            vec![
                Block::Paragraph(vec![em("Bold"), text(" text")]),
                Block::BulletList(vec![vec![text("item one")], vec![text("item two")]]),
            ]
        );
    }

    #[test]
    fn test_numbered_list_with_continuation_lines() {
        let blocks = parse("1. **Ballard** scores well\nbecause of transit\n2. Fremont\n10. Wallingford");

        assert_eq!(
            blocks,
            vec![Block::NumberedList(vec![
                vec![em("Ballard"), text(" scores well because of transit")],
                vec![text("Fremont")],
                vec![text("Wallingford")],
            ])]
        );
    }

    #[test]
    fn test_intro_line_directly_above_list() {
        let blocks = parse("**Ballard** looks good:\n- transit\n- zoning");

        assert_eq!(
            blocks,
            vec![
                Block::Paragraph(vec![em("Ballard"), text(" looks good:")]),
                Block::BulletList(vec![vec![text("transit")], vec![text("zoning")]]),
            ]
        );
        assert_eq!(
            render_text(&blocks),
            "Ballard looks good:\n\n• transit\n• zoning"
        );
    }

    #[test]
    fn test_decimal_number_is_not_a_list_item() {
        let blocks = parse("3.5 million residents");
        assert_eq!(blocks, vec![Block::Paragraph(vec![text("3.5 million residents")])]);
    }

    #[test]
    fn test_unbalanced_emphasis_stays_literal() {
        assert_eq!(parse_inline("a **b"), vec![text("a **b")]);
        assert_eq!(parse_inline("**a** and **b**"), vec![em("a"), text(" and "), em("b")]);
    }

    #[test]
    fn test_markup_is_never_interpreted_as_html() {
        let blocks = parse("<script>alert(1)</script>");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![text("<script>alert(1)</script>")])]
        );
    }

    #[test]
    fn test_paragraph_line_breaks_and_crlf() {
        let blocks = parse("first\r\nsecond\r\n\r\n\r\nthird");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph(vec![text("first"), Inline::LineBreak, text("second")]),
                Block::Paragraph(vec![text("third")]),
            ]
        );
    }

    #[test]
    fn test_render_text() {
        let rendered = render_text(&parse("**Top picks**\n\n1. Ballard\n2. Fremont\n\n- cheap\n- close"));
        assert_eq!(rendered, "Top picks\n\n1. Ballard\n2. Fremont\n\n• cheap\n• close");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n  \n").is_empty());
    }
}
