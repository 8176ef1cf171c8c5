//! Rendering model for AI comparison text.
//!
//! The comparison is an opaque string. The only structure recognised is per
//! line: `**heading**`, `• bullet`, plain paragraph, blank break.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Block {
    Heading(String),
    Bullet(String),
    Paragraph(String),
    Break,
}

/// Splits comparison text into render blocks, one per line.
pub fn render_blocks(text: &str) -> Vec<Block> {
    text.split('\n').map(classify_line).collect()
}

fn classify_line(line: &str) -> Block {
    if line.starts_with("**") && line.ends_with("**") {
        return Block::Heading(line.replace("**", ""));
    }
    if let Some(rest) = line.strip_prefix("• ") {
        return Block::Bullet(rest.to_string());
    }
    if !line.trim().is_empty() {
        return Block::Paragraph(line.to_string());
    }
    Block::Break
}
