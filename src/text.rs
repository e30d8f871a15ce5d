//! Node sizing. Nodes have a fixed width; text is wrapped to the content
//! width and the height follows the line count.

use crate::config::NodeConfig;
use crate::graph::{MindMap, NodeStyle};

/// Horizontal advance of a single line of text.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font_size: f32, font_family: &str) -> f32;
}

/// Per-character width estimates; needs no fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedMetrics;

impl TextMeasure for EstimatedMetrics {
    fn text_width(&self, text: &str, font_size: f32, _font_family: &str) -> f32 {
        fallback_text_width(text, font_size)
    }
}

/// System font advances, falling back to estimates when no face resolves.
#[cfg(feature = "fonts")]
#[derive(Debug, Clone, Copy, Default)]
pub struct FontMetrics;

#[cfg(feature = "fonts")]
impl TextMeasure for FontMetrics {
    fn text_width(&self, text: &str, font_size: f32, font_family: &str) -> f32 {
        crate::text_metrics::measure_text_width(text, font_size, font_family)
            .unwrap_or_else(|| fallback_text_width(text, font_size))
    }
}

/// Measurer selected by `fast_text_metrics` and the `fonts` feature.
pub fn default_measurer(config: &NodeConfig) -> Box<dyn TextMeasure> {
    if config.fast_text_metrics {
        return Box::new(EstimatedMetrics);
    }
    font_measurer()
}

#[cfg(feature = "fonts")]
fn font_measurer() -> Box<dyn TextMeasure> {
    Box::new(FontMetrics)
}

#[cfg(not(feature = "fonts"))]
fn font_measurer() -> Box<dyn TextMeasure> {
    Box::new(EstimatedMetrics)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

pub fn measure_node_text(
    text: &str,
    style: &NodeStyle,
    config: &NodeConfig,
    measure: &dyn TextMeasure,
) -> TextBlock {
    let content_width = config.default_width - config.padding * 2.0;
    let width_of = |line: &str| measure.text_width(line, style.font_size, &style.font_family);

    let mut lines = Vec::new();
    for line in text.split('\n') {
        if width_of(line) > content_width {
            lines.extend(wrap_line(line, content_width, &width_of));
        } else {
            lines.push(line.to_string());
        }
    }

    let text_height = lines.len() as f32 * style.font_size * config.line_height;
    TextBlock {
        lines,
        width: config.default_width,
        height: (text_height + config.padding * 2.0).max(config.min_height),
    }
}

/// Recomputes every node's size from its text. The center keeps its center
/// point, nodes with children keep their right edge and leaves keep their
/// left edge.
pub fn resize_nodes(map: &mut MindMap, measure: &dyn TextMeasure) {
    let config = map.node_config().clone();
    for node in map.nodes_mut() {
        let block = measure_node_text(&node.text, &node.style, &config, measure);
        if !node.is_center() {
            node.x = if node.children().is_empty() {
                node.x - node.width / 2.0 + block.width / 2.0
            } else {
                node.x + node.width / 2.0 - block.width / 2.0
            };
        }
        node.width = block.width;
        node.height = block.height;
    }
}

/// Word wrapping when the line has spaces, character wrapping otherwise.
/// Single words wider than `max_width` stay on their own line.
pub(crate) fn wrap_line(line: &str, max_width: f32, width_of: &dyn Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();

    if line.contains(' ') {
        let mut words = line.split(' ');
        let mut current = words.next().unwrap_or_default().to_string();
        for word in words {
            let candidate = format!("{current} {word}");
            if width_of(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
        return lines;
    }

    let mut current = String::new();
    for ch in line.chars() {
        current.push(ch);
        if width_of(&current) > max_width && current.chars().count() > 1 {
            current.pop();
            lines.push(std::mem::take(&mut current));
            current.push(ch);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub(crate) fn char_width_factor(ch: char) -> f32 {
    // Relative advances of a typical sans-serif face, per unit font size.
    match ch {
        ' ' => 0.278,
        '\\' | '.' | ',' | ':' | ';' | '|' | '!' | '(' | ')' | '[' | ']' | '{' | '}' => 0.3,
        'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 0.667,
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' => 0.722,
        'F' | 'T' | 'Z' => 0.611,
        'G' | 'O' | 'Q' => 0.778,
        'I' => 0.278,
        'J' => 0.5,
        'L' => 0.556,
        'M' => 0.833,
        'W' => 0.944,
        'f' | 't' => 0.278,
        'i' | 'j' | 'l' => 0.222,
        'm' => 0.833,
        'r' => 0.333,
        'w' => 0.722,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 0.5,
        'a'..='z' | '0'..='9' => 0.556,
        '@' => 1.015,
        '#' | '%' | '&' => 0.889,
        c if is_wide(c) => 1.0,
        _ => 0.556,
    }
}

/// CJK ideographs, kana and full-width forms occupy a full em.
fn is_wide(ch: char) -> bool {
    matches!(ch as u32,
        0x1100..=0x115F
        | 0x2E80..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6)
}

pub(crate) fn fallback_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}
