//! Recipe source parser for the cooklang subset skillet consumes.
//!
//! A recipe file is plain text:
//!
//! ```text
//! >> servings: 4
//!
//! Mix @flour{2%cups} with @water and knead in a #bowl.
//!
//! Rest for ~{30%minutes}, then bake.
//! ```
//!
//! - `>> key: value` lines are metadata.
//! - `--` starts a comment running to end of line.
//! - Blank-line-separated paragraphs are steps; lines within a paragraph are
//!   joined with a single space.
//! - `@name` or `@multi word name{amount%unit}` marks an ingredient,
//!   `#cookware` and `~timer{amount%unit}` render as plain text.
//!
//! Each parsed ingredient carries the half-open byte span of its occurrence
//! in the rendered step text. Spans are produced while building that text,
//! so they always land on valid slice boundaries.

use serde::Serialize;
use thiserror::Error;

/// Errors raised on malformed recipe source. `line` is 1-based; for step
/// paragraphs it refers to the paragraph's first line.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: component `{{` is never closed")]
    UnclosedBraces { line: usize },

    #[error("line {line}: metadata line is missing `:`")]
    MetadataMissingColon { line: usize },
}

/// A parsed quantity: amount plus optional unit.
///
/// The amount stays a string; recipes use fractions ("1/2") and ranges that
/// no numeric type should flatten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quantity {
    pub amount: String,
    pub unit: Option<String>,
}

/// Where an ingredient occurs: step index plus the half-open byte span of
/// the name within that step's rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    pub step: usize,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: Option<Quantity>,
    /// Not serialized: templates receive highlighted steps, not raw spans.
    #[serde(skip)]
    pub occurrence: Option<Occurrence>,
}

/// A fully parsed recipe. Constructed fresh per render, discarded after use.
#[derive(Debug, Default)]
pub struct ParsedRecipe {
    /// Free-form key/value pairs in source order.
    pub metadata: Vec<(String, String)>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
}

/// Parse recipe source text.
pub fn parse(text: &str) -> Result<ParsedRecipe, ParseError> {
    let mut recipe = ParsedRecipe::default();
    let mut paragraph = String::new();
    let mut paragraph_line = 0;

    for (index, raw_line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw_line);

        if line.trim().is_empty() {
            // A genuinely blank line ends the current step; a line that was
            // only a comment does not.
            if raw_line.trim().is_empty() {
                flush_step(&mut recipe, &mut paragraph, paragraph_line)?;
            }
            continue;
        }

        if let Some(meta) = line.trim_start().strip_prefix(">>") {
            let (key, value) = meta
                .split_once(':')
                .ok_or(ParseError::MetadataMissingColon { line: line_no })?;
            recipe
                .metadata
                .push((key.trim().to_string(), value.trim().to_string()));
            continue;
        }

        if paragraph.is_empty() {
            paragraph_line = line_no;
        } else {
            paragraph.push(' ');
        }
        paragraph.push_str(line.trim());
    }
    flush_step(&mut recipe, &mut paragraph, paragraph_line)?;

    Ok(recipe)
}

/// Render the pending paragraph into a step, recording its ingredients.
fn flush_step(
    recipe: &mut ParsedRecipe,
    paragraph: &mut String,
    line: usize,
) -> Result<(), ParseError> {
    if paragraph.is_empty() {
        return Ok(());
    }
    let step_index = recipe.steps.len();
    let text = render_step(paragraph, step_index, line, &mut recipe.ingredients)?;
    recipe.steps.push(text);
    paragraph.clear();
    Ok(())
}

/// Truncate a line at the first `--` comment marker.
fn strip_comment(line: &str) -> &str {
    match line.find("--") {
        Some(pos) => &line[..pos],
        None => line,
    }
}

// ============================================================================
// Step component scanning
// ============================================================================

/// A scanned `@`/`#`/`~` component: its name, the raw `{...}` body if any,
/// and how many bytes of input (after the sigil) it consumed.
struct Component {
    name: String,
    body: Option<String>,
    consumed: usize,
}

/// Build a step's display text from its paragraph, replacing components with
/// their plain rendering and recording ingredient occurrence spans.
fn render_step(
    paragraph: &str,
    step_index: usize,
    line: usize,
    ingredients: &mut Vec<Ingredient>,
) -> Result<String, ParseError> {
    let mut text = String::with_capacity(paragraph.len());
    let mut rest = paragraph;

    while let Some(pos) = rest.find(['@', '#', '~']) {
        text.push_str(&rest[..pos]);
        let sigil = rest[pos..].chars().next().unwrap_or_default();
        let after = &rest[pos + sigil.len_utf8()..];

        let Some(component) = scan_component(after, sigil == '~', line)? else {
            // Not followed by a name: a literal sigil character.
            text.push(sigil);
            rest = after;
            continue;
        };

        rest = &after[component.consumed..];
        match sigil {
            '@' => {
                let start = text.len();
                text.push_str(&component.name);
                let end = text.len();
                ingredients.push(Ingredient {
                    name: component.name,
                    quantity: parse_quantity(component.body.as_deref()),
                    occurrence: Some(Occurrence {
                        step: step_index,
                        start,
                        end,
                    }),
                });
            }
            '#' => text.push_str(&component.name),
            '~' => text.push_str(&timer_text(&component)),
            _ => unreachable!(),
        }
    }
    text.push_str(rest);

    Ok(text)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '\'')
}

/// Scan one component starting right after its sigil.
///
/// A `{` preceded only by word characters and spaces makes a multi-word
/// component (`@red onion{1}`); otherwise the name is the longest run of
/// word characters (`@flour`). Returns `None` when no name is present, which
/// makes the sigil a literal character. Timers may have an empty name
/// (`~{10%minutes}`).
fn scan_component(
    rest: &str,
    allow_empty_name: bool,
    line: usize,
) -> Result<Option<Component>, ParseError> {
    if let Some(brace) = rest.find('{')
        && rest[..brace].chars().all(|c| is_word_char(c) || c == ' ')
    {
        let name = rest[..brace].trim();
        if !name.is_empty() || allow_empty_name {
            let close = rest[brace + 1..]
                .find('}')
                .ok_or(ParseError::UnclosedBraces { line })?;
            return Ok(Some(Component {
                name: name.to_string(),
                body: Some(rest[brace + 1..brace + 1 + close].to_string()),
                consumed: brace + 1 + close + 1,
            }));
        }
    }

    let word_end = rest.find(|c| !is_word_char(c)).unwrap_or(rest.len());
    if word_end == 0 {
        return Ok(None);
    }
    Ok(Some(Component {
        name: rest[..word_end].to_string(),
        body: None,
        consumed: word_end,
    }))
}

/// Parse a `{amount%unit}` body. Empty bodies mean no quantity.
fn parse_quantity(body: Option<&str>) -> Option<Quantity> {
    let body = body?.trim();
    if body.is_empty() {
        return None;
    }
    let (amount, unit) = match body.split_once('%') {
        Some((amount, unit)) => (amount.trim(), Some(unit.trim())),
        None => (body, None),
    };
    Some(Quantity {
        amount: amount.to_string(),
        unit: unit.filter(|u| !u.is_empty()).map(str::to_string),
    })
}

/// Plain-text rendering of a timer: its quantity when present, else its name.
fn timer_text(component: &Component) -> String {
    match parse_quantity(component.body.as_deref()) {
        Some(Quantity {
            amount,
            unit: Some(unit),
        }) => format!("{amount} {unit}"),
        Some(Quantity { amount, unit: None }) => amount,
        None => component.name.clone(),
    }
}
