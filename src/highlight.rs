//! Ingredient call-outs inlined into step text.
//!
//! Rewrites each step so every ingredient occurrence is wrapped in markup,
//! with its parsed quantity inlined right after the name:
//!
//! ```text
//! Mix flour with water.
//! Mix <span class="ingr-name">flour</span><span class="ingr-quantity-inline">(2 cups)</span> with water.
//! ```
//!
//! Edits are applied in descending start-offset order. Every splice at a
//! higher offset leaves all lower offsets numerically unchanged, so the
//! spans recorded against the original text stay valid for the whole pass
//! no matter how many edits precede them in the source.

use crate::parser::{Ingredient, Quantity};

/// One pending edit: replace `[start, end)` of step `step` with markup.
struct Task<'a> {
    step: usize,
    start: usize,
    end: usize,
    name: &'a str,
    quantity: Option<&'a Quantity>,
}

/// Produce new step texts with every resolvable ingredient occurrence
/// wrapped in markup. Pure: inputs are untouched.
///
/// Ingredients without a resolvable occurrence (no span, a stale step
/// index, or a span that no longer lands on the step's boundaries) are
/// silently skipped. When two ingredients carry identical spans the one
/// applied last wins the leftmost position; the order is deterministic but
/// otherwise unspecified.
pub fn highlight(ingredients: &[Ingredient], steps: &[String]) -> Vec<String> {
    let mut tasks: Vec<Task> = ingredients
        .iter()
        .filter_map(|ingredient| {
            let occ = ingredient.occurrence?;
            Some(Task {
                step: occ.step,
                start: occ.start,
                end: occ.end,
                name: &ingredient.name,
                quantity: ingredient.quantity.as_ref(),
            })
        })
        .collect();

    // Back-to-front. Stable sort keeps identical-offset duplicates in
    // source order, which fixes which one ends up leftmost.
    tasks.sort_by(|a, b| b.start.cmp(&a.start));

    let mut highlighted: Vec<String> = steps.to_vec();
    for task in tasks {
        let Some(step) = highlighted.get_mut(task.step) else {
            continue;
        };
        if !resolvable(step, task.start, task.end) {
            continue;
        }
        let markup = markup_for(task.name, task.quantity);
        step.replace_range(task.start..task.end, &markup);
    }

    highlighted
}

/// A span is resolvable when it is in bounds, half-open, and lands on
/// character boundaries of the current step text.
fn resolvable(step: &str, start: usize, end: usize) -> bool {
    start < end && end <= step.len() && step.is_char_boundary(start) && step.is_char_boundary(end)
}

/// The markup fragment replacing one occurrence.
fn markup_for(name: &str, quantity: Option<&Quantity>) -> String {
    let mut markup = format!("<span class=\"ingr-name\">{name}</span>");
    if let Some(quantity) = quantity {
        markup.push_str("<span class=\"ingr-quantity-inline\">(");
        markup.push_str(&quantity.amount);
        if let Some(unit) = &quantity.unit {
            markup.push(' ');
            markup.push_str(unit);
        }
        markup.push_str(")</span>");
    }
    markup
}
