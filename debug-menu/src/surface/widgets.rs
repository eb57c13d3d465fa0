//! Labelled value fields for window bodies
//!
//! Each field draws a fixed-width label on the left and an editor on the
//! right, and returns the edited value. Callers keep the value themselves.

use std::fmt::Debug;
use std::ops::RangeInclusive;

use hashbrown::HashMap;

use super::MenuSurface;

/// Width of the label column
pub const LABEL_FIELD_WIDTH: f32 = 150.0;

/// Label on the left, `field` on the right.
///
/// Returns `None` only if the surface skipped the row.
pub fn label_value_field<T>(
    s: &mut dyn MenuSurface,
    label: &str,
    field: impl FnOnce(&mut dyn MenuSurface) -> T,
) -> Option<T> {
    let mut field = Some(field);
    let mut result = None;
    s.horizontal(&mut |s| {
        s.fixed_label(label, LABEL_FIELD_WIDTH);
        if let Some(field) = field.take() {
            result = Some(field(s));
        }
    });
    result
}

pub fn label_field(s: &mut dyn MenuSurface, label: &str, value: &str) {
    label_value_field(s, label, |s| s.label(value));
}

/// Returns true when the button was clicked
pub fn button_field(s: &mut dyn MenuSurface, label: &str, button_label: &str) -> bool {
    label_value_field(s, label, |s| s.button(button_label)).unwrap_or(false)
}

/// Colored button that flips `value` when clicked
pub fn toggle_button(s: &mut dyn MenuSurface, value: bool, on_label: &str, off_label: &str) -> bool {
    let text = if value { on_label } else { off_label };
    value ^ s.toggle_button(text, value)
}

pub fn toggle_button_field(s: &mut dyn MenuSurface, label: &str, value: bool) -> bool {
    label_value_field(s, label, |s| toggle_button(s, value, "On", "Off")).unwrap_or(value)
}

pub fn text_field(s: &mut dyn MenuSurface, label: &str, value: &mut String) -> bool {
    label_value_field(s, label, |s| s.text_field(value)).unwrap_or(false)
}

pub fn slider_field_f32(s: &mut dyn MenuSurface, label: &str, mut value: f32, range: RangeInclusive<f32>) -> f32 {
    label_value_field(s, label, |s| {
        s.slider_f32(&mut value, range);
    });
    value
}

pub fn slider_field_i32(s: &mut dyn MenuSurface, label: &str, mut value: i32, range: RangeInclusive<i32>) -> i32 {
    label_value_field(s, label, |s| {
        s.slider_i32(&mut value, range);
    });
    value
}

/// Step through `len` choices with `<` and `>`, wrapping at both ends
fn step(index: Option<usize>, len: usize, left: bool, right: bool) -> Option<usize> {
    if len == 0 {
        return index;
    }
    match (index, left, right) {
        (Some(i), true, false) => Some((i + len - 1) % len),
        (Some(i), false, true) => Some((i + 1) % len),
        (None, true, false) => Some(len - 1),
        (None, false, true) => Some(0),
        _ => index,
    }
}

/// `<` current `>` n/len, with a single step per frame
fn arrow_row(s: &mut dyn MenuSurface, current: &str, index: Option<usize>, len: usize) -> Option<usize> {
    let left = s.button("<");
    s.label(current);
    let right = s.button(">");
    s.label(&format!("{}/{}", index.map_or(0, |i| i + 1), len));
    step(index, len, left, right)
}

/// Arrow selector over string choices; returns the new index
pub fn arrow_order_field(s: &mut dyn MenuSurface, label: &str, index: usize, choices: &[&str]) -> usize {
    if choices.is_empty() {
        label_field(s, label, "-");
        return index;
    }
    let index = index.min(choices.len() - 1);
    label_value_field(s, label, |s| arrow_row(s, choices[index], Some(index), choices.len()))
        .flatten()
        .unwrap_or(index)
}

/// Arrow selector over enum values.
///
/// `values` lists the selectable variants in order; leave out the ones to skip.
pub fn enum_arrow_field<T: Copy + PartialEq + Debug>(
    s: &mut dyn MenuSurface,
    label: &str,
    value: T,
    values: &[T],
) -> T {
    let index = values.iter().position(|v| *v == value);
    label_value_field(s, label, |s| arrow_row(s, &format!("{value:?}"), index, values.len()))
        .flatten()
        .and_then(|i| values.get(i).copied())
        .unwrap_or(value)
}

/// Slider with an Apply button; `on_apply` runs with the slider value when clicked
pub fn slider_with_apply_f32(
    s: &mut dyn MenuSurface,
    label: &str,
    mut value: f32,
    range: RangeInclusive<f32>,
    on_apply: impl FnOnce(f32),
) -> f32 {
    s.label(label);
    let mut apply = false;
    s.horizontal(&mut |s| {
        s.slider_f32(&mut value, range.clone());
        s.label(&format!("{value:.2}"));
        apply = s.button("Apply");
    });
    if apply {
        on_apply(value);
    }
    value
}

pub fn slider_with_apply_i32(
    s: &mut dyn MenuSurface,
    label: &str,
    mut value: i32,
    range: RangeInclusive<i32>,
    on_apply: impl FnOnce(i32),
) -> i32 {
    s.label(label);
    let mut apply = false;
    s.horizontal(&mut |s| {
        s.slider_i32(&mut value, range.clone());
        s.label(&value.to_string());
        apply = s.button("Apply");
    });
    if apply {
        on_apply(value);
    }
    value
}

/// Text filters that survive between frames, keyed by caller-chosen names
#[derive(Debug, Default)]
pub struct FilterState {
    filters: HashMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current filter text for `key` (empty if never edited)
    pub fn get(&self, key: &str) -> &str {
        self.filters.get(key).map_or("", String::as_str)
    }

    /// Draw the filter editor and return its text
    pub fn filter_field(&mut self, s: &mut dyn MenuSurface, key: &str, label: &str) -> &str {
        let filter = self.filters.entry_ref(key).or_default();
        s.label(label);
        s.text_field(filter);
        s.space(5.0);
        filter
    }

    /// Case-insensitive substring match against the filter for `key`
    pub fn matches(&self, key: &str, text: &str) -> bool {
        let filter = self.get(key);
        filter.is_empty() || text.to_lowercase().contains(&filter.to_lowercase())
    }
}
