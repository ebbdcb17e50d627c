use crate::form::{ControlKind, DeclaredType, EditForm, FormControl};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

// Numbers go out the way a browser writes them: integral values without a
// fractional part, non-finite values as null.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Text(value) => serializer.serialize_str(value),
            Self::Number(value) if !value.is_finite() => serializer.serialize_none(),
            Self::Number(value)
                if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 =>
            {
                serializer.serialize_i64(*value as i64)
            }
            Self::Number(value) => serializer.serialize_f64(*value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChangeSet(BTreeMap<String, FieldValue>);

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn record(&mut self, name: &str, value: FieldValue) {
        self.0.insert(name.to_string(), value);
    }
}

pub fn check_changes(form: &EditForm) -> ChangeSet {
    let mut changes = ChangeSet::default();
    for control in form.controls.iter().filter(|control| !control.disabled) {
        if let Some(value) = compare(control) {
            changes.record(&control.name, value);
        }
    }
    changes
}

fn compare(control: &FormControl) -> Option<FieldValue> {
    match control.kind {
        ControlKind::Checkbox => {
            let original = control.original == "true";
            (control.checked != original).then_some(FieldValue::Bool(control.checked))
        }
        ControlKind::Select if control.declared == DeclaredType::Bool => {
            let current = control.value == "True";
            let original = control.original == "True";
            (current != original).then_some(FieldValue::Bool(current))
        }
        ControlKind::Number => {
            let current = parse_float(&control.value);
            let original = parse_float(&control.original);
            let both_nan = current.is_nan() && original.is_nan();
            (current != original && !both_nan).then_some(FieldValue::Number(current))
        }
        ControlKind::Select | ControlKind::Text | ControlKind::Password => {
            let changed = control.value != control.original;
            changed.then(|| FieldValue::Text(control.value.clone()))
        }
    }
}

/// Browser `parseFloat`: skips leading whitespace, then reads the longest
/// decimal prefix. Anything without a numeric prefix is NaN.
pub fn parse_float(input: &str) -> f64 {
    let text = input.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        let infinity = f64::INFINITY;
        return if bytes[0] == b'-' { -infinity } else { infinity };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse().unwrap_or(f64::NAN)
}
