use crate::diff::{ChangeSet, check_changes};
use crate::errors::ConsoleError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONTAINER: &str = "edit-config-table";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Checkbox,
    Select,
    Number,
    #[default]
    Text,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredType {
    Bool,
    Numeric,
    #[default]
    Text,
}

impl DeclaredType {
    /// Maps a `data-type` attribute value as rendered by the backend.
    pub fn from_attr(attr: &str) -> Self {
        match attr {
            "bool" => Self::Bool,
            "int" | "float" => Self::Numeric,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormControl {
    pub name: String,
    #[serde(default)]
    pub kind: ControlKind,
    #[serde(default)]
    pub declared: DeclaredType,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub disabled: bool,
}

impl FormControl {
    fn with_value(name: &str, kind: ControlKind, declared: DeclaredType, original: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            declared,
            value: original.to_string(),
            checked: false,
            original: original.to_string(),
            disabled: false,
        }
    }

    pub fn text(name: &str, original: &str) -> Self {
        Self::with_value(name, ControlKind::Text, DeclaredType::Text, original)
    }

    pub fn password(name: &str, original: &str) -> Self {
        Self::with_value(name, ControlKind::Password, DeclaredType::Text, original)
    }

    pub fn number(name: &str, original: &str) -> Self {
        Self::with_value(name, ControlKind::Number, DeclaredType::Numeric, original)
    }

    pub fn select(name: &str, original: &str, declared: DeclaredType) -> Self {
        Self::with_value(name, ControlKind::Select, declared, original)
    }

    pub fn checkbox(name: &str, checked: bool) -> Self {
        Self {
            name: name.to_string(),
            kind: ControlKind::Checkbox,
            declared: DeclaredType::Bool,
            value: "on".to_string(),
            checked,
            original: checked.to_string(),
            disabled: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn is_checkbox(&self) -> bool {
        self.kind == ControlKind::Checkbox
    }

    fn commit(&mut self) {
        self.original = if self.is_checkbox() {
            self.checked.to_string()
        } else {
            self.value.clone()
        };
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditForm {
    #[serde(default = "default_container")]
    pub container: String,
    #[serde(default)]
    pub controls: Vec<FormControl>,
}

fn default_container() -> String {
    DEFAULT_CONTAINER.to_string()
}

impl EditForm {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            controls: Vec::new(),
        }
    }

    pub fn with_control(mut self, control: FormControl) -> Self {
        self.controls.push(control);
        self
    }

    pub fn control(&self, name: &str) -> Option<&FormControl> {
        self.controls.iter().rev().find(|control| control.name == name)
    }

    fn control_mut(&mut self, name: &str) -> Result<&mut FormControl, ConsoleError> {
        let container = &self.container;
        self.controls
            .iter_mut()
            .rev()
            .find(|control| control.name == name)
            .ok_or_else(|| ConsoleError::UnknownControl {
                container: container.clone(),
                name: name.to_string(),
            })
    }

    pub fn set_value(&mut self, name: &str, value: &str) -> Result<(), ConsoleError> {
        let control = self.control_mut(name)?;
        if control.is_checkbox() {
            return Err(ConsoleError::invalid_edit(
                format!("{name}={value}"),
                "checkbox controls take a checked state",
            ));
        }
        control.value = value.to_string();
        Ok(())
    }

    pub fn set_checked(&mut self, name: &str, checked: bool) -> Result<(), ConsoleError> {
        let control = self.control_mut(name)?;
        if !control.is_checkbox() {
            return Err(ConsoleError::invalid_edit(
                format!("{name}={checked}"),
                "only checkbox controls have a checked state",
            ));
        }
        control.checked = checked;
        Ok(())
    }

    /// Applies a `NAME=VALUE` edit; checkbox values must be `true` or `false`.
    pub fn apply_edit(&mut self, edit: &str) -> Result<(), ConsoleError> {
        let (name, value) = edit
            .split_once('=')
            .ok_or_else(|| ConsoleError::invalid_edit(edit, "expected NAME=VALUE"))?;
        let is_checkbox = self.control_mut(name)?.is_checkbox();
        if is_checkbox {
            let checked = value
                .parse::<bool>()
                .map_err(|_| ConsoleError::invalid_edit(edit, "expected true or false"))?;
            self.set_checked(name, checked)
        } else {
            self.set_value(name, value)
        }
    }

    pub fn changes(&self) -> ChangeSet {
        check_changes(self)
    }

    /// Moves the baseline of every control named in `saved` to its current value.
    pub fn commit(&mut self, saved: &ChangeSet) {
        for control in self
            .controls
            .iter_mut()
            .filter(|control| saved.contains(&control.name))
        {
            control.commit();
        }
    }
}
