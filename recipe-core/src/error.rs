use thiserror::Error;

/// A single schema rule broken by a candidate recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// One or more field violations. Displays as the messages joined by ", ".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_messages(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.message.as_str())
    }

    pub fn field(&self, field: &str) -> Option<&FieldViolation> {
        self.violations.iter().find(|v| v.field == field)
    }
}

fn join_messages(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid id: {value}")]
pub struct InvalidRecipeId {
    pub value: String,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Duplicate value for unique field {field}")]
    DuplicateKey { field: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store operation failed: {0}")]
    Backend(String),
}
