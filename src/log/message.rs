use super::Error;

pub const MISSING_TEMPLATE: &str = "missing template";
pub const DUPLICATE_TEMPLATE: &str = "duplicate template";
pub const INVALID_SYNTAX: &str = "invalid syntax";
pub const UNSERIALIZABLE: &str = "unserializable value";

/// Return an [`Error`] explaining that the write operation failed.
///
/// This is likely caused by a failure during a `write!` macro operation.
pub fn error_write() -> Error {
    Error::build("write failure")
        .with_help("failed to write result of render, are you low on memory?")
}

/// Return an [`Error`] describing a missing template.
pub fn error_missing_template(name: &str) -> Error {
    Error::build(MISSING_TEMPLATE).with_help(format!(
        "template `{name}` not found in engine, add it with `.add_template`"
    ))
}

/// Return an [`Error`] describing a template name that is already taken.
pub fn error_duplicate_template(name: &str) -> Error {
    Error::build(DUPLICATE_TEMPLATE).with_help(format!(
        "template with name `{name}` already exists in engine, \
        overwrite it with `.add_template_must`"
    ))
}

/// Return a string describing the close tag expected by an open section.
pub fn expected_close<T>(open: &str, key: T, close: &str) -> String
where
    T: std::fmt::Display,
{
    format!("expected `{open}/{key}{close}`, did you close every section?")
}
