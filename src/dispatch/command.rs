// src/dispatch/command.rs

//! Building the command strings sent to the target application.

/// What the editor asks an adapter to deliver.
///
/// Non-empty `highlighted_text` is sent verbatim. Otherwise the adapter
/// synthesizes a call to the receive entry point with `module_path` and
/// `file_path`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandPayload {
    pub highlighted_text: String,
    pub module_path: String,
    pub file_path: String,
    pub doc_type: String,
}

impl CommandPayload {
    /// Payload that sends a selection as-is.
    pub fn text(highlighted_text: impl Into<String>) -> Self {
        Self {
            highlighted_text: highlighted_text.into(),
            ..Self::default()
        }
    }

    /// Payload that asks the target to import/reload `module_path`, falling
    /// back to executing `file_path`.
    pub fn module(module_path: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            module_path: module_path.into(),
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    pub fn with_doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = doc_type.into();
        self
    }

    pub fn has_selection(&self) -> bool {
        !self.highlighted_text.is_empty()
    }
}

/// Quote `value` as a single-quoted Python string literal.
pub fn python_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// `import <module>; <function>('<module_path>','<file_path>')`
pub fn build_receive_command(
    receive_module: &str,
    receive_function: &str,
    module_path: &str,
    file_path: &str,
) -> String {
    format!(
        "import {}; {}({},{})",
        receive_module,
        receive_function,
        python_quote(module_path),
        python_quote(file_path)
    )
}
