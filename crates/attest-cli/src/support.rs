use crate::cli::EvalArgs;
use crate::rules;
use attest_contract::{FormatConfig, TextFormatter};
use attest_kernel::Expression;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub fn read_json_file_or_exit<T>(path: &str, label: &str) -> T
where
    T: serde::de::DeserializeOwned,
{
    let bytes = fs::read(path).unwrap_or_else(|e| {
        eprintln!("error: failed to read {label} at {}: {e}", path);
        std::process::exit(1);
    });
    serde_json::from_slice::<T>(&bytes).unwrap_or_else(|e| {
        eprintln!("error: failed to parse {label} JSON at {}: {e}", path);
        std::process::exit(1);
    })
}

pub fn load_formatter_or_exit(path: &str) -> TextFormatter {
    let config = FormatConfig::load_or_default(Path::new(path)).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    TextFormatter::new(config)
}

/// Read both documents named by `args` and compile the rules over the subject.
pub fn compile_or_exit(args: &EvalArgs) -> Expression {
    let document: Value = read_json_file_or_exit(&args.rules, "rules");
    let subject: Value = read_json_file_or_exit(&args.subject, "subject");
    rules::compile(&document, Arc::new(subject)).unwrap_or_else(|e| {
        eprintln!("error: invalid rules at {}: {e}", args.rules);
        std::process::exit(1);
    })
}

pub fn render_json_or_exit(payload: &Value, label: &str) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|err| {
        eprintln!("error: failed to render {label} payload: {err}");
        std::process::exit(2);
    })
}
