//! The `explain` use case: look up reason code documentation.

use attendguard_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// Unknown code; includes the known codes.
    NotFound {
        code: String,
        available_codes: &'static [&'static str],
    },
}

pub fn run_explain(code: &str) -> ExplainOutput {
    match explain::lookup_explanation(code) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            code: code.to_string(),
            available_codes: explain::all_codes(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(code: &str, exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push_str(&format!(" ({code})\n"));
    out.push_str(&"=".repeat(exp.title.len() + code.len() + 3));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push('\n');

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(code: &str, codes: &[&'static str]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown reason code: {code}\n\n"));
    out.push_str("Available codes:\n");
    for code in codes {
        out.push_str(&format!("  - {code}\n"));
    }

    out
}
