//! JSON rendering of analysis results.
//!
//! Reports serialize to the shape consumers of the linter expect:
//!
//! ```text
//! [{"checker":"Unknown identifier","errors":[{"message":"Unknown identifier: 'y' at (1:11)."}]}]
//! [{"message":"Unexpected end of program, expected ')'"}]
//! ```
//!
//! # Examples
//!
//! ```
//! use jsweep::Linter;
//! use jsweep::output::to_json;
//!
//! let reports = Linter::default().analyze("var x = 1; y;");
//! let json = to_json(&reports).unwrap();
//! assert!(json.starts_with(r#"[{"checker":"#));
//! ```

use crate::ast::Token;
use crate::rules::Report;

/// Compact JSON, one line.
pub fn to_json(reports: &[Report]) -> Result<String, serde_json::Error> {
    serde_json::to_string(reports)
}

/// JSON with 2-space indentation, for people reading a terminal.
pub fn to_json_pretty(reports: &[Report]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reports)
}

/// Token stream as JSON, for inspecting what the parser sees.
pub fn tokens_to_json(tokens: &[Token], pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(tokens)
    } else {
        serde_json::to_string(tokens)
    }
}
