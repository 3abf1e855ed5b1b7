//! Token stream dump for debugging the tokenizer

use super::CliError;
use crate::lexer::Lexer;
use crate::output::tokens_to_json;

/// Tokenizes `source` and renders every token, line breaks and comments
/// included, as JSON.
pub fn dump_tokens(source: &str, pretty: bool) -> Result<String, CliError> {
    let tokens = Lexer::new(source).tokenize();
    Ok(tokens_to_json(&tokens, pretty)?)
}
