use ctf_metadata::ResolveError;

/// Splits a dotted path expression into non-empty tokens (§4.1).
///
/// The lexer does not interpret tokens; it only rejects empty ones, which
/// catches a leading `.`, a trailing `.`, and `..` as the same error.
pub fn lex_path<'a>(expression: &'a str) -> Result<Vec<&'a str>, ResolveError> {
    if expression.is_empty() {
        return Err(ResolveError::Lexical {
            expression: expression.to_string(),
        });
    }

    let mut tokens = Vec::new();
    for token in expression.split('.') {
        if token.is_empty() {
            return Err(ResolveError::Lexical {
                expression: expression.to_string(),
            });
        }
        tokens.push(token);
    }
    Ok(tokens)
}
