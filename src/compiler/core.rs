use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::route::Route;

use super::compiled::{CompiledRoute, Token, VariableVec};
use super::error::CompileError;

/// Matches `<any-char>{name}`: a placeholder together with the character
/// preceding it, which doubles as the variable's path separator. Patterns are
/// normalized to start with `/`, so a placeholder always has a preceding
/// character.
static VARIABLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r".\{(\w+)\}").expect("variable placeholder regex should be valid"));

/// Strategy for turning a route definition into a [`CompiledRoute`].
///
/// The standard implementation is [`StandardRouteCompiler`]; an alternative
/// can be injected per route via `Route::with_compiler` to change how
/// patterns are interpreted without touching the matcher or generator.
///
/// Implementations must be pure: compiling the same definition twice must
/// produce byte-identical regexes and token lists, because compiled forms
/// are memoized and may be recomputed concurrently.
pub trait RouteCompiler: Send + Sync {
    /// Compile `route` into its matching/generation form.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::DuplicateVariable`] when a variable name
    /// appears twice in one pattern, and [`CompileError::Regex`] when the
    /// assembled expression is rejected by the regex engine (typically a
    /// malformed requirement).
    fn compile(&self, route: &Route) -> Result<CompiledRoute, CompileError>;
}

/// The standard pattern compiler.
///
/// Scans the pattern left to right for `{name}` placeholders, tokenizes the
/// literal runs between them, synthesizes separator-aware requirements for
/// unconstrained variables, and assembles the anchored matching regex with
/// nested optional groups for trailing variables that carry defaults.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRouteCompiler;

impl RouteCompiler for StandardRouteCompiler {
    fn compile(&self, route: &Route) -> Result<CompiledRoute, CompileError> {
        let pattern = route.pattern();
        let mut tokens: Vec<Token> = Vec::new();
        let mut variables = VariableVec::new();
        let mut position = 0usize;

        for captures in VARIABLE_REGEX.captures_iter(pattern) {
            let (Some(placeholder), Some(name_match)) = (captures.get(0), captures.get(1)) else {
                continue;
            };

            let text = &pattern[position..placeholder.start()];
            if !text.is_empty() {
                tokens.push(Token::Text {
                    text: text.to_string(),
                });
            }

            let Some(separator) = pattern[placeholder.start()..].chars().next() else {
                continue;
            };
            position = placeholder.end();
            let name = name_match.as_str().to_string();

            let requirement = match route.requirement(&name) {
                Some(requirement) if !requirement.is_empty() => requirement.to_string(),
                _ => {
                    // No declared requirement: match anything that avoids the
                    // separators surrounding the placeholder, lazily.
                    let mut separators = String::new();
                    separators.push(separator);
                    if position != pattern.len() {
                        if let Some(following) = pattern[position..].chars().next() {
                            if following != separator {
                                separators.push(following);
                            }
                        }
                    }
                    format!("[^{}]+?", regex::escape(&separators))
                }
            };

            if variables.contains(&name) {
                return Err(CompileError::DuplicateVariable {
                    pattern: pattern.to_string(),
                    variable: name,
                });
            }

            tokens.push(Token::Variable {
                prefix: separator,
                name: name.clone(),
                requirement,
            });
            variables.push(name);
        }

        if position < pattern.len() {
            tokens.push(Token::Text {
                text: pattern[position..].to_string(),
            });
        }

        // Index of the first token in the trailing run of variables that all
        // carry defaults. Everything before it is mandatory, defaults or not.
        let mut first_optional = tokens.len();
        for (index, token) in tokens.iter().enumerate().rev() {
            match token {
                Token::Variable { name, .. } if route.has_default(name) => first_optional = index,
                _ => break,
            }
        }

        let mut expression = String::new();
        for index in 0..tokens.len() {
            expression.push_str(&compute_token_expression(&tokens, index, first_optional));
        }

        let regex = Regex::new(&format!("(?s)^{expression}$")).map_err(|source| {
            CompileError::Regex {
                pattern: pattern.to_string(),
                source,
            }
        })?;

        let static_prefix = match tokens.first() {
            Some(Token::Text { text }) => text.clone(),
            _ => String::new(),
        };

        debug!(
            pattern = %pattern,
            regex = %regex.as_str(),
            variables = ?variables,
            "Route pattern compiled"
        );

        // Generation consumes tokens back-to-front.
        tokens.reverse();

        Ok(CompiledRoute::new(
            pattern.to_string(),
            static_prefix,
            regex,
            tokens,
            variables,
            route.defaults().clone(),
            route.requirements().clone(),
        ))
    }
}

/// Regex fragment for the token at `index`, in forward declaration order.
///
/// Tokens at or after `first_optional` open a non-capturing optional group;
/// the last token closes every group that was opened, producing the nested
/// `(?:a(?:b)?)?` shape that lets any suffix of optional variables drop out.
/// A pattern consisting of a single optional variable keeps its separator
/// mandatory and makes only the capture group optional.
fn compute_token_expression(tokens: &[Token], index: usize, first_optional: usize) -> String {
    match &tokens[index] {
        Token::Text { text } => regex::escape(text),
        Token::Variable {
            prefix,
            name,
            requirement,
        } => {
            let separator = regex::escape(&prefix.to_string());
            if index == 0 && first_optional == 0 && tokens.len() == 1 {
                return format!("{separator}(?P<{name}>{requirement})?");
            }

            let mut expression = format!("{separator}(?P<{name}>{requirement})");
            if index >= first_optional {
                expression.insert_str(0, "(?:");
                if index == tokens.len() - 1 {
                    for _ in first_optional..tokens.len() {
                        expression.push_str(")?");
                    }
                }
            }
            expression
        }
    }
}
