//! Cache scope and symbol identifiers.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ConfigurationError;

fn is_key_safe(s: &str) -> bool {
    !s.is_empty() && !s.contains(':') && !s.chars().any(char::is_whitespace)
}

/// Tenant/run identifier isolating cache entries.
///
/// Every cache read and write takes a scope explicitly; two runs with
/// different scopes never observe each other's bars.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Scope(String);

impl Scope {
    /// Creates a scope, rejecting empty identifiers and key separators.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidScope`] if the identifier is empty
    /// or contains `:` or whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigurationError> {
        let id = id.into();
        if !is_key_safe(&id) {
            return Err(ConfigurationError::InvalidScope(id));
        }
        Ok(Self(id))
    }

    /// Returns the scope identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Scope {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Scope {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Scope> for String {
    fn from(scope: Scope) -> Self {
        scope.0
    }
}

/// Ticker symbol, normalized to upper case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Creates a symbol, upper-casing the input.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidSymbol`] if the symbol is empty
    /// or contains `:` or whitespace.
    pub fn new(symbol: impl AsRef<str>) -> Result<Self, ConfigurationError> {
        let symbol = symbol.as_ref().trim().to_uppercase();
        if !is_key_safe(&symbol) {
            return Err(ConfigurationError::InvalidSymbol(symbol));
        }
        Ok(Self(symbol))
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_validation() {
        assert_eq!(Scope::new("run-42").unwrap().as_str(), "run-42");
        assert!(Scope::new("").is_err());
        assert!(Scope::new("run:42").is_err());
        assert!(Scope::new("run 42").is_err());
    }

    #[test]
    fn test_symbol_normalization() {
        assert_eq!(Symbol::new(" abc ").unwrap().as_str(), "ABC");
        assert_eq!("brk.b".parse::<Symbol>().unwrap().as_str(), "BRK.B");
        assert_eq!(
            Symbol::new(""),
            Err(ConfigurationError::InvalidSymbol(String::new()))
        );
        assert!(Symbol::new("A:B").is_err());
    }

    #[test]
    fn test_symbol_ordering_is_lexical() {
        let mut symbols = vec![Symbol::new("msft").unwrap(), Symbol::new("aapl").unwrap()];
        symbols.sort();
        assert_eq!(symbols[0].as_str(), "AAPL");
    }
}
