//! DOMTokenList (classList)
//!
//! Space-separated token set backing an element's `class` attribute.

/// DOMTokenList for managing space-separated tokens (e.g., classList)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DOMTokenList {
    tokens: Vec<String>,
}

impl DOMTokenList {
    /// Create empty token list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from space-separated string, dropping duplicates
    pub fn from_string(s: &str) -> Self {
        let mut list = Self::new();
        list.add(&s.split_whitespace().collect::<Vec<_>>());
        list
    }

    /// Get number of tokens
    pub fn length(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get token at index
    pub fn item(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(|s| s.as_str())
    }

    /// Check if token exists
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add token(s); empty tokens are ignored
    pub fn add(&mut self, tokens: &[&str]) {
        for token in tokens {
            if !token.is_empty() && !self.contains(token) {
                self.tokens.push(token.to_string());
            }
        }
    }

    /// Remove token(s)
    pub fn remove(&mut self, tokens: &[&str]) {
        self.tokens.retain(|t| !tokens.contains(&t.as_str()));
    }

    /// Toggle token, returns new state
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> bool {
        let present = force.unwrap_or(!self.contains(token));
        if present {
            self.add(&[token]);
        } else {
            self.remove(&[token]);
        }
        present
    }

    /// Get value as string
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    /// Set from string
    pub fn set_value(&mut self, value: &str) {
        *self = Self::from_string(value);
    }

    /// Iterate over tokens
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|s| s.as_str())
    }
}

impl std::fmt::Display for DOMTokenList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}
