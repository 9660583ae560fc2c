/// A signed credential in `header.payload.signature` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Returns an instance of `Token` if the input has exactly three
    /// non-empty dot-delimited segments.
    pub fn parse(s: String) -> Result<Token, String> {
        let segments: Vec<&str> = s.split('.').collect();
        if segments.len() != 3 {
            return Err(format!(
                "Token has {} dot-delimited segments, expected 3.",
                segments.len()
            ));
        }
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err("Token contains an empty segment.".to_string());
        }
        Ok(Self(s))
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
