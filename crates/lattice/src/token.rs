use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// One position of input (a hashed word or number)
pub type Term = u32;

/// What an edge means once it is part of a path
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Token {
    /// Placeholder carried by default edges
    Unknown,

    /// Literal input word
    Word { term: Term },

    /// Catalog entity (e.g. a menu item)
    Entity { pid: u32, name: String },

    /// Modifier of an entity (e.g. a size or option)
    Attribute { pid: u32, name: String },

    /// Action requested by the user
    Intent { pid: u32, name: String },

    /// Numeric amount
    Quantity { value: f64 },
}

impl Token {
    pub fn entity(pid: u32, name: impl Into<String>) -> Self {
        Self::Entity {
            pid,
            name: name.into(),
        }
    }

    pub fn attribute(pid: u32, name: impl Into<String>) -> Self {
        Self::Attribute {
            pid,
            name: name.into(),
        }
    }

    pub fn intent(pid: u32, name: impl Into<String>) -> Self {
        Self::Intent {
            pid,
            name: name.into(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

// Quantities compare by bit pattern so tokens can key hash maps.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unknown, Self::Unknown) => true,
            (Self::Word { term: a }, Self::Word { term: b }) => a == b,
            (Self::Entity { pid: a, name: x }, Self::Entity { pid: b, name: y })
            | (Self::Attribute { pid: a, name: x }, Self::Attribute { pid: b, name: y })
            | (Self::Intent { pid: a, name: x }, Self::Intent { pid: b, name: y }) => {
                a == b && x == y
            }
            (Self::Quantity { value: a }, Self::Quantity { value: b }) => {
                a.to_bits() == b.to_bits()
            }
            _ => false,
        }
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Unknown => {}
            Self::Word { term } => term.hash(state),
            Self::Entity { pid, name }
            | Self::Attribute { pid, name }
            | Self::Intent { pid, name } => {
                pid.hash(state);
                name.hash(state);
            }
            Self::Quantity { value } => value.to_bits().hash(state),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "[UNKNOWN]"),
            Self::Word { term } => write!(f, "[WORD:{term}]"),
            Self::Entity { pid, name } => write!(f, "[ENTITY:{name},{pid}]"),
            Self::Attribute { pid, name } => write!(f, "[ATTRIBUTE:{name},{pid}]"),
            Self::Intent { pid, name } => write!(f, "[INTENT:{name},{pid}]"),
            Self::Quantity { value } => write!(f, "[QUANTITY:{value}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_structural_equality() {
        assert_eq!(Token::entity(1, "latte"), Token::entity(1, "latte"));
        assert_ne!(Token::entity(1, "latte"), Token::attribute(1, "latte"));
        assert_ne!(Token::Quantity { value: 2.0 }, Token::Quantity { value: 2.5 });
    }

    #[test]
    fn test_tokens_key_hash_sets() {
        let tokens: HashSet<Token> = [
            Token::Unknown,
            Token::Unknown,
            Token::Quantity { value: 0.5 },
            Token::Quantity { value: 0.5 },
            Token::Word { term: 7 },
        ]
        .into_iter()
        .collect();
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::intent(3, "add").to_string(), "[INTENT:add,3]");
        assert_eq!(Token::Unknown.to_string(), "[UNKNOWN]");
        assert!(Token::Unknown.is_unknown());
    }
}
