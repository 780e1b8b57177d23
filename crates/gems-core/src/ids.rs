use core::fmt;
use core::str::FromStr;

use crate::CoreError;

/// Qualified reference to a model inside a library, written `library-id.model-id`.
///
/// Model ids are only unique within their library, so components always
/// reference models through this pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelRef {
    pub library: String,
    pub model: String,
}

impl ModelRef {
    pub fn new(library: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            library: library.into(),
            model: model.into(),
        }
    }
}

impl FromStr for ModelRef {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidModelReference {
            reference: s.to_string(),
        };
        let (library, model) = s.split_once('.').ok_or_else(invalid)?;
        if library.is_empty() || model.is_empty() || model.contains('.') {
            return Err(invalid());
        }
        Ok(Self::new(library, model))
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.library, self.model)
    }
}
