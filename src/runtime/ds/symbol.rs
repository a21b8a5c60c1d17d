use std::fmt;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// A symbolic property key. Two symbols are the same key iff their
/// descriptions match; [`SymbolData::new_unique`] mints a description no
/// other symbol can collide with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolData {
    description: String,
}

impl SymbolData {
    pub fn new(description: String) -> Self {
        SymbolData { description }
    }

    pub fn new_unique() -> Self {
        SymbolData {
            description: Uuid::new_v4().to_hyphenated().to_string(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Display for SymbolData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

/* Well known symbols */
//
// The reserved keys of the resolver capability set. Handlers attached
// under these keys form an object's virtual-dispatch surface; being
// symbols, they can never collide with the object's string-keyed API.
lazy_static! {
    pub static ref SYMBOL_REFERENCE_GET: SymbolData =
        SymbolData::new("Symbol.referenceGet".to_string());
    pub static ref SYMBOL_REFERENCE_SET: SymbolData =
        SymbolData::new("Symbol.referenceSet".to_string());
    pub static ref SYMBOL_REFERENCE_DELETE: SymbolData =
        SymbolData::new("Symbol.referenceDelete".to_string());
}
