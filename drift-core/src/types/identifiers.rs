//! Type-safe interned-string identifiers.
//!
//! Each ID wraps the same underlying `Spur` but is a distinct Rust type, so a
//! `FileId` can never be passed where a `FunctionId` is expected even though
//! both ultimately index the same string table family.

use lasso::Spur;
use serde::{Deserialize, Serialize};

macro_rules! interned_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Spur);

        impl $name {
            pub fn new(spur: Spur) -> Self {
                Self(spur)
            }

            pub fn inner(&self) -> Spur {
                self.0
            }
        }

        impl From<Spur> for $name {
            fn from(spur: Spur) -> Self {
                Self(spur)
            }
        }
    };
}

interned_id!(FileId, "Identifies a scanned file by its interned normalized path.");
interned_id!(FunctionId, "Identifies a function or method by its interned qualified name.");
interned_id!(ClassId, "Identifies a class/type declaration.");
interned_id!(ModuleId, "Identifies a module/boundary grouping.");
interned_id!(PatternId, "Identifies a learned convention or detected pattern.");
interned_id!(DetectorId, "Identifies a registered detector.");
