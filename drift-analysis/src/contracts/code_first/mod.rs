//! Code-first contract extraction: recovers REST operations directly from
//! framework route declarations rather than a spec file.

pub mod registry;
