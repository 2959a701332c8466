//! Per-language `GASTNormalizer` implementations.

pub mod cpp;
pub mod python;
pub mod ruby;
pub mod typescript;

pub use cpp::CppNormalizer;
pub use python::PythonNormalizer;
pub use ruby::RubyNormalizer;
pub use typescript::TypeScriptNormalizer;
