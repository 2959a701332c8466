//! String interning for hot identifiers (file paths, qualified function names).
//!
//! Interning happens during the scan/detection phases on a shared, thread-safe
//! handle (`ThreadedRodeo`). Once a scan completes, the handle is converted
//! into a read-only `RodeoReader` via [`PathInterner::into_reader`] /
//! [`FunctionInterner::into_reader`] — queries never need the write-side lock.

use lasso::{RodeoReader, Spur, ThreadedRodeo};

/// Normalizes a path key: backslashes to forward slashes, collapsed repeated
/// slashes, and no trailing slash (except the root `/` itself).
fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    if unified == "/" {
        return unified;
    }
    let mut out = String::with_capacity(unified.len());
    let mut prev_slash = false;
    for c in unified.chars() {
        if c == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(c);
    }
    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

/// Interns normalized file paths behind a [`Spur`].
pub struct PathInterner {
    rodeo: ThreadedRodeo<Spur>,
}

impl PathInterner {
    pub fn new() -> Self {
        Self {
            rodeo: ThreadedRodeo::new(),
        }
    }

    pub fn intern(&self, path: &str) -> Spur {
        self.rodeo.get_or_intern(normalize_path(path))
    }

    pub fn resolve(&self, spur: &Spur) -> &str {
        self.rodeo.resolve(spur)
    }

    pub fn get(&self, path: &str) -> Option<Spur> {
        self.rodeo.get(normalize_path(path))
    }

    pub fn into_reader(self) -> RodeoReader<Spur> {
        self.rodeo.into_reader()
    }
}

impl Default for PathInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Interns function/method names, including class-qualified (`Class.method`) keys.
pub struct FunctionInterner {
    rodeo: ThreadedRodeo<Spur>,
}

impl FunctionInterner {
    pub fn new() -> Self {
        Self {
            rodeo: ThreadedRodeo::new(),
        }
    }

    pub fn intern(&self, name: &str) -> Spur {
        self.rodeo.get_or_intern(name)
    }

    pub fn intern_qualified(&self, class: &str, method: &str) -> Spur {
        self.rodeo.get_or_intern(format!("{class}.{method}"))
    }

    pub fn resolve(&self, spur: &Spur) -> &str {
        self.rodeo.resolve(spur)
    }

    pub fn get(&self, name: &str) -> Option<Spur> {
        self.rodeo.get(name)
    }

    pub fn into_reader(self) -> RodeoReader<Spur> {
        self.rodeo.into_reader()
    }
}

impl Default for FunctionInterner {
    fn default() -> Self {
        Self::new()
    }
}
