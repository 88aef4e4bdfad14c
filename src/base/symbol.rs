//! Opaque symbol references attached to nodes.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A reference to a symbol in some downstream symbol table.
///
/// The toolkit never interprets it; consumers store whatever handle they
/// need and read it back with [`SymbolRef::downcast_ref`]. Cloning is cheap.
#[derive(Clone)]
pub struct SymbolRef(Arc<dyn Any + Send + Sync>);

impl SymbolRef {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Whether both references share the same underlying handle.
    pub fn ptr_eq(&self, other: &SymbolRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SymbolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymbolRef(..)")
    }
}
