//! Entity implementation

use slotmap::Key;

slotmap::new_key_type! {
    /// Entity identifier
    ///
    /// Generational: once an entity is destroyed its identifier never
    /// resolves again, even if the slot is reused.
    pub struct Entity;
}

impl Entity {
    /// Stable numeric form of the identifier, for logs and debug keys
    pub fn id(&self) -> u64 {
        self.data().as_ffi()
    }
}
