//! Session storage keys.

/// Session keys.
pub mod keys {
    /// Key for the session's cart.
    ///
    /// A request loads the cart once, mutates a local value and writes it
    /// back only on success. Sessions are assumed not to be shared across
    /// parallel clients; that assumption is what keeps the one-line-per-
    /// product invariant safe without cross-request locking.
    pub const CART: &str = "cart";
}
