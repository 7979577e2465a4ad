use std::sync::{Arc, PoisonError, RwLock};

use basecamp_cart::Cart;
use basecamp_core::SessionId;

/// Cloneable handle to the session's cart.
///
/// Every mutation runs as one read-modify-write under the write lock, so two
/// rapid taps on the same line both land. Readers work on the latest state or
/// take a snapshot.
#[derive(Debug, Clone)]
pub struct SharedCart {
    inner: Arc<RwLock<Cart>>,
}

impl SharedCart {
    pub fn new(session_id: SessionId) -> Self {
        Self::from_cart(Cart::new(session_id))
    }

    pub fn from_cart(cart: Cart) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cart)),
        }
    }

    /// Mutate the cart. A panic in an earlier closure cannot leave a line in an
    /// invalid state (mutations go through `apply`), so a poisoned lock is
    /// recovered rather than propagated.
    pub fn update<R>(&self, f: impl FnOnce(&mut Cart) -> R) -> R {
        let mut cart = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    pub fn read<R>(&self, f: impl FnOnce(&Cart) -> R) -> R {
        let cart = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    pub fn snapshot(&self) -> Cart {
        self.read(Cart::clone)
    }
}
