/// Notifications emitted by the cart store to its subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    /// An item was added (new line or quantity bump). Used for the transient
    /// "added to cart" confirmation.
    ItemAdded,
}

/// Boxed subscriber callback.
pub type Listener = Box<dyn Fn(&CartEvent)>;
