use crate::model::{Item, ItemId, OwnerId};

/// Any failure of a remote call. The view never distinguishes between them;
/// the variants exist for logs and CLI diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("{method} {url} returned {status}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
    },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("could not start request worker: {0}")]
    Spawn(#[from] std::io::Error),
}

/// The remote todo collection of one owner.
///
/// Every call is a single request/response exchange. Implementations do not
/// retry and report every failure upward unchanged.
pub trait ItemStore: Send + Sync {
    /// The owner every call is scoped to
    fn owner_id(&self) -> OwnerId;

    /// Fetch the whole collection in server order.
    fn list(&self) -> Result<Vec<Item>, TransportError>;

    /// Create an item. The title must already be trimmed and non-empty.
    fn create(&self, title: &str, completed: bool) -> Result<Item, TransportError>;

    /// Send the full item. Returns the echoed item when the store sends one back.
    fn update(&self, item: &Item) -> Result<Option<Item>, TransportError>;

    fn delete(&self, id: ItemId) -> Result<(), TransportError>;
}
