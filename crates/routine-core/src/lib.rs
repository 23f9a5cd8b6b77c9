pub mod ai;
pub mod catalog;
pub mod config;
pub mod conversation;
pub mod error;
pub mod filter;
pub mod selection;
pub mod state;
pub mod storage;

// Re-export main types for convenience
pub use ai::ChatClient;
pub use catalog::{find_product, Category, CatalogLoader, CatalogSource, Product, ProductId};
pub use config::Config;
pub use conversation::{Conversation, ConversationState, PendingRequest, RequestTicket};
pub use error::{CatalogError, ChatError, ConversationError, StorageError, UnknownCategory};
pub use filter::{visible_products, CategoryChoice, FilterCriteria, Visibility};
pub use selection::SelectionSet;
pub use state::{ChatMessage, ChatRole};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
