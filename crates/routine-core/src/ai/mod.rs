pub mod chat;

pub use chat::ChatClient;
