pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryListingStore;
pub use postgres::PgListingStore;
pub use store::{ListingStore, Page};
