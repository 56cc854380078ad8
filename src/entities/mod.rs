//! Typed farm entity records.
//!
//! These mirror the host application's in-memory collections. Records
//! arrive already validated and keyed by string id; wire names are
//! camelCase because the host state is JSON. The reporting layer never
//! mutates them.

pub mod batch;
pub mod customer;
pub mod egg_collection;
pub mod feed;
pub mod order;
pub mod product;
pub mod sale;
pub mod vaccination;

pub use batch::Batch;
pub use customer::Customer;
pub use egg_collection::EggCollection;
pub use feed::{FeedConsumption, FeedInventory, FeedType};
pub use order::{Order, OrderLine, OrderStatus};
pub use product::Product;
pub use sale::{Sale, SaleLine};
pub use vaccination::{VaccinationRecord, Vaccine};
