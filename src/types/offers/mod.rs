pub mod offer_item;
pub mod offer_updates;

pub use offer_item::{OfferItem, OfferMetadata, OfferStatus};
pub use offer_updates::OfferItemUpdates;
