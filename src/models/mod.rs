//! Data models representing database entities and API payloads.

/// Gift card model
pub mod gift_card;
/// Payment and withdrawal records
pub mod ledger;
/// Moderation configuration
pub mod moderation;
/// Wallet summary views
pub mod wallet;
