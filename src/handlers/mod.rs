//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params)
//! 2. Delegates to a service
//! 3. Wraps the result in a JSON body with a human-readable `message`

/// Gift card endpoints
pub mod gift_cards;
/// Service health endpoint
pub mod health;
/// Moderation settings endpoints
pub mod moderation;
/// Wallet summary endpoints
pub mod wallet;
