// Application layer - Use cases and process state
pub mod cache;
pub mod element_feed;
pub mod refresh_service;
pub mod tracking_service;
