pub mod auth;
pub mod cards;
pub mod learn;
pub mod sessions;
pub mod stats;
pub mod study;
