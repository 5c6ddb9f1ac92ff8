//! External-facing services: word recommendations, keyed puzzle storage,
//! share-link codec, and plain-text export.

pub mod export;
pub mod recommend;
pub mod share;
pub mod storage;
