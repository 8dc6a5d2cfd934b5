// Résumé catalogue: a fixed in-memory sample set, no persistence.

pub mod catalog;
pub mod handlers;
