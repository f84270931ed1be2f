//! Data model shared by the extractors, the aggregator and the catalog sink

mod movie;

pub use movie::MovieRecord;
