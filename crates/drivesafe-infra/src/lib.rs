//! Infrastructure layer - persistence implementations, loaders

pub mod persistence;
pub mod track_csv;
