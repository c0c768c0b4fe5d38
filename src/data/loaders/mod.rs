// mod.rs - File loaders module

pub mod tsv;
