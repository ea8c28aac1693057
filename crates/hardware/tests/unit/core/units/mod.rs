pub mod bru;
