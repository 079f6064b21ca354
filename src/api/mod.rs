#[cfg(test)]
pub(crate) mod mock;
pub mod networks;
pub mod transport;
pub mod types;
