mod rpc;
mod transaction;

pub use rpc::*;
pub use transaction::*;
