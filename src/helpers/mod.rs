pub mod amount;
mod balances;
