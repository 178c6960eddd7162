pub mod blame;
pub mod cache;
pub mod identity;
pub mod invoker;
