mod error;
mod mutation;
mod order;
mod payment;
mod query;

pub use error::*;
pub use mutation::*;
pub use order::*;
pub use payment::*;
pub use query::*;

pub use sea_orm;
