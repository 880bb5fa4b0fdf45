pub mod account;
pub mod device;
pub mod error;
pub mod exchange;
pub mod operation;
pub mod swap;
pub mod transaction;

pub use account::*;
pub use device::*;
pub use error::*;
pub use exchange::*;
pub use operation::*;
pub use swap::*;
pub use transaction::*;

/// Device application that handles swap signing
pub const EXCHANGE_APP_NAME: &str = "Exchange";
