pub mod part;
pub mod cart;
pub mod filter;

pub use part::*;
pub use cart::*;
pub use filter::*;
