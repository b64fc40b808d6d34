pub mod asset;
pub mod attempt;
pub mod instruction_set;
pub mod metadata;
pub mod receipt;

pub use asset::*;
pub use attempt::*;
pub use instruction_set::*;
pub use metadata::*;
pub use receipt::*;
