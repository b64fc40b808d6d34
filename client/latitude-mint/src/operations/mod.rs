pub mod asset_encoder;
pub mod metadata_builder;
pub mod pinning;
pub mod submitter;
pub mod transaction_builder;

pub use asset_encoder::*;
pub use metadata_builder::*;
pub use pinning::*;
pub use submitter::*;
pub use transaction_builder::*;
