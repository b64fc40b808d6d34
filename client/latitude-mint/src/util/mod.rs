pub mod constants;
pub mod metaplex_helpers;
pub mod mint_helpers;

pub use constants::*;
pub use metaplex_helpers::*;
pub use mint_helpers::*;
