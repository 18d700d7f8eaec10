mod dec;
mod error;
mod uint;

pub use {dec::*, error::*, uint::*};
