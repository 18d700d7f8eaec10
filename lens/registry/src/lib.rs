pub mod finance;
mod persist;
mod registry;
mod store;
#[cfg(test)]
mod test_utils;

pub use {persist::*, registry::*, store::*};
