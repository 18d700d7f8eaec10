mod engine;
mod health;
mod limits;
mod simulate;
mod snapshot;
#[cfg(test)]
mod test_utils;

pub use {engine::*, health::*, limits::*, simulate::*, snapshot::*};
