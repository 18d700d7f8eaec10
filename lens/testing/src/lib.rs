mod engine;
mod fixtures;

pub use {engine::*, fixtures::*};
