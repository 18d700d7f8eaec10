mod balance;
mod input;
mod number;
mod value;

pub use {balance::*, input::*, number::*, value::*};
