#[macro_use]
extern crate log;

mod db;
pub use db::{DatabaseHandler, StoreError};

pub mod changes;
pub use changes::{Change, ChangeKind, Collection, Interest, Subscription};

mod algo_impl;
mod type_impl;
