#![allow(dead_code)]

mod test_client;

pub use test_client::*;
