#![allow(dead_code)]

pub mod app;
pub mod counter;
pub mod server;
