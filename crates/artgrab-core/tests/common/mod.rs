#![allow(dead_code)]

pub mod origin_server;
