#![allow(dead_code)]

pub mod mock_catalog;
pub mod mock_resolver;
pub mod mock_server;
