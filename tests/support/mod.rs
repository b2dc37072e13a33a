#![allow(dead_code)]

pub mod fake_gateway;
pub mod stub_soap_server;
