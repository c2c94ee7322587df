//! Core domain types for requests, stored responses, and fixture records.

pub mod fixture;
pub mod http;
pub mod request;
pub mod response;
