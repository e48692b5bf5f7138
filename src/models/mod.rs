pub mod join_request;
pub mod message;
