//! Request and response data transfer objects for the JSON endpoints.

pub mod request;
pub mod response;
