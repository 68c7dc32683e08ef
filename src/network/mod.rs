pub mod client;
pub mod response;

pub use client::ServiceClient;
pub use response::ApiResponse;
