//! Recipe backend adapter: wire DTOs, REST data source, reqwest transport.

pub mod data_source;
pub mod dto;
pub mod http_transport;

pub use data_source::RecipeApiDataSource;
pub use http_transport::ReqwestTransport;
