pub mod params;
pub mod request;
pub mod value;

pub use request::QueryRequest;
pub use value::QueryValue;
