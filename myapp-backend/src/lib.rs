mod config;
mod error_map;
mod handlers;
mod producer;

pub use config::BackendConfig;
pub use error_map::{
    DeclaredError,
    ErrorMap,
    ErrorMapError,
};
pub use handlers::error::ProcedureError;
pub use producer::{
    Modules,
    declare_errors,
    run_myapp_backend,
};
