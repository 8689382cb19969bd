//! Web front end for the GPU rent backend.
//!
//! Serves the reservation page and answers its form posts with HTML fragments,
//! forwarding each action to the backend through [`client::ApiClient`].

pub mod assets;
pub mod config;
pub mod error;
pub mod form;
pub mod render;
pub mod routes;

pub use config::Args;
pub use error::AppError;
pub use routes::{router, AppState};

use tokio::net::TcpListener;
use tracing::info;

pub async fn serve(args: Args) -> Result<(), AppError> {
    let state = AppState::from_args(&args)?;
    let app = router(state);

    let listener = TcpListener::bind(args.listen)
        .await
        .map_err(|source| AppError::Bind {
            addr: args.listen,
            source,
        })?;
    info!(addr = %args.listen, backend = %args.api, "Listening");
    axum::serve(listener, app).await.map_err(AppError::Serve)
}
