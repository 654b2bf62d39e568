// [apps/submission-service/src/main.rs]
//! Punto de entrada del binario del servicio de envio.

use aibom_submission_service::prelude::*;

use dotenvy::dotenv;
use aibom_telemetry::init_tracing;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_tracing("aibom-submission-service");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let config = Config::from_env();
        let port = config.port;

        let kernel = Kernel::ignite(&config).await;

        info!(port, "submission service ready");
        kernel.serve().await;

        Ok(())
    })
}
