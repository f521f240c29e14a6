use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

use driver_etl::athena::AthenaSource;
use driver_etl::bucket::ConfigBuilder;
use driver_etl::config::Settings;
use driver_etl::driver::{DriverPipeline, DriverRecord, RawDriverRow};
use driver_etl::etl::{ETLError, RunReport, ETL};
use driver_etl::supabase::SupabaseClient;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping after the current request");
            signal_token.cancel();
        }
    });

    let result = run(&cancel).await;
    match &result {
        Ok(report) => {
            if !report.clear.is_cleared() {
                warn!("old rows may still be present in the destination table");
            }
            info!(
                extracted = report.extracted,
                transformed = report.transformed,
                inserted = report.inserted(),
                "ETL finished successfully"
            );
        }
        Err(e) => error!("{}", error_chain(e.as_ref())),
    }
    ExitCode::from(exit_status(&result))
}

/// 0 for any finished run, including one whose delete was rejected.
fn exit_status(result: &Result<RunReport, Box<dyn Error>>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

async fn run(cancel: &CancellationToken) -> Result<RunReport, Box<dyn Error>> {
    let settings = Settings::from_env()?;
    info!(?settings, "settings loaded");

    let batch_config = ConfigBuilder::default()
        .batch_size(settings.batch_size)
        .build()?;

    let table = SupabaseClient::new(&settings.supabase_url, &settings.supabase_api_key)?
        .table(&settings.destination_table);
    let source = AthenaSource::connect(settings.athena()).await;

    let etl: ETL<RawDriverRow, DriverRecord> =
        ETL::from_box(Box::new(DriverPipeline::new(source, table)));

    etl.run(Arc::new(batch_config), cancel).await.map_err(|e| {
        if let ETLError::Load(_) | ETLError::Cancelled { .. } = &e {
            warn!(committed = e.committed(), "records left in the destination from this run");
        }
        Box::new(e) as Box<dyn Error>
    })
}

fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
