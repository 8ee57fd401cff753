// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use time::UtcOffset;
use tokio::runtime::Builder;
// self
use plaid_bridge::{
	client::AggregatorClient,
	config::ServerConfig,
	flows::Bridge,
	http::ReqwestTransport,
	obs::logging,
	server,
	store::MemoryStore,
};

fn main() -> Result<()> {
	color_eyre::install()?;

	// The local offset can only be read while the process is still single-threaded.
	let local_offset = UtcOffset::current_local_offset();

	Builder::new_multi_thread().enable_all().build()?.block_on(run(local_offset.ok()))
}

async fn run(local_offset: Option<UtcOffset>) -> Result<()> {
	let config = ServerConfig::load()?;

	logging::init(config.log_format, config.verbose_logging())?;
	config.env_file.log();

	if local_offset.is_none() {
		tracing::warn!("Local UTC offset is unavailable; using UTC calendar dates.");
	}

	let transport =
		ReqwestTransport::with_user_agent(concat!("plaid-bridge/", env!("CARGO_PKG_VERSION")))?;
	let api = AggregatorClient::<ReqwestTransport>::with_transport(
		config.environment,
		config.client_id.clone(),
		config.secret.clone(),
		transport,
	)?;
	let bridge = Bridge::new(Arc::new(api), Arc::new(MemoryStore::default()), config.link.clone())
		.with_utc_offset(local_offset.unwrap_or(UtcOffset::UTC));

	tracing::info!(
		environment = %config.environment,
		products = ?config.link.products,
		country_codes = ?config.link.country_codes,
		utc_offset = %bridge.utc_offset,
		"Starting Plaid bridge."
	);

	server::serve(config.socket_addr(), Arc::new(bridge)).await?;

	Ok(())
}
