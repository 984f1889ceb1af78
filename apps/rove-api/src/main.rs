use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = rove_api::Args::parse();

	rove_api::run(args).await
}
