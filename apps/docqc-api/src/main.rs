use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = docqc_api::Args::parse();

	docqc_api::run(args).await
}
