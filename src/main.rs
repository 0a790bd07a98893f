use article_chat::cli::Args;
use article_chat::{ logging, run };
use clap::Parser;
use dotenv::dotenv;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    let args = Args::parse();
    logging::init(&args)?;

    run(args).await
}
