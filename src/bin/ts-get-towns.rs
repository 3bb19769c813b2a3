use clap::Parser;
use ts_ratings::client::{Client, EndpointConfig};

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 't', long)]
    towns_endpoint: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let http = reqwest::Client::builder()
        .gzip(true)
        .brotli(true)
        .build()
        .unwrap();
    let endpoints = EndpointConfig {
        towns: args.towns_endpoint,
        restaurants: None,
    };
    let client = Client::new(http, endpoints).unwrap();
    let towns = client.get_towns().await.unwrap();
    println!("{}", serde_json::to_string(towns).unwrap());
}
