use std::env;

use actix_web::{App, HttpServer, web};
use chrono::Utc;
use dotenvy::dotenv;
use log::{error, warn};

use powchain::api::{self, AppState};
use powchain::{Blockchain, Config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("configuration error: {err}");
            std::process::exit(2);
        }
    };

    let blockchain = match Blockchain::new(&Utc::now(), config.mining()) {
        Ok(bc) => bc,
        Err(err) => {
            error!("could not create blockchain: {err}");
            std::process::exit(1);
        }
    };

    if env::args().nth(1).as_deref() == Some("serve") {
        serve(config, blockchain).await
    } else {
        demo(blockchain);
        Ok(())
    }
}

/// Append two blocks and print the resulting chain with its verdict.
fn demo(mut blockchain: Blockchain) {
    for data in ["first block", "second block"] {
        let appended = blockchain
            .new_block(&Utc::now(), data)
            .and_then(|block| blockchain.append(block).map(|_| ()));
        if let Err(err) = appended {
            warn!("skipping {data:?}: {err}");
        }
    }

    dump_blockchain(&blockchain);
}

fn dump_blockchain(blockchain: &Blockchain) {
    for (i, block) in blockchain.blocks().iter().enumerate() {
        println!("Block {}: \"{}\" ({})", i + 1, block.data, block.hash);
    }

    if blockchain.is_valid() {
        println!("Blockchain is VALID");
    } else {
        println!("Blockchain is NOT VALID");
    }
}

async fn serve(config: Config, blockchain: Blockchain) -> std::io::Result<()> {
    println!(
        "⛓️ Starting blockchain API at http://{}:{}",
        config.host, config.port
    );

    let state = web::Data::new(AppState::new(blockchain));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
