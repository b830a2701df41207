use actix_web::{HttpResponse, Responder, get, post, web};
use chrono::Utc;
use log::{info, warn};

use super::models::{AppState, ChainResponse, NewBlockRequest, NewBlockResponse, ValidateResponse};
use crate::error::ChainError;

/// Get the full blockchain.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    let config = bc.mining_config();
    HttpResponse::Ok().json(ChainResponse {
        length: bc.len(),
        difficulty: config.difficulty,
        workers: config.workers,
        chain: bc.blocks().to_vec(),
    })
}

/// Validate the whole chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ValidateResponse {
        valid: bc.is_valid(),
        length: bc.len(),
    })
}

/// Mine a block carrying `data` on top of the current tip and append it.
///
/// The chain stays locked for the whole search so the tip cannot move under the miner.
#[post("/blocks/")]
pub async fn add_block(
    state: web::Data<AppState>,
    body: web::Json<NewBlockRequest>,
) -> impl Responder {
    let mut bc = state.blockchain.lock().expect("mutex poisoned");

    let appended = bc
        .new_block(&Utc::now(), &body.data)
        .and_then(|block| bc.append(block).cloned());

    match appended {
        Ok(block) => {
            let index = bc.len() - 1;
            info!("POST /blocks/ - appended block #{} ({})", index, block.hash);
            HttpResponse::Ok().json(NewBlockResponse {
                index,
                hash: block.hash,
                nonce: block.nonce,
            })
        }
        Err(err) => {
            warn!("POST /blocks/ - rejected: {}", err);
            rejection(&err)
        }
    }
}

/// Map a builder error to its HTTP response.
///
/// `InconsistentChain` cannot happen through `add_block`, which builds on the tip under
/// the lock, but a stale caller-built block would get 409.
fn rejection(err: &ChainError) -> HttpResponse {
    match err {
        ChainError::EmptyData => HttpResponse::BadRequest().body(err.to_string()),
        ChainError::InconsistentChain => HttpResponse::Conflict().body(err.to_string()),
    }
}
