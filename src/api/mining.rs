use actix_web::{HttpResponse, Responder, get, post, web};
use log::info;

use super::models::{AppState, MiningConfigBody};
use crate::blockchain::{DIFF_MAX, MiningConfig, WORKERS_MAX};

/// Get current PoW difficulty and worker count.
#[get("/mining/")]
pub async fn get_mining_config(state: web::Data<AppState>) -> impl Responder {
    let config = state.blockchain.lock().expect("mutex poisoned").mining_config();
    HttpResponse::Ok().json(MiningConfigBody {
        difficulty: config.difficulty,
        workers: config.workers,
    })
}

/// Update PoW difficulty and worker count (affects future blocks only).
#[post("/mining/")]
pub async fn set_mining_config(
    state: web::Data<AppState>,
    body: web::Json<MiningConfigBody>,
) -> impl Responder {
    if body.difficulty > DIFF_MAX {
        return HttpResponse::BadRequest().body(format!("difficulty too high (max {DIFF_MAX})"));
    }
    if body.workers == 0 || body.workers > WORKERS_MAX {
        return HttpResponse::BadRequest().body(format!("workers must be in 1..={WORKERS_MAX}"));
    }

    let mut bc = state.blockchain.lock().expect("mutex poisoned");
    bc.set_mining_config(MiningConfig::new(body.difficulty, body.workers));
    info!(
        "mining config set to difficulty={} workers={}",
        body.difficulty, body.workers
    );

    let config = bc.mining_config();
    HttpResponse::Ok().json(MiningConfigBody {
        difficulty: config.difficulty,
        workers: config.workers,
    })
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use chrono::Utc;

    use crate::api::models::MiningConfigBody;
    use crate::api::{AppState, init_routes};
    use crate::blockchain::{Blockchain, MiningConfig};

    fn state() -> web::Data<AppState> {
        let bc = Blockchain::new(&Utc::now(), MiningConfig::new(0, 1)).unwrap();
        web::Data::new(AppState::new(bc))
    }

    #[actix_web::test]
    async fn updates_config() {
        let state = state();
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/mining/")
            .set_json(serde_json::json!({ "difficulty": 2, "workers": 3 }))
            .to_request();
        let resp: MiningConfigBody = test::call_and_read_body_json(&app, req).await;
        assert_eq!((resp.difficulty, resp.workers), (2, 3));

        let req = test::TestRequest::get().uri("/api/v1/mining/").to_request();
        let resp: MiningConfigBody = test::call_and_read_body_json(&app, req).await;
        assert_eq!((resp.difficulty, resp.workers), (2, 3));
        assert_eq!(
            state.blockchain.lock().unwrap().mining_config(),
            MiningConfig::new(2, 3)
        );
    }

    #[actix_web::test]
    async fn rejects_excessive_difficulty() {
        let app = test::init_service(App::new().app_data(state()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/mining/")
            .set_json(serde_json::json!({ "difficulty": 7, "workers": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn rejects_out_of_range_workers() {
        let state = state();
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        for workers in [0, usize::MAX] {
            let req = test::TestRequest::post()
                .uri("/api/v1/mining/")
                .set_json(serde_json::json!({ "difficulty": 1, "workers": workers }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }

        // The chain is still usable and keeps its previous settings.
        let req = test::TestRequest::post()
            .uri("/api/v1/blocks/")
            .set_json(serde_json::json!({ "data": "after" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(!state.blockchain.is_poisoned());
        assert_eq!(
            state.blockchain.lock().unwrap().mining_config(),
            MiningConfig::new(0, 1)
        );
    }
}
