use crate::{
    api::{attendance, pages},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond((60_000 / requests_per_min as u64).max(1))
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("limiter settings are non-zero");
        Governor::new(&cfg)
    }

    let submit_limiter = Arc::new(build_limiter(config.rate_submit_per_min));

    // HTML pages
    cfg.service(web::resource("/").route(web::get().to(pages::index)))
        .service(
            web::resource("/submit")
                .wrap(submit_limiter.clone())
                .route(web::post().to(pages::submit)),
        )
        .service(web::resource("/dashboard").route(web::get().to(pages::dashboard)));

    // JSON API
    cfg.service(
        web::scope(&config.api_prefix).service(
            web::scope("/attendance")
                // /attendance
                .service(
                    web::resource("")
                        .wrap(submit_limiter)
                        .route(web::get().to(attendance::list_attendance))
                        .route(web::post().to(attendance::create_attendance)),
                ),
        ),
    );
}
