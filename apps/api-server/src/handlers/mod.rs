//! HTTP handlers and route configuration.

mod comments;
mod health;
mod posts;
mod search;
mod share;
mod view;

#[cfg(test)]
mod tests;

use actix_web::{HttpResponse, web};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/search", web::get().to(search::search))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .service(
                        web::resource("/{post_id}/share")
                            .route(web::get().to(share::form))
                            .route(web::post().to(share::submit)),
                    )
                    .service(
                        // Submit only; other methods are rejected before any
                        // store access.
                        web::resource("/{post_id}/comment")
                            .route(web::post().to(comments::submit))
                            .default_service(web::to(|| async {
                                HttpResponse::MethodNotAllowed().finish()
                            })),
                    )
                    .route(
                        "/{year}/{month}/{day}/{slug}",
                        web::get().to(posts::detail_by_date),
                    )
                    .route("/{id}", web::get().to(posts::detail)),
            ),
    );
}
