//! Route table.
//!
//! `/health` is public. `/api/auth/login` is the only public API route;
//! everything else sits behind [`BearerAuth`].

use actix_web::{web, HttpResponse};
use serde_json::json;
use std::sync::Arc;

use crate::handlers;
use crate::middleware::BearerAuth;
use motodesk_auth::AuthService;

/// GET /health
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Register every route on the app. The caller supplies the auth service the
/// bearer middleware resolves tokens against.
pub fn configure(cfg: &mut web::ServiceConfig, auth: Arc<AuthService>) {
    cfg.route("/health", web::get().to(health));

    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(handlers::auth::login_handler))
                    .service(
                        web::scope("")
                            .wrap(BearerAuth::new(auth.clone()))
                            .route("/logout", web::post().to(handlers::auth::logout_handler))
                            .route("/me", web::get().to(handlers::auth::me_handler)),
                    ),
            )
            .service(
                web::scope("/v1")
                    .wrap(BearerAuth::new(auth))
                    // Login accounts
                    .route("/users", web::get().to(handlers::users::list_users))
                    .route("/users", web::post().to(handlers::users::create_user))
                    .route("/users/{id}", web::get().to(handlers::users::get_user))
                    .route("/users/{id}", web::put().to(handlers::users::update_user))
                    .route("/users/{id}", web::delete().to(handlers::users::delete_user))
                    .route(
                        "/users/{id}/password",
                        web::post().to(handlers::users::change_password),
                    )
                    // Job cards
                    .route(
                        "/job-cards",
                        web::get().to(handlers::job_cards::list_job_cards),
                    )
                    .route(
                        "/job-cards",
                        web::post().to(handlers::job_cards::create_job_card),
                    )
                    .route(
                        "/job-cards/{id}",
                        web::get().to(handlers::job_cards::get_job_card),
                    )
                    .route(
                        "/job-cards/{id}",
                        web::put().to(handlers::job_cards::update_job_card),
                    )
                    .route(
                        "/job-cards/{id}",
                        web::delete().to(handlers::job_cards::delete_job_card),
                    )
                    .route(
                        "/job-cards/{id}/status",
                        web::post().to(handlers::job_cards::set_status),
                    )
                    .route(
                        "/job-cards/{id}/assign",
                        web::post().to(handlers::job_cards::assign),
                    )
                    .route(
                        "/job-cards/{id}/line-items",
                        web::post().to(handlers::job_cards::add_line_item),
                    )
                    .route(
                        "/job-cards/{id}/line-items/{part_id}",
                        web::delete().to(handlers::job_cards::remove_line_item),
                    )
                    .route(
                        "/job-cards/{id}/audit",
                        web::get().to(handlers::job_cards::audit_trail),
                    )
                    .route("/audit", web::get().to(handlers::audit::list_audit))
                    // Bays
                    .route("/bays", web::get().to(handlers::bays::list_bays))
                    .route("/bays", web::post().to(handlers::bays::create_bay))
                    .route("/bays/{id}", web::get().to(handlers::bays::get_bay))
                    .route("/bays/{id}", web::put().to(handlers::bays::update_bay))
                    .route("/bays/{id}", web::delete().to(handlers::bays::delete_bay))
                    // Staff and attendance
                    .route("/staff", web::get().to(handlers::staff::list_staff))
                    .route("/staff", web::post().to(handlers::staff::create_staff))
                    .route("/staff/{id}", web::get().to(handlers::staff::get_staff))
                    .route("/staff/{id}", web::put().to(handlers::staff::update_staff))
                    .route(
                        "/staff/{id}",
                        web::delete().to(handlers::staff::delete_staff),
                    )
                    .route(
                        "/staff/{id}/attendance/check-in",
                        web::post().to(handlers::staff::check_in),
                    )
                    .route(
                        "/staff/{id}/attendance/check-out",
                        web::post().to(handlers::staff::check_out),
                    )
                    .route(
                        "/attendance",
                        web::get().to(handlers::staff::list_attendance),
                    )
                    // Customers and loyalty
                    .route(
                        "/customers",
                        web::get().to(handlers::customers::list_customers),
                    )
                    .route(
                        "/customers",
                        web::post().to(handlers::customers::create_customer),
                    )
                    .route(
                        "/customers/{id}",
                        web::get().to(handlers::customers::get_customer),
                    )
                    .route(
                        "/customers/{id}",
                        web::put().to(handlers::customers::update_customer),
                    )
                    .route(
                        "/customers/{id}/loyalty",
                        web::get().to(handlers::customers::loyalty_summary),
                    )
                    .route(
                        "/customers/{id}/loyalty/adjust",
                        web::post().to(handlers::customers::adjust_points),
                    )
                    .route(
                        "/customers/{id}/points-history",
                        web::get().to(handlers::customers::points_history),
                    )
                    // Rewards and redemptions
                    .route("/rewards", web::get().to(handlers::rewards::list_rewards))
                    .route("/rewards", web::post().to(handlers::rewards::create_reward))
                    .route(
                        "/rewards/{id}",
                        web::get().to(handlers::rewards::get_reward),
                    )
                    .route(
                        "/rewards/{id}",
                        web::put().to(handlers::rewards::update_reward),
                    )
                    .route(
                        "/rewards/{id}",
                        web::delete().to(handlers::rewards::delete_reward),
                    )
                    .route(
                        "/redemptions",
                        web::post().to(handlers::rewards::create_redemption),
                    )
                    .route(
                        "/redemptions",
                        web::get().to(handlers::rewards::list_redemptions),
                    )
                    .route(
                        "/redemptions/{id}",
                        web::get().to(handlers::rewards::get_redemption),
                    )
                    .route(
                        "/redemptions/{id}/fulfill",
                        web::post().to(handlers::rewards::fulfill_redemption),
                    )
                    .route(
                        "/redemptions/{id}/cancel",
                        web::post().to(handlers::rewards::cancel_redemption),
                    )
                    // Parts
                    .route("/parts", web::get().to(handlers::parts::list_parts))
                    .route("/parts", web::post().to(handlers::parts::create_part))
                    .route("/parts/{id}", web::get().to(handlers::parts::get_part))
                    .route("/parts/{id}", web::put().to(handlers::parts::update_part))
                    .route(
                        "/parts/{id}",
                        web::delete().to(handlers::parts::delete_part),
                    )
                    .route(
                        "/parts/{id}/stock",
                        web::post().to(handlers::parts::adjust_stock),
                    )
                    // Reports
                    .route(
                        "/reports/revenue",
                        web::get().to(handlers::reports::revenue),
                    )
                    .route("/reports/jobs", web::get().to(handlers::reports::jobs))
                    .route(
                        "/reports/attendance",
                        web::get().to(handlers::reports::attendance),
                    )
                    .route(
                        "/reports/loyalty",
                        web::get().to(handlers::reports::loyalty),
                    ),
            ),
    );
}
