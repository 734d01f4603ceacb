pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

use crate::auth::middleware::AuthMiddleware;

/// Mounts every route. `/auth` stays public; `/users` and `/tasks` sit
/// behind `AuthMiddleware`, so their handlers can rely on verified claims
/// being present.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login)
            .service(auth::refresh),
    )
    .service(
        web::scope("/users")
            .wrap(AuthMiddleware)
            .service(users::me)
            .service(users::update_me)
            .service(users::logout),
    )
    .service(
        web::scope("/tasks")
            .wrap(AuthMiddleware)
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}
