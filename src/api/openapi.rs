//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, authors, books, genres, health, home, instances, languages, loans, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LocalLib API",
        version = "0.1.0",
        description = "Library Catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Home
        home::index,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Genres
        genres::list_genres,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        // Languages
        languages::list_languages,
        languages::create_language,
        languages::update_language,
        languages::delete_language,
        // Copies
        instances::list_instances,
        instances::get_instance,
        instances::create_instance,
        instances::update_instance,
        instances::delete_instance,
        // Loans
        loans::my_loans,
        loans::all_borrowed,
        loans::renewal_form,
        loans::renew_instance,
        // Users
        users::list_users,
        users::create_user,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            // Home
            home::HomeResponse,
            crate::services::stats::CatalogCounts,
            // Catalog entities
            crate::models::author::Author,
            crate::models::book::Book,
            crate::models::book::BookShort,
            crate::models::book::BookDetails,
            crate::models::genre::Genre,
            crate::models::genre::GenrePayload,
            crate::models::language::Language,
            crate::models::language::LanguagePayload,
            crate::models::instance::BookInstance,
            crate::models::instance::InstanceDetails,
            crate::models::instance::InstanceStatus,
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::BorrowerChoice,
            // Forms
            crate::forms::author::AuthorPayload,
            crate::forms::book::BookPayload,
            crate::forms::instance::InstanceCreatePayload,
            crate::forms::instance::InstanceUpdatePayload,
            crate::forms::renew::RenewPayload,
            crate::forms::FieldError,
            crate::forms::FieldErrorCode,
            crate::forms::FormErrors,
            // Loans
            crate::services::loans::RenewalForm,
            loans::RenewResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "catalog", description = "Catalog management"),
        (name = "loans", description = "Loan listings and renewal"),
        (name = "users", description = "User management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
