//! Authentication route handlers.
//!
//! A single `/auth` page hosts the login and registration tabs. Both forms
//! post back, re-render with inline field errors on failure, and redirect
//! home on success.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, PageContext, clear_current_user, set_current_user, set_flash};
use crate::models::{Flash, User};
use crate::services::{AuthError, FieldErrors, Registration};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration form data.
#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
}

impl From<RegisterForm> for Registration {
    fn from(form: RegisterForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            password: SecretString::from(form.password),
            password_confirm: SecretString::from(form.password_confirm),
        }
    }
}

/// Which tab the auth page opens on.
#[derive(Debug, Deserialize)]
pub struct TabQuery {
    pub tab: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Inline messages for one form.
#[derive(Clone, Default)]
pub struct FormErrorsView {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirm: Option<String>,
    /// Message not tied to a single field.
    pub general: Option<String>,
}

impl From<&FieldErrors> for FormErrorsView {
    fn from(errors: &FieldErrors) -> Self {
        let field = |name| errors.get(name).map(str::to_owned);
        Self {
            name: field("name"),
            email: field("email"),
            password: field("password"),
            password_confirm: field("password_confirm"),
            general: None,
        }
    }
}

impl FormErrorsView {
    fn general(message: &str) -> Self {
        Self {
            general: Some(message.to_owned()),
            ..Self::default()
        }
    }
}

/// Auth page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/index.html")]
pub struct AuthTemplate {
    pub page: PageContext,
    pub register_active: bool,
    pub login_email: String,
    pub login_errors: FormErrorsView,
    pub register_name: String,
    pub register_email: String,
    pub register_errors: FormErrorsView,
}

impl AuthTemplate {
    fn login(page: PageContext) -> Self {
        Self {
            page,
            register_active: false,
            login_email: String::new(),
            login_errors: FormErrorsView::default(),
            register_name: String::new(),
            register_email: String::new(),
            register_errors: FormErrorsView::default(),
        }
    }

    fn register(page: PageContext) -> Self {
        Self {
            register_active: true,
            ..Self::login(page)
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the auth page. Signed-in users are sent home.
#[instrument(skip(page, user))]
pub async fn show(
    OptionalAuth(user): OptionalAuth,
    page: PageContext,
    Query(query): Query<TabQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    if query.tab.as_deref() == Some("register") {
        AuthTemplate::register(page).into_response()
    } else {
        AuthTemplate::login(page).into_response()
    }
}

/// Record `user` as signed in and redirect home.
async fn sign_in(session: &Session, user: &User, message: &str) -> Result<Response> {
    set_current_user(session, user).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    set_flash(session, Flash::success(message)).await;
    Ok(Redirect::to("/").into_response())
}

/// Handle login form submission.
#[instrument(skip(state, session, page, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    page: PageContext,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let password = SecretString::from(form.password);

    let (status, errors) = match state.auth().login(&form.email, &password).await {
        Ok(user) => return sign_in(&session, &user, "Login berhasil! Selamat datang.").await,
        Err(AuthError::Validation(errors)) => {
            (StatusCode::UNPROCESSABLE_ENTITY, FormErrorsView::from(&errors))
        }
        Err(AuthError::InvalidCredentials) => (
            StatusCode::UNAUTHORIZED,
            FormErrorsView::general("Email atau password salah"),
        ),
        Err(e) => return Err(AppError::from(e)),
    };

    tracing::info!(status = %status, "login rejected");

    let template = AuthTemplate {
        login_email: form.email,
        login_errors: errors,
        ..AuthTemplate::login(page)
    };
    Ok((status, template).into_response())
}

/// Handle registration form submission.
#[instrument(skip(state, session, page, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    page: PageContext,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let registration = Registration::from(form);

    let (status, errors) = match state.auth().register(&registration).await {
        Ok(user) => {
            return sign_in(&session, &user, "Registrasi berhasil! Selamat bergabung.").await;
        }
        Err(AuthError::Validation(errors)) => {
            (StatusCode::UNPROCESSABLE_ENTITY, FormErrorsView::from(&errors))
        }
        Err(AuthError::UserAlreadyExists) => (
            StatusCode::CONFLICT,
            FormErrorsView {
                email: Some("Email sudah terdaftar".to_string()),
                ..FormErrorsView::default()
            },
        ),
        Err(e) => return Err(AppError::from(e)),
    };

    tracing::info!(status = %status, "registration rejected");

    let template = AuthTemplate {
        register_name: registration.name,
        register_email: registration.email,
        register_errors: errors,
        ..AuthTemplate::register(page)
    };
    Ok((status, template).into_response())
}

/// Handle logout.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    set_flash(&session, Flash::info("Anda telah logout")).await;
    Ok(Redirect::to("/"))
}
