//! Servicio de autenticación
//!
//! Registro, login con bcrypt + JWT, resolución de la identidad de una
//! request y edición del perfil propio.

use bcrypt::{hash, verify};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::database::RecordStore;
use crate::dto::auth_dto::AuthResponse;
use crate::models::auth::{require_identity, Identity};
use crate::models::user::{LoginRequest, SignupRequest, UpdateProfileRequest, User, UserResponse};
use crate::repositories::UserRepository;
use crate::utils::errors::{conflict_error, AppError, AppResult};
use crate::utils::jwt::{generate_token, verify_token, JwtConfig};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService {
    users: UserRepository,
    jwt: JwtConfig,
    bcrypt_cost: u32,
    write_lock: Mutex<()>,
}

impl AuthService {
    pub fn new(store: Arc<dyn RecordStore>, jwt: JwtConfig, bcrypt_cost: u32) -> Self {
        Self {
            users: UserRepository::new(store),
            jwt,
            bcrypt_cost,
            write_lock: Mutex::new(()),
        }
    }

    /// Registrar un usuario nuevo y abrir su sesión
    pub async fn signup(&self, request: SignupRequest) -> AppResult<AuthResponse> {
        request.validate()?;
        let email = request.email.trim().to_lowercase();

        let _guard = self.write_lock.lock().await;
        if self.users.email_exists(&email).await? {
            return Err(conflict_error("User", "email", &email));
        }

        let password_hash = hash(&request.password, self.bcrypt_cost)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let user = User {
            id: Uuid::new_v4(),
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            email,
            password_hash,
            role: request.account_type,
            phone: None,
            address: None,
            created_at: Utc::now(),
        };
        self.users.insert(&user).await?;

        info!("👤 Usuario registrado: {} ({})", user.email, user.role);
        self.session_for(user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let user = match self.users.find_by_email(&request.email).await? {
            Some(user) => user,
            None => {
                warn!("⚠️ Login fallido: email desconocido");
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;
        if !valid {
            warn!("⚠️ Login fallido para {}", user.email);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        info!("🔑 Login exitoso: {}", user.email);
        self.session_for(user)
    }

    /// Resolver un token bearer a la identidad actual del usuario
    ///
    /// El rol y los datos de contacto salen del registro guardado, no del
    /// token, así un perfil recién completado sirve sin volver a loguearse.
    pub async fn identity_from_token(&self, token: &str) -> AppResult<Identity> {
        let claims = verify_token(token, &self.jwt)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Jwt("Invalid subject in token".to_string()))?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

        Ok(identity_of(&user))
    }

    pub async fn get_profile(&self, identity: Option<&Identity>) -> AppResult<UserResponse> {
        let identity = require_identity(identity)?;
        Ok(self.load(identity.user_id).await?.into())
    }

    /// Actualizar nombre, email, teléfono y dirección
    pub async fn update_profile(
        &self,
        identity: Option<&Identity>,
        request: UpdateProfileRequest,
    ) -> AppResult<UserResponse> {
        let identity = require_identity(identity)?;
        request.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut user = self.load(identity.user_id).await?;

        if let Some(email) = request.email {
            let email = email.trim().to_lowercase();
            if email != user.email {
                if self.users.email_exists(&email).await? {
                    return Err(conflict_error("User", "email", &email));
                }
                user.email = email;
            }
        }
        if let Some(first_name) = request.first_name {
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = request.last_name {
            user.last_name = last_name.trim().to_string();
        }
        if let Some(phone) = request.phone {
            user.phone = Some(phone.trim().to_string());
        }
        if let Some(address) = request.address {
            user.address = Some(address.trim().to_string());
        }

        self.users.update(&user).await?;

        info!("📝 Perfil actualizado: {}", user.id);
        Ok(user.into())
    }

    async fn load(&self, user_id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))
    }

    fn session_for(&self, user: User) -> AppResult<AuthResponse> {
        let token = generate_token(user.id, user.role, &self.jwt)?;
        Ok(AuthResponse::bearer(token, self.jwt.expiration, user.into()))
    }
}

fn identity_of(user: &User) -> Identity {
    Identity {
        user_id: user.id,
        name: user.full_name(),
        role: user.role,
        phone: user.phone.clone(),
        address: user.address.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryRecordStore;
    use crate::models::auth::UserRole;

    fn service() -> AuthService {
        let jwt = JwtConfig {
            secret: "test-secret".to_string(),
            expiration: 3600,
        };
        AuthService::new(Arc::new(MemoryRecordStore::new()), jwt, 4)
    }

    fn signup(email: &str, role: UserRole) -> SignupRequest {
        SignupRequest {
            first_name: "Amira".to_string(),
            last_name: "Ben Salah".to_string(),
            email: email.to_string(),
            password: "supersecret".to_string(),
            confirm_password: "supersecret".to_string(),
            account_type: role,
        }
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_then_resolve_identity() {
        let service = service();
        let session = service
            .signup(signup("Amira@Example.com", UserRole::Customer))
            .await
            .unwrap();

        assert_eq!(session.user.email, "amira@example.com");
        assert_eq!(session.token_type, "Bearer");

        let identity = service.identity_from_token(&session.token).await.unwrap();
        assert_eq!(identity.user_id, session.user.id);
        assert_eq!(identity.name, "Amira Ben Salah");
        assert_eq!(identity.role, UserRole::Customer);
        assert_eq!(identity.missing_booking_fields(), vec!["phone", "address"]);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_conflict() {
        let service = service();
        service.signup(signup("karim@example.com", UserRole::Agency)).await.unwrap();

        let again = service.signup(signup("KARIM@example.com", UserRole::Customer)).await;
        assert!(matches!(again, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_login_checks_password() {
        let service = service();
        service.signup(signup("sami@example.com", UserRole::Customer)).await.unwrap();

        assert!(service.login(login("sami@example.com", "supersecret")).await.is_ok());
        assert!(matches!(
            service.login(login("sami@example.com", "wrong-password")).await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            service.login(login("nobody@example.com", "supersecret")).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_update_profile_completes_booking_fields() {
        let service = service();
        let session = service.signup(signup("lina@example.com", UserRole::Customer)).await.unwrap();
        let identity = service.identity_from_token(&session.token).await.unwrap();

        let updated = service
            .update_profile(
                Some(&identity),
                UpdateProfileRequest {
                    phone: Some("+216 98 765 432".to_string()),
                    address: Some("5 Avenue Habib Bourguiba, Sousse".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.phone.as_deref(), Some("+216 98 765 432"));

        let refreshed = service.identity_from_token(&session.token).await.unwrap();
        assert!(refreshed.missing_booking_fields().is_empty());
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        assert!(matches!(
            service().identity_from_token("not-a-jwt").await,
            Err(AppError::Jwt(_))
        ));
    }
}
