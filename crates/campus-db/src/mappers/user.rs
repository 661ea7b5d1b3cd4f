//! User model -> entity mapper

use campus_core::{DomainError, User};

use crate::models::UserModel;

/// Convert a `UserModel` row into the `User` entity.
///
/// The password hash on the model is intentionally dropped; callers that
/// need it go through `get_password_hash`.
pub fn user_from_model(model: UserModel) -> Result<User, DomainError> {
    let role = model
        .role
        .parse()
        .map_err(|_| DomainError::InternalError(format!("corrupt role value: {}", model.role)))?;

    Ok(User {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        role,
        age: model.age,
        is_employed: model.is_employed,
        whatsapp_number: model.whatsapp_number,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::UserRole;
    use chrono::Utc;

    fn sample_model(role: &str) -> UserModel {
        let now = Utc::now();
        UserModel {
            id: 42,
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: role.to_string(),
            age: Some(35),
            is_employed: true,
            whatsapp_number: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_maps_known_roles() {
        let user = user_from_model(sample_model("admin")).unwrap();
        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(user.id, 42);
        assert_eq!(user.email, "grace@example.com");
    }

    #[test]
    fn test_rejects_unknown_role() {
        let err = user_from_model(sample_model("superuser")).unwrap_err();
        assert!(matches!(err, DomainError::InternalError(_)));
    }
}
