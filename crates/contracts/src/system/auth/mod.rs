use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default, alias = "_id", alias = "USERID")]
    pub id: String,
    #[serde(default, alias = "username", alias = "USERNAME")]
    pub name: String,
    #[serde(default, alias = "EMAIL")]
    pub email: String,
}

impl UserInfo {
    /// Value sent as `LoggedUser` on every CRUD call
    pub fn logged_user(&self) -> &str {
        if !self.id.trim().is_empty() {
            &self.id
        } else {
            &self.email
        }
    }

    pub fn display_name(&self) -> &str {
        if !self.name.trim().is_empty() {
            &self.name
        } else {
            &self.email
        }
    }
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err("Ingrese correo y contraseña".into());
        }
        Ok(())
    }
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("El nombre es obligatorio".into());
        }
        if !self.email.contains('@') {
            return Err("El correo no es válido".into());
        }
        if self.password.len() < 6 {
            return Err("La contraseña debe tener al menos 6 caracteres".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_response_aliases() {
        let resp: LoginResponse = serde_json::from_value(json!({
            "accessToken": "jwt",
            "user": { "_id": "USR01", "username": "ana", "email": "ana@x.mx" }
        }))
        .unwrap();
        assert_eq!(resp.token, "jwt");
        assert_eq!(resp.user.logged_user(), "USR01");
        assert_eq!(resp.user.display_name(), "ana");
    }

    #[test]
    fn test_logged_user_falls_back_to_email() {
        let user = UserInfo {
            id: String::new(),
            name: String::new(),
            email: "luis@x.mx".into(),
        };
        assert_eq!(user.logged_user(), "luis@x.mx");
        assert_eq!(user.display_name(), "luis@x.mx");
    }

    #[test]
    fn test_register_validation() {
        let req = RegisterRequest {
            name: "Ana".into(),
            email: "ana@x.mx".into(),
            password: "123".into(),
        };
        assert!(req.validate().is_err());
    }
}
