use crate::auth::AuthError;

/// Cheapest cost bcrypt accepts. Keeps hashing fast under test.
#[cfg(test)]
pub const TEST_BCRYPT_COST: u32 = 4;

/// Hashes `password` with bcrypt on the blocking pool.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Checks `password` against a stored bcrypt hash.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password("hunter22".into(), TEST_BCRYPT_COST)
            .await
            .unwrap();
        assert_ne!(hash, "hunter22");
        assert!(verify_password("hunter22".into(), hash.clone()).await.unwrap());
        assert!(!verify_password("hunter23".into(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_error() {
        let err = verify_password("x".into(), "not-a-hash".into())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Hashing(_)));
    }
}
