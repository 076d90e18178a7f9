//! Test utilities for Kardex
//!
//! This module provides fixtures shared by unit tests across the crate:
//! a known-good product draft and a stored-profile JSON body.

use crate::validation::ProductDraft;

/// Create a product draft that passes every validation rule
///
/// # Examples
///
/// ```
/// use kardex::test_utils::valid_draft;
/// use kardex::validation::validate_product;
///
/// let payload = validate_product(&valid_draft()).unwrap();
/// assert_eq!(payload.price, 59.99);
/// ```
pub fn valid_draft() -> ProductDraft {
    ProductDraft {
        title: "Teclado mecánico".to_string(),
        description: "Teclado mecánico retroiluminado".to_string(),
        price: "59.99".to_string(),
        stock: "25".to_string(),
        category: "electronics".to_string(),
        brand: None,
    }
}

/// A user profile JSON body as the credential store persists it
///
/// camelCase keys, matching the login response shape.
pub fn sample_profile_json() -> String {
    r#"{"id":1,"username":"emilys","email":"emily@example.com","firstName":"Emily","lastName":"Johnson","gender":"female","image":""}"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::UserProfile;
    use crate::validation::validate_product;

    #[test]
    fn test_valid_draft_passes_validation() {
        let payload = validate_product(&valid_draft()).unwrap();
        assert_eq!(payload.title, "Teclado mecánico");
        assert_eq!(payload.price, 59.99);
        assert_eq!(payload.stock, 25);
        assert_eq!(payload.brand, None);
    }

    #[test]
    fn test_sample_profile_json_parses() {
        let profile: UserProfile = serde_json::from_str(&sample_profile_json()).unwrap();
        assert_eq!(profile.username, "emilys");
        assert_eq!(profile.full_name(), "Emily Johnson");
    }
}
