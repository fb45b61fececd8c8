//! # User Types
//!
//! Account, address and session types for the storefront.

use crate::error::{ShopError, ShopResult};
use serde::{Deserialize, Serialize};

const DEFAULT_EMAIL: &str = "defaultemail@gmail.com";
const DEFAULT_PHONE: &str = "000-000-0000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    pub firstname: String,
    pub lastname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geolocation {
    pub lat: String,
    pub long: String,
}

/// Postal address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geolocation: Option<Geolocation>,
}

impl Address {
    /// Placeholder address attached to new registrations
    pub fn placeholder() -> Self {
        Self {
            city: "Default City".to_string(),
            street: "Default Street".to_string(),
            number: 1,
            zipcode: "00000".to_string(),
            geolocation: Some(Geolocation {
                lat: "-37.3159".to_string(),
                long: "81.1496".to_string(),
            }),
        }
    }
}

/// Address as typed by the shopper; `number` is free text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressForm {
    pub city: String,
    pub street: String,
    pub number: String,
    pub zipcode: String,
}

impl AddressForm {
    /// Prefill the form from a stored address
    pub fn from_address(address: &Address) -> Self {
        Self {
            city: address.city.clone(),
            street: address.street.clone(),
            number: address.number.to_string(),
            zipcode: address.zipcode.clone(),
        }
    }

    /// Convert to an address. The house number keeps its leading digits
    /// ("12a" is 12); with no leading digits it becomes 0.
    pub fn into_address(self) -> Address {
        let trimmed = self.number.trim();
        let digits_end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());

        Address {
            city: self.city,
            street: self.street,
            number: trimmed[..digits_end].parse().unwrap_or(0),
            zipcode: self.zipcode,
            geolocation: None,
        }
    }
}

/// A store account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub email: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub name: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default)]
    pub phone: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name.firstname, self.name.lastname)
    }
}

/// Registration payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
    pub name: Name,
    pub address: Address,
    pub phone: String,
}

impl NewUser {
    /// Build a registration from the four required fields.
    ///
    /// Email, address and phone get placeholder values the shopper can edit later.
    pub fn from_registration(
        username: impl Into<String>,
        password: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
    ) -> ShopResult<Self> {
        let username = required("username", username.into())?;
        let password = required("password", password.into())?;
        let firstname = required("firstname", firstname.into())?;
        let lastname = required("lastname", lastname.into())?;

        Ok(Self {
            email: DEFAULT_EMAIL.to_string(),
            username,
            password,
            name: Name {
                firstname,
                lastname,
            },
            address: Address::placeholder(),
            phone: DEFAULT_PHONE.to_string(),
        })
    }
}

fn required(field: &str, value: String) -> ShopResult<String> {
    if value.trim().is_empty() {
        return Err(ShopError::MissingField {
            field: field.to_string(),
        });
    }
    Ok(value)
}

/// Editable profile fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
    pub phone: String,
}

impl ProfileUpdate {
    /// Start from the user's current values
    pub fn from_user(user: &User) -> Self {
        Self {
            firstname: user.name.firstname.clone(),
            lastname: user.name.lastname.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
        }
    }

    /// Write the fields onto `user`. Fails with `NoChanges` if nothing differs.
    pub fn apply(&self, user: &mut User) -> ShopResult<()> {
        if *self == Self::from_user(user) {
            return Err(ShopError::NoChanges);
        }

        user.name.firstname = self.firstname.clone();
        user.name.lastname = self.lastname.clone();
        user.username = self.username.clone();
        user.email = self.email.clone();
        user.phone = self.phone.clone();
        Ok(())
    }
}

/// An authenticated shopper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}
