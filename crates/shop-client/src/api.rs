//! # Fake Store API Client
//!
//! Typed wrapper over the public Fake Store REST API.
//! Catalog, carts and users all live on the remote service.

use futures::stream::{FuturesUnordered, StreamExt};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shop_core::{Address, Cart, NewCart, NewUser, Product, ShopError, ShopResult, User};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Fake Store API client
#[derive(Debug, Clone)]
pub struct FakeStoreClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: u64,
}

#[derive(Debug, Serialize)]
struct AddressUpdate<'a> {
    address: &'a Address,
}

impl FakeStoreClient {
    /// Create a client against `base_url` (e.g. `https://fakestoreapi.com`)
    pub fn new(base_url: impl Into<String>) -> ShopResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ShopError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the raw body of a successful response
    async fn send(&self, builder: RequestBuilder) -> ShopResult<String> {
        let response = builder
            .send()
            .await
            .map_err(|e| ShopError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ShopError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            return Err(ShopError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ShopResult<T> {
        let body = self.send(builder).await?;
        serde_json::from_str(&body).map_err(|e| {
            ShopError::Serialization(format!("Failed to parse store API response: {}", e))
        })
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// `GET /products`
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ShopResult<Vec<Product>> {
        let products: Vec<Product> = self.send_json(self.client.get(self.url("/products"))).await?;
        debug!("Fetched {} products", products.len());
        Ok(products)
    }

    /// `GET /products/{id}`. The API answers unknown ids with an empty body.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: u64) -> ShopResult<Product> {
        let body = self
            .send(self.client.get(self.url(&format!("/products/{}", id))))
            .await?;

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Err(ShopError::ProductNotFound { product_id: id });
        }

        serde_json::from_str(trimmed)
            .map_err(|e| ShopError::Serialization(format!("Failed to parse product {}: {}", id, e)))
    }

    /// Fetch every distinct product concurrently. Failures are logged and skipped.
    #[instrument(skip(self, ids))]
    pub async fn resolve_products<I>(&self, ids: I) -> HashMap<u64, Product>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut distinct: Vec<u64> = Vec::new();
        for id in ids {
            if !distinct.contains(&id) {
                distinct.push(id);
            }
        }

        let mut pending: FuturesUnordered<_> = distinct
            .iter()
            .map(|&id| async move { (id, self.get_product(id).await) })
            .collect();

        let mut products = HashMap::with_capacity(distinct.len());
        while let Some((id, result)) = pending.next().await {
            match result {
                Ok(product) => {
                    products.insert(id, product);
                }
                Err(e) => warn!("Could not resolve product {}: {}", id, e),
            }
        }
        products
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// `POST /auth/login`, returns the auth token
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> ShopResult<String> {
        let request = self
            .client
            .post(self.url("/auth/login"))
            .json(&LoginRequest { username, password });

        let response: LoginResponse = match self.send_json(request).await {
            Ok(response) => response,
            Err(ShopError::ApiError { status, message }) => {
                debug!("Login rejected: status={}, body={}", status, message);
                return Err(ShopError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        response
            .token
            .filter(|t| !t.is_empty())
            .ok_or(ShopError::InvalidCredentials)
    }

    /// `GET /users`
    #[instrument(skip(self, token))]
    pub async fn list_users(&self, token: &str) -> ShopResult<Vec<User>> {
        self.send_json(self.client.get(self.url("/users")).bearer_auth(token))
            .await
    }

    /// `GET /users/{id}`
    #[instrument(skip(self, token))]
    pub async fn get_user(&self, id: u64, token: &str) -> ShopResult<User> {
        self.send_json(
            self.client
                .get(self.url(&format!("/users/{}", id)))
                .bearer_auth(token),
        )
        .await
    }

    /// `POST /users`, returns the new user's id
    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn register(&self, user: &NewUser) -> ShopResult<u64> {
        let created: CreatedResponse = self
            .send_json(self.client.post(self.url("/users")).json(user))
            .await?;
        Ok(created.id)
    }

    /// `PUT /users/{id}` with only the address, returns the API's echo
    #[instrument(skip(self, address, token))]
    pub async fn update_address(
        &self,
        id: u64,
        address: &Address,
        token: &str,
    ) -> ShopResult<serde_json::Value> {
        self.send_json(
            self.client
                .put(self.url(&format!("/users/{}", id)))
                .bearer_auth(token)
                .json(&AddressUpdate { address }),
        )
        .await
    }

    // =========================================================================
    // Carts
    // =========================================================================

    /// `POST /carts`
    #[instrument(skip(self, cart), fields(user_id = cart.user_id))]
    pub async fn add_to_cart(&self, cart: &NewCart) -> ShopResult<Cart> {
        self.send_json(self.client.post(self.url("/carts")).json(cart))
            .await
    }

    /// `GET /carts/user/{id}`
    #[instrument(skip(self))]
    pub async fn user_carts(&self, user_id: u64) -> ShopResult<Vec<Cart>> {
        self.send_json(
            self.client
                .get(self.url(&format!("/carts/user/{}", user_id))),
        )
        .await
    }

    /// `GET /carts/{id}`
    #[instrument(skip(self))]
    pub async fn get_cart(&self, id: u64) -> ShopResult<Cart> {
        self.send_json(self.client.get(self.url(&format!("/carts/{}", id))))
            .await
    }

    /// `GET /carts?startdate=..&enddate=..`
    #[instrument(skip(self))]
    pub async fn carts_between(&self, start: &str, end: &str) -> ShopResult<Vec<Cart>> {
        self.send_json(
            self.client
                .get(self.url("/carts"))
                .query(&[("startdate", start), ("enddate", end)]),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn product_json(id: u64, price: f64) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("Product {}", id),
            "price": price,
            "description": "desc",
            "category": "electronics",
            "image": "https://fakestoreapi.com/img/x.jpg",
            "rating": { "rate": 4.1, "count": 10 }
        })
    }

    #[tokio::test]
    async fn test_list_products() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([product_json(1, 109.95), product_json(2, 22.3)])),
            )
            .mount(&server)
            .await;

        let client = FakeStoreClient::new(server.uri()).unwrap();
        let products = client.list_products().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].price, 22.3);
    }

    #[tokio::test]
    async fn test_get_product_empty_body_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/999"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let client = FakeStoreClient::new(server.uri()).unwrap();
        let err = client.get_product(999).await.unwrap_err();
        assert!(matches!(err, ShopError::ProductNotFound { product_id: 999 }));
    }

    #[tokio::test]
    async fn test_resolve_products_skips_failures_and_dedupes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_json(1, 10.0)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/products/2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = FakeStoreClient::new(server.uri()).unwrap();
        let products = client.resolve_products(vec![1, 2, 1]).await;
        assert_eq!(products.len(), 1);
        assert!(products.contains_key(&1));
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({ "username": "mor_2314", "password": "83r5^_" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "eyJhbGc" })))
            .mount(&server)
            .await;

        let client = FakeStoreClient::new(server.uri()).unwrap();
        assert_eq!(client.login("mor_2314", "83r5^_").await.unwrap(), "eyJhbGc");
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string("username or password is incorrect"),
            )
            .mount(&server)
            .await;

        let client = FakeStoreClient::new(server.uri()).unwrap();
        let err = client.login("mor_2314", "wrong").await.unwrap_err();
        assert!(matches!(err, ShopError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_update_address_sends_bearer_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/users/3"))
            .and(header("Authorization", "Bearer tok"))
            .and(body_json(json!({
                "address": { "city": "Izmir", "street": "Kordon", "number": 12, "zipcode": "35000" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 3 })))
            .expect(1)
            .mount(&server)
            .await;

        let address = Address {
            city: "Izmir".into(),
            street: "Kordon".into(),
            number: 12,
            zipcode: "35000".into(),
            geolocation: None,
        };
        let client = FakeStoreClient::new(server.uri()).unwrap();
        let echo = client.update_address(3, &address, "tok").await.unwrap();
        assert_eq!(echo["id"], 3);
    }

    #[tokio::test]
    async fn test_carts_between_passes_date_window() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/carts"))
            .and(query_param("startdate", "2019-12-10"))
            .and(query_param("enddate", "2024-10-10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "userId": 1, "date": "2020-03-02T00:00:00.000Z",
                  "products": [{ "productId": 1, "quantity": 4 }] }
            ])))
            .mount(&server)
            .await;

        let client = FakeStoreClient::new(server.uri()).unwrap();
        let carts = client.carts_between("2019-12-10", "2024-10-10").await.unwrap();
        assert_eq!(carts.len(), 1);
        assert_eq!(carts[0].products[0].quantity, 4);
    }

    #[tokio::test]
    async fn test_non_success_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/carts/5"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = FakeStoreClient::new(server.uri()).unwrap();
        let err = client.get_cart(5).await.unwrap_err();
        assert!(matches!(err, ShopError::ApiError { status: 503, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_unreachable_store_is_network_error() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let client = FakeStoreClient::new(uri).unwrap();
        let err = client.list_products().await.unwrap_err();
        assert!(matches!(err, ShopError::NetworkError(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_serialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/carts/7"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = FakeStoreClient::new(server.uri()).unwrap();
        assert!(matches!(
            client.get_cart(7).await,
            Err(ShopError::Serialization(_))
        ));
    }
}
