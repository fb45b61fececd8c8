//! # Storefront Service
//!
//! Shopper-facing operations composed from the store API, the payment relay
//! and the local session. Each method maps to one thing a shopper does.

use crate::api::FakeStoreClient;
use crate::config::ClientConfig;
use crate::payment::PaymentBackendClient;
use crate::session::SessionStore;
use chrono::NaiveDate;
use shop_core::{
    categories, Address, AddressForm, Cart, CartItem, LocalCart, NewCart, NewUser, OrderSummary,
    PaymentSheetParams, Product, ProductFilter, ProfileUpdate, Session, ShopError, ShopResult,
    User,
};
use tracing::{info, instrument};

pub struct Storefront {
    api: FakeStoreClient,
    backend: PaymentBackendClient,
    sessions: SessionStore,
    config: ClientConfig,
}

impl Storefront {
    pub fn new(config: ClientConfig) -> ShopResult<Self> {
        Ok(Self {
            api: FakeStoreClient::new(config.api_base_url.clone())?,
            backend: PaymentBackendClient::new(config.payment_backend_url.clone())?,
            sessions: SessionStore::new(config.session_path.clone()),
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// The stored session, if a shopper is logged in
    pub fn restore_session(&self) -> ShopResult<Option<Session>> {
        self.sessions.load()
    }

    fn require_session(&self) -> ShopResult<Session> {
        self.sessions.load()?.ok_or(ShopError::NotLoggedIn)
    }

    /// Log in and remember the shopper.
    ///
    /// The login endpoint only returns a token, so the account is located by
    /// listing users and matching the username.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> ShopResult<Session> {
        let token = self.api.login(username, password).await?;

        let user = self
            .api
            .list_users(&token)
            .await?
            .into_iter()
            .find(|u| u.username == username)
            .ok_or_else(|| ShopError::UserNotFound {
                username: username.to_string(),
            })?;

        let session = Session::new(token, user);
        self.sessions.save(&session)?;

        info!("Logged in as {} (id={})", session.user.username, session.user.id);
        Ok(session)
    }

    pub fn logout(&self) -> ShopResult<()> {
        self.sessions.clear()
    }

    /// Create an account, returns the new user id
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        firstname: &str,
        lastname: &str,
    ) -> ShopResult<u64> {
        let new_user = NewUser::from_registration(username, password, firstname, lastname)?;
        let id = self.api.register(&new_user).await?;
        info!("Registered user {} (id={})", username, id);
        Ok(id)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub async fn browse(&self, filter: &ProductFilter) -> ShopResult<Vec<Product>> {
        let products = self.api.list_products().await?;
        Ok(filter.apply(&products).into_iter().cloned().collect())
    }

    pub async fn categories(&self) -> ShopResult<Vec<String>> {
        let products = self.api.list_products().await?;
        Ok(categories(&products))
    }

    pub async fn product(&self, id: u64) -> ShopResult<Product> {
        self.api.get_product(id).await
    }

    // =========================================================================
    // Cart & checkout
    // =========================================================================

    /// Add a product to the shopper's cart, dated today
    pub async fn add_to_cart(&self, product_id: u64, quantity: u32) -> ShopResult<Cart> {
        let today = chrono::Local::now().date_naive();
        self.add_to_cart_on(product_id, quantity, today).await
    }

    #[instrument(skip(self))]
    pub async fn add_to_cart_on(
        &self,
        product_id: u64,
        quantity: u32,
        date: NaiveDate,
    ) -> ShopResult<Cart> {
        let session = self.require_session()?;
        let new_cart = NewCart::single(session.user.id, product_id, quantity, date)?;
        let cart = self.api.add_to_cart(&new_cart).await?;
        info!("Added product {} x{} to cart {}", product_id, quantity, cart.id);
        Ok(cart)
    }

    /// Load the shopper's first cart with products resolved
    #[instrument(skip(self))]
    pub async fn load_cart(&self) -> ShopResult<LocalCart> {
        let session = self.require_session()?;

        let carts = self.api.user_carts(session.user.id).await?;
        let Some(cart) = carts.into_iter().next() else {
            return Ok(LocalCart::new());
        };

        let products = self.api.resolve_products(cart.product_ids()).await;
        let items = cart
            .products
            .iter()
            .filter_map(|line| {
                products
                    .get(&line.product_id)
                    .map(|p| CartItem::new(p.clone(), line.quantity))
            })
            .collect();

        Ok(LocalCart::from_items(items))
    }

    /// Obtain everything the payment sheet needs to charge `cart`
    #[instrument(skip(self, cart), fields(items = cart.item_count()))]
    pub async fn checkout(&self, cart: &LocalCart) -> ShopResult<PaymentSheetParams> {
        if cart.is_empty() {
            return Err(ShopError::EmptyCart);
        }

        let total = cart.total(self.config.currency);
        info!("Starting checkout: total={}", total.display());

        let client_secret = self.backend.request_client_secret(total.amount).await?;

        Ok(PaymentSheetParams {
            client_secret,
            merchant_display_name: self.config.merchant_display_name.clone(),
            country_code: self.config.country_code.clone(),
            google_pay: false,
            apple_pay: false,
        })
    }

    // =========================================================================
    // Profile & address
    // =========================================================================

    pub fn profile(&self) -> ShopResult<User> {
        Ok(self.require_session()?.user)
    }

    /// Apply profile edits to the stored session. Not sent to the store API.
    pub fn update_profile(&self, update: &ProfileUpdate) -> ShopResult<User> {
        let mut session = self.require_session()?;
        update.apply(&mut session.user)?;
        self.sessions.save(&session)?;
        Ok(session.user)
    }

    /// Fetch the shopper's address from the store API
    pub async fn address(&self) -> ShopResult<Address> {
        let session = self.require_session()?;
        let user = self.api.get_user(session.user.id, &session.token).await?;
        user.address.ok_or(ShopError::AddressNotFound {
            user_id: session.user.id,
        })
    }

    /// The current address as an editable form; blank when none is stored
    pub async fn address_form(&self) -> ShopResult<AddressForm> {
        match self.address().await {
            Ok(address) => Ok(AddressForm::from_address(&address)),
            Err(ShopError::AddressNotFound { .. }) => Ok(AddressForm::default()),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, form))]
    pub async fn update_address(&self, form: AddressForm) -> ShopResult<Address> {
        let session = self.require_session()?;
        let address = form.into_address();
        self.api
            .update_address(session.user.id, &address, &session.token)
            .await?;
        info!("Updated address for user {}", session.user.id);
        Ok(address)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Past carts inside the configured date window, products resolved once
    #[instrument(skip(self))]
    pub async fn order_history(&self) -> ShopResult<Vec<OrderSummary>> {
        let window = &self.config.order_history;
        let carts = self
            .api
            .carts_between(
                &window.start_date.format("%Y-%m-%d").to_string(),
                &window.end_date.format("%Y-%m-%d").to_string(),
            )
            .await?;

        let products = self
            .api
            .resolve_products(carts.iter().flat_map(|c| c.product_ids()))
            .await;

        Ok(carts
            .iter()
            .map(|cart| OrderSummary::from_cart(cart, &products, self.config.currency))
            .collect())
    }

    pub async fn order(&self, id: u64) -> ShopResult<OrderSummary> {
        let cart = self.api.get_cart(id).await?;
        let products = self.api.resolve_products(cart.product_ids()).await;
        Ok(OrderSummary::from_cart(&cart, &products, self.config.currency))
    }
}
