//! One shopper's storefront session.

use chrono::{DateTime, Utc};
use serde::Serialize;

use basecamp_cart::{CartCandidate, CartEvent, CartLineItem};
use basecamp_catalog::Catalog;
use basecamp_core::{AggregateRoot, DomainError, Money, SessionId};
use basecamp_events::{AnalyticsSink, Tracked};

use crate::config::StorefrontConfig;
use crate::decision_scope::DecisionScope;
use crate::error::StorefrontResult;
use crate::profile::{Profile, ProfileStorage};
use crate::shared_cart::SharedCart;
use crate::store::KeyValueStore;

/// `application.name` reported by the profile screen's state view.
pub const PROFILE_APPLICATION_NAME: &str = "WeRetailMobileApp";

/// Screens that report a state view when shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Cart,
    Profile,
}

impl Screen {
    pub fn state_name(self) -> &'static str {
        match self {
            Screen::Home => "HomeTab",
            Screen::Cart => "CartTab",
            Screen::Profile => "ProfileTab",
        }
    }

    pub fn page_name(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Cart => "Cart",
            Screen::Profile => "Profile",
        }
    }

    /// The profile screen reports the mobile app's own name rather than the
    /// configured one.
    pub fn application_name(self) -> Option<&'static str> {
        match self {
            Screen::Profile => Some(PROFILE_APPLICATION_NAME),
            Screen::Home | Screen::Cart => None,
        }
    }
}

/// What the checkout screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSummary {
    pub lines: Vec<CartLineItem>,
    pub total: Money,
    pub item_count: usize,
    pub total_quantity: u64,
    pub shipping_to: Profile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub session_id: SessionId,
    pub lines: Vec<CartLineItem>,
    pub amount: Money,
    pub payment_method: String,
    pub paid_at: DateTime<Utc>,
}

/// Storefront session over an injected store and analytics sink.
///
/// Analytics calls are fire-and-forget: a failing sink is logged at `warn` and
/// never changes the outcome of a cart operation.
#[derive(Debug)]
pub struct Storefront<S, A> {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: SharedCart,
    profiles: ProfileStorage<S>,
    analytics: A,
    signed_in: Option<Profile>,
}

impl<S, A> Storefront<S, A>
where
    S: KeyValueStore,
    A: AnalyticsSink,
{
    pub fn new(config: StorefrontConfig, store: S, analytics: A) -> Self {
        Self::with_cart(config, store, analytics, SharedCart::new(SessionId::new()))
    }

    pub fn with_cart(config: StorefrontConfig, store: S, analytics: A, cart: SharedCart) -> Self {
        Self {
            config,
            catalog: Catalog::builtin(),
            cart,
            profiles: ProfileStorage::new(store),
            analytics,
            signed_in: None,
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &SharedCart {
        &self.cart
    }

    pub fn analytics(&self) -> &A {
        &self.analytics
    }

    pub fn session_id(&self) -> SessionId {
        self.cart.read(|c| *c.id())
    }

    pub fn signed_in(&self) -> Option<&Profile> {
        self.signed_in.as_ref()
    }

    /// Stored profile (empty when nobody has signed in on this device).
    pub fn profile(&self) -> Profile {
        self.profiles.load_profile()
    }

    pub fn view(&self, screen: Screen) {
        tracing::debug!(screen = screen.state_name(), "screen viewed");
        self.track(
            Tracked::state(screen.state_name())
                .with("web.webPageDetails.name", screen.page_name())
                .with(
                    "application.name",
                    screen.application_name().unwrap_or(self.config.application_name.as_str()),
                ),
        );
    }

    /// Add one unit of a catalog product, looked up by category key and slug.
    pub fn add_to_cart(&self, category: &str, slug: &str) -> StorefrontResult<Vec<CartEvent>> {
        let product = self.catalog.find_product(category, slug).inspect_err(|error| {
            tracing::warn!(category, slug, %error, "add to cart for unknown product");
        })?;

        let events = self.cart.update(|c| c.add_item(product.to_candidate(category)));

        tracing::info!(category, product = product.name, price = %product.price, "added to cart");
        self.track(
            Tracked::action("addToCart")
                .with("product.name", product.name)
                .with("product.category", category)
                .with("product.price", product.price.as_f64())
                .with("product.description", product.description)
                .with("cart.action", "add"),
        );

        Ok(events)
    }

    /// Add one unit of an arbitrary product (not necessarily in the catalog).
    pub fn add_candidate(&self, candidate: CartCandidate) -> Vec<CartEvent> {
        let message = Tracked::action("addToCart")
            .with("product.name", candidate.name.as_str())
            .with("product.category", candidate.category.as_str())
            .with("product.price", candidate.price.as_f64())
            .with("cart.action", "add");

        tracing::info!(
            category = %candidate.category,
            product = %candidate.name,
            price = %candidate.price,
            "added to cart"
        );
        let events = self.cart.update(|c| c.add_item(candidate));
        self.track(message);
        events
    }

    pub fn remove_from_cart(&self, name: &str, category: &str) -> Vec<CartEvent> {
        let events = self.cart.update(|c| c.remove_item(name, category));
        tracing::debug!(name, category, changed = !events.is_empty(), "remove from cart");
        events
    }

    pub fn increment(&self, name: &str, category: &str) -> Vec<CartEvent> {
        let events = self.cart.update(|c| c.increment_quantity(name, category));
        tracing::debug!(name, category, changed = !events.is_empty(), "increment quantity");
        events
    }

    pub fn decrement(&self, name: &str, category: &str) -> Vec<CartEvent> {
        let events = self.cart.update(|c| c.decrement_quantity(name, category));
        tracing::debug!(name, category, changed = !events.is_empty(), "decrement quantity");
        events
    }

    /// Build the checkout view and report it.
    pub fn view_checkout(&self) -> CheckoutSummary {
        let (lines, total, item_count, total_quantity) = self.cart.read(|c| {
            (c.items().to_vec(), c.compute_total(), c.item_count(), c.total_quantity())
        });

        self.track(
            Tracked::action("pageView")
                .with("page.name", "Checkout")
                .with("page.category", "Consumer")
                .with("page.type", "Checkout View")
                .with("user.journey", "Navigation")
                .with("cart.totalValue", total.to_string())
                .with("cart.itemCount", item_count),
        );

        CheckoutSummary {
            lines,
            total,
            item_count,
            total_quantity,
            shipping_to: self.profile(),
        }
    }

    /// Pay for the current cart, then empty it.
    ///
    /// The total is taken and the cart cleared under one lock, so nothing added
    /// concurrently is cleared without being paid for.
    pub fn pay_now(&self) -> Receipt {
        let (session_id, lines, amount) = self.cart.update(|c| {
            let lines = c.items().to_vec();
            let amount = c.compute_total();
            c.clear_cart();
            (*c.id(), lines, amount)
        });

        if lines.is_empty() {
            tracing::warn!(%session_id, "payment taken for an empty cart");
        }

        self.track(
            Tracked::action("payNow")
                .with("payment.method", self.config.payment_method.as_str())
                .with("payment.amount", amount.to_string()),
        );
        tracing::info!(%session_id, %amount, lines = lines.len(), "payment completed");

        Receipt {
            session_id,
            lines,
            amount,
            payment_method: self.config.payment_method.clone(),
            paid_at: Utc::now(),
        }
    }

    /// Sign in with the basic form. All three fields are required; the password
    /// is checked for presence only and never stored. A store failure does not
    /// fail the login: the user is signed in and tracked, and checkout prefill
    /// falls back to whatever the store still holds.
    pub fn login(&mut self, first_name: &str, email: &str, password: &str) -> StorefrontResult<Profile> {
        if first_name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::validation("please fill in all fields").into());
        }

        let profile = Profile::new(first_name.trim(), email.trim());

        self.track(
            Tracked::action("login")
                .with("method", "basic")
                .with("application", self.config.application_name.as_str())
                .with("firstName", profile.first_name.as_str())
                .with("email", profile.email.as_str()),
        );

        // The session is signed in even when the profile cannot be stored;
        // `save_profile` has already logged the failure.
        if self.profiles.save_profile(&profile).is_err() {
            tracing::warn!(email = %profile.email, "signed in without a stored profile");
        }
        self.signed_in = Some(profile.clone());
        tracing::info!(email = %profile.email, "user logged in");

        Ok(profile)
    }

    /// Forget the signed-in user. The stored profile is kept for prefill.
    pub fn logout(&mut self) {
        self.signed_in = None;
        self.track(Tracked::action("logout").with("application", self.config.application_name.as_str()));
        tracing::info!("user logged out");
    }

    pub fn decision_scope(&self) -> Option<DecisionScope> {
        self.profiles.load_decision_scope()
    }

    pub fn save_decision_scope(&self, scope: &DecisionScope) -> StorefrontResult<()> {
        self.profiles.save_decision_scope(scope)?;
        tracing::info!(scope = %scope, "decision scope saved");
        Ok(())
    }

    fn track(&self, message: Tracked) {
        let name = message.name.clone();
        if let Err(error) = self.analytics.publish(message) {
            tracing::warn!(%name, %error, "analytics call failed");
        }
    }
}
