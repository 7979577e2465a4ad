use std::collections::HashSet;
use std::convert::Infallible;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use basecamp_core::{Aggregate, AggregateRoot, DomainError, DomainResult, Money, SessionId};
use basecamp_events::Event;

use crate::line::{CartCandidate, CartLineItem, LineKey};

/// Aggregate root: Cart.
///
/// One per shopping session. Lines are kept in insertion order and are unique
/// by `(name, category)`. Totals are always derived from the current lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    id: SessionId,
    items: Vec<CartLineItem>,
    version: u64,
}

impl Cart {
    /// Create an empty cart for a session.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            items: Vec::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> SessionId {
        self.id
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn item(&self, name: &str, category: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.key.matches(name, category))
    }

    pub fn is_in_cart(&self, name: &str, category: &str) -> bool {
        self.item(name, category).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `Σ price × quantity` over the current lines; zero when empty.
    pub fn compute_total(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Number of distinct lines. This is what the cart badge and checkout report.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Verify identity uniqueness and quantity positivity over the current lines.
    pub fn check_invariants(&self) -> DomainResult<()> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(&item.key) {
                return Err(DomainError::invariant(format!("duplicate cart line {}", item.key)));
            }
            if item.quantity == 0 {
                return Err(DomainError::invariant(format!(
                    "cart line {} has zero quantity",
                    item.key
                )));
            }
        }
        Ok(())
    }

    /// Add one unit of `candidate`. Existing lines only get their quantity bumped.
    pub fn add_item(&mut self, candidate: CartCandidate) -> Vec<CartEvent> {
        self.run(CartCommand::AddItem(AddItem {
            cart_id: self.id,
            candidate,
            occurred_at: Utc::now(),
        }))
    }

    pub fn remove_item(&mut self, name: &str, category: &str) -> Vec<CartEvent> {
        self.run(CartCommand::RemoveItem(RemoveItem {
            cart_id: self.id,
            key: LineKey::new(name, category),
            occurred_at: Utc::now(),
        }))
    }

    /// Bump an existing line. Never creates one.
    pub fn increment_quantity(&mut self, name: &str, category: &str) -> Vec<CartEvent> {
        self.run(CartCommand::IncrementQuantity(IncrementQuantity {
            cart_id: self.id,
            key: LineKey::new(name, category),
            occurred_at: Utc::now(),
        }))
    }

    /// Drop one unit; a line at quantity 1 is removed.
    pub fn decrement_quantity(&mut self, name: &str, category: &str) -> Vec<CartEvent> {
        self.run(CartCommand::DecrementQuantity(DecrementQuantity {
            cart_id: self.id,
            key: LineKey::new(name, category),
            occurred_at: Utc::now(),
        }))
    }

    pub fn clear_cart(&mut self) -> Vec<CartEvent> {
        self.run(CartCommand::ClearCart(ClearCart {
            cart_id: self.id,
            occurred_at: Utc::now(),
        }))
    }

    fn run(&mut self, command: CartCommand) -> Vec<CartEvent> {
        match self.execute(&command) {
            Ok(events) => events,
            Err(never) => match never {},
        }
    }

    fn position(&self, key: &LineKey) -> Option<usize> {
        self.items.iter().position(|i| &i.key == key)
    }
}

impl AggregateRoot for Cart {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub cart_id: SessionId,
    pub candidate: CartCandidate,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub cart_id: SessionId,
    pub key: LineKey,
    pub occurred_at: DateTime<Utc>,
}

/// Command: IncrementQuantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementQuantity {
    pub cart_id: SessionId,
    pub key: LineKey,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DecrementQuantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecrementQuantity {
    pub cart_id: SessionId,
    pub key: LineKey,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClearCart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearCart {
    pub cart_id: SessionId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    AddItem(AddItem),
    RemoveItem(RemoveItem),
    IncrementQuantity(IncrementQuantity),
    DecrementQuantity(DecrementQuantity),
    ClearCart(ClearCart),
}

/// Event: ItemAdded (a new line at quantity 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub cart_id: SessionId,
    pub key: LineKey,
    pub price: Money,
    pub sku: String,
    pub title: String,
    pub image: String,
    pub occurred_at: DateTime<Utc>,
}

/// Payload shared by quantity increments and decrements. Carries the new quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChanged {
    pub cart_id: SessionId,
    pub key: LineKey,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub cart_id: SessionId,
    pub key: LineKey,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CartCleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCleared {
    pub cart_id: SessionId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    ItemAdded(ItemAdded),
    QuantityIncremented(QuantityChanged),
    QuantityDecremented(QuantityChanged),
    ItemRemoved(ItemRemoved),
    CartCleared(CartCleared),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded(_) => "cart.item_added",
            CartEvent::QuantityIncremented(_) => "cart.quantity_incremented",
            CartEvent::QuantityDecremented(_) => "cart.quantity_decremented",
            CartEvent::ItemRemoved(_) => "cart.item_removed",
            CartEvent::CartCleared(_) => "cart.cleared",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::ItemAdded(e) => e.occurred_at,
            CartEvent::QuantityIncremented(e) => e.occurred_at,
            CartEvent::QuantityDecremented(e) => e.occurred_at,
            CartEvent::ItemRemoved(e) => e.occurred_at,
            CartEvent::CartCleared(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = Infallible;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ItemAdded(e) => {
                self.items.push(CartLineItem {
                    key: e.key.clone(),
                    price: e.price,
                    quantity: 1,
                    sku: e.sku.clone(),
                    title: e.title.clone(),
                    image: e.image.clone(),
                });
            }
            CartEvent::QuantityIncremented(e) | CartEvent::QuantityDecremented(e) => {
                if let Some(idx) = self.position(&e.key) {
                    self.items[idx].quantity = e.quantity;
                }
            }
            CartEvent::ItemRemoved(e) => {
                self.items.retain(|i| i.key != e.key);
            }
            CartEvent::CartCleared(_) => {
                self.items.clear();
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let events = match command {
            CartCommand::AddItem(cmd) => self.handle_add(cmd),
            CartCommand::RemoveItem(cmd) => self.handle_remove(cmd),
            CartCommand::IncrementQuantity(cmd) => self.handle_increment(cmd),
            CartCommand::DecrementQuantity(cmd) => self.handle_decrement(cmd),
            CartCommand::ClearCart(cmd) => self.handle_clear(cmd),
        };
        Ok(events)
    }
}

impl Cart {
    fn handle_add(&self, cmd: &AddItem) -> Vec<CartEvent> {
        let key = cmd.candidate.key();

        // First insert wins: a repeat add never rewrites price, sku or display fields.
        if let Some(existing) = self.item(&key.name, &key.category) {
            return vec![CartEvent::QuantityIncremented(QuantityChanged {
                cart_id: self.id,
                key,
                quantity: existing.quantity.saturating_add(1),
                occurred_at: cmd.occurred_at,
            })];
        }

        vec![CartEvent::ItemAdded(ItemAdded {
            cart_id: self.id,
            key,
            price: cmd.candidate.price,
            sku: cmd.candidate.sku.clone(),
            title: cmd.candidate.title.clone(),
            image: cmd.candidate.image.clone(),
            occurred_at: cmd.occurred_at,
        })]
    }

    fn handle_remove(&self, cmd: &RemoveItem) -> Vec<CartEvent> {
        if self.position(&cmd.key).is_none() {
            return vec![];
        }

        vec![CartEvent::ItemRemoved(ItemRemoved {
            cart_id: self.id,
            key: cmd.key.clone(),
            occurred_at: cmd.occurred_at,
        })]
    }

    fn handle_increment(&self, cmd: &IncrementQuantity) -> Vec<CartEvent> {
        let Some(idx) = self.position(&cmd.key) else {
            return vec![];
        };

        vec![CartEvent::QuantityIncremented(QuantityChanged {
            cart_id: self.id,
            key: cmd.key.clone(),
            quantity: self.items[idx].quantity.saturating_add(1),
            occurred_at: cmd.occurred_at,
        })]
    }

    fn handle_decrement(&self, cmd: &DecrementQuantity) -> Vec<CartEvent> {
        let Some(idx) = self.position(&cmd.key) else {
            return vec![];
        };

        let quantity = self.items[idx].quantity;
        if quantity > 1 {
            return vec![CartEvent::QuantityDecremented(QuantityChanged {
                cart_id: self.id,
                key: cmd.key.clone(),
                quantity: quantity - 1,
                occurred_at: cmd.occurred_at,
            })];
        }

        vec![CartEvent::ItemRemoved(ItemRemoved {
            cart_id: self.id,
            key: cmd.key.clone(),
            occurred_at: cmd.occurred_at,
        })]
    }

    fn handle_clear(&self, cmd: &ClearCart) -> Vec<CartEvent> {
        if self.items.is_empty() {
            return vec![];
        }

        vec![CartEvent::CartCleared(CartCleared {
            cart_id: self.id,
            occurred_at: cmd.occurred_at,
        })]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cart() -> Cart {
        Cart::new(SessionId::new())
    }

    fn tent() -> CartCandidate {
        CartCandidate::new("electronics", "Tent", Money::from_cents(29999))
            .with_sku("tent-001")
            .with_title("Tent")
            .with_image("tent.png")
    }

    fn price(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn empty_cart_totals_zero() {
        let cart = test_cart();
        assert_eq!(cart.compute_total(), Money::ZERO);
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total_quantity(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn add_then_increment_doubles_total() {
        let mut cart = test_cart();
        cart.add_item(CartCandidate::new("travel", "Travel Hammock", price("10.00")));
        cart.increment_quantity("Travel Hammock", "travel");
        assert_eq!(cart.compute_total(), price("20.00"));
    }

    #[test]
    fn tent_scenario() {
        let mut cart = test_cart();

        cart.add_item(tent());
        assert!(cart.is_in_cart("Tent", "electronics"));
        assert_eq!(cart.compute_total(), price("299.99"));

        cart.increment_quantity("Tent", "electronics");
        assert_eq!(cart.compute_total(), price("599.98"));
        assert_eq!(cart.item("Tent", "electronics").unwrap().quantity(), 2);

        cart.decrement_quantity("Tent", "electronics");
        cart.decrement_quantity("Tent", "electronics");
        assert!(!cart.is_in_cart("Tent", "electronics"));
        assert_eq!(cart.compute_total(), Money::ZERO);
    }

    #[test]
    fn repeat_add_keeps_first_insert_fields() {
        let mut cart = test_cart();
        cart.add_item(tent());
        let events = cart.add_item(
            CartCandidate::new("electronics", "Tent", price("1.00"))
                .with_sku("other")
                .with_title("Cheaper Tent")
                .with_image("other.png"),
        );

        assert!(matches!(
            events.as_slice(),
            [CartEvent::QuantityIncremented(QuantityChanged { quantity: 2, .. })]
        ));

        let line = cart.item("Tent", "electronics").unwrap();
        assert_eq!(line.quantity(), 2);
        assert_eq!(line.price(), price("299.99"));
        assert_eq!(line.sku(), "tent-001");
        assert_eq!(line.title(), "Tent");
        assert_eq!(line.image(), "tent.png");
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn same_name_in_different_categories_are_distinct_lines() {
        let mut cart = test_cart();
        cart.add_item(CartCandidate::new("desert", "Tent", price("219.99")));
        cart.add_item(CartCandidate::new("family", "Tent", price("299.99")));

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.compute_total(), price("519.98"));
        cart.check_invariants().unwrap();
    }

    #[test]
    fn lines_keep_insertion_order() {
        let mut cart = test_cart();
        cart.add_item(CartCandidate::new("water", "Fishing Kit", price("34.99")));
        cart.add_item(CartCandidate::new("desert", "Sun Protection Hat", price("19.99")));
        cart.add_item(CartCandidate::new("water", "Fishing Kit", price("34.99")));

        let names: Vec<_> = cart.items().iter().map(CartLineItem::name).collect();
        assert_eq!(names, ["Fishing Kit", "Sun Protection Hat"]);
    }

    #[test]
    fn increment_on_absent_item_is_a_no_op() {
        let mut cart = test_cart();
        let events = cart.increment_quantity("Tent", "electronics");
        assert!(events.is_empty());
        assert!(cart.is_empty());
        assert_eq!(cart.version(), 0);
    }

    #[test]
    fn decrement_on_absent_item_is_a_no_op() {
        let mut cart = test_cart();
        cart.add_item(tent());
        let before = cart.clone();

        assert!(cart.decrement_quantity("Tent", "mountain").is_empty());
        assert_eq!(cart, before);
    }

    #[test]
    fn decrement_at_one_emits_item_removed() {
        let mut cart = test_cart();
        cart.add_item(tent());
        let events = cart.decrement_quantity("Tent", "electronics");
        assert!(matches!(events.as_slice(), [CartEvent::ItemRemoved(_)]));
        assert!(!cart.is_in_cart("Tent", "electronics"));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut cart = test_cart();
        cart.add_item(tent());
        cart.add_item(CartCandidate::new("water", "Fishing Kit", price("34.99")));

        cart.remove_item("Tent", "electronics");
        let once = cart.clone();
        let events = cart.remove_item("Tent", "electronics");

        assert!(events.is_empty());
        assert_eq!(cart, once);
        assert_eq!(cart.compute_total(), price("34.99"));
    }

    #[test]
    fn clear_resets_everything() {
        let mut cart = test_cart();
        cart.add_item(tent());
        cart.add_item(CartCandidate::new("water", "Fishing Kit", price("34.99")));
        cart.increment_quantity("Fishing Kit", "water");

        cart.clear_cart();

        assert_eq!(cart.compute_total(), Money::ZERO);
        assert!(!cart.is_in_cart("Tent", "electronics"));
        assert!(!cart.is_in_cart("Fishing Kit", "water"));
    }

    #[test]
    fn clearing_an_empty_cart_emits_nothing() {
        let mut cart = test_cart();
        assert!(cart.clear_cart().is_empty());
    }

    #[test]
    fn item_count_is_distinct_lines_and_total_quantity_sums() {
        let mut cart = test_cart();
        cart.add_item(tent());
        cart.add_item(tent());
        cart.add_item(CartCandidate::new("water", "Fishing Kit", price("34.99")));

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn check_invariants_flags_duplicates_and_zero_quantities() {
        let mut cart = test_cart();
        cart.add_item(tent());
        let duplicate = cart.items[0].clone();
        cart.items.push(duplicate);
        assert!(matches!(cart.check_invariants(), Err(DomainError::InvariantViolation(_))));

        let mut cart = test_cart();
        cart.add_item(tent());
        cart.items[0].quantity = 0;
        assert!(matches!(cart.check_invariants(), Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn version_increments_on_apply() {
        let mut cart = test_cart();
        assert_eq!(cart.version(), 0);
        cart.add_item(tent());
        assert_eq!(cart.version(), 1);
        cart.add_item(tent());
        assert_eq!(cart.version(), 2);
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let mut cart = test_cart();
        cart.add_item(tent());
        let before = cart.clone();

        let cmd = CartCommand::IncrementQuantity(IncrementQuantity {
            cart_id: cart.id_typed(),
            key: LineKey::new("Tent", "electronics"),
            occurred_at: Utc::now(),
        });

        let events1 = cart.handle(&cmd).unwrap();
        let events2 = cart.handle(&cmd).unwrap();

        assert_eq!(cart, before);
        assert_eq!(events1, events2);
    }

    #[test]
    fn apply_is_deterministic() {
        let cart_id = SessionId::new();
        let key = LineKey::new("Tent", "electronics");
        let events = [
            CartEvent::ItemAdded(ItemAdded {
                cart_id,
                key: key.clone(),
                price: price("299.99"),
                sku: String::new(),
                title: String::new(),
                image: String::new(),
                occurred_at: Utc::now(),
            }),
            CartEvent::QuantityIncremented(QuantityChanged {
                cart_id,
                key: key.clone(),
                quantity: 2,
                occurred_at: Utc::now(),
            }),
            CartEvent::QuantityDecremented(QuantityChanged {
                cart_id,
                key,
                quantity: 1,
                occurred_at: Utc::now(),
            }),
        ];

        let mut cart1 = Cart::new(cart_id);
        let mut cart2 = Cart::new(cart_id);
        for e in &events {
            cart1.apply(e);
            cart2.apply(e);
        }

        assert_eq!(cart1, cart2);
        assert_eq!(cart1.version(), 3);
        assert_eq!(cart1.total_quantity(), 1);
    }

    #[test]
    fn event_types_are_stable() {
        let mut cart = test_cart();
        let added = cart.add_item(tent());
        let bumped = cart.increment_quantity("Tent", "electronics");
        let cleared = cart.clear_cart();

        assert_eq!(added[0].event_type(), "cart.item_added");
        assert_eq!(bumped[0].event_type(), "cart.quantity_incremented");
        assert_eq!(cleared[0].event_type(), "cart.cleared");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(usize),
            Remove(usize),
            Increment(usize),
            Decrement(usize),
            Clear,
        }

        const PRODUCTS: [(&str, &str, u64); 4] = [
            ("Tent", "family", 29999),
            ("Tent", "desert", 21999),
            ("Crampons", "mountain", 5999),
            ("Fishing Kit", "water", 3499),
        ];

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => (0..PRODUCTS.len()).prop_map(Op::Add),
                1 => (0..PRODUCTS.len()).prop_map(Op::Remove),
                2 => (0..PRODUCTS.len()).prop_map(Op::Increment),
                2 => (0..PRODUCTS.len()).prop_map(Op::Decrement),
                1 => Just(Op::Clear),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: any operation sequence leaves unique keys, positive
            /// quantities and a total equal to Σ price × quantity.
            #[test]
            fn invariants_hold_for_any_sequence(ops in proptest::collection::vec(op(), 0..60)) {
                let mut cart = test_cart();
                for op in ops {
                    match op {
                        Op::Add(i) => {
                            let (name, category, cents) = PRODUCTS[i];
                            cart.add_item(CartCandidate::new(category, name, Money::from_cents(cents)));
                        }
                        Op::Remove(i) => { cart.remove_item(PRODUCTS[i].0, PRODUCTS[i].1); }
                        Op::Increment(i) => { cart.increment_quantity(PRODUCTS[i].0, PRODUCTS[i].1); }
                        Op::Decrement(i) => { cart.decrement_quantity(PRODUCTS[i].0, PRODUCTS[i].1); }
                        Op::Clear => { cart.clear_cart(); }
                    }
                    prop_assert!(cart.check_invariants().is_ok());
                }

                let expected: u64 = cart
                    .items()
                    .iter()
                    .map(|i| i.price().cents() * u64::from(i.quantity()))
                    .sum();
                prop_assert_eq!(cart.compute_total().cents(), expected);
            }

            /// Property: n adds of the same product yield quantity n.
            #[test]
            fn repeated_adds_count_calls(n in 1u32..50) {
                let mut cart = test_cart();
                for _ in 0..n {
                    cart.add_item(tent());
                }
                prop_assert_eq!(cart.item("Tent", "electronics").unwrap().quantity(), n);
                prop_assert_eq!(cart.compute_total(), Money::from_cents(29999).times(n));
            }
        }
    }
}
