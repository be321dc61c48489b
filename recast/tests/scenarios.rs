use std::sync::Arc;

use recast::{Change, ChangeError, accessor};
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: i32,
    name: String,
    price: Decimal,
}

impl Product {
    pub fn new(id: i32, name: String, price: Decimal) -> Self {
        Product { id, name, price }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }
}

recast::record! {
    Product {
        properties: [id: i32, name: String, price: Decimal],
        constructors: [new(id: i32, name: String, price: Decimal)],
    }
}

fn ipod() -> Product {
    Product::new(1, "iPod".to_string(), Decimal::new(14999, 2))
}

#[test]
fn changing_price_keeps_everything_else() {
    recast_testhelpers::setup();

    let p1 = ipod();
    let p2 = p1.change(accessor!(p => p.price), Decimal::new(29999, 2)).unwrap();

    assert!(!std::ptr::eq(&p1, &p2));
    assert_eq!(p2.id(), p1.id());
    assert_eq!(p2.name(), p1.name());
    assert_eq!(p2.price(), Decimal::new(29999, 2));
    assert_ne!(p2.price(), p1.price());
    assert_eq!(p1, ipod());
}

#[test]
fn changing_to_the_same_value_still_builds_a_new_instance() {
    recast_testhelpers::setup();

    let p1 = ipod();
    let p2 = recast::change(&p1, accessor!(p => p.price), p1.price()).unwrap();

    assert!(!std::ptr::eq(&p1, &p2));
    assert_eq!(p1, p2);
}

#[test]
fn changes_chain() {
    recast_testhelpers::setup();

    let p2 = ipod()
        .change(accessor!(p => p.price), Decimal::new(29999, 2))
        .unwrap();
    let p3 = p2
        .change(accessor!(p => p.name), "iPad".to_string())
        .and_then(|p| p.change(accessor!(p => p.price), Decimal::new(49999, 2)))
        .unwrap();

    assert_eq!(
        p3,
        Product::new(p2.id(), "iPad".to_string(), Decimal::new(49999, 2))
    );
    assert_ne!(p3, p2);
    assert_ne!(p3, ipod());

    let reversed = p2
        .change(accessor!(p => p.price), Decimal::new(49999, 2))
        .and_then(|p| p.change(accessor!(p => p.name), "iPad".to_string()))
        .unwrap();
    assert_eq!(reversed, p3);
}

#[derive(Debug)]
pub struct Category {
    id: i32,
    name: String,
    product_count: i32,
}

impl Category {
    pub fn new(id: i32, name: String) -> Self {
        Category {
            id,
            name,
            product_count: 0,
        }
    }

    pub fn stocked(self, product_count: i32) -> Self {
        Category {
            product_count,
            ..self
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn product_count(&self) -> i32 {
        self.product_count
    }
}

recast::record! {
    Category {
        properties: [id: i32, name: String, product_count: i32],
        constructors: [new(id: i32, name: String)],
    }
}

#[test]
fn members_outside_the_constructor_are_dropped() {
    recast_testhelpers::setup();

    let c1 = Category::new(1, "Electronics".to_string()).stocked(12);
    let c2 = c1
        .change(accessor!(c => c.name), "Apple Electronics".to_string())
        .unwrap();

    assert!(!std::ptr::eq(&c1, &c2));
    assert_eq!(c2.id(), 1);
    assert_eq!(c2.name(), "Apple Electronics");
    assert_eq!(c2.product_count(), 0);
    assert_eq!(c1.product_count(), 12);
}

#[test]
fn changing_a_member_outside_the_constructor_copies_the_record() {
    recast_testhelpers::setup();

    let c1 = Category::new(4, "Garden".to_string()).stocked(3);
    let c2 = c1.change(accessor!(c => c.product_count), 99).unwrap();

    assert_eq!(c2.id(), 4);
    assert_eq!(c2.name(), "Garden");
    assert_eq!(c2.product_count(), 0);
}

pub struct Tag {
    id: i32,
    name: String,
    count: i32,
}

impl Tag {
    pub fn new(id: i32, name: String, count: i32) -> Self {
        Tag { id, name, count }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &String {
        &self.name
    }
}

recast::record! {
    Tag {
        properties: [id: i32, name: String],
        private_fields: [count: i32],
        constructors: [new(id: i32, name: String, count: i32)],
    }
}

#[test]
fn parameters_without_a_readable_member_fail_every_time() {
    recast_testhelpers::setup();

    let t1 = Tag::new(1, "General".to_string(), 3);
    assert_eq!((t1.id(), t1.name().as_str(), t1.count), (1, "General", 3));

    let messages: Vec<String> = (0..3)
        .map(|_| {
            let err = match t1.change(accessor!(t => t.name), "Electronics".to_string()) {
                Ok(_) => panic!("Tag has no readable count"),
                Err(err) => err,
            };
            assert!(matches!(
                err,
                ChangeError::MissingSourceMember {
                    parameter: "count",
                    ..
                }
            ));
            err.to_string()
        })
        .collect();

    assert!(messages.iter().all(|m| *m == messages[0]));
    insta::assert_snapshot!(
        messages[0],
        @"No matching property found for constructor argument count on type scenarios::Tag"
    );
    assert!(!recast::PlanCache::global().contains::<Tag>("name"));
}

#[derive(Debug, PartialEq)]
pub struct Name {
    first_name: String,
    last_name: String,
}

impl Name {
    pub fn new(first_name: &str, last_name: &str) -> Arc<Self> {
        Arc::new(Name {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }
}

pub struct Person {
    id: i32,
    name: Arc<Name>,
    age: i32,
}

impl Person {
    pub fn new(id: i32, name: Arc<Name>, age: i32) -> Self {
        Person { id, name, age }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &Arc<Name> {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }
}

recast::record! {
    Person {
        properties: [id: i32, name: Arc<Name>, age: i32],
        constructors: [new(id: i32, name: Arc<Name>, age: i32)],
    }
}

#[test]
fn changing_a_nested_reference_replaces_it() {
    recast_testhelpers::setup();

    let p1 = Person::new(1, Name::new("John", "Doe"), 27);
    let p2 = p1
        .change(accessor!(p => p.name), Name::new("Jane", "Doe"))
        .unwrap();

    assert!(!std::ptr::eq(&p1, &p2));
    assert!(!Arc::ptr_eq(p1.name(), p2.name()));
    assert_eq!(p2.name().first_name, "Jane");
    assert_eq!(p2.name().last_name, "Doe");
    assert_eq!(p2.age(), 27);
}

#[test]
fn untouched_nested_references_are_shared() {
    recast_testhelpers::setup();

    let p1 = Person::new(1, Name::new("John", "Doe"), 27);
    let p2 = p1.change(accessor!(p => p.age), 32).unwrap();

    assert!(!std::ptr::eq(&p1, &p2));
    assert!(Arc::ptr_eq(p1.name(), p2.name()));
    assert_eq!(p2.id(), 1);
    assert_eq!(p2.age(), 32);
}
