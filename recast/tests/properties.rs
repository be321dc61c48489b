use std::sync::Arc;

use proptest::prelude::*;
use recast::{Change, accessor};

#[derive(Debug, Clone, PartialEq)]
pub struct Shipment {
    pub id: i32,
    pub weight: u32,
    pub carrier: String,
    pub notes: Arc<Vec<String>>,
}

impl Shipment {
    pub fn new(id: i32, weight: u32, carrier: String, notes: Arc<Vec<String>>) -> Self {
        Shipment {
            id,
            weight,
            carrier,
            notes,
        }
    }
}

recast::record! {
    Shipment {
        fields: [id: i32, weight: u32, carrier: String, notes: Arc<Vec<String>>],
        constructors: [new(id: i32, weight: u32, carrier: String, notes: Arc<Vec<String>>)],
    }
}

fn shipment() -> impl Strategy<Value = Shipment> {
    (
        any::<i32>(),
        any::<u32>(),
        "[a-z]{0,12}",
        proptest::collection::vec("[a-z ]{0,8}", 0..4),
    )
        .prop_map(|(id, weight, carrier, notes)| Shipment::new(id, weight, carrier, Arc::new(notes)))
}

proptest! {
    #[test]
    fn changing_weight_touches_only_weight(original in shipment(), weight in any::<u32>()) {
        recast_testhelpers::setup();

        let changed = original.change(accessor!(s => s.weight), weight).unwrap();
        prop_assert_eq!(changed.weight, weight);
        prop_assert_eq!(changed.id, original.id);
        prop_assert_eq!(&changed.carrier, &original.carrier);
        prop_assert!(Arc::ptr_eq(&changed.notes, &original.notes));
    }

    #[test]
    fn changes_to_distinct_members_commute(
        original in shipment(),
        id in any::<i32>(),
        carrier in "[A-Z]{1,6}",
    ) {
        recast_testhelpers::setup();

        let ab = original
            .change(accessor!(s => s.id), id)
            .and_then(|s| s.change(accessor!(s => s.carrier), carrier.clone()))
            .unwrap();
        let ba = original
            .change(accessor!(s => s.carrier), carrier.clone())
            .and_then(|s| s.change(accessor!(s => s.id), id))
            .unwrap();

        prop_assert_eq!(&ab, &ba);
        prop_assert_eq!(ab.id, id);
        prop_assert_eq!(&ab.carrier, &carrier);
        prop_assert_eq!(ab.weight, original.weight);
    }

    #[test]
    fn changing_to_the_current_value_yields_an_equal_record(original in shipment()) {
        recast_testhelpers::setup();

        let same = original
            .change(accessor!(s => s.carrier), original.carrier.clone())
            .unwrap();
        prop_assert_eq!(&same, &original);
        prop_assert!(!std::ptr::eq(&same, &original));
    }
}
