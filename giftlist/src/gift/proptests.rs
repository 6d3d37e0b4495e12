//! Property-based tests for the gift state machine.

use super::{Gift, GiftEdit, GiftId, NewGift, ReservationState, Reserver};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Reserve(String, String),
    Release,
    Edit(bool, Option<(String, String)>),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        ("[a-z]{1,10}", "[a-z]{1,8}@[a-z]{1,5}\\.com").prop_map(|(n, e)| Op::Reserve(n, e)),
        Just(Op::Release),
        (any::<bool>(), prop::option::of(("[a-z]{1,10}", "[a-z]{1,8}@x\\.com")))
            .prop_map(|(flag, who)| Op::Edit(flag, who)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // reserve succeeds exactly when open, release exactly when reserved
    #[test]
    fn transitions_follow_state(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut gift = Gift::open(
            GiftId::try_from(1).unwrap(),
            NewGift::new("Blender", "Kitchen", "blender.png").unwrap(),
        );

        for op in ops {
            let was_reserved = gift.is_reserved();
            let before = gift.clone();
            match op {
                Op::Reserve(name, email) => {
                    let result = gift.reserve(Reserver::new(name, email).unwrap());
                    prop_assert_eq!(result.is_ok(), !was_reserved);
                    prop_assert!(gift.is_reserved());
                    if was_reserved {
                        prop_assert_eq!(&gift, &before);
                    }
                }
                Op::Release => {
                    let result = gift.release();
                    prop_assert_eq!(result.is_ok(), was_reserved);
                    prop_assert_eq!(gift.state(), &ReservationState::Open);
                }
                Op::Edit(flag, who) => {
                    let supplied = who.is_some();
                    let mut edit = GiftEdit::new("Mixer", "Kitchen", "mixer.png", flag).unwrap();
                    if let Some((name, email)) = who {
                        edit = edit.with_reserver(Reserver::new(name, email).unwrap());
                    }
                    let result = gift.apply_edit(edit);
                    let should_fail = flag && !supplied && !was_reserved;
                    prop_assert_eq!(result.is_err(), should_fail);
                    if should_fail {
                        prop_assert_eq!(&gift, &before);
                    } else {
                        prop_assert_eq!(gift.is_reserved(), flag);
                    }
                }
            }

            if let Some(who) = gift.reserver() {
                prop_assert!(!who.name().is_empty());
                prop_assert!(!who.email().is_empty());
            }
        }
    }

    // ids round-trip through their textual form
    #[test]
    fn gift_id_parses_its_display(value in 1i64..i64::MAX) {
        let id = GiftId::try_from(value).unwrap();
        prop_assert_eq!(id.to_string().parse::<GiftId>().unwrap(), id);
    }
}
