//! Property-based tests: both stores agree and keep the reservation invariant.

use super::{GiftStore, MemoryGiftStore, SqliteGiftStore};
use crate::gift::{GiftEdit, GiftId, NewGift, Reserver};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Create(String),
    Reserve(i64, String),
    Release(i64),
    Edit(i64, bool),
    Delete(i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[A-Z][a-z]{1,8}".prop_map(Op::Create),
        (1i64..6, "[a-z]{1,8}").prop_map(|(id, who)| Op::Reserve(id, who)),
        (1i64..6).prop_map(Op::Release),
        (1i64..6, any::<bool>()).prop_map(|(id, flag)| Op::Edit(id, flag)),
        (1i64..6).prop_map(Op::Delete),
    ]
}

fn apply(store: &dyn GiftStore, op: &Op) -> Result<(), crate::ErrorKind> {
    let id = |v: i64| GiftId::try_from(v).unwrap();
    let outcome = match op {
        Op::Create(name) => store
            .create(NewGift::new(name, "desc", "img.png").unwrap())
            .map(|_| ()),
        Op::Reserve(v, who) => store
            .reserve(id(*v), Reserver::new(who, format!("{who}@x.com")).unwrap())
            .map(|_| ()),
        Op::Release(v) => store.release(id(*v)).map(|_| ()),
        Op::Edit(v, flag) => store
            .edit(id(*v), GiftEdit::new("Edited", "desc", "img.png", *flag).unwrap())
            .map(|_| ()),
        Op::Delete(v) => store.delete(id(*v)),
    };
    outcome.map_err(|e| e.kind())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    #[test]
    fn stores_agree(ops in prop::collection::vec(op_strategy(), 0..30)) {
        let memory = MemoryGiftStore::new();
        let sqlite = SqliteGiftStore::open_in_memory().unwrap();

        for op in &ops {
            let a = apply(&memory, op);
            let b = apply(&sqlite, op);
            prop_assert_eq!(a, b, "diverged on {:?}", op);

            let listed_a = memory.list().unwrap();
            let listed_b = sqlite.list().unwrap();
            prop_assert_eq!(&listed_a, &listed_b);

            for gift in &listed_a {
                if let Some(who) = gift.reserver() {
                    prop_assert!(gift.is_reserved());
                    prop_assert!(!who.name().is_empty() && !who.email().is_empty());
                }
            }
        }
    }
}
