//! Property-based tests of the core words.
//!
//! Generated operands are pushed through the host API and the words run
//! from source, so these cover the executor path as well as the words.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use filp_eval::{Interpreter, Status};
use proptest::prelude::*;

/// Printable bytes without quotes or separators.
fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9]{1,8}").expect("valid regex")
}

proptest! {
    #[test]
    fn integer_arithmetic_wraps(a in any::<i64>(), b in any::<i64>()) {
        let mut interp = Interpreter::new();
        interp.push_int(a).unwrap();
        interp.push_int(b).unwrap();
        prop_assert_eq!(interp.execute("+"), Status::Ok);
        prop_assert_eq!(interp.pop_int(), a.wrapping_add(b));

        interp.push_int(a).unwrap();
        interp.push_int(b).unwrap();
        prop_assert_eq!(interp.execute("*"), Status::Ok);
        prop_assert_eq!(interp.pop_int(), a.wrapping_mul(b));
    }

    #[test]
    fn numeric_comparison_agrees_with_i32(a in any::<i32>(), b in any::<i32>()) {
        let mut interp = Interpreter::new();
        interp.push_int(a.into()).unwrap();
        interp.push_int(b.into()).unwrap();
        prop_assert_eq!(interp.execute("<"), Status::Ok);
        let less = interp.pop();
        prop_assert_eq!(interp.text(less) == b"1", a < b);
    }

    #[test]
    fn strcat_then_length(a in word_strategy(), b in word_strategy()) {
        let mut interp = Interpreter::new();
        interp.push_scalar(&a).unwrap();
        interp.push_scalar(&b).unwrap();
        prop_assert_eq!(interp.execute("strcat dup length"), Status::Ok);
        prop_assert_eq!(interp.pop_int(), i64::try_from(a.len() + b.len()).unwrap());
        prop_assert_eq!(interp.pop_string(), format!("{a}{b}"));
    }

    #[test]
    fn sorted_arrays_are_found_by_binary_search(
        words in prop::collection::btree_set(word_strategy(), 1..20),
        probe in word_strategy(),
    ) {
        let mut interp = Interpreter::new();
        interp.push_null().unwrap();
        for word in words.iter().rev() {
            interp.push_scalar(word).unwrap();
        }
        prop_assert_eq!(interp.execute("array asort /a # ="), Status::Ok);

        interp.push_scalar("a").unwrap();
        interp.push_scalar(&probe).unwrap();
        prop_assert_eq!(interp.execute("abseek"), Status::Ok);
        let found = interp.pop_int();

        let sorted: Vec<&String> = words.iter().collect();
        match sorted.binary_search(&&probe) {
            Ok(pos) => prop_assert_eq!(found, i64::try_from(pos + 1).unwrap()),
            Err(pos) => prop_assert_eq!(found, -i64::try_from(pos + 1).unwrap()),
        }
    }

    #[test]
    fn hash_keeps_the_last_value_per_key(
        pairs in prop::collection::vec((word_strategy(), any::<u16>()), 0..30),
    ) {
        let mut interp = Interpreter::new();
        prop_assert_eq!(interp.execute("/h [ hash ="), Status::Ok);
        let mut expected = std::collections::BTreeMap::new();
        for (key, value) in &pairs {
            interp.push_scalar("h").unwrap();
            interp.push_scalar(key).unwrap();
            interp.push_int(i64::from(*value)).unwrap();
            prop_assert_eq!(interp.execute("hset"), Status::Ok);
            expected.insert(key.clone(), *value);
        }

        prop_assert_eq!(interp.execute("/h hsize"), Status::Ok);
        prop_assert_eq!(interp.pop_int(), i64::try_from(expected.len()).unwrap());
        for (key, value) in &expected {
            interp.push_scalar("h").unwrap();
            interp.push_scalar(key).unwrap();
            prop_assert_eq!(interp.execute("hget"), Status::Ok);
            prop_assert_eq!(interp.pop_int(), i64::from(*value));
        }
    }
}
